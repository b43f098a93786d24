//! Request and response message types.

use bytes::Bytes;

use crate::error::Error;
use crate::result::ResultSet;
use crate::value::WireValue;
use serde::{Deserialize, Serialize};

/// Consistency levels a query can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consistency {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    LocalOne,
}

/// Parameters sent alongside a single query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Keyspace the query runs in.
    pub keyspace: Option<String>,
    /// Requested consistency level.
    pub consistency: Option<Consistency>,
    /// Maximum number of rows per page.
    pub page_size: Option<i32>,
    /// Paging state returned with the previous page, to resume after it.
    pub paging_state: Option<Bytes>,
}

/// Parameters sent alongside a batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchParameters {
    /// Keyspace the batch runs in.
    pub keyspace: Option<String>,
    /// Requested consistency level.
    pub consistency: Option<Consistency>,
}

/// A single CQL statement with bound values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Statement text.
    pub cql: String,
    /// Bound values, in placeholder order.
    pub values: Vec<WireValue>,
    /// Optional query parameters.
    pub parameters: Option<QueryParameters>,
}

impl Query {
    /// Create a query without parameters.
    pub fn new(cql: impl Into<String>, values: Vec<WireValue>) -> Self {
        Self {
            cql: cql.into(),
            values,
            parameters: None,
        }
    }

    /// Attach query parameters.
    pub fn with_parameters(mut self, parameters: QueryParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// A statement inside a batch. Batch statements carry no parameters of
/// their own; the batch's parameters apply to all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchQuery {
    /// Statement text.
    pub cql: String,
    /// Bound values, in placeholder order.
    pub values: Vec<WireValue>,
}

impl BatchQuery {
    /// Create a batch statement.
    pub fn new(cql: impl Into<String>, values: Vec<WireValue>) -> Self {
        Self {
            cql: cql.into(),
            values,
        }
    }
}

/// Batch kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BatchType {
    /// Atomic batch recorded in the batch log.
    #[default]
    Logged,
    /// Best-effort batch without the batch log.
    Unlogged,
    /// Batch of counter updates.
    Counter,
}

impl TryFrom<u8> for BatchType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BatchType::Logged),
            1 => Ok(BatchType::Unlogged),
            2 => Ok(BatchType::Counter),
            _ => Err(Error::UnknownBatchType(value)),
        }
    }
}

/// An ordered group of statements submitted as one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Batch kind.
    pub batch_type: BatchType,
    /// Statements, executed in order.
    pub queries: Vec<BatchQuery>,
    /// Optional batch parameters.
    pub parameters: Option<BatchParameters>,
}

impl Batch {
    /// Create a logged batch.
    pub fn new(queries: Vec<BatchQuery>) -> Self {
        Self {
            batch_type: BatchType::Logged,
            queries,
            parameters: None,
        }
    }

    /// Set the batch kind.
    pub fn with_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = batch_type;
        self
    }

    /// Attach batch parameters.
    pub fn with_parameters(mut self, parameters: BatchParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Notification that a statement altered the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaChange {
    /// Kind of change, e.g. "CREATED".
    pub change_type: String,
    /// Kind of target, e.g. "TABLE".
    pub target: String,
    /// Affected keyspace.
    pub keyspace: String,
    /// Affected object name, if any.
    pub name: Option<String>,
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseResult {
    /// Rows returned by a query.
    ResultSet(ResultSet),
    /// Schema altered by a statement.
    SchemaChange(SchemaChange),
}

/// A response from the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Result payload, absent for statements that return nothing.
    pub result: Option<ResponseResult>,
}

impl Response {
    /// Create a response carrying a result set.
    pub fn result_set(result_set: ResultSet) -> Self {
        Self {
            result: Some(ResponseResult::ResultSet(result_set)),
        }
    }

    /// Create a response carrying a schema change.
    pub fn schema_change(change: SchemaChange) -> Self {
        Self {
            result: Some(ResponseResult::SchemaChange(change)),
        }
    }

    /// Create an empty response.
    pub fn empty() -> Self {
        Self { result: None }
    }
}
