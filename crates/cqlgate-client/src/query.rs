//! Query and batch builders.

use bytes::Bytes;
use cqlgate_proto::{self as proto, BatchType, Consistency, QueryParameters};

use crate::client::Client;
use crate::codec::{encode_values, EncodeError, Failures};
use crate::error::Error;
use crate::native::NativeValue;
use crate::params::QueryParams;
use crate::rows::Rows;
use crate::scan::FromRow;

/// A statement with bound values, ready to run on a [`Client`].
///
/// Parameters set here take precedence over the client's defaults, see
/// [`QueryParams::merge`].
#[derive(Debug, Clone)]
pub struct Query<'a> {
    client: &'a Client,
    cql: String,
    values: Vec<NativeValue>,
    params: Option<QueryParams>,
    paging_state: Option<Bytes>,
}

impl<'a> Query<'a> {
    pub(crate) fn new(client: &'a Client, cql: String, values: Vec<NativeValue>) -> Self {
        Self {
            client,
            cql,
            values,
            params: None,
            paging_state: None,
        }
    }

    fn params_mut(&mut self) -> &mut QueryParams {
        self.params.get_or_insert_with(QueryParams::default)
    }

    /// Resume after the page that returned `paging_state`.
    ///
    /// The paging state belongs to this request only and does not count as
    /// request parameters when client defaults are merged.
    pub fn paging_state(mut self, paging_state: impl Into<Bytes>) -> Self {
        self.paging_state = Some(paging_state.into());
        self
    }

    /// The query for the page after `rows`, or `None` on the last page.
    pub fn next_page(&self, rows: &Rows) -> Option<Query<'a>> {
        let state = rows.paging_state()?;
        Some(self.clone().paging_state(state.clone()))
    }

    /// Run the query in `keyspace`.
    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.params_mut().keyspace = Some(keyspace.into());
        self
    }

    /// Request a consistency level.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.params_mut().consistency = Some(consistency);
        self
    }

    /// Limit the number of rows per page.
    pub fn page_size(mut self, page_size: i32) -> Self {
        self.params_mut().page_size = Some(page_size);
        self
    }

    /// Statement text.
    pub fn cql(&self) -> &str {
        &self.cql
    }

    /// Bound values.
    pub fn values(&self) -> &[NativeValue] {
        &self.values
    }

    /// Parameters set on this query, before client defaults apply.
    pub fn params(&self) -> Option<&QueryParams> {
        self.params.as_ref()
    }

    /// Parameters the query is sent with once client defaults apply.
    pub fn effective_params(&self) -> Option<QueryParams> {
        QueryParams::merge(self.client.config().default_params.as_ref(), self.params.as_ref())
    }

    /// Build the protocol message this query is sent as.
    pub fn to_proto(&self) -> Result<proto::Query, EncodeError> {
        let values = encode_values(&self.values)?;
        let mut query = proto::Query::new(self.cql.clone(), values);
        let mut parameters = self.effective_params().map(|p| p.to_query_parameters());
        if let Some(state) = &self.paging_state {
            parameters
                .get_or_insert_with(QueryParameters::default)
                .paging_state = Some(state.clone());
        }
        if let Some(parameters) = parameters {
            query = query.with_parameters(parameters);
        }
        Ok(query)
    }

    /// Execute the query and return its rows.
    pub async fn exec(&self) -> Result<Rows, Error> {
        self.client.exec_query(self).await
    }

    /// Execute the query and convert every row into `T`.
    pub async fn exec_into<T: FromRow>(&self) -> Result<Vec<T>, Error> {
        let rows = self.exec().await?;
        rows.iter()
            .map(|row| row.scan_into::<T>().map_err(Error::from))
            .collect()
    }
}

/// An ordered group of queries submitted as one request.
#[derive(Debug, Clone)]
pub struct BatchQuery<'a> {
    client: &'a Client,
    queries: Vec<Query<'a>>,
    batch_type: BatchType,
    params: Option<QueryParams>,
}

impl<'a> BatchQuery<'a> {
    pub(crate) fn new(client: &'a Client, queries: Vec<Query<'a>>) -> Self {
        Self {
            client,
            queries,
            batch_type: BatchType::default(),
            params: None,
        }
    }

    fn params_mut(&mut self) -> &mut QueryParams {
        self.params.get_or_insert_with(QueryParams::default)
    }

    /// Set the batch kind.
    pub fn batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = batch_type;
        self
    }

    /// Run the batch in `keyspace`.
    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.params_mut().keyspace = Some(keyspace.into());
        self
    }

    /// Request a consistency level.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.params_mut().consistency = Some(consistency);
        self
    }

    /// Queries in submission order.
    pub fn queries(&self) -> &[Query<'a>] {
        &self.queries
    }

    /// Parameters the batch is sent with once client defaults apply.
    pub fn effective_params(&self) -> Option<QueryParams> {
        QueryParams::merge(self.client.config().default_params.as_ref(), self.params.as_ref())
    }

    /// Build the protocol message this batch is sent as.
    ///
    /// Every query is encoded before anything is returned; when any fail,
    /// the error lists each failing query index.
    pub fn to_proto(&self) -> Result<proto::Batch, EncodeError> {
        let mut encoded = Vec::with_capacity(self.queries.len());
        let mut failures = Failures::new();

        for (i, query) in self.queries.iter().enumerate() {
            match encode_values(&query.values) {
                Ok(values) => encoded.push(proto::BatchQuery::new(query.cql.clone(), values)),
                Err(e) => failures.push(i, e),
            }
        }
        if !failures.is_empty() {
            return Err(EncodeError::Batch(failures));
        }

        let mut batch = proto::Batch::new(encoded).with_type(self.batch_type);
        if let Some(params) = self.effective_params() {
            batch = batch.with_parameters(params.to_batch_parameters());
        }
        Ok(batch)
    }

    /// Execute the batch.
    pub async fn exec(&self) -> Result<(), Error> {
        self.client.exec_batch(self).await
    }
}
