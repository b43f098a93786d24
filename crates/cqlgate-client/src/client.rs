//! cqlgate client API.
//!
//! This module provides the main `Client` struct. It turns native values into
//! protocol messages, hands them to a [`Transport`], and materializes the
//! rows that come back.

use std::fmt;
use std::sync::Arc;

use cqlgate_proto::{Response, ResponseResult};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::native::NativeValue;
use crate::query::{BatchQuery, Query};
use crate::rows::{Row, Rows};
use crate::transport::Transport;

/// A cqlgate client.
///
/// Cheap to share: each call is independent and bounded by the configured
/// timeout.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use cqlgate_client::{Client, ClientConfig};
///
/// let client = Client::new(ClientConfig::localhost().with_default_keyspace("app"), transport);
///
/// let rows = client
///     .query("SELECT name, age FROM users WHERE id = ?", vec![42i64.into()])
///     .exec()
///     .await?;
///
/// for row in &rows {
///     let (name, age): (String, i64) = row.scan_into()?;
///     println!("{name} is {age}");
/// }
/// ```
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client sending through `transport`.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start building a query.
    pub fn query(&self, cql: impl Into<String>, values: Vec<NativeValue>) -> Query<'_> {
        Query::new(self, cql.into(), values)
    }

    /// Start building a batch from queries built on this client.
    pub fn batch<'a>(&'a self, queries: Vec<Query<'a>>) -> BatchQuery<'a> {
        BatchQuery::new(self, queries)
    }

    pub(crate) async fn exec_query(&self, query: &Query<'_>) -> Result<Rows, Error> {
        let message = query.to_proto()?;
        let keyspace = message
            .parameters
            .as_ref()
            .and_then(|p| p.keyspace.clone());

        debug!(
            cql = %message.cql,
            values = message.values.len(),
            keyspace = ?keyspace,
            "executing query"
        );

        let response = tokio::time::timeout(self.config.timeout, self.transport.execute_query(message))
            .await
            .map_err(|_| {
                warn!(cql = %query.cql(), timeout = ?self.config.timeout, "query timed out");
                Error::Timeout(self.config.timeout)
            })??;

        let rows = self.handle_response(response)?;
        debug!(rows = rows.len(), has_more = rows.has_more(), "query completed");
        Ok(rows)
    }

    pub(crate) async fn exec_batch(&self, batch: &BatchQuery<'_>) -> Result<(), Error> {
        let message = batch.to_proto()?;

        debug!(
            queries = message.queries.len(),
            batch_type = ?message.batch_type,
            keyspace = ?message.parameters.as_ref().and_then(|p| p.keyspace.as_deref()),
            "executing batch"
        );

        tokio::time::timeout(self.config.timeout, self.transport.execute_batch(message))
            .await
            .map_err(|_| {
                warn!(timeout = ?self.config.timeout, "batch timed out");
                Error::Timeout(self.config.timeout)
            })??;

        debug!("batch completed");
        Ok(())
    }

    fn handle_response(&self, response: Response) -> Result<Rows, Error> {
        match response.result {
            Some(ResponseResult::ResultSet(result_set)) => {
                if result_set.has_more() {
                    debug!(rows = result_set.len(), "result set has more pages");
                }
                Row::from_result_set(&result_set).map_err(|e| {
                    warn!(error = %e, "failed to decode result set");
                    Error::from(e)
                })
            }
            Some(ResponseResult::SchemaChange(change)) => {
                debug!(
                    change = %change.change_type,
                    target = %change.target,
                    keyspace = %change.keyspace,
                    "schema changed"
                );
                Ok(Rows::default())
            }
            None => Ok(Rows::default()),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
