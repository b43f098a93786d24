//! The seam between the client and whatever carries its messages.
//!
//! The client builds fully encoded [`Query`] and [`Batch`] messages and hands
//! them to a [`Transport`]. Framing, connection management and retries live
//! behind this trait.

use async_trait::async_trait;
use cqlgate_proto::{Batch, Query, Response};
use thiserror::Error;

/// Errors reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection could not be established or was lost.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server rejected the request.
    #[error("server error [{code}]: {message}")]
    Server { code: i32, message: String },
}

impl TransportError {
    /// Create a server error.
    pub fn server(code: i32, message: impl Into<String>) -> Self {
        TransportError::Server {
            code,
            message: message.into(),
        }
    }
}

/// Delivers encoded requests and returns the server's response.
///
/// The client bounds every call with [`ClientConfig::timeout`]. A transport
/// that dials lazily should give up on connecting after
/// [`ClientConfig::connect_deadline`] and report
/// [`TransportError::Connection`].
///
/// [`ClientConfig::timeout`]: crate::ClientConfig::timeout
/// [`ClientConfig::connect_deadline`]: crate::ClientConfig::connect_deadline
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single query.
    async fn execute_query(&self, query: Query) -> Result<Response, TransportError>;

    /// Execute a batch of queries.
    async fn execute_batch(&self, batch: Batch) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TransportError::Connection("refused".into()).to_string(),
            "connection error: refused"
        );
        assert_eq!(
            TransportError::server(8704, "unconfigured table users").to_string(),
            "server error [8704]: unconfigured table users"
        );
    }
}
