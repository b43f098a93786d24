//! Client configuration.

use std::time::Duration;

use crate::params::QueryParams;

/// Default address of a gateway on this host.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for a transport to establish its connection.
pub const DEFAULT_CONNECT_DEADLINE: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway address, passed through to the transport.
    pub address: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Connection deadline for transports that dial lazily.
    pub connect_deadline: Duration,

    /// Parameters applied to requests that do not bring their own.
    pub default_params: Option<QueryParams>,
}

impl ClientConfig {
    /// Create a new client configuration with the specified address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: DEFAULT_TIMEOUT,
            connect_deadline: DEFAULT_CONNECT_DEADLINE,
            default_params: None,
        }
    }

    /// Create a configuration for a gateway on localhost.
    pub fn localhost() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection deadline.
    pub fn with_connect_deadline(mut self, deadline: Duration) -> Self {
        self.connect_deadline = deadline;
        self
    }

    /// Set the default parameters.
    pub fn with_default_params(mut self, params: QueryParams) -> Self {
        self.default_params = Some(params);
        self
    }

    /// Set the default keyspace, keeping any other default parameters.
    pub fn with_default_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        let params = self.default_params.take().unwrap_or_default();
        self.default_params = Some(params.with_keyspace(keyspace));
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::localhost()
    }
}
