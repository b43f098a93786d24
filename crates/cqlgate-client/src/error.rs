//! Client error types.

use std::time::Duration;

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};
use crate::scan::ScanError;
use crate::transport::TransportError;

/// Client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Bound values could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A result set could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Request timed out.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A row could not be destructured.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let e: Error = EncodeError::UnsupportedType { kind: "udt" }.into();
        assert!(matches!(e, Error::Encode(_)));

        let e: Error = TransportError::Connection("reset".into()).into();
        assert_eq!(e.to_string(), "transport error: connection error: reset");

        let e = Error::Timeout(Duration::from_millis(250));
        assert_eq!(e.to_string(), "request timed out after 250ms");
    }
}
