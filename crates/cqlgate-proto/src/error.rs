//! Protocol error types.

use thiserror::Error;

/// Protocol-level errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Batch type discriminant outside the known set.
    #[error("unknown batch type: {0}")]
    UnknownBatchType(u8),
}
