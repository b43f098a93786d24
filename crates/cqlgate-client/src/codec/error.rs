//! Codec error types.

use std::fmt;

use thiserror::Error;

/// One failing element of an aggregated operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<E> {
    /// Position of the failing element.
    pub index: usize,
    /// Column name, when the element is a named column.
    pub name: Option<String>,
    /// What went wrong.
    pub cause: E,
}

/// Every failure collected while encoding a list of values or decoding a row.
///
/// Encoding and decoding keep going after the first bad element so that a
/// caller sees all of them in one error.
#[derive(Debug, Clone, PartialEq)]
pub struct Failures<E> {
    failures: Vec<Failure<E>>,
}

impl<E> Failures<E> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Record a failure at `index`.
    pub fn push(&mut self, index: usize, cause: E) {
        self.failures.push(Failure {
            index,
            name: None,
            cause,
        });
    }

    /// Record a failure for a named column at `index`.
    pub fn push_named(&mut self, index: usize, name: impl Into<String>, cause: E) {
        self.failures.push(Failure {
            index,
            name: Some(name.into()),
            cause,
        });
    }

    /// Get the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Check if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterate over the failures in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Failure<E>> {
        self.failures.iter()
    }

    /// Indices of the failing elements.
    pub fn indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }
}

impl<E> Default for Failures<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Display> fmt::Display for Failures<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.failures.len())?;
        for failure in &self.failures {
            match &failure.name {
                Some(name) => write!(f, "; [{}] {:?}: {}", failure.index, name, failure.cause)?,
                None => write!(f, "; [{}]: {}", failure.index, failure.cause)?,
            }
        }
        Ok(())
    }
}

/// Errors produced while turning native values into wire values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The value's category has no wire representation.
    #[error("unsupported type: {kind}")]
    UnsupportedType { kind: &'static str },

    /// An unsigned or duration value does not fit the wire integer.
    #[error("integer overflow: {value} does not fit in 64 bits")]
    IntegerOverflow { value: String },

    /// A decimal's scale does not fit the 32-bit wire scale.
    #[error("decimal scale {scale} out of range")]
    ScaleOutOfRange { scale: i64 },

    /// Some values of a list failed to encode.
    #[error("values: {0}")]
    Values(Failures<EncodeError>),

    /// Some statements of a batch failed to encode.
    #[error("batch queries: {0}")]
    Batch(Failures<EncodeError>),
}

/// Errors produced while turning wire values into native values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The wire value kind is not supported by the decoder.
    #[error("unsupported wire value kind: {kind}")]
    UnsupportedWireKind { kind: &'static str },

    /// The type descriptor disagrees with the wire value's shape.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    /// A UUID payload is neither empty nor 16 bytes.
    #[error("malformed uuid: {len} bytes")]
    MalformedUuid { len: usize },

    /// An inet payload is neither 4 nor 16 bytes.
    #[error("malformed inet address: {len} bytes")]
    MalformedInet { len: usize },

    /// The value cannot be represented natively.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A row has a different number of values than there are columns.
    #[error("row has {values} values for {columns} columns")]
    ColumnCountMismatch { columns: usize, values: usize },

    /// Some columns of a row failed to decode.
    #[error("columns: {0}")]
    Columns(Failures<DecodeError>),

    /// A row of a result set failed to decode.
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        DecodeError::SchemaMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
