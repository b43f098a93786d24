//! cqlgate protocol types.
//!
//! This crate defines the wire-level vocabulary shared by the codec and the
//! transport: tagged values, column type descriptors, query/batch requests
//! and result sets. It does no framing of its own; every type derives
//! `serde::Serialize` and `serde::Deserialize` so a transport can embed it in
//! whatever envelope it speaks.
//!
//! # Modules
//!
//! - [`value`] - Tagged protocol values
//! - [`types`] - Column type descriptors
//! - [`result`] - Result sets and column metadata
//! - [`message`] - Query, batch and response messages
//! - [`error`] - Protocol error types

pub mod error;
pub mod message;
pub mod result;
pub mod types;
pub mod value;

pub use error::Error;

// Re-export commonly used types at crate root
pub use message::{
    Batch, BatchParameters, BatchQuery, BatchType, Consistency, Query, QueryParameters, Response,
    ResponseResult, SchemaChange,
};
pub use result::{ColumnSpec, ResultSet, WireRow};
pub use types::{BasicType, TypeDescriptor};
pub use value::WireValue;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_response_roundtrip() {
        let response = Response::result_set(ResultSet::new(
            vec![
                ColumnSpec::new("name", BasicType::Text),
                ColumnSpec::new(
                    "tags",
                    TypeDescriptor::map(
                        BasicType::Text.into(),
                        TypeDescriptor::list(BasicType::Int.into()),
                    ),
                ),
            ],
            vec![WireRow::new(vec![
                WireValue::from("Alice"),
                WireValue::Collection(vec![
                    WireValue::from("one"),
                    WireValue::Collection(vec![WireValue::Int(1), WireValue::Int(2)]),
                ]),
            ])],
        ));

        let json = serde_json::to_vec(&response).unwrap();
        let back: Response = serde_json::from_slice(&json).unwrap();
        assert_eq!(response, back);
    }
}
