//! Value codec between [`NativeValue`](crate::NativeValue) and
//! [`WireValue`](cqlgate_proto::WireValue).
//!
//! Encoding needs nothing but the value. Decoding is driven by the column's
//! [`TypeDescriptor`](cqlgate_proto::TypeDescriptor): a collection on the
//! wire is a flat element list whose meaning (map, list, set or tuple) comes
//! only from the descriptor.
//!
//! All functions here are pure and can be called from any thread.

mod decode;
mod encode;
mod error;
pub mod varint;

pub use decode::{decode, decode_row, decode_untyped};
pub use encode::{encode, encode_values};
pub use error::{DecodeError, EncodeError, Failure, Failures};
