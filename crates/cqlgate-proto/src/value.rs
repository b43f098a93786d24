//! Tagged protocol values.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single protocol-level value, as carried in query values and result rows.
///
/// Composite values (maps, lists, sets, tuples) all travel as a
/// [`WireValue::Collection`]; their shape is only recoverable with the
/// column's [`TypeDescriptor`](crate::TypeDescriptor). Maps are flattened as
/// `key, value, key, value, ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    /// Null / unset value.
    Null,
    /// Any integer kind, widened to 64 bits.
    Int(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Boolean value.
    Boolean(bool),
    /// UTF-8 text.
    String(String),
    /// Raw binary data.
    Bytes(Bytes),
    /// Network address, 4 (IPv4) or 16 (IPv6) octets.
    Inet(Bytes),
    /// UUID as 16 raw bytes. An empty payload means "no value".
    Uuid(Bytes),
    /// Days since the Unix epoch.
    Date(u32),
    /// Nanoseconds since midnight.
    Time(u64),
    /// Arbitrary-precision decimal.
    Decimal {
        /// Number of digits after the decimal point (32-bit two's complement).
        scale: u32,
        /// Unscaled value as big-endian two's complement.
        value: Bytes,
    },
    /// Arbitrary-precision integer as big-endian two's complement.
    Varint(Bytes),
    /// Map, list, set or tuple elements.
    Collection(Vec<WireValue>),
    /// User-defined type fields.
    Udt(Vec<(String, WireValue)>),
}

impl WireValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Short name of the value's tag, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Int(_) => "int",
            WireValue::Float(_) => "float",
            WireValue::Double(_) => "double",
            WireValue::Boolean(_) => "boolean",
            WireValue::String(_) => "string",
            WireValue::Bytes(_) => "bytes",
            WireValue::Inet(_) => "inet",
            WireValue::Uuid(_) => "uuid",
            WireValue::Date(_) => "date",
            WireValue::Time(_) => "time",
            WireValue::Decimal { .. } => "decimal",
            WireValue::Varint(_) => "varint",
            WireValue::Collection(_) => "collection",
            WireValue::Udt(_) => "udt",
        }
    }

    /// Try to get the elements of a collection.
    pub fn as_collection(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Collection(elements) => Some(elements),
            _ => None,
        }
    }
}

impl From<i64> for WireValue {
    fn from(v: i64) -> Self {
        WireValue::Int(v)
    }
}

impl From<bool> for WireValue {
    fn from(v: bool) -> Self {
        WireValue::Boolean(v)
    }
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        WireValue::String(v.to_string())
    }
}

impl From<String> for WireValue {
    fn from(v: String) -> Self {
        WireValue::String(v)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(v: Vec<WireValue>) -> Self {
        WireValue::Collection(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(WireValue::Null.is_null());
        assert!(!WireValue::Int(0).is_null());

        let list = WireValue::from(vec![WireValue::Int(1), WireValue::Int(2)]);
        assert_eq!(list.as_collection().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(WireValue::Null.kind(), "null");
        assert_eq!(WireValue::Varint(Bytes::from_static(&[0x10])).kind(), "varint");
        assert_eq!(
            WireValue::Decimal {
                scale: 2,
                value: Bytes::from_static(&[0x01]),
            }
            .kind(),
            "decimal"
        );
        assert_eq!(WireValue::Udt(vec![]).kind(), "udt");
    }

    #[test]
    fn test_value_serde_roundtrip() {
        let values = vec![
            WireValue::Null,
            WireValue::Int(-64),
            WireValue::Double(1.5),
            WireValue::String("foo".into()),
            WireValue::Bytes(Bytes::from_static(b"bar")),
            WireValue::Uuid(Bytes::from_static(&[7u8; 16])),
            WireValue::Date(17_980),
            WireValue::Collection(vec![
                WireValue::String("one".into()),
                WireValue::Collection(vec![WireValue::Int(1), WireValue::Int(2)]),
            ]),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: WireValue = serde_json::from_str(&json).unwrap();
            assert_eq!(value, back);
        }
    }
}
