//! Native (application-side) values.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use uuid::Uuid;

/// An application value that can be bound to a query or read from a row.
///
/// Integers of every width are accepted on the way out; values read back
/// from the wire come in as [`NativeValue::I64`] since the protocol carries a
/// single integer kind. Maps are kept as ordered key/value pairs because keys
/// may be floats or other values without a total order.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// No value.
    Null,
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    Bool(bool),
    /// UTF-8 text.
    Text(String),
    /// Raw binary data.
    Bytes(Vec<u8>),
    /// IPv4 or IPv6 address.
    Inet(IpAddr),
    Uuid(Uuid),
    /// Point in time. Sent as milliseconds since the epoch.
    Timestamp(DateTime<Utc>),
    /// Time of day as a duration since midnight.
    Time(Duration),
    /// Arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// Arbitrary-precision integer.
    Varint(BigInt),
    /// Ordered sequence of values of one type.
    List(Vec<NativeValue>),
    /// Set of values of one type.
    Set(Vec<NativeValue>),
    /// Key/value pairs.
    Map(Vec<(NativeValue, NativeValue)>),
    /// Fixed-arity sequence, one type per slot.
    Tuple(Vec<NativeValue>),
    /// User-defined type fields. Not supported by the codec.
    Udt(Vec<(String, NativeValue)>),
}

impl NativeValue {
    /// Build a list from anything convertible.
    pub fn list<T: Into<NativeValue>>(items: impl IntoIterator<Item = T>) -> Self {
        NativeValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set from anything convertible.
    pub fn set<T: Into<NativeValue>>(items: impl IntoIterator<Item = T>) -> Self {
        NativeValue::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from key/value pairs.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<NativeValue>,
        V: Into<NativeValue>,
    {
        NativeValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a tuple from its slots.
    pub fn tuple(slots: Vec<NativeValue>) -> Self {
        NativeValue::Tuple(slots)
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Short name of the value's category, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::I8(_) => "i8",
            NativeValue::I16(_) => "i16",
            NativeValue::I32(_) => "i32",
            NativeValue::I64(_) => "i64",
            NativeValue::U8(_) => "u8",
            NativeValue::U16(_) => "u16",
            NativeValue::U32(_) => "u32",
            NativeValue::U64(_) => "u64",
            NativeValue::Float(_) => "float",
            NativeValue::Double(_) => "double",
            NativeValue::Bool(_) => "bool",
            NativeValue::Text(_) => "text",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Inet(_) => "inet",
            NativeValue::Uuid(_) => "uuid",
            NativeValue::Timestamp(_) => "timestamp",
            NativeValue::Time(_) => "time",
            NativeValue::Decimal(_) => "decimal",
            NativeValue::Varint(_) => "varint",
            NativeValue::List(_) => "list",
            NativeValue::Set(_) => "set",
            NativeValue::Map(_) => "map",
            NativeValue::Tuple(_) => "tuple",
            NativeValue::Udt(_) => "udt",
        }
    }

    /// Try to get as i64. Narrower integers widen.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NativeValue::I8(v) => Some(i64::from(*v)),
            NativeValue::I16(v) => Some(i64::from(*v)),
            NativeValue::I32(v) => Some(i64::from(*v)),
            NativeValue::I64(v) => Some(*v),
            NativeValue::U8(v) => Some(i64::from(*v)),
            NativeValue::U16(v) => Some(i64::from(*v)),
            NativeValue::U32(v) => Some(i64::from(*v)),
            NativeValue::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the elements of a list, set or tuple.
    pub fn as_slice(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::List(items) | NativeValue::Set(items) | NativeValue::Tuple(items) => {
                Some(items)
            }
            _ => None,
        }
    }

    /// Look up a map entry by key.
    pub fn get(&self, key: &NativeValue) -> Option<&NativeValue> {
        match self {
            NativeValue::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Null => write!(f, "null"),
            NativeValue::I8(v) => write!(f, "{}", v),
            NativeValue::I16(v) => write!(f, "{}", v),
            NativeValue::I32(v) => write!(f, "{}", v),
            NativeValue::I64(v) => write!(f, "{}", v),
            NativeValue::U8(v) => write!(f, "{}", v),
            NativeValue::U16(v) => write!(f, "{}", v),
            NativeValue::U32(v) => write!(f, "{}", v),
            NativeValue::U64(v) => write!(f, "{}", v),
            NativeValue::Float(v) => write!(f, "{}", v),
            NativeValue::Double(v) => write!(f, "{}", v),
            NativeValue::Bool(v) => write!(f, "{}", v),
            NativeValue::Text(s) => write!(f, "{:?}", s),
            NativeValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            NativeValue::Inet(ip) => write!(f, "{}", ip),
            NativeValue::Uuid(u) => write!(f, "{}", u),
            NativeValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            NativeValue::Time(d) => write!(f, "{:?}", d),
            NativeValue::Decimal(d) => write!(f, "{}", d),
            NativeValue::Varint(v) => write!(f, "{}", v),
            NativeValue::List(items) | NativeValue::Set(items) | NativeValue::Tuple(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            NativeValue::Map(pairs) => {
                write!(f, "map[")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "]")
            }
            NativeValue::Udt(fields) => {
                write!(f, "{{")?;
                for (i, (name, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", name, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Conversion implementations
macro_rules! impl_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for NativeValue {
                fn from(v: $t) -> Self {
                    NativeValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => Text,
    Vec<u8> => Bytes,
    IpAddr => Inet,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    Duration => Time,
    BigDecimal => Decimal,
    BigInt => Varint,
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::Text(v.to_string())
    }
}

impl From<&[u8]> for NativeValue {
    fn from(v: &[u8]) -> Self {
        NativeValue::Bytes(v.to_vec())
    }
}

impl From<bytes::Bytes> for NativeValue {
    fn from(v: bytes::Bytes) -> Self {
        NativeValue::Bytes(v.to_vec())
    }
}

impl From<Ipv4Addr> for NativeValue {
    fn from(v: Ipv4Addr) -> Self {
        NativeValue::Inet(IpAddr::V4(v))
    }
}

impl From<Ipv6Addr> for NativeValue {
    fn from(v: Ipv6Addr) -> Self {
        NativeValue::Inet(IpAddr::V6(v))
    }
}

impl<K: Into<NativeValue>, V: Into<NativeValue>> From<HashMap<K, V>> for NativeValue {
    fn from(v: HashMap<K, V>) -> Self {
        NativeValue::map(v)
    }
}

impl<K: Into<NativeValue>, V: Into<NativeValue>> From<BTreeMap<K, V>> for NativeValue {
    fn from(v: BTreeMap<K, V>) -> Self {
        NativeValue::map(v)
    }
}

impl<T: Into<NativeValue>> From<HashSet<T>> for NativeValue {
    fn from(v: HashSet<T>) -> Self {
        NativeValue::set(v)
    }
}

impl<T: Into<NativeValue>> From<BTreeSet<T>> for NativeValue {
    fn from(v: BTreeSet<T>) -> Self {
        NativeValue::set(v)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => NativeValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(NativeValue::from(true), NativeValue::Bool(true));
        assert_eq!(NativeValue::from(-8i8), NativeValue::I8(-8));
        assert_eq!(NativeValue::from(64u64), NativeValue::U64(64));
        assert_eq!(NativeValue::from("foo"), NativeValue::Text("foo".into()));
        assert_eq!(NativeValue::from(&b"bar"[..]), NativeValue::Bytes(b"bar".to_vec()));
        assert_eq!(NativeValue::from(None::<i32>), NativeValue::Null);
        assert_eq!(NativeValue::from(Some(42i32)), NativeValue::I32(42));
        assert_eq!(
            NativeValue::from(Ipv4Addr::new(1, 2, 3, 4)),
            NativeValue::Inet(IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)))
        );
    }

    #[test]
    fn test_collection_constructors() {
        let list = NativeValue::list([1i64, 2, 3]);
        assert_eq!(list.as_slice().map(|s| s.len()), Some(3));

        let map = NativeValue::from(BTreeMap::from([("one", 1i64), ("two", 2)]));
        assert_eq!(map.get(&"two".into()), Some(&NativeValue::I64(2)));
        assert_eq!(map.get(&"three".into()), None);
        assert_eq!(map.kind(), "map");
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!(NativeValue::I16(-16).as_i64(), Some(-16));
        assert_eq!(NativeValue::U32(32).as_i64(), Some(32));
        assert_eq!(NativeValue::U64(u64::MAX).as_i64(), None);
        assert_eq!(NativeValue::Text("1".into()).as_i64(), None);
    }

    #[test]
    fn test_display() {
        let value = NativeValue::list([
            NativeValue::from("Alice"),
            NativeValue::from(30i64),
            NativeValue::Null,
        ]);
        assert_eq!(value.to_string(), "[\"Alice\" 30 null]");

        let map = NativeValue::map([("one", NativeValue::list([1i64, 2]))]);
        assert_eq!(map.to_string(), "map[\"one\":[1 2]]");
        assert_eq!(NativeValue::Bytes(vec![0xca, 0xfe]).to_string(), "0xcafe");
    }
}
