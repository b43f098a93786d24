//! Column type descriptors.

use serde::{Deserialize, Serialize};

use crate::value::WireValue;

/// Scalar column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    /// ASCII text.
    Ascii,
    /// 64-bit signed integer.
    Bigint,
    /// Binary data.
    Blob,
    /// Boolean value.
    Boolean,
    /// Distributed counter (64-bit).
    Counter,
    /// Arbitrary-precision decimal.
    Decimal,
    /// 64-bit floating point.
    Double,
    /// 32-bit floating point.
    Float,
    /// 32-bit signed integer.
    Int,
    /// Milliseconds since the Unix epoch.
    Timestamp,
    /// UUID (128-bit identifier).
    Uuid,
    /// UTF-8 text.
    Varchar,
    /// Arbitrary-precision integer.
    Varint,
    /// Version 1 UUID.
    Timeuuid,
    /// IPv4 or IPv6 address.
    Inet,
    /// Days since the Unix epoch.
    Date,
    /// Nanoseconds since midnight.
    Time,
    /// 16-bit signed integer.
    Smallint,
    /// 8-bit signed integer.
    Tinyint,
    /// UTF-8 text.
    Text,
}

impl BasicType {
    /// Check if this type is an integer kind carried as a 64-bit wire int.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BasicType::Bigint
                | BasicType::Counter
                | BasicType::Int
                | BasicType::Smallint
                | BasicType::Tinyint
        )
    }

    /// Check if this type is a string-like type.
    pub fn is_text(&self) -> bool {
        matches!(self, BasicType::Ascii | BasicType::Varchar | BasicType::Text)
    }

    /// Check if a wire value can carry a value of this type.
    ///
    /// Null is accepted by every type. Timestamps travel as 64-bit ints.
    pub fn accepts(&self, value: &WireValue) -> bool {
        match value {
            WireValue::Null => true,
            WireValue::Int(_) => self.is_integer() || *self == BasicType::Timestamp,
            WireValue::String(_) => self.is_text(),
            WireValue::Float(_) => *self == BasicType::Float,
            WireValue::Double(_) => *self == BasicType::Double,
            WireValue::Boolean(_) => *self == BasicType::Boolean,
            WireValue::Bytes(_) => *self == BasicType::Blob,
            WireValue::Inet(_) => *self == BasicType::Inet,
            WireValue::Uuid(_) => matches!(self, BasicType::Uuid | BasicType::Timeuuid),
            WireValue::Date(_) => *self == BasicType::Date,
            WireValue::Time(_) => *self == BasicType::Time,
            WireValue::Decimal { .. } => *self == BasicType::Decimal,
            WireValue::Varint(_) => *self == BasicType::Varint,
            WireValue::Collection(_) | WireValue::Udt(_) => false,
        }
    }

    /// Lowercase type name, as written in a schema.
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Ascii => "ascii",
            BasicType::Bigint => "bigint",
            BasicType::Blob => "blob",
            BasicType::Boolean => "boolean",
            BasicType::Counter => "counter",
            BasicType::Decimal => "decimal",
            BasicType::Double => "double",
            BasicType::Float => "float",
            BasicType::Int => "int",
            BasicType::Timestamp => "timestamp",
            BasicType::Uuid => "uuid",
            BasicType::Varchar => "varchar",
            BasicType::Varint => "varint",
            BasicType::Timeuuid => "timeuuid",
            BasicType::Inet => "inet",
            BasicType::Date => "date",
            BasicType::Time => "time",
            BasicType::Smallint => "smallint",
            BasicType::Tinyint => "tinyint",
            BasicType::Text => "text",
        }
    }
}

/// The declared shape of a column's type.
///
/// Supplied with result-set column metadata and carried through decoding so
/// that composite wire values can be interpreted without looking at the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// A scalar type.
    Basic(BasicType),
    /// A map from keys of one type to values of another.
    Map {
        /// Key type.
        key: Box<TypeDescriptor>,
        /// Value type.
        value: Box<TypeDescriptor>,
    },
    /// An ordered list.
    List(Box<TypeDescriptor>),
    /// A set.
    Set(Box<TypeDescriptor>),
    /// A fixed-arity tuple with a type per slot.
    Tuple(Vec<TypeDescriptor>),
    /// A user-defined type.
    Udt {
        /// Type name.
        name: String,
        /// Field names and types, in declaration order.
        fields: Vec<(String, TypeDescriptor)>,
    },
}

impl TypeDescriptor {
    /// Create a map descriptor.
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a list descriptor.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    /// Create a set descriptor.
    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Box::new(element))
    }

    /// Create a tuple descriptor.
    pub fn tuple(elements: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Tuple(elements)
    }

    /// Short name of the descriptor's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDescriptor::Basic(_) => "basic",
            TypeDescriptor::Map { .. } => "map",
            TypeDescriptor::List(_) => "list",
            TypeDescriptor::Set(_) => "set",
            TypeDescriptor::Tuple(_) => "tuple",
            TypeDescriptor::Udt { .. } => "udt",
        }
    }
}

impl From<BasicType> for TypeDescriptor {
    fn from(basic: BasicType) -> Self {
        TypeDescriptor::Basic(basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_predicates() {
        assert!(BasicType::Bigint.is_integer());
        assert!(BasicType::Tinyint.is_integer());
        assert!(!BasicType::Varint.is_integer());
        assert!(BasicType::Varchar.is_text());
        assert!(!BasicType::Blob.is_text());
    }

    #[test]
    fn test_basic_type_accepts() {
        assert!(BasicType::Smallint.accepts(&WireValue::Int(3)));
        assert!(BasicType::Timestamp.accepts(&WireValue::Int(1_556_108_614_000)));
        assert!(BasicType::Ascii.accepts(&WireValue::from("x")));
        assert!(BasicType::Timeuuid.accepts(&WireValue::Uuid(Default::default())));
        assert!(BasicType::Int.accepts(&WireValue::Null));

        assert!(!BasicType::Int.accepts(&WireValue::from("x")));
        assert!(!BasicType::Text.accepts(&WireValue::Boolean(true)));
        assert!(!BasicType::Varint.accepts(&WireValue::Int(1)));
        assert!(!BasicType::Int.accepts(&WireValue::Collection(vec![])));
        assert_eq!(BasicType::Tinyint.name(), "tinyint");
    }

    #[test]
    fn test_nested_descriptor() {
        let desc = TypeDescriptor::map(
            BasicType::Text.into(),
            TypeDescriptor::list(BasicType::Int.into()),
        );

        assert_eq!(desc.kind(), "map");
        match desc {
            TypeDescriptor::Map { key, value } => {
                assert_eq!(*key, TypeDescriptor::Basic(BasicType::Text));
                assert_eq!(value.kind(), "list");
            }
            other => panic!("expected map, got {:?}", other),
        }
    }
}
