//! Copying decoded values into typed destinations.
//!
//! [`FromNative`] is the assignment-compatibility rule for one value:
//!
//! - same category assigns directly
//! - integers convert to any integer type that holds the value exactly
//! - `f32` widens to `f64`; `f64` narrows to `f32` only when exact
//! - `Option<T>` turns [`NativeValue::Null`] into `None`
//! - anything else is an incompatible assignment

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::net::IpAddr;
use std::time::Duration;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use thiserror::Error;
use uuid::Uuid;

use crate::native::NativeValue;
use crate::rows::Row;

/// Errors produced while destructuring a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Number of destinations differs from the number of values.
    #[error("row has {expected} values, got {actual} destinations")]
    ArityMismatch { expected: usize, actual: usize },

    /// A numeric value does not fit its destination.
    #[error("value {value} at index {index} overflows {target}")]
    Overflow {
        index: usize,
        value: String,
        target: &'static str,
    },

    /// The value's category cannot be assigned to the destination.
    #[error("cannot assign {found} at index {index} to {target}")]
    IncompatibleType {
        index: usize,
        found: &'static str,
        target: &'static str,
    },

    /// No column with that name or position.
    #[error("no such column: {0}")]
    ColumnNotFound(String),
}

/// A failed single-value conversion, before it is tied to a row position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A numeric value does not fit the target.
    #[error("value {value} overflows {target}")]
    Overflow { value: String, target: &'static str },
    /// The value's category cannot be converted to the target.
    #[error("cannot convert {found} to {target}")]
    Incompatible {
        found: &'static str,
        target: &'static str,
    },
}

impl ConvertError {
    fn incompatible(value: &NativeValue, target: &'static str) -> Self {
        ConvertError::Incompatible {
            found: value.kind(),
            target,
        }
    }

    /// Attach the row position of the failing value.
    pub fn at(self, index: usize) -> ScanError {
        match self {
            ConvertError::Overflow { value, target } => ScanError::Overflow {
                index,
                value,
                target,
            },
            ConvertError::Incompatible { found, target } => ScanError::IncompatibleType {
                index,
                found,
                target,
            },
        }
    }
}

/// Conversion from a decoded value into a Rust type.
pub trait FromNative: Sized {
    /// Convert `value`, or explain why it cannot be.
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError>;
}

/// A destination slot for [`Row::scan`].
pub trait ScanTarget {
    /// Overwrite the slot with `value`.
    fn assign(&mut self, value: &NativeValue) -> Result<(), ConvertError>;
}

impl<T: FromNative> ScanTarget for T {
    fn assign(&mut self, value: &NativeValue) -> Result<(), ConvertError> {
        *self = T::from_native(value)?;
        Ok(())
    }
}

fn integer<T: TryFrom<i128>>(value: &NativeValue, target: &'static str) -> Result<T, ConvertError> {
    let wide = match value {
        NativeValue::I8(v) => i128::from(*v),
        NativeValue::I16(v) => i128::from(*v),
        NativeValue::I32(v) => i128::from(*v),
        NativeValue::I64(v) => i128::from(*v),
        NativeValue::U8(v) => i128::from(*v),
        NativeValue::U16(v) => i128::from(*v),
        NativeValue::U32(v) => i128::from(*v),
        NativeValue::U64(v) => i128::from(*v),
        NativeValue::Varint(v) => i128::try_from(v).map_err(|_| ConvertError::Overflow {
            value: v.to_string(),
            target,
        })?,
        other => return Err(ConvertError::incompatible(other, target)),
    };
    T::try_from(wide).map_err(|_| ConvertError::Overflow {
        value: wide.to_string(),
        target,
    })
}

macro_rules! impl_from_native_int {
    ($($t:ty),*) => {
        $(
            impl FromNative for $t {
                fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
                    integer(value, stringify!($t))
                }
            }
        )*
    };
}

impl_from_native_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromNative for f64 {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Float(v) => Ok(f64::from(*v)),
            NativeValue::Double(v) => Ok(*v),
            other => Err(ConvertError::incompatible(other, "f64")),
        }
    }
}

impl FromNative for f32 {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Float(v) => Ok(*v),
            NativeValue::Double(v) => {
                let narrowed = *v as f32;
                if f64::from(narrowed) == *v || v.is_nan() {
                    Ok(narrowed)
                } else {
                    Err(ConvertError::Overflow {
                        value: v.to_string(),
                        target: "f32",
                    })
                }
            }
            other => Err(ConvertError::incompatible(other, "f32")),
        }
    }
}

// Same-category conversions.
macro_rules! impl_from_native_clone {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromNative for $t {
                fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
                    match value {
                        NativeValue::$variant(v) => Ok(v.clone()),
                        other => Err(ConvertError::incompatible(other, stringify!($t))),
                    }
                }
            }
        )*
    };
}

impl_from_native_clone! {
    bool => Bool,
    String => Text,
    IpAddr => Inet,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    Duration => Time,
}

impl FromNative for BigInt {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Varint(v) => Ok(v.clone()),
            other => integer::<i128>(other, "BigInt").map(BigInt::from),
        }
    }
}

impl FromNative for BigDecimal {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Decimal(d) => Ok(d.clone()),
            other => BigInt::from_native(other)
                .map(|n| BigDecimal::new(n, 0))
                .map_err(|_| ConvertError::incompatible(other, "BigDecimal")),
        }
    }
}

impl FromNative for NativeValue {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        Ok(value.clone())
    }
}

impl<T: FromNative> FromNative for Option<T> {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Null => Ok(None),
            other => T::from_native(other).map(Some),
        }
    }
}

/// Lists, sets and tuples convert element-wise. Byte strings convert as a
/// sequence of `u8` values, so `Vec<u8>` reads a blob column.
impl<T: FromNative> FromNative for Vec<T> {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::List(items) | NativeValue::Set(items) | NativeValue::Tuple(items) => {
                items.iter().map(T::from_native).collect()
            }
            NativeValue::Bytes(bytes) => bytes
                .iter()
                .map(|b| T::from_native(&NativeValue::U8(*b)))
                .collect(),
            other => Err(ConvertError::incompatible(other, "Vec")),
        }
    }
}

impl<K: FromNative + Eq + Hash, V: FromNative> FromNative for HashMap<K, V> {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| Ok((K::from_native(k)?, V::from_native(v)?)))
                .collect(),
            other => Err(ConvertError::incompatible(other, "HashMap")),
        }
    }
}

impl<K: FromNative + Ord, V: FromNative> FromNative for BTreeMap<K, V> {
    fn from_native(value: &NativeValue) -> Result<Self, ConvertError> {
        match value {
            NativeValue::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| Ok((K::from_native(k)?, V::from_native(v)?)))
                .collect(),
            other => Err(ConvertError::incompatible(other, "BTreeMap")),
        }
    }
}

/// Conversion from a whole row.
pub trait FromRow: Sized {
    /// Convert `row`, or report the first value that cannot be.
    fn from_row(row: &Row) -> Result<Self, ScanError>;
}

macro_rules! impl_from_row {
    ($len:expr => $($t:ident $idx:tt),+) => {
        impl<$($t: FromNative),+> FromRow for ($($t,)+) {
            fn from_row(row: &Row) -> Result<Self, ScanError> {
                let values = row.values();
                if values.len() != $len {
                    return Err(ScanError::ArityMismatch {
                        expected: values.len(),
                        actual: $len,
                    });
                }
                Ok(($($t::from_native(&values[$idx]).map_err(|e| e.at($idx))?,)+))
            }
        }
    };
}

impl_from_row!(1 => A 0);
impl_from_row!(2 => A 0, B 1);
impl_from_row!(3 => A 0, B 1, C 2);
impl_from_row!(4 => A 0, B 1, C 2, D 3);
impl_from_row!(5 => A 0, B 1, C 2, D 3, E 4);
impl_from_row!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
impl_from_row!(7 => A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_from_row!(8 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_from_row!(9 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_from_row!(10 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_from_row!(11 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_from_row!(12 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
