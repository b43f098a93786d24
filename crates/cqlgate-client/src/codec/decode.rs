//! Wire value to native value decoding, driven by column type descriptors.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use chrono::DateTime;
use cqlgate_proto::{BasicType, ColumnSpec, TypeDescriptor, WireValue};
use tracing::warn;
use uuid::Uuid;

use super::error::{DecodeError, Failures};
use super::varint::{decode_decimal, decode_varint};
use crate::native::NativeValue;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Decode a single wire value against its column's type descriptor.
///
/// Empty collections decode to [`NativeValue::Null`], mirroring the encoder.
/// A scalar whose wire tag cannot carry the declared type is a schema
/// mismatch, so decoded lists, sets and maps never mix element types.
pub fn decode(value: &WireValue, descriptor: &TypeDescriptor) -> Result<NativeValue, DecodeError> {
    match descriptor {
        TypeDescriptor::Basic(basic) => decode_scalar(value, *basic),
        TypeDescriptor::Map { key, value: val } => {
            let Some(elements) = collection(value, descriptor)? else {
                return Ok(NativeValue::Null);
            };
            if elements.len() % 2 != 0 {
                return Err(DecodeError::mismatch(
                    "map with an even number of elements",
                    format!("{} elements", elements.len()),
                ));
            }
            let pairs = elements
                .chunks_exact(2)
                .map(|pair| Ok((decode(&pair[0], key)?, decode(&pair[1], val)?)))
                .collect::<Result<Vec<_>, DecodeError>>()?;
            Ok(NativeValue::Map(pairs))
        }
        TypeDescriptor::List(element) => match collection(value, descriptor)? {
            Some(elements) => Ok(NativeValue::List(decode_elements(elements, element)?)),
            None => Ok(NativeValue::Null),
        },
        TypeDescriptor::Set(element) => match collection(value, descriptor)? {
            Some(elements) => Ok(NativeValue::Set(decode_elements(elements, element)?)),
            None => Ok(NativeValue::Null),
        },
        TypeDescriptor::Tuple(slots) => match value {
            WireValue::Null => Ok(NativeValue::Null),
            WireValue::Collection(elements) => {
                if elements.len() != slots.len() {
                    return Err(DecodeError::mismatch(
                        format!("tuple of {} elements", slots.len()),
                        format!("{} elements", elements.len()),
                    ));
                }
                let decoded = elements
                    .iter()
                    .zip(slots)
                    .map(|(element, slot)| decode(element, slot))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NativeValue::Tuple(decoded))
            }
            WireValue::Udt(_) => Err(DecodeError::UnsupportedWireKind { kind: "udt" }),
            other => Err(DecodeError::mismatch("tuple", other.kind())),
        },
        TypeDescriptor::Udt { .. } => Err(DecodeError::UnsupportedWireKind { kind: "udt" }),
    }
}

/// Elements of a collection value, or `None` for null and empty collections.
fn collection<'a>(
    value: &'a WireValue,
    descriptor: &TypeDescriptor,
) -> Result<Option<&'a [WireValue]>, DecodeError> {
    match value {
        WireValue::Null => Ok(None),
        WireValue::Collection(elements) if elements.is_empty() => Ok(None),
        WireValue::Collection(elements) => Ok(Some(elements)),
        WireValue::Udt(_) => Err(DecodeError::UnsupportedWireKind { kind: "udt" }),
        other => Err(DecodeError::mismatch(descriptor.kind(), other.kind())),
    }
}

fn decode_elements(
    elements: &[WireValue],
    descriptor: &TypeDescriptor,
) -> Result<Vec<NativeValue>, DecodeError> {
    elements.iter().map(|e| decode(e, descriptor)).collect()
}

fn decode_scalar(value: &WireValue, basic: BasicType) -> Result<NativeValue, DecodeError> {
    match value {
        WireValue::Collection(_) | WireValue::Udt(_) => decode_basic(value),
        _ if basic.accepts(value) => decode_basic(value),
        other => Err(DecodeError::mismatch(basic.name(), other.kind())),
    }
}

/// Decode a scalar by its wire tag alone.
fn decode_basic(value: &WireValue) -> Result<NativeValue, DecodeError> {
    let native = match value {
        WireValue::Null => NativeValue::Null,
        WireValue::Int(v) => NativeValue::I64(*v),
        WireValue::Float(v) => NativeValue::Float(*v),
        WireValue::Double(v) => NativeValue::Double(*v),
        WireValue::Boolean(v) => NativeValue::Bool(*v),
        WireValue::String(s) => NativeValue::Text(s.clone()),
        WireValue::Bytes(b) => NativeValue::Bytes(b.to_vec()),
        WireValue::Inet(b) => NativeValue::Inet(decode_inet(b)?),
        WireValue::Uuid(b) => {
            if b.is_empty() {
                NativeValue::Null
            } else {
                let id = Uuid::from_slice(b)
                    .map_err(|_| DecodeError::MalformedUuid { len: b.len() })?;
                NativeValue::Uuid(id)
            }
        }
        WireValue::Date(days) => {
            let secs = i64::from(*days) * SECONDS_PER_DAY;
            let midnight = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| DecodeError::OutOfRange(format!("date {} days after epoch", days)))?;
            NativeValue::Timestamp(midnight)
        }
        WireValue::Time(nanos) => NativeValue::Time(Duration::from_nanos(*nanos)),
        WireValue::Decimal { scale, value } => NativeValue::Decimal(decode_decimal(*scale, value)),
        WireValue::Varint(b) => NativeValue::Varint(decode_varint(b)),
        WireValue::Collection(_) => return Err(DecodeError::mismatch("scalar", "collection")),
        WireValue::Udt(_) => return Err(DecodeError::UnsupportedWireKind { kind: "udt" }),
    };
    Ok(native)
}

fn decode_inet(bytes: &[u8]) -> Result<IpAddr, DecodeError> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(DecodeError::MalformedInet { len: bytes.len() })
}

/// Decode one row against its column specs.
///
/// Every column is attempted; when any fail, the error lists each failing
/// column index and name with its cause.
pub fn decode_row(
    values: &[WireValue],
    columns: &[ColumnSpec],
) -> Result<Vec<NativeValue>, DecodeError> {
    if values.len() != columns.len() {
        return Err(DecodeError::ColumnCountMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut decoded = Vec::with_capacity(values.len());
    let mut failures = Failures::new();

    for (i, (value, column)) in values.iter().zip(columns).enumerate() {
        match decode(value, &column.type_spec) {
            Ok(native) => decoded.push(native),
            Err(e) => failures.push_named(i, column.name.as_str(), e),
        }
    }

    if !failures.is_empty() {
        warn!(failed = failures.len(), total = values.len(), "failed to decode row");
        return Err(DecodeError::Columns(failures));
    }
    Ok(decoded)
}

/// Decode a row that came without column metadata.
///
/// Scalars decode by wire tag alone; collections cannot be decoded.
pub fn decode_untyped(values: &[WireValue]) -> Result<Vec<NativeValue>, DecodeError> {
    let mut decoded = Vec::with_capacity(values.len());
    let mut failures = Failures::new();

    for (i, value) in values.iter().enumerate() {
        match decode_basic(value) {
            Ok(native) => decoded.push(native),
            Err(e) => failures.push(i, e),
        }
    }

    if !failures.is_empty() {
        warn!(failed = failures.len(), total = values.len(), "failed to decode untyped row");
        return Err(DecodeError::Columns(failures));
    }
    Ok(decoded)
}
