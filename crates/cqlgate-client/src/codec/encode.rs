//! Native value to wire value encoding.

use std::net::IpAddr;

use bytes::Bytes;
use cqlgate_proto::WireValue;
use tracing::warn;

use super::error::{EncodeError, Failures};
use super::varint::{encode_decimal, encode_varint};
use crate::native::NativeValue;

/// Encode a single native value.
///
/// Empty lists, sets and maps encode as [`WireValue::Null`]: the protocol
/// does not distinguish an empty collection from an absent one.
pub fn encode(value: &NativeValue) -> Result<WireValue, EncodeError> {
    let wire = match value {
        NativeValue::Null => WireValue::Null,
        NativeValue::I8(v) => WireValue::Int(i64::from(*v)),
        NativeValue::I16(v) => WireValue::Int(i64::from(*v)),
        NativeValue::I32(v) => WireValue::Int(i64::from(*v)),
        NativeValue::I64(v) => WireValue::Int(*v),
        NativeValue::U8(v) => WireValue::Int(i64::from(*v)),
        NativeValue::U16(v) => WireValue::Int(i64::from(*v)),
        NativeValue::U32(v) => WireValue::Int(i64::from(*v)),
        NativeValue::U64(v) => WireValue::Int(i64::try_from(*v).map_err(|_| {
            EncodeError::IntegerOverflow {
                value: v.to_string(),
            }
        })?),
        NativeValue::Float(v) => WireValue::Float(*v),
        NativeValue::Double(v) => WireValue::Double(*v),
        NativeValue::Bool(v) => WireValue::Boolean(*v),
        NativeValue::Text(s) => WireValue::String(s.clone()),
        NativeValue::Bytes(b) => WireValue::Bytes(Bytes::copy_from_slice(b)),
        NativeValue::Inet(ip) => WireValue::Inet(match ip {
            IpAddr::V4(addr) => Bytes::copy_from_slice(&addr.octets()),
            IpAddr::V6(addr) => Bytes::copy_from_slice(&addr.octets()),
        }),
        NativeValue::Uuid(id) => WireValue::Uuid(Bytes::copy_from_slice(id.as_bytes())),
        NativeValue::Timestamp(t) => WireValue::Int(t.timestamp_millis()),
        NativeValue::Time(d) => WireValue::Time(u64::try_from(d.as_nanos()).map_err(|_| {
            EncodeError::IntegerOverflow {
                value: format!("{:?}", d),
            }
        })?),
        NativeValue::Decimal(d) => {
            let (scale, unscaled) = encode_decimal(d)?;
            WireValue::Decimal {
                scale,
                value: Bytes::from(unscaled),
            }
        }
        NativeValue::Varint(v) => WireValue::Varint(Bytes::from(encode_varint(v))),
        NativeValue::List(items) | NativeValue::Set(items) => {
            if items.is_empty() {
                WireValue::Null
            } else {
                WireValue::Collection(encode_all(items)?)
            }
        }
        NativeValue::Map(pairs) => {
            if pairs.is_empty() {
                WireValue::Null
            } else {
                let mut elements = Vec::with_capacity(pairs.len() * 2);
                for (k, v) in pairs {
                    elements.push(encode(k)?);
                    elements.push(encode(v)?);
                }
                WireValue::Collection(elements)
            }
        }
        NativeValue::Tuple(slots) => WireValue::Collection(encode_all(slots)?),
        NativeValue::Udt(_) => return Err(EncodeError::UnsupportedType { kind: value.kind() }),
    };
    Ok(wire)
}

fn encode_all(items: &[NativeValue]) -> Result<Vec<WireValue>, EncodeError> {
    items.iter().map(encode).collect()
}

/// Encode a list of bound values.
///
/// Every value is attempted; when any fail, the error lists each failing
/// index with its cause.
pub fn encode_values(values: &[NativeValue]) -> Result<Vec<WireValue>, EncodeError> {
    let mut encoded = Vec::with_capacity(values.len());
    let mut failures = Failures::new();

    for (i, value) in values.iter().enumerate() {
        match encode(value) {
            Ok(wire) => encoded.push(wire),
            Err(e) => failures.push(i, e),
        }
    }

    if !failures.is_empty() {
        warn!(failed = failures.len(), total = values.len(), "failed to encode values");
        return Err(EncodeError::Values(failures));
    }
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use std::time::Duration;

    use bigdecimal::BigDecimal;
    use chrono::{TimeZone, Utc};
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn int(v: i64) -> WireValue {
        WireValue::Int(v)
    }

    #[test]
    fn test_encode_values() {
        let id = Uuid::parse_str("12345678-1234-5678-1234-567812345678").unwrap();
        let dec = BigDecimal::from_str("1.23456789").unwrap();

        let input = vec![
            NativeValue::Null,
            NativeValue::from(-64i64),
            NativeValue::from(-32i32),
            NativeValue::from(-16i16),
            NativeValue::from(-8i8),
            NativeValue::from(64u64),
            NativeValue::from(32u32),
            NativeValue::from(16u16),
            NativeValue::from(8u8),
            NativeValue::from(BigInt::from(16)),
            NativeValue::from(dec),
            NativeValue::from(1.5f32),
            NativeValue::from(1.23456789f64),
            NativeValue::from(true),
            NativeValue::from("foo"),
            NativeValue::from(b"bar".to_vec()),
            NativeValue::from(Ipv4Addr::new(1, 2, 3, 4)),
            NativeValue::from(id),
            NativeValue::list([1i64, 2, 3]),
            NativeValue::list([NativeValue::list([1i64, 2]), NativeValue::list([3i64, 4])]),
            NativeValue::map([("one", 1i64)]),
            NativeValue::map([("one", NativeValue::list([1i64, 2]))]),
        ];

        let got = encode_values(&input).unwrap();

        let want = vec![
            WireValue::Null,
            int(-64),
            int(-32),
            int(-16),
            int(-8),
            int(64),
            int(32),
            int(16),
            int(8),
            WireValue::Varint(Bytes::from_static(&[0x10])),
            WireValue::Decimal {
                scale: 8,
                value: Bytes::from_static(&[0x07, 0x5b, 0xcd, 0x15]),
            },
            WireValue::Float(1.5),
            WireValue::Double(1.23456789),
            WireValue::Boolean(true),
            WireValue::String("foo".into()),
            WireValue::Bytes(Bytes::from_static(b"bar")),
            WireValue::Inet(Bytes::from_static(&[1, 2, 3, 4])),
            WireValue::Uuid(Bytes::copy_from_slice(id.as_bytes())),
            WireValue::Collection(vec![int(1), int(2), int(3)]),
            WireValue::Collection(vec![
                WireValue::Collection(vec![int(1), int(2)]),
                WireValue::Collection(vec![int(3), int(4)]),
            ]),
            WireValue::Collection(vec![WireValue::String("one".into()), int(1)]),
            WireValue::Collection(vec![
                WireValue::String("one".into()),
                WireValue::Collection(vec![int(1), int(2)]),
            ]),
        ];

        assert_eq!(got, want);
    }

    #[test]
    fn test_encode_negative_varint() {
        let got = encode(&NativeValue::from(BigInt::from(-1))).unwrap();
        assert_eq!(got, WireValue::Varint(Bytes::from_static(&[0xFF])));
    }

    #[test]
    fn test_encode_timestamp_as_millis() {
        let t = Utc.with_ymd_and_hms(2019, 4, 24, 12, 23, 34).unwrap();
        assert_eq!(
            encode(&NativeValue::from(t)).unwrap(),
            int(1_556_108_614_000)
        );
    }

    #[test]
    fn test_encode_time_of_day() {
        let d = Duration::from_secs(12 * 3600) + Duration::from_nanos(5);
        assert_eq!(
            encode(&NativeValue::from(d)).unwrap(),
            WireValue::Time(43_200_000_000_005)
        );
    }

    #[test]
    fn test_encode_ipv6() {
        let ip: std::net::Ipv6Addr = "::1".parse().unwrap();
        let got = encode(&NativeValue::from(ip)).unwrap();
        let mut octets = [0u8; 16];
        octets[15] = 1;
        assert_eq!(got, WireValue::Inet(Bytes::copy_from_slice(&octets)));
    }

    #[test]
    fn test_empty_collections_encode_as_null() {
        assert_eq!(encode(&NativeValue::List(vec![])).unwrap(), WireValue::Null);
        assert_eq!(encode(&NativeValue::Set(vec![])).unwrap(), WireValue::Null);
        assert_eq!(
            encode(&NativeValue::from(BTreeMap::<String, i64>::new())).unwrap(),
            WireValue::Null
        );
    }

    #[test]
    fn test_encode_tuple() {
        let tuple = NativeValue::tuple(vec![3i64.into(), "bar".into(), 2.1f32.into()]);
        assert_eq!(
            encode(&tuple).unwrap(),
            WireValue::Collection(vec![
                int(3),
                WireValue::String("bar".into()),
                WireValue::Float(2.1),
            ])
        );
    }

    #[test]
    fn test_unsupported_type() {
        let udt = NativeValue::Udt(vec![("street".into(), "Main".into())]);
        assert_eq!(
            encode(&udt),
            Err(EncodeError::UnsupportedType { kind: "udt" })
        );
    }

    #[test]
    fn test_u64_overflow() {
        assert!(matches!(
            encode(&NativeValue::U64(u64::MAX)),
            Err(EncodeError::IntegerOverflow { .. })
        ));
        assert_eq!(
            encode(&NativeValue::U64(i64::MAX as u64)).unwrap(),
            int(i64::MAX)
        );
    }

    #[test]
    fn test_encode_values_collects_every_failure() {
        let input = vec![
            NativeValue::from(1i64),
            NativeValue::Udt(vec![]),
            NativeValue::from("ok"),
            NativeValue::U64(u64::MAX),
        ];

        match encode_values(&input) {
            Err(EncodeError::Values(failures)) => {
                assert_eq!(failures.indices(), vec![1, 3]);
            }
            other => panic!("expected aggregated failure, got {:?}", other),
        }
    }
}
