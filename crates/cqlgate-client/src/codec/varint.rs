//! Arbitrary-precision integer and decimal encodings.
//!
//! Both use minimal big-endian two's complement: no byte is emitted beyond
//! what is needed to carry the sign bit.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};

use super::error::EncodeError;

/// Encode an integer as minimal big-endian two's complement.
///
/// - zero is a single `0x00`
/// - positive values are their magnitude bytes, with a `0x00` prefix when the
///   top bit of the first byte is set
/// - negative values are `value + 2^(8 * width)` where `width` holds the
///   magnitude plus a sign bit, with a leading `0xFF` dropped when the next
///   byte already carries the sign
pub fn encode_varint(value: &BigInt) -> Vec<u8> {
    match value.sign() {
        Sign::NoSign => vec![0x00],
        Sign::Plus => {
            let mut bytes = value.magnitude().to_bytes_be();
            if bytes[0] & 0x80 != 0 {
                bytes.insert(0, 0x00);
            }
            bytes
        }
        Sign::Minus => {
            let width = (value.bits() + 1).div_ceil(8);
            let modulus = BigInt::from(1u8) << (width * 8);
            let (_, mut bytes) = (value + modulus).to_bytes_be();
            if bytes.len() > 1 && bytes[0] == 0xFF && bytes[1] & 0x80 != 0 {
                bytes.remove(0);
            }
            bytes
        }
    }
}

/// Decode big-endian two's complement bytes. An empty slice is zero.
pub fn decode_varint(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::from(0u8);
    }
    let unsigned = BigInt::from_bytes_be(Sign::Plus, bytes);
    if bytes[0] & 0x80 == 0 {
        unsigned
    } else {
        unsigned - (BigInt::from(1u8) << (bytes.len() * 8))
    }
}

/// Encode a decimal as `(scale, unscaled)`.
///
/// The scale is the negated exponent of the decimal's (coefficient, exponent)
/// form and travels as the bit pattern of a signed 32-bit integer.
pub fn encode_decimal(value: &BigDecimal) -> Result<(u32, Vec<u8>), EncodeError> {
    let (coefficient, scale) = value.as_bigint_and_exponent();
    let scale32 = i32::try_from(scale).map_err(|_| EncodeError::ScaleOutOfRange { scale })?;
    Ok((scale32 as u32, encode_varint(&coefficient)))
}

/// Decode a decimal from its scale and unscaled bytes.
pub fn decode_decimal(scale: u32, unscaled: &[u8]) -> BigDecimal {
    BigDecimal::new(decode_varint(unscaled), i64::from(scale as i32))
}
