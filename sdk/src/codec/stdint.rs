//! Fixed-width unsigned integers in their three wire shapes.
//!
//! | width | catbuffer        | DTO                                  |
//! |-------|------------------|--------------------------------------|
//! | <= 32 | LE, `w/8` bytes  | plain JSON number                    |
//! | 64    | LE, 8 bytes      | `[low32, high32]`                    |
//! | 128   | LE, 16 bytes     | `[[low32, high32], [low32, high32]]` |
//!
//! Native values are the Rust primitives, so encode can never overflow.
//! The checks live on the way in: [`FixedWidth::from_wide`],
//! [`FixedWidth::from_catbuffer`] and [`FixedWidth::from_dto`] reject
//! anything that does not fit instead of truncating.

use serde_json::{json, Value};
use std::fmt;

use crate::error::{Error, Result};

/// An unsigned integer with a fixed wire width.
pub trait FixedWidth: Copy + Eq + fmt::Debug + Sized {
    /// Width in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// Result type of [`FixedWidth::high`] and [`FixedWidth::low`].
    type Half: Copy;

    /// Narrow an arbitrary `u128`, failing with [`Error::Overflow`] when it
    /// exceeds `2^BITS - 1`.
    fn from_wide(value: u128) -> Result<Self>;

    /// Lossless widening to `u128`.
    fn to_wide(self) -> u128;

    /// Upper `BITS / 2` bits.
    fn high(self) -> Self::Half;

    /// Lower `BITS / 2` bits.
    fn low(self) -> Self::Half;

    /// Little-endian bytes, exactly `BYTES` long.
    fn to_catbuffer(self) -> Vec<u8> {
        self.to_wide().to_le_bytes()[..Self::BYTES].to_vec()
    }

    /// Read little-endian bytes. Shorter input is zero-extended; longer
    /// input is an overflow.
    fn from_catbuffer(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(Error::Overflow(format!(
                "{} bytes do not fit in u{}",
                bytes.len(),
                Self::BITS
            )));
        }
        let mut buf = [0u8; 16];
        buf[..bytes.len()].copy_from_slice(bytes);
        Self::from_wide(u128::from_le_bytes(buf))
    }

    fn to_dto(self) -> Value {
        wide_to_dto(self.to_wide(), Self::BITS)
    }

    fn from_dto(dto: &Value) -> Result<Self> {
        Self::from_wide(wide_from_dto(dto, Self::BITS)?)
    }
}

macro_rules! fixed_width {
    ($ty:ty, $half:ty) => {
        impl FixedWidth for $ty {
            const BITS: u32 = <$ty>::BITS;
            const BYTES: usize = std::mem::size_of::<$ty>();
            type Half = $half;

            fn from_wide(value: u128) -> Result<Self> {
                <$ty>::try_from(value).map_err(|_| {
                    Error::Overflow(format!("{value} does not fit in u{}", <$ty>::BITS))
                })
            }

            fn to_wide(self) -> u128 {
                u128::from(self)
            }

            fn high(self) -> $half {
                (self >> (<$ty>::BITS / 2)) as $half
            }

            fn low(self) -> $half {
                (self & (<$ty>::MAX >> (<$ty>::BITS / 2))) as $half
            }
        }
    };
}

// u8 splits into nibbles, still carried in a u8.
fixed_width!(u8, u8);
fixed_width!(u16, u8);
fixed_width!(u32, u16);
fixed_width!(u64, u32);
fixed_width!(u128, u64);

fn wide_to_dto(value: u128, bits: u32) -> Value {
    match bits {
        0..=32 => json!(value as u64),
        64 => json!([value as u32, (value >> 32) as u32]),
        _ => json!([
            wide_to_dto(value & u128::from(u64::MAX), 64),
            wide_to_dto(value >> 64, 64)
        ]),
    }
}

fn wide_from_dto(dto: &Value, bits: u32) -> Result<u128> {
    match bits {
        0..=32 => dto
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| Error::Overflow(format!("expected an unsigned integer, got {dto}"))),
        64 => {
            let (low, high) = pair(dto)?;
            let low = u32::from_wide(wide_from_dto(low, 32)?)?;
            let high = u32::from_wide(wide_from_dto(high, 32)?)?;
            Ok(u128::from(low) | (u128::from(high) << 32))
        }
        _ => {
            let (low, high) = pair(dto)?;
            Ok(wide_from_dto(low, 64)? | (wide_from_dto(high, 64)? << 64))
        }
    }
}

fn pair(dto: &Value) -> Result<(&Value, &Value)> {
    match dto.as_array().map(Vec::as_slice) {
        Some([low, high]) => Ok((low, high)),
        _ => Err(Error::Overflow(format!("expected a [low, high] pair, got {dto}"))),
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

/// Concatenate the catbuffer form of each value, in order.
pub fn iter_to_catbuffer<T: FixedWidth>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::BYTES);
    for value in values {
        out.extend_from_slice(&value.to_catbuffer());
    }
    out
}

/// Split a buffer into consecutive `T::BYTES` chunks.
pub fn iter_from_catbuffer<T: FixedWidth>(bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.len() % T::BYTES != 0 {
        return Err(Error::MalformedPayload(format!(
            "{} bytes is not a whole number of u{} values",
            bytes.len(),
            T::BITS
        )));
    }
    bytes.chunks_exact(T::BYTES).map(T::from_catbuffer).collect()
}

pub fn iter_to_dto<T: FixedWidth>(values: &[T]) -> Value {
    Value::Array(values.iter().map(|v| v.to_dto()).collect())
}

pub fn iter_from_dto<T: FixedWidth>(dto: &Value) -> Result<Vec<T>> {
    dto.as_array()
        .ok_or_else(|| Error::Overflow(format!("expected an array, got {dto}")))?
        .iter()
        .map(T::from_dto)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_dto_is_low_high_pair() {
        let value: u64 = 0x0000_0001_0000_0002;
        assert_eq!(value.to_dto(), json!([2, 1]));
        assert_eq!(u64::from_dto(&json!([2, 1])).unwrap(), value);
        assert_eq!(u64::MAX.to_dto(), json!([u32::MAX, u32::MAX]));
    }

    #[test]
    fn u64_round_trips_edge_values() {
        for value in [0u64, 1, u32::MAX as u64, u32::MAX as u64 + 1, u64::MAX] {
            assert_eq!(u64::from_dto(&value.to_dto()).unwrap(), value);
            assert_eq!(u64::from_catbuffer(&value.to_catbuffer()).unwrap(), value);
        }
    }

    #[test]
    fn u128_dto_nests_pairs() {
        let value: u128 = (5u128 << 96) | (4u128 << 64) | (3u128 << 32) | 2;
        assert_eq!(value.to_dto(), json!([[2, 3], [4, 5]]));
        assert_eq!(u128::from_dto(&json!([[2, 3], [4, 5]])).unwrap(), value);
    }

    #[test]
    fn from_wide_rejects_overflow() {
        let too_big = u128::from(u64::MAX) + 1;
        assert!(matches!(u64::from_wide(too_big), Err(Error::Overflow(_))));
        assert!(matches!(u8::from_wide(256), Err(Error::Overflow(_))));
        assert_eq!(u8::from_wide(255).unwrap(), 255);
    }

    #[test]
    fn small_dto_is_range_checked() {
        assert_eq!(u8::from_dto(&json!(200)).unwrap(), 200);
        assert!(matches!(u8::from_dto(&json!(300)), Err(Error::Overflow(_))));
        assert!(matches!(u16::from_dto(&json!(-1)), Err(Error::Overflow(_))));
    }

    #[test]
    fn malformed_u64_dto_is_overflow() {
        assert!(u64::from_dto(&json!([1])).is_err());
        assert!(u64::from_dto(&json!([1, 2, 3])).is_err());
        assert!(u64::from_dto(&json!(5)).is_err());
        // Each limb must fit in 32 bits.
        assert!(matches!(
            u64::from_dto(&json!([4294967296u64, 0])),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn catbuffer_width_checks() {
        assert_eq!(u32::from_catbuffer(&[1, 0]).unwrap(), 1);
        assert!(matches!(
            u16::from_catbuffer(&[1, 2, 3]),
            Err(Error::Overflow(_))
        ));
        assert_eq!(0x1234u16.to_catbuffer(), vec![0x34, 0x12]);
    }

    #[test]
    fn high_low_split() {
        assert_eq!(0xABu8.high(), 0xA);
        assert_eq!(0xABu8.low(), 0xB);
        assert_eq!(0x1234_5678u32.high(), 0x1234);
        assert_eq!(0x1234_5678u32.low(), 0x5678);
        assert_eq!(u64::MAX.high(), u32::MAX);
        assert_eq!((7u128 << 64 | 9).high(), 7);
        assert_eq!((7u128 << 64 | 9).low(), 9);
    }

    #[test]
    fn sequences_keep_order() {
        let ids = [3u64, 1, 2];
        let bytes = iter_to_catbuffer(&ids);
        assert_eq!(bytes.len(), 24);
        assert_eq!(iter_from_catbuffer::<u64>(&bytes).unwrap(), ids);
        assert_eq!(iter_from_dto::<u64>(&iter_to_dto(&ids)).unwrap(), ids);
        assert!(matches!(
            iter_from_catbuffer::<u64>(&bytes[..20]),
            Err(Error::MalformedPayload(_))
        ));
    }
}
