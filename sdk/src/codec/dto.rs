//! Accessors for the JSON side of the codec.
//!
//! A DTO is a plain `serde_json` object with camelCase keys. Missing keys
//! and values of the wrong JSON type are reported as
//! [`Error::MalformedPayload`] naming the key; integer range problems come
//! back from [`FixedWidth::from_dto`] as [`Error::Overflow`].

use serde_json::{Map, Value};

use super::stdint::FixedWidth;
use crate::crypto::keys::{strip_hex_prefix, PublicKey, Signature};
use crate::error::{Error, Result};

/// A JSON object.
pub type Dto = Map<String, Value>;

/// View a value as an object.
pub fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Dto> {
    value
        .as_object()
        .ok_or_else(|| Error::MalformedPayload(format!("{what} must be a JSON object")))
}

pub fn field<'a>(obj: &'a Dto, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| Error::MalformedPayload(format!("missing key `{key}`")))
}

pub fn object<'a>(obj: &'a Dto, key: &str) -> Result<&'a Dto> {
    as_object(field(obj, key)?, key)
}

pub fn array<'a>(obj: &'a Dto, key: &str) -> Result<&'a [Value]> {
    field(obj, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::MalformedPayload(format!("`{key}` must be an array")))
}

pub fn string<'a>(obj: &'a Dto, key: &str) -> Result<&'a str> {
    field(obj, key)?
        .as_str()
        .ok_or_else(|| Error::MalformedPayload(format!("`{key}` must be a string")))
}

/// Any fixed-width unsigned integer, in its DTO shape.
pub fn uint<T: FixedWidth>(obj: &Dto, key: &str) -> Result<T> {
    T::from_dto(field(obj, key)?)
}

/// A small signed integer (multisig deltas).
pub fn int8(obj: &Dto, key: &str) -> Result<i8> {
    let value = field(obj, key)?;
    value
        .as_i64()
        .and_then(|v| i8::try_from(v).ok())
        .ok_or_else(|| Error::Overflow(format!("`{key}` = {value} does not fit in i8")))
}

pub fn hex_bytes(obj: &Dto, key: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(strip_hex_prefix(string(obj, key)?))?)
}

/// Exactly `N` bytes of hex.
pub fn hex_array<const N: usize>(obj: &Dto, key: &str) -> Result<[u8; N]> {
    let bytes = hex_bytes(obj, key)?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::Validation(format!("`{key}` must be {N} bytes, got {}", bytes.len()))
    })
}

pub fn public_key(obj: &Dto, key: &str) -> Result<PublicKey> {
    Ok(PublicKey::from_hex(string(obj, key)?)?)
}

pub fn signature(obj: &Dto, key: &str) -> Result<Signature> {
    Ok(Signature::from_hex(string(obj, key)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dto {
        json!({
            "deadline": [1, 0],
            "delta": -3,
            "name": "nem",
            "hash": "0xABCD",
            "list": [1, 2]
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn typed_accessors() {
        let obj = sample();
        assert_eq!(uint::<u64>(&obj, "deadline").unwrap(), 1);
        assert_eq!(int8(&obj, "delta").unwrap(), -3);
        assert_eq!(string(&obj, "name").unwrap(), "nem");
        assert_eq!(hex_bytes(&obj, "hash").unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(hex_array::<2>(&obj, "hash").unwrap(), [0xAB, 0xCD]);
        assert_eq!(array(&obj, "list").unwrap().len(), 2);
    }

    #[test]
    fn missing_key_is_named() {
        let err = field(&sample(), "maxFee").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(ref m) if m.contains("maxFee")));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let obj = sample();
        assert!(string(&obj, "list").is_err());
        assert!(array(&obj, "name").is_err());
        assert!(hex_array::<3>(&obj, "hash").is_err());
    }
}
