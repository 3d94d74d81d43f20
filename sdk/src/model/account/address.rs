//! # Addresses
//!
//! A Catapult address is 25 bytes:
//!
//! ```text
//! [network:1][RIPEMD160(SHA3-256(public_key)):20][checksum:4]
//! ```
//!
//! where the checksum is the first four bytes of SHA3-256 over the first
//! 21. The text form is unpadded uppercase base32 (40 characters), shown
//! to humans in dash-separated groups of six.

use data_encoding::BASE32_NOPAD;
use serde_json::{json, Value};
use std::fmt;

use crate::codec::dto;
use crate::codec::Reader;
use crate::config::{
    ADDRESS_CHECKSUM_LENGTH, ADDRESS_DECODED_LENGTH, ADDRESS_PRETTY_CHUNK, ADDRESS_RIPEMD_LENGTH,
};
use crate::crypto::hash::{ripemd160, sha3_256};
use crate::crypto::keys::PublicKey;
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;

const CHECKSUM_OFFSET: usize = 1 + ADDRESS_RIPEMD_LENGTH;

/// An account address on a specific network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    encoded: [u8; ADDRESS_DECODED_LENGTH],
    network_type: NetworkType,
}

impl Address {
    /// Parse human-readable text. Case, dashes and whitespace are ignored.
    pub fn create_from_raw_address(text: &str) -> Result<Self> {
        let plain: String = text
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let network_type = NetworkType::create_from_raw_address(&plain)?;
        let bytes = BASE32_NOPAD
            .decode(plain.as_bytes())
            .map_err(|e| Error::Validation(format!("{text} is not valid base32: {e}")))?;
        let address = Self::create_from_encoded(&bytes)?;
        if address.network_type != network_type {
            return Err(Error::Validation(format!(
                "{text}: identifier disagrees with network byte"
            )));
        }
        Ok(address)
    }

    /// Wrap 25 decoded bytes. The leading byte must be a known network.
    pub fn create_from_encoded(bytes: &[u8]) -> Result<Self> {
        let encoded: [u8; ADDRESS_DECODED_LENGTH] = bytes.try_into().map_err(|_| {
            Error::Validation(format!(
                "encoded address must be {ADDRESS_DECODED_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        let network_type = NetworkType::from_value(encoded[0])?;
        Ok(Self {
            encoded,
            network_type,
        })
    }

    pub fn create_from_public_key(public_key: &PublicKey, network_type: NetworkType) -> Self {
        let mut encoded = [0u8; ADDRESS_DECODED_LENGTH];
        encoded[0] = network_type.value();
        encoded[1..CHECKSUM_OFFSET].copy_from_slice(&ripemd160(&sha3_256(public_key.as_bytes())));
        let checksum = checksum(&encoded);
        encoded[CHECKSUM_OFFSET..].copy_from_slice(&checksum);
        Self {
            encoded,
            network_type,
        }
    }

    /// Same as [`Address::create_from_public_key`] but from hex text, which
    /// must decode to exactly 32 bytes.
    pub fn create_from_public_key_hex(public_key: &str, network_type: NetworkType) -> Result<Self> {
        let key = PublicKey::from_hex(public_key)
            .map_err(|_| Error::Validation(format!("{public_key} is not a valid public key")))?;
        Ok(Self::create_from_public_key(&key, network_type))
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// The 25 raw bytes.
    pub fn encoded(&self) -> &[u8; ADDRESS_DECODED_LENGTH] {
        &self.encoded
    }

    /// 40-character base32 text.
    pub fn plain(&self) -> String {
        BASE32_NOPAD.encode(&self.encoded)
    }

    /// `plain()` in dash-separated groups of six.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(ADDRESS_PRETTY_CHUNK)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Recompute the checksum and compare.
    pub fn is_valid(&self) -> bool {
        checksum(&self.encoded) == self.encoded[CHECKSUM_OFFSET..]
    }

    // -- catbuffer --------------------------------------------------------

    pub const CATBUFFER_SIZE: usize = ADDRESS_DECODED_LENGTH;

    pub fn to_catbuffer(&self) -> Vec<u8> {
        self.encoded.to_vec()
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        Self::create_from_encoded(reader.take(ADDRESS_DECODED_LENGTH)?)
    }

    /// Decode the leading 25 bytes and return the rest.
    pub fn from_catbuffer(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let address = Self::read(&mut reader)?;
        Ok((address, reader.remaining()))
    }

    // -- DTO --------------------------------------------------------------

    /// Account-endpoint form: `{address, networkType}`.
    pub fn to_dto(&self) -> Value {
        json!({
            "address": self.plain(),
            "networkType": self.network_type.to_dto(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "address")?;
        Self::create_from_raw_address(dto::string(obj, "address")?)
    }

    /// Transaction bodies carry addresses as hex of the encoded bytes.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.encoded)
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        Self::create_from_encoded(&hex::decode(text)?)
    }
}

fn checksum(encoded: &[u8; ADDRESS_DECODED_LENGTH]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let digest = sha3_256(&encoded[..CHECKSUM_OFFSET]);
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..ADDRESS_CHECKSUM_LENGTH]);
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.pretty())
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::create_from_raw_address(s)
    }
}
