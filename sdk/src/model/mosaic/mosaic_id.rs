//! Mosaic identifiers and the nonces they are derived from.

use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::Value;
use std::fmt;

use crate::codec::FixedWidth;
use crate::config::MOSAIC_ID_MASK;
use crate::crypto::hash::sha3_256_multi;
use crate::crypto::keys::{strip_hex_prefix, PublicKey};
use crate::error::{Error, Result};

/// Four bytes of owner-chosen entropy, so one account can own many mosaics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MosaicNonce([u8; 4]);

impl MosaicNonce {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn create_random() -> Self {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Little-endian, matching the wire form.
    pub fn create_from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn create_from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(text))?;
        let bytes: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::Validation(format!("nonce must be 4 bytes, got {}", bytes.len())))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(self) -> String {
        hex::encode_upper(self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MosaicId(u64);

impl MosaicId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    /// `SHA3-256(nonce || owner)`, first eight bytes as little-endian u64,
    /// top bit cleared so it can never collide with a namespace id.
    pub fn create_from_nonce(nonce: MosaicNonce, owner: &PublicKey) -> Self {
        let digest = sha3_256_multi(&[nonce.as_bytes(), owner.as_bytes()]);
        let mut low = [0u8; 8];
        low.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(low) & MOSAIC_ID_MASK)
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        u64::from_str_radix(strip_hex_prefix(text), 16)
            .map(Self)
            .map_err(|e| Error::Validation(format!("{text} is not a mosaic id: {e}")))
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }

    pub fn to_dto(self) -> Value {
        self.0.to_dto()
    }

    pub fn from_dto(dto: &Value) -> Result<Self> {
        u64::from_dto(dto).map(Self)
    }
}

impl From<u64> for MosaicId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}
