//! # Protocol Configuration & Constants
//!
//! Every fixed number the wire formats depend on lives here, next to the
//! small [`SdkConfig`] struct an application loads once at startup.
//!
//! The constants mirror what a Catapult node expects byte for byte. They are
//! not tunables.

use serde::{Deserialize, Serialize};

use crate::crypto::keys::strip_hex_prefix;
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;
use crate::model::transaction::FeeCalculationStrategy;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 private key (seed) length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA3-256 digest length; also the size of transaction and generation hashes.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Decoded address: network byte + RIPEMD-160 digest + checksum.
pub const ADDRESS_DECODED_LENGTH: usize = 25;

/// Base32 text form of an address, without dashes.
pub const ADDRESS_ENCODED_LENGTH: usize = 40;

/// Length of the RIPEMD-160 digest inside an address.
pub const ADDRESS_RIPEMD_LENGTH: usize = 20;

/// Trailing checksum bytes.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// `pretty()` inserts a dash every this many characters.
pub const ADDRESS_PRETTY_CHUNK: usize = 6;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// size(4) + signature(64) + signer(32) + version(1) + network(1) + type(2)
/// + max_fee(8) + deadline(8).
pub const TRANSACTION_HEADER_SIZE: usize = 120;

/// size(4) + signer(32) + version(1) + network(1) + type(2).
pub const EMBEDDED_HEADER_SIZE: usize = 40;

/// Byte offset where the signed portion of a top-level transaction begins
/// (right after size, signature and signer).
pub const SIGNED_DATA_OFFSET: usize = 4 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH;

/// One aggregate cosignature: signer public key + signature.
pub const COSIGNATURE_SIZE: usize = PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Nemesis block timestamp, 2016-04-01T00:00:00Z, in Unix milliseconds.
/// Deadlines are expressed relative to this instant.
pub const NEMESIS_EPOCH_MS: i64 = 1_459_468_800_000;

/// Default deadline offset from now.
pub const DEFAULT_DEADLINE_SECS: u64 = 2 * 60 * 60;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Per-byte fee multipliers for each [`FeeCalculationStrategy`].
pub const FEE_MULTIPLIER_ZERO: u64 = 0;
pub const FEE_MULTIPLIER_LOW: u64 = 5;
pub const FEE_MULTIPLIER_MIDDLE: u64 = 250;
pub const FEE_MULTIPLIER_HIGH: u64 = 700;

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// A full namespace name has at most this many dot-separated levels.
pub const NAMESPACE_MAX_DEPTH: usize = 3;

/// Maximum length of a single namespace level.
pub const NAMESPACE_MAX_PART_LENGTH: usize = 64;

/// Bit marking a 64-bit id as a namespace id.
pub const NAMESPACE_FLAG: u64 = 1 << 63;

/// Mask clearing the namespace bit from a derived mosaic id.
pub const MOSAIC_ID_MASK: u64 = !NAMESPACE_FLAG;

// ---------------------------------------------------------------------------
// Runtime Configuration
// ---------------------------------------------------------------------------

/// Application-level settings shared by the builders.
///
/// Every field has a default, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SdkConfig {
    /// Network the application talks to.
    pub network_type: NetworkType,
    /// Hex of the nemesis block generation hash, mixed into every signature.
    pub generation_hash: String,
    /// Seconds added to the current time by [`SdkConfig::deadline`].
    pub default_deadline_secs: u64,
    pub fee_strategy: FeeCalculationStrategy,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            network_type: NetworkType::MijinTest,
            generation_hash: "00".repeat(HASH_LENGTH),
            default_deadline_secs: DEFAULT_DEADLINE_SECS,
            fee_strategy: FeeCalculationStrategy::Zero,
        }
    }
}

impl SdkConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        tracing::debug!(
            network = %config.network_type,
            deadline_secs = config.default_deadline_secs,
            "loaded sdk config"
        );
        Ok(config)
    }

    /// Check that the generation hash is 32 bytes of hex and the deadline
    /// offset is non-zero.
    pub fn validate(&self) -> Result<()> {
        self.generation_hash_bytes()?;
        if self.default_deadline_secs == 0 {
            return Err(Error::Validation(
                "default deadline must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// A deadline `default_deadline_secs` from now.
    pub fn deadline(&self) -> crate::model::transaction::Deadline {
        crate::model::transaction::Deadline::create(std::time::Duration::from_secs(
            self.default_deadline_secs,
        ))
    }

    /// The decoded generation hash.
    pub fn generation_hash_bytes(&self) -> Result<[u8; HASH_LENGTH]> {
        let bytes = hex::decode(strip_hex_prefix(&self.generation_hash))?;
        bytes.as_slice().try_into().map_err(|_| {
            Error::Validation(format!(
                "generation hash must be {HASH_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_sizes_add_up() {
        assert_eq!(TRANSACTION_HEADER_SIZE, 4 + 64 + 32 + 1 + 1 + 2 + 8 + 8);
        assert_eq!(EMBEDDED_HEADER_SIZE, 4 + 32 + 1 + 1 + 2);
        assert_eq!(SIGNED_DATA_OFFSET, 100);
    }

    #[test]
    fn test_address_sizes_add_up() {
        assert_eq!(
            1 + ADDRESS_RIPEMD_LENGTH + ADDRESS_CHECKSUM_LENGTH,
            ADDRESS_DECODED_LENGTH
        );
        // 25 bytes in base32 is 40 characters without padding.
        assert_eq!(ADDRESS_DECODED_LENGTH * 8 / 5, ADDRESS_ENCODED_LENGTH);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SdkConfig::from_json("{}").unwrap();
        assert_eq!(config, SdkConfig::default());
    }

    #[test]
    fn test_full_document() {
        let text = r#"{
            "networkType": "MAIN_NET",
            "generationHash": "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6",
            "defaultDeadlineSecs": 600,
            "feeStrategy": "MIDDLE"
        }"#;
        let config = SdkConfig::from_json(text).unwrap();
        assert_eq!(config.network_type, NetworkType::MainNet);
        assert_eq!(config.default_deadline_secs, 600);
        assert_eq!(config.fee_strategy, FeeCalculationStrategy::Middle);
        assert_eq!(config.generation_hash_bytes().unwrap()[0], 0x57);
    }

    #[test]
    fn test_short_generation_hash_rejected() {
        let err = SdkConfig::from_json(r#"{"generationHash": "ABCD"}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_zero_deadline_rejected() {
        let err = SdkConfig::from_json(r#"{"defaultDeadlineSecs": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
