//! # Key Management
//!
//! Ed25519 key pairs as Catapult uses them.
//!
//! Catapult signs with standard Ed25519 curve arithmetic, but expands the
//! 32-byte private key with SHA3-512 instead of SHA-512, and hashes the
//! signing transcript with SHA3-512 as well. A stock `SigningKey` would
//! therefore derive the wrong public key. We drive `ed25519-dalek`'s
//! `hazmat` layer directly with [`Sha3_512`] as the context digest.
//!
//! ## Security considerations
//!
//! - The private seed is held in a [`Zeroizing`] buffer and wiped on drop.
//! - Key bytes are never logged. `Debug` prints the public half only.

use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_512};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur during key operations.
///
/// These do not echo key material back to the caller.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes")]
    InvalidPrivateKey,

    #[error("invalid public key: expected 32 bytes on the curve")]
    InvalidPublicKey,

    #[error("invalid signature: expected 64 bytes")]
    InvalidSignature,
}

/// A Catapult key pair.
///
/// `KeyPair` intentionally does NOT implement `Serialize`. Exporting the
/// private key is an explicit call to [`KeyPair::private_key_bytes`].
pub struct KeyPair {
    seed: Zeroizing<[u8; PRIVATE_KEY_LENGTH]>,
    public_key: PublicKey,
}

/// The 32-byte public half of a key pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

fn expand(seed: &[u8; PRIVATE_KEY_LENGTH]) -> ExpandedSecretKey {
    let mut digest = Zeroizing::new([0u8; 64]);
    digest.copy_from_slice(&Sha3_512::digest(seed));
    ExpandedSecretKey::from_bytes(&digest)
}

impl KeyPair {
    /// Generate a fresh key pair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        OsRng.fill_bytes(&mut *seed);
        Self::from_seed(&seed)
    }

    /// Construct a key pair deterministically from a 32-byte private key.
    pub fn from_seed(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        let expanded = expand(seed);
        let verifying_key = VerifyingKey::from(&expanded);
        Self {
            seed: Zeroizing::new(*seed),
            public_key: PublicKey {
                bytes: verifying_key.to_bytes(),
            },
        }
    }

    /// Construct a key pair from a private key slice of any origin.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let seed: [u8; PRIVATE_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Reconstruct a key pair from a hex-encoded private key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(
            hex::decode(strip_hex_prefix(hex_str)).map_err(|_| KeyError::InvalidPrivateKey)?,
        );
        Self::from_slice(&bytes)
    }

    /// The public key derived from this private key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Exports the raw private key. Handle with care.
    pub fn private_key_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        *self.seed
    }

    /// Exports the private key as uppercase hex.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(*self.seed)
    }

    /// Sign a message.
    ///
    /// Deterministic: the same key and message always produce the same
    /// signature, so concurrent callers never share signing state.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = expand(&self.seed);
        let verifying_key = VerifyingKey::from(&expanded);
        let signature = raw_sign::<Sha3_512>(&expanded, message, &verifying_key);
        Signature {
            bytes: signature.to_bytes(),
        }
    }

    /// Verify a signature against this key pair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(message, signature)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.seed)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key.to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Compares public keys only.
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Wrap raw bytes. No curve check is performed; Catapult transmits
    /// all-zero signers for unsigned payloads and those must round-trip.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Try to build a public key from a slice, checking the length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded public key, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(strip_hex_prefix(s)).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Uppercase hex, the form the REST API uses.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// `true` for the all-zero placeholder used by unsigned payloads.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Verify a signature with the SHA3-512 transcript hash.
    ///
    /// Returns `false` for malformed points rather than an error; callers
    /// only ever want a yes/no answer here.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        raw_verify::<Sha3_512>(&verifying_key, message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(strip_hex_prefix(s)).map_err(|_| KeyError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// `true` for the all-zero placeholder used by unsigned payloads.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

/// Strips an optional `0x`/`0X` prefix from hex text.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEMESIS_PRIVATE_KEY: &str =
        "28FCECEA252231D2C86E1BCF7DD541552BDBBEFBB09324758B3AC199B4AA7B78";
    const NEMESIS_PUBLIC_KEY: &str =
        "0EB448D07C7CCB312989AC27AA052738FF589E2F83973F909B506B450DC5C4E2";

    #[test]
    fn sha3_key_derivation_matches_known_vector() {
        let kp = KeyPair::from_hex(NEMESIS_PRIVATE_KEY).unwrap();
        assert_eq!(kp.public_key().to_hex(), NEMESIS_PUBLIC_KEY);
    }

    #[test]
    fn private_key_hex_roundtrip() {
        let kp = KeyPair::from_hex(NEMESIS_PRIVATE_KEY).unwrap();
        assert_eq!(kp.private_key_hex(), NEMESIS_PRIVATE_KEY);
        let again = KeyPair::from_hex(&format!("0x{}", kp.private_key_hex())).unwrap();
        assert_eq!(kp, again);
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"announce");
        assert!(kp.verify(b"announce", &sig));
        assert!(!kp.verify(b"announce!", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = kp1.sign(b"message");
        assert!(!kp2.verify(b"message", &sig));
    }

    #[test]
    fn signatures_are_deterministic() {
        let kp = KeyPair::from_hex(NEMESIS_PRIVATE_KEY).unwrap();
        assert_eq!(kp.sign(b"same"), kp.sign(b"same"));
    }

    #[test]
    fn invalid_lengths_rejected() {
        assert!(KeyPair::from_hex("deadbeef").is_err());
        assert!(KeyPair::from_hex("not-hex").is_err());
        assert!(PublicKey::try_from_slice(&[0u8; 31]).is_err());
        assert!(Signature::try_from_slice(&[0u8; 63]).is_err());
    }

    #[test]
    fn zero_placeholders() {
        assert!(PublicKey::from_bytes([0u8; 32]).is_zero());
        assert!(Signature::from_bytes([0u8; 64]).is_zero());
        assert!(!KeyPair::generate().public_key().is_zero());
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let kp = KeyPair::from_hex(NEMESIS_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("KeyPair(pub="));
        assert!(!debug_str.contains("28FCECEA"));
    }
}
