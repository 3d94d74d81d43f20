//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations: SHA3/Keccak, SHA-2
//! and RIPEMD-160 digests, and Ed25519 with Catapult's SHA3-512 key
//! expansion. Nothing here is hand-rolled.

pub mod hash;
pub mod keys;

pub use hash::{hash160, hash256, keccak_256, ripemd160, sha256, sha3_256, sha3_256_multi};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
