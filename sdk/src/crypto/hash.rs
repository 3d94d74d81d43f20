//! # Hashing Utilities
//!
//! The digests Catapult relies on. SHA3-256 is the workhorse: address
//! checksums, identifier derivation and transaction hashes all use it.
//! RIPEMD-160 shortens public key digests into addresses. The remaining
//! functions back the secret lock hash algorithms.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};

/// SHA3-256 of the input.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// SHA3-256 over several byte slices fed in order, without concatenating.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Keccak-256, the pre-standard SHA3 padding.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// SHA-256 of the input.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// RIPEMD-160 of the input.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Bitcoin-style `RIPEMD-160(SHA-256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// `SHA-256(SHA-256(data))`.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty_vector() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn keccak_differs_from_sha3() {
        assert_eq!(
            hex::encode(keccak_256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_ne!(keccak_256(b""), sha3_256(b""));
    }

    #[test]
    fn ripemd160_empty_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn multi_matches_concatenation() {
        let joined = sha3_256(b"helloworld");
        assert_eq!(sha3_256_multi(&[b"hello", b"world"]), joined);
    }

    #[test]
    fn double_constructions() {
        assert_eq!(hash256(b"abc"), sha256(&sha256(b"abc")));
        assert_eq!(hash160(b"abc"), ripemd160(&sha256(b"abc")));
    }
}
