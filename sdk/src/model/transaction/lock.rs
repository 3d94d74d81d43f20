//! Hash lock, secret lock and secret proof.
//!
//! ```text
//! hash lock:    mosaic_id:u64  amount:u64  duration:u64  hash:32
//! secret lock:  mosaic_id:u64  amount:u64  duration:u64  hash_type:u8
//!               secret:32  recipient:25
//! secret proof: hash_type:u8  secret:32  recipient:25  proof_size:u16  proof
//! ```

use serde_json::Value;

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, SignedTransaction, Transaction, TransactionType};
use crate::codec::cursor::{count, write_u16, write_u64, write_u8};
use crate::codec::{dto, Dto, FixedWidth, Reader};
use crate::config::HASH_LENGTH;
use crate::crypto::hash;
use crate::error::{Error, Result};
use crate::model::account::Address;
use crate::model::blockchain::NetworkType;
use crate::model::mosaic::{Mosaic, MosaicId};

byte_enum! {
    /// Digest used to derive a secret from its proof.
    pub enum HashType ("hash type") {
        Sha3_256 = 0,
        Keccak256 = 1,
        Hash160 = 2,
        Hash256 = 3,
    }
}

impl HashType {
    /// Hash `data`, right-padding 20-byte digests to the 32-byte secret width.
    pub fn hash(self, data: &[u8]) -> [u8; HASH_LENGTH] {
        match self {
            HashType::Sha3_256 => hash::sha3_256(data),
            HashType::Keccak256 => hash::keccak_256(data),
            HashType::Hash256 => hash::hash256(data),
            HashType::Hash160 => {
                let mut secret = [0u8; HASH_LENGTH];
                secret[..20].copy_from_slice(&hash::hash160(data));
                secret
            }
        }
    }
}

fn hex_upper(bytes: &[u8]) -> Value {
    Value::from(hex::encode_upper(bytes))
}

fn write_locked_mosaic(out: &mut Vec<u8>, mosaic: &Mosaic, duration: u64) {
    mosaic.write(out);
    write_u64(out, duration);
}

fn read_locked_mosaic(reader: &mut Reader<'_>) -> Result<(Mosaic, u64)> {
    let mosaic = Mosaic::read(reader)?;
    let duration = reader.read_u64()?;
    Ok((mosaic, duration))
}

fn locked_mosaic_to_dto(obj: &mut Dto, mosaic: &Mosaic, duration: u64) {
    obj.insert("mosaicId".into(), mosaic.id.to_dto());
    obj.insert("amount".into(), mosaic.amount.to_dto());
    obj.insert("duration".into(), duration.to_dto());
}

fn locked_mosaic_from_dto(data: &Dto) -> Result<(Mosaic, u64)> {
    let mosaic = Mosaic::new(
        MosaicId::from_dto(dto::field(data, "mosaicId")?)?,
        dto::uint(data, "amount")?,
    );
    Ok((mosaic, dto::uint(data, "duration")?))
}

/// Locks funds against the hash of an announced bonded aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashLockTransaction {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash: [u8; HASH_LENGTH],
}

impl HashLockTransaction {
    /// `signed` must be a signed bonded aggregate.
    pub fn create(
        deadline: Deadline,
        mosaic: Mosaic,
        duration: u64,
        signed: &SignedTransaction,
        network_type: NetworkType,
    ) -> Result<Transaction> {
        if signed.transaction_type != TransactionType::AggregateBonded {
            return Err(Error::Validation(format!(
                "hash lock needs a bonded aggregate, got {}",
                signed.transaction_type
            )));
        }
        let body = TransactionBody::HashLock(Self {
            mosaic,
            duration,
            hash: signed.hash,
        });
        Ok(Transaction::new(network_type, deadline, body))
    }
}

impl TransactionPayload for HashLockTransaction {
    fn payload_size(&self) -> usize {
        Mosaic::CATBUFFER_SIZE + 8 + HASH_LENGTH
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_locked_mosaic(&mut out, &self.mosaic, self.duration);
        out.extend_from_slice(&self.hash);
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let (mosaic, duration) = read_locked_mosaic(&mut reader)?;
        let hash = reader.read_array()?;
        Ok((
            Self {
                mosaic,
                duration,
                hash,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        locked_mosaic_to_dto(&mut obj, &self.mosaic, self.duration);
        obj.insert("hash".into(), hex_upper(&self.hash));
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        let (mosaic, duration) = locked_mosaic_from_dto(data)?;
        Ok(Self {
            mosaic,
            duration,
            hash: dto::hex_array(data, "hash")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretLockTransaction {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_type: HashType,
    pub secret: [u8; HASH_LENGTH],
    pub recipient: Address,
}

impl SecretLockTransaction {
    pub fn create(
        deadline: Deadline,
        mosaic: Mosaic,
        duration: u64,
        hash_type: HashType,
        secret: [u8; HASH_LENGTH],
        recipient: Address,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::SecretLock(Self {
            mosaic,
            duration,
            hash_type,
            secret,
            recipient,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for SecretLockTransaction {
    fn payload_size(&self) -> usize {
        Mosaic::CATBUFFER_SIZE + 8 + HashType::CATBUFFER_SIZE + HASH_LENGTH + Address::CATBUFFER_SIZE
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_locked_mosaic(&mut out, &self.mosaic, self.duration);
        write_u8(&mut out, self.hash_type.value());
        out.extend_from_slice(&self.secret);
        out.extend_from_slice(self.recipient.encoded());
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let (mosaic, duration) = read_locked_mosaic(&mut reader)?;
        let hash_type = HashType::from_value(reader.read_u8()?)?;
        let secret = reader.read_array()?;
        let recipient = Address::read(&mut reader)?;
        Ok((
            Self {
                mosaic,
                duration,
                hash_type,
                secret,
                recipient,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        locked_mosaic_to_dto(&mut obj, &self.mosaic, self.duration);
        obj.insert("hashAlgorithm".into(), self.hash_type.to_dto());
        obj.insert("secret".into(), hex_upper(&self.secret));
        obj.insert("recipient".into(), Value::from(self.recipient.to_hex()));
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        let (mosaic, duration) = locked_mosaic_from_dto(data)?;
        Ok(Self {
            mosaic,
            duration,
            hash_type: HashType::from_dto(dto::field(data, "hashAlgorithm")?)?,
            secret: dto::hex_array(data, "secret")?,
            recipient: Address::from_hex(dto::string(data, "recipient")?)?,
        })
    }
}

/// Reveals the proof that unlocks a secret lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretProofTransaction {
    pub hash_type: HashType,
    pub secret: [u8; HASH_LENGTH],
    pub recipient: Address,
    pub proof: Vec<u8>,
}

impl SecretProofTransaction {
    /// The secret is derived from `proof` with `hash_type`.
    pub fn create(
        deadline: Deadline,
        hash_type: HashType,
        recipient: Address,
        proof: Vec<u8>,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::SecretProof(Self {
            hash_type,
            secret: hash_type.hash(&proof),
            recipient,
            proof,
        });
        Transaction::new(network_type, deadline, body)
    }

    /// Whether `proof` hashes to `secret`.
    pub fn is_consistent(&self) -> bool {
        self.hash_type.hash(&self.proof) == self.secret
    }
}

impl TransactionPayload for SecretProofTransaction {
    fn payload_size(&self) -> usize {
        HashType::CATBUFFER_SIZE + HASH_LENGTH + Address::CATBUFFER_SIZE + 2 + self.proof.len()
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u8(&mut out, self.hash_type.value());
        out.extend_from_slice(&self.secret);
        out.extend_from_slice(self.recipient.encoded());
        write_u16(&mut out, count(self.proof.len(), "proof size")?);
        out.extend_from_slice(&self.proof);
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let hash_type = HashType::from_value(reader.read_u8()?)?;
        let secret = reader.read_array()?;
        let recipient = Address::read(&mut reader)?;
        let proof_size = reader.read_u16()?;
        let proof = reader.take(usize::from(proof_size))?.to_vec();
        Ok((
            Self {
                hash_type,
                secret,
                recipient,
                proof,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("hashAlgorithm".into(), self.hash_type.to_dto());
        obj.insert("secret".into(), hex_upper(&self.secret));
        obj.insert("recipient".into(), Value::from(self.recipient.to_hex()));
        obj.insert("proof".into(), hex_upper(&self.proof));
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            hash_type: HashType::from_dto(dto::field(data, "hashAlgorithm")?)?,
            secret: dto::hex_array(data, "secret")?,
            recipient: Address::from_hex(dto::string(data, "recipient")?)?,
            proof: dto::hex_bytes(data, "proof")?,
        })
    }
}
