//! # Signing
//!
//! A transaction is signed over `generation_hash || bytes[100..end]`, where
//! `bytes` is its catbuffer with the signer filled in and `end` stops before
//! any aggregate cosignature block. Its hash is
//!
//! ```text
//! SHA3-256(signature[0..32] || signer || generation_hash || bytes[100..end])
//! ```
//!
//! Cosigners sign that hash. Their cosignatures are appended after the
//! signed bytes, so neither the primary signature nor the hash changes.

use serde_json::{json, Value};

use super::aggregate::AggregateTransactionCosignature;
use super::{Transaction, TransactionType};
use crate::codec::dto;
use crate::config::{HASH_LENGTH, SIGNED_DATA_OFFSET};
use crate::crypto::hash::sha3_256_multi;
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Error, Result};
use crate::model::account::{Account, PublicAccount};
use crate::model::blockchain::NetworkType;

/// A signed, announceable transaction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub payload: Vec<u8>,
    pub hash: [u8; HASH_LENGTH],
    pub signer: PublicKey,
    pub transaction_type: TransactionType,
    pub network_type: NetworkType,
}

impl SignedTransaction {
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }

    pub fn hash_hex(&self) -> String {
        hex::encode_upper(self.hash)
    }

    /// The body of an announce request.
    pub fn to_dto(&self) -> Value {
        json!({
            "payload": self.payload_hex(),
            "hash": self.hash_hex(),
            "signer": self.signer.to_hex(),
            "type": self.transaction_type.code(),
            "networkType": self.network_type.value(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "signed transaction")?;
        Ok(Self {
            payload: dto::hex_bytes(obj, "payload")?,
            hash: dto::hex_array(obj, "hash")?,
            signer: dto::public_key(obj, "signer")?,
            transaction_type: TransactionType::from_code(dto::uint(obj, "type")?)?,
            network_type: NetworkType::from_dto(dto::field(obj, "networkType")?)?,
        })
    }

    /// Decode the payload back into a transaction.
    pub fn transaction(&self) -> Result<Transaction> {
        let (transaction, rest) = Transaction::from_catbuffer(&self.payload)?;
        if !rest.is_empty() {
            return Err(Error::MalformedPayload(format!(
                "{} bytes follow the signed transaction",
                rest.len()
            )));
        }
        Ok(transaction)
    }
}

/// A cosignature announced on its own, for a bonded aggregate already on
/// the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosignatureSignedTransaction {
    pub parent_hash: [u8; HASH_LENGTH],
    pub signature: Signature,
    pub signer: PublicKey,
}

impl CosignatureSignedTransaction {
    /// Whether `signature` is the signer's signature of `parent_hash`.
    pub fn verify(&self) -> bool {
        self.signer.verify(&self.parent_hash, &self.signature)
    }

    pub fn to_dto(&self) -> Value {
        json!({
            "parentHash": hex::encode_upper(self.parent_hash),
            "signature": self.signature.to_hex(),
            "signer": self.signer.to_hex(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "cosignature")?;
        Ok(Self {
            parent_hash: dto::hex_array(obj, "parentHash")?,
            signature: dto::signature(obj, "signature")?,
            signer: dto::public_key(obj, "signer")?,
        })
    }
}

/// A bonded aggregate seen on the network, waiting for our cosignature.
#[derive(Debug, Clone)]
pub struct CosignatureTransaction {
    transaction: Transaction,
}

impl CosignatureTransaction {
    /// `transaction` must be an aggregate announced by a node, so that its
    /// metadata carries the hash to cosign.
    pub fn create(transaction: Transaction) -> Result<Self> {
        if !transaction.transaction_type().is_aggregate() {
            return Err(Error::UnsupportedOperation(format!(
                "only aggregates can be cosigned, got {}",
                transaction.transaction_type()
            )));
        }
        Ok(Self { transaction })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn parent_hash(&self) -> Result<[u8; HASH_LENGTH]> {
        let hash = self
            .transaction
            .transaction_info
            .as_ref()
            .and_then(|info| info.hash.as_deref())
            .ok_or_else(|| {
                Error::Validation("aggregate has no announced hash to cosign".to_string())
            })?;
        let bytes = hex::decode(hash)?;
        bytes
            .try_into()
            .map_err(|_| Error::Validation(format!("{hash} is not a 32-byte hash")))
    }

    pub fn sign_with(&self, account: &Account) -> Result<CosignatureSignedTransaction> {
        let parent_hash = self.parent_hash()?;
        Ok(CosignatureSignedTransaction {
            parent_hash,
            signature: account.sign_data(&parent_hash),
            signer: *account.public_key(),
        })
    }
}

impl Transaction {
    /// Sign with `signer`, binding the signature to one chain through
    /// `generation_hash`.
    pub fn sign(&self, signer: &Account, generation_hash: &[u8; HASH_LENGTH]) -> Result<SignedTransaction> {
        let (signed, hash) = self.sign_primary(signer, generation_hash)?;
        signed.finish(hash)
    }

    /// Sign an aggregate as `initiator` and attach one cosignature per
    /// cosigner, in the order given.
    pub fn sign_with_cosignatories(
        &self,
        initiator: &Account,
        cosigners: &[&Account],
        generation_hash: &[u8; HASH_LENGTH],
    ) -> Result<SignedTransaction> {
        if !self.transaction_type().is_aggregate() {
            return Err(Error::UnsupportedOperation(format!(
                "cosignatories can only sign aggregates, got {}",
                self.transaction_type()
            )));
        }
        let (mut signed, hash) = self.sign_primary(initiator, generation_hash)?;
        if let Some(aggregate) = signed.body.as_aggregate_mut() {
            for cosigner in cosigners {
                aggregate.cosignatures.push(AggregateTransactionCosignature::new(
                    *cosigner.public_account(),
                    cosigner.sign_data(&hash),
                ));
            }
        }
        signed.finish(hash)
    }

    /// A copy carrying `signer` and its signature, plus the transaction hash.
    fn sign_primary(
        &self,
        signer: &Account,
        generation_hash: &[u8; HASH_LENGTH],
    ) -> Result<(Transaction, [u8; HASH_LENGTH])> {
        let mut transaction = self.clone();
        transaction.signer = Some(*signer.public_account());
        transaction.signature = None;

        let bytes = transaction.to_catbuffer()?;
        let cosignatures = transaction
            .body
            .as_aggregate()
            .map_or(0, |aggregate| aggregate.cosignatures_size());
        let signed_data = &bytes[SIGNED_DATA_OFFSET..bytes.len() - cosignatures];

        let mut preimage = Vec::with_capacity(HASH_LENGTH + signed_data.len());
        preimage.extend_from_slice(generation_hash);
        preimage.extend_from_slice(signed_data);
        let signature = signer.sign_data(&preimage);

        let hash = sha3_256_multi(&[
            &signature.as_bytes()[..32],
            signer.public_key().as_bytes(),
            generation_hash,
            signed_data,
        ]);
        transaction.signature = Some(signature);
        Ok((transaction, hash))
    }

    fn finish(self, hash: [u8; HASH_LENGTH]) -> Result<SignedTransaction> {
        let payload = self.to_catbuffer()?;
        let signer = self
            .signer
            .as_ref()
            .map(PublicAccount::public_key)
            .copied()
            .ok_or_else(|| Error::Validation("signed transaction has no signer".to_string()))?;
        tracing::debug!(
            transaction_type = %self.transaction_type(),
            hash = %hex::encode_upper(hash),
            size = payload.len(),
            "signed transaction"
        );
        Ok(SignedTransaction {
            payload,
            hash,
            signer,
            transaction_type: self.transaction_type(),
            network_type: self.network_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::account::Address;
    use crate::model::mosaic::{Mosaic, MosaicId};
    use crate::model::transaction::{AggregateTransaction, Deadline, Message, TransactionInfo, TransferTransaction};

    const NETWORK: NetworkType = NetworkType::MijinTest;
    const GENERATION_HASH: [u8; 32] = [0x11; 32];
    const PRIVATE_KEY: &str = "28FCECEA252231D2C86E1BCF7DD541552BDBBEFBB09324758B3AC199B4AA7B78";

    fn transfer() -> Transaction {
        TransferTransaction::create(
            Deadline::new(42),
            Address::create_from_raw_address("SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ").unwrap(),
            vec![Mosaic::new(MosaicId::new(1), 1)],
            Message::plain("signed"),
            NETWORK,
        )
    }

    #[test]
    fn signature_covers_generation_hash_and_body() {
        let account = Account::create_from_private_key(PRIVATE_KEY, NETWORK).unwrap();
        let signed = transfer().sign(&account, &GENERATION_HASH).unwrap();
        assert_eq!(signed.payload.len(), transfer().size());
        assert_eq!(&signed.payload[68..100], account.public_key().as_bytes());

        let signature = Signature::try_from_slice(&signed.payload[4..68]).unwrap();
        let mut preimage = GENERATION_HASH.to_vec();
        preimage.extend_from_slice(&signed.payload[100..]);
        assert!(account.public_key().verify(&preimage, &signature));

        let expected = sha3_256_multi(&[
            &signed.payload[4..36],
            &signed.payload[68..100],
            &GENERATION_HASH,
            &signed.payload[100..],
        ]);
        assert_eq!(signed.hash, expected);
    }

    #[test]
    fn generation_hash_changes_signature() {
        let account = Account::generate_new_account(NETWORK);
        let a = transfer().sign(&account, &[1; 32]).unwrap();
        let b = transfer().sign(&account, &[2; 32]).unwrap();
        assert_ne!(a.hash, b.hash);
        assert_ne!(a.payload[4..68], b.payload[4..68]);
    }

    #[test]
    fn signed_payload_decodes() {
        let account = Account::generate_new_account(NETWORK);
        let signed = transfer().sign(&account, &GENERATION_HASH).unwrap();
        let decoded = signed.transaction().unwrap();
        assert!(decoded.is_signed());
        assert_eq!(decoded.signer.unwrap().public_key(), account.public_key());
        assert_eq!(decoded.body, transfer().body);
    }

    #[test]
    fn cosigners_sign_the_aggregate_hash_in_order() {
        let initiator = Account::generate_new_account(NETWORK);
        let alice = Account::generate_new_account(NETWORK);
        let bob = Account::generate_new_account(NETWORK);
        let inner = transfer().to_aggregate(initiator.public_account()).unwrap();
        let aggregate = AggregateTransaction::create_complete(Deadline::new(42), vec![inner], NETWORK);

        let signed = aggregate
            .sign_with_cosignatories(&initiator, &[&alice, &bob], &GENERATION_HASH)
            .unwrap();
        let unsigned = aggregate.sign(&initiator, &GENERATION_HASH).unwrap();
        assert_eq!(signed.hash, unsigned.hash);
        assert_eq!(signed.payload.len(), unsigned.payload.len() + 2 * 96);
        assert_eq!(
            &signed.payload[4..4 + 64],
            &unsigned.payload[4..4 + 64],
            "cosignatures do not change the primary signature"
        );

        let decoded = signed.transaction().unwrap();
        let cosignatures = &decoded.body.as_aggregate().unwrap().cosignatures;
        assert_eq!(cosignatures.len(), 2);
        assert_eq!(cosignatures[0].signer.public_key(), alice.public_key());
        assert_eq!(cosignatures[1].signer.public_key(), bob.public_key());
        for cosignature in cosignatures {
            assert!(cosignature.signer.verify_signature(&signed.hash, &cosignature.signature));
        }
    }

    #[test]
    fn cosignatories_need_an_aggregate() {
        let account = Account::generate_new_account(NETWORK);
        let err = transfer()
            .sign_with_cosignatories(&account, &[&account], &GENERATION_HASH)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
    }

    #[test]
    fn detached_cosignature() {
        let initiator = Account::generate_new_account(NETWORK);
        let cosigner = Account::generate_new_account(NETWORK);
        let inner = transfer().to_aggregate(initiator.public_account()).unwrap();
        let mut bonded = AggregateTransaction::create_bonded(Deadline::new(42), vec![inner], NETWORK);
        let signed = bonded.sign(&initiator, &GENERATION_HASH).unwrap();

        assert!(CosignatureTransaction::create(bonded.clone()).unwrap().sign_with(&cosigner).is_err());

        bonded.transaction_info = Some(TransactionInfo {
            hash: Some(signed.hash_hex()),
            ..TransactionInfo::default()
        });
        let cosignature = CosignatureTransaction::create(bonded)
            .unwrap()
            .sign_with(&cosigner)
            .unwrap();
        assert_eq!(cosignature.parent_hash, signed.hash);
        assert!(cosignature.verify());

        let dto = cosignature.to_dto();
        assert_eq!(dto["parentHash"], signed.hash_hex());
        assert_eq!(CosignatureSignedTransaction::from_dto(&dto).unwrap(), cosignature);
    }

    #[test]
    fn signed_dto_roundtrip() {
        let account = Account::generate_new_account(NETWORK);
        let signed = transfer().sign(&account, &GENERATION_HASH).unwrap();
        let dto = signed.to_dto();
        assert_eq!(dto["type"], 0x4154);
        assert_eq!(SignedTransaction::from_dto(&dto).unwrap(), signed);
    }
}
