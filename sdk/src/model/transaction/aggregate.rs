//! # Aggregate Transactions
//!
//! A complete or bonded aggregate bundles embedded transactions and the
//! cosignatures of parties other than the primary signer:
//!
//! ```text
//! payload_size:u32  inner transactions (payload_size bytes)
//! cosignatures[signer:32, signature:64]*   (to the end of the transaction)
//! ```
//!
//! Inner transactions keep the order they were given; cosignatures are
//! appended after the whole inner block, never interleaved.

use serde_json::{json, Map, Value};

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, InnerTransaction, Transaction, TransactionInfo};
use crate::codec::cursor::{count, write_u32};
use crate::codec::{dto, Dto, Reader};
use crate::config::COSIGNATURE_SIZE;
use crate::crypto::keys::Signature;
use crate::error::{Error, Result};
use crate::model::account::PublicAccount;
use crate::model::blockchain::NetworkType;

/// One detached cosignature carried by an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateTransactionCosignature {
    pub signer: PublicAccount,
    pub signature: Signature,
}

impl AggregateTransactionCosignature {
    pub const CATBUFFER_SIZE: usize = COSIGNATURE_SIZE;

    pub fn new(signer: PublicAccount, signature: Signature) -> Self {
        Self { signer, signature }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.signer.public_key().as_bytes());
        out.extend_from_slice(self.signature.as_bytes());
    }

    pub(crate) fn read(reader: &mut Reader<'_>, network_type: NetworkType) -> Result<Self> {
        let signer = PublicAccount::new(reader.read_public_key()?, network_type);
        let signature = reader.read_signature()?;
        Ok(Self { signer, signature })
    }

    pub fn to_dto(&self) -> Value {
        json!({
            "signer": self.signer.public_key().to_hex(),
            "signature": self.signature.to_hex(),
        })
    }

    pub fn from_dto(data: &Value, network_type: NetworkType) -> Result<Self> {
        let obj = dto::as_object(data, "cosignature")?;
        Ok(Self {
            signer: PublicAccount::new(dto::public_key(obj, "signer")?, network_type),
            signature: dto::signature(obj, "signature")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateTransaction {
    pub inner_transactions: Vec<InnerTransaction>,
    pub cosignatures: Vec<AggregateTransactionCosignature>,
}

impl AggregateTransaction {
    /// An aggregate that is complete once signed by the initiator and any
    /// cosigners supplied at signing time.
    pub fn create_complete(
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::AggregateComplete(Self {
            inner_transactions,
            cosignatures: Vec::new(),
        });
        Transaction::new(network_type, deadline, body)
    }

    /// An aggregate announced before all cosignatures are collected. Needs a
    /// hash lock to be accepted by the network.
    pub fn create_bonded(
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::AggregateBonded(Self {
            inner_transactions,
            cosignatures: Vec::new(),
        });
        Transaction::new(network_type, deadline, body)
    }

    /// Bytes of the inner-transaction block, excluding its size prefix.
    pub fn inner_size(&self) -> usize {
        self.inner_transactions.iter().map(InnerTransaction::size).sum()
    }

    /// Bytes of the trailing cosignature block.
    pub fn cosignatures_size(&self) -> usize {
        self.cosignatures.len() * COSIGNATURE_SIZE
    }

    /// Whether `account` signed any inner transaction or cosigned.
    pub fn signed_by_account(&self, account: &PublicAccount) -> bool {
        self.inner_transactions
            .iter()
            .any(|inner| inner.signer.public_key() == account.public_key())
            || self
                .cosignatures
                .iter()
                .any(|c| c.signer.public_key() == account.public_key())
    }
}

impl TransactionPayload for AggregateTransaction {
    fn payload_size(&self) -> usize {
        4 + self.inner_size() + self.cosignatures_size()
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u32(&mut out, count(self.inner_size(), "aggregate payload size")?);
        for inner in &self.inner_transactions {
            out.extend_from_slice(&inner.to_catbuffer()?);
        }
        for cosignature in &self.cosignatures {
            cosignature.write(&mut out);
        }
        Ok(out)
    }

    /// Consumes the rest of the transaction: everything after the inner
    /// block must be whole cosignatures.
    fn decode_payload(bytes: &[u8], network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let payload_size = reader.read_u32()? as usize;
        let mut block = reader.take(payload_size)?;

        let mut inner_transactions = Vec::new();
        while !block.is_empty() {
            let (inner, rest) = InnerTransaction::from_catbuffer(block)?;
            inner_transactions.push(inner);
            block = rest;
        }

        if reader.len() % COSIGNATURE_SIZE != 0 {
            return Err(Error::MalformedPayload(format!(
                "{} bytes after the inner transactions are not whole {COSIGNATURE_SIZE}-byte cosignatures",
                reader.len()
            )));
        }
        let mut cosignatures = Vec::with_capacity(reader.len() / COSIGNATURE_SIZE);
        while !reader.is_empty() {
            cosignatures.push(AggregateTransactionCosignature::read(&mut reader, network_type)?);
        }

        Ok((
            Self {
                inner_transactions,
                cosignatures,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let transactions = self
            .inner_transactions
            .iter()
            .map(|inner| {
                let mut entry = Map::new();
                entry.insert("transaction".into(), inner.to_dto());
                if let Some(info) = &inner.transaction_info {
                    entry.insert("meta".into(), info.to_dto());
                }
                Value::Object(entry)
            })
            .collect();
        let mut obj = Dto::new();
        obj.insert("transactions".into(), Value::Array(transactions));
        obj.insert(
            "cosignatures".into(),
            Value::Array(self.cosignatures.iter().map(|c| c.to_dto()).collect()),
        );
        obj
    }

    fn from_dto_specific(data: &Dto, network_type: NetworkType) -> Result<Self> {
        let inner_transactions = dto::array(data, "transactions")?
            .iter()
            .map(|entry| {
                let entry = dto::as_object(entry, "aggregate entry")?;
                let mut inner = InnerTransaction::from_dto(dto::field(entry, "transaction")?)?;
                if let Some(meta) = entry.get("meta") {
                    inner.transaction_info = Some(TransactionInfo::from_dto(meta)?);
                }
                Ok(inner)
            })
            .collect::<Result<_>>()?;
        let cosignatures = match data.get("cosignatures") {
            Some(_) => dto::array(data, "cosignatures")?
                .iter()
                .map(|c| AggregateTransactionCosignature::from_dto(c, network_type))
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            inner_transactions,
            cosignatures,
        })
    }
}
