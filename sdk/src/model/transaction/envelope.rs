//! # Top-Level Transactions
//!
//! The signed envelope around a [`TransactionBody`]:
//!
//! ```text
//! [size:u32][signature:64][signer:32][version:u8][network:u8][type:u16]
//! [max_fee:u64][deadline:u64][payload...]
//! ```
//!
//! Unsigned transactions encode an all-zero signature and signer; decoding
//! maps an all-zero field back to `None`.
//!
//! Lifecycle: built unsigned, then [`Transaction::sign`] produces an
//! immutable [`super::SignedTransaction`]. Confirmation metadata is an
//! overlay (`transaction_info`) and never changes the encoded bytes.

use serde_json::{Map, Value};

use super::body::TransactionBody;
use super::inner::InnerTransaction;
use super::{registry, Deadline, FeeCalculationStrategy, TransactionInfo, TransactionType};
use crate::codec::cursor::{count, write_u16, write_u32, write_u64, write_u8};
use crate::codec::dto::{self, Dto};
use crate::codec::{FixedWidth, Reader};
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, TRANSACTION_HEADER_SIZE};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Error, Result};
use crate::model::account::PublicAccount;
use crate::model::blockchain::NetworkType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub network_type: NetworkType,
    pub version: u8,
    pub deadline: Deadline,
    pub max_fee: u64,
    pub signature: Option<Signature>,
    pub signer: Option<PublicAccount>,
    pub transaction_info: Option<TransactionInfo>,
    pub body: TransactionBody,
}

impl Transaction {
    /// An unsigned transaction with the type's current version and no fee.
    pub fn new(network_type: NetworkType, deadline: Deadline, body: TransactionBody) -> Self {
        Self {
            network_type,
            version: body.transaction_type().version(),
            deadline,
            max_fee: 0,
            signature: None,
            signer: None,
            transaction_info: None,
            body,
        }
    }

    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Set `max_fee` from the encoded size.
    pub fn with_fee_strategy(self, strategy: FeeCalculationStrategy) -> Self {
        let fee = strategy.calculate(self.size());
        self.with_max_fee(fee)
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    /// Header plus payload.
    pub fn size(&self) -> usize {
        TRANSACTION_HEADER_SIZE + self.body.payload_size()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Embedded form for inclusion in an aggregate. Aggregates cannot nest.
    pub fn to_aggregate(&self, signer: &PublicAccount) -> Result<InnerTransaction> {
        if self.transaction_type().is_aggregate() {
            return Err(Error::UnsupportedOperation(format!(
                "{} cannot be embedded in an aggregate",
                self.transaction_type()
            )));
        }
        Ok(InnerTransaction {
            network_type: self.network_type,
            version: self.version,
            signer: *signer,
            transaction_info: None,
            body: self.body.clone(),
        })
    }

    // -- catbuffer --------------------------------------------------------

    pub fn to_catbuffer(&self) -> Result<Vec<u8>> {
        let size = self.size();
        let mut out = Vec::with_capacity(size);
        write_u32(&mut out, count(size, "transaction size")?);
        let zero_signature = [0u8; SIGNATURE_LENGTH];
        out.extend_from_slice(
            self.signature
                .as_ref()
                .map_or(&zero_signature[..], |signature| &signature.as_bytes()[..]),
        );
        let zero_signer = [0u8; PUBLIC_KEY_LENGTH];
        out.extend_from_slice(
            self.signer
                .as_ref()
                .map_or(&zero_signer, |signer| signer.public_key().as_bytes()),
        );
        write_u8(&mut out, self.version);
        write_u8(&mut out, self.network_type.value());
        write_u16(&mut out, self.transaction_type().code());
        write_u64(&mut out, self.max_fee);
        write_u64(&mut out, self.deadline.value());
        out.extend_from_slice(&self.body.encode_payload(self.network_type)?);
        debug_assert_eq!(out.len(), size);
        Ok(out)
    }

    /// Decode one transaction from the front of `bytes`; returns the bytes
    /// after it.
    pub fn from_catbuffer(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let size = Reader::new(bytes).read_u32()? as usize;
        if size < TRANSACTION_HEADER_SIZE {
            return Err(Error::MalformedPayload(format!(
                "transaction size {size} is smaller than the {TRANSACTION_HEADER_SIZE}-byte header"
            )));
        }
        if bytes.len() < size {
            return Err(Error::truncated(size, bytes.len()));
        }
        let (own, rest) = bytes.split_at(size);

        let mut reader = Reader::new(&own[4..]);
        let signature = Some(reader.read_signature()?).filter(|s| !s.is_zero());
        let signer = reader.read_public_key()?;
        let version = reader.read_u8()?;
        let network_type = NetworkType::from_value(reader.read_u8()?)?;
        let code = reader.read_u16()?;
        let max_fee = reader.read_u64()?;
        let deadline = Deadline::new(reader.read_u64()?);

        let decoders = registry::top_level().get(code)?;
        let (body, leftover) = (decoders.catbuffer)(reader.remaining(), network_type)?;
        if !leftover.is_empty() {
            return Err(Error::MalformedPayload(format!(
                "declared size {size} leaves {} payload bytes unread",
                leftover.len()
            )));
        }
        tracing::trace!(code, size, "decoded transaction from catbuffer");

        Ok((
            Self {
                network_type,
                version,
                deadline,
                max_fee,
                signature,
                signer: signer_account(signer, network_type),
                transaction_info: None,
                body,
            },
            rest,
        ))
    }

    // -- DTO --------------------------------------------------------------

    pub fn to_dto(&self) -> Value {
        let mut obj = Map::new();
        if let Some(signature) = &self.signature {
            obj.insert("signature".into(), Value::from(signature.to_hex()));
        }
        if let Some(signer) = &self.signer {
            obj.insert("signer".into(), Value::from(signer.public_key().to_hex()));
        }
        obj.insert("version".into(), combined_version(self.network_type, self.version));
        obj.insert("type".into(), Value::from(self.transaction_type().code()));
        obj.insert("maxFee".into(), self.max_fee.to_dto());
        obj.insert("deadline".into(), self.deadline.to_dto());
        obj.extend(self.body.to_dto_specific(self.network_type));
        Value::Object(obj)
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "transaction")?;
        let code: u16 = dto::uint(obj, "type")?;
        let decoders = registry::top_level().get(code)?;
        let (network_type, version) = split_version(obj)?;

        let signature = match optional_hex(obj, "signature") {
            Some(_) => Some(dto::signature(obj, "signature")?).filter(|s| !s.is_zero()),
            None => None,
        };
        let signer = match optional_hex(obj, "signer") {
            Some(_) => signer_account(dto::public_key(obj, "signer")?, network_type),
            None => None,
        };

        Ok(Self {
            network_type,
            version,
            deadline: Deadline::from_dto(dto::field(obj, "deadline")?)?,
            max_fee: dto::uint(obj, "maxFee")?,
            signature,
            signer,
            transaction_info: None,
            body: (decoders.dto)(obj, network_type)?,
        })
    }

    /// Decode a REST entity `{meta, transaction}` and attach the metadata.
    pub fn from_response_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "transaction response")?;
        let mut transaction = Self::from_dto(dto::field(obj, "transaction")?)?;
        if let Some(meta) = obj.get("meta") {
            transaction.transaction_info = Some(TransactionInfo::from_dto(meta)?);
        }
        Ok(transaction)
    }
}

/// The DTO `version` is `network << 8 | version`, the little-endian pair
/// from the binary header read as one u16.
pub(crate) fn combined_version(network_type: NetworkType, version: u8) -> Value {
    Value::from(u16::from(network_type.value()) << 8 | u16::from(version))
}

pub(crate) fn split_version(obj: &Dto) -> Result<(NetworkType, u8)> {
    let combined: u16 = dto::uint(obj, "version")?;
    Ok((NetworkType::from_value(combined.high())?, combined.low()))
}

/// An all-zero signer is the unsigned placeholder.
pub(crate) fn signer_account(key: PublicKey, network_type: NetworkType) -> Option<PublicAccount> {
    (!key.is_zero()).then(|| PublicAccount::new(key, network_type))
}

fn optional_hex<'a>(obj: &'a Dto, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::account::Address;
    use crate::model::mosaic::{Mosaic, MosaicId};
    use crate::model::transaction::{Message, TransferTransaction};

    const NETWORK: NetworkType = NetworkType::MijinTest;
    const SIGNER: &str = "0EB448D07C7CCB312989AC27AA052738FF589E2F83973F909B506B450DC5C4E2";

    fn transfer() -> Transaction {
        TransferTransaction::create(
            Deadline::new(7),
            Address::create_from_raw_address("SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ").unwrap(),
            vec![Mosaic::new(MosaicId::new(3), 10)],
            Message::plain("hi"),
            NETWORK,
        )
    }

    #[test]
    fn unsigned_header_is_zero_filled() {
        let bytes = transfer().to_catbuffer().unwrap();
        assert_eq!(bytes.len(), transfer().size());
        assert!(bytes[4..100].iter().all(|b| *b == 0));

        let (decoded, rest) = Transaction::from_catbuffer(&bytes).unwrap();
        assert!(rest.is_empty());
        assert!(decoded.signature.is_none());
        assert!(decoded.signer.is_none());
    }

    #[test]
    fn signature_and_signer_land_at_their_offsets() {
        let mut tx = transfer();
        tx.signature = Some(Signature::from_bytes([0x5A; SIGNATURE_LENGTH]));
        tx.signer = Some(PublicAccount::create_from_public_key(SIGNER, NETWORK).unwrap());

        let bytes = tx.to_catbuffer().unwrap();
        assert_eq!(&bytes[4..68], &[0x5A; SIGNATURE_LENGTH][..]);
        assert_eq!(hex::encode_upper(&bytes[68..100]), SIGNER);

        let (decoded, _) = Transaction::from_catbuffer(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }
}
