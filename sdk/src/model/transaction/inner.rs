//! Embedded transactions: the envelope used inside aggregates.
//!
//! ```text
//! [size:u32][signer:32][version:u8][network:u8][type:u16][payload...]
//! ```
//!
//! No signature, fee or deadline; those belong to the enclosing aggregate.

use serde_json::{Map, Value};

use super::body::TransactionBody;
use super::envelope::{combined_version, split_version};
use super::{registry, TransactionInfo, TransactionType};
use crate::codec::cursor::{count, write_u16, write_u32, write_u8};
use crate::codec::dto;
use crate::codec::Reader;
use crate::config::EMBEDDED_HEADER_SIZE;
use crate::error::{Error, Result};
use crate::model::account::PublicAccount;
use crate::model::blockchain::NetworkType;

/// A transaction as it appears inside an aggregate. The signer is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerTransaction {
    pub network_type: NetworkType,
    pub version: u8,
    pub signer: PublicAccount,
    pub transaction_info: Option<TransactionInfo>,
    pub body: TransactionBody,
}

impl InnerTransaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn size(&self) -> usize {
        EMBEDDED_HEADER_SIZE + self.body.payload_size()
    }

    pub fn to_catbuffer(&self) -> Result<Vec<u8>> {
        let size = self.size();
        let mut out = Vec::with_capacity(size);
        write_u32(&mut out, count(size, "embedded transaction size")?);
        out.extend_from_slice(self.signer.public_key().as_bytes());
        write_u8(&mut out, self.version);
        write_u8(&mut out, self.network_type.value());
        write_u16(&mut out, self.transaction_type().code());
        out.extend_from_slice(&self.body.encode_payload(self.network_type)?);
        debug_assert_eq!(out.len(), size);
        Ok(out)
    }

    /// Decode one embedded transaction from the front of `bytes`.
    pub fn from_catbuffer(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let size = Reader::new(bytes).read_u32()? as usize;
        if size < EMBEDDED_HEADER_SIZE {
            return Err(Error::MalformedPayload(format!(
                "embedded size {size} is smaller than the {EMBEDDED_HEADER_SIZE}-byte header"
            )));
        }
        if bytes.len() < size {
            return Err(Error::truncated(size, bytes.len()));
        }
        let (own, rest) = bytes.split_at(size);

        let mut reader = Reader::new(&own[4..]);
        let signer = reader.read_public_key()?;
        let version = reader.read_u8()?;
        let network_type = NetworkType::from_value(reader.read_u8()?)?;
        let code = reader.read_u16()?;

        let decoders = registry::embedded().get(code)?;
        let (body, leftover) = (decoders.catbuffer)(reader.remaining(), network_type)?;
        if !leftover.is_empty() {
            return Err(Error::MalformedPayload(format!(
                "embedded size {size} leaves {} payload bytes unread",
                leftover.len()
            )));
        }

        Ok((
            Self {
                network_type,
                version,
                signer: PublicAccount::new(signer, network_type),
                transaction_info: None,
                body,
            },
            rest,
        ))
    }

    pub fn to_dto(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("signer".into(), Value::from(self.signer.public_key().to_hex()));
        obj.insert("version".into(), combined_version(self.network_type, self.version));
        obj.insert("type".into(), Value::from(self.transaction_type().code()));
        obj.extend(self.body.to_dto_specific(self.network_type));
        Value::Object(obj)
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "embedded transaction")?;
        let code: u16 = dto::uint(obj, "type")?;
        let decoders = registry::embedded().get(code)?;
        let (network_type, version) = split_version(obj)?;
        Ok(Self {
            network_type,
            version,
            signer: PublicAccount::new(dto::public_key(obj, "signer")?, network_type),
            transaction_info: None,
            body: (decoders.dto)(obj, network_type)?,
        })
    }
}
