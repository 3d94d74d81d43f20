//! Mosaic definition and supply change.
//!
//! ```text
//! definition:    nonce:u32  mosaic_id:u64  properties
//! supply change: mosaic_id:u64  direction:u8  delta:u64
//! ```

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Transaction};
use crate::codec::cursor::{write_u64, write_u8};
use crate::codec::{dto, Dto, FixedWidth, Reader};
use crate::error::Result;
use crate::model::account::PublicAccount;
use crate::model::blockchain::NetworkType;
use crate::model::mosaic::{MosaicId, MosaicNonce, MosaicProperties, MosaicSupplyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicDefinitionTransaction {
    pub nonce: MosaicNonce,
    pub mosaic_id: MosaicId,
    pub properties: MosaicProperties,
}

impl MosaicDefinitionTransaction {
    /// The mosaic id is derived from `nonce` and the owner's public key.
    pub fn create(
        deadline: Deadline,
        nonce: MosaicNonce,
        owner: &PublicAccount,
        properties: MosaicProperties,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::MosaicDefinition(Self {
            nonce,
            mosaic_id: MosaicId::create_from_nonce(nonce, owner.public_key()),
            properties,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for MosaicDefinitionTransaction {
    fn payload_size(&self) -> usize {
        4 + 8 + self.properties.catbuffer_size()
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        out.extend_from_slice(self.nonce.as_bytes());
        write_u64(&mut out, self.mosaic_id.id());
        self.properties.write(&mut out);
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let nonce = MosaicNonce::new(reader.read_array()?);
        let mosaic_id = MosaicId::new(reader.read_u64()?);
        let properties = MosaicProperties::read(&mut reader)?;
        Ok((
            Self {
                nonce,
                mosaic_id,
                properties,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("nonce".into(), self.nonce.to_u32().to_dto());
        obj.insert("mosaicId".into(), self.mosaic_id.to_dto());
        obj.insert("properties".into(), self.properties.to_dto());
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            nonce: MosaicNonce::create_from_u32(dto::uint(data, "nonce")?),
            mosaic_id: MosaicId::from_dto(dto::field(data, "mosaicId")?)?,
            properties: MosaicProperties::from_dto(dto::field(data, "properties")?)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicSupplyChangeTransaction {
    pub mosaic_id: MosaicId,
    pub direction: MosaicSupplyType,
    pub delta: u64,
}

impl MosaicSupplyChangeTransaction {
    pub fn create(
        deadline: Deadline,
        mosaic_id: MosaicId,
        direction: MosaicSupplyType,
        delta: u64,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::MosaicSupplyChange(Self {
            mosaic_id,
            direction,
            delta,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for MosaicSupplyChangeTransaction {
    fn payload_size(&self) -> usize {
        8 + MosaicSupplyType::CATBUFFER_SIZE + 8
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u64(&mut out, self.mosaic_id.id());
        write_u8(&mut out, self.direction.value());
        write_u64(&mut out, self.delta);
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let mosaic_id = MosaicId::new(reader.read_u64()?);
        let direction = MosaicSupplyType::from_value(reader.read_u8()?)?;
        let delta = reader.read_u64()?;
        Ok((
            Self {
                mosaic_id,
                direction,
                delta,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("mosaicId".into(), self.mosaic_id.to_dto());
        obj.insert("direction".into(), self.direction.to_dto());
        obj.insert("delta".into(), self.delta.to_dto());
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            mosaic_id: MosaicId::from_dto(dto::field(data, "mosaicId")?)?,
            direction: MosaicSupplyType::from_dto(dto::field(data, "direction")?)?,
            delta: dto::uint(data, "delta")?,
        })
    }
}
