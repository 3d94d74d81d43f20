//! Namespace aliases for addresses and mosaics.
//!
//! ```text
//! address alias: action:u8  namespace_id:u64  address:25
//! mosaic alias:  action:u8  namespace_id:u64  mosaic_id:u64
//! ```

use serde_json::Value;

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Transaction};
use crate::codec::cursor::{write_u64, write_u8};
use crate::codec::{dto, Dto, Reader};
use crate::error::Result;
use crate::model::account::Address;
use crate::model::blockchain::NetworkType;
use crate::model::mosaic::MosaicId;
use crate::model::namespace::{AliasActionType, NamespaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressAliasTransaction {
    pub action_type: AliasActionType,
    pub namespace_id: NamespaceId,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicAliasTransaction {
    pub action_type: AliasActionType,
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
}

impl AddressAliasTransaction {
    pub fn create(
        deadline: Deadline,
        action_type: AliasActionType,
        namespace_id: NamespaceId,
        address: Address,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::AddressAlias(Self {
            action_type,
            namespace_id,
            address,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl MosaicAliasTransaction {
    pub fn create(
        deadline: Deadline,
        action_type: AliasActionType,
        namespace_id: NamespaceId,
        mosaic_id: MosaicId,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::MosaicAlias(Self {
            action_type,
            namespace_id,
            mosaic_id,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for AddressAliasTransaction {
    fn payload_size(&self) -> usize {
        AliasActionType::CATBUFFER_SIZE + 8 + Address::CATBUFFER_SIZE
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u8(&mut out, self.action_type.value());
        write_u64(&mut out, self.namespace_id.id());
        out.extend_from_slice(self.address.encoded());
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let action_type = AliasActionType::from_value(reader.read_u8()?)?;
        let namespace_id = NamespaceId::new(reader.read_u64()?);
        let address = Address::read(&mut reader)?;
        Ok((
            Self {
                action_type,
                namespace_id,
                address,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("aliasAction".into(), self.action_type.to_dto());
        obj.insert("namespaceId".into(), self.namespace_id.to_dto());
        obj.insert("address".into(), Value::from(self.address.to_hex()));
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            action_type: AliasActionType::from_dto(dto::field(data, "aliasAction")?)?,
            namespace_id: NamespaceId::from_dto(dto::field(data, "namespaceId")?)?,
            address: Address::from_hex(dto::string(data, "address")?)?,
        })
    }
}

impl TransactionPayload for MosaicAliasTransaction {
    fn payload_size(&self) -> usize {
        AliasActionType::CATBUFFER_SIZE + 8 + 8
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u8(&mut out, self.action_type.value());
        write_u64(&mut out, self.namespace_id.id());
        write_u64(&mut out, self.mosaic_id.id());
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let action_type = AliasActionType::from_value(reader.read_u8()?)?;
        let namespace_id = NamespaceId::new(reader.read_u64()?);
        let mosaic_id = MosaicId::new(reader.read_u64()?);
        Ok((
            Self {
                action_type,
                namespace_id,
                mosaic_id,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("aliasAction".into(), self.action_type.to_dto());
        obj.insert("namespaceId".into(), self.namespace_id.to_dto());
        obj.insert("mosaicId".into(), self.mosaic_id.to_dto());
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            action_type: AliasActionType::from_dto(dto::field(data, "aliasAction")?)?,
            namespace_id: NamespaceId::from_dto(dto::field(data, "namespaceId")?)?,
            mosaic_id: MosaicId::from_dto(dto::field(data, "mosaicId")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn mosaic_alias_layout() {
        let alias = MosaicAliasTransaction {
            action_type: AliasActionType::Unlink,
            namespace_id: NamespaceId::new(0x85BB_EA6C_C462_B244),
            mosaic_id: MosaicId::new(0x0DC6_7FBE_1CAD_29E3),
        };
        let bytes = alias.encode_payload(NetworkType::MijinTest).unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..9], &0x85BB_EA6C_C462_B244u64.to_le_bytes());
        let (decoded, rest) = MosaicAliasTransaction::decode_payload(&bytes, NetworkType::MijinTest).unwrap();
        assert_eq!(decoded, alias);
        assert!(rest.is_empty());
    }

    #[test]
    fn address_alias_dto_uses_hex_address() {
        let address = Address::create_from_raw_address("SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ").unwrap();
        let alias = AddressAliasTransaction {
            action_type: AliasActionType::Link,
            namespace_id: NamespaceId::new(7),
            address,
        };
        let dto = alias.to_dto_specific(NetworkType::MijinTest);
        assert_eq!(dto["address"], json!(address.to_hex()));
        assert_eq!(dto["aliasAction"], json!(0));
        assert_eq!(
            AddressAliasTransaction::from_dto_specific(&dto, NetworkType::MijinTest).unwrap(),
            alias
        );
    }

    #[test]
    fn bad_action_is_lookup_error() {
        let mut bytes = vec![9u8];
        bytes.extend_from_slice(&[0; 16]);
        let err = MosaicAliasTransaction::decode_payload(&bytes, NetworkType::MijinTest).unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
    }
}
