//! Delegated harvesting link: `remote_account_key:32  link_action:u8`.

use serde_json::Value;

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Transaction};
use crate::codec::cursor::write_u8;
use crate::codec::{dto, Dto, Reader};
use crate::crypto::keys::PublicKey;
use crate::error::Result;
use crate::model::blockchain::NetworkType;

byte_enum! {
    pub enum LinkAction ("link action") {
        Link = 0,
        Unlink = 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLinkTransaction {
    pub remote_account_key: PublicKey,
    pub link_action: LinkAction,
}

impl AccountLinkTransaction {
    pub fn create(
        deadline: Deadline,
        remote_account_key: PublicKey,
        link_action: LinkAction,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::AccountLink(Self {
            remote_account_key,
            link_action,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for AccountLinkTransaction {
    fn payload_size(&self) -> usize {
        32 + LinkAction::CATBUFFER_SIZE
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        out.extend_from_slice(self.remote_account_key.as_bytes());
        write_u8(&mut out, self.link_action.value());
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let remote_account_key = reader.read_public_key()?;
        let link_action = LinkAction::from_value(reader.read_u8()?)?;
        Ok((
            Self {
                remote_account_key,
                link_action,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("remoteAccountKey".into(), Value::from(self.remote_account_key.to_hex()));
        obj.insert("linkAction".into(), self.link_action.to_dto());
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            remote_account_key: dto::public_key(data, "remoteAccountKey")?,
            link_action: LinkAction::from_dto(dto::field(data, "linkAction")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;

    #[test]
    fn layout_and_dto() {
        let link = AccountLinkTransaction {
            remote_account_key: KeyPair::generate().public_key(),
            link_action: LinkAction::Unlink,
        };
        let bytes = link.encode_payload(NetworkType::MijinTest).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(&bytes[..32], link.remote_account_key.as_bytes());
        assert_eq!(bytes[32], 1);

        let dto = link.to_dto_specific(NetworkType::MijinTest);
        assert_eq!(dto["linkAction"], 1);
        assert_eq!(
            AccountLinkTransaction::from_dto_specific(&dto, NetworkType::MijinTest).unwrap(),
            link
        );
    }
}
