//! Multisig account modification.
//!
//! ```text
//! min_removal_delta:i8  min_approval_delta:i8  count:u8
//! modifications[type:u8, cosignatory:32]*
//! ```

use serde_json::{json, Value};

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Transaction};
use crate::codec::cursor::{count, write_i8, write_u8};
use crate::codec::{dto, Dto, Reader};
use crate::config::PUBLIC_KEY_LENGTH;
use crate::error::Result;
use crate::model::account::PublicAccount;
use crate::model::blockchain::NetworkType;

byte_enum! {
    pub enum MultisigCosignatoryModificationType ("multisig modification type") {
        Add = 0,
        Remove = 1,
    }
}

/// Add or remove one cosignatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisigCosignatoryModification {
    pub modification_type: MultisigCosignatoryModificationType,
    pub cosignatory: PublicAccount,
}

impl MultisigCosignatoryModification {
    pub const CATBUFFER_SIZE: usize = 1 + PUBLIC_KEY_LENGTH;

    pub fn new(
        modification_type: MultisigCosignatoryModificationType,
        cosignatory: PublicAccount,
    ) -> Self {
        Self {
            modification_type,
            cosignatory,
        }
    }

    fn to_dto(self) -> Value {
        json!({
            "type": self.modification_type.to_dto(),
            "cosignatoryPublicKey": self.cosignatory.public_key().to_hex(),
        })
    }

    fn from_dto(data: &Value, network_type: NetworkType) -> Result<Self> {
        let obj = dto::as_object(data, "multisig modification")?;
        Ok(Self {
            modification_type: MultisigCosignatoryModificationType::from_dto(dto::field(obj, "type")?)?,
            cosignatory: PublicAccount::new(dto::public_key(obj, "cosignatoryPublicKey")?, network_type),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMultisigAccountTransaction {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    pub modifications: Vec<MultisigCosignatoryModification>,
}

impl ModifyMultisigAccountTransaction {
    pub fn create(
        deadline: Deadline,
        min_approval_delta: i8,
        min_removal_delta: i8,
        modifications: Vec<MultisigCosignatoryModification>,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::ModifyMultisigAccount(Self {
            min_approval_delta,
            min_removal_delta,
            modifications,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for ModifyMultisigAccountTransaction {
    fn payload_size(&self) -> usize {
        3 + self.modifications.len() * MultisigCosignatoryModification::CATBUFFER_SIZE
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_i8(&mut out, self.min_removal_delta);
        write_i8(&mut out, self.min_approval_delta);
        write_u8(&mut out, count(self.modifications.len(), "modification count")?);
        for modification in &self.modifications {
            write_u8(&mut out, modification.modification_type.value());
            out.extend_from_slice(modification.cosignatory.public_key().as_bytes());
        }
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let min_removal_delta = reader.read_i8()?;
        let min_approval_delta = reader.read_i8()?;
        let modification_count = reader.read_u8()?;
        let mut modifications = Vec::with_capacity(usize::from(modification_count));
        for _ in 0..modification_count {
            let modification_type = MultisigCosignatoryModificationType::from_value(reader.read_u8()?)?;
            let cosignatory = PublicAccount::new(reader.read_public_key()?, network_type);
            modifications.push(MultisigCosignatoryModification::new(modification_type, cosignatory));
        }
        Ok((
            Self {
                min_approval_delta,
                min_removal_delta,
                modifications,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("minRemovalDelta".into(), Value::from(self.min_removal_delta));
        obj.insert("minApprovalDelta".into(), Value::from(self.min_approval_delta));
        obj.insert(
            "modifications".into(),
            Value::Array(self.modifications.iter().map(|m| m.to_dto()).collect()),
        );
        obj
    }

    fn from_dto_specific(data: &Dto, network_type: NetworkType) -> Result<Self> {
        Ok(Self {
            min_removal_delta: dto::int8(data, "minRemovalDelta")?,
            min_approval_delta: dto::int8(data, "minApprovalDelta")?,
            modifications: dto::array(data, "modifications")?
                .iter()
                .map(|m| MultisigCosignatoryModification::from_dto(m, network_type))
                .collect::<Result<_>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;

    fn sample(network_type: NetworkType) -> ModifyMultisigAccountTransaction {
        let a = PublicAccount::new(KeyPair::generate().public_key(), network_type);
        let b = PublicAccount::new(KeyPair::generate().public_key(), network_type);
        ModifyMultisigAccountTransaction {
            min_approval_delta: 2,
            min_removal_delta: -1,
            modifications: vec![
                MultisigCosignatoryModification::new(MultisigCosignatoryModificationType::Add, a),
                MultisigCosignatoryModification::new(MultisigCosignatoryModificationType::Remove, b),
            ],
        }
    }

    #[test]
    fn removal_delta_comes_first() {
        let multisig = sample(NetworkType::MijinTest);
        let bytes = multisig.encode_payload(NetworkType::MijinTest).unwrap();
        assert_eq!(bytes.len(), 3 + 2 * 33);
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[1], 2);
        assert_eq!(bytes[2], 2);
        assert_eq!(bytes[36], 1);
    }

    #[test]
    fn cosignatories_take_the_network_of_the_envelope() {
        let multisig = sample(NetworkType::TestNet);
        let bytes = multisig.encode_payload(NetworkType::TestNet).unwrap();
        let (decoded, _) =
            ModifyMultisigAccountTransaction::decode_payload(&bytes, NetworkType::TestNet).unwrap();
        assert_eq!(decoded, multisig);
        assert!(decoded
            .modifications
            .iter()
            .all(|m| m.cosignatory.network_type() == NetworkType::TestNet));
    }

    #[test]
    fn dto_carries_signed_deltas() {
        let multisig = sample(NetworkType::MijinTest);
        let dto = multisig.to_dto_specific(NetworkType::MijinTest);
        assert_eq!(dto["minRemovalDelta"], -1);
        let decoded =
            ModifyMultisigAccountTransaction::from_dto_specific(&dto, NetworkType::MijinTest).unwrap();
        assert_eq!(decoded, multisig);
    }
}
