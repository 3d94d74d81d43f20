//! Namespace registration.
//!
//! ```text
//! namespace_type:u8  (duration:u64 | parent_id:u64)  namespace_id:u64
//! name_size:u8  name
//! ```

use serde_json::Value;

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Transaction};
use crate::codec::cursor::{count, write_u64, write_u8};
use crate::codec::{dto, Dto, FixedWidth, Reader};
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;
use crate::model::namespace::{NamespaceId, NamespaceType};

/// What the 8 bytes after the type byte mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceRegistration {
    /// A root namespace rented for `duration` blocks.
    Root { duration: u64 },
    /// A child of an existing namespace; inherits the parent's lease.
    Sub { parent_id: NamespaceId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNamespaceTransaction {
    pub registration: NamespaceRegistration,
    pub namespace_id: NamespaceId,
    pub name: String,
}

impl RegisterNamespaceTransaction {
    pub fn create_root_namespace(
        deadline: Deadline,
        name: &str,
        duration: u64,
        network_type: NetworkType,
    ) -> Result<Transaction> {
        let namespace_id = NamespaceId::from_name(name)?;
        if name.contains('.') {
            return Err(Error::Validation(format!("{name} is not a root namespace name")));
        }
        let body = TransactionBody::RegisterNamespace(Self {
            registration: NamespaceRegistration::Root { duration },
            namespace_id,
            name: name.to_string(),
        });
        Ok(Transaction::new(network_type, deadline, body))
    }

    /// `parent` is the full name of the parent, e.g. `cat` for `cat.currency`.
    pub fn create_sub_namespace(
        deadline: Deadline,
        name: &str,
        parent: &str,
        network_type: NetworkType,
    ) -> Result<Transaction> {
        let parent_id = NamespaceId::from_name(parent)?;
        let namespace_id = NamespaceId::from_name(&format!("{parent}.{name}"))?;
        let body = TransactionBody::RegisterNamespace(Self {
            registration: NamespaceRegistration::Sub { parent_id },
            namespace_id,
            name: name.to_string(),
        });
        Ok(Transaction::new(network_type, deadline, body))
    }

    pub fn namespace_type(&self) -> NamespaceType {
        match self.registration {
            NamespaceRegistration::Root { .. } => NamespaceType::Root,
            NamespaceRegistration::Sub { .. } => NamespaceType::Sub,
        }
    }
}

impl TransactionPayload for RegisterNamespaceTransaction {
    fn payload_size(&self) -> usize {
        1 + 8 + 8 + 1 + self.name.len()
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        write_u8(&mut out, self.namespace_type().value());
        match self.registration {
            NamespaceRegistration::Root { duration } => write_u64(&mut out, duration),
            NamespaceRegistration::Sub { parent_id } => write_u64(&mut out, parent_id.id()),
        }
        write_u64(&mut out, self.namespace_id.id());
        write_u8(&mut out, count(self.name.len(), "namespace name length")?);
        out.extend_from_slice(self.name.as_bytes());
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let namespace_type = NamespaceType::from_value(reader.read_u8()?)?;
        let value = reader.read_u64()?;
        let registration = match namespace_type {
            NamespaceType::Root => NamespaceRegistration::Root { duration: value },
            NamespaceType::Sub => NamespaceRegistration::Sub {
                parent_id: NamespaceId::new(value),
            },
        };
        let namespace_id = NamespaceId::new(reader.read_u64()?);
        let name_size = reader.read_u8()?;
        let name = String::from_utf8(reader.take(usize::from(name_size))?.to_vec())
            .map_err(|e| Error::MalformedPayload(format!("namespace name is not utf-8: {e}")))?;
        Ok((
            Self {
                registration,
                namespace_id,
                name,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("namespaceType".into(), self.namespace_type().to_dto());
        match self.registration {
            NamespaceRegistration::Root { duration } => {
                obj.insert("duration".into(), duration.to_dto());
            }
            NamespaceRegistration::Sub { parent_id } => {
                obj.insert("parentId".into(), parent_id.to_dto());
            }
        }
        obj.insert("namespaceId".into(), self.namespace_id.to_dto());
        obj.insert("name".into(), Value::from(self.name.clone()));
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        let registration = match NamespaceType::from_dto(dto::field(data, "namespaceType")?)? {
            NamespaceType::Root => NamespaceRegistration::Root {
                duration: dto::uint(data, "duration")?,
            },
            NamespaceType::Sub => NamespaceRegistration::Sub {
                parent_id: NamespaceId::from_dto(dto::field(data, "parentId")?)?,
            },
        };
        Ok(Self {
            registration,
            namespace_id: NamespaceId::from_dto(dto::field(data, "namespaceId")?)?,
            name: dto::string(data, "name")?.to_string(),
        })
    }
}
