//! Metadata a node attaches to transactions it has seen.

use serde_json::{Map, Value};

use crate::codec::dto::{self, Dto};
use crate::codec::FixedWidth;
use crate::error::Result;

/// The `meta` object of a transaction response.
///
/// Top-level transactions carry `hash` and `merkleComponentHash`; inner
/// transactions of an aggregate carry `aggregateHash` and `aggregateId`
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionInfo {
    pub height: u64,
    pub index: u32,
    pub id: String,
    pub hash: Option<String>,
    pub merkle_component_hash: Option<String>,
    pub aggregate_hash: Option<String>,
    pub aggregate_id: Option<String>,
}

impl TransactionInfo {
    /// Unconfirmed transactions report height zero.
    pub fn is_unconfirmed(&self) -> bool {
        self.height == 0
    }

    pub fn is_confirmed(&self) -> bool {
        self.height > 0
    }

    pub fn is_aggregate_inner(&self) -> bool {
        self.aggregate_hash.is_some()
    }

    pub fn to_dto(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("height".into(), self.height.to_dto());
        obj.insert("index".into(), self.index.to_dto());
        obj.insert("id".into(), Value::from(self.id.clone()));
        let optional = [
            ("hash", &self.hash),
            ("merkleComponentHash", &self.merkle_component_hash),
            ("aggregateHash", &self.aggregate_hash),
            ("aggregateId", &self.aggregate_id),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                obj.insert(key.into(), Value::from(value.clone()));
            }
        }
        Value::Object(obj)
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "transaction meta")?;
        Ok(Self {
            height: dto::uint(obj, "height")?,
            index: dto::uint(obj, "index")?,
            id: dto::string(obj, "id")?.to_string(),
            hash: optional_string(obj, "hash")?,
            merkle_component_hash: optional_string(obj, "merkleComponentHash")?,
            aggregate_hash: optional_string(obj, "aggregateHash")?,
            aggregate_id: optional_string(obj, "aggregateId")?,
        })
    }
}

fn optional_string(obj: &Dto, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => Ok(Some(dto::string(obj, key)?.to_string())),
    }
}
