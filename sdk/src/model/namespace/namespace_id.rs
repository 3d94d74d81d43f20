//! Namespace identifiers.
//!
//! Ids are derived from the dot-separated name, one level at a time:
//! `SHA3-256(parent_id_le || level_name)`, first eight bytes read as a
//! little-endian `u64`, with the top bit forced on. Root levels use parent 0.

use serde_json::Value;
use std::fmt;

use crate::codec::FixedWidth;
use crate::config::{NAMESPACE_FLAG, NAMESPACE_MAX_DEPTH, NAMESPACE_MAX_PART_LENGTH};
use crate::crypto::hash::sha3_256_multi;
use crate::crypto::keys::strip_hex_prefix;
use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    /// Id of the last level of a full name such as `cat.currency`.
    pub fn from_name(full_name: &str) -> Result<Self> {
        let path = Self::path(full_name)?;
        path.last()
            .copied()
            .ok_or_else(|| Error::Validation("empty namespace name".into()))
    }

    /// Ids of every level of a full name, root first.
    pub fn path(full_name: &str) -> Result<Vec<Self>> {
        let parts: Vec<&str> = full_name.split('.').collect();
        if parts.len() > NAMESPACE_MAX_DEPTH {
            return Err(Error::Validation(format!(
                "{full_name}: too many parts (max {NAMESPACE_MAX_DEPTH})"
            )));
        }

        let mut parent = Self(0);
        let mut path = Vec::with_capacity(parts.len());
        for part in parts {
            validate_part(part)?;
            parent = Self::generate(parent, part);
            path.push(parent);
        }
        Ok(path)
    }

    /// Id of `name` under `parent`. Does not validate the name.
    pub fn generate(parent: NamespaceId, name: &str) -> Self {
        let digest = sha3_256_multi(&[&parent.0.to_le_bytes(), name.as_bytes()]);
        let mut low = [0u8; 8];
        low.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(low) | NAMESPACE_FLAG)
    }

    /// Parse 16 hex digits, most significant first.
    pub fn from_hex(text: &str) -> Result<Self> {
        u64::from_str_radix(strip_hex_prefix(text), 16)
            .map(Self)
            .map_err(|e| Error::Validation(format!("{text} is not a namespace id: {e}")))
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }

    pub fn to_dto(self) -> Value {
        self.0.to_dto()
    }

    pub fn from_dto(dto: &Value) -> Result<Self> {
        u64::from_dto(dto).map(Self)
    }
}

fn validate_part(part: &str) -> Result<()> {
    let mut chars = part.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let tail_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !head_ok || !tail_ok || part.len() > NAMESPACE_MAX_PART_LENGTH {
        return Err(Error::Validation(format!("invalid namespace name part `{part}`")));
    }
    Ok(())
}

impl From<u64> for NamespaceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_ids() {
        assert_eq!(NamespaceId::from_name("nem").unwrap().id(), 0x84B3_552D_375F_FA4B);
        assert_eq!(
            NamespaceId::from_name("cat.currency").unwrap().id(),
            0x85BB_EA6C_C462_B244
        );
    }

    #[test]
    fn path_lists_each_level() {
        let path = NamespaceId::path("cat.currency").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].id(), 0xB149_7F5F_BA65_1B4F);
        assert_eq!(path[1], NamespaceId::generate(path[0], "currency"));
        assert!(path.iter().all(|id| id.id() & NAMESPACE_FLAG != 0));
    }

    #[test]
    fn rejects_bad_names() {
        assert!(NamespaceId::from_name("a.b.c.d").is_err());
        assert!(NamespaceId::from_name("Upper").is_err());
        assert!(NamespaceId::from_name("_lead").is_err());
        assert!(NamespaceId::from_name("a..b").is_err());
        assert!(NamespaceId::from_name(&"a".repeat(65)).is_err());
        assert!(NamespaceId::from_name("ok-name_1.sub").is_ok());
    }

    #[test]
    fn text_and_dto_forms() {
        let id = NamespaceId::new(0x85BB_EA6C_C462_B244);
        assert_eq!(id.to_hex(), "85BBEA6CC462B244");
        assert_eq!(NamespaceId::from_hex("0x85bbea6cc462b244").unwrap(), id);
        assert_eq!(id.to_dto(), json!([0xC462_B244u32, 0x85BB_EA6Cu32]));
        assert_eq!(NamespaceId::from_dto(&id.to_dto()).unwrap(), id);
    }
}
