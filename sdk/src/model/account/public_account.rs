use serde_json::{json, Value};

use super::Address;
use crate::codec::dto;
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;

/// A public key together with the address it maps to on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicAccount {
    public_key: PublicKey,
    address: Address,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network_type: NetworkType) -> Self {
        Self {
            public_key,
            address: Address::create_from_public_key(&public_key, network_type),
        }
    }

    /// From hex text; the key must be exactly 32 bytes.
    pub fn create_from_public_key(public_key: &str, network_type: NetworkType) -> Result<Self> {
        let key = PublicKey::from_hex(public_key)
            .map_err(|_| Error::Validation(format!("{public_key} is not a valid public key")))?;
        Ok(Self::new(key, network_type))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }

    pub fn verify_signature(&self, data: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(data, signature)
    }

    pub fn to_dto(&self) -> Value {
        json!({
            "publicKey": self.public_key.to_hex(),
            "address": self.address.to_dto(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "public account")?;
        let address = Address::from_dto(dto::field(obj, "address")?)?;
        let account = Self::new(dto::public_key(obj, "publicKey")?, address.network_type());
        if account.address != address {
            return Err(Error::Validation(format!(
                "address {address} does not belong to public key {}",
                account.public_key
            )));
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;

    const PUBLIC_KEY: &str = "0EB448D07C7CCB312989AC27AA052738FF589E2F83973F909B506B450DC5C4E2";

    #[test]
    fn address_follows_key_and_network() {
        let account = PublicAccount::create_from_public_key(PUBLIC_KEY, NetworkType::MijinTest).unwrap();
        assert_eq!(account.address().plain(), "SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ");
        assert_eq!(account.network_type(), NetworkType::MijinTest);
    }

    #[test]
    fn verifies_signatures_from_its_key() {
        let pair = KeyPair::generate();
        let account = PublicAccount::new(pair.public_key(), NetworkType::MainNet);
        let sig = pair.sign(b"catapult");
        assert!(account.verify_signature(b"catapult", &sig));
        assert!(!account.verify_signature(b"other", &sig));
    }

    #[test]
    fn dto_round_trip_checks_consistency() {
        let account = PublicAccount::create_from_public_key(PUBLIC_KEY, NetworkType::MijinTest).unwrap();
        assert_eq!(PublicAccount::from_dto(&account.to_dto()).unwrap(), account);

        let mut tampered = account.to_dto();
        tampered["publicKey"] = json!("11".repeat(32));
        assert!(PublicAccount::from_dto(&tampered).is_err());
    }

    #[test]
    fn short_key_is_validation_error() {
        assert!(matches!(
            PublicAccount::create_from_public_key("0EB448", NetworkType::MijinTest),
            Err(Error::Validation(_))
        ));
    }
}
