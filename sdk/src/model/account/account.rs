//! Accounts that hold a private key and can sign.

use std::fmt;

use super::{Address, PublicAccount};
use crate::config::HASH_LENGTH;
use crate::crypto::keys::{KeyPair, PublicKey, Signature};
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;
use crate::model::transaction::{CosignatureSignedTransaction, CosignatureTransaction, SignedTransaction, Transaction};

/// A key pair bound to a network.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    key_pair: KeyPair,
    public_account: PublicAccount,
}

impl Account {
    pub fn new(key_pair: KeyPair, network_type: NetworkType) -> Self {
        let public_account = PublicAccount::new(key_pair.public_key(), network_type);
        Self {
            key_pair,
            public_account,
        }
    }

    /// From a hex private key.
    pub fn create_from_private_key(private_key: &str, network_type: NetworkType) -> Result<Self> {
        let key_pair = KeyPair::from_hex(private_key)
            .map_err(|e| Error::Validation(format!("invalid private key: {e}")))?;
        Ok(Self::new(key_pair, network_type))
    }

    pub fn generate_new_account(network_type: NetworkType) -> Self {
        Self::new(KeyPair::generate(), network_type)
    }

    pub fn address(&self) -> &Address {
        self.public_account.address()
    }

    pub fn public_key(&self) -> &PublicKey {
        self.public_account.public_key()
    }

    pub fn public_account(&self) -> &PublicAccount {
        &self.public_account
    }

    pub fn network_type(&self) -> NetworkType {
        self.public_account.network_type()
    }

    pub fn private_key_hex(&self) -> String {
        self.key_pair.private_key_hex()
    }

    pub fn sign(&self, transaction: &Transaction, generation_hash: &[u8; HASH_LENGTH]) -> Result<SignedTransaction> {
        transaction.sign(self, generation_hash)
    }

    pub fn sign_transaction_with_cosignatories(
        &self,
        transaction: &Transaction,
        cosigners: &[&Account],
        generation_hash: &[u8; HASH_LENGTH],
    ) -> Result<SignedTransaction> {
        transaction.sign_with_cosignatories(self, cosigners, generation_hash)
    }

    pub fn sign_cosignature_transaction(
        &self,
        cosignature: &CosignatureTransaction,
    ) -> Result<CosignatureSignedTransaction> {
        cosignature.sign_with(self)
    }

    /// Raw Ed25519 (SHA3-512) signature over `data`.
    pub fn sign_data(&self, data: &[u8]) -> Signature {
        self.key_pair.sign(data)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.address())
    }
}
