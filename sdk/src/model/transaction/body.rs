//! The type-specific part of a transaction.
//!
//! Every variant's payload is one struct implementing [`TransactionPayload`].
//! The same struct sits inside both envelopes, [`super::Transaction`]
//! (top-level, signed) and [`super::InnerTransaction`] (embedded in an
//! aggregate), so the payload layout is written exactly once per variant.

use super::account_link::AccountLinkTransaction;
use super::aggregate::AggregateTransaction;
use super::alias::{AddressAliasTransaction, MosaicAliasTransaction};
use super::lock::{HashLockTransaction, SecretLockTransaction, SecretProofTransaction};
use super::mosaic::{MosaicDefinitionTransaction, MosaicSupplyChangeTransaction};
use super::multisig::ModifyMultisigAccountTransaction;
use super::namespace::RegisterNamespaceTransaction;
use super::transfer::TransferTransaction;
use super::TransactionType;
use crate::codec::Dto;
use crate::error::Result;
use crate::model::blockchain::NetworkType;

/// Encode/decode contract for a variant payload.
///
/// Binary field order follows the published catbuffer schema of each
/// variant and is hardcoded in its implementation.
pub trait TransactionPayload: Sized {
    /// Bytes written by [`TransactionPayload::encode_payload`].
    fn payload_size(&self) -> usize;

    fn encode_payload(&self, network_type: NetworkType) -> Result<Vec<u8>>;

    /// Consume one payload from the front of `bytes`, returning the rest.
    fn decode_payload(bytes: &[u8], network_type: NetworkType) -> Result<(Self, &[u8])>;

    /// The variant's camelCase keys, merged into the envelope DTO.
    fn to_dto_specific(&self, network_type: NetworkType) -> Dto;

    fn from_dto_specific(data: &Dto, network_type: NetworkType) -> Result<Self>;
}

/// One payload per transaction type. Both aggregate types share
/// [`AggregateTransaction`]; the variant records which one it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(TransferTransaction),
    RegisterNamespace(RegisterNamespaceTransaction),
    AddressAlias(AddressAliasTransaction),
    MosaicAlias(MosaicAliasTransaction),
    MosaicDefinition(MosaicDefinitionTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
    ModifyMultisigAccount(ModifyMultisigAccountTransaction),
    AggregateComplete(AggregateTransaction),
    AggregateBonded(AggregateTransaction),
    HashLock(HashLockTransaction),
    SecretLock(SecretLockTransaction),
    SecretProof(SecretProofTransaction),
    AccountLink(AccountLinkTransaction),
}

/// Run `$e` with `$p` bound to the payload, whatever the variant.
macro_rules! with_payload {
    ($body:expr, $p:ident => $e:expr) => {
        match $body {
            TransactionBody::Transfer($p) => $e,
            TransactionBody::RegisterNamespace($p) => $e,
            TransactionBody::AddressAlias($p) => $e,
            TransactionBody::MosaicAlias($p) => $e,
            TransactionBody::MosaicDefinition($p) => $e,
            TransactionBody::MosaicSupplyChange($p) => $e,
            TransactionBody::ModifyMultisigAccount($p) => $e,
            TransactionBody::AggregateComplete($p) | TransactionBody::AggregateBonded($p) => $e,
            TransactionBody::HashLock($p) => $e,
            TransactionBody::SecretLock($p) => $e,
            TransactionBody::SecretProof($p) => $e,
            TransactionBody::AccountLink($p) => $e,
        }
    };
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::RegisterNamespace(_) => TransactionType::RegisterNamespace,
            Self::AddressAlias(_) => TransactionType::AddressAlias,
            Self::MosaicAlias(_) => TransactionType::MosaicAlias,
            Self::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            Self::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            Self::ModifyMultisigAccount(_) => TransactionType::ModifyMultisigAccount,
            Self::AggregateComplete(_) => TransactionType::AggregateComplete,
            Self::AggregateBonded(_) => TransactionType::AggregateBonded,
            Self::HashLock(_) => TransactionType::HashLock,
            Self::SecretLock(_) => TransactionType::SecretLock,
            Self::SecretProof(_) => TransactionType::SecretProof,
            Self::AccountLink(_) => TransactionType::AccountLink,
        }
    }

    pub fn payload_size(&self) -> usize {
        with_payload!(self, p => p.payload_size())
    }

    pub fn encode_payload(&self, network_type: NetworkType) -> Result<Vec<u8>> {
        with_payload!(self, p => p.encode_payload(network_type))
    }

    pub fn to_dto_specific(&self, network_type: NetworkType) -> Dto {
        with_payload!(self, p => p.to_dto_specific(network_type))
    }

    pub fn as_aggregate(&self) -> Option<&AggregateTransaction> {
        match self {
            Self::AggregateComplete(aggregate) | Self::AggregateBonded(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub(crate) fn as_aggregate_mut(&mut self) -> Option<&mut AggregateTransaction> {
        match self {
            Self::AggregateComplete(aggregate) | Self::AggregateBonded(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}
