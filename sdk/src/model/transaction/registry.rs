//! # Transaction Registry
//!
//! Maps a transaction-type code to the pair of functions that decode its
//! payload: one from catbuffer, one from a DTO. There are two tables:
//!
//! - **top-level**: every type, used for signed envelopes.
//! - **embedded**: every type except the aggregates, used for the inner
//!   transactions of an aggregate.
//!
//! Both tables are built once, on first use or by an explicit [`init`], and
//! are immutable afterwards. Lookups are lock-free reads of a
//! `OnceLock`-guarded map, safe from any thread.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::account_link::AccountLinkTransaction;
use super::aggregate::AggregateTransaction;
use super::alias::{AddressAliasTransaction, MosaicAliasTransaction};
use super::body::{TransactionBody, TransactionPayload};
use super::lock::{HashLockTransaction, SecretLockTransaction, SecretProofTransaction};
use super::mosaic::{MosaicDefinitionTransaction, MosaicSupplyChangeTransaction};
use super::multisig::ModifyMultisigAccountTransaction;
use super::namespace::RegisterNamespaceTransaction;
use super::transfer::TransferTransaction;
use super::TransactionType;
use crate::codec::Dto;
use crate::error::{Error, Result};
use crate::model::blockchain::NetworkType;

/// Decode a payload from the front of a buffer; returns the unconsumed rest.
pub type CatbufferDecoder = for<'a> fn(&'a [u8], NetworkType) -> Result<(TransactionBody, &'a [u8])>;

pub type DtoDecoder = fn(&Dto, NetworkType) -> Result<TransactionBody>;

/// The decoders registered for one transaction type.
#[derive(Clone, Copy)]
pub struct Decoders {
    pub catbuffer: CatbufferDecoder,
    pub dto: DtoDecoder,
}

/// An immutable code -> decoders table.
pub struct Registry {
    name: &'static str,
    table: HashMap<u16, Decoders>,
}

impl Registry {
    /// Decoders for `code`, or a lookup error naming the code.
    pub fn get(&self, code: u16) -> Result<&Decoders> {
        self.table.get(&code).ok_or_else(|| {
            tracing::debug!(registry = self.name, code, "unregistered transaction type");
            Error::unknown_transaction_type(code)
        })
    }

    /// Whether `transaction_type` has decoders here.
    pub fn contains(&self, transaction_type: TransactionType) -> bool {
        self.table.contains_key(&transaction_type.code())
    }

    /// Number of registered type codes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Registers `$variant` of [`TransactionBody`] with payload type `$payload`.
macro_rules! register {
    ($table:expr, $variant:ident => $payload:ty) => {{
        fn catbuffer(bytes: &[u8], network_type: NetworkType) -> Result<(TransactionBody, &[u8])> {
            let (payload, rest) = <$payload as TransactionPayload>::decode_payload(bytes, network_type)?;
            Ok((TransactionBody::$variant(payload), rest))
        }

        fn dto(data: &Dto, network_type: NetworkType) -> Result<TransactionBody> {
            let payload = <$payload as TransactionPayload>::from_dto_specific(data, network_type)?;
            Ok(TransactionBody::$variant(payload))
        }

        $table.insert(TransactionType::$variant.code(), Decoders { catbuffer, dto });
    }};
}

fn build(name: &'static str, embedded: bool) -> Registry {
    let mut table = HashMap::new();
    register!(table, Transfer => TransferTransaction);
    register!(table, RegisterNamespace => RegisterNamespaceTransaction);
    register!(table, AddressAlias => AddressAliasTransaction);
    register!(table, MosaicAlias => MosaicAliasTransaction);
    register!(table, MosaicDefinition => MosaicDefinitionTransaction);
    register!(table, MosaicSupplyChange => MosaicSupplyChangeTransaction);
    register!(table, ModifyMultisigAccount => ModifyMultisigAccountTransaction);
    register!(table, HashLock => HashLockTransaction);
    register!(table, SecretLock => SecretLockTransaction);
    register!(table, SecretProof => SecretProofTransaction);
    register!(table, AccountLink => AccountLinkTransaction);
    if !embedded {
        register!(table, AggregateComplete => AggregateTransaction);
        register!(table, AggregateBonded => AggregateTransaction);
    }
    tracing::debug!(registry = name, types = table.len(), "transaction registry initialized");
    Registry { name, table }
}

static TOP_LEVEL: OnceLock<Registry> = OnceLock::new();
static EMBEDDED: OnceLock<Registry> = OnceLock::new();

/// Decoders for signed, top-level transactions.
pub fn top_level() -> &'static Registry {
    TOP_LEVEL.get_or_init(|| build("top-level", false))
}

/// Decoders for transactions embedded in an aggregate.
pub fn embedded() -> &'static Registry {
    EMBEDDED.get_or_init(|| build("embedded", true))
}

/// Build both tables now instead of on first decode. Idempotent.
pub fn init() {
    top_level();
    embedded();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_has_every_type() {
        let registry = top_level();
        assert_eq!(registry.len(), TransactionType::ALL.len());
        for t in TransactionType::ALL {
            assert!(registry.contains(t), "{t} missing");
        }
    }

    #[test]
    fn embedded_excludes_aggregates() {
        let registry = embedded();
        assert!(!registry.contains(TransactionType::AggregateComplete));
        assert!(!registry.contains(TransactionType::AggregateBonded));
        assert!(registry.contains(TransactionType::Transfer));
        assert_eq!(registry.len(), TransactionType::ALL.len() - 2);
    }

    #[test]
    fn init_is_idempotent() {
        init();
        let first = top_level() as *const Registry;
        init();
        assert_eq!(first, top_level() as *const Registry);
    }

    #[test]
    fn unknown_code_is_lookup_error() {
        let err = top_level().get(0x1234).err().unwrap();
        assert!(matches!(err, Error::Lookup { .. }));
        assert!(err.to_string().contains("0x1234"));
    }
}
