//! Transaction discriminants and wire versions.

use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The 16-bit type code at offset 102 (top-level) or 38 (embedded) of
/// every transaction, and the `type` key of every transaction DTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TransactionType {
    Transfer = 0x4154,
    RegisterNamespace = 0x414E,
    AddressAlias = 0x424E,
    MosaicAlias = 0x434E,
    MosaicDefinition = 0x414D,
    MosaicSupplyChange = 0x424D,
    ModifyMultisigAccount = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
    HashLock = 0x4148,
    SecretLock = 0x4152,
    SecretProof = 0x4252,
    AccountLink = 0x414C,
}

/// Wire version byte of a transaction layout.
pub type TransactionVersion = u8;

impl TransactionType {
    pub const ALL: [TransactionType; 13] = [
        Self::Transfer,
        Self::RegisterNamespace,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::ModifyMultisigAccount,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::HashLock,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountLink,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| Error::unknown_transaction_type(code))
    }

    /// The layout version this crate reads and writes for the type.
    pub fn version(self) -> TransactionVersion {
        match self {
            Self::Transfer | Self::MosaicDefinition | Self::ModifyMultisigAccount => 3,
            Self::RegisterNamespace
            | Self::MosaicSupplyChange
            | Self::AggregateComplete
            | Self::AggregateBonded
            | Self::AccountLink => 2,
            Self::AddressAlias
            | Self::MosaicAlias
            | Self::HashLock
            | Self::SecretLock
            | Self::SecretProof => 1,
        }
    }

    /// Aggregates cannot be nested inside other aggregates.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "TRANSFER",
            Self::RegisterNamespace => "REGISTER_NAMESPACE",
            Self::AddressAlias => "ADDRESS_ALIAS",
            Self::MosaicAlias => "MOSAIC_ALIAS",
            Self::MosaicDefinition => "MOSAIC_DEFINITION",
            Self::MosaicSupplyChange => "MOSAIC_SUPPLY_CHANGE",
            Self::ModifyMultisigAccount => "MODIFY_MULTISIG_ACCOUNT",
            Self::AggregateComplete => "AGGREGATE_COMPLETE",
            Self::AggregateBonded => "AGGREGATE_BONDED",
            Self::HashLock => "LOCK",
            Self::SecretLock => "SECRET_LOCK",
            Self::SecretProof => "SECRET_PROOF",
            Self::AccountLink => "LINK_ACCOUNT",
        };
        write!(f, "{name}")
    }
}
