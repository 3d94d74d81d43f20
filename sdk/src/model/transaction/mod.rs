//! # Transactions
//!
//! [`Transaction`] is the signed top-level envelope and [`InnerTransaction`]
//! the embedded one used inside aggregates. Both wrap a [`TransactionBody`],
//! one variant per [`TransactionType`]. Decoding dispatches on the type code
//! through the [`registry`].

pub mod account_link;
pub mod aggregate;
pub mod alias;
pub mod body;
pub mod deadline;
pub mod envelope;
pub mod fee;
pub mod info;
pub mod inner;
pub mod lock;
pub mod message;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod registry;
pub mod signed;
pub mod status;
pub mod transfer;
pub mod types;

pub use account_link::{AccountLinkTransaction, LinkAction};
pub use aggregate::{AggregateTransaction, AggregateTransactionCosignature};
pub use alias::{AddressAliasTransaction, MosaicAliasTransaction};
pub use body::{TransactionBody, TransactionPayload};
pub use deadline::Deadline;
pub use envelope::Transaction;
pub use fee::FeeCalculationStrategy;
pub use info::TransactionInfo;
pub use inner::InnerTransaction;
pub use lock::{HashLockTransaction, HashType, SecretLockTransaction, SecretProofTransaction};
pub use message::{Message, MessageType};
pub use mosaic::{MosaicDefinitionTransaction, MosaicSupplyChangeTransaction};
pub use multisig::{
    ModifyMultisigAccountTransaction, MultisigCosignatoryModification, MultisigCosignatoryModificationType,
};
pub use namespace::{NamespaceRegistration, RegisterNamespaceTransaction};
pub use signed::{CosignatureSignedTransaction, CosignatureTransaction, SignedTransaction};
pub use status::TransactionStatusError;
pub use transfer::TransferTransaction;
pub use types::{TransactionType, TransactionVersion};
