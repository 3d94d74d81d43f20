// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # nem2-sdk: Catapult Client Library
//!
//! Client-side models for a Catapult (NEM2) node: keys, accounts, addresses,
//! mosaics, namespaces and every transaction kind, each speaking both wire
//! formats a node understands: packed little-endian **catbuffer** for
//! announcing, and camelCase JSON **DTOs** for the REST API.
//!
//! The interesting part is the transaction codec. Thirteen variants share
//! one header layout, come in a top-level (signed) and an embedded
//! (aggregate-inner) form, and are decoded by looking up the type code in a
//! registry. Everything else is mechanical by comparison.
//!
//! ## Modules
//!
//! - **config**: Wire constants and the application-level [`SdkConfig`].
//! - **error**: The one error type every fallible call returns.
//! - **codec**: Catbuffer cursor, DTO helpers, fixed-width integers.
//! - **crypto**: Digests and Ed25519 with SHA3-512 keys.
//! - **model**: Accounts, identifiers, blocks and transactions.
//! - **listener**: Websocket subscription protocol and frame classifier.
//!
//! ## Ground rules
//!
//! 1. Encoding is deterministic: same model, same bytes.
//! 2. Decoding never trusts a declared size it has not checked.
//! 3. No global mutable state. The transaction registry is built once and
//!    read-only afterwards.
//! 4. The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;

pub mod codec;
pub mod crypto;
pub mod listener;
pub mod model;

pub use config::SdkConfig;
pub use error::{Error, Result};
pub use model::account::{Account, Address, PublicAccount};
pub use model::blockchain::NetworkType;
pub use model::transaction::{
    Deadline, InnerTransaction, SignedTransaction, Transaction, TransactionBody, TransactionType,
};
