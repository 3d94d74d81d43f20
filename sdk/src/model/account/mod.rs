//! Accounts and addresses.

pub mod account;
pub mod address;
pub mod public_account;

pub use account::Account;
pub use address::Address;
pub use public_account::PublicAccount;
