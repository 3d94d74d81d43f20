//! # Wire Codecs
//!
//! Shared plumbing for the two wire formats every model type speaks:
//!
//! - **catbuffer**: packed little-endian binary, read with [`cursor::Reader`].
//! - **DTO**: JSON objects with camelCase keys, read with the [`dto`] helpers.
//!
//! [`stdint`] defines how fixed-width integers look in both.

pub mod cursor;
pub mod dto;
pub mod stdint;

pub use cursor::Reader;
pub use dto::Dto;
pub use stdint::FixedWidth;
