//! # Domain Model
//!
//! Accounts, identifiers and transactions, each with a catbuffer and a DTO
//! form. Leaf types come first; [`transaction`] builds on all of them.

/// Declares a one-byte enumeration together with its catbuffer value and
/// DTO form. Unknown bytes fail with [`crate::error::Error::Lookup`].
macro_rules! byte_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            pub const CATBUFFER_SIZE: usize = 1;

            pub fn value(self) -> u8 {
                self as u8
            }

            pub fn from_value(value: u8) -> $crate::error::Result<Self> {
                match value {
                    $( $value => Ok(Self::$variant), )+
                    other => Err($crate::error::Error::Lookup {
                        kind: $kind,
                        value: format!("0x{other:02X}"),
                    }),
                }
            }

            pub fn to_dto(self) -> serde_json::Value {
                serde_json::Value::from(self as u8)
            }

            pub fn from_dto(dto: &serde_json::Value) -> $crate::error::Result<Self> {
                Self::from_value(<u8 as $crate::codec::FixedWidth>::from_dto(dto)?)
            }
        }
    };
}

pub mod account;
pub mod blockchain;
pub mod mosaic;
pub mod namespace;
pub mod transaction;
