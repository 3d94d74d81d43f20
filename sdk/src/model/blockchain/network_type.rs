//! Network discriminant carried in every address and transaction header.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ADDRESS_ENCODED_LENGTH;
use crate::error::{Error, Result};

byte_enum! {
    /// The chain a key, address or transaction belongs to.
    ///
    /// The byte value is the first byte of every decoded address, which is
    /// why each network also owns a single base32 identifier character.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum NetworkType ("network type") {
        MainNet = 0x68,
        TestNet = 0x98,
        Mijin = 0x60,
        MijinTest = 0x90,
    }
}

impl NetworkType {
    pub const ALL: [NetworkType; 4] = [
        NetworkType::MainNet,
        NetworkType::TestNet,
        NetworkType::Mijin,
        NetworkType::MijinTest,
    ];

    /// Leading character of raw addresses on this network.
    pub fn identifier(self) -> char {
        match self {
            Self::MainNet => 'N',
            Self::TestNet => 'T',
            Self::Mijin => 'M',
            Self::MijinTest => 'S',
        }
    }

    pub fn create_from_identifier(identifier: char) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|network| network.identifier() == identifier)
            .ok_or_else(|| Error::Lookup {
                kind: "network identifier",
                value: identifier.to_string(),
            })
    }

    /// Network of a 40-character, uppercase, dash-free address.
    pub fn create_from_raw_address(address: &str) -> Result<Self> {
        if address.len() != ADDRESS_ENCODED_LENGTH {
            return Err(Error::Validation(format!(
                "raw address must be {ADDRESS_ENCODED_LENGTH} characters, got {}",
                address.len()
            )));
        }
        let first = address.chars().next().unwrap_or_default();
        Self::create_from_identifier(first)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MainNet => "Main network",
            Self::TestNet => "Test network",
            Self::Mijin => "Mijin network",
            Self::MijinTest => "Mijin test network",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainNet => write!(f, "MAIN_NET"),
            Self::TestNet => write!(f, "TEST_NET"),
            Self::Mijin => write!(f, "MIJIN"),
            Self::MijinTest => write!(f, "MIJIN_TEST"),
        }
    }
}
