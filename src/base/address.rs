//! Keyholder address
//!
//! An address is the bs58check encoding of a 32-byte ed25519 verifying key
//! behind the [ADDRESS_VERSION] byte.

use crate::constants::ADDRESS_VERSION;
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Invalid base58 or checksum
    #[error("invalid address base58check")]
    Base58,
    /// Wrong version byte or payload length
    #[error("invalid address payload")]
    Payload,
    /// Payload is not a valid curve point
    #[error("invalid address verifying key")]
    VerifyingKey,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Address(String);

impl Address {
    pub const KEY_LEN: usize = 32;

    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(
            bs58::encode(key.as_bytes())
                .with_check_version(ADDRESS_VERSION)
                .into_string(),
        )
    }

    pub fn key_bytes(&self) -> Result<[u8; Self::KEY_LEN], AddressError> {
        let bytes = bs58::decode(&self.0)
            .with_check(Some(ADDRESS_VERSION))
            .into_vec()
            .map_err(|_| AddressError::Base58)?;

        // leading byte is the version
        match bytes.split_first() {
            Some((_, key)) => key.try_into().map_err(|_| AddressError::Payload),
            None => Err(AddressError::Payload),
        }
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey, AddressError> {
        VerifyingKey::from_bytes(&self.key_bytes()?).map_err(|_| AddressError::VerifyingKey)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/////////////////
// conversions //
/////////////////

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = Self(s.to_string());
        address.key_bytes()?;
        Ok(address)
    }
}

impl From<&VerifyingKey> for Address {
    fn from(value: &VerifyingKey) -> Self {
        Self::from_verifying_key(value)
    }
}

///////////
// serde //
///////////

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/////////////
// display //
/////////////

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
