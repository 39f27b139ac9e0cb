//! Committee signatures

use super::message::RequestDigest;
use crate::base::address::Address;
use anyhow::{anyhow, bail};
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

/// Signature verification, supplied by a trusted library
pub trait SignatureScheme {
    /// True iff `signature` is `signer`'s signature over `message`
    fn verify(&self, message: &[u8], signature: &Signature, signer: &Address) -> bool;
}

/// Strict ed25519 verification against the key an address encodes
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    fn verify(&self, message: &[u8], signature: &Signature, signer: &Address) -> bool {
        signer.verifying_key().is_ok_and(|key| {
            key.verify_strict(message, &ed25519_dalek::Signature::from_bytes(&signature.0))
                .is_ok()
        })
    }
}

/// Signing half of a committee member
pub struct Keyholder {
    signing_key: SigningKey,
}

impl Keyholder {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Reads a hex-encoded 32-byte seed
    pub fn from_hex(seed: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(seed.trim()).map_err(|e| anyhow!("invalid seed hex: {e}"))?;
        match <[u8; 32]>::try_from(bytes.as_slice()) {
            Ok(seed) => Ok(Self::from_seed(seed)),
            Err(_) => bail!("seed must be 32 bytes, got {}", bytes.len()),
        }
    }

    pub fn address(&self) -> Address {
        Address::from_verifying_key(&self.signing_key.verifying_key())
    }

    pub fn sign(&self, digest: &RequestDigest) -> Signature {
        Signature(self.signing_key.sign(digest.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for Keyholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyholder")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/////////////////
// conversions //
/////////////////

impl std::str::FromStr for Signature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| anyhow!("invalid signature hex: {e}"))?;
        match <[u8; 64]>::try_from(bytes.as_slice()) {
            Ok(sig) => Ok(Self(sig)),
            Err(_) => bail!("signature must be 64 bytes, got {}", bytes.len()),
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

///////////
// serde //
///////////

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
