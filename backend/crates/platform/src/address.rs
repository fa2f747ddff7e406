//! Network identity addresses
//!
//! Farmers and the server identify themselves with Bitcoin-style
//! Base58Check addresses: one version byte followed by a 20-byte HASH160,
//! protected by a 4-byte double-SHA-256 checksum.
//!
//! Parsing is pure and cheap; it never touches the network or storage, so it
//! can gate every endpoint before any state is read.
//!
//! ## Usage
//! ```rust
//! use platform::address::Address;
//!
//! let address = Address::parse(" 1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2 ").unwrap();
//! assert_eq!(address.as_str(), "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2");
//! assert!(Address::parse("notvalidaddress").is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::crypto::hash160;

/// Shortest Base58Check string that can carry 25 bytes
const ADDRESS_MIN_LENGTH: usize = 26;
/// Longest Base58Check string that can carry 25 bytes
const ADDRESS_MAX_LENGTH: usize = 35;
/// Version byte + HASH160
const PAYLOAD_LENGTH: usize = 21;

/// Address version bytes accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressVersion {
    /// Mainnet pay-to-pubkey-hash (`1...`)
    P2pkh,
    /// Mainnet pay-to-script-hash (`3...`)
    P2sh,
    /// Testnet pay-to-pubkey-hash (`m...`/`n...`)
    TestnetP2pkh,
    /// Testnet pay-to-script-hash (`2...`)
    TestnetP2sh,
}

impl AddressVersion {
    pub const fn byte(&self) -> u8 {
        match self {
            AddressVersion::P2pkh => 0x00,
            AddressVersion::P2sh => 0x05,
            AddressVersion::TestnetP2pkh => 0x6f,
            AddressVersion::TestnetP2sh => 0xc4,
        }
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(AddressVersion::P2pkh),
            0x05 => Some(AddressVersion::P2sh),
            0x6f => Some(AddressVersion::TestnetP2pkh),
            0xc4 => Some(AddressVersion::TestnetP2sh),
            _ => None,
        }
    }
}

/// Reasons an address string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address length {0} is outside 26..=35")]
    Length(usize),

    #[error("address is not valid Base58Check")]
    Encoding,

    #[error("address payload must be 21 bytes, got {0}")]
    PayloadLength(usize),

    #[error("unsupported address version 0x{0:02x}")]
    Version(u8),
}

/// A validated, normalized network identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Validate and normalize a raw address string.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let raw = raw.trim();

        if !(ADDRESS_MIN_LENGTH..=ADDRESS_MAX_LENGTH).contains(&raw.len()) {
            return Err(AddressError::Length(raw.len()));
        }

        let payload = bs58::decode(raw)
            .with_check(None)
            .into_vec()
            .map_err(|_| AddressError::Encoding)?;

        if payload.len() != PAYLOAD_LENGTH {
            return Err(AddressError::PayloadLength(payload.len()));
        }

        AddressVersion::from_byte(payload[0]).ok_or(AddressError::Version(payload[0]))?;

        Ok(Self(raw.to_string()))
    }

    /// Derive the address of a SEC1-encoded public key.
    pub fn from_public_key(public_key: &[u8], version: AddressVersion) -> Self {
        Self::from_hash160(&hash160(public_key), version)
    }

    pub fn from_hash160(hash: &[u8; 20], version: AddressVersion) -> Self {
        let mut payload = Vec::with_capacity(PAYLOAD_LENGTH);
        payload.push(version.byte());
        payload.extend_from_slice(hash);
        Self(bs58::encode(payload).with_check().into_string())
    }

    pub fn version(&self) -> AddressVersion {
        self.payload()
            .and_then(|payload| AddressVersion::from_byte(payload[0]))
            .unwrap_or(AddressVersion::P2pkh)
    }

    /// The 20-byte HASH160 carried by the address.
    pub fn hash160(&self) -> [u8; 20] {
        let mut hash = [0u8; 20];
        if let Some(payload) = self.payload() {
            hash.copy_from_slice(&payload[1..]);
        }
        hash
    }

    /// Create from a trusted value (e.g. a database row written by this service)
    pub fn from_db(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn payload(&self) -> Option<Vec<u8>> {
        bs58::decode(&self.0)
            .with_check(None)
            .into_vec()
            .ok()
            .filter(|payload| payload.len() == PAYLOAD_LENGTH)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
