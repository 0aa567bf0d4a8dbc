//! Solana addresses.
//!
//! An address is 32 raw bytes, shown to humans as Base58 (Bitcoin alphabet).
//! Text only becomes an [`Address`] through [`parse_address`] / [`FromStr`],
//! so everything past the boundary works with validated bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::JournalError;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// A 32-byte Solana account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

/// The System Program: 32 zero bytes, `11111111111111111111111111111111`.
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Build an address from a slice, rejecting anything but 32 bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, JournalError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            JournalError::InvalidAddress(format!(
                "expected {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Base58 form.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

/// Parse a Base58 address string.
pub fn parse_address(raw: &str) -> Result<Address, JournalError> {
    let bytes = bs58::decode(raw.trim())
        .into_vec()
        .map_err(|e| JournalError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    Address::try_from_slice(&bytes)
}

impl FromStr for Address {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_address(&raw).map_err(serde::de::Error::custom)
    }
}
