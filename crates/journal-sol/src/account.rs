//! Decoding of `JournalEntryState` accounts fetched over RPC.
//!
//! On-chain layout (Anchor):
//!
//! ```text
//!   discriminator   8 bytes   sha256("account:JournalEntryState")[..8]
//!   title           u32 LE length + UTF-8
//!   message         u32 LE length + UTF-8
//!   owner           32 bytes
//!   (zero padding up to the allocated space)
//! ```

use serde::{Deserialize, Serialize};

use crate::address::{Address, ADDRESS_LEN};
use crate::discriminator::{account_discriminator, DISCRIMINATOR_LEN};
use crate::encoding::decode_length_prefixed_string;
use crate::error::JournalError;
use crate::pda::derive_entry_address;

/// Account type name used for the discriminator.
pub const JOURNAL_ENTRY_ACCOUNT: &str = "JournalEntryState";

/// A decoded journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    pub message: String,
    pub owner: Address,
}

impl JournalEntry {
    /// Decode raw account data. Trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, JournalError> {
        let header = data.get(..DISCRIMINATOR_LEN).ok_or_else(|| {
            JournalError::AccountData(format!(
                "account too short for discriminator: {} bytes",
                data.len()
            ))
        })?;

        let expected = account_discriminator(JOURNAL_ENTRY_ACCOUNT);
        if header != expected {
            return Err(JournalError::AccountData(format!(
                "discriminator mismatch: expected {}, got {}",
                hex::encode(expected),
                hex::encode(header)
            )));
        }

        let mut offset = DISCRIMINATOR_LEN;

        let (title, consumed) = decode_length_prefixed_string(&data[offset..])?;
        offset += consumed;

        let (message, consumed) = decode_length_prefixed_string(&data[offset..])?;
        offset += consumed;

        let owner_bytes = data.get(offset..offset + ADDRESS_LEN).ok_or_else(|| {
            JournalError::AccountData("account too short for owner".into())
        })?;
        let owner = Address::try_from_slice(owner_bytes)?;

        Ok(Self {
            title,
            message,
            owner,
        })
    }

    /// The PDA this entry lives at under `program`.
    pub fn address(&self, program: &Address) -> Result<Address, JournalError> {
        derive_entry_address(program, &self.title, &self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{concat, encode_length_prefixed_string};

    fn account_bytes(title: &str, message: &str, owner: &Address) -> Vec<u8> {
        concat(&[
            &account_discriminator(JOURNAL_ENTRY_ACCOUNT),
            &encode_length_prefixed_string(title),
            &encode_length_prefixed_string(message),
            owner.as_bytes(),
        ])
    }

    #[test]
    fn decode_entry() {
        let owner = Address::new([0x33u8; 32]);
        let data = account_bytes("monday", "went for a run", &owner);

        let entry = JournalEntry::decode(&data).unwrap();
        assert_eq!(entry.title, "monday");
        assert_eq!(entry.message, "went for a run");
        assert_eq!(entry.owner, owner);
    }

    #[test]
    fn decode_ignores_allocation_padding() {
        let owner = Address::new([0x44u8; 32]);
        let mut data = account_bytes("t", "m", &owner);
        data.resize(8 + 4 + 50 + 4 + 1000 + 32, 0);

        let entry = JournalEntry::decode(&data).unwrap();
        assert_eq!(entry.title, "t");
        assert_eq!(entry.owner, owner);
    }

    #[test]
    fn decode_rejects_wrong_discriminator() {
        let owner = Address::new([1u8; 32]);
        let mut data = account_bytes("t", "m", &owner);
        data[0] ^= 0xff;

        let err = JournalEntry::decode(&data).unwrap_err();
        assert!(err.to_string().contains("discriminator mismatch"));
    }

    #[test]
    fn decode_rejects_empty_data() {
        assert!(JournalEntry::decode(&[]).is_err());
    }

    #[test]
    fn decode_rejects_missing_owner() {
        let owner = Address::new([1u8; 32]);
        let data = account_bytes("t", "m", &owner);

        let err = JournalEntry::decode(&data[..data.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            JournalError::AccountData("account too short for owner".into())
        );
    }

    #[test]
    fn address_matches_derivation() {
        let program: Address = "2wtMCx1PDGqCHfCYnfKrhQRrANFWeMxNSr7eAPJrhrmv".parse().unwrap();
        let entry = JournalEntry {
            title: "t".into(),
            message: "m".into(),
            owner: Address::new([7u8; 32]),
        };

        assert_eq!(
            entry.address(&program).unwrap().to_string(),
            "6XzakkPA44LRoXsxzrQuhCrzk9YmctwC2AUteGioWzmW"
        );
    }

    #[test]
    fn serializes_owner_as_base58() {
        let entry = JournalEntry {
            title: "t".into(),
            message: "m".into(),
            owner: Address::new([0u8; 32]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["owner"], "11111111111111111111111111111111");
    }
}
