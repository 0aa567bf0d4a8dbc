//! Anchor-style discriminators.
//!
//! Anchor programs dispatch on the first 8 bytes of instruction data and tag
//! every account with an 8-byte header. Both are truncated SHA-256 digests of
//! a namespaced name:
//!
//! - instructions: `sha256("global:<method_name>")[..8]`
//! - accounts:     `sha256("account:<AccountStruct>")[..8]`

use sha2::{Digest, Sha256};

/// Length of every discriminator in bytes.
pub const DISCRIMINATOR_LEN: usize = 8;

const METHOD_NAMESPACE: &str = "global";
const ACCOUNT_NAMESPACE: &str = "account";

/// Discriminator for the instruction handler `method_name`.
pub fn method_discriminator(method_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash(METHOD_NAMESPACE, method_name)
}

/// Discriminator stored at the front of accounts of type `account_name`.
pub fn account_discriminator(account_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash(ACCOUNT_NAMESPACE, account_name)
}

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_initialize_discriminator() {
        // Anchor's canonical `initialize` sighash.
        assert_eq!(
            method_discriminator("initialize"),
            [0xaf, 0xaf, 0x6d, 0x1f, 0x0d, 0x98, 0x9b, 0xed]
        );
    }

    #[test]
    fn journal_method_discriminators() {
        assert_eq!(
            method_discriminator("create_journal_entry"),
            [0x30, 0x41, 0xc9, 0xba, 0x19, 0x29, 0x7f, 0x00]
        );
        assert_eq!(
            method_discriminator("update_journal_entry"),
            [0x71, 0xa4, 0x31, 0x3e, 0x2b, 0x53, 0xc2, 0xac]
        );
        assert_eq!(
            method_discriminator("delete_journal_entry"),
            [0x9c, 0x32, 0x5d, 0x05, 0x9d, 0x61, 0xbc, 0x72]
        );
    }

    #[test]
    fn journal_account_discriminator() {
        assert_eq!(
            account_discriminator("JournalEntryState"),
            [0x71, 0x56, 0x6e, 0x7c, 0x8c, 0x0e, 0x3a, 0x42]
        );
    }

    #[test]
    fn matches_single_shot_digest() {
        let digest = Sha256::digest(b"global:create_journal_entry");
        assert_eq!(method_discriminator("create_journal_entry"), digest[..8]);
    }

    #[test]
    fn discriminator_is_stable() {
        let a = method_discriminator("update_journal_entry");
        let b = method_discriminator("update_journal_entry");
        assert_eq!(a, b);
        assert_eq!(a.len(), DISCRIMINATOR_LEN);
    }

    #[test]
    fn namespaces_do_not_collide() {
        assert_ne!(method_discriminator("x"), account_discriminator("x"));
    }
}
