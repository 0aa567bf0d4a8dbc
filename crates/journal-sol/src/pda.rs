//! Program Derived Address (PDA) derivation.
//!
//! A PDA is the SHA-256 of the seeds, a one-byte bump, the program id and the
//! marker `"ProgramDerivedAddress"`, chosen so that the digest is NOT a valid
//! Ed25519 point. No private key can exist for it, so only the owning program
//! can sign for the account.
//!
//! The bump is searched from 255 down to 0 and the first off-curve digest
//! wins, which is what `Pubkey::find_program_address` and Anchor's `bump`
//! constraint do on-chain.

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};

use crate::address::Address;
use crate::error::JournalError;

/// Longest single seed the runtime accepts.
pub const MAX_SEED_LEN: usize = 32;

/// Most seeds the runtime accepts, bump included.
pub const MAX_SEEDS: usize = 16;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive the address of the journal entry `(title, owner)` under `program`.
///
/// Seeds are `[title.as_bytes(), owner]`, matching the program's
/// `seeds = [title.as_bytes(), owner.key().as_ref()]` constraint. The bump is
/// not returned; derive again to get the same address.
pub fn derive_entry_address(
    program: &Address,
    title: &str,
    owner: &Address,
) -> Result<Address, JournalError> {
    find_program_address(&[title.as_bytes(), owner.as_ref()], program).map(|(address, _)| address)
}

/// Find the canonical PDA for `seeds` under `program_id`.
///
/// Returns the address together with its bump seed. Seed lengths and count
/// are validated before any hashing.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), JournalError> {
    validate_seeds(seeds)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    Err(JournalError::NoValidDerivation)
}

/// Create a PDA from seeds and an explicit bump.
///
/// Fails with [`JournalError::NoValidDerivation`] if this bump lands on the
/// curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Address,
) -> Result<Address, JournalError> {
    validate_seeds(seeds)?;
    try_create_program_address(seeds, bump, program_id).ok_or(JournalError::NoValidDerivation)
}

fn validate_seeds(seeds: &[&[u8]]) -> Result<(), JournalError> {
    // One slot is reserved for the bump.
    if seeds.len() >= MAX_SEEDS {
        return Err(JournalError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS - 1,
        });
    }

    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(JournalError::SeedTooLong {
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }

    Ok(())
}

fn try_create_program_address(seeds: &[&[u8]], bump: u8, program_id: &Address) -> Option<Address> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(Address::new(hash))
}

/// Whether 32 bytes decompress to an Ed25519 point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Address {
        "2wtMCx1PDGqCHfCYnfKrhQRrANFWeMxNSr7eAPJrhrmv".parse().unwrap()
    }

    #[test]
    fn known_entry_address() {
        let owner = Address::new([7u8; 32]);

        let (address, bump) =
            find_program_address(&[b"t", owner.as_ref()], &program()).unwrap();
        assert_eq!(
            address.to_string(),
            "6XzakkPA44LRoXsxzrQuhCrzk9YmctwC2AUteGioWzmW"
        );
        assert_eq!(bump, 254);

        let (address, bump) =
            find_program_address(&[b"my first entry", owner.as_ref()], &program()).unwrap();
        assert_eq!(
            address.to_string(),
            "HsoWNPVqB3TzSkXVevw1Btsp93GWtUEhDRbHTiKLbT4c"
        );
        assert_eq!(bump, 251);
    }

    #[test]
    fn entry_address_matches_general_derivation() {
        let owner = Address::new([0x42u8; 32]);
        let (expected, _) =
            find_program_address(&[b"groceries", owner.as_ref()], &program()).unwrap();
        assert_eq!(
            derive_entry_address(&program(), "groceries", &owner).unwrap(),
            expected
        );
    }

    #[test]
    fn entry_address_is_deterministic() {
        let owner = Address::new([0x11u8; 32]);
        let a = derive_entry_address(&program(), "day one", &owner).unwrap();
        let b = derive_entry_address(&program(), "day one", &owner).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn entry_address_is_off_curve() {
        let owner = Address::new([0xAAu8; 32]);
        let address = derive_entry_address(&program(), "entry", &owner).unwrap();
        assert!(!is_on_curve(address.as_bytes()));
    }

    #[test]
    fn different_inputs_give_different_addresses() {
        let owner_a = Address::new([1u8; 32]);
        let owner_b = Address::new([2u8; 32]);
        let other_program = Address::new([3u8; 32]);

        let base = derive_entry_address(&program(), "title", &owner_a).unwrap();
        assert_ne!(base, derive_entry_address(&program(), "title", &owner_b).unwrap());
        assert_ne!(base, derive_entry_address(&program(), "other", &owner_a).unwrap());
        assert_ne!(base, derive_entry_address(&other_program, "title", &owner_a).unwrap());
    }

    #[test]
    fn random_owners_derive_deterministically() {
        use rand::RngCore;

        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let owner = Address::new(bytes);

            let a = derive_entry_address(&program(), "random", &owner).unwrap();
            let b = derive_entry_address(&program(), "random", &owner).unwrap();
            assert_eq!(a, b);
            assert!(!is_on_curve(a.as_bytes()));
        }
    }

    #[test]
    fn title_of_exactly_32_bytes_is_accepted() {
        let owner = Address::new([5u8; 32]);
        let title = "a".repeat(32);
        assert!(derive_entry_address(&program(), &title, &owner).is_ok());
    }

    #[test]
    fn title_over_32_bytes_is_rejected() {
        let owner = Address::new([5u8; 32]);
        let title = "a".repeat(33);
        assert_eq!(
            derive_entry_address(&program(), &title, &owner).unwrap_err(),
            JournalError::SeedTooLong { len: 33, max: 32 }
        );
    }

    #[test]
    fn multibyte_title_is_measured_in_bytes() {
        // 11 chars * 3 bytes = 33 bytes.
        let owner = Address::new([5u8; 32]);
        let title = "日".repeat(11);
        assert_eq!(title.chars().count(), 11);
        assert!(matches!(
            derive_entry_address(&program(), &title, &owner),
            Err(JournalError::SeedTooLong { len: 33, .. })
        ));
    }

    #[test]
    fn too_many_seeds_is_rejected() {
        let seed: &[u8] = b"s";
        let seeds = vec![seed; MAX_SEEDS];
        assert_eq!(
            find_program_address(&seeds, &program()).unwrap_err(),
            JournalError::TooManySeeds { count: 16, max: 15 }
        );
    }

    #[test]
    fn create_with_found_bump_reproduces_address() {
        let owner = Address::new([9u8; 32]);
        let seeds: [&[u8]; 2] = [b"notes", owner.as_ref()];
        let (address, bump) = find_program_address(&seeds, &program()).unwrap();
        assert_eq!(create_program_address(&seeds, bump, &program()).unwrap(), address);
    }

    #[test]
    fn create_validates_seeds() {
        let long: &[u8] = &[0u8; MAX_SEED_LEN + 1];
        assert_eq!(
            crate::create_program_address(&[long], 255, &program()).unwrap_err(),
            JournalError::SeedTooLong { len: 33, max: 32 }
        );
    }

    #[test]
    fn is_on_curve_accepts_basepoint() {
        // The Ed25519 basepoint (compressed form).
        let mut basepoint = [0x66u8; 32];
        basepoint[0] = 0x58;
        assert!(is_on_curve(&basepoint));
    }

    #[test]
    fn is_on_curve_rejects_off_curve_bytes() {
        assert!(!is_on_curve(&[0x02; 32]));
    }
}
