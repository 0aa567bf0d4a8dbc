use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::error::WalletError;

type HmacSha512 = Hmac<Sha512>;

const HARDENED: u32 = 0x8000_0000;

/// BIP-44 purpose and Solana coin type.
const PURPOSE: u32 = 44;
const SOLANA_COIN_TYPE: u32 = 501;

/// Solana derivation path: m/44'/501'/account'/0' (hardened at every level,
/// as Ed25519 SLIP-0010 requires).
pub fn solana_derivation_path(account: u32) -> String {
    format!("m/{PURPOSE}'/{SOLANA_COIN_TYPE}'/{account}'/0'")
}

/// Derive the Solana Ed25519 key for `account` from a BIP-39 seed
/// using SLIP-0010.
pub fn derive_solana_key(seed: &[u8], account: u32) -> Result<DerivedEd25519Key, WalletError> {
    if account >= HARDENED {
        return Err(WalletError::DerivationFailed(format!(
            "account index {account} out of range"
        )));
    }

    // Master key: HMAC-SHA512(key="ed25519 seed", data=seed)
    let (mut key, mut chain_code) = hmac_split(b"ed25519 seed", &[seed])?;

    for index in [PURPOSE, SOLANA_COIN_TYPE, account, 0] {
        // Hardened child: 0x00 || key || index (with hardened bit set)
        let (child_key, child_chain) = hmac_split(
            &chain_code,
            &[&[0x00u8], &key, &(index | HARDENED).to_be_bytes()],
        )?;
        key = child_key;
        chain_code = child_chain;
    }

    let signing_key = ed25519_dalek::SigningKey::from_bytes(&key);
    let public_key = signing_key.verifying_key().to_bytes();

    let derived = DerivedEd25519Key {
        private_key: key,
        public_key,
        derivation_path: solana_derivation_path(account),
    };

    key.zeroize();
    chain_code.zeroize();

    Ok(derived)
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut result = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[..32]);
    right.copy_from_slice(&result[32..]);
    result.as_mut_slice().zeroize();

    Ok((left, right))
}

/// Derived Ed25519 key (for Solana)
pub struct DerivedEd25519Key {
    pub private_key: [u8; 32],
    pub public_key: [u8; 32],
    pub derivation_path: String,
}

impl Drop for DerivedEd25519Key {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}
