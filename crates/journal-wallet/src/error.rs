use thiserror::Error;

use journal_sol::JournalError;

#[derive(Debug, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported cluster: {0}")]
    UnsupportedCluster(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),
}

impl From<JournalError> for WalletError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            JournalError::UnknownCluster(name) => WalletError::UnsupportedCluster(name),
            JournalError::AccountData(msg) => WalletError::InvalidAccountData(msg),
            JournalError::Signing(msg) => WalletError::SigningFailed(msg),
            JournalError::SeedTooLong { .. }
            | JournalError::TooManySeeds { .. }
            | JournalError::FieldTooLong { .. } => WalletError::InvalidInput(e.to_string()),
            JournalError::NoValidDerivation | JournalError::TransactionBuild(_) => {
                WalletError::TransactionFailed(e.to_string())
            }
        }
    }
}
