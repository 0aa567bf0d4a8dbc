use thiserror::Error;

/// Errors raised while encoding, deriving, decoding or signing journal
/// program data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("seed too long: {len} bytes (max {max})")]
    SeedTooLong { len: usize, max: usize },

    #[error("too many seeds: {count} (max {max})")]
    TooManySeeds { count: usize, max: usize },

    #[error("no valid program address found for the given seeds")]
    NoValidDerivation,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid account data: {0}")]
    AccountData(String),

    #[error("unknown cluster: {0}")]
    UnknownCluster(String),

    #[error("transaction build error: {0}")]
    TransactionBuild(String),

    #[error("signing error: {0}")]
    Signing(String),
}
