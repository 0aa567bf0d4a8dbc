//! Client-side support for the journal program on Solana.
//!
//! This crate builds the instructions the journal program expects
//! (`create_journal_entry`, `update_journal_entry`, `delete_journal_entry`),
//! derives the PDA each entry lives at, decodes entry accounts, and compiles
//! and signs the resulting transactions. Like the rest of the wallet it does
//! not depend on `solana-sdk`: the Anchor calling convention and the legacy
//! transaction format are encoded by hand, with `sha2` for hashing,
//! `curve25519-dalek` for the off-curve check and `ed25519-dalek` for signing.
//!
//! Everything except [`transaction`] is pure and allocation-only: no I/O, no
//! global state, no logging.

pub mod account;
pub mod address;
pub mod cluster;
pub mod discriminator;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use account::JournalEntry;
pub use address::{parse_address, Address, SYSTEM_PROGRAM_ID};
pub use cluster::{Cluster, JournalProgram, JOURNAL_DEVNET_PROGRAM_ID, JOURNAL_PROGRAM_ID};
pub use discriminator::{account_discriminator, method_discriminator};
pub use encoding::{concat, decode_length_prefixed_string, encode_length_prefixed_string};
pub use error::JournalError;
pub use instruction::{
    build_create, build_delete, build_update, AccessRole, AccountMeta, Instruction,
    JournalMethod, MAX_MESSAGE_LEN,
};
pub use pda::{create_program_address, derive_entry_address, find_program_address, MAX_SEED_LEN};
pub use transaction::{
    compile_transaction, serialize_message, sign_instructions, sign_transaction,
    SignedTransaction, Transaction,
};
