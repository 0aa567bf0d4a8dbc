//! Journal program instructions.
//!
//! Every instruction targets the same three accounts:
//!
//! ```text
//!   0  journal entry PDA   writable        seeds = [title, owner]
//!   1  owner               writable signer pays rent / receives refund
//!   2  system program      read-only
//! ```
//!
//! and carries Anchor-encoded arguments:
//!
//! ```text
//!   create_journal_entry   disc(8) || string(title) || string(message)
//!   update_journal_entry   disc(8) || string(title) || string(message)
//!   delete_journal_entry   disc(8) || string(title)
//! ```

use crate::address::{Address, SYSTEM_PROGRAM_ID};
use crate::discriminator::{method_discriminator, DISCRIMINATOR_LEN};
use crate::encoding::{concat, encode_length_prefixed_string, LENGTH_PREFIX_LEN};
use crate::error::JournalError;
use crate::pda::{derive_entry_address, MAX_SEED_LEN};

/// Space the program reserves for `JournalEntryState::message`.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// How the program may use an account referenced by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessRole {
    ReadOnly,
    Writable,
    WritableSigner,
}

impl AccessRole {
    pub fn is_signer(self) -> bool {
        matches!(self, AccessRole::WritableSigner)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, AccessRole::Writable | AccessRole::WritableSigner)
    }
}

/// A single account reference in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub address: Address,
    pub role: AccessRole,
}

impl AccountMeta {
    pub fn new(address: Address, role: AccessRole) -> Self {
        Self { address, role }
    }
}

/// A fully built instruction, ready to be compiled into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// The three handlers exposed by the journal program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalMethod {
    Create,
    Update,
    Delete,
}

impl JournalMethod {
    /// Handler name as declared in the program.
    pub fn method_name(self) -> &'static str {
        match self {
            JournalMethod::Create => "create_journal_entry",
            JournalMethod::Update => "update_journal_entry",
            JournalMethod::Delete => "delete_journal_entry",
        }
    }

    pub fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        method_discriminator(self.method_name())
    }
}

/// Build a `create_journal_entry` instruction.
pub fn build_create(
    program_id: &Address,
    owner: &Address,
    title: &str,
    message: &str,
) -> Result<Instruction, JournalError> {
    build_entry_instruction(JournalMethod::Create, program_id, owner, title, Some(message))
}

/// Build an `update_journal_entry` instruction.
///
/// The title is part of the entry's address and cannot change; only the
/// message is rewritten.
pub fn build_update(
    program_id: &Address,
    owner: &Address,
    title: &str,
    message: &str,
) -> Result<Instruction, JournalError> {
    build_entry_instruction(JournalMethod::Update, program_id, owner, title, Some(message))
}

/// Build a `delete_journal_entry` instruction. Rent is refunded to `owner`.
pub fn build_delete(
    program_id: &Address,
    owner: &Address,
    title: &str,
) -> Result<Instruction, JournalError> {
    build_entry_instruction(JournalMethod::Delete, program_id, owner, title, None)
}

fn build_entry_instruction(
    method: JournalMethod,
    program_id: &Address,
    owner: &Address,
    title: &str,
    message: Option<&str>,
) -> Result<Instruction, JournalError> {
    // Both limits are checked before anything is hashed.
    if title.len() > MAX_SEED_LEN {
        return Err(JournalError::SeedTooLong {
            len: title.len(),
            max: MAX_SEED_LEN,
        });
    }
    if let Some(message) = message {
        if message.len() > MAX_MESSAGE_LEN {
            return Err(JournalError::FieldTooLong {
                field: "message",
                len: message.len(),
                max: MAX_MESSAGE_LEN,
            });
        }
    }

    let entry = derive_entry_address(program_id, title, owner)?;

    let discriminator = method.discriminator();
    let title_field = encode_length_prefixed_string(title);
    let data = match message {
        Some(message) => {
            let message_field = encode_length_prefixed_string(message);
            concat(&[&discriminator, &title_field, &message_field])
        }
        None => concat(&[&discriminator, &title_field]),
    };
    debug_assert_eq!(
        data.len(),
        DISCRIMINATOR_LEN
            + LENGTH_PREFIX_LEN
            + title.len()
            + message.map_or(0, |m| LENGTH_PREFIX_LEN + m.len())
    );

    Ok(Instruction {
        program_id: *program_id,
        accounts: entry_accounts(entry, *owner),
        data,
    })
}

fn entry_accounts(entry: Address, owner: Address) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(entry, AccessRole::Writable),
        AccountMeta::new(owner, AccessRole::WritableSigner),
        AccountMeta::new(SYSTEM_PROGRAM_ID, AccessRole::ReadOnly),
    ]
}
