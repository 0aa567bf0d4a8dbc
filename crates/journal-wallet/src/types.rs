use journal_sol::{Instruction, JournalEntry, JournalMethod};

/// Journal program operation selected by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum JournalOperation {
    Create,
    Update,
    Delete,
}

impl From<JournalOperation> for JournalMethod {
    fn from(op: JournalOperation) -> Self {
        match op {
            JournalOperation::Create => JournalMethod::Create,
            JournalOperation::Update => JournalMethod::Update,
            JournalOperation::Delete => JournalMethod::Delete,
        }
    }
}

/// An account reference, as seen by a front-end or an external signer.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct AccountData {
    pub address: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// An unsigned instruction for hosts that sign through their own wallet
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct InstructionData {
    pub program_id: String,
    pub accounts: Vec<AccountData>,
    pub data: Vec<u8>,
}

impl From<Instruction> for InstructionData {
    fn from(ix: Instruction) -> Self {
        Self {
            program_id: ix.program_id.to_string(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| AccountData {
                    address: meta.address.to_string(),
                    is_signer: meta.role.is_signer(),
                    is_writable: meta.role.is_writable(),
                })
                .collect(),
            data: ix.data,
        }
    }
}

/// A signed journal transaction, ready for `sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SignedJournalTx {
    pub raw_tx: Vec<u8>,
    /// Base58 transaction signature (the transaction id).
    pub signature: String,
    /// Base58 address of the journal entry the transaction touches.
    pub entry_address: String,
}

/// A decoded journal entry account.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct JournalEntryRecord {
    pub title: String,
    pub message: String,
    pub owner: String,
}

impl From<JournalEntry> for JournalEntryRecord {
    fn from(entry: JournalEntry) -> Self {
        Self {
            title: entry.title,
            message: entry.message,
            owner: entry.owner.to_string(),
        }
    }
}
