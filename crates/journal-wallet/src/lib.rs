pub mod error;
pub mod hd_derivation;
pub mod mnemonic;
pub mod types;

use error::WalletError;
use journal_sol::{Address, Cluster, Instruction, JournalEntry, JournalMethod, JournalProgram};
use types::{InstructionData, JournalEntryRecord, JournalOperation, SignedJournalTx};
use zeroize::Zeroizing;

uniffi::setup_scaffolding!();

// ─── UniFFI-exported functions ───────────────────────────────────────
// UniFFI passes owned String/Vec<u8> across FFI, so all functions accept
// owned types (not references).

/// Validate a mnemonic phrase
#[uniffi::export]
pub fn validate_mnemonic(phrase: String) -> bool {
    mnemonic::validate_mnemonic(&phrase)
}

/// Derive the 64-byte BIP-39 seed. Caller MUST zeroize the returned seed.
#[uniffi::export]
pub fn mnemonic_to_seed(phrase: String, passphrase: String) -> Result<Vec<u8>, WalletError> {
    mnemonic::mnemonic_to_seed(&phrase, &passphrase)
}

/// Base58 Solana address for `account` (m/44'/501'/account'/0').
#[uniffi::export]
pub fn solana_address_from_seed(seed: Vec<u8>, account: u32) -> Result<String, WalletError> {
    let seed = Zeroizing::new(seed);
    let key = hd_derivation::derive_solana_key(seed.as_slice(), account)?;
    Ok(Address::new(key.public_key).to_base58())
}

/// Base58 address of the journal program deployed on `cluster`.
#[uniffi::export]
pub fn journal_program_address(cluster: String) -> Result<String, WalletError> {
    Ok(program_for(&cluster)?.address.to_base58())
}

/// Address of the entry `owner` keeps under `title` on `cluster`.
#[uniffi::export]
pub fn derive_journal_entry_address(
    cluster: String,
    title: String,
    owner: String,
) -> Result<String, WalletError> {
    let program = program_for(&cluster)?;
    let owner = journal_sol::parse_address(&owner)?;
    Ok(program.entry_address(&title, &owner)?.to_base58())
}

/// Build an unsigned journal instruction for hosts that sign through an
/// external wallet. `message` is required for create and update and ignored
/// for delete.
#[uniffi::export]
pub fn build_journal_instruction(
    cluster: String,
    operation: JournalOperation,
    owner: String,
    title: String,
    message: Option<String>,
) -> Result<InstructionData, WalletError> {
    let program = program_for(&cluster)?;
    let owner = journal_sol::parse_address(&owner)?;
    let ix = build_instruction(&program, operation, &owner, &title, message.as_deref())?;
    Ok(ix.into())
}

/// Sign a `create_journal_entry` transaction with the key at `account`.
#[uniffi::export]
pub fn sign_create_journal_entry(
    seed: Vec<u8>,
    account: u32,
    cluster: String,
    title: String,
    message: String,
    recent_blockhash: Vec<u8>,
) -> Result<SignedJournalTx, WalletError> {
    sign_journal_operation(
        Zeroizing::new(seed),
        account,
        &cluster,
        JournalOperation::Create,
        &title,
        Some(&message),
        &recent_blockhash,
    )
}

/// Sign an `update_journal_entry` transaction with the key at `account`.
#[uniffi::export]
pub fn sign_update_journal_entry(
    seed: Vec<u8>,
    account: u32,
    cluster: String,
    title: String,
    message: String,
    recent_blockhash: Vec<u8>,
) -> Result<SignedJournalTx, WalletError> {
    sign_journal_operation(
        Zeroizing::new(seed),
        account,
        &cluster,
        JournalOperation::Update,
        &title,
        Some(&message),
        &recent_blockhash,
    )
}

/// Sign a `delete_journal_entry` transaction with the key at `account`.
#[uniffi::export]
pub fn sign_delete_journal_entry(
    seed: Vec<u8>,
    account: u32,
    cluster: String,
    title: String,
    recent_blockhash: Vec<u8>,
) -> Result<SignedJournalTx, WalletError> {
    sign_journal_operation(
        Zeroizing::new(seed),
        account,
        &cluster,
        JournalOperation::Delete,
        &title,
        None,
        &recent_blockhash,
    )
}

/// Decode raw `JournalEntryState` account data fetched over RPC.
#[uniffi::export]
pub fn decode_journal_entry_account(data: Vec<u8>) -> Result<JournalEntryRecord, WalletError> {
    Ok(JournalEntry::decode(&data)?.into())
}

// ─── Internal helpers ────────────────────────────────────────────────

fn program_for(cluster: &str) -> Result<JournalProgram, WalletError> {
    let cluster: Cluster = cluster.parse()?;
    Ok(JournalProgram::for_cluster(cluster))
}

fn build_instruction(
    program: &JournalProgram,
    operation: JournalOperation,
    owner: &Address,
    title: &str,
    message: Option<&str>,
) -> Result<Instruction, WalletError> {
    let method = JournalMethod::from(operation);
    let ix = match (method, message) {
        (JournalMethod::Create, Some(message)) => program.create(owner, title, message)?,
        (JournalMethod::Update, Some(message)) => program.update(owner, title, message)?,
        (JournalMethod::Delete, _) => program.delete(owner, title)?,
        (method, None) => {
            return Err(WalletError::InvalidInput(format!(
                "{} requires a message",
                method.method_name()
            )))
        }
    };
    Ok(ix)
}

fn sign_journal_operation(
    seed: Zeroizing<Vec<u8>>,
    account: u32,
    cluster: &str,
    operation: JournalOperation,
    title: &str,
    message: Option<&str>,
    recent_blockhash: &[u8],
) -> Result<SignedJournalTx, WalletError> {
    let program = program_for(cluster)?;
    let blockhash: [u8; 32] = recent_blockhash
        .try_into()
        .map_err(|_| WalletError::TransactionFailed("Invalid blockhash length".into()))?;

    let key = hd_derivation::derive_solana_key(seed.as_slice(), account)?;
    let owner = Address::new(key.public_key);

    let ix = build_instruction(&program, operation, &owner, title, message)?;
    let entry_address = ix
        .accounts
        .first()
        .map(|meta| meta.address.to_base58())
        .ok_or_else(|| WalletError::TransactionFailed("instruction has no accounts".into()))?;

    let signed = journal_sol::sign_instructions(&[ix], &key.private_key, &blockhash)?;
    let signature = signed.signature_base58();

    tracing::debug!(
        ?operation,
        %cluster,
        owner = %owner,
        entry = %entry_address,
        %signature,
        "signed journal transaction"
    );

    Ok(SignedJournalTx {
        raw_tx: signed.wire,
        signature,
        entry_address,
    })
}
