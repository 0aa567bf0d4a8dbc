//! Offline compilation and signing of legacy Solana transactions.
//!
//! This is the signing half of sign-and-send: it turns journal instructions
//! into wire bytes plus the transaction signature. Sending the bytes is left
//! to the host's RPC client.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]:
//!       program_id_index    u8
//!       num_accounts        compact-u16
//!       account_indices     u8 * num_accounts
//!       data_len            compact-u16
//!       data                u8 * data_len
//! ```

use ed25519_dalek::{Signer, SigningKey};
use zeroize::Zeroize;

use crate::address::Address;
use crate::error::JournalError;
use crate::instruction::Instruction;

/// Account keys are referenced by `u8` index.
const MAX_ACCOUNT_KEYS: usize = 256;

/// Encode a `u16` in Solana's compact-u16 (7 bits per byte) format.
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

fn compact_len(len: usize, what: &str) -> Result<Vec<u8>, JournalError> {
    let len = u16::try_from(len)
        .map_err(|_| JournalError::TransactionBuild(format!("too many {what}: {len}")))?;
    Ok(encode_compact_u16(len))
}

/// Message header counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
}

/// An instruction with its accounts replaced by indices into `account_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: MessageHeader,
    /// Writable signers, read-only signers, writable, read-only; fee payer first.
    pub account_keys: Vec<Address>,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

/// A signed transaction ready for `sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub wire: Vec<u8>,
    pub signature: [u8; 64],
}

impl SignedTransaction {
    /// Base58 signature, which is also the transaction id.
    pub fn signature_base58(&self) -> String {
        bs58::encode(self.signature).into_string()
    }
}

struct KeyEntry {
    address: Address,
    is_signer: bool,
    is_writable: bool,
}

impl KeyEntry {
    fn rank(&self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

/// Compile instructions into a transaction paid for by `fee_payer`.
pub fn compile_transaction(
    instructions: &[Instruction],
    fee_payer: &Address,
    recent_blockhash: &[u8; 32],
) -> Result<Transaction, JournalError> {
    if instructions.is_empty() {
        return Err(JournalError::TransactionBuild("no instructions".into()));
    }

    let mut keys: Vec<KeyEntry> = Vec::new();
    let mut add_key = |address: Address, is_signer: bool, is_writable: bool| {
        match keys.iter_mut().find(|k| k.address == address) {
            Some(entry) => {
                entry.is_signer |= is_signer;
                entry.is_writable |= is_writable;
            }
            None => keys.push(KeyEntry {
                address,
                is_signer,
                is_writable,
            }),
        }
    };

    add_key(*fee_payer, true, true);
    for ix in instructions {
        for meta in &ix.accounts {
            add_key(meta.address, meta.role.is_signer(), meta.role.is_writable());
        }
        add_key(ix.program_id, false, false);
    }

    // Stable, so the fee payer stays first among writable signers.
    keys.sort_by_key(KeyEntry::rank);

    if keys.len() > MAX_ACCOUNT_KEYS {
        return Err(JournalError::TransactionBuild(format!(
            "too many account keys: {}",
            keys.len()
        )));
    }

    // Header counts are single bytes, so 256 keys of one kind cannot be encoded.
    let count = |what: &str, pred: fn(&KeyEntry) -> bool| -> Result<u8, JournalError> {
        let n = keys.iter().filter(|k| pred(k)).count();
        u8::try_from(n)
            .map_err(|_| JournalError::TransactionBuild(format!("too many {what}: {n}")))
    };
    let header = MessageHeader {
        num_required_signatures: count("signers", |k| k.is_signer)?,
        num_readonly_signed: count("read-only signers", |k| k.is_signer && !k.is_writable)?,
        num_readonly_unsigned: count("read-only accounts", |k| {
            !k.is_signer && !k.is_writable
        })?,
    };

    let account_keys: Vec<Address> = keys.iter().map(|k| k.address).collect();
    let index_of = |address: &Address| -> Result<u8, JournalError> {
        account_keys
            .iter()
            .position(|k| k == address)
            .map(|i| i as u8)
            .ok_or_else(|| {
                JournalError::TransactionBuild(format!("account {address} not in account keys"))
            })
    };

    let compiled = instructions
        .iter()
        .map(|ix| -> Result<CompiledInstruction, JournalError> {
            Ok(CompiledInstruction {
                program_id_index: index_of(&ix.program_id)?,
                account_indices: ix
                    .accounts
                    .iter()
                    .map(|meta| index_of(&meta.address))
                    .collect::<Result<Vec<u8>, _>>()?,
                data: ix.data.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(
        accounts = account_keys.len(),
        instructions = compiled.len(),
        signers = header.num_required_signatures,
        "compiled transaction"
    );

    Ok(Transaction {
        header,
        account_keys,
        recent_blockhash: *recent_blockhash,
        instructions: compiled,
    })
}

/// Serialize the message (the bytes that get signed).
pub fn serialize_message(tx: &Transaction) -> Result<Vec<u8>, JournalError> {
    let mut buf = Vec::with_capacity(256);

    buf.push(tx.header.num_required_signatures);
    buf.push(tx.header.num_readonly_signed);
    buf.push(tx.header.num_readonly_unsigned);

    buf.extend_from_slice(&compact_len(tx.account_keys.len(), "account keys")?);
    for key in &tx.account_keys {
        buf.extend_from_slice(key.as_bytes());
    }

    buf.extend_from_slice(&tx.recent_blockhash);

    buf.extend_from_slice(&compact_len(tx.instructions.len(), "instructions")?);
    for ix in &tx.instructions {
        buf.push(ix.program_id_index);
        buf.extend_from_slice(&compact_len(ix.account_indices.len(), "instruction accounts")?);
        buf.extend_from_slice(&ix.account_indices);
        buf.extend_from_slice(&compact_len(ix.data.len(), "instruction data bytes")?);
        buf.extend_from_slice(&ix.data);
    }

    Ok(buf)
}

/// Sign a single-signer transaction with a 32-byte Ed25519 secret.
///
/// The key must belong to the fee payer, and the fee payer must be the only
/// required signer.
pub fn sign_transaction(
    tx: &Transaction,
    private_key: &[u8; 32],
) -> Result<SignedTransaction, JournalError> {
    if tx.header.num_required_signatures != 1 {
        return Err(JournalError::Signing(format!(
            "expected exactly one signer, transaction requires {}",
            tx.header.num_required_signatures
        )));
    }

    let mut seed = *private_key;
    let signing_key = SigningKey::from_bytes(&seed);
    seed.zeroize();

    let signer = Address::new(signing_key.verifying_key().to_bytes());
    if tx.account_keys.first() != Some(&signer) {
        return Err(JournalError::Signing(format!(
            "key {signer} is not the fee payer"
        )));
    }

    let message = serialize_message(tx)?;
    let signature = signing_key.sign(&message).to_bytes();

    let mut wire = Vec::with_capacity(1 + 64 + message.len());
    wire.extend_from_slice(&encode_compact_u16(1));
    wire.extend_from_slice(&signature);
    wire.extend_from_slice(&message);

    Ok(SignedTransaction { wire, signature })
}

/// Compile and sign `instructions` with the fee payer's key in one step.
pub fn sign_instructions(
    instructions: &[Instruction],
    private_key: &[u8; 32],
    recent_blockhash: &[u8; 32],
) -> Result<SignedTransaction, JournalError> {
    let mut seed = *private_key;
    let fee_payer = Address::new(SigningKey::from_bytes(&seed).verifying_key().to_bytes());
    seed.zeroize();

    let tx = compile_transaction(instructions, &fee_payer, recent_blockhash)?;
    sign_transaction(&tx, private_key)
}
