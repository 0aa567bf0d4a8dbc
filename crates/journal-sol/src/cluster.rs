//! Cluster definitions and the journal program deployed on each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::JournalError;
use crate::instruction::{build_create, build_delete, build_update, Instruction};
use crate::pda::derive_entry_address;

/// Program id declared by the journal program: `2wtMCx1PDGqCHfCYnfKrhQRrANFWeMxNSr7eAPJrhrmv`
pub const JOURNAL_PROGRAM_ID: Address = Address::new([
    0x1c, 0xeb, 0x1c, 0x44, 0x19, 0x88, 0x08, 0x8d, 0xac, 0xd4, 0x9f, 0xb6, 0xbe, 0x29, 0xe1,
    0x10, 0x39, 0x41, 0xd8, 0x0f, 0xb2, 0x74, 0xc9, 0xdb, 0x9f, 0x3d, 0x09, 0x6d, 0x90, 0x80,
    0x39, 0x01,
]);

/// Devnet/testnet deployment: `6z68wfurCMYkZG51s1Et9BJEd9nJGUusjHXNt4dGbNNF`
pub const JOURNAL_DEVNET_PROGRAM_ID: Address = Address::new([
    0x58, 0xea, 0x59, 0x5f, 0x16, 0xee, 0xa4, 0xdf, 0x8d, 0xba, 0x60, 0x77, 0xa8, 0x75, 0x1e,
    0x16, 0xb3, 0x53, 0x5a, 0x3c, 0xfc, 0x1e, 0x11, 0x28, 0xe9, 0xd8, 0x2c, 0x26, 0xb6, 0xbb,
    0x9b, 0xc4,
]);

/// Solana clusters the wallet can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Mainnet,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    /// Wallet-standard chain id, e.g. `solana:devnet`.
    pub fn id(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "solana:mainnet",
            Cluster::Devnet => "solana:devnet",
            Cluster::Testnet => "solana:testnet",
            Cluster::Localnet => "solana:localnet",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "Mainnet Beta",
            Cluster::Devnet => "Devnet",
            Cluster::Testnet => "Testnet",
            Cluster::Localnet => "Local Validator",
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Localnet => "http://localhost:8899",
        }
    }

    /// Address of the journal program on this cluster.
    ///
    /// Devnet and testnet share a deployment; mainnet and a local validator
    /// use the program's declared id.
    pub fn program_address(&self) -> Address {
        match self {
            Cluster::Devnet | Cluster::Testnet => JOURNAL_DEVNET_PROGRAM_ID,
            Cluster::Mainnet | Cluster::Localnet => JOURNAL_PROGRAM_ID,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Cluster::Mainnet)
    }
}

impl FromStr for Cluster {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("solana:").unwrap_or(&name);
        match name {
            "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            _ => Err(JournalError::UnknownCluster(s.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A journal program deployment, the entry point for building instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalProgram {
    pub address: Address,
}

impl JournalProgram {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn for_cluster(cluster: Cluster) -> Self {
        Self::new(cluster.program_address())
    }

    pub fn entry_address(&self, title: &str, owner: &Address) -> Result<Address, JournalError> {
        derive_entry_address(&self.address, title, owner)
    }

    pub fn create(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> Result<Instruction, JournalError> {
        build_create(&self.address, owner, title, message)
    }

    pub fn update(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> Result<Instruction, JournalError> {
        build_update(&self.address, owner, title, message)
    }

    pub fn delete(&self, owner: &Address, title: &str) -> Result<Instruction, JournalError> {
        build_delete(&self.address, owner, title)
    }
}
