use super::{amount::Amount, party::Party, transaction::TransactionRecord};
use crate::block::BlockDigest;
use serde::{Deserialize, Serialize};

/// Chain-level status consumed by monitoring and the wallet views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u32,
    pub network: String,
    /// Index of the latest block
    pub block_height: u64,
    pub difficulty: u32,
    pub pending_transactions: usize,
    pub validators: Vec<String>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub address: Party,
    pub balance: Amount,
    pub transaction_count: usize,
}

/// A sealed transaction together with the block that holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub transaction: TransactionRecord,
    pub block_index: u64,
    pub block_digest: BlockDigest,
}

impl std::fmt::Display for ChainInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} ({}) =====", self.network, self.chain_id)?;
        writeln!(f, "  Block height: {}", self.block_height)?;
        writeln!(f, "  Difficulty:   {}", self.difficulty)?;
        writeln!(f, "  Pending txs:  {}", self.pending_transactions)?;
        writeln!(f, "  Validators:   {}", self.validators.join(", "))?;
        writeln!(f, "  Valid chain:  {}", self.is_valid)
    }
}

impl std::fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({} txs)",
            self.address, self.balance, self.transaction_count
        )
    }
}
