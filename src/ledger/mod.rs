pub mod amount;
pub mod party;
pub mod snapshot;
pub mod summary;
pub mod transaction;

use crate::{
    block::{
        digest::DigestAlgorithm,
        seal::{BlockTemplate, SealError, SealOptions},
        Block, BlockDigest,
    },
    constants::{now_millis, CHAIN_ID, DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD, NETWORK_NAME},
    ledger::{
        amount::Amount,
        party::Party,
        summary::{BalanceSummary, ChainInfo, HistoryEntry},
        transaction::{TransactionDraft, TransactionRecord, ValidationError},
    },
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Where the sealer's reward goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RewardPolicy {
    /// Reward replaces the pending queue and lands in the next sealed block
    #[default]
    Deferred,
    /// Reward is included in the block being sealed
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Required count of leading `'0'` characters in every digest
    pub difficulty: u32,
    pub reward: Amount,
    pub algorithm: DigestAlgorithm,
    pub reward_policy: RewardPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            reward: Amount::from(DEFAULT_MINING_REWARD),
            algorithm: DigestAlgorithm::default(),
            reward_policy: RewardPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Seal(#[from] SealError),
    #[error("difficulty {difficulty} exceeds the {width} character {algorithm} digest")]
    UnreachableDifficulty {
        difficulty: u32,
        width: usize,
        algorithm: DigestAlgorithm,
    },
    #[error("ledger has no genesis block")]
    MissingGenesis,
    #[error("invalid chain: {0}")]
    Corrupt(#[from] ChainFault),
}

/// First violation found while walking the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChainFault {
    #[error("genesis block must have index 0 and previous digest \"0\"")]
    MalformedGenesis,
    #[error("block {index} follows block {previous}")]
    IndexGap { index: u64, previous: u64 },
    #[error("block {index} digest does not match its contents")]
    DigestMismatch { index: u64 },
    #[error("block {index} does not link to its predecessor")]
    BrokenLink { index: u64 },
    #[error("block {index} digest does not meet the difficulty")]
    InsufficientWork { index: u64 },
}

/// In-memory hash-linked ledger.
///
/// The block sequence is never empty and only grows. Pending transactions
/// wait in arrival order until the next seal.
#[derive(Debug, Clone)]
pub struct Ledger {
    blocks: Vec<Block>,
    pending: Vec<TransactionRecord>,
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger with a freshly sealed genesis block
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        check_difficulty(&config)?;

        let genesis = BlockTemplate {
            index: 0,
            timestamp: now_millis(),
            transactions: vec![],
            previous_digest: BlockDigest::genesis_parent(),
        }
        .seal(config.difficulty, config.algorithm);
        info!("Genesis block sealed: {}", genesis.digest);

        Ok(Self {
            blocks: vec![genesis],
            pending: vec![],
            config,
        })
    }

    /// Rebuild a ledger from existing parts without verifying them
    pub fn restore(
        config: LedgerConfig,
        blocks: Vec<Block>,
        pending: Vec<TransactionRecord>,
    ) -> Result<Self, LedgerError> {
        check_difficulty(&config)?;
        if blocks.is_empty() {
            return Err(LedgerError::MissingGenesis);
        }
        Ok(Self {
            blocks,
            pending,
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Validate a draft and queue the resulting record
    pub fn submit(&mut self, draft: TransactionDraft) -> Result<TransactionRecord, LedgerError> {
        let record = draft.finalize().map_err(|err| {
            warn!("Rejected transaction: {err}");
            err
        })?;

        debug!(
            "Queued transaction {} ({} -> {}: {})",
            record.id, record.from, record.to, record.amount
        );
        self.pending.push(record.clone());
        Ok(record)
    }

    /// Seal the pending queue into a new block, searching without bound
    pub fn seal(&mut self, sealer: &Party) -> Block {
        let template = self.next_template(sealer);
        let block = template.seal(self.config.difficulty, self.config.algorithm);
        self.commit(block, sealer)
    }

    /// Like [`Ledger::seal`] but gives up according to `options`.
    /// A failed search leaves the ledger untouched.
    pub fn seal_with(
        &mut self,
        sealer: &Party,
        options: &SealOptions,
    ) -> Result<Block, LedgerError> {
        let template = self.next_template(sealer);
        let block = template.seal_with(self.config.difficulty, self.config.algorithm, options)?;
        Ok(self.commit(block, sealer))
    }

    fn next_template(&self, sealer: &Party) -> BlockTemplate {
        let mut transactions = self.pending.clone();
        if self.config.reward_policy == RewardPolicy::Inline {
            transactions.push(TransactionRecord::reward(sealer.clone(), self.config.reward));
        }

        BlockTemplate {
            index: self.blocks.len() as u64,
            timestamp: now_millis(),
            transactions,
            previous_digest: self.tip().digest.clone(),
        }
    }

    fn commit(&mut self, block: Block, sealer: &Party) -> Block {
        info!(
            "Appending block {} ({} txs) sealed by {sealer}: {}",
            block.index,
            block.transactions.len(),
            block.digest
        );
        self.blocks.push(block.clone());

        self.pending = match self.config.reward_policy {
            RewardPolicy::Deferred => {
                vec![TransactionRecord::reward(sealer.clone(), self.config.reward)]
            }
            RewardPolicy::Inline => vec![],
        };
        block
    }

    fn tip(&self) -> &Block {
        // genesis is always present
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn latest_block(&self) -> &Block {
        self.tip()
    }

    /// Index of the latest block
    pub fn height(&self) -> u64 {
        self.tip().index
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: u64) -> Option<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.blocks.get(index))
    }

    pub fn pending(&self) -> &[TransactionRecord] {
        &self.pending
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// Walk the chain from genesis, checking contiguity, digests, links and work
    pub fn verify(&self) -> Result<(), ChainFault> {
        let genesis = &self.blocks[0];
        if !genesis.is_genesis() || genesis.previous_digest != BlockDigest::genesis_parent() {
            return Err(ChainFault::MalformedGenesis);
        }
        self.check_sealed(genesis)?;

        for pair in self.blocks.windows(2) {
            let (previous, block) = (&pair[0], &pair[1]);
            if previous.index.checked_add(1) != Some(block.index) {
                return Err(ChainFault::IndexGap {
                    index: block.index,
                    previous: previous.index,
                });
            }
            if !block.has_consistent_digest(self.config.algorithm) {
                return Err(ChainFault::DigestMismatch { index: block.index });
            }
            if block.previous_digest != previous.digest {
                return Err(ChainFault::BrokenLink { index: block.index });
            }
            if !block.digest.meets_difficulty(self.config.difficulty) {
                return Err(ChainFault::InsufficientWork { index: block.index });
            }
        }
        Ok(())
    }

    fn check_sealed(&self, block: &Block) -> Result<(), ChainFault> {
        if !block.has_consistent_digest(self.config.algorithm) {
            return Err(ChainFault::DigestMismatch { index: block.index });
        }
        if !block.digest.meets_difficulty(self.config.difficulty) {
            return Err(ChainFault::InsufficientWork { index: block.index });
        }
        Ok(())
    }

    fn sealed_transactions(&self) -> impl Iterator<Item = (&Block, &TransactionRecord)> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.transactions.iter().map(move |tx| (block, tx)))
    }

    /// Replay every sealed transaction. No overdraft floor is applied.
    pub fn balance(&self, party: &Party) -> Amount {
        self.sealed_transactions()
            .fold(Amount::ZERO, |mut balance, (_, tx)| {
                if &tx.from == party {
                    balance -= tx.amount;
                }
                if &tx.to == party {
                    balance += tx.amount;
                }
                balance
            })
    }

    pub fn balance_summary(&self, party: &Party) -> BalanceSummary {
        BalanceSummary {
            address: party.clone(),
            balance: self.balance(party),
            transaction_count: self
                .sealed_transactions()
                .filter(|(_, tx)| tx.involves(party))
                .count(),
        }
    }

    /// Sealed transactions involving `party`, in block order
    pub fn history(&self, party: &Party) -> Vec<HistoryEntry> {
        self.sealed_transactions()
            .filter(|(_, tx)| tx.involves(party))
            .map(|(block, tx)| HistoryEntry {
                transaction: tx.clone(),
                block_index: block.index,
                block_digest: block.digest.clone(),
            })
            .collect()
    }

    pub fn chain_info(&self, validators: &[String]) -> ChainInfo {
        ChainInfo {
            chain_id: CHAIN_ID,
            network: NETWORK_NAME.to_string(),
            block_height: self.height(),
            difficulty: self.config.difficulty,
            pending_transactions: self.pending_len(),
            validators: validators.to_vec(),
            is_valid: self.is_valid(),
        }
    }
}

fn check_difficulty(config: &LedgerConfig) -> Result<(), LedgerError> {
    let width = config.algorithm.width();
    if config.difficulty as usize > width {
        return Err(LedgerError::UnreachableDifficulty {
            difficulty: config.difficulty,
            width,
            algorithm: config.algorithm,
        });
    }
    Ok(())
}

impl std::fmt::Display for RewardPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardPolicy::Deferred => write!(f, "deferred"),
            RewardPolicy::Inline => write!(f, "inline"),
        }
    }
}
