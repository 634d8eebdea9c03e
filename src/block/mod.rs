pub mod digest;
pub mod seal;

use self::digest::{DigestAlgorithm, Preimage};
use crate::{constants::GENESIS_PREVIOUS_DIGEST, ledger::transaction::TransactionRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result};

#[derive(Hash, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockDigest(pub String);

impl BlockDigest {
    /// Previous digest recorded by the genesis block
    pub fn genesis_parent() -> Self {
        Self(GENESIS_PREVIOUS_DIGEST.to_string())
    }

    /// Textual proof-of-work check: the first `difficulty` characters are all `'0'`
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        self.0.len() >= difficulty && self.0.chars().take(difficulty).all(|c| c == '0')
    }
}

impl std::fmt::Display for BlockDigest {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for BlockDigest {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "BlockDigest {{ {:?} }}", self.0)
    }
}

#[derive(PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: i64,
    pub transactions: Vec<TransactionRecord>,
    pub previous_digest: BlockDigest,
    pub nonce: u64,
    pub digest: BlockDigest,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    pub fn preimage(&self) -> Preimage {
        Preimage::new(
            self.index,
            &self.previous_digest,
            self.timestamp,
            &self.transactions,
        )
    }

    /// Recompute the digest from the block's own fields
    pub fn compute_digest(&self, algorithm: DigestAlgorithm) -> BlockDigest {
        algorithm.digest(&self.preimage().with_nonce(self.nonce))
    }

    pub fn has_consistent_digest(&self, algorithm: DigestAlgorithm) -> bool {
        self.compute_digest(algorithm) == self.digest
    }
}

impl Debug for Block {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "\nBlock {{\n  index:    {:?},\n  digest:   {:?},\n  previous: {:?},\n  nonce:    {:?},\n  txs:      {} }}",
            self.index,
            self.digest,
            self.previous_digest,
            self.nonce,
            self.transactions.len()
        )
    }
}
