//! Block digest functions.
//!
//! A digest is computed over the textual preimage
//! `{index}{previous_digest}{timestamp}{transactions_json}{nonce}`.
//! Both algorithms render fixed-width lower-case hex.

use super::BlockDigest;
use crate::ledger::transaction::TransactionRecord;
use blake2::{digest::consts::U32, Blake2b, Digest};
use clap::ValueEnum;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};

type Blake2b256 = Blake2b<U32>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// BLAKE2b with a 32 byte output
    #[default]
    Blake2b,
    /// 32-bit rolling fold over UTF-16 code units
    Rolling,
}

impl DigestAlgorithm {
    /// Number of hex characters in every digest this algorithm produces
    pub fn width(&self) -> usize {
        match self {
            DigestAlgorithm::Blake2b => 64,
            DigestAlgorithm::Rolling => 8,
        }
    }

    pub fn digest(&self, preimage: &str) -> BlockDigest {
        let hex = match self {
            DigestAlgorithm::Blake2b => HEXLOWER.encode(&Blake2b256::digest(preimage.as_bytes())),
            DigestAlgorithm::Rolling => rolling_fold(preimage),
        };
        BlockDigest(hex)
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Blake2b => write!(f, "blake2b"),
            DigestAlgorithm::Rolling => write!(f, "rolling"),
        }
    }
}

/// `h = h * 31 + unit` in wrapping i32 arithmetic, then `|h|` as 8 hex chars
fn rolling_fold(preimage: &str) -> String {
    let folded = preimage.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    format!("{:08x}", folded.unsigned_abs())
}

/// Digest preimage with everything but the nonce rendered once per search
#[derive(Debug, Clone)]
pub struct Preimage {
    prefix: String,
}

impl Preimage {
    pub fn new(
        index: u64,
        previous_digest: &BlockDigest,
        timestamp: i64,
        transactions: &[TransactionRecord],
    ) -> Self {
        // records hold only strings, integers and finite decimals, none of
        // which serde_json can fail on
        let transactions_json = serde_json::to_string(transactions)
            .expect("transaction records always serialize to JSON");
        Self {
            prefix: format!("{index}{}{timestamp}{transactions_json}", previous_digest.0),
        }
    }

    pub fn with_nonce(&self, nonce: u64) -> String {
        format!("{}{nonce}", self.prefix)
    }
}
