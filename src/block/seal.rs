//! Proof-of-work nonce search.

use super::{
    digest::{DigestAlgorithm, Preimage},
    Block, BlockDigest,
};
use crate::{constants::SEAL_REPORTING_FREQ, ledger::transaction::TransactionRecord};
use std::{
    convert::Infallible,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SealError {
    #[error("no nonce satisfied the difficulty within {attempts} attempts")]
    Timeout { attempts: u64 },
    #[error("sealing cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
}

/// Shared flag checked once per nonce
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SealOptions {
    pub max_attempts: Option<u64>,
    pub deadline: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

/// Everything a block needs except its nonce and digest
#[derive(Debug, Clone)]
pub struct BlockTemplate {
    pub index: u64,
    pub timestamp: i64,
    pub transactions: Vec<TransactionRecord>,
    pub previous_digest: BlockDigest,
}

impl BlockTemplate {
    /// Search until a nonce satisfies `difficulty`. Never gives up.
    pub fn seal(self, difficulty: u32, algorithm: DigestAlgorithm) -> Block {
        match self.search::<Infallible, _>(difficulty, algorithm, |_| None) {
            Ok(block) => block,
            Err(never) => match never {},
        }
    }

    /// Search bounded by attempts, wall time and cancellation
    pub fn seal_with(
        self,
        difficulty: u32,
        algorithm: DigestAlgorithm,
        options: &SealOptions,
    ) -> Result<Block, SealError> {
        let started = Instant::now();
        self.search(difficulty, algorithm, |attempts| {
            if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Some(SealError::Cancelled { attempts });
            }
            if options.max_attempts.is_some_and(|max| attempts >= max)
                || options
                    .deadline
                    .is_some_and(|deadline| started.elapsed() >= deadline)
            {
                return Some(SealError::Timeout { attempts });
            }
            None
        })
    }

    fn search<E, F>(
        self,
        difficulty: u32,
        algorithm: DigestAlgorithm,
        mut stop: F,
    ) -> Result<Block, E>
    where
        E: std::fmt::Debug,
        F: FnMut(u64) -> Option<E>,
    {
        let preimage = Preimage::new(
            self.index,
            &self.previous_digest,
            self.timestamp,
            &self.transactions,
        );
        trace!("Sealing block {} at difficulty {difficulty}", self.index);

        let mut nonce = 0u64;
        let mut attempts = 0u64;
        loop {
            if let Some(err) = stop(attempts) {
                debug!("Stopped sealing block {}: {err:?}", self.index);
                return Err(err);
            }

            let digest = algorithm.digest(&preimage.with_nonce(nonce));
            if digest.meets_difficulty(difficulty) {
                debug!(
                    "Sealed block {} with nonce {nonce} after {} attempts",
                    self.index,
                    attempts + 1
                );
                return Ok(Block {
                    index: self.index,
                    timestamp: self.timestamp,
                    transactions: self.transactions,
                    previous_digest: self.previous_digest,
                    nonce,
                    digest,
                });
            }

            attempts = attempts.saturating_add(1);
            if attempts % SEAL_REPORTING_FREQ == 0 {
                debug!("Still sealing block {}: {attempts} attempts", self.index);
            }
            nonce = nonce.wrapping_add(1);
        }
    }
}
