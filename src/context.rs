//! Shared ledger handle owned by the composition root.

use crate::{
    block::{
        seal::{CancelToken, SealError, SealOptions},
        Block,
    },
    ledger::{
        party::Party,
        snapshot::Snapshot,
        summary::{BalanceSummary, ChainInfo, HistoryEntry},
        transaction::{TransactionDraft, TransactionRecord},
        ChainFault, Ledger, LedgerError,
    },
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Cloneable handle to one ledger.
///
/// Sealing holds the lock for the whole snapshot, search, append and reseed
/// sequence, so submissions made meanwhile wait and are never dropped.
#[derive(Debug, Clone)]
pub struct ChainContext {
    ledger: Arc<Mutex<Ledger>>,
    validators: Arc<Vec<String>>,
    seal_options: SealOptions,
    shutdown: CancelToken,
}

impl ChainContext {
    pub fn new(ledger: Ledger, validators: Vec<String>, mut seal_options: SealOptions) -> Self {
        let shutdown = seal_options.cancel.clone().unwrap_or_default();
        seal_options.cancel = Some(shutdown.clone());
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            validators: Arc::new(validators),
            seal_options,
            shutdown,
        }
    }

    pub async fn submit(&self, draft: TransactionDraft) -> Result<TransactionRecord, LedgerError> {
        self.ledger.lock().await.submit(draft)
    }

    /// Seal on a blocking worker so the async runtime stays responsive
    #[instrument(skip(self))]
    pub async fn seal(&self, sealer: Party) -> Result<Block, LedgerError> {
        let ledger = self.ledger.clone();
        let options = self.seal_options.clone();
        let worker = tokio::task::spawn_blocking(move || {
            let mut ledger = ledger.blocking_lock();
            ledger.seal_with(&sealer, &options)
        });

        match worker.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                warn!("Sealing worker did not complete: {err}");
                Err(SealError::Cancelled { attempts: 0 }.into())
            }
        }
    }

    pub async fn chain_info(&self) -> ChainInfo {
        self.ledger.lock().await.chain_info(&self.validators)
    }

    pub async fn blocks(&self) -> Vec<Block> {
        self.ledger.lock().await.blocks().to_vec()
    }

    pub async fn block(&self, index: u64) -> Option<Block> {
        self.ledger.lock().await.block(index).cloned()
    }

    pub async fn pending(&self) -> Vec<TransactionRecord> {
        self.ledger.lock().await.pending().to_vec()
    }

    pub async fn verify(&self) -> Result<(), ChainFault> {
        self.ledger.lock().await.verify()
    }

    pub async fn balance(&self, party: &Party) -> BalanceSummary {
        self.ledger.lock().await.balance_summary(party)
    }

    pub async fn history(&self, party: &Party) -> Vec<HistoryEntry> {
        self.ledger.lock().await.history(party)
    }

    pub async fn snapshot(&self) -> Snapshot {
        Snapshot::from(&*self.ledger.lock().await)
    }

    /// Abort any running search; later seals fail immediately
    pub fn shutdown(&self) {
        info!("Cancelling in-flight sealing");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
