use super::{transaction::TransactionRecord, Ledger, LedgerConfig, LedgerError};
use crate::block::Block;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Serializable image of a whole ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    pub config: LedgerConfig,
    pub blocks: Vec<Block>,
    pub pending: Vec<TransactionRecord>,
}

impl From<&Ledger> for Snapshot {
    fn from(ledger: &Ledger) -> Self {
        Self {
            config: ledger.config().clone(),
            blocks: ledger.blocks().to_vec(),
            pending: ledger.pending().to_vec(),
        }
    }
}

impl Snapshot {
    /// Rebuild the ledger, refusing chains that fail verification
    pub fn into_ledger(self) -> Result<Ledger, LedgerError> {
        let ledger = Ledger::restore(self.config, self.blocks, self.pending)?;
        ledger.verify()?;
        Ok(ledger)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path.as_ref(), serde_json::to_vec_pretty(self)?)?;
        info!(
            "Wrote snapshot of {} blocks to {}",
            self.blocks.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

pub fn write_file<P: AsRef<Path>>(ledger: &Ledger, path: P) -> anyhow::Result<()> {
    Snapshot::from(ledger).write_file(path)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Ledger> {
    debug!("Parsing snapshot at {}", path.as_ref().display());
    let data = std::fs::read(path.as_ref())?;
    let snapshot: Snapshot = serde_json::from_slice(&data)?;
    Ok(snapshot.into_ledger()?)
}
