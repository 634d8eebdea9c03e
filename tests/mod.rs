mod snapshot;
mod web;

pub mod helpers {
    use fusion_chain::ledger::{Ledger, LedgerConfig, RewardPolicy};

    /// Ledger cheap enough to seal many times per test
    pub fn test_ledger(reward_policy: RewardPolicy) -> Ledger {
        Ledger::new(LedgerConfig {
            difficulty: 1,
            reward_policy,
            ..Default::default()
        })
        .expect("test ledger")
    }

    /// Sets up a new temp dir, deleted when it goes out of scope
    pub fn setup_new_dir(prefix: &str) -> anyhow::Result<tempfile::TempDir> {
        Ok(tempfile::Builder::new().prefix(prefix).tempdir()?)
    }
}
