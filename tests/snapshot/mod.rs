use crate::helpers::{setup_new_dir, test_ledger};
use fusion_chain::ledger::{
    party::Party,
    snapshot::{self, Snapshot},
    transaction::TransactionDraft,
    ChainFault, LedgerError, RewardPolicy,
};
use pretty_assertions::assert_eq;

#[test]
fn file_round_trip() -> anyhow::Result<()> {
    let dir = setup_new_dir("fusion-chain-snapshot")?;
    let path = dir.path().join("ledger.json");

    let mut ledger = test_ledger(RewardPolicy::Inline);
    ledger.submit(TransactionDraft::new("system", "A", 42.5))?;
    ledger.seal(&Party::new("miner1"));
    ledger.submit(TransactionDraft::new("A", "B", 2.5))?;

    snapshot::write_file(&ledger, &path)?;
    let restored = snapshot::parse_file(&path)?;

    assert_eq!(restored.blocks(), ledger.blocks());
    assert_eq!(restored.pending(), ledger.pending());
    assert_eq!(restored.config(), ledger.config());
    assert_eq!(
        restored.balance(&Party::new("A")),
        ledger.balance(&Party::new("A"))
    );
    Ok(())
}

#[test]
fn tampered_file_is_refused() -> anyhow::Result<()> {
    let dir = setup_new_dir("fusion-chain-snapshot")?;
    let path = dir.path().join("ledger.json");

    let mut ledger = test_ledger(RewardPolicy::Deferred);
    ledger.submit(TransactionDraft::new("system", "A", 10.0))?;
    ledger.seal(&Party::new("miner1"));
    ledger.seal(&Party::new("miner1"));

    let mut snapshot = Snapshot::from(&ledger);
    snapshot.blocks[2].nonce += 1;
    snapshot.write_file(&path)?;

    let err = snapshot::parse_file(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::Corrupt(ChainFault::DigestMismatch { index: 2 }))
    );
    Ok(())
}

#[test]
fn forged_genesis_is_refused() -> anyhow::Result<()> {
    let dir = setup_new_dir("fusion-chain-snapshot")?;
    let path = dir.path().join("ledger.json");

    let mut ledger = test_ledger(RewardPolicy::Deferred);
    ledger.seal(&Party::new("miner1"));

    let mut snapshot = Snapshot::from(&ledger);
    snapshot.blocks[0].timestamp += 1;
    snapshot.write_file(&path)?;

    let err = snapshot::parse_file(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::Corrupt(ChainFault::DigestMismatch { index: 0 }))
    );
    Ok(())
}

#[test]
fn missing_file_errors() -> anyhow::Result<()> {
    let dir = setup_new_dir("fusion-chain-snapshot")?;
    assert!(snapshot::parse_file(dir.path().join("absent.json")).is_err());
    Ok(())
}
