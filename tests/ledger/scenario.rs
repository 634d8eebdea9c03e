use crate::helpers::test_ledger;
use fusion_chain::ledger::{
    amount::Amount, party::Party, transaction::TransactionDraft, RewardPolicy,
};
use pretty_assertions::assert_eq;

#[test]
fn mint_then_reward_lag() {
    let mut ledger = test_ledger(RewardPolicy::Deferred);
    let miner = Party::new("miner1");
    let alice = Party::new("A");

    ledger
        .submit(TransactionDraft::new("system", "A", 1000.0))
        .unwrap();
    ledger.seal(&miner);
    assert_eq!(ledger.balance(&alice), Amount::from(1000));
    assert_eq!(ledger.balance(&miner), Amount::ZERO);

    // pending holds only the seeded reward
    assert_eq!(ledger.pending_len(), 1);
    ledger.seal(&miner);
    assert_eq!(ledger.height(), 2);
    assert!(ledger.is_valid());
    assert_eq!(ledger.balance(&miner), Amount::from(100));

    ledger.seal(&miner);
    assert_eq!(ledger.height(), 3);
    assert_eq!(ledger.balance(&miner), Amount::from(200));
    assert_eq!(ledger.balance(&alice), Amount::from(1000));
}

#[test]
fn inline_rewards_are_immediate() {
    let mut ledger = test_ledger(RewardPolicy::Inline);
    let miner = Party::new("miner1");

    ledger.seal(&miner);
    assert_eq!(ledger.balance(&miner), Amount::from(100));
    ledger.seal(&miner);
    assert_eq!(ledger.balance(&miner), Amount::from(200));
    assert_eq!(ledger.pending_len(), 0);
    assert!(ledger.is_valid());
}

#[test]
fn transfer_moves_balance() {
    let mut ledger = test_ledger(RewardPolicy::Deferred);
    let (x, y) = (Party::new("X"), Party::new("Y"));
    let miner = Party::new("miner1");

    ledger
        .submit(TransactionDraft::new("system", "X", 500.0))
        .unwrap();
    ledger.seal(&miner);
    let (x_before, y_before) = (ledger.balance(&x), ledger.balance(&y));

    ledger.submit(TransactionDraft::new("X", "Y", 120.0)).unwrap();
    ledger.submit(TransactionDraft::new("X", "Y", 30.5)).unwrap();
    ledger.seal(&miner);

    let total = Amount::from_f64(150.5).unwrap();
    assert_eq!(ledger.balance(&x), x_before - total);
    assert_eq!(ledger.balance(&y), y_before + total);
}

#[test]
fn history_in_block_order() {
    let mut ledger = test_ledger(RewardPolicy::Deferred);
    let miner = Party::new("miner1");
    let alice = Party::new("A");

    let first = ledger
        .submit(TransactionDraft::new("system", "A", 10.0))
        .unwrap();
    ledger.seal(&miner);
    let second = ledger.submit(TransactionDraft::new("A", "B", 4.0)).unwrap();
    let block = ledger.seal(&miner);

    let history = ledger.history(&alice);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].transaction, first);
    assert_eq!(history[0].block_index, 1);
    assert_eq!(history[1].transaction, second);
    assert_eq!(history[1].block_index, 2);
    assert_eq!(history[1].block_digest, block.digest);

    let summary = ledger.balance_summary(&alice);
    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.balance, Amount::from(6));

    // pending transactions are not history
    ledger.submit(TransactionDraft::new("A", "C", 1.0)).unwrap();
    assert_eq!(ledger.history(&alice).len(), 2);
    assert!(ledger.history(&Party::new("C")).is_empty());
}

#[test]
fn contiguous_indices_stay_valid() {
    let mut ledger = test_ledger(RewardPolicy::Deferred);
    let miner = Party::new("miner1");

    for expected in 1..=6u64 {
        let block = ledger.seal(&miner);
        assert_eq!(block.index, expected);
        assert!(ledger.is_valid());
    }

    let indices: Vec<u64> = ledger.blocks().iter().map(|block| block.index).collect();
    assert_eq!(indices, (0..=6).collect::<Vec<_>>());
}
