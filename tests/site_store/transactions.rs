//! Stage / commit / abort / failure tests

use crate::common::*;

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn direct_write_is_visible_immediately() {
    let mut store = store(4, 2, 1);
    store.write(x(2), 99).unwrap();
    assert_eq!(store.read(x(2)).unwrap(), 99);
    assert!(store.pending_transactions().is_empty());
}

#[test]
fn staged_write_is_visible_only_after_commit() {
    let mut store = store(4, 2, 1);
    let t1 = txn("T1");

    store.stage(t1.clone(), x(2), 99).unwrap();
    assert_eq!(store.read(x(2)).unwrap(), 20);
    assert_eq!(store.staged_value(&t1, x(2)), Some(99));

    store.commit(&t1).unwrap();
    assert_eq!(store.read(x(2)).unwrap(), 99);
    assert_eq!(store.staged_value(&t1, x(2)), None);
}

#[test]
fn last_write_within_transaction_wins() {
    let mut store = store(6, 2, 2);
    let t1 = txn("T1");
    store.stage(t1.clone(), x(3), 1).unwrap();
    store.stage(t1.clone(), x(4), 2).unwrap();
    store.stage(t1.clone(), x(3), 3).unwrap();
    assert_eq!(store.pending_writes(&t1).unwrap().len(), 3);

    let outcome = store.commit(&t1).unwrap();
    assert_eq!(
        outcome.writes(),
        &[
            PendingWrite { variable: x(3), value: 3 },
            PendingWrite { variable: x(4), value: 2 },
        ]
    );
    assert_eq!(store.read(x(3)).unwrap(), 3);
    assert_eq!(store.read(x(4)).unwrap(), 2);
}

#[test]
fn commit_order_decides_across_transactions() {
    let mut store = store(4, 2, 1);
    store.stage("T1", x(2), 1).unwrap();
    store.stage("T2", x(2), 2).unwrap();

    store.commit(&txn("T2")).unwrap();
    store.commit(&txn("T1")).unwrap();
    assert_eq!(store.read(x(2)).unwrap(), 1);
}

#[test]
fn transactions_are_isolated_in_the_log() {
    let mut store = store(4, 2, 1);
    store.stage("T1", x(2), 1).unwrap();
    store.stage("T2", x(4), 2).unwrap();

    store.commit(&txn("T1")).unwrap();
    assert_eq!(store.read(x(4)).unwrap(), 40);
    assert_eq!(store.pending_transactions(), vec![txn("T2")]);
}

// ============================================================================
// Commit edge cases
// ============================================================================

#[test]
fn second_commit_changes_nothing() {
    let mut store = store(4, 2, 1);
    let t1 = txn("T1");
    store.stage(t1.clone(), x(2), 5).unwrap();
    assert!(store.commit(&t1).unwrap().is_applied());

    let after_first = store.dump();
    let outcome = store.commit(&t1).unwrap();
    assert_eq!(outcome, CommitOutcome::NothingStaged);
    assert_eq!(store.dump(), after_first);
}

#[test]
fn commit_of_unknown_transaction_is_not_an_error() {
    let mut store = store(4, 2, 1);
    assert_eq!(store.commit(&txn("T42")).unwrap(), CommitOutcome::NothingStaged);
}

#[test]
fn pending_writes_of_unknown_transaction_is_an_error() {
    let store = store(4, 2, 1);
    let err = store.pending_writes(&txn("T42")).unwrap_err();
    assert!(err.is_unknown_transaction());
    assert_eq!(err.to_string(), "unknown transaction: T42");
}

// ============================================================================
// Abort
// ============================================================================

#[test]
fn abort_leaves_committed_values_unchanged() {
    let mut store = default_store(2);
    let before = store.dump();
    let t1 = txn("T1");
    let resident = store.table().resident_variables();
    for id in resident {
        store.stage(t1.clone(), id, -1).unwrap();
    }

    assert!(store.abort(&t1));
    assert_eq!(store.dump(), before);
    assert!(store.pending_transactions().is_empty());
}

#[test]
fn abort_without_stage_is_noop() {
    let mut store = store(4, 2, 1);
    assert!(!store.abort(&txn("T1")));
    assert!(!store.revert_transaction_changes(&txn("T1")));
    assert_eq!(store.metrics().aborts, 0);
}

#[test]
fn revert_is_abort() {
    let mut store = store(4, 2, 1);
    store.stage("T1", x(2), 3).unwrap();
    assert!(store.revert_transaction_changes(&txn("T1")));
    assert_eq!(store.commit(&txn("T1")).unwrap(), CommitOutcome::NothingStaged);
    assert_eq!(store.read(x(2)).unwrap(), 20);
}

#[test]
fn abort_only_affects_one_transaction() {
    let mut store = store(4, 2, 1);
    store.stage("T1", x(2), 1).unwrap();
    store.stage("T2", x(2), 2).unwrap();
    store.abort(&txn("T1"));
    store.commit(&txn("T2")).unwrap();
    assert_eq!(store.read(x(2)).unwrap(), 2);
}

// ============================================================================
// Site failure
// ============================================================================

#[test]
fn clear_uncommitted_changes_drops_every_transaction() {
    let mut store = default_store(2);
    let before = store.dump();
    store.stage("T1", x(1), 1).unwrap();
    store.stage("T2", x(2), 2).unwrap();
    store.stage("T3", x(11), 3).unwrap();

    assert_eq!(store.clear_uncommitted_changes(), 3);
    assert!(store.pending_transactions().is_empty());
    assert_eq!(store.dump(), before);

    // nothing left to commit
    for name in ["T1", "T2", "T3"] {
        assert_eq!(store.commit(&txn(name)).unwrap(), CommitOutcome::NothingStaged);
    }
    assert_eq!(store.dump(), before);
}

#[test]
fn clear_on_empty_log_is_noop() {
    let mut store = store(4, 2, 1);
    assert_eq!(store.clear_uncommitted_changes(), 0);
    assert_eq!(store.metrics().transactions_lost, 0);
}

#[test]
fn committed_values_survive_failure_and_recovery() {
    let mut store = default_store(2);
    store.stage("T1", x(2), 77).unwrap();
    store.commit(&txn("T1")).unwrap();

    store.stage("T2", x(2), 88).unwrap();
    store.clear_uncommitted_changes();
    store.recompute_accessibility_on_recover();

    assert_eq!(store.read(x(2)).unwrap(), 77);
    assert!(!store.check_accessibility(x(2)).unwrap());
    assert!(store.check_accessibility(x(1)).unwrap());
}

#[test]
fn metrics_track_lifecycle() {
    let mut store = default_store(2);
    store.stage("T1", x(2), 1).unwrap();
    store.stage("T1", x(4), 1).unwrap();
    store.commit(&txn("T1")).unwrap();
    store.commit(&txn("T1")).unwrap();
    store.stage("T2", x(2), 1).unwrap();
    store.abort(&txn("T2"));

    let m = store.metrics();
    assert_eq!(m.commits, 1);
    assert_eq!(m.empty_commits, 1);
    assert_eq!(m.writes_committed, 2);
    assert_eq!(m.aborts, 1);
}
