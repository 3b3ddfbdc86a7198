//! Per-transaction log of uncommitted writes
//!
//! Staged writes are buffered here until the coordinator commits or aborts
//! the transaction, or the site fails. Nothing in this module touches the
//! committed value table; `SiteStore::commit` takes the entry out of the log
//! and applies it.
//!
//! ## Entry lifetime
//!
//! ```text
//! stage(T, x, v)  -> entry for T created (or extended)
//! take(T)         -> entry removed and handed to the commit path
//! discard(T)      -> entry removed, writes dropped (abort)
//! clear()         -> every entry dropped (site failure)
//! ```
//!
//! Writes keep their staging order. When a transaction writes the same
//! variable more than once, the last write wins.

use rustc_hash::FxHashMap;
use sitestore_core::{TransactionId, Value, VariableId};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A single staged write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWrite {
    /// Variable being written
    pub variable: VariableId,
    /// Value to make visible on commit
    pub value: Value,
}

/// Writes one transaction staged at one site, in staging order
///
/// Most transactions touch a handful of variables per site, so the first
/// few writes are stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingWrites {
    writes: SmallVec<[PendingWrite; 4]>,
}

impl PendingWrites {
    /// Create an empty write list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a write
    pub fn push(&mut self, variable: VariableId, value: Value) {
        self.writes.push(PendingWrite { variable, value });
    }

    /// Number of staged writes, duplicates included
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Check if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Writes in staging order
    pub fn iter(&self) -> impl Iterator<Item = &PendingWrite> {
        self.writes.iter()
    }

    /// Latest value staged for `variable`
    pub fn latest(&self, variable: VariableId) -> Option<Value> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.variable == variable)
            .map(|w| w.value)
    }

    /// One write per variable, last value wins, ordered by variable id
    pub fn coalesced(&self) -> Vec<PendingWrite> {
        let mut latest = BTreeMap::new();
        for w in &self.writes {
            latest.insert(w.variable, w.value);
        }
        latest
            .into_iter()
            .map(|(variable, value)| PendingWrite { variable, value })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PendingWrites {
    type Item = &'a PendingWrite;
    type IntoIter = std::slice::Iter<'a, PendingWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.iter()
    }
}

/// Transaction id → staged writes
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: FxHashMap<TransactionId, PendingWrites>,
}

impl TransactionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write for `txn`, creating its entry on first use
    pub fn stage(&mut self, txn: TransactionId, variable: VariableId, value: Value) {
        self.entries.entry(txn).or_default().push(variable, value);
    }

    /// Writes staged by `txn`, if any
    pub fn pending(&self, txn: &TransactionId) -> Option<&PendingWrites> {
        self.entries.get(txn)
    }

    /// Latest value `txn` staged for `variable`
    pub fn staged_value(&self, txn: &TransactionId, variable: VariableId) -> Option<Value> {
        self.entries.get(txn).and_then(|w| w.latest(variable))
    }

    /// Check if `txn` has an entry
    pub fn contains(&self, txn: &TransactionId) -> bool {
        self.entries.contains_key(txn)
    }

    /// Remove and return the entry of `txn`
    pub fn take(&mut self, txn: &TransactionId) -> Option<PendingWrites> {
        self.entries.remove(txn)
    }

    /// Drop the entry of `txn`
    ///
    /// Returns whether an entry existed.
    pub fn discard(&mut self, txn: &TransactionId) -> bool {
        self.entries.remove(txn).is_some()
    }

    /// Drop every entry
    ///
    /// Returns the number of transactions that lost writes.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Transactions with staged writes, sorted by id
    pub fn transactions(&self) -> Vec<TransactionId> {
        let mut txns: Vec<TransactionId> = self.entries.keys().cloned().collect();
        txns.sort();
        txns
    }

    /// Number of transactions with staged writes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no transaction has staged writes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total staged writes across all transactions
    pub fn total_writes(&self) -> usize {
        self.entries.values().map(PendingWrites::len).sum()
    }
}
