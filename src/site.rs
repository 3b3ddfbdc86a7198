//! Site store: the storage component of a single site.
//!
//! A `SiteStore` owns three things:
//! - the committed value table (seeded by placement),
//! - the per-variable accessibility flags,
//! - the log of writes staged by transactions that have not finished.
//!
//! The coordinator drives it one operation at a time. The store reports
//! accessibility but never enforces it; a coordinator must consult
//! [`SiteStore::check_accessibility`] before issuing a read.
//!
//! ## Lifecycle
//!
//! ```text
//! new(config, site)                 seed values, flags = residency
//! stage(T, x, v) ... commit(T)      staged writes become visible
//! stage(T, x, v) ... abort(T)       staged writes dropped
//! clear_uncommitted_changes()       site failed: every staged write dropped
//! recompute_accessibility_on_recover()
//!                                   site rejoined: replicated copies unreadable
//!                                   until a local commit refreshes them
//! ```

use sitestore_concurrency::{PendingWrite, PendingWrites, TransactionLog};
use sitestore_core::{Error, Result, SiteId, StoreConfig, TransactionId, Value, VariableId};
use sitestore_storage::{SiteDump, VariableTable};
use tracing::{debug, info, warn};

/// Result of [`SiteStore::commit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Staged writes were applied, one per variable, ordered by variable id
    Applied(Vec<PendingWrite>),
    /// The transaction staged nothing at this site
    NothingStaged,
}

impl CommitOutcome {
    /// Check if any write was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, CommitOutcome::Applied(_))
    }

    /// Writes that became visible
    pub fn writes(&self) -> &[PendingWrite] {
        match self {
            CommitOutcome::Applied(writes) => writes,
            CommitOutcome::NothingStaged => &[],
        }
    }
}

/// Counters for one site store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteMetrics {
    /// Commits that applied at least one write
    pub commits: u64,
    /// Commits of transactions that staged nothing here
    pub empty_commits: u64,
    /// Aborts that discarded staged writes
    pub aborts: u64,
    /// Distinct variable writes made visible by commits
    pub writes_committed: u64,
    /// Transactions whose staged writes were lost to a site failure
    pub transactions_lost: u64,
    /// Recovery recomputes performed
    pub recoveries: u64,
}

/// Storage component of one site.
#[derive(Debug, Clone)]
pub struct SiteStore {
    table: VariableTable,
    log: TransactionLog,
    metrics: SiteMetrics,
}

impl SiteStore {
    /// Create the store for `site`.
    ///
    /// Values are seeded by placement: resident variables hold `10 * id` and
    /// start accessible, everything else is absent and inaccessible.
    ///
    /// # Errors
    ///
    /// `InvalidSiteId` if `site` is outside `[1, site_count]`.
    ///
    /// # Example
    ///
    /// ```
    /// use sitestore::prelude::*;
    ///
    /// let config = StoreConfig::new(4, 2)?;
    /// let store = SiteStore::new(config, SiteId::new(2))?;
    /// assert_eq!(store.read(VariableId::new(3))?, 30);
    /// # Ok::<(), sitestore::Error>(())
    /// ```
    pub fn new(config: StoreConfig, site: SiteId) -> Result<Self> {
        let table = VariableTable::seed(config, site)?;
        info!(
            site = site.get(),
            resident = table.resident_variables().len(),
            "site store created"
        );
        Ok(SiteStore {
            table,
            log: TransactionLog::new(),
            metrics: SiteMetrics::default(),
        })
    }

    /// Site this store belongs to.
    pub fn site_id(&self) -> SiteId {
        self.table.site()
    }

    /// Configuration the store was created with.
    pub fn config(&self) -> &StoreConfig {
        self.table.config()
    }

    /// Whether `id` has a copy at this site.
    pub fn is_resident(&self, id: VariableId) -> bool {
        self.table.is_resident(id)
    }

    /// Committed value of `id`.
    ///
    /// Does not look at the accessibility flag.
    ///
    /// # Errors
    ///
    /// `InvalidVariableId` if `id` is out of range or not resident here.
    pub fn read(&self, id: VariableId) -> Result<Value> {
        self.table.get(id)
    }

    /// Overwrite the committed value of `id` directly, bypassing the log.
    ///
    /// No accessibility check, and the flag is left unchanged.
    pub fn write(&mut self, id: VariableId, value: Value) -> Result<()> {
        self.table.set(id, value)?;
        Ok(())
    }

    /// Accessibility flag of `id`.
    ///
    /// Any id in `[1, N]` is valid; variables not resident here report `false`.
    pub fn check_accessibility(&self, id: VariableId) -> Result<bool> {
        self.table.is_accessible(id)
    }

    /// Record a write for `txn` without changing committed state.
    ///
    /// # Errors
    ///
    /// `InvalidVariableId` if `id` is out of range or not resident here. The
    /// check happens now so that commit cannot fail part way.
    pub fn stage(
        &mut self,
        txn: impl Into<TransactionId>,
        id: VariableId,
        value: Value,
    ) -> Result<()> {
        self.table.check_resident(id)?;
        self.log.stage(txn.into(), id, value);
        Ok(())
    }

    /// Latest value `txn` staged for `id`, if any.
    pub fn staged_value(&self, txn: &TransactionId, id: VariableId) -> Option<Value> {
        self.log.staged_value(txn, id)
    }

    /// Writes staged by `txn`.
    ///
    /// # Errors
    ///
    /// `UnknownTransaction` if `txn` has nothing staged here.
    pub fn pending_writes(&self, txn: &TransactionId) -> Result<&PendingWrites> {
        self.log
            .pending(txn)
            .ok_or_else(|| Error::UnknownTransaction(txn.clone()))
    }

    /// Transactions with staged writes here, sorted by id.
    pub fn pending_transactions(&self) -> Vec<TransactionId> {
        self.log.transactions()
    }

    /// Make every write staged by `txn` visible and drop its log entry.
    ///
    /// Writes are merged by per-variable assignment; if `txn` wrote a
    /// variable more than once, the last value wins. Each written variable
    /// becomes accessible, which is how replicated copies turn readable again
    /// after a recovery.
    ///
    /// A transaction that staged nothing here commits as a no-op.
    ///
    /// The log entry is removed only after the table has accepted every
    /// write, so a rejected commit leaves both untouched.
    pub fn commit(&mut self, txn: &TransactionId) -> Result<CommitOutcome> {
        let writes = match self.log.pending(txn) {
            Some(pending) => pending.coalesced(),
            None => {
                self.metrics.empty_commits += 1;
                debug!(site = self.site_id().get(), txn = %txn, "commit with nothing staged");
                return Ok(CommitOutcome::NothingStaged);
            }
        };

        self.table
            .apply_committed(writes.iter().map(|w| (w.variable, w.value)))?;
        self.log.discard(txn);

        self.metrics.commits += 1;
        self.metrics.writes_committed += writes.len() as u64;
        debug!(
            site = self.site_id().get(),
            txn = %txn,
            writes = writes.len(),
            "transaction committed"
        );
        Ok(CommitOutcome::Applied(writes))
    }

    /// Drop everything `txn` staged here. Committed values are untouched.
    ///
    /// Returns whether anything was discarded.
    pub fn abort(&mut self, txn: &TransactionId) -> bool {
        let discarded = self.log.discard(txn);
        if discarded {
            self.metrics.aborts += 1;
            debug!(site = self.site_id().get(), txn = %txn, "staged writes reverted");
        }
        discarded
    }

    /// Same as [`abort`](Self::abort).
    pub fn revert_transaction_changes(&mut self, txn: &TransactionId) -> bool {
        self.abort(txn)
    }

    /// Drop every staged write of every transaction (site failure).
    ///
    /// Returns the number of transactions that lost writes.
    pub fn clear_uncommitted_changes(&mut self) -> usize {
        let lost_writes = self.log.total_writes();
        let lost = self.log.clear();
        if lost > 0 {
            warn!(
                site = self.site_id().get(),
                transactions = lost,
                writes = lost_writes,
                "uncommitted changes discarded"
            );
        }
        self.metrics.transactions_lost += lost as u64;
        lost
    }

    /// Reset accessibility after the site rejoins.
    ///
    /// Variables hosted only here become accessible; every other variable
    /// becomes inaccessible until a local commit writes it. Calling this
    /// twice without an intervening commit gives the same flags.
    pub fn recompute_accessibility_on_recover(&mut self) {
        self.table.reset_accessibility_after_recovery();
        self.metrics.recoveries += 1;
        info!(
            site = self.site_id().get(),
            accessible = self.table.accessible_variables().len(),
            "accessibility recomputed after recovery"
        );
    }

    /// Read-only copy of the committed values, for display.
    pub fn dump(&self) -> SiteDump {
        self.table.dump()
    }

    /// Committed table, read-only.
    pub fn table(&self) -> &VariableTable {
        &self.table
    }

    /// Counters since creation.
    pub fn metrics(&self) -> SiteMetrics {
        self.metrics
    }
}
