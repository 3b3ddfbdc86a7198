//! Committed value table with per-variable accessibility
//!
//! One table exists per site. It covers the full id domain `[1, N]`:
//! resident variables carry `Some(value)`, non-resident ones `None`, and each
//! slot has an accessibility flag next to it.
//!
//! # Design
//!
//! - 0-based `Vec` storage behind 1-based [`VariableId`]s
//! - Every access is bounds-checked and returns `InvalidVariableId` instead
//!   of panicking
//! - A non-resident slot never gains a value and is never accessible
//!
//! # Accessibility
//!
//! | Event | Resident here | Flag afterwards |
//! |-------|---------------|-----------------|
//! | seed | yes | accessible |
//! | seed | no | inaccessible |
//! | recovery | singly hosted here | accessible |
//! | recovery | replicated | inaccessible |
//! | committed write | yes | accessible |
//!
//! The table reports the flag; it never refuses a read because of it.

use crate::dump::SiteDump;
use sitestore_core::placement;
use sitestore_core::{Error, Result, SiteId, StoreConfig, Value, VariableId};

/// One slot of the table, as seen by [`VariableTable::iter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Variable in this slot
    pub id: VariableId,
    /// Committed value, `None` if not resident
    pub value: Option<Value>,
    /// Whether reads may be served locally
    pub accessible: bool,
}

/// Committed values and accessibility flags of one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableTable {
    site: SiteId,
    config: StoreConfig,
    values: Vec<Option<Value>>,
    accessible: Vec<bool>,
}

impl VariableTable {
    /// Build the initial table for `site`
    ///
    /// Resident variables hold `10 * id` and start accessible.
    ///
    /// # Errors
    ///
    /// `InvalidSiteId` if `site` is outside `[1, site_count]`.
    pub fn seed(config: StoreConfig, site: SiteId) -> Result<Self> {
        config.check_site(site)?;
        let values = placement::initial_values(&config, site);
        let accessible = values.iter().map(Option::is_some).collect();
        Ok(VariableTable {
            site,
            config,
            values,
            accessible,
        })
    }

    /// Site this table belongs to
    pub fn site(&self) -> SiteId {
        self.site
    }

    /// Configuration the table was seeded from
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Map an id to its 0-based slot, checking the range
    #[inline]
    fn slot(&self, id: VariableId) -> Result<usize> {
        self.config.check_variable(id)?;
        Ok(id.get() as usize - 1)
    }

    /// Map an id to its slot, requiring the variable to be resident
    #[inline]
    fn resident_slot(&self, id: VariableId) -> Result<usize> {
        let slot = self.slot(id)?;
        if self.values[slot].is_none() {
            return Err(Error::variable_not_resident(id.get(), self.site.get()));
        }
        Ok(slot)
    }

    /// Whether `id` has a copy at this site
    pub fn is_resident(&self, id: VariableId) -> bool {
        self.slot(id)
            .map(|slot| self.values[slot].is_some())
            .unwrap_or(false)
    }

    /// Committed value of a resident variable
    pub fn get(&self, id: VariableId) -> Result<Value> {
        let slot = self.slot(id)?;
        self.values[slot].ok_or_else(|| Error::variable_not_resident(id.get(), self.site.get()))
    }

    /// Overwrite the committed value of a resident variable
    ///
    /// Leaves the accessibility flag alone. Returns the previous value.
    pub fn set(&mut self, id: VariableId, value: Value) -> Result<Value> {
        let slot = self.resident_slot(id)?;
        let previous = self.values[slot].replace(value);
        Ok(previous.unwrap_or(value))
    }

    /// Accessibility flag of any variable in `[1, N]`
    ///
    /// Non-resident variables are always inaccessible.
    pub fn is_accessible(&self, id: VariableId) -> Result<bool> {
        let slot = self.slot(id)?;
        Ok(self.accessible[slot])
    }

    /// Make a resident variable readable again
    pub fn mark_accessible(&mut self, id: VariableId) -> Result<()> {
        let slot = self.resident_slot(id)?;
        self.accessible[slot] = true;
        Ok(())
    }

    /// Check that `id` is in range and resident here
    pub fn check_resident(&self, id: VariableId) -> Result<()> {
        self.resident_slot(id).map(|_| ())
    }

    /// Apply a transaction's committed writes
    ///
    /// Every slot is resolved before any value changes, so either all writes
    /// land or none do. Later entries for the same variable overwrite earlier
    /// ones. Each written variable becomes accessible.
    ///
    /// Returns the number of entries applied.
    pub fn apply_committed<I>(&mut self, writes: I) -> Result<usize>
    where
        I: IntoIterator<Item = (VariableId, Value)>,
    {
        let resolved = writes
            .into_iter()
            .map(|(id, value)| self.resident_slot(id).map(|slot| (slot, value)))
            .collect::<Result<Vec<_>>>()?;

        for &(slot, value) in &resolved {
            self.values[slot] = Some(value);
            self.accessible[slot] = true;
        }
        Ok(resolved.len())
    }

    /// Recompute every flag after the site rejoins
    ///
    /// Only variables singly hosted at this site stay accessible; replicated
    /// copies may be stale until a local commit refreshes them. Idempotent.
    pub fn reset_accessibility_after_recovery(&mut self) {
        let (config, site) = (self.config, self.site);
        for (id, flag) in config.variables().zip(self.accessible.iter_mut()) {
            *flag = placement::is_hosted_only_at(&config, id, site);
        }
    }

    /// All slots in id order
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.config
            .variables()
            .zip(self.values.iter().zip(self.accessible.iter()))
            .map(|(id, (&value, &accessible))| Slot {
                id,
                value,
                accessible,
            })
    }

    /// Ids of variables resident here, ascending
    pub fn resident_variables(&self) -> Vec<VariableId> {
        self.iter()
            .filter(|slot| slot.value.is_some())
            .map(|slot| slot.id)
            .collect()
    }

    /// Ids of variables currently accessible here, ascending
    pub fn accessible_variables(&self) -> Vec<VariableId> {
        self.iter()
            .filter(|slot| slot.accessible)
            .map(|slot| slot.id)
            .collect()
    }

    /// Raw value slots, indexed by `id - 1`
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// Read-only snapshot for display
    pub fn dump(&self) -> SiteDump {
        SiteDump::new(self.site, self.values.clone())
    }
}
