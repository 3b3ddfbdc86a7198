//! One site store per site, each behind its own lock.
//!
//! A coordinator that drives several sites from several threads can hold a
//! [`Cluster`] instead of managing stores by hand. Sites never share a lock,
//! so work on one site never waits on another.
//!
//! # Example
//!
//! ```
//! use sitestore::prelude::*;
//!
//! let cluster = Cluster::new(StoreConfig::new(4, 2)?)?;
//! cluster.site(SiteId::new(1))?.stage("T1", VariableId::new(2), 7)?;
//! cluster.fail_site(SiteId::new(1))?;
//! assert!(cluster.site(SiteId::new(1))?.pending_transactions().is_empty());
//! # Ok::<(), sitestore::Error>(())
//! ```

use crate::site::SiteStore;
use parking_lot::{Mutex, MutexGuard};
use sitestore_core::{placement, Result, SiteId, StoreConfig, VariableId};
use sitestore_storage::SiteDump;
use tracing::info;

/// Site stores for every site in `[1, site_count]`
#[derive(Debug)]
pub struct Cluster {
    config: StoreConfig,
    /// Indexed by `site - 1`
    sites: Vec<Mutex<SiteStore>>,
}

impl Cluster {
    /// Create a store for every configured site.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let sites = config
            .sites()
            .map(|site| SiteStore::new(config, site).map(Mutex::new))
            .collect::<Result<Vec<_>>>()?;
        info!(sites = sites.len(), variables = config.variable_count(), "cluster created");
        Ok(Cluster { config, sites })
    }

    /// Configuration shared by every site.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always false: a valid configuration has at least one site.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Lock and return the store of `site`.
    ///
    /// # Errors
    ///
    /// `InvalidSiteId` if `site` is outside `[1, site_count]`.
    pub fn site(&self, site: SiteId) -> Result<MutexGuard<'_, SiteStore>> {
        self.config.check_site(site)?;
        Ok(self.sites[site.get() as usize - 1].lock())
    }

    /// Model a failure of `site`: drop its uncommitted changes.
    ///
    /// Returns the number of transactions that lost writes there.
    pub fn fail_site(&self, site: SiteId) -> Result<usize> {
        let lost = self.site(site)?.clear_uncommitted_changes();
        info!(site = site.get(), lost, "site failed");
        Ok(lost)
    }

    /// Model `site` rejoining: recompute its accessibility.
    pub fn recover_site(&self, site: SiteId) -> Result<()> {
        self.site(site)?.recompute_accessibility_on_recover();
        info!(site = site.get(), "site recovered");
        Ok(())
    }

    /// Sites where `id` is resident, ascending.
    pub fn sites_holding(&self, id: VariableId) -> Result<Vec<SiteId>> {
        self.config.check_variable(id)?;
        Ok(placement::sites_holding(&self.config, id))
    }

    /// Diagnostic dump of every site, in site order.
    ///
    /// Sites are locked one at a time, so the dumps are not a single
    /// consistent cut across sites.
    pub fn dump(&self) -> Vec<SiteDump> {
        self.sites.iter().map(|site| site.lock().dump()).collect()
    }
}
