//! # Sitestore
//!
//! Site-local storage for a replicated, transactional data store.
//!
//! Every site holds a replica of some fixed set of integer variables. Even
//! variables are replicated at every site; odd variable `i` lives only at
//! site `i mod site_count + 1`. A [`SiteStore`] owns one site's committed
//! values, the per-variable accessibility flags, and the writes staged by
//! unfinished transactions. Concurrency control, deadlock detection and
//! commit decisions belong to an external coordinator.
//!
//! ## Quick Start
//!
//! ```
//! use sitestore::prelude::*;
//!
//! let config = StoreConfig::default(); // 20 variables, 10 sites
//! let mut site = SiteStore::new(config, SiteId::new(1))?;
//!
//! let t1 = TransactionId::from("T1");
//! site.stage(t1.clone(), VariableId::new(2), 99)?;
//! assert_eq!(site.read(VariableId::new(2))?, 20); // not visible yet
//!
//! site.commit(&t1)?;
//! assert_eq!(site.read(VariableId::new(2))?, 99);
//! # Ok::<(), sitestore::Error>(())
//! ```
//!
//! ## Failure and recovery
//!
//! - [`SiteStore::clear_uncommitted_changes`] drops every staged write when
//!   the site fails.
//! - [`SiteStore::recompute_accessibility_on_recover`] leaves only variables
//!   hosted solely at this site readable; replicated copies become readable
//!   again once a local commit writes them.
//!
//! [`Cluster`] holds one store per site for coordinators that drive sites
//! from multiple threads.

#![warn(missing_docs)]

mod cluster;
mod site;

pub mod prelude;

pub use cluster::Cluster;
pub use site::{CommitOutcome, SiteMetrics, SiteStore};

// Re-export building blocks
pub use sitestore_concurrency::{PendingWrite, PendingWrites};
pub use sitestore_core::placement;
pub use sitestore_core::{
    Error, PlacementClass, Result, SiteId, StoreConfig, StoreConfigBuilder, TransactionId, Value,
    VariableId,
};
pub use sitestore_storage::SiteDump;
