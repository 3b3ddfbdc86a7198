//! Convenient imports for sitestore.
//!
//! ```
//! use sitestore::prelude::*;
//!
//! let store = SiteStore::new(StoreConfig::default(), SiteId::new(1))?;
//! assert!(store.check_accessibility(VariableId::new(2))?);
//! # Ok::<(), sitestore::Error>(())
//! ```

// Main entry points
pub use crate::cluster::Cluster;
pub use crate::site::{CommitOutcome, SiteStore};

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::{SiteId, StoreConfig, TransactionId, Value, VariableId};
