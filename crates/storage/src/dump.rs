//! Diagnostic dump of a site's committed values
//!
//! Not part of the transactional contract: a dump is a detached copy, and
//! taking one never affects the store.

use serde::{Deserialize, Serialize};
use sitestore_core::{SiteId, Value, VariableId};

/// Site id plus every variable's committed value, in id order
///
/// `None` marks a variable that has no copy at this site.
///
/// # Example
///
/// ```
/// use sitestore_core::SiteId;
/// use sitestore_storage::SiteDump;
///
/// let dump = SiteDump::new(SiteId::new(1), vec![None, Some(20)]);
/// assert_eq!(dump.to_string(), "site 1 - x1: None, x2: 20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDump {
    /// Site the values were taken from
    pub site: SiteId,
    /// Values indexed by `id - 1`
    pub values: Vec<Option<Value>>,
}

impl SiteDump {
    /// Create a dump
    pub fn new(site: SiteId, values: Vec<Option<Value>>) -> Self {
        SiteDump { site, values }
    }

    /// Value of `id`, `None` if out of range or not resident
    pub fn value_of(&self, id: VariableId) -> Option<Value> {
        let slot = (id.get() as usize).checked_sub(1)?;
        self.values.get(slot).copied().flatten()
    }

    /// Number of variables with a copy at this site
    pub fn resident_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Encode as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for SiteDump {
    /// Format: `site 1 - x1: None, x2: 20, ...`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -", self.site)?;
        for (idx, value) in self.values.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            let id = VariableId::new(idx as u32 + 1);
            match value {
                Some(v) => write!(f, "{}{}: {}", sep, id, v)?,
                None => write!(f, "{}{}: None", sep, id)?,
            }
        }
        Ok(())
    }
}
