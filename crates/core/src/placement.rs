//! Data placement
//!
//! Decides, for a given configuration, which variables are resident at which
//! site. This is the only seeding mechanism of the system, so it is a pure
//! function of `(variable, site, config)`:
//!
//! | Variable | Resident at |
//! |----------|-------------|
//! | even id | every site |
//! | odd id `i` | site `i mod site_count + 1` only |
//!
//! Resident variables start with value `10 * id`.

use crate::config::StoreConfig;
use crate::types::{SiteId, Value, VariableId};

/// How a variable is distributed across sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementClass {
    /// Resident at every site
    Replicated,
    /// Resident at exactly one site
    SinglyHosted {
        /// The only site holding the variable
        home: SiteId,
    },
}

impl PlacementClass {
    /// Check if the variable is replicated
    pub fn is_replicated(&self) -> bool {
        matches!(self, PlacementClass::Replicated)
    }
}

/// Placement class of `id`
///
/// Does not range-check `id`; callers validate against the config first.
pub fn placement_of(config: &StoreConfig, id: VariableId) -> PlacementClass {
    if id.is_replicated() {
        PlacementClass::Replicated
    } else {
        PlacementClass::SinglyHosted {
            home: SiteId::new(id.get() % config.site_count() + 1),
        }
    }
}

/// The single site hosting `id`, or `None` if it is replicated
pub fn home_site(config: &StoreConfig, id: VariableId) -> Option<SiteId> {
    match placement_of(config, id) {
        PlacementClass::Replicated => None,
        PlacementClass::SinglyHosted { home } => Some(home),
    }
}

/// Whether `id` is resident at `site`
///
/// Even ids are resident everywhere. An odd id is resident only at its home
/// site.
pub fn is_resident(config: &StoreConfig, id: VariableId, site: SiteId) -> bool {
    match placement_of(config, id) {
        PlacementClass::Replicated => true,
        PlacementClass::SinglyHosted { home } => home == site,
    }
}

/// Whether `id` is singly hosted and its home is `site`
///
/// These are the variables that stay readable right after a site recovers.
pub fn is_hosted_only_at(config: &StoreConfig, id: VariableId, site: SiteId) -> bool {
    home_site(config, id) == Some(site)
}

/// Every site at which `id` is resident, ascending
pub fn sites_holding(config: &StoreConfig, id: VariableId) -> Vec<SiteId> {
    match placement_of(config, id) {
        PlacementClass::Replicated => config.sites().collect(),
        PlacementClass::SinglyHosted { home } => vec![home],
    }
}

/// Value a resident variable holds when its site is created
pub fn initial_value(id: VariableId) -> Value {
    10 * Value::from(id.get())
}

/// Ids of every variable resident at `site`, ascending
pub fn resident_variables(config: &StoreConfig, site: SiteId) -> Vec<VariableId> {
    config
        .variables()
        .filter(|&id| is_resident(config, id, site))
        .collect()
}

/// Initial value table for `site`, indexed by `id - 1`
///
/// `None` marks a variable with no copy at this site.
pub fn initial_values(config: &StoreConfig, site: SiteId) -> Vec<Option<Value>> {
    config
        .variables()
        .map(|id| is_resident(config, id, site).then(|| initial_value(id)))
        .collect()
}
