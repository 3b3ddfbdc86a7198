//! Store configuration
//!
//! The variable count and site count are fixed for the lifetime of the
//! process. They are carried as an explicit [`StoreConfig`] value instead of
//! global state, so stores built from different configurations can coexist.
//!
//! ## Sources
//!
//! ```
//! use sitestore_core::StoreConfig;
//!
//! // Defaults: 20 variables over 10 sites
//! let config = StoreConfig::default();
//!
//! // Explicit, validated
//! let config = StoreConfig::new(4, 2)?;
//!
//! // Builder
//! let config = StoreConfig::builder().variables(4).sites(2).build()?;
//!
//! // JSON document
//! let config = StoreConfig::from_json_str(
//!     r#"{"distinct_variable_counts": 4, "number_of_sites": 2}"#,
//! )?;
//! assert_eq!(config.variable_count(), 4);
//! # Ok::<(), sitestore_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::types::{SiteId, VariableId};
use serde::{Deserialize, Serialize};

/// Default number of distinct variables
pub const DEFAULT_VARIABLE_COUNT: u32 = 20;

/// Default number of sites
pub const DEFAULT_SITE_COUNT: u32 = 10;

/// Validated store configuration
///
/// Both counts are guaranteed positive once a `StoreConfig` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStoreConfig")]
pub struct StoreConfig {
    variable_count: u32,
    site_count: u32,
}

/// Unvalidated form accepted by deserialization
#[derive(Deserialize)]
struct RawStoreConfig {
    #[serde(alias = "distinct_variable_counts")]
    variable_count: i64,
    #[serde(alias = "number_of_sites")]
    site_count: i64,
}

impl TryFrom<RawStoreConfig> for StoreConfig {
    type Error = Error;

    fn try_from(raw: RawStoreConfig) -> Result<Self> {
        let variable_count = positive("variable_count", raw.variable_count)?;
        let site_count = positive("site_count", raw.site_count)?;
        StoreConfig::new(variable_count, site_count)
    }
}

fn positive(field: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(Error::InvalidConfiguration(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    u32::try_from(value).map_err(|_| {
        Error::InvalidConfiguration(format!("{} too large: {}", field, value))
    })
}

impl StoreConfig {
    /// Create a configuration
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if either count is zero.
    pub fn new(variable_count: u32, site_count: u32) -> Result<Self> {
        if variable_count == 0 {
            return Err(Error::InvalidConfiguration(
                "variable_count must be positive, got 0".to_string(),
            ));
        }
        if site_count == 0 {
            return Err(Error::InvalidConfiguration(
                "site_count must be positive, got 0".to_string(),
            ));
        }
        Ok(StoreConfig {
            variable_count,
            site_count,
        })
    }

    /// Create a builder starting from the defaults
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Parse and validate a JSON configuration document
    ///
    /// Accepts either `variable_count` / `site_count` or
    /// `distinct_variable_counts` / `number_of_sites` as field names.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of distinct variables (`N`)
    pub fn variable_count(&self) -> u32 {
        self.variable_count
    }

    /// Number of sites
    pub fn site_count(&self) -> u32 {
        self.site_count
    }

    /// Check that `id` is in `[1, N]`
    pub fn check_variable(&self, id: VariableId) -> Result<()> {
        if id.get() == 0 || id.get() > self.variable_count {
            return Err(Error::variable_out_of_range(id.get(), self.variable_count));
        }
        Ok(())
    }

    /// Check that `site` is in `[1, site_count]`
    pub fn check_site(&self, site: SiteId) -> Result<()> {
        if site.get() == 0 || site.get() > self.site_count {
            return Err(Error::InvalidSiteId {
                id: site.get(),
                site_count: self.site_count,
            });
        }
        Ok(())
    }

    /// All variable ids in ascending order
    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        (1..=self.variable_count).map(VariableId::new)
    }

    /// All site ids in ascending order
    pub fn sites(&self) -> impl Iterator<Item = SiteId> {
        (1..=self.site_count).map(SiteId::new)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            variable_count: DEFAULT_VARIABLE_COUNT,
            site_count: DEFAULT_SITE_COUNT,
        }
    }
}

/// Builder for [`StoreConfig`]
///
/// # Example
///
/// ```
/// use sitestore_core::StoreConfig;
///
/// let config = StoreConfig::builder().sites(3).build()?;
/// assert_eq!(config.variable_count(), 20);
/// assert_eq!(config.site_count(), 3);
/// # Ok::<(), sitestore_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfigBuilder {
    variable_count: u32,
    site_count: u32,
}

impl StoreConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            variable_count: DEFAULT_VARIABLE_COUNT,
            site_count: DEFAULT_SITE_COUNT,
        }
    }

    /// Set the number of distinct variables.
    pub fn variables(mut self, count: u32) -> Self {
        self.variable_count = count;
        self
    }

    /// Set the number of sites.
    pub fn sites(mut self, count: u32) -> Self {
        self.site_count = count;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<StoreConfig> {
        StoreConfig::new(self.variable_count, self.site_count)
    }
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
