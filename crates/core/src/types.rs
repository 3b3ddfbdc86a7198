//! Core identifier types
//!
//! This module defines the identifiers used throughout the system:
//! - [`VariableId`]: 1-based id of a data item
//! - [`SiteId`]: 1-based id of a site
//! - [`TransactionId`]: coordinator-assigned transaction name

use serde::{Deserialize, Serialize};

/// Value held by a variable
pub type Value = i64;

/// Identifier of a variable (data item)
///
/// Variable ids are 1-based: the first variable is `x1`. Whether an id is
/// in range depends on the [`StoreConfig`](crate::StoreConfig) in use, so
/// constructing a `VariableId` never fails; range checks happen where the
/// id is used.
///
/// # Examples
///
/// ```
/// use sitestore_core::VariableId;
///
/// let x4 = VariableId::new(4);
/// assert!(x4.is_replicated());
/// assert_eq!(x4.to_string(), "x4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableId(u32);

impl VariableId {
    /// Create a variable id from its 1-based number
    pub const fn new(id: u32) -> Self {
        VariableId(id)
    }

    /// Get the 1-based number
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this variable is replicated at every site
    ///
    /// Even ids are replicated, odd ids are hosted by a single site.
    pub const fn is_replicated(self) -> bool {
        self.0 % 2 == 0
    }
}

impl From<u32> for VariableId {
    fn from(id: u32) -> Self {
        VariableId(id)
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Identifier of a site
///
/// Site ids are 1-based and range over `[1, site_count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SiteId(u32);

impl SiteId {
    /// Create a site id from its 1-based number
    pub const fn new(id: u32) -> Self {
        SiteId(id)
    }

    /// Get the 1-based number
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SiteId {
    fn from(id: u32) -> Self {
        SiteId(id)
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "site {}", self.0)
    }
}

/// Identifier of a transaction
///
/// Transactions are created and named by the coordinator (e.g. `"T1"`);
/// the store treats the name as opaque.
///
/// # Examples
///
/// ```
/// use sitestore_core::TransactionId;
///
/// let t1 = TransactionId::from("T1");
/// assert_eq!(t1.as_str(), "T1");
/// assert_eq!(TransactionId::from(7u64).as_str(), "T7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction id from a name
    pub fn new(name: impl Into<String>) -> Self {
        TransactionId(name.into())
    }

    /// Get the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(name: &str) -> Self {
        TransactionId(name.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(name: String) -> Self {
        TransactionId(name)
    }
}

/// Numeric ids become `T{n}`
impl From<u64> for TransactionId {
    fn from(n: u64) -> Self {
        TransactionId(format!("T{}", n))
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
