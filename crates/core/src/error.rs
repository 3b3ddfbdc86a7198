//! Error types for sitestore.
//!
//! Every fallible operation in the workspace returns [`Result`]. Accessibility
//! is never enforced here: reading an inaccessible variable is the
//! coordinator's mistake to prevent, not an error kind of the store.

use crate::types::TransactionId;
use thiserror::Error;

/// All sitestore errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Variable id outside `[1, N]`, or not resident where residency is required
    #[error("invalid variable id x{id}: {reason}")]
    InvalidVariableId {
        /// The offending 1-based id
        id: u32,
        /// Why the id was rejected
        reason: String,
    },

    /// Site id outside `[1, site_count]`
    #[error("invalid site id {id}: expected 1..={site_count}")]
    InvalidSiteId {
        /// The offending 1-based id
        id: u32,
        /// Number of sites configured
        site_count: u32,
    },

    /// Non-positive variable or site count, or a malformed config document
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No pending writes are recorded for the transaction
    #[error("unknown transaction: {0}")]
    UnknownTransaction(TransactionId),
}

/// Result type for sitestore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Variable id out of range for the configured variable count
    pub fn variable_out_of_range(id: u32, variable_count: u32) -> Self {
        Error::InvalidVariableId {
            id,
            reason: format!("expected 1..={}", variable_count),
        }
    }

    /// Variable is valid but has no copy at the given site
    pub fn variable_not_resident(id: u32, site: u32) -> Self {
        Error::InvalidVariableId {
            id,
            reason: format!("not resident at site {}", site),
        }
    }

    /// Check if this is an invalid-variable error.
    pub fn is_invalid_variable(&self) -> bool {
        matches!(self, Error::InvalidVariableId { .. })
    }

    /// Check if this is an invalid-site error.
    pub fn is_invalid_site(&self) -> bool {
        matches!(self, Error::InvalidSiteId { .. })
    }

    /// Check if this is a configuration error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }

    /// Check if this is an unknown-transaction error.
    pub fn is_unknown_transaction(&self) -> bool {
        matches!(self, Error::UnknownTransaction(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidConfiguration(e.to_string())
    }
}
