//! Core types for sitestore
//!
//! This crate defines the vocabulary shared by every other crate:
//! - Identifiers: [`VariableId`], [`SiteId`], [`TransactionId`]
//! - [`StoreConfig`]: variable count and site count, validated at construction
//! - [`placement`]: the pure function deciding which variables live at which site
//! - [`Error`]: the error type returned by every fallible operation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod placement;
pub mod types;

pub use config::{StoreConfig, StoreConfigBuilder};
pub use error::{Error, Result};
pub use placement::PlacementClass;
pub use types::{SiteId, TransactionId, Value, VariableId};
