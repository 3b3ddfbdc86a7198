//! Storage layer for sitestore
//!
//! This crate holds the committed state of a single site:
//! - VariableTable: committed values plus per-variable accessibility flags
//! - SiteDump: read-only diagnostic copy of the values
//!
//! Uncommitted writes live in `sitestore-concurrency`, not here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dump;
pub mod table;

pub use dump::SiteDump;
pub use table::{Slot, VariableTable};
