//! Concurrency layer for sitestore
//!
//! This crate buffers uncommitted work:
//! - TransactionLog: transaction id → staged writes
//! - PendingWrites: one transaction's writes at one site, last write wins
//!
//! Deciding when to commit or abort is left to the coordinator.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod log;

pub use log::{PendingWrite, PendingWrites, TransactionLog};
