//! Site Store Integration Tests
//!
//! Placement, accessibility across failure and recovery, and the
//! stage / commit / abort cycle, exercised through the public API.

#[path = "../common/mod.rs"]
mod common;

mod cluster;
mod transactions;
