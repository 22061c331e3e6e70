//! RaidLedger Engine library.
//!
//! Reconciles raid outcomes into authoritative player profiles.
//!
//! ## Structure
//!
//! - `stores/` - Authoritative in-memory profiles, session guards and write-back
//! - `use_cases/` - Raid resolution, insurance quotes and scav regeneration
//! - `infrastructure/` - Port traits and their adapters (files, clock, settings)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
