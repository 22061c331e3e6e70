//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across stores and ports to fulfill user stories.

pub mod raid;

pub use raid::RaidUseCases;
