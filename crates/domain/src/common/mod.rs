//! Common utility functions shared by the domain model.
//!
//! Pure functions only: no side effects, no I/O.

pub mod datetime;
pub mod serde_helpers;

pub use datetime::{mail_date_parts, unix_seconds};
