//! In-memory state storage modules.
//!
//! - `ProfileStore` - authoritative profiles, session guards and write-back
//! - `SaveHook` - transforms applied before every profile write

pub mod profile;
pub mod save_hooks;

pub use profile::{LoadReport, ProfileStore, SaveOutcome};
pub use save_hooks::{run_save_hooks, SaveHook, SaveHookError};
