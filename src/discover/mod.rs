//! Site-description discovery
//!
//! Recursively finds inputs named with the compound site suffix and derives a
//! bare world name for each one.

pub mod path;
pub mod walker;

pub use walker::{SiteInput, Walker, WalkerConfig, DEFAULT_SUFFIX};
