//! Shared types for the locomotion core: transforms, axes, blend and
//! rotation helpers, configuration errors.
//!
//! # Invariants
//! - `+Z` is forward and `+Y` is up for every identity rotation.
//! - Helpers never return NaN for zero or parallel inputs.

pub mod error;
pub mod math;
pub mod types;

pub use error::ConfigError;
pub use types::{FORWARD, Transform, UP};

pub fn crate_info() -> &'static str {
    "gait-common v0.1.0"
}
