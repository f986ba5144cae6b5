//! Input snapshots: movement intent and camera look deltas.
//!
//! # Invariants
//! - The core consumes these values, never raw device events.
//! - Snapshots are rebuilt every tick and carry no history.

pub mod intent;

pub use intent::{Intent, LookInput, MoveAxes, TickInput};

pub fn crate_info() -> &'static str {
    "gait-input v0.1.0"
}
