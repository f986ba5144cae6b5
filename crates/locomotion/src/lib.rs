//! Locomotion: turns per-tick intent and motor grounding into character
//! velocity and orientation.
//!
//! # Invariants
//! - `0 <= jumps_used <= jump_limit` after every velocity step.
//! - A latched jump request is applied at most once.
//! - Grounded motion blends exponentially; airborne motion only falls.
//!
//! The state machine lives in [`step`] as pure functions over
//! [`LocomotionState`]; [`LocomotionController`] threads the state and
//! forwards motor commands.

pub mod config;
pub mod controller;
pub mod state;
pub mod step;

#[cfg(test)]
mod test_support;

pub use config::LocomotionConfig;
pub use controller::LocomotionController;
pub use state::LocomotionState;
pub use step::{VelocityUpdate, apply_intent, rotation_step, velocity_step};

pub fn crate_info() -> &'static str {
    "gait-locomotion v0.1.0"
}
