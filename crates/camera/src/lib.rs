//! Orbit camera following a character anchor.
//!
//! # Invariants
//! - Vertical angle stays within `[min_vertical_angle, max_vertical_angle]`.
//! - Target and current distance stay within `[min_distance, max_distance]`.
//! - Heading accumulates; the anchor's forward axis seeds it only on binding.

pub mod config;
pub mod orbit;

pub use config::OrbitCameraConfig;
pub use orbit::{CameraState, OrbitCamera};

pub fn crate_info() -> &'static str {
    "gait-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
