use gait_common::ConfigError;
use gait_common::error::ensure_non_negative;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-character locomotion tuning. Fixed for the lifetime of a controller.
///
/// Speeds are in meters/second, sharpness values in 1/second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Target speed with no modifier held.
    pub base_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    /// How quickly grounded velocity approaches its target.
    pub movement_sharpness: f32,
    /// How quickly the character turns toward its look direction.
    /// Zero or less disables turning.
    pub orientation_sharpness: f32,
    /// Vertical speed set by a jump impulse.
    pub jump_speed: f32,
    /// Jump impulses allowed before the character must touch ground again.
    pub jump_limit: u32,
    /// Acceleration applied while airborne.
    pub gravity: Vec3,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_speed: 10.0,
            sprint_speed: 15.0,
            crouch_speed: 5.0,
            movement_sharpness: 15.0,
            orientation_sharpness: 10.0,
            jump_speed: 10.0,
            jump_limit: 2,
            gravity: Vec3::new(0.0, -30.0, 0.0),
        }
    }
}

impl LocomotionConfig {
    /// Reject a zero jump limit and negative or non-finite tuning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("base_speed", self.base_speed)?;
        ensure_non_negative("sprint_speed", self.sprint_speed)?;
        ensure_non_negative("crouch_speed", self.crouch_speed)?;
        ensure_non_negative("movement_sharpness", self.movement_sharpness)?;
        ensure_non_negative("jump_speed", self.jump_speed)?;
        if !self.orientation_sharpness.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "orientation_sharpness",
            });
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite { name: "gravity" });
        }
        if self.jump_limit == 0 {
            return Err(ConfigError::ZeroJumpLimit);
        }
        Ok(())
    }
}
