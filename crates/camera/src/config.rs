use gait_common::ConfigError;
use gait_common::error::{ensure_non_negative, ensure_range};
use serde::{Deserialize, Serialize};

/// Orbit camera tuning. Angles are in degrees, distances in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraConfig {
    pub default_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance change per unit of zoom input.
    pub zoom_speed: f32,
    pub zoom_sharpness: f32,
    /// Degrees turned per unit of look input.
    pub rotation_speed: f32,
    /// Multiplied by `dt` to give the rotation blend factor. Large values
    /// approximate snapping.
    pub rotation_sharpness: f32,
    pub follow_sharpness: f32,
    pub default_vertical_angle: f32,
    pub min_vertical_angle: f32,
    pub max_vertical_angle: f32,
    /// Let a rotation blend factor above 1 extrapolate past the target.
    /// Off by default, in which case the blend saturates and large
    /// sharpness values snap.
    pub extrapolate_rotation_blend: bool,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            default_distance: 6.0,
            min_distance: 3.0,
            max_distance: 10.0,
            zoom_speed: 5.0,
            zoom_sharpness: 10.0,
            rotation_speed: 10.0,
            rotation_sharpness: 10_000.0,
            follow_sharpness: 10_000.0,
            default_vertical_angle: 20.0,
            min_vertical_angle: -90.0,
            max_vertical_angle: 90.0,
            extrapolate_rotation_blend: false,
        }
    }
}

impl OrbitCameraConfig {
    /// Reject inverted bounds and negative or non-finite rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_range("distance", self.min_distance, self.max_distance)?;
        ensure_non_negative("min_distance", self.min_distance)?;
        ensure_range(
            "vertical_angle",
            self.min_vertical_angle,
            self.max_vertical_angle,
        )?;
        ensure_non_negative("zoom_speed", self.zoom_speed)?;
        ensure_non_negative("zoom_sharpness", self.zoom_sharpness)?;
        ensure_non_negative("rotation_speed", self.rotation_speed)?;
        ensure_non_negative("rotation_sharpness", self.rotation_sharpness)?;
        ensure_non_negative("follow_sharpness", self.follow_sharpness)?;
        Ok(())
    }

    /// Default distance pulled into `[min_distance, max_distance]`.
    pub fn clamped_default_distance(&self) -> f32 {
        self.default_distance
            .clamp(self.min_distance, self.max_distance)
    }

    /// Default vertical angle pulled into its bounds.
    pub fn clamped_default_vertical_angle(&self) -> f32 {
        self.default_vertical_angle
            .clamp(self.min_vertical_angle, self.max_vertical_angle)
    }
}
