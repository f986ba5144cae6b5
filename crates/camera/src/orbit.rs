use gait_common::math::{exp_blend_factor, look_rotation, slerp_unclamped};
use gait_common::{ConfigError, FORWARD, Transform};
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::OrbitCameraConfig;

/// State the orbit camera carries between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub(crate) rotation: Quat,
    pub(crate) position: Vec3,
    /// Smoothed point trailing the anchor.
    pub(crate) follow_position: Vec3,
    /// Accumulated heading; never rebuilt from the anchor after binding.
    pub(crate) facing_direction: Vec3,
    pub(crate) target_vertical_angle: f32,
    pub(crate) current_distance: f32,
    pub(crate) target_distance: f32,
}

impl CameraState {
    /// Current camera orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Smoothed follow point the camera orbits.
    pub fn follow_position(&self) -> Vec3 {
        self.follow_position
    }

    /// Accumulated horizontal heading.
    pub fn facing_direction(&self) -> Vec3 {
        self.facing_direction
    }

    /// Pitch in degrees; positive looks down.
    pub fn target_vertical_angle(&self) -> f32 {
        self.target_vertical_angle
    }

    /// Smoothed distance from the follow point.
    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Distance the zoom is approaching.
    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }
}

/// Third-person camera orbiting a followed anchor.
///
/// Camera motion is presentation state; it feeds locomotion only through
/// its rotation.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: OrbitCameraConfig,
    state: CameraState,
    anchor: Option<Transform>,
}

impl OrbitCamera {
    /// Validate `config` and start at its clamped defaults with no anchor.
    pub fn new(config: OrbitCameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let distance = config.clamped_default_distance();
        let state = CameraState {
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            follow_position: Vec3::ZERO,
            facing_direction: FORWARD,
            target_vertical_angle: config.clamped_default_vertical_angle(),
            current_distance: distance,
            target_distance: distance,
        };
        Ok(Self {
            config,
            state,
            anchor: None,
        })
    }

    /// Tuning this camera was built with.
    pub fn config(&self) -> &OrbitCameraConfig {
        &self.config
    }

    /// Read-only access to the per-tick state.
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// The followed transform, if one is bound.
    pub fn anchor(&self) -> Option<&Transform> {
        self.anchor.as_ref()
    }

    /// Bind the followed target. Resets the follow point to the anchor's
    /// position and the heading to its forward axis.
    pub fn set_anchor(&mut self, anchor: Transform) {
        tracing::debug!(position = ?anchor.position, "camera anchor bound");
        self.state.follow_position = anchor.position;
        self.state.facing_direction = anchor.forward();
        self.anchor = Some(anchor);
    }

    /// Move the bound anchor without resetting follow point or heading.
    /// Binds it like [`OrbitCamera::set_anchor`] if nothing is bound yet.
    pub fn set_anchor_transform(&mut self, anchor: Transform) {
        match self.anchor.as_mut() {
            Some(bound) => *bound = anchor,
            None => self.set_anchor(anchor),
        }
    }

    /// Advance one tick. Does nothing until an anchor is bound.
    ///
    /// `rotation_input.x` yaws right and `rotation_input.y` pitches up, both
    /// scaled by `rotation_speed` degrees. Positive `zoom_delta` moves the
    /// camera away.
    pub fn update(&mut self, dt: f32, zoom_delta: f32, rotation_input: Vec2) {
        let Some(anchor) = self.anchor else {
            return;
        };

        self.update_rotation(dt, rotation_input, &anchor);
        self.update_distance(dt, zoom_delta);
        self.update_position(dt, &anchor);

        tracing::trace!(
            position = ?self.state.position,
            pitch = self.state.target_vertical_angle,
            distance = self.state.current_distance,
            "camera updated"
        );
    }

    fn update_rotation(&mut self, dt: f32, input: Vec2, anchor: &Transform) {
        let up = anchor.up();
        let speed = self.config.rotation_speed;

        let yaw = Quat::from_axis_angle(up, (input.x * speed).to_radians());
        let facing = self.state.facing_direction;
        self.state.facing_direction = (yaw * facing).try_normalize().unwrap_or(facing);
        let horizontal = look_rotation(self.state.facing_direction, up);

        // Clamped every tick, including ticks without input.
        self.state.target_vertical_angle = (self.state.target_vertical_angle - input.y * speed)
            .clamp(self.config.min_vertical_angle, self.config.max_vertical_angle);
        let vertical = Quat::from_rotation_x(self.state.target_vertical_angle.to_radians());

        // Linear in dt and never dt-clamped; may exceed 1 at low frame rates.
        let mut factor = self.config.rotation_sharpness * dt;
        if !self.config.extrapolate_rotation_blend {
            factor = factor.min(1.0);
        }
        self.state.rotation = slerp_unclamped(self.state.rotation, horizontal * vertical, factor);
    }

    fn update_distance(&mut self, dt: f32, zoom_delta: f32) {
        self.state.target_distance = (self.state.target_distance
            + zoom_delta * self.config.zoom_speed)
            .clamp(self.config.min_distance, self.config.max_distance);

        let t = exp_blend_factor(self.config.zoom_sharpness, dt);
        let current = self.state.current_distance;
        self.state.current_distance = (current + (self.state.target_distance - current) * t)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    fn update_position(&mut self, dt: f32, anchor: &Transform) {
        let t = exp_blend_factor(self.config.follow_sharpness, dt);
        self.state.follow_position = self.state.follow_position.lerp(anchor.position, t);
        // Uses this tick's smoothed distance; zoom shows up the same tick.
        self.state.position =
            self.state.follow_position - self.forward() * self.state.current_distance;
    }

    /// Current camera orientation.
    pub fn rotation(&self) -> Quat {
        self.state.rotation
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Direction the camera looks.
    pub fn forward(&self) -> Vec3 {
        self.state.rotation * FORWARD
    }

    /// Camera pose as a unit-scale transform.
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.state.position, self.state.rotation)
    }

    /// World-to-camera matrix. The camera looks along its local `+Z`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.state.rotation, self.state.position).inverse()
    }
}
