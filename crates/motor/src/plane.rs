use gait_common::error::ensure_non_negative;
use gait_common::{ConfigError, FORWARD, Transform, UP};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::hooks::{CharacterCallbacks, ColliderId, Hit, HitStabilityReport};
use crate::motor::{GroundingStatus, Motor, MotorDriver, MotorQuery};

/// Collider id reported for the ground plane.
pub const GROUND_COLLIDER: ColliderId = ColliderId(0);

/// Distance above the plane still treated as touching it.
const GROUND_SNAP: f32 = 1e-3;

/// Tuning for [`PlaneMotor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneMotorConfig {
    /// Height of the horizontal ground plane.
    pub ground_height: f32,
    /// Substeps per simulated tick.
    pub substeps: u32,
    /// Seconds after `force_unground` during which the ground is ignored.
    pub unground_time: f32,
}

impl Default for PlaneMotorConfig {
    fn default() -> Self {
        Self {
            ground_height: 0.0,
            substeps: 1,
            unground_time: 0.1,
        }
    }
}

impl PlaneMotorConfig {
    /// Reject a negative unground time or a non-finite ground height.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("unground_time", self.unground_time)?;
        if !self.ground_height.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "ground_height",
            });
        }
        Ok(())
    }
}

/// Minimal motor over a single infinite horizontal plane.
///
/// Grounded iff the body touches the plane and is not moving up. Bodies
/// below the plane are pushed back onto it. There is no other geometry and
/// no collision resolution; this exists to drive the controller in demos and
/// tests.
#[derive(Debug, Clone)]
pub struct PlaneMotor {
    config: PlaneMotorConfig,
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    grounding: GroundingStatus,
    unground_timer: f32,
}

impl PlaneMotor {
    /// Place the body at `start` and resolve its initial grounding.
    pub fn new(config: PlaneMotorConfig, start: Transform) -> Self {
        let mut motor = Self {
            config,
            position: start.position,
            rotation: start.rotation,
            velocity: Vec3::ZERO,
            grounding: GroundingStatus::default(),
            unground_timer: 0.0,
        };
        motor.resolve_grounding(true);
        motor
    }

    /// Tuning this motor was built with.
    pub fn config(&self) -> &PlaneMotorConfig {
        &self.config
    }

    /// Overwrite the body velocity before the next substep.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn resolve_grounding(&mut self, ground_valid: bool) {
        let floor = self.config.ground_height;
        let touching = ground_valid && self.position.y <= floor + GROUND_SNAP;
        let rising = self.velocity.dot(UP) > 0.0;
        let grounded = touching && !rising && self.unground_timer <= 0.0;

        if grounded != self.grounding.is_stable_on_ground {
            tracing::trace!(grounded, y = self.position.y, "grounding changed");
        }
        if grounded {
            self.position.y = floor;
        }
        self.grounding = GroundingStatus {
            is_stable_on_ground: grounded,
            ground_normal: UP,
        };
    }

    fn integrate(&mut self, dt: f32, callbacks: &mut dyn CharacterCallbacks) {
        self.position += self.velocity * dt;

        let floor = self.config.ground_height;
        if self.position.y >= floor || !callbacks.is_collider_valid_for_collisions(GROUND_COLLIDER)
        {
            return;
        }

        self.position.y = floor;
        if self.velocity.y < 0.0 {
            let hit = Hit {
                collider: GROUND_COLLIDER,
                normal: UP,
                point: self.position,
            };
            let mut report = HitStabilityReport { is_stable: true };
            callbacks.on_ground_hit(&hit, &mut report);
            callbacks.process_hit_stability_report(&hit, self.position, self.rotation, &mut report);
            self.velocity.y = 0.0;
        }
    }
}

impl MotorQuery for PlaneMotor {
    fn grounding_status(&self) -> GroundingStatus {
        self.grounding
    }

    fn character_up(&self) -> Vec3 {
        self.rotation * UP
    }

    fn character_forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }
}

impl Motor for PlaneMotor {
    fn force_unground(&mut self) {
        tracing::trace!(timer = self.config.unground_time, "forced unground");
        self.unground_timer = self.config.unground_time;
        self.grounding.is_stable_on_ground = false;
    }
}

impl MotorDriver for PlaneMotor {
    fn simulate(&mut self, dt: f32, callbacks: &mut dyn CharacterCallbacks) {
        let steps = self.config.substeps.max(1);
        let sub_dt = dt / steps as f32;

        for _ in 0..steps {
            callbacks.before_update(sub_dt);

            self.unground_timer = (self.unground_timer - sub_dt).max(0.0);
            let ground_valid = callbacks.is_collider_valid_for_collisions(GROUND_COLLIDER);
            self.resolve_grounding(ground_valid);
            callbacks.post_grounding_update(sub_dt);

            let mut rotation = self.rotation;
            callbacks.update_rotation(&mut rotation, sub_dt, self);
            self.rotation = rotation.normalize();

            let mut velocity = self.velocity;
            callbacks.update_velocity(&mut velocity, sub_dt, self);
            self.velocity = velocity;

            self.integrate(sub_dt, callbacks);
            callbacks.after_update(sub_dt);
        }
    }

    fn body(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.rotation)
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}
