use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::motor::Motor;

/// Opaque handle to a collider owned by the motor's world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// A contact found while sweeping or probing the character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub collider: ColliderId,
    pub normal: Vec3,
    pub point: Vec3,
}

/// Stability verdict the motor computes for a hit; callbacks may amend it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitStabilityReport {
    pub is_stable: bool,
}

/// Callbacks a motor invokes on its character controller during a substep.
///
/// Only rotation and velocity are required. The remaining hooks default to
/// doing nothing, and every collider is considered valid for collisions.
/// A motor may call these several times per outer tick.
pub trait CharacterCallbacks {
    /// Replace `rotation` with the orientation for this substep.
    fn update_rotation(&mut self, rotation: &mut Quat, dt: f32, motor: &mut dyn Motor);

    /// Replace `velocity` with the velocity for this substep.
    fn update_velocity(&mut self, velocity: &mut Vec3, dt: f32, motor: &mut dyn Motor);

    fn before_update(&mut self, _dt: f32) {}

    fn post_grounding_update(&mut self, _dt: f32) {}

    fn after_update(&mut self, _dt: f32) {}

    fn is_collider_valid_for_collisions(&self, _collider: ColliderId) -> bool {
        true
    }

    fn on_ground_hit(&mut self, _hit: &Hit, _report: &mut HitStabilityReport) {}

    fn on_movement_hit(&mut self, _hit: &Hit, _report: &mut HitStabilityReport) {}

    fn process_hit_stability_report(
        &mut self,
        _hit: &Hit,
        _at_position: Vec3,
        _at_rotation: Quat,
        _report: &mut HitStabilityReport,
    ) {
    }

    fn on_discrete_collision_detected(&mut self, _collider: ColliderId) {}
}
