use gait_common::{Transform, UP};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::hooks::CharacterCallbacks;

/// Ground contact as last reported by the motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundingStatus {
    /// The character rests on a walkable surface.
    pub is_stable_on_ground: bool,
    /// Unit normal of the ground under the character. Meaningful only when
    /// `is_stable_on_ground` is set.
    pub ground_normal: Vec3,
}

impl Default for GroundingStatus {
    fn default() -> Self {
        Self {
            is_stable_on_ground: false,
            ground_normal: UP,
        }
    }
}

/// Read-only queries a character controller makes against its motor.
///
/// The motor owns collision, grounding classification and the body; the
/// controller only observes it through this interface.
pub trait MotorQuery {
    fn grounding_status(&self) -> GroundingStatus;

    /// Character-relative up axis.
    fn character_up(&self) -> Vec3;

    /// Character-relative forward axis.
    fn character_forward(&self) -> Vec3;

    fn is_stable_on_ground(&self) -> bool {
        self.grounding_status().is_stable_on_ground
    }

    fn ground_normal(&self) -> Vec3 {
        self.grounding_status().ground_normal
    }

    /// Unit direction tangent to the surface with the given normal, keeping
    /// the heading of `direction` as seen from above.
    ///
    /// Returns zero when `direction` is zero or parallel to the character up.
    fn direction_tangent_to_surface(&self, direction: Vec3, surface_normal: Vec3) -> Vec3 {
        let direction_right = direction.cross(self.character_up());
        surface_normal.cross(direction_right).normalize_or_zero()
    }
}

/// Commands a character controller may issue to its motor.
pub trait Motor: MotorQuery {
    /// Leave the ground now and skip ground snapping until the motor decides
    /// the character may be grounded again.
    fn force_unground(&mut self);
}

/// Driving side of a motor: runs one outer tick of simulation, calling back
/// into the controller for rotation and velocity each substep.
pub trait MotorDriver: Motor {
    /// Advance the body by `dt`, possibly in several substeps.
    fn simulate(&mut self, dt: f32, callbacks: &mut dyn CharacterCallbacks);

    /// Current body transform.
    fn body(&self) -> Transform;

    fn velocity(&self) -> Vec3;

    fn rotation(&self) -> Quat {
        self.body().rotation
    }
}
