use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World forward axis. A transform with identity rotation looks along it.
pub const FORWARD: Vec3 = Vec3::Z;

/// World up axis.
pub const UP: Vec3 = Vec3::Y;

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform at `position` with the given rotation and unit scale.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// The rotated forward axis.
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// The rotated up axis.
    pub fn up(&self) -> Vec3 {
        self.rotation * UP
    }

    /// The rotated right axis.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}
