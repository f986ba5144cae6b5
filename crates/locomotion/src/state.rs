use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::LocomotionConfig;

/// Locomotion state carried from tick to tick.
///
/// Only the step functions in [`crate::step`] produce new values, which keeps
/// `0 <= jumps_used <= jump_limit` and the single-use jump request intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    pub(crate) move_direction: Vec3,
    pub(crate) look_direction: Vec3,
    pub(crate) jump_requested: bool,
    pub(crate) jumps_used: u32,
    pub(crate) jumps_reset_pending: bool,
    pub(crate) current_speed: f32,
}

impl LocomotionState {
    /// Idle state: no movement, no pending jump, full jump budget.
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            current_speed: config.base_speed,
            ..Self::default()
        }
    }

    /// World-space movement direction; length is at most 1.
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    /// Unit direction the character should face, or zero when idle.
    pub fn look_direction(&self) -> Vec3 {
        self.look_direction
    }

    /// A jump is latched and waits for the next velocity step.
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Jump impulses spent since the budget was last restored.
    pub fn jumps_used(&self) -> u32 {
        self.jumps_used
    }

    /// The budget resets on the next grounded velocity step.
    pub fn jumps_reset_pending(&self) -> bool {
        self.jumps_reset_pending
    }

    /// Target speed chosen from the held modifiers.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }
}
