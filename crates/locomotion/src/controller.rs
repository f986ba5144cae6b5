use gait_common::ConfigError;
use gait_input::Intent;
use gait_motor::{CharacterCallbacks, Motor, MotorQuery};
use glam::{Quat, Vec3};

use crate::config::LocomotionConfig;
use crate::state::LocomotionState;
use crate::step::{apply_intent, rotation_step, velocity_step};

/// Character controller driven by a motor.
///
/// Call [`LocomotionController::set_intent`] once per tick before the motor
/// substep; the motor then calls the [`CharacterCallbacks`] hooks, possibly
/// several times per tick.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: LocomotionState,
}

impl LocomotionController {
    /// Validate `config` and start idle with a full jump budget.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = LocomotionState::new(&config);
        Ok(Self { config, state })
    }

    /// Tuning this controller was built with.
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Read-only access to the locomotion state.
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Latch this tick's intent. `motor` supplies the grounding result of
    /// its previous substep and the character's up axis.
    pub fn set_intent<M: MotorQuery + ?Sized>(&mut self, intent: &Intent, motor: &M) {
        let next = apply_intent(&self.state, &self.config, intent, motor);
        if next.jump_requested && !self.state.jump_requested {
            tracing::debug!(jumps_used = next.jumps_used, "jump requested");
        }
        self.state = next;
    }
}

impl CharacterCallbacks for LocomotionController {
    fn update_rotation(&mut self, rotation: &mut Quat, dt: f32, motor: &mut dyn Motor) {
        *rotation = rotation_step(&self.state, &self.config, *rotation, dt, &*motor);
    }

    fn update_velocity(&mut self, velocity: &mut Vec3, dt: f32, motor: &mut dyn Motor) {
        let (next, update) = velocity_step(&self.state, &self.config, *velocity, dt, &*motor);
        if next.jumps_used < self.state.jumps_used {
            tracing::debug!(previous = self.state.jumps_used, "jump budget restored");
        }
        self.state = next;
        *velocity = update.velocity;

        if update.force_unground {
            tracing::debug!(
                jumps_used = self.state.jumps_used,
                limit = self.config.jump_limit,
                "jump applied"
            );
            motor.force_unground();
        }
    }
}
