use gait_motor::{GroundingStatus, Motor, MotorQuery};
use glam::Vec3;

/// Motor stand-in whose grounding the test sets directly.
#[derive(Debug, Clone)]
pub struct StubMotor {
    pub grounded: bool,
    pub normal: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub ungrounds: usize,
}

impl StubMotor {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            normal: Vec3::Y,
            up: Vec3::Y,
            forward: Vec3::Z,
            ungrounds: 0,
        }
    }

    pub fn airborne() -> Self {
        Self {
            grounded: false,
            ..Self::grounded()
        }
    }
}

impl MotorQuery for StubMotor {
    fn grounding_status(&self) -> GroundingStatus {
        GroundingStatus {
            is_stable_on_ground: self.grounded,
            ground_normal: self.normal,
        }
    }

    fn character_up(&self) -> Vec3 {
        self.up
    }

    fn character_forward(&self) -> Vec3 {
        self.forward
    }
}

impl Motor for StubMotor {
    fn force_unground(&mut self) {
        self.ungrounds += 1;
        self.grounded = false;
    }
}
