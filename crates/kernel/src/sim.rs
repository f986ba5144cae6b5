use gait_camera::OrbitCamera;
use gait_common::{ConfigError, Transform};
use gait_input::TickInput;
use gait_locomotion::LocomotionController;
use gait_motor::{MotorDriver, MotorQuery, PlaneMotor};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// Record of one simulated tick.
///
/// Carries the input that produced it, so a log can be replayed into a
/// fresh simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    pub tick: u64,
    pub dt: f32,
    pub input: TickInput,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub grounded: bool,
    pub jumps_used: u32,
    pub camera_position: Vec3,
}

/// Drives a camera, a locomotion controller and a motor in lockstep.
///
/// Each tick the camera moves first; its rotation then orients the
/// movement intent handed to the controller before the motor runs.
#[derive(Debug)]
pub struct Simulation<M: MotorDriver> {
    camera: OrbitCamera,
    controller: LocomotionController,
    motor: M,
    anchor_height: f32,
    tick: u64,
    /// Append-only log of every step.
    event_log: Vec<TickEvent>,
}

impl Simulation<PlaneMotor> {
    /// Build a simulation whose character stands on a [`PlaneMotor`].
    pub fn on_plane(config: &SimulationConfig, start: Transform) -> Result<Self, ConfigError> {
        let motor = PlaneMotor::new(config.motor.clone(), start);
        Self::new(config, motor)
    }
}

impl<M: MotorDriver> Simulation<M> {
    /// Build a simulation over `motor`. The camera binds to the motor's body.
    pub fn new(config: &SimulationConfig, motor: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut camera = OrbitCamera::new(config.camera.clone())?;
        let controller = LocomotionController::new(config.locomotion.clone())?;
        camera.set_anchor(anchor_of(motor.body(), config.anchor_height));
        Ok(Self {
            camera,
            controller,
            motor,
            anchor_height: config.anchor_height,
            tick: 0,
            event_log: Vec::new(),
        })
    }

    /// Rebuild a simulation by feeding `events` back through `step`.
    pub fn replay(
        config: &SimulationConfig,
        motor: M,
        events: &[TickEvent],
    ) -> Result<Self, ConfigError> {
        let mut sim = Self::new(config, motor)?;
        for event in events {
            sim.step(event.dt, &event.input);
        }
        Ok(sim)
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The orbit camera following the character.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// The locomotion controller driven by the motor.
    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    /// The motor owning the character body.
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[TickEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance one tick.
    pub fn step(&mut self, dt: f32, input: &TickInput) -> &TickEvent {
        self.tick += 1;
        let _span = tracing::info_span!("sim_step", tick = self.tick).entered();

        self.camera
            .set_anchor_transform(anchor_of(self.motor.body(), self.anchor_height));
        self.camera.update(dt, input.look.zoom, input.look.rotation);

        let intent = input.intent(self.camera.rotation());
        self.controller.set_intent(&intent, &self.motor);
        self.motor.simulate(dt, &mut self.controller);

        let body = self.motor.body();
        let event = TickEvent {
            tick: self.tick,
            dt,
            input: *input,
            position: body.position,
            velocity: self.motor.velocity(),
            rotation: body.rotation,
            grounded: self.motor.is_stable_on_ground(),
            jumps_used: self.controller.state().jumps_used(),
            camera_position: self.camera.position(),
        };
        tracing::trace!(
            position = ?event.position,
            velocity = ?event.velocity,
            grounded = event.grounded,
            "tick"
        );
        let index = self.event_log.len();
        self.event_log.push(event);
        &self.event_log[index]
    }

    /// Deterministic hash of body, camera and locomotion state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_floats = |h: &mut u64, values: &[f32]| {
            for v in values {
                mix(h, &v.to_le_bytes());
            }
        };

        mix(&mut h, &self.tick.to_le_bytes());

        let body = self.motor.body();
        mix_floats(&mut h, &body.position.to_array());
        mix_floats(&mut h, &body.rotation.to_array());
        mix_floats(&mut h, &self.motor.velocity().to_array());
        mix(&mut h, &[self.motor.is_stable_on_ground() as u8]);

        let camera = self.camera.state();
        mix_floats(&mut h, &camera.position().to_array());
        mix_floats(&mut h, &camera.rotation().to_array());
        mix_floats(&mut h, &camera.facing_direction().to_array());
        mix_floats(
            &mut h,
            &[
                camera.target_vertical_angle(),
                camera.current_distance(),
                camera.target_distance(),
            ],
        );

        let loco = self.controller.state();
        mix_floats(&mut h, &loco.move_direction().to_array());
        mix_floats(&mut h, &loco.look_direction().to_array());
        mix_floats(&mut h, &[loco.current_speed()]);
        mix(&mut h, &loco.jumps_used().to_le_bytes());
        mix(
            &mut h,
            &[loco.jump_requested() as u8, loco.jumps_reset_pending() as u8],
        );
        h
    }
}

/// Camera anchor: the body transform raised along its up axis.
fn anchor_of(body: Transform, height: f32) -> Transform {
    Transform {
        position: body.position + body.up() * height,
        ..body
    }
}
