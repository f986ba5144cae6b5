//! Pure locomotion steps: `(state, input, motor queries) -> new state`.
//!
//! None of these functions touch the motor; commands the motor must carry
//! out are returned in [`VelocityUpdate`].

use gait_common::math::{
    exp_blend_factor, look_rotation, planar_direction, project_on_axis, slerp_direction,
};
use gait_common::{FORWARD, UP};
use gait_input::Intent;
use gait_motor::MotorQuery;
use glam::{Quat, Vec3};

use crate::config::LocomotionConfig;
use crate::state::LocomotionState;

/// Result of one velocity step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityUpdate {
    pub velocity: Vec3,
    /// A jump impulse was applied; the motor must leave the ground.
    pub force_unground: bool,
}

/// Target speed for the held modifiers. Sprint wins over crouch.
pub fn resolve_speed(config: &LocomotionConfig, intent: &Intent) -> f32 {
    if intent.sprint {
        config.sprint_speed
    } else if intent.crouch {
        config.crouch_speed
    } else {
        config.base_speed
    }
}

/// Camera heading flattened onto the plane orthogonal to `up`.
///
/// A camera looking straight along `up` has no usable forward projection;
/// its up axis is projected instead.
pub fn camera_planar_direction(camera_rotation: Quat, up: Vec3) -> Vec3 {
    planar_direction(camera_rotation * FORWARD, up)
        .or_else(|| planar_direction(camera_rotation * UP, up))
        .unwrap_or(Vec3::ZERO)
}

/// Fold this tick's intent into the state. Runs once per tick, before the
/// motor substep.
///
/// Grounding comes from the motor's previous substep, so the reset latch
/// sees ground contact one tick late.
pub fn apply_intent<M: MotorQuery + ?Sized>(
    state: &LocomotionState,
    config: &LocomotionConfig,
    intent: &Intent,
    motor: &M,
) -> LocomotionState {
    let mut next = *state;
    let grounded = motor.is_stable_on_ground();

    if next.jumps_used >= config.jump_limit || grounded {
        next.jumps_reset_pending = true;
    }

    // A request stays armed while airborne as long as budget remains.
    if (intent.jump || next.jump_requested) && (grounded || next.jumps_used < config.jump_limit) {
        next.jump_requested = true;
    }

    next.current_speed = resolve_speed(config, intent);

    let up = motor.character_up();
    let basis = look_rotation(camera_planar_direction(intent.camera_rotation, up), up);
    next.move_direction = basis * intent.axes.planar();
    next.look_direction = next.move_direction.normalize_or_zero();
    next
}

/// Orientation for this substep: turn the character forward toward the look
/// direction, or keep `rotation` when idle or turning is disabled.
pub fn rotation_step<M: MotorQuery + ?Sized>(
    state: &LocomotionState,
    config: &LocomotionConfig,
    rotation: Quat,
    dt: f32,
    motor: &M,
) -> Quat {
    if state.look_direction.length_squared() <= 0.0 || config.orientation_sharpness <= 0.0 {
        return rotation;
    }

    let smoothed = slerp_direction(
        motor.character_forward(),
        state.look_direction,
        exp_blend_factor(config.orientation_sharpness, dt),
    )
    .normalize_or_zero();
    look_rotation(smoothed, motor.character_up())
}

/// Velocity for this substep.
///
/// Grounded: conform the current velocity to the surface and blend toward
/// the input velocity, then apply a latched budget reset. Airborne: apply
/// gravity only. A latched jump then overrides the vertical component.
pub fn velocity_step<M: MotorQuery + ?Sized>(
    state: &LocomotionState,
    config: &LocomotionConfig,
    velocity: Vec3,
    dt: f32,
    motor: &M,
) -> (LocomotionState, VelocityUpdate) {
    let mut next = *state;
    let mut velocity = velocity;
    let up = motor.character_up();
    let grounding = motor.grounding_status();

    if grounding.is_stable_on_ground {
        let normal = grounding.ground_normal;
        let speed = velocity.length();
        velocity = motor.direction_tangent_to_surface(velocity, normal) * speed;

        let input_right = next.move_direction.cross(up);
        let reoriented = normal.cross(input_right).normalize_or_zero();
        let target = reoriented * next.current_speed;
        velocity = velocity.lerp(target, exp_blend_factor(config.movement_sharpness, dt));

        if next.jumps_reset_pending {
            next.jumps_used = 0;
            next.jumps_reset_pending = false;
        }
    } else {
        velocity += config.gravity * dt;
    }

    let mut force_unground = false;
    if next.jump_requested {
        velocity += up * config.jump_speed - project_on_axis(velocity, up);
        next.jump_requested = false;
        if next.jumps_used < config.jump_limit {
            next.jumps_used += 1;
        }
        force_unground = true;
    }

    (
        next,
        VelocityUpdate {
            velocity,
            force_unground,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubMotor;
    use approx::assert_abs_diff_eq;
    use gait_input::MoveAxes;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const DT: f32 = 1.0 / 60.0;

    fn walk(forward: f32, right: f32) -> Intent {
        Intent {
            axes: MoveAxes::new(forward, right),
            ..Intent::default()
        }
    }

    fn jump() -> Intent {
        Intent {
            jump: true,
            ..Intent::default()
        }
    }

    fn fresh(config: &LocomotionConfig) -> LocomotionState {
        LocomotionState::new(config)
    }

    #[test]
    fn speed_follows_modifiers() {
        let config = LocomotionConfig::default();
        let mut intent = Intent::default();
        assert_eq!(resolve_speed(&config, &intent), config.base_speed);
        intent.crouch = true;
        assert_eq!(resolve_speed(&config, &intent), config.crouch_speed);
        intent.sprint = true;
        assert_eq!(resolve_speed(&config, &intent), config.sprint_speed);
        intent.crouch = false;
        assert_eq!(resolve_speed(&config, &intent), config.sprint_speed);
    }

    #[test]
    fn identity_camera_moves_along_world_forward() {
        let config = LocomotionConfig::default();
        let state = apply_intent(&fresh(&config), &config, &walk(1.0, 0.0), &StubMotor::grounded());
        assert!(state.move_direction().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(state.look_direction().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn yawed_camera_rotates_input() {
        let config = LocomotionConfig::default();
        let intent = Intent {
            camera_rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..walk(1.0, 0.0)
        };
        let state = apply_intent(&fresh(&config), &config, &intent, &StubMotor::grounded());
        assert!(state.move_direction().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn pitched_camera_still_moves_horizontally() {
        let config = LocomotionConfig::default();
        let intent = Intent {
            camera_rotation: Quat::from_rotation_x(FRAC_PI_4),
            ..walk(1.0, 0.0)
        };
        let state = apply_intent(&fresh(&config), &config, &intent, &StubMotor::grounded());
        assert!(state.move_direction().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn partial_input_keeps_magnitude_but_unit_look() {
        let config = LocomotionConfig::default();
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &walk(0.0, -0.5), &motor);
        assert!(state.move_direction().abs_diff_eq(Vec3::new(-0.5, 0.0, 0.0), 1e-6));
        assert!(state.look_direction().abs_diff_eq(-Vec3::X, 1e-6));
    }

    #[test]
    fn camera_looking_straight_up_falls_back_to_camera_up() {
        let config = LocomotionConfig::default();
        let intent = Intent {
            camera_rotation: Quat::from_rotation_x(-FRAC_PI_2),
            ..walk(1.0, 0.0)
        };
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &intent, &motor);
        let dir = state.move_direction();
        assert!(dir.is_finite());
        assert!(dir.abs_diff_eq(-Vec3::Z, 1e-5));

        let again = apply_intent(&fresh(&config), &config, &intent, &motor);
        assert_eq!(again.move_direction(), dir);
    }

    #[test]
    fn camera_looking_straight_down_falls_back_to_camera_up() {
        let config = LocomotionConfig::default();
        let intent = Intent {
            camera_rotation: Quat::from_rotation_x(FRAC_PI_2),
            ..walk(1.0, 0.0)
        };
        let state = apply_intent(&fresh(&config), &config, &intent, &StubMotor::grounded());
        assert!(state.move_direction().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn no_input_means_no_direction() {
        let config = LocomotionConfig::default();
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &Intent::default(), &motor);
        assert_eq!(state.move_direction(), Vec3::ZERO);
        assert_eq!(state.look_direction(), Vec3::ZERO);
    }

    #[test]
    fn grounded_walk_blends_toward_target() {
        let config = LocomotionConfig {
            base_speed: 10.0,
            movement_sharpness: 15.0,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &walk(1.0, 0.0), &motor);
        assert_eq!(state.current_speed(), 10.0);

        let (_, update) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        let factor = 1.0 - (-15.0_f32 / 60.0).exp();
        assert_abs_diff_eq!(factor, 0.2212, epsilon = 1e-4);
        assert!(update.velocity.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0 * factor), 1e-5));
        assert!(!update.force_unground);
    }

    #[test]
    fn airborne_applies_gravity_only() {
        let config = LocomotionConfig {
            gravity: Vec3::new(0.0, -30.0, 0.0),
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::airborne();
        let state = apply_intent(&fresh(&config), &config, &walk(1.0, 1.0), &motor);
        let start = Vec3::new(2.0, 1.0, -3.0);
        let (_, update) = velocity_step(&state, &config, start, 0.1, &motor);
        assert_abs_diff_eq!(update.velocity.y, start.y - 3.0, epsilon = 1e-6);
        assert_eq!(update.velocity.x, start.x);
        assert_eq!(update.velocity.z, start.z);
    }

    #[test]
    fn steady_state_is_unchanged_for_any_dt() {
        let config = LocomotionConfig::default();
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &walk(1.0, 0.0), &motor);
        let target = Vec3::new(0.0, 0.0, config.base_speed);
        for dt in [1e-4, DT, 0.1, 1.0, 10.0] {
            let (_, update) = velocity_step(&state, &config, target, dt, &motor);
            assert!(update.velocity.abs_diff_eq(target, 1e-4), "dt={dt}");
        }
    }

    #[test]
    fn grounded_velocity_follows_slope() {
        let config = LocomotionConfig {
            movement_sharpness: 1e6,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor {
            normal: Vec3::new(0.0, 1.0, -1.0).normalize(),
            ..StubMotor::grounded()
        };
        let state = apply_intent(&fresh(&config), &config, &walk(1.0, 0.0), &motor);
        let (_, update) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize() * config.base_speed;
        assert!(update.velocity.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn jump_replaces_vertical_velocity() {
        let config = LocomotionConfig {
            jump_speed: 8.0,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::airborne();
        let state = apply_intent(&fresh(&config), &config, &jump(), &motor);
        assert!(state.jump_requested());

        let (next, update) = velocity_step(&state, &config, Vec3::new(1.0, -20.0, 2.0), DT, &motor);
        assert!(update.velocity.abs_diff_eq(Vec3::new(1.0, 8.0, 2.0), 1e-5));
        assert!(update.force_unground);
        assert!(!next.jump_requested());
        assert_eq!(next.jumps_used(), 1);
    }

    #[test]
    fn single_jump_budget_waits_for_ground() {
        let config = LocomotionConfig {
            jump_limit: 1,
            ..LocomotionConfig::default()
        };
        let mut motor = StubMotor::grounded();

        let state = apply_intent(&fresh(&config), &config, &jump(), &motor);
        assert!(state.jump_requested());
        let (state, update) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        assert!(update.force_unground);
        assert_eq!(state.jumps_used(), 1);
        assert!(!state.jump_requested());

        motor.grounded = false;
        let state = apply_intent(&state, &config, &jump(), &motor);
        assert!(!state.jump_requested());
        assert!(state.jumps_reset_pending());
        let (state, update) = velocity_step(&state, &config, update.velocity, DT, &motor);
        assert!(!update.force_unground);
        assert_eq!(state.jumps_used(), 1);

        motor.grounded = true;
        let state = apply_intent(&state, &config, &Intent::default(), &motor);
        let (state, _) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        assert_eq!(state.jumps_used(), 0);
        assert!(!state.jumps_reset_pending());
    }

    #[test]
    fn airborne_jump_allowed_while_budget_remains() {
        let config = LocomotionConfig {
            jump_limit: 2,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::airborne();

        let state = apply_intent(&fresh(&config), &config, &jump(), &motor);
        let (state, first) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        assert!(first.force_unground);
        let state = apply_intent(&state, &config, &jump(), &motor);
        let (state, second) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        assert!(second.force_unground);
        assert_eq!(state.jumps_used(), 2);

        let state = apply_intent(&state, &config, &jump(), &motor);
        assert!(!state.jump_requested());
    }

    #[test]
    fn latched_request_persists_without_new_press() {
        let config = LocomotionConfig::default();
        let motor = StubMotor::airborne();
        let state = apply_intent(&fresh(&config), &config, &jump(), &motor);
        let state = apply_intent(&state, &config, &Intent::default(), &motor);
        assert!(state.jump_requested());
    }

    #[test]
    fn reset_latch_waits_for_grounded_velocity_step() {
        let config = LocomotionConfig {
            jump_limit: 1,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::airborne();
        let state = LocomotionState {
            jumps_used: 1,
            ..fresh(&config)
        };
        let state = apply_intent(&state, &config, &Intent::default(), &motor);
        assert!(state.jumps_reset_pending());
        let (state, _) = velocity_step(&state, &config, Vec3::ZERO, DT, &motor);
        assert_eq!(state.jumps_used(), 1);
        assert!(state.jumps_reset_pending());
    }

    #[test]
    fn jump_budget_stays_in_bounds_over_mixed_sequence() {
        let config = LocomotionConfig {
            jump_limit: 3,
            ..LocomotionConfig::default()
        };
        let mut motor = StubMotor::grounded();
        let mut state = fresh(&config);
        let mut velocity = Vec3::ZERO;

        // Deterministic pattern of presses and ground contact.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            motor.grounded = seed & 0b11 == 0;
            let intent = Intent {
                jump: seed & 0b100 != 0,
                ..walk(1.0, 0.0)
            };
            state = apply_intent(&state, &config, &intent, &motor);
            // Several substeps per tick.
            for _ in 0..1 + (seed >> 8) % 3 {
                let requested = state.jump_requested();
                let (next, update) = velocity_step(&state, &config, velocity, DT, &motor);
                assert!(next.jumps_used() <= config.jump_limit);
                assert!(!next.jump_requested());
                assert_eq!(update.force_unground, requested);
                state = next;
                velocity = update.velocity;
            }
        }
    }

    #[test]
    fn idle_rotation_is_unchanged() {
        let config = LocomotionConfig::default();
        let state = fresh(&config);
        let rotation = Quat::from_rotation_y(1.0);
        let out = rotation_step(&state, &config, rotation, DT, &StubMotor::grounded());
        assert_eq!(out, rotation);
    }

    #[test]
    fn disabled_turning_keeps_rotation() {
        let config = LocomotionConfig {
            orientation_sharpness: 0.0,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &walk(0.0, 1.0), &motor);
        let out = rotation_step(&state, &config, Quat::IDENTITY, DT, &motor);
        assert_eq!(out, Quat::IDENTITY);
    }

    #[test]
    fn rotation_turns_partway_toward_look_direction() {
        let config = LocomotionConfig {
            orientation_sharpness: 10.0,
            ..LocomotionConfig::default()
        };
        let motor = StubMotor::grounded();
        let state = apply_intent(&fresh(&config), &config, &walk(0.0, 1.0), &motor);
        let out = rotation_step(&state, &config, Quat::IDENTITY, 0.1, &motor);

        let forward = out * Vec3::Z;
        let turned = forward.angle_between(Vec3::Z);
        let expected = FRAC_PI_2 * (1.0 - (-1.0_f32).exp());
        assert_abs_diff_eq!(turned, expected, epsilon = 1e-4);
        assert!(forward.x > 0.0);
        assert!((out * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }
}
