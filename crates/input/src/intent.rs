use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Planar movement axes, each nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveAxes {
    pub forward: f32,
    pub right: f32,
}

impl MoveAxes {
    /// Axes as given; clamping happens in [`MoveAxes::planar`].
    pub fn new(forward: f32, right: f32) -> Self {
        Self { forward, right }
    }

    /// Local move vector `(right, 0, forward)` with its length clamped to 1.
    ///
    /// Each axis is clamped to `[-1, 1]` first; diagonal input therefore
    /// moves no faster than straight input.
    pub fn planar(&self) -> Vec3 {
        Vec3::new(
            self.right.clamp(-1.0, 1.0),
            0.0,
            self.forward.clamp(-1.0, 1.0),
        )
        .clamp_length_max(1.0)
    }
}

/// Per-tick snapshot of what the player asks the character to do.
///
/// Rebuilt every tick; nothing here persists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub axes: MoveAxes,
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
    /// Orientation of the camera this tick; the basis for movement.
    pub camera_rotation: Quat,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            axes: MoveAxes::default(),
            jump: false,
            sprint: false,
            crouch: false,
            camera_rotation: Quat::IDENTITY,
        }
    }
}

/// Camera look and zoom deltas for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookInput {
    /// `x` yaws right, `y` pitches up.
    pub rotation: Vec2,
    /// Positive values zoom out.
    pub zoom: f32,
}

/// Everything the driving loop receives from input polling in one tick.
///
/// The camera rotation is not known yet when input is polled; it is
/// supplied after the camera update via [`TickInput::intent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub axes: MoveAxes,
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
    pub look: LookInput,
}

impl TickInput {
    /// Build the locomotion intent once this tick's camera rotation is known.
    pub fn intent(&self, camera_rotation: Quat) -> Intent {
        Intent {
            axes: self.axes,
            jump: self.jump,
            sprint: self.sprint,
            crouch: self.crouch,
            camera_rotation,
        }
    }
}
