use clap::ValueEnum;
use gait_input::{LookInput, MoveAxes, TickInput};
use glam::Vec2;

/// Canned input sequences for `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// Walk forward, strafe for a second, then sprint.
    Walk,
    /// Walk forward with a double jump, land, then jump again.
    Jump,
    /// Circle while yawing the camera; zoom out at the start.
    Orbit,
}

impl Script {
    /// Input for a 1-based tick at 60 Hz pacing.
    pub fn input(self, tick: u64) -> TickInput {
        match self {
            Script::Walk => TickInput {
                axes: MoveAxes::new(1.0, if (60..120).contains(&tick) { 1.0 } else { 0.0 }),
                sprint: tick >= 180,
                ..TickInput::default()
            },
            Script::Jump => TickInput {
                axes: MoveAxes::new(1.0, 0.0),
                jump: matches!(tick, 10 | 25 | 120),
                ..TickInput::default()
            },
            Script::Orbit => {
                let moving = tick > 30;
                TickInput {
                    axes: MoveAxes::new(if moving { 1.0 } else { 0.0 }, 0.0),
                    look: LookInput {
                        rotation: Vec2::new(0.3, 0.0),
                        zoom: if tick <= 10 { 0.1 } else { 0.0 },
                    },
                    ..TickInput::default()
                }
            }
        }
    }
}
