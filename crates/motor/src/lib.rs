//! Character motor boundary: what the locomotion core may ask of, and tell,
//! the physics layer that owns the character body.
//!
//! # Invariants
//! - Controllers read motor state and issue `force_unground`; nothing else.
//! - Motors may run the controller callbacks several times per tick.
//!
//! # Workaround
//! Collision detection and slope classification belong to the host physics
//! engine. [`PlaneMotor`] stands in for it with a single ground plane so the
//! core can be driven end to end without one.

pub mod hooks;
pub mod motor;
pub mod plane;

pub use hooks::{CharacterCallbacks, ColliderId, Hit, HitStabilityReport};
pub use motor::{GroundingStatus, Motor, MotorDriver, MotorQuery};
pub use plane::{GROUND_COLLIDER, PlaneMotor, PlaneMotorConfig};

pub fn crate_info() -> &'static str {
    "gait-motor v0.1.0"
}
