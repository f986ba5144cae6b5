//! Simulation driver tying camera, locomotion and motor together.
//!
//! # Invariants
//! - Per tick: camera update, then intent, then motor substeps.
//! - The event log is append-only; one [`TickEvent`] per step.
//! - Identical configs and inputs produce identical [`Simulation::state_hash`] values.

pub mod config;
pub mod sim;
pub mod timestep;

pub use config::{ConfigFormat, ConfigLoadError, SimulationConfig};
pub use sim::{Simulation, TickEvent};
pub use timestep::{FixedTimestep, MAX_FRAME_TIME};

pub fn crate_info() -> &'static str {
    "gait-kernel v0.1.0"
}
