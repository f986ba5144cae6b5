use gait_common::ConfigError;
use gait_common::error::ensure_positive;

/// Longest frame time fed into the accumulator, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Converts variable frame time into whole fixed-size ticks.
///
/// Frame time above [`MAX_FRAME_TIME`] is dropped so a stalled frame cannot
/// trigger an unbounded catch-up burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Result<Self, ConfigError> {
        ensure_positive("step", step)?;
        Ok(Self {
            step,
            accumulator: 0.0,
        })
    }

    /// Fixed tick length in seconds.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's elapsed time. Returns how many ticks to run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        let frame_time = if frame_time.is_finite() {
            frame_time.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Upper bound on ticks produced by a single call to `advance`.
    pub fn max_ticks_per_frame(&self) -> u32 {
        // One extra for a nearly full accumulator carried over.
        (MAX_FRAME_TIME / self.step).floor() as u32 + 1
    }
}
