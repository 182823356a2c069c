/// Converts variable frame times into a whole number of fixed simulation ticks.
///
/// Ball velocities are per-tick displacements, so the game only plays at the
/// intended speed when ticks run at a steady rate regardless of display refresh.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

/// Default cap on ticks per frame after a long stall (tab switch, debugger).
pub const DEFAULT_MAX_STEPS: u32 = 10;

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add one frame's elapsed seconds; returns how many ticks to run now.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial tick. Called whenever the table is re-racked.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
