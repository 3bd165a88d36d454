/// Fixed timestep accumulator.
/// Runs the simulation at a consistent tick rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick, in seconds.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
    /// Upper bound on ticks per frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f64, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f64);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Drop any partial tick, e.g. after a pause.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
