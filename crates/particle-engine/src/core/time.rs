/// Fixed-step frame clock.
/// Turns variable browser frame times into a whole number of simulation
/// updates of `dt` seconds each, and counts the updates it has handed out.
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
    frames: u64,
}

impl FrameClock {
    /// Default cap on updates per frame so a stalled tab cannot spiral.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
            frames: 0,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add elapsed wall time. Returns the number of fixed updates to run.
    /// A clock whose own `dt` is not a positive finite value never steps.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !(frame_dt > 0.0) || !(self.dt > 0.0 && self.dt.is_finite()) {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.frames += steps as u64;
        steps
    }

    /// Update interval in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total fixed updates handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
