use instant::Instant;

/// Per-frame timing shared by everything refreshed inside one render callback.
///
/// The frame number is the memoization key for input handlers: a handler
/// refreshed twice with the same frame number does the work once.
#[derive(Clone, Debug)]
pub struct FrameClock {
    frame: u64,
    elapsed_sec: f32,
    delta_sec: f32,
    start: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame: 0,
            elapsed_sec: 0.0,
            delta_sec: 0.0,
            start: None,
        }
    }

    /// Advance one frame using an externally supplied elapsed time (seconds),
    /// e.g. the XR frame timestamp.
    pub fn tick(&mut self, elapsed_sec: f32) {
        self.frame += 1;
        self.delta_sec = (elapsed_sec - self.elapsed_sec).max(0.0);
        self.elapsed_sec = elapsed_sec;
    }

    /// Advance one frame using the wall clock, measured from the first call.
    pub fn tick_now(&mut self) {
        let start = *self.start.get_or_insert_with(Instant::now);
        let elapsed = start.elapsed().as_secs_f32();
        self.tick(elapsed);
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_sec
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_sec
    }
}

/// Rolling frames-per-second estimate, published every `window_sec`.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    window_sec: f32,
    accum_sec: f32,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub fn new(window_sec: f32) -> Self {
        Self {
            window_sec,
            accum_sec: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Record a frame; returns the new estimate whenever a window completes.
    pub fn record(&mut self, delta_sec: f32) -> Option<f32> {
        self.accum_sec += delta_sec;
        self.frames += 1;
        if self.accum_sec < self.window_sec {
            return None;
        }
        self.fps = self.frames as f32 / self.accum_sec;
        self.accum_sec = 0.0;
        self.frames = 0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
