//! Platform abstraction layer
//!
//! Frame timing shared by the browser and native frontends. Timestamps are in
//! milliseconds, the unit `requestAnimationFrame` hands out.

/// Converts successive frame timestamps into deltas in seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first frame after construction or
    /// [`FrameClock::restart`] reports 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (the frame chain was stopped)
    pub fn restart(&mut self) {
        self.last_ms = None;
    }
}
