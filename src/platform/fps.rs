//! Frame-rate counter over a sliding window of frame timestamps

/// Frames averaged per reading
const WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; WINDOW],
    index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp (milliseconds) and return the current reading.
    /// Reads 0 until the window has filled once.
    pub fn record(&mut self, time_ms: f64) -> u32 {
        self.frame_times[self.index] = time_ms;
        self.index = (self.index + 1) % WINDOW;

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
