/// Fixed-rate clock for offline rendering: maps frame numbers to seconds.
pub struct FrameClock {
    fps: f32,
}

impl FrameClock {
    pub fn new(fps: f32) -> Self {
        Self { fps }
    }

    /// Seconds between two frames.
    pub fn delta(&self) -> f32 {
        1.0 / self.fps
    }

    /// Get frame time in seconds for a given frame number
    pub fn frame_to_time(&self, frame_number: usize) -> f32 {
        frame_number as f32 / self.fps
    }

    /// Calculate total number of frames needed to cover `duration` seconds
    pub fn frame_count(&self, duration: f32) -> usize {
        (duration * self.fps).ceil().max(0.0) as usize
    }
}
