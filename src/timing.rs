//! Rolling frame-time average for the window title

use std::collections::VecDeque;
use std::time::Instant;

/// Samples kept in the rolling window
const FRAME_SAMPLES: usize = 30;

/// Assumed frame time (ms) before any real samples arrive
const INITIAL_FRAME_MS: f32 = 16.0;

pub struct FrameTimer {
    frame_times: VecDeque<f32>,
    frame_start: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::from(vec![INITIAL_FRAME_MS; FRAME_SAMPLES]),
            frame_start: Instant::now(),
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Close the current frame and return the new average in ms
    pub fn end(&mut self) -> f32 {
        let frame_ms = self.frame_start.elapsed().as_secs_f32() * 1000.0;
        self.record(frame_ms)
    }

    pub fn record(&mut self, frame_ms: f32) -> f32 {
        self.frame_times.pop_front();
        self.frame_times.push_back(frame_ms);
        self.average()
    }

    pub fn average(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn title(avg_ms: f32) -> String {
    format!("parsim :: {:>7.3} ms", avg_ms)
}
