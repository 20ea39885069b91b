use std::collections::VecDeque;
use std::time::Instant;

/// Rolling statistics over recent tracker observations
///
/// Keeps the arrival time and detection flag of the last N frames so the
/// HUD can show the effective camera frame rate and how often a hand is
/// actually being picked up.
pub struct TrackerStats {
    window: VecDeque<(Instant, bool)>,
    window_size: usize,
    total_frames: u64,
}

impl TrackerStats {
    const DEFAULT_WINDOW: usize = 60;

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    pub fn with_window(window_size: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(window_size),
            window_size,
            total_frames: 0,
        }
    }

    /// Record one observation as it arrives
    pub fn record(&mut self, hand_seen: bool) {
        self.record_at(Instant::now(), hand_seen);
    }

    fn record_at(&mut self, at: Instant, hand_seen: bool) {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back((at, hand_seen));
        self.total_frames += 1;
    }

    /// Frames observed over the whole session
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Camera frame rate over the window, in frames per second
    pub fn fps(&self) -> f64 {
        if self.window.len() < 2 {
            return 0.0;
        }

        let first = self.window.front().map(|(t, _)| *t);
        let last = self.window.back().map(|(t, _)| *t);
        match (first, last) {
            (Some(first), Some(last)) => {
                let span = last.duration_since(first).as_secs_f64();
                if span > 0.0 {
                    (self.window.len() - 1) as f64 / span
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Fraction of windowed frames where a hand was detected, in [0, 1]
    pub fn detection_rate(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }

        let seen = self.window.iter().filter(|(_, s)| *s).count();
        seen as f64 / self.window.len() as f64
    }
}

impl Default for TrackerStats {
    fn default() -> Self {
        Self::new()
    }
}
