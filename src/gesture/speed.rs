use crate::gesture::GestureConfig;

/// Maps hand span to a tick rate
///
/// The span (wrist to middle-finger tip, in normalized units) grows as the
/// hand opens or approaches the camera; it is mapped linearly onto the
/// integer speed range and clamped at both ends.
#[derive(Debug, Clone, Copy)]
pub struct SpeedCurve {
    min_span: f32,
    max_span: f32,
    min_speed: u32,
    max_speed: u32,
}

impl SpeedCurve {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_span: config.min_hand_span,
            max_span: config.max_hand_span,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
        }
    }

    /// The slowest tick rate, used before any hand has been seen
    pub fn min_speed(&self) -> u32 {
        self.min_speed
    }

    /// Tick rate for a hand span, in ticks per second
    pub fn speed_for_span(&self, span: f32) -> u32 {
        let range = (self.max_speed - self.min_speed) as f32;
        let t = (span - self.min_span) / (self.max_span - self.min_span);
        let speed = self.min_speed as i64 + (t * range) as i64;

        speed.clamp(self.min_speed as i64, self.max_speed as i64) as u32
    }
}
