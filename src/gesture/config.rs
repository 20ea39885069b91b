use serde::{Deserialize, Serialize};

/// Configuration for gesture classification thresholds
///
/// Displacements are measured in the camera's pixel space, so the frame
/// dimensions here must match what the tracker helper captures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum palm displacement (px) between frames to count as a flick
    ///
    /// Default: 20
    pub motion_threshold_px: i32,

    /// Camera frame width in pixels
    ///
    /// Default: 640
    pub frame_width: u32,

    /// Camera frame height in pixels
    ///
    /// Default: 480
    pub frame_height: u32,

    /// Hand span (normalized) mapped to the minimum speed
    ///
    /// Default: 0.1
    pub min_hand_span: f32,

    /// Hand span (normalized) mapped to the maximum speed
    ///
    /// Default: 0.4
    pub max_hand_span: f32,

    /// Slowest tick rate in ticks per second
    ///
    /// Default: 5
    pub min_speed: u32,

    /// Fastest tick rate in ticks per second
    ///
    /// Default: 20
    pub max_speed: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            motion_threshold_px: 20,
            frame_width: 640,
            frame_height: 480,
            min_hand_span: 0.1,
            max_hand_span: 0.4,
            min_speed: 5,
            max_speed: 20,
        }
    }
}
