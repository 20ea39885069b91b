use serde::{Deserialize, Serialize};

/// Number of keypoints the detector reports per hand
pub const LANDMARK_COUNT: usize = 21;

/// Landmark index of the wrist, used as the palm position
pub const WRIST: usize = 0;

/// Landmark index of the middle finger tip, the far end of the hand span
pub const MIDDLE_FINGER_TIP: usize = 12;

/// Skeleton edges between landmark indices, for drawing the hand
///
/// Thumb, index, middle, ring and pinky chains plus the palm edges, in the
/// detector's standard 21-point layout.
pub const CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (0, 17),
];

/// A normalized 2D point from the hand-pose detector
///
/// Coordinates are in [0, 1] relative to the camera frame, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    /// Euclidean distance to another landmark, in normalized units
    pub fn distance_to(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detected hand: the full set of 21 keypoints
///
/// Frames are validated to carry exactly [`LANDMARK_COUNT`] landmarks when
/// parsed off the wire, so the accessors index directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub landmarks: Vec<Landmark>,
}

impl HandFrame {
    /// The palm position (wrist landmark)
    pub fn palm(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }

    /// Hand span: wrist to middle finger tip, in normalized units
    ///
    /// Grows as the hand opens or moves toward the camera; drives the game
    /// speed.
    pub fn span(&self) -> f32 {
        self.landmarks[WRIST].distance_to(&self.landmarks[MIDDLE_FINGER_TIP])
    }
}
