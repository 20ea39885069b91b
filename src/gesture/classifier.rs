use crate::game::Direction;
use crate::gesture::GestureConfig;
use crate::tracker::Landmark;

/// Classifies palm motion between consecutive frames into turn proposals
///
/// The classifier keeps the last seen palm position in pixel space and
/// compares each new observation against it. When the displacement on the
/// dominant axis exceeds the motion threshold, it proposes the cardinal
/// direction of that displacement. Whether a proposal is actually applied
/// (it may reverse the snake) is the engine's decision, not the
/// classifier's.
///
/// Frames where the detector saw no hand are simply never fed to the
/// classifier, so a missed detection does not produce a spurious delta.
#[derive(Debug)]
pub struct MotionClassifier {
    threshold_px: i32,
    frame_width: u32,
    frame_height: u32,
    prev: Option<(i32, i32)>,
}

impl MotionClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            threshold_px: config.motion_threshold_px,
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            prev: None,
        }
    }

    /// Observe the palm landmark for one frame, possibly proposing a turn
    ///
    /// The first observation after construction or `reset` never proposes;
    /// it only seeds the previous position.
    pub fn observe(&mut self, palm: &Landmark) -> Option<Direction> {
        let pos = self.to_pixels(palm);
        let proposal = self.prev.and_then(|(px, py)| {
            let dx = pos.0 - px;
            let dy = pos.1 - py;

            if dx.abs() <= self.threshold_px && dy.abs() <= self.threshold_px {
                return None;
            }

            // Dominant axis wins; ties go vertical
            if dx.abs() > dy.abs() {
                Some(if dx > 0 {
                    Direction::Right
                } else {
                    Direction::Left
                })
            } else {
                Some(if dy > 0 { Direction::Down } else { Direction::Up })
            }
        });

        self.prev = Some(pos);
        proposal
    }

    /// Forget the previous palm position (used on game restart)
    pub fn reset(&mut self) {
        self.prev = None;
    }

    fn to_pixels(&self, palm: &Landmark) -> (i32, i32) {
        (
            (palm.x * self.frame_width as f32) as i32,
            (palm.y * self.frame_height as f32) as i32,
        )
    }
}
