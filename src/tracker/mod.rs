//! Hand landmark source
//!
//! The game only needs one capability from the vision stack: a call that
//! yields the next frame's landmark positions. [`HandTracker`] is that
//! interface; [`ProcessTracker`] implements it on top of an external
//! detector process, and tests script their own frames against the trait.
//!
//! Wire format (one JSON object per line on the helper's stdout):
//!
//! ```text
//! {"hand":{"landmarks":[{"x":0.51,"y":0.62}, ...21 points...]}}
//! {"hand":null}
//! ```

pub mod landmark;
pub mod process;

pub use landmark::{HandFrame, Landmark, CONNECTIONS, LANDMARK_COUNT, MIDDLE_FINGER_TIP, WRIST};
pub use process::ProcessTracker;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One camera frame's worth of detection output
///
/// `hand` is `None` when the detector saw no hand in the frame; that is
/// not an error, and the game keeps its previous speed and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub hand: Option<HandFrame>,
}

/// The injected vision capability: a stream of per-frame observations
#[allow(async_fn_in_trait)]
pub trait HandTracker {
    /// Yield the next observation
    ///
    /// `Ok(None)` means the stream ended (the camera stopped delivering
    /// frames); errors carry context about what broke.
    async fn next_frame(&mut self) -> Result<Option<Observation>>;
}

/// Plays back a fixed sequence of observations, for tests
#[cfg(test)]
pub(crate) struct ScriptedTracker {
    frames: std::collections::VecDeque<Observation>,
}

#[cfg(test)]
impl ScriptedTracker {
    pub(crate) fn new(frames: Vec<Observation>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

#[cfg(test)]
impl HandTracker for ScriptedTracker {
    async fn next_frame(&mut self) -> Result<Option<Observation>> {
        Ok(self.frames.pop_front())
    }
}
