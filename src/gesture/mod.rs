//! Gesture classification from hand landmarks
//!
//! Turns the tracker's landmark frames into game input: hand motion becomes
//! a direction proposal, hand span becomes the tick rate.

pub mod classifier;
pub mod config;
pub mod speed;

pub use classifier::MotionClassifier;
pub use config::GestureConfig;
pub use speed::SpeedCurve;
