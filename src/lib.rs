//! Handsnake - a webcam-controlled Snake game
//!
//! Hand gestures seen by the camera steer the snake: a flick of the hand
//! turns it, and the spread of the hand sets the tick rate. The library
//! provides:
//! - Core game logic with no I/O dependencies (game module)
//! - Gesture classification from hand landmarks (gesture module)
//! - The hand-landmark source (tracker module)
//! - TUI rendering (render module)
//! - Keyboard handling (input module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod gesture;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod tracker;
