//! Narrative Navigation
//!
//! Scene ordering and the gesture-driven navigation controller.

mod scene;
mod state;

pub use scene::Scene;
pub use state::{wheel_step, NarrativeState, NavOutcome, SwipeTracker};
