//! State management module
//!
//! This module contains the countdown engine and the shared state around it.

pub mod app_state;
pub mod countdown;
pub mod duration;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{CountdownEngine, TickOutcome, TimerSnapshot};
pub use duration::DurationSecs;
