//! Chimer - A looping interval timer for the terminal
//!
//! This library provides a countdown that repeats until stopped, chiming
//! at the end of every interval, with a persisted list of preset durations
//! and ad-hoc custom durations.

pub mod audio;
pub mod config;
pub mod logging;
pub mod presets;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use audio::Cue;
pub use config::Config;
pub use presets::{PresetList, PresetStore};
pub use state::AppState;
pub use tasks::countdown_task;
pub use utils::signals::shutdown_signal;
