//! Background tasks module
//!
//! This module contains background tasks that run alongside the UI.

pub mod ticker;

// Re-export main functions
pub use ticker::countdown_task;
