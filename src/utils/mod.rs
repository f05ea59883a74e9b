//! Small cross-cutting helpers

pub mod signals;

pub use signals::shutdown_signal;
