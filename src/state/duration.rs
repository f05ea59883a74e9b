//! Validated countdown durations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest accepted duration in seconds
pub const MIN_SECONDS: u32 = 1;
/// Largest accepted duration in seconds (one hour)
pub const MAX_SECONDS: u32 = 3600;

/// A duration in whole seconds, guaranteed to lie in
/// `[MIN_SECONDS, MAX_SECONDS]`. Presets, the CLI override and the custom
/// prompt all construct through this type, so out-of-range values never
/// reach the countdown engine or the preset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DurationSecs(u32);

/// Error for second counts outside the accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duration must be between {MIN_SECONDS} and {MAX_SECONDS} seconds, got {0}")]
pub struct OutOfRange(pub u32);

impl DurationSecs {
    /// Create a duration, rejecting values outside the accepted range
    pub fn new(secs: u32) -> Option<Self> {
        (MIN_SECONDS..=MAX_SECONDS)
            .contains(&secs)
            .then_some(Self(secs))
    }

    /// Parse text from the custom prompt or the command line. Anything
    /// that is not a whole second count in range yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<u32>().ok().and_then(Self::new)
    }

    /// Get the raw number of seconds
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DurationSecs {
    type Error = OutOfRange;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::new(secs).ok_or(OutOfRange(secs))
    }
}

impl From<DurationSecs> for u32 {
    fn from(duration: DurationSecs) -> Self {
        duration.0
    }
}

impl fmt::Display for DurationSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
