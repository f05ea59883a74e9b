//! Countdown engine for the repeating interval

use crate::state::duration::DurationSecs;

/// What a single one-second tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is stopped, nothing changed
    Idle,
    /// One second elapsed and the remaining count was decremented
    Counted,
    /// The interval ended: the chime is due and the remaining count
    /// wrapped back to the active duration
    Expired,
}

/// Point-in-time copy of the countdown, published to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub remaining: u32,
    pub active: DurationSecs,
    pub running: bool,
}

impl TimerSnapshot {
    /// Fraction of the current interval already elapsed, in `[0, 1)`.
    /// Never reaches 1.0 because the final second wraps straight back to
    /// the full duration.
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.active.get());
        let remaining = f64::from(self.remaining);
        (1.0 - remaining / total).clamp(0.0, 1.0)
    }
}

/// Core countdown state: remaining seconds, run flag, and the duration the
/// countdown resets to. Ticking is driven from outside, so the whole
/// contract is testable without a runtime.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    active: DurationSecs,
    remaining: u32,
    running: bool,
}

impl CountdownEngine {
    /// Create a stopped engine primed to the given duration
    pub fn new(active: DurationSecs) -> Self {
        Self {
            active,
            remaining: active.get(),
            running: false,
        }
    }

    /// Begin counting from the full active duration
    pub fn start(&mut self) {
        self.remaining = self.active.get();
        self.running = true;
    }

    /// Stop counting; the remaining count keeps its last value for display
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip between running and stopped
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Check whether the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the duration the countdown resets to
    pub fn active_duration(&self) -> DurationSecs {
        self.active
    }

    /// Change the governing duration. Takes effect immediately: the
    /// remaining count resets to the new duration whether or not the
    /// countdown is running, discarding partial progress.
    pub fn set_active_duration(&mut self, duration: DurationSecs) {
        self.active = duration;
        self.remaining = duration.get();
    }

    /// Advance the countdown by one second. At the final second the
    /// countdown wraps back to the active duration instead of parking at
    /// zero, so the interval repeats until stopped.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.remaining > 1 {
            self.remaining -= 1;
            TickOutcome::Counted
        } else {
            self.remaining = self.active.get();
            TickOutcome::Expired
        }
    }

    /// Get a copy of the current countdown state
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining: self.remaining,
            active: self.active,
            running: self.running,
        }
    }
}
