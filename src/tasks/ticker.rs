//! Countdown ticker background task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::audio::Cue;
use crate::state::countdown::TickOutcome;
use crate::state::AppState;

/// Background task that owns the one-second cadence. While the countdown
/// is stopped it parks on the control channel; while running it races an
/// interval against control changes, so stopping or retargeting the
/// countdown drops the interval window and with it any pending tick.
pub async fn countdown_task(state: Arc<AppState>, cue: Cue) {
    info!("Starting countdown ticker task");

    let mut control = state.subscribe_control();

    loop {
        // Park while stopped. Every control bump re-reads the engine, so
        // even coalesced changes land in the right arm.
        while !state.snapshot().running {
            if control.changed().await.is_err() {
                info!("Control channel closed, ticker exiting");
                return;
            }
        }

        debug!("Countdown window opened");
        let mut interval = time::interval(Duration::from_secs(1));
        // Missed ticks are not made up, the next one lands a full second out
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // real tick arrives a second after the window opens
        interval.tick().await;

        loop {
            tokio::select! {
                // Timer tick - advance the countdown
                _ = interval.tick() => {
                    if state.tick() == TickOutcome::Expired {
                        info!("Interval elapsed, playing chime");
                        cue.play();
                    }
                }

                // Control change - drop this window and re-evaluate
                changed = control.changed() => {
                    if changed.is_err() {
                        info!("Control channel closed, ticker exiting");
                        return;
                    }
                    debug!("Countdown window reset");
                    break;
                }
            }
        }
    }
}
