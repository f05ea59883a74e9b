//! Main application state management

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::presets::{PresetError, PresetList, PresetStore};
use crate::state::countdown::{CountdownEngine, TickOutcome, TimerSnapshot};
use crate::state::duration::DurationSecs;

/// Shared application state. One instance behind `Arc` serves both the UI
/// task and the ticker task. The countdown engine and preset list sit
/// behind mutexes whose guards are held only for short synchronous
/// sections, never across an await.
///
/// Two watch channels fan changes out: `update_tx` carries timer snapshots
/// for redraws, and `control_tx` carries an epoch counter that is bumped
/// whenever the run state or active duration changes, so the ticker can
/// drop its current interval window.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<CountdownEngine>,
    presets: Mutex<PresetList>,
    store: PresetStore,
    /// Wall-clock time of the most recent chime, for the header readout
    last_chime: Mutex<Option<DateTime<Local>>>,
    update_tx: watch::Sender<TimerSnapshot>,
    control_tx: watch::Sender<u64>,
}

impl AppState {
    /// Create the shared state. The active duration comes from `initial`
    /// when given (the CLI override), otherwise from the first preset.
    pub fn new(presets: PresetList, store: PresetStore, initial: Option<DurationSecs>) -> Self {
        let active = initial.unwrap_or_else(|| presets.first());
        let engine = CountdownEngine::new(active);
        let (update_tx, _) = watch::channel(engine.snapshot());
        let (control_tx, _) = watch::channel(0);

        Self {
            engine: Mutex::new(engine),
            presets: Mutex::new(presets),
            store,
            last_chime: Mutex::new(None),
            update_tx,
            control_tx,
        }
    }

    /// Flip the countdown between running and stopped
    pub fn toggle(&self) {
        let snapshot = {
            let mut engine = self.lock_engine();
            engine.toggle();
            engine.snapshot()
        };
        info!(
            "Countdown {} at {}",
            if snapshot.running { "started" } else { "stopped" },
            snapshot.active
        );
        self.publish(snapshot);
        self.bump_control();
    }

    /// Advance the countdown one second. Called by the ticker only. On
    /// expiry the chime timestamp is recorded; playing the cue is the
    /// caller's job.
    pub fn tick(&self) -> TickOutcome {
        let (outcome, snapshot) = {
            let mut engine = self.lock_engine();
            let outcome = engine.tick();
            (outcome, engine.snapshot())
        };
        if outcome == TickOutcome::Expired {
            *self.lock_last_chime() = Some(Local::now());
        }
        self.publish(snapshot);
        outcome
    }

    /// Set the active duration from any source: preset selection, the
    /// custom prompt, or an edit/delete fallback. Resets the countdown
    /// immediately.
    pub fn set_active_duration(&self, duration: DurationSecs) {
        let snapshot = {
            let mut engine = self.lock_engine();
            engine.set_active_duration(duration);
            engine.snapshot()
        };
        debug!("Active duration changed to {}", duration);
        self.publish(snapshot);
        self.bump_control();
    }

    /// Get a copy of the current countdown state
    pub fn snapshot(&self) -> TimerSnapshot {
        self.lock_engine().snapshot()
    }

    /// Get the wall-clock time of the most recent chime
    pub fn last_chime(&self) -> Option<DateTime<Local>> {
        *self.lock_last_chime()
    }

    /// Get a copy of the current preset list
    pub fn presets(&self) -> PresetList {
        self.lock_presets().clone()
    }

    /// Make the preset at `index` the active duration
    pub fn select_preset(&self, index: usize) -> Result<(), PresetError> {
        let value = self.lock_presets().get(index).ok_or(PresetError::BadIndex)?;
        self.set_active_duration(value);
        Ok(())
    }

    /// Add a duration to the presets and persist the list. The active
    /// duration is untouched, adding is not selecting.
    pub fn add_preset(&self, value: DurationSecs) -> Result<(), PresetError> {
        let list = {
            let mut presets = self.lock_presets();
            presets.add(value)?;
            presets.clone()
        };
        info!("Preset {} added", value);
        self.store.save(&list);
        Ok(())
    }

    /// Replace the preset at `index` and persist the list. If that entry
    /// was the active duration, the countdown retargets to the new value.
    pub fn edit_preset(&self, index: usize, value: DurationSecs) -> Result<(), PresetError> {
        let (old, list) = {
            let mut presets = self.lock_presets();
            let old = presets.edit(index, value)?;
            (old, presets.clone())
        };
        info!("Preset {} changed to {}", old, value);
        self.store.save(&list);
        if self.snapshot().active == old {
            self.set_active_duration(value);
        }
        Ok(())
    }

    /// Delete the preset at `index` and persist the list. If it was the
    /// active duration, fall back to the new first entry.
    pub fn delete_preset(&self, index: usize) -> Result<(), PresetError> {
        let (removed, fallback, list) = {
            let mut presets = self.lock_presets();
            let removed = presets.remove(index)?;
            (removed, presets.first(), presets.clone())
        };
        info!("Preset {} deleted", removed);
        self.store.save(&list);
        if self.snapshot().active == removed {
            self.set_active_duration(fallback);
        }
        Ok(())
    }

    /// Subscribe to timer snapshots for redraws
    pub fn subscribe_updates(&self) -> watch::Receiver<TimerSnapshot> {
        self.update_tx.subscribe()
    }

    /// Subscribe to the control epoch. Bumped on run-state and duration
    /// changes, never on plain ticks.
    pub fn subscribe_control(&self) -> watch::Receiver<u64> {
        self.control_tx.subscribe()
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        // send_replace delivers even before the first subscriber shows up
        self.update_tx.send_replace(snapshot);
    }

    fn bump_control(&self) {
        self.control_tx.send_modify(|epoch| *epoch += 1);
    }

    // A poisoned lock means a panicking holder already unwound; the data
    // itself is a plain value and stays usable.
    fn lock_engine(&self) -> MutexGuard<'_, CountdownEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_presets(&self) -> MutexGuard<'_, PresetList> {
        self.presets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_last_chime(&self) -> MutexGuard<'_, Option<DateTime<Local>>> {
        self.last_chime.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn secs(value: u32) -> DurationSecs {
        DurationSecs::new(value).expect("test duration in range")
    }

    fn seconds_of(list: &PresetList) -> Vec<u32> {
        list.entries().iter().map(|d| d.get()).collect()
    }

    fn state_with_defaults() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let state = AppState::new(PresetList::default_pair(), store, None);
        (state, dir)
    }

    #[test]
    fn active_duration_defaults_to_the_first_preset() {
        let (state, _dir) = state_with_defaults();
        assert_eq!(state.snapshot().active, secs(45));
        assert!(!state.snapshot().running);
    }

    #[test]
    fn cli_override_beats_the_first_preset() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let state = AppState::new(PresetList::default_pair(), store, secs(90).into());
        assert_eq!(state.snapshot().active, secs(90));
    }

    #[test]
    fn selecting_a_preset_retargets_the_countdown() {
        let (state, _dir) = state_with_defaults();
        state.select_preset(1).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.active, secs(30));
        assert_eq!(snap.remaining, 30);
    }

    #[test]
    fn selecting_out_of_bounds_is_rejected() {
        let (state, _dir) = state_with_defaults();
        assert_eq!(state.select_preset(7), Err(PresetError::BadIndex));
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn adding_a_preset_does_not_retarget() {
        let (state, _dir) = state_with_defaults();
        state.add_preset(secs(20)).unwrap();
        assert_eq!(seconds_of(&state.presets()), vec![20, 30, 45]);
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn editing_the_active_preset_retargets_the_countdown() {
        let (state, _dir) = state_with_defaults();
        // Default active is 45, held at index 0
        state.edit_preset(0, secs(50)).unwrap();
        assert_eq!(seconds_of(&state.presets()), vec![30, 50]);
        assert_eq!(state.snapshot().active, secs(50));
    }

    #[test]
    fn editing_an_inactive_preset_leaves_the_countdown_alone() {
        let (state, _dir) = state_with_defaults();
        state.edit_preset(1, secs(25)).unwrap();
        assert_eq!(seconds_of(&state.presets()), vec![25, 45]);
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn deleting_the_active_preset_falls_back_to_the_first() {
        let (state, _dir) = state_with_defaults();
        state.add_preset(secs(20)).unwrap();
        state.select_preset(1).unwrap(); // 30 out of [20, 30, 45]
        assert_eq!(state.snapshot().active, secs(30));

        state.delete_preset(1).unwrap();
        assert_eq!(seconds_of(&state.presets()), vec![20, 45]);
        assert_eq!(state.snapshot().active, secs(20));
    }

    #[test]
    fn deleting_an_inactive_preset_keeps_the_active_duration() {
        let (state, _dir) = state_with_defaults();
        state.delete_preset(1).unwrap(); // remove 30, active stays 45
        assert_eq!(seconds_of(&state.presets()), vec![45]);
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn preset_mutations_are_persisted() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let state = AppState::new(store.load(), store, None);
        state.add_preset(secs(20)).unwrap();

        let reread = PresetStore::new(dir.path()).load();
        assert_eq!(seconds_of(&reread), vec![20, 30, 45]);
    }

    #[test]
    fn expiry_records_the_chime_time() {
        let (state, _dir) = state_with_defaults();
        state.set_active_duration(secs(1));
        state.toggle();
        assert!(state.last_chime().is_none());
        assert_eq!(state.tick(), TickOutcome::Expired);
        assert!(state.last_chime().is_some());
    }

    #[test]
    fn control_epoch_bumps_on_toggle_and_retarget_but_not_on_ticks() {
        let (state, _dir) = state_with_defaults();
        let mut control = state.subscribe_control();
        let baseline = *control.borrow_and_update();

        state.toggle();
        state.tick();
        state.tick();
        state.set_active_duration(secs(10));

        assert_eq!(*control.borrow_and_update(), baseline + 2);
    }

    #[test]
    fn updates_channel_carries_the_latest_snapshot() {
        let (state, _dir) = state_with_defaults();
        let mut updates = state.subscribe_updates();
        state.toggle();
        state.tick();
        let snap = *updates.borrow_and_update();
        assert_eq!(snap.remaining, 44);
        assert!(snap.running);
    }
}
