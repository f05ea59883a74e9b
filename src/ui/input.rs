//! Key handling and prompt state

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::state::duration::DurationSecs;
use crate::state::AppState;

/// Longest buffer worth keeping; four digits already covers the range
const MAX_INPUT_DIGITS: usize = 4;

/// Which prompt, if any, currently owns keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing an ad-hoc custom duration
    Custom,
    /// Editing the preset at this position in place
    EditPreset { index: usize },
}

/// UI-local state: the chip cursor and the prompt contents. Domain state
/// lives in `AppState`; everything here is presentation.
#[derive(Debug)]
pub struct UiState {
    pub cursor: usize,
    pub mode: InputMode,
    pub buffer: String,
}

impl UiState {
    /// Create the initial UI state with the cursor on the first preset
    pub fn new() -> Self {
        Self {
            cursor: 0,
            mode: InputMode::Normal,
            buffer: String::new(),
        }
    }

    /// Apply one key event. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> bool {
        // Ctrl-C quits from any mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.mode {
            InputMode::Normal => self.handle_normal(key, state),
            InputMode::Custom => {
                self.handle_prompt(key, state, None);
                false
            }
            InputMode::EditPreset { index } => {
                self.handle_prompt(key, state, Some(index));
                false
            }
        }
    }

    fn handle_normal(&mut self, key: KeyEvent, state: &AppState) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => state.toggle(),
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(state.presets().len() - 1);
            }
            KeyCode::Enter => {
                if let Err(err) = state.select_preset(self.cursor) {
                    debug!("Preset selection rejected: {}", err);
                }
            }
            KeyCode::Char('e') => {
                if let Some(value) = state.presets().get(self.cursor) {
                    self.buffer = value.get().to_string();
                    self.mode = InputMode::EditPreset { index: self.cursor };
                }
            }
            KeyCode::Char('d') => {
                if let Err(err) = state.delete_preset(self.cursor) {
                    debug!("Preset delete rejected: {}", err);
                }
                self.cursor = self.cursor.min(state.presets().len() - 1);
            }
            KeyCode::Char('c') => {
                self.buffer.clear();
                self.mode = InputMode::Custom;
            }
            _ => {}
        }
        false
    }

    /// Shared prompt handling. `edit_index` distinguishes an in-place
    /// preset edit from the custom prompt.
    fn handle_prompt(&mut self, key: KeyEvent, state: &AppState, edit_index: Option<usize>) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.buffer.len() < MAX_INPUT_DIGITS {
                    self.buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Esc => self.close_prompt(),
            KeyCode::Enter => {
                // Invalid input is a silent no-op and the prompt stays
                // open for correction
                let Some(value) = DurationSecs::parse(&self.buffer) else {
                    debug!("Prompt input {:?} rejected", self.buffer);
                    return;
                };
                match edit_index {
                    Some(index) => {
                        if let Err(err) = state.edit_preset(index, value) {
                            debug!("Preset edit rejected: {}", err);
                            return;
                        }
                    }
                    None => state.set_active_duration(value),
                }
                self.close_prompt();
            }
            // Saving a custom duration as a preset is its own action,
            // distinct from submitting it
            KeyCode::Char('a') if edit_index.is_none() => {
                let Some(value) = DurationSecs::parse(&self.buffer) else {
                    debug!("Prompt input {:?} rejected", self.buffer);
                    return;
                };
                match state.add_preset(value) {
                    Ok(()) => self.close_prompt(),
                    Err(err) => debug!("Add to presets rejected: {}", err),
                }
            }
            _ => {}
        }
    }

    fn close_prompt(&mut self) {
        self.buffer.clear();
        self.mode = InputMode::Normal;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{PresetList, PresetStore};
    use tempfile::tempdir;

    fn secs(value: u32) -> DurationSecs {
        DurationSecs::new(value).expect("test duration in range")
    }

    fn state_with_defaults() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let state = AppState::new(PresetList::default_pair(), store, None);
        (state, dir)
    }

    fn press(ui: &mut UiState, state: &AppState, code: KeyCode) -> bool {
        ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn type_digits(ui: &mut UiState, state: &AppState, digits: &str) {
        for c in digits.chars() {
            press(ui, state, KeyCode::Char(c));
        }
    }

    #[test]
    fn space_toggles_the_countdown() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        assert!(!press(&mut ui, &state, KeyCode::Char(' ')));
        assert!(state.snapshot().running);
        press(&mut ui, &state, KeyCode::Char(' '));
        assert!(!state.snapshot().running);
    }

    #[test]
    fn q_and_esc_and_ctrl_c_quit() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        assert!(press(&mut ui, &state, KeyCode::Char('q')));
        assert!(press(&mut ui, &state, KeyCode::Esc));
        assert!(ui.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &state
        ));
    }

    #[test]
    fn arrows_move_the_cursor_within_bounds() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Left);
        assert_eq!(ui.cursor, 0);
        press(&mut ui, &state, KeyCode::Right);
        assert_eq!(ui.cursor, 1);
        press(&mut ui, &state, KeyCode::Right);
        assert_eq!(ui.cursor, 1);
        press(&mut ui, &state, KeyCode::Char('h'));
        assert_eq!(ui.cursor, 0);
    }

    #[test]
    fn enter_selects_the_preset_under_the_cursor() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Right);
        press(&mut ui, &state, KeyCode::Enter);
        assert_eq!(state.snapshot().active, secs(30));
    }

    #[test]
    fn custom_prompt_sets_an_ad_hoc_duration() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        assert_eq!(ui.mode, InputMode::Custom);
        type_digits(&mut ui, &state, "120");
        press(&mut ui, &state, KeyCode::Enter);
        assert_eq!(ui.mode, InputMode::Normal);
        assert_eq!(state.snapshot().active, secs(120));
        // Ad-hoc durations do not join the preset list
        assert_eq!(state.presets().len(), 2);
    }

    #[test]
    fn invalid_custom_input_keeps_the_prompt_open() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        type_digits(&mut ui, &state, "0");
        press(&mut ui, &state, KeyCode::Enter);
        assert_eq!(ui.mode, InputMode::Custom);
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn the_buffer_only_takes_digits_up_to_four() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        type_digits(&mut ui, &state, "12345");
        assert_eq!(ui.buffer, "1234");
        press(&mut ui, &state, KeyCode::Char('x'));
        assert_eq!(ui.buffer, "1234");
        press(&mut ui, &state, KeyCode::Backspace);
        assert_eq!(ui.buffer, "123");
    }

    #[test]
    fn a_adds_the_typed_duration_to_the_presets() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        type_digits(&mut ui, &state, "20");
        press(&mut ui, &state, KeyCode::Char('a'));
        assert_eq!(ui.mode, InputMode::Normal);
        let seconds: Vec<u32> = state.presets().entries().iter().map(|d| d.get()).collect();
        assert_eq!(seconds, vec![20, 30, 45]);
        // Adding is not selecting
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn adding_a_duplicate_keeps_the_prompt_open() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        type_digits(&mut ui, &state, "45");
        press(&mut ui, &state, KeyCode::Char('a'));
        assert_eq!(ui.mode, InputMode::Custom);
        assert_eq!(state.presets().len(), 2);
    }

    #[test]
    fn esc_cancels_the_prompt_without_changes() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('c'));
        type_digits(&mut ui, &state, "99");
        press(&mut ui, &state, KeyCode::Esc);
        assert_eq!(ui.mode, InputMode::Normal);
        assert!(ui.buffer.is_empty());
        assert_eq!(state.snapshot().active, secs(45));
    }

    #[test]
    fn edit_prefills_the_buffer_and_applies_on_enter() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('e'));
        assert_eq!(ui.mode, InputMode::EditPreset { index: 0 });
        assert_eq!(ui.buffer, "45");

        press(&mut ui, &state, KeyCode::Backspace);
        press(&mut ui, &state, KeyCode::Backspace);
        type_digits(&mut ui, &state, "50");
        press(&mut ui, &state, KeyCode::Enter);

        assert_eq!(ui.mode, InputMode::Normal);
        let seconds: Vec<u32> = state.presets().entries().iter().map(|d| d.get()).collect();
        assert_eq!(seconds, vec![30, 50]);
        // 45 was the active duration, so the edit retargeted it
        assert_eq!(state.snapshot().active, secs(50));
    }

    #[test]
    fn editing_to_an_existing_preset_keeps_the_prompt_open() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('e'));
        press(&mut ui, &state, KeyCode::Backspace);
        press(&mut ui, &state, KeyCode::Backspace);
        type_digits(&mut ui, &state, "30");
        press(&mut ui, &state, KeyCode::Enter);
        assert_eq!(ui.mode, InputMode::EditPreset { index: 0 });
    }

    #[test]
    fn the_add_action_is_ignored_while_editing() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('e'));
        press(&mut ui, &state, KeyCode::Char('a'));
        assert_eq!(state.presets().len(), 2);
        assert_eq!(ui.mode, InputMode::EditPreset { index: 0 });
    }

    #[test]
    fn deleting_clamps_the_cursor() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Right);
        press(&mut ui, &state, KeyCode::Char('d'));
        assert_eq!(state.presets().len(), 1);
        assert_eq!(ui.cursor, 0);
    }

    #[test]
    fn deleting_the_last_preset_is_rejected() {
        let (state, _dir) = state_with_defaults();
        let mut ui = UiState::new();
        press(&mut ui, &state, KeyCode::Char('d'));
        press(&mut ui, &state, KeyCode::Char('d'));
        assert_eq!(state.presets().len(), 1);
    }
}
