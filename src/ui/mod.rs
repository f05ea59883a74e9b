//! Terminal user interface
//!
//! Owns the terminal lifecycle (raw mode and the alternate screen) and the
//! event loop: an async crossterm event stream raced against the snapshot
//! channel, so the screen follows both keystrokes and ticks.

pub mod input;
pub mod view;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, warn};

use crate::state::AppState;
use input::UiState;
use view::FrameData;

/// Run the UI until the user quits or the terminal goes away
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, state).await;
    if let Err(err) = restore_terminal() {
        warn!("Failed to restore the terminal: {}", err);
    }
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: Arc<AppState>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut updates = state.subscribe_updates();
    let mut ui = UiState::new();

    loop {
        let presets = state.presets();
        let frame_data = FrameData {
            snapshot: state.snapshot(),
            presets: &presets,
            last_chime: state.last_chime(),
            ui: &ui,
        };
        terminal.draw(|frame| view::render(frame, &frame_data))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if ui.handle_key(key, &state) {
                            debug!("Quit requested");
                            return Ok(());
                        }
                    }
                    // Resize and the rest just trigger the redraw above
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("Terminal event error: {}", err);
                    }
                    None => {
                        debug!("Event stream ended");
                        return Ok(());
                    }
                }
            }
            changed = updates.changed() => {
                // A closed channel means the state is gone and we are
                // shutting down anyway
                if changed.is_err() {
                    return Ok(());
                }
            }
        }
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Give the terminal back to the shell. Safe to call more than once; the
/// shutdown path calls it even when the UI future was cancelled mid-await.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
