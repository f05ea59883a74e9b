//! Chimer - A looping interval timer for the terminal
//!
//! This is the main entry point for the chimer application.

use std::sync::Arc;

use tracing::{info, warn};

use chimer::{
    audio::Cue,
    config::Config,
    logging,
    presets::PresetStore,
    state::AppState,
    tasks::countdown_task,
    ui,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let data_dir = config.data_dir()?;

    // Logs go to a file, the terminal belongs to the UI
    let _log_guard = logging::init(&config, &data_dir);

    info!("Starting chimer v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", data_dir.display());

    // Load presets and build the shared state
    let store = PresetStore::new(&data_dir);
    let presets = store.load();
    info!("Loaded {} presets", presets.len());

    let state = Arc::new(AppState::new(presets, store, config.duration));
    let cue = Cue::new(!config.mute);

    // Start the countdown ticker background task
    let ticker_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        countdown_task(ticker_state, cue).await;
    });

    // Run the UI until quit or a shutdown signal
    let result = tokio::select! {
        result = ui::run(Arc::clone(&state)) => result,
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            Ok(())
        }
    };

    ticker.abort();
    // The signal path cancels the UI mid-await, so restore unconditionally
    if let Err(err) = ui::restore_terminal() {
        warn!("Failed to restore the terminal: {}", err);
    }

    info!("Shutdown complete");
    result
}
