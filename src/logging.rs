//! File-based logging setup
//!
//! The terminal belongs to the UI, so log output goes to a file in the
//! data directory instead of stdout. If the file cannot be opened the app
//! runs without a subscriber; losing logs beats scribbling over the
//! alternate screen.

use std::fs::{self, File};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Config;

/// Log file name inside the data directory
const LOG_FILE: &str = "chimer.log";

/// Initialize file logging. The returned guard must stay alive for the
/// process lifetime so buffered lines are flushed on shutdown.
pub fn init(config: &Config, data_dir: &Path) -> Option<WorkerGuard> {
    let file = match open_log_file(data_dir) {
        Ok(file) => file,
        Err(err) => {
            // The UI has not taken the terminal yet, stderr is still ours
            eprintln!("chimer: file logging disabled: {err}");
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(format!("chimer={}", config.log_level()))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn open_log_file(data_dir: &Path) -> anyhow::Result<File> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(LOG_FILE);
    let file = File::options().append(true).create(true).open(path)?;
    Ok(file)
}
