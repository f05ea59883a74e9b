//! Configuration and CLI argument handling

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::state::duration::{DurationSecs, MAX_SECONDS, MIN_SECONDS};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "chimer")]
#[command(about = "A looping interval timer for the terminal with an audible chime")]
#[command(version)]
pub struct Config {
    /// Initial countdown duration in seconds (defaults to the first preset)
    #[arg(short, long, value_parser = parse_duration)]
    pub duration: Option<DurationSecs>,

    /// Directory for the preset file and log (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Disable the end-of-interval chime
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the directory the preset file and log live in
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().context("no platform data directory available")?;
        Ok(base.join("chimer"))
    }
}

fn parse_duration(raw: &str) -> Result<DurationSecs, String> {
    DurationSecs::parse(raw).ok_or_else(|| {
        format!("expected a whole number of seconds between {MIN_SECONDS} and {MAX_SECONDS}")
    })
}
