use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "FITQUIZ_LOG";

/// Install a file-backed tracing subscriber. The terminal belongs to the TUI,
/// so nothing is ever written to stdout or stderr.
pub fn init(log_level: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = AppDirs::log_path().unwrap_or_else(|| PathBuf::from("fitquiz.log"));
    init_at(&path, log_level)?;
    Ok(path)
}

pub fn init_at(path: &Path, log_level: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}
