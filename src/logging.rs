//! File-backed tracing setup.
//!
//! The terminal belongs to the UI while it runs, so events go to
//! `tagcart.log` in the profile's data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::utils::{self, Profile};

pub const LOG_FILE_NAME: &str = "tagcart.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {path}: {source}")]
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install log subscriber: {0}")]
    InitError(String),
}

pub fn log_file_path(profile: Profile) -> Option<PathBuf> {
    utils::get_data_dir(profile).map(|dir| dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
/// When no data directory can be determined logging stays disabled.
pub fn init_logging(profile: Profile, log_level: &str) -> Result<Option<PathBuf>, LoggingError> {
    let Some(path) = log_file_path(profile) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggingError::FileError {
            path: path.clone(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::FileError {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::InitError(e.to_string()))?;

    Ok(Some(path))
}
