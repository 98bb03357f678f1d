//! Configuration loader
//!
//! Loads application configuration from an optional config file with
//! environment variable overrides on top. Every setting has a default,
//! so a missing file is not an error.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./fakturo.toml` or `./fakturo.json`
//! 3. `../config.toml` or `../config.json`
//!
//! ## Environment Variables
//! - `FAKTURO_API_BASE_URL`: API base URL
//! - `FAKTURO_API_TIMEOUT_SECONDS`: Request timeout in seconds
//! - `FAKTURO_API_MIN_REQUEST_INTERVAL_MS`: Minimum interval between requests
//! - `FAKTURO_BATCH_PACING_MS`: Delay between consecutive submissions
//! - `FAKTURO_QUEUE_PATH`: Path of the persisted queue file
//!
//! The API key is deliberately not part of the config file; it is read
//! separately from `FAKTURO_API_KEY` by the application shell.

use std::path::{Path, PathBuf};

use fakturo_domain::{Config, FakturoError, Result};

/// Load configuration: probed file (if any) plus environment overrides.
///
/// # Errors
/// Returns `FakturoError::Config` if a found file cannot be parsed or
/// an override variable holds an invalid value. A missing file simply
/// yields the defaults.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Load configuration from a specific file.
///
/// Format is detected by file extension (`.toml` or `.json`).
///
/// # Errors
/// Returns `FakturoError::Config` if the file is missing, unreadable
/// or fails to parse.
pub fn load_from_file(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path).map_err(|e| {
        FakturoError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FakturoError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FakturoError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FakturoError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let candidates = [
        cwd.join("config.toml"),
        cwd.join("config.json"),
        cwd.join("fakturo.toml"),
        cwd.join("fakturo.json"),
        cwd.join("../config.toml"),
        cwd.join("../config.json"),
    ];
    candidates.into_iter().find(|path| path.exists())
}

/// Apply `FAKTURO_*` overrides on top of a loaded configuration.
///
/// Takes the variable lookup as a closure so tests never touch process
/// environment state.
fn apply_env_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(url) = lookup("FAKTURO_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(raw) = lookup("FAKTURO_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_u64("FAKTURO_API_TIMEOUT_SECONDS", &raw)?;
    }
    if let Some(raw) = lookup("FAKTURO_API_MIN_REQUEST_INTERVAL_MS") {
        config.api.min_request_interval_ms =
            parse_u64("FAKTURO_API_MIN_REQUEST_INTERVAL_MS", &raw)?;
    }
    if let Some(raw) = lookup("FAKTURO_BATCH_PACING_MS") {
        config.batch.pacing_ms = parse_u64("FAKTURO_BATCH_PACING_MS", &raw)?;
    }
    if let Some(path) = lookup("FAKTURO_QUEUE_PATH") {
        config.storage.queue_path = PathBuf::from(path);
    }
    Ok(())
}

fn parse_u64(key: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|e| FakturoError::Config(format!("Invalid value for {key}: {e}")))
}
