mod config;
pub mod store;

pub use config::{Config, EstimateConfig, HouseConfig, ProgressConfig, SessionConfig};
pub use store::{JsonFileStore, MemoryStore, PersistedState, Store};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/corkhouse[-dev]/` based on CORKHOUSE_ENV.
///
/// Set CORKHOUSE_ENV=dev to use development data directory, or
/// CORKHOUSE_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CORKHOUSE_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CORKHOUSE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("corkhouse-dev")
            } else {
                base_dir.join("corkhouse")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
