//! Loading picker configuration from disk.

use std::path::{Path, PathBuf};

use huering_core::{ConfigError, PickerConfig};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid picker config in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Read and validate a JSON picker configuration.
pub fn load_picker_config(path: &Path) -> Result<PickerConfig, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = PickerConfig::from_json(&json).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded picker config from {:?}", path);
    Ok(config)
}
