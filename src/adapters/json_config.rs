//! JSON file config adapter.
//!
//! Implements [`ConfigPort`] by reading a [`ShopConfig`] document from
//! disk.  The file path comes from the `BARBERSHOP_CONFIG` environment
//! variable; with no path set the built-in defaults are used.
//!
//! ```json
//! { "waiting_capacity": 8, "haircut_ticks": 12, "break_ticks": 1 }
//! ```
//!
//! Missing fields take their defaults.  The config is read once at
//! startup and never written back.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ShopConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BARBERSHOP_CONFIG";

/// Largest config document accepted.
const MAX_CONFIG_BYTES: u64 = 4096;

#[derive(Debug, Clone, Default)]
pub struct JsonFileConfig {
    path: Option<PathBuf>,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Adapter that always yields the defaults.
    pub fn defaults() -> Self {
        Self { path: None }
    }

    /// Path from `BARBERSHOP_CONFIG`, or defaults when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::defaults(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(path: &Path) -> Result<String, ConfigError> {
        let meta = std::fs::metadata(path).map_err(io_to_config)?;
        if meta.len() > MAX_CONFIG_BYTES {
            warn!("JsonFileConfig: {} is {} bytes, refusing", path.display(), meta.len());
            return Err(ConfigError::Corrupted);
        }
        std::fs::read_to_string(path).map_err(io_to_config)
    }
}

fn io_to_config(e: std::io::Error) -> ConfigError {
    match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound,
        ErrorKind::InvalidData => ConfigError::Corrupted,
        _ => ConfigError::IoError,
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<ShopConfig, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            info!("JsonFileConfig: no config file, using defaults");
            return Ok(ShopConfig::default());
        };

        let text = Self::read(path).inspect_err(|e| {
            warn!("JsonFileConfig: cannot read {}: {}", path.display(), e);
        })?;
        let cfg = ShopConfig::from_json(&text)?;
        info!("JsonFileConfig: loaded {}", path.display());
        Ok(cfg)
    }
}
