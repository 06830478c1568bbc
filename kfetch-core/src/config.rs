//! Device configuration.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//! `KFETCH_CONFIG` names the file when no explicit path is given.

use crate::report::{OverflowPolicy, TRUNCATION_MARKER};
use kfetch_error::{KfetchError, KfetchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEVICE_NAME: &str = "kfetch";
pub const DEFAULT_CAPACITY: usize = 1024;
pub const MAX_CAPACITY: usize = 1 << 20;
pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const CONFIG_ENV: &str = "KFETCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Name shown in log lines (`/dev/<name>`).
    pub device_name: String,
    /// Report buffer size in bytes.
    pub capacity: usize,
    pub overflow: OverflowPolicy,
    pub proc_root: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            capacity: DEFAULT_CAPACITY,
            overflow: OverflowPolicy::default(),
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
        }
    }
}

impl DeviceConfig {
    pub fn from_toml_str(text: &str) -> KfetchResult<Self> {
        let config: DeviceConfig =
            toml::from_str(text).map_err(|e| KfetchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> KfetchResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| KfetchError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Loads `path`, else the file named by `KFETCH_CONFIG`, else defaults.
    pub fn resolve(path: Option<&Path>) -> KfetchResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> KfetchResult<()> {
        if self.capacity <= TRUNCATION_MARKER.len() {
            return Err(KfetchError::Config(format!(
                "capacity must exceed {} bytes, got {}",
                TRUNCATION_MARKER.len(),
                self.capacity
            )));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(KfetchError::Config(format!(
                "capacity must not exceed {} bytes, got {}",
                MAX_CAPACITY, self.capacity
            )));
        }
        if self.device_name.trim().is_empty() {
            return Err(KfetchError::Config("device_name is empty".to_string()));
        }
        Ok(())
    }
}
