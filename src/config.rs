use crate::error::ConfigError;
use crate::session::chat::{DEFAULT_GREETING, DEFAULT_REPLY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "MEDICHAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upload_step: u8,
    pub upload_tick_ms: u64,
    pub greeting: String,
    pub canned_reply: String,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_step: 10,
            upload_tick_ms: 100,
            greeting: DEFAULT_GREETING.to_string(),
            canned_reply: DEFAULT_REPLY.to_string(),
            window_size: [1280.0, 800.0],
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".medichat").join("config.json"))
}

impl AppConfig {
    /// Loads the config file if present; a missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.upload_step) {
            return Err(ConfigError::Invalid(format!(
                "upload_step must be within 1..=100, got {}",
                self.upload_step
            )));
        }
        if self.upload_tick_ms == 0 {
            return Err(ConfigError::Invalid(
                "upload_tick_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }
}
