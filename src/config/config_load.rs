// src/config/config_load.rs
//
// loading config.toml

use super::{AssetConfig, OscConfig, WindowConfig};
use crate::animation::CannonSettings;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read config.toml: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub osc: OscConfig,
    #[serde(default)]
    pub cannon: CannonSettings,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl Config {
    pub fn load() -> Result<Self, LoadError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    pub fn from_toml(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        Self::load_if_present(&exe_dir.join("config.toml"))
    }

    // A file that exists but can't be used is reported, then skipped.
    fn load_if_present(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }
        let loaded = fs::read_to_string(config_path)
            .map_err(LoadError::from)
            .and_then(|content| Self::from_toml(&content));
        match loaded {
            Ok(config) => Some(config),
            Err(err) => {
                warn!("Ignoring {}: {}", config_path.display(), err);
                None
            }
        }
    }

    fn load_from_working_dir() -> Result<Self, LoadError> {
        let content = fs::read_to_string("config.toml")?;
        Self::from_toml(&content)
    }

    pub fn resolve_image_dir(&self) -> Option<PathBuf> {
        let dir = self.assets.image_directory.as_ref()?;
        if Path::new(dir).is_absolute() {
            Some(PathBuf::from(dir))
        } else {
            // If path is relative, resolve it relative to the executable or working directory
            Some(
                std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                    .map(|exe_dir| exe_dir.join(dir))
                    .unwrap_or_else(|| PathBuf::from(dir)),
            )
        }
    }
}
