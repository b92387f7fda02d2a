//! Client configuration.
//!
//! A small JSON file at `<data_dir>/config.json` can override the backend
//! base URL; everything else falls back to defaults. Missing or malformed
//! config is never fatal, the defaults are always usable.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::StoreError;

/// Base URL of the hosted Tareas backend.
pub const DEFAULT_BASE_URL: &str = "https://aplicacion-de-tareas-spring-boot.onrender.com";

/// Runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Directory holding the identity cache and config file.
    pub data_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
}

impl Config {
    /// Build a config rooted at the default data dir (`~/.taskdeck`),
    /// applying overrides from `config.json` if one exists there.
    pub fn load() -> Result<Self, StoreError> {
        let data_dir = default_data_dir()?;
        Ok(Self::load_from(data_dir))
    }

    /// Build a config rooted at an explicit data dir.
    pub fn load_from(data_dir: PathBuf) -> Self {
        let mut config = Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir,
        };

        let path = config.data_dir.join("config.json");
        if let Ok(content) = fs::read_to_string(&path) {
            match serde_json::from_str::<ConfigFile>(&content) {
                Ok(file) => {
                    if let Some(base_url) = file.base_url {
                        match url::Url::parse(&base_url) {
                            Ok(_) => {
                                config.base_url = base_url.trim_end_matches('/').to_string();
                            }
                            Err(e) => {
                                log::warn!("Ignoring invalid base_url {:?}: {}", base_url, e);
                            }
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config at {}: {}", path.display(), e);
                }
            }
        }

        config
    }
}

/// The default data directory (`~/.taskdeck`).
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::NoDataDir)?;
    Ok(home.join(".taskdeck"))
}
