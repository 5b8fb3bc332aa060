use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::CodecOptions;
use crate::error::ConfigError;
use crate::request::SearchSettings;

/// Environment variable overriding `search.index_name`.
pub const INDEX_ENV: &str = "FOSDEM_SEARCH_INDEX";

/// Global configuration loaded from `~/.config/fosdem-search/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Query-string codec limits and array convention.
    #[serde(default)]
    pub codec: CodecOptions,
    /// Search backend request settings.
    #[serde(default)]
    pub search: SearchSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()?;
        self.search.validate()
    }

    /// Replaces the index name when an override (env or CLI) is given.
    pub fn override_index(&mut self, index_override: Option<String>) {
        if let Some(index) = index_override.filter(|s| !s.trim().is_empty()) {
            tracing::debug!("index name overridden: {}", index);
            self.search.index_name = index;
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fosdem-search")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Reads and validates the configuration at `path`.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let cfg: AppConfig = toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AppConfig> {
    let path = config_path()?;
    let mut cfg = if path.exists() {
        load_from(&path)?
    } else {
        let default_cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    };
    cfg.override_index(std::env::var(INDEX_ENV).ok());
    cfg.validate()?;
    Ok(cfg)
}
