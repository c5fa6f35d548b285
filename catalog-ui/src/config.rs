use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "catalog-ui.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Collection URL of the catalog REST API.
    pub api_url: String,
    pub load_on_start: bool,
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/catalog".to_string(),
            load_on_start: true,
            dark_mode: false,
        }
    }
}

impl UiConfig {
    /// Defaults, then `catalog-ui.toml` (or `$CATALOG_UI_CONFIG`), then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CATALOG_UI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::load_from_file(&path)?.unwrap_or_else(|| {
            log::info!("No config file at {}, using defaults", path.display());
            Self::default()
        });
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CATALOG_API_URL") {
            self.api_url = url;
        }
        if let Some(flag) = lookup("CATALOG_LOAD_ON_START") {
            self.load_on_start = parse_flag("CATALOG_LOAD_ON_START", &flag)?;
        }
        if let Some(flag) = lookup("CATALOG_DARK_MODE") {
            self.dark_mode = parse_flag("CATALOG_DARK_MODE", &flag)?;
        }

        self.api_url = self.api_url.trim_end_matches('/').to_string();
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
