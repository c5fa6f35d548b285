use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "catalog-proxy.toml";

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
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    /// Address `GET /backend` forwards to.
    pub backend_url: String,
    /// Unset means the upstream call never times out.
    pub request_timeout_secs: Option<u64>,
    pub permissive_cors: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            backend_url: "http://localhost:8080".to_string(),
            request_timeout_secs: None,
            permissive_cors: true,
        }
    }
}

impl ProxyConfig {
    /// Defaults, then `catalog-proxy.toml` (or `$CATALOG_PROXY_CONFIG`), then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CATALOG_PROXY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::load_from_file(&path)?.unwrap_or_else(|| {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        });
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Returns `Ok(None)` when the file does not exist.
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
        if let Some(host) = lookup("PROXY_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PROXY_PORT") {
            self.port = parse_value("PROXY_PORT", &port)?;
        }
        if let Some(url) = lookup("BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(secs) = lookup("BACKEND_TIMEOUT_SECS") {
            self.request_timeout_secs = Some(parse_value("BACKEND_TIMEOUT_SECS", &secs)?);
        }
        if let Some(cors) = lookup("PROXY_PERMISSIVE_CORS") {
            self.permissive_cors = parse_flag("PROXY_PERMISSIVE_CORS", &cors)?;
        }

        if self.backend_url.ends_with('/') {
            warn!("Stripping trailing '/' from backend url {}", self.backend_url);
            self.backend_url = self.backend_url.trim_end_matches('/').to_string();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "host".to_string(),
            value: raw,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
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
