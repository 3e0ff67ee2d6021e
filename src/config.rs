use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, VcomError};

pub const DEFAULT_API_URL: &str = "https://api.meteocontrol.de/v2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| VcomError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| VcomError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "vcom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(VcomError::NoConfigDir)
    }

    /// Base URL of the API, env var taking precedence over config file
    pub fn api_url(&self) -> Result<Url> {
        let raw = resolve(env("VCOM_API_URL"), self.api_url.as_deref())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Url::parse(&raw).map_err(|_| VcomError::InvalidUrl(raw))
    }

    /// Get API key with env var taking precedence over config file
    pub fn api_key(&self) -> Result<String> {
        resolve(env("VCOM_API_KEY"), self.api_key.as_deref()).ok_or(VcomError::MissingApiKey)
    }

    /// Username and password for HTTP Basic authorization
    pub fn credentials(&self) -> Result<(String, String)> {
        let username = resolve(env("VCOM_USERNAME"), self.username.as_deref());
        let password = resolve(env("VCOM_PASSWORD"), self.password.as_deref());

        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(VcomError::MissingCredentials),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Prefer the environment value, then the file value; blanks count as unset.
fn resolve(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    from_env
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            from_file
                .filter(|v| !v.trim().is_empty())
                .map(String::from)
        })
}
