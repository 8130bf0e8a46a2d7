use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-request budget; expiry surfaces as a transport failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Port the dev backend listens on when only a host is known.
pub const DEFAULT_PORT: u16 = 5050;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5050/api";

pub const ENV_API_URL: &str = "BITES_API_URL";
pub const ENV_DEV_HOST: &str = "BITES_DEV_HOST";
pub const ENV_CONFIG_PATH: &str = "BITES_CONFIG";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve the backend base URL. Priority: explicit override (flag),
    /// `BITES_API_URL`, the config file's `api_url`, a detected dev host,
    /// then the localhost default.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(ENV_API_URL).ok();
        let file_url = read_config_file()?.and_then(|cfg| cfg.api_url);
        let dev_host = std::env::var(ENV_DEV_HOST).ok();
        Ok(Self {
            base_url: resolve_base_url(
                explicit,
                env_url.as_deref(),
                file_url.as_deref(),
                dev_host.as_deref(),
            ),
        })
    }

    pub fn fixed(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(&base_url.into()),
        }
    }
}

pub fn resolve_base_url(
    explicit: Option<&str>,
    env_url: Option<&str>,
    file_url: Option<&str>,
    dev_host: Option<&str>,
) -> String {
    let picked = explicit
        .or(env_url)
        .or(file_url)
        .map(normalize)
        .or_else(|| dev_host.map(|h| format!("http://{}:{}/api", h.trim(), DEFAULT_PORT)));
    picked.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(p));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/bites/config.json"))
}

fn read_config_file() -> Result<Option<ConfigFile>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ConfigFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let url = resolve_base_url(
            Some("http://10.0.0.9:5050/api/"),
            Some("http://env:5050/api"),
            Some("http://file:5050/api"),
            Some("devhost"),
        );
        assert_eq!(url, "http://10.0.0.9:5050/api");
    }

    #[test]
    fn env_beats_file_beats_dev_host() {
        assert_eq!(
            resolve_base_url(None, Some("http://env:1/api"), Some("http://file:2/api"), None),
            "http://env:1/api"
        );
        assert_eq!(
            resolve_base_url(None, None, Some("http://file:2/api"), Some("devhost")),
            "http://file:2/api"
        );
        assert_eq!(
            resolve_base_url(None, None, None, Some("192.168.1.20")),
            "http://192.168.1.20:5050/api"
        );
    }

    #[test]
    fn defaults_to_localhost() {
        assert_eq!(resolve_base_url(None, None, None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn config_file_parses_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_url": "http://lab:5050/api"}"#).unwrap();
        let cfg: ConfigFile = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(cfg.api_url.as_deref(), Some("http://lab:5050/api"));
    }
}
