use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::routes::{RewriteRule, Routes, DEFAULT_BACKEND_URL};

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "W2R_BACKEND_URL";

/// Global configuration loaded from `~/.config/w2r/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct W2rConfig {
    /// Base URL of the conversion service; endpoint paths are joined onto it.
    pub backend_url: String,
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Overall per-request limit in seconds. Unset means a hung backend call waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Directory downloads are saved into (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Replace an existing file of the same name instead of picking `name (1).ext`.
    #[serde(default)]
    pub overwrite: bool,
    /// Per-path rewrites to fixed destinations, e.g. `/process` to another host.
    #[serde(default)]
    pub rewrites: Vec<RewriteRule>,
}

impl Default for W2rConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout_secs: 15,
            request_timeout_secs: None,
            download_dir: None,
            overwrite: false,
            rewrites: Vec::new(),
        }
    }
}

impl W2rConfig {
    /// Route table for this configuration.
    pub fn routes(&self) -> Result<Routes> {
        Routes::new(&self.backend_url, self.rewrites.clone())
    }

    /// Apply `W2R_BACKEND_URL` if set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            self.apply_backend_override(&url);
        }
    }

    fn apply_backend_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.backend_url = url.to_string();
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("w2r")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<W2rConfig> {
    if !path.exists() {
        let default_cfg = W2rConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: W2rConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir, then apply environment overrides.
pub fn load_or_init() -> Result<W2rConfig> {
    let mut cfg = load_or_init_at(&config_path()?)?;
    cfg.apply_env();
    Ok(cfg)
}
