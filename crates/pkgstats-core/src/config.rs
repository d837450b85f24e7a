use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::FetchOptions;

/// Mirror queried when neither `--url` nor the config file name one.
pub const DEFAULT_MIRROR_URL: &str = "http://ftp.uk.debian.org/debian/dists/stable/main/";

/// Global configuration loaded from `~/.config/pkgstats/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PkgstatsConfig {
    /// Base URL of the directory listing that holds the Contents indexes.
    pub mirror_url: String,
    /// Connect timeout in seconds applied to every request.
    pub connect_timeout_secs: u64,
    /// Optional User-Agent header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for PkgstatsConfig {
    fn default() -> Self {
        Self {
            mirror_url: DEFAULT_MIRROR_URL.to_string(),
            connect_timeout_secs: 15,
            user_agent: None,
        }
    }
}

impl PkgstatsConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: std::time::Duration::from_secs(self.connect_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("pkgstats").context("locate XDG config directory")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("create config directory")
}

/// Load configuration from disk, creating a default file if none exists.
///
/// Failing to locate or create the file is not fatal: a warning is logged and
/// the built-in defaults are used. A file that exists but cannot be read or
/// parsed is an error.
pub fn load_or_init() -> Result<PkgstatsConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::warn!("no config file ({:#}); using built-in defaults", e);
            Ok(PkgstatsConfig::default())
        }
    }
}

pub fn load_or_init_at(path: &Path) -> Result<PkgstatsConfig> {
    if !path.exists() {
        let default_cfg = PkgstatsConfig::default();
        match write_default(path, &default_cfg) {
            Ok(()) => tracing::info!("created default config at {}", path.display()),
            Err(e) => tracing::warn!("{:#}; using built-in defaults", e),
        }
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: PkgstatsConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &PkgstatsConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
    Ok(())
}
