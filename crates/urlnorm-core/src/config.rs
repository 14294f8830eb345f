use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_model::{FilenamePolicy, PathStyle, Platform, DEFAULT_FILENAME, NAME_MAX};

/// Which path style to assume for local paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyleSetting {
    /// Follow the host.
    #[default]
    Auto,
    Posix,
    Windows,
}

impl PathStyleSetting {
    pub fn resolve(self) -> PathStyle {
        match self {
            PathStyleSetting::Auto => PathStyle::host(),
            PathStyleSetting::Posix => PathStyle::Posix,
            PathStyleSetting::Windows => PathStyle::Windows,
        }
    }
}

/// Download filename settings (optional `[filename]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameConfig {
    /// Name used when a URL has no usable last segment.
    pub fallback: String,
    /// Maximum filename length in bytes.
    pub max_bytes: usize,
}

impl Default for FilenameConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FILENAME.to_string(),
            max_bytes: NAME_MAX,
        }
    }
}

/// Global configuration loaded from `~/.config/urlnorm/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlnormConfig {
    /// "auto" (default), "posix" or "windows".
    #[serde(default)]
    pub path_style: PathStyleSetting,
    /// Working directory for absolutizing relative paths (None = process cwd).
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub filename: FilenameConfig,
}

impl UrlnormConfig {
    /// Host facts as configured; unset fields come from the running process.
    pub fn platform(&self) -> Platform {
        let style = self.path_style.resolve();
        match &self.cwd {
            Some(cwd) => Platform::new(style, cwd),
            None => Platform::new(style, Platform::current().cwd()),
        }
    }

    pub fn filename_policy(&self) -> FilenamePolicy {
        FilenamePolicy {
            style: self.path_style.resolve(),
            max_bytes: self.filename.max_bytes,
            fallback: self.filename.fallback.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlnorm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlnormConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UrlnormConfig> {
    if !path.exists() {
        let default_cfg = UrlnormConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: UrlnormConfig = toml::from_str(&data)?;
    Ok(cfg)
}
