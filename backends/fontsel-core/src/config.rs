// this_file: backends/fontsel-core/src/config.rs

//! Selector configuration loaded from a JSON file.

use crate::utils::{expand_dir, system_font_dirs};
use crate::{FontselError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Name of the built-in resource that is always present.
pub const DEFAULT_FONT_NAME: &str = "Bfont Regular";

/// Selector configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Favorites document location, `None` for the per-user default
    pub favorites_path: Option<Utf8PathBuf>,
    /// Directories scanned for fonts, `~` and `$VAR` allowed
    pub font_dirs: Vec<String>,
    /// Reset bold/italic slots to the builtin resource on every font change
    pub remove_existing_type_fonts: bool,
    /// Name of the always-present default resource
    pub default_font_name: String,
    /// Verbose logging
    pub debug: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            favorites_path: None,
            font_dirs: system_font_dirs(),
            remove_existing_type_fonts: true,
            default_font_name: DEFAULT_FONT_NAME.to_string(),
            debug: false,
        }
    }
}

impl SelectorConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| FontselError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Per-user configuration directory.
    pub fn config_dir() -> Utf8PathBuf {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Utf8PathBuf::from_path_buf(dir.join("fontsel"))
            .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
    }

    /// Default configuration file location.
    pub fn config_path() -> Utf8PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Effective favorites document location.
    pub fn favorites_path(&self) -> Utf8PathBuf {
        self.favorites_path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("favorites.json"))
    }

    /// Configured font directories with `~` and variables expanded.
    pub fn expanded_font_dirs(&self) -> Vec<Utf8PathBuf> {
        self.font_dirs.iter().map(|d| expand_dir(d)).collect()
    }
}
