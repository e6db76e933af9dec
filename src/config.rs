//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/shexplain/shexplain.toml`
//! 3. Environment variables: `SHEXPLAIN_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Unified configuration for shexplain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Total diagram width in display columns
    pub width: usize,
    /// Alternate light/heavy lines per lane (`usePens`-style rendering)
    pub pens: bool,
    /// Directory of user knowledge-base entries (`*.toml`)
    pub kb_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 80,
            pens: false,
            kb_dir: default_kb_dir(),
        }
    }
}

/// Raw settings for intermediate parsing (all fields optional so a partial
/// config file only overrides what it names).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    width: Option<usize>,
    pens: Option<bool>,
    kb_dir: Option<PathBuf>,
}

fn default_kb_dir() -> PathBuf {
    global_config_dir()
        .map(|dir| dir.join("kb"))
        .unwrap_or_else(|| PathBuf::from("~/.config/shexplain/kb"))
}

/// XDG config directory for shexplain.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shexplain").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("shexplain.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence (defaults, global file, env).
    pub fn load() -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        Ok(current)
    }

    /// Read a specific config file on top of defaults; env still applies.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let raw = load_raw_settings(path)?;
        let mut current = Self::default().merge_with(&raw);
        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        Ok(current)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            width: overlay.width.unwrap_or(self.width),
            pens: overlay.pens.unwrap_or(self.pens),
            kb_dir: overlay.kb_dir.clone().unwrap_or_else(|| self.kb_dir.clone()),
        }
    }

    /// Apply SHEXPLAIN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let builder = Config::builder().add_source(Environment::with_prefix("SHEXPLAIN"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_int("width") {
            if val > 0 {
                settings.width = val as usize;
            }
        }
        if let Ok(val) = config.get_bool("pens") {
            settings.pens = val;
        }
        if let Ok(val) = config.get_string("kb_dir") {
            settings.kb_dir = PathBuf::from(val);
        }
        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(dir) = self.kb_dir.to_str() {
            if let Ok(expanded) = shellexpand::full(dir) {
                self.kb_dir = PathBuf::from(expanded.into_owned());
            }
        }
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// A commented template config file.
    pub fn template() -> String {
        r#"# shexplain configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/shexplain/shexplain.toml
#   Env:    SHEXPLAIN_* environment variables
#   Flags:  --width / --pens

# Total diagram width in display columns
# width = 80

# Alternate light/heavy connector lines per caption. Readable with fonts
# whose bold box-drawing glyphs stay fixed width (e.g. Menlo).
# pens = false

# Directory of user knowledge-base entries (*.toml), overriding built-ins
# kb_dir = "~/.config/shexplain/kb"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
