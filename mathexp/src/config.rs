//! Settings of the diagnostic outputs (pretty-printer and debug dump).
//!
//! Read from a TOML file such as
//!
//! ```toml
//! [pretty]
//! width = 100
//! color = "never"
//!
//! [dump]
//! indent = 4
//! ```
//!
//! Every field is optional.
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use termcolor::ColorChoice;

use crate::error::{ExpError, ExpResult};

/// Environment variable overriding [`MathExpConfig::default_path`].
pub const ENV_CONFIG_PATH: &str = "MATHEXP_CONFIG";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyConfig {
    /// Line width; the terminal width (or 80) when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    pub color: ColorMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig { indent: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MathExpConfig {
    pub pretty: PrettyConfig,
    pub dump: DumpConfig,
}

impl MathExpConfig {
    /// Get the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("mathexp");
        path.push("config.toml");
        path
    }

    pub fn load_from_toml(path: &Path) -> ExpResult<Self> {
        debug!("Loading configuration from `{}`.", path.display());
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| ExpError::ConfigParse {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Save to `path`, creating missing parent directories.
    pub fn save_to_toml(&self, path: &Path) -> ExpResult<()> {
        debug!("Saving configuration to `{}`.", path.display());
        let toml_str = toml::to_string(self).map_err(|e| ExpError::ConfigSerialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Load from [`default_path`](Self::default_path), falling back to the defaults when the
    /// file does not exist. A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default() -> ExpResult<Self> {
        let path = Self::default_path();
        if !path.exists() {
            warn!(
                "No configuration file at `{}`, using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_toml(&path)
    }

    /// Width to render at: the configured one, else the terminal's, else 80.
    pub fn pretty_width(&self) -> usize {
        self.pretty
            .width
            .unwrap_or_else(|| term_size::dimensions().map(|(w, _)| w).unwrap_or(80))
    }
}
