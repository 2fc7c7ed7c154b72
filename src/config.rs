//! Configuration
//!
//! Resolves the config directory and loads the optional `config.yaml`
//! inside it. Every setting has a default, so a missing file is fine; a
//! malformed one is a startup error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logic::file::DEFAULT_CONTROL_THRESHOLD;
use crate::model::Settings;
use crate::services::PreviewOptions;
use crate::ui::icons::IconMode;

/// Name of the directory under the platform config dir
pub const APP_DIR: &str = "vfsh";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DATABASE_FILE: &str = "vfsh.db";
pub const LOG_FILE: &str = "vfsh.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub show_preview: bool,
    pub icon_mode: IconMode,
    pub double_click_ms: u64,
    pub history_lines_per_entry: usize,
    pub text_control_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_preview: true,
            icon_mode: IconMode::Emoji,
            double_click_ms: 500,
            history_lines_per_entry: 3,
            text_control_threshold: DEFAULT_CONTROL_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse a YAML document; an empty document yields the defaults
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config.yaml` from `dir`, falling back to defaults if absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.text_control_threshold) {
            anyhow::bail!(
                "text_control_threshold must be between 0 and 1, got {}",
                self.text_control_threshold
            );
        }
        if self.history_lines_per_entry == 0 {
            anyhow::bail!("history_lines_per_entry must be at least 1");
        }
        Ok(())
    }

    /// Interaction settings for the model
    pub fn settings(&self) -> Settings {
        Settings {
            show_preview: self.show_preview,
            double_click_window: Duration::from_millis(self.double_click_ms),
            history_lines_per_entry: self.history_lines_per_entry,
        }
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            text_control_threshold: self.text_control_threshold,
        }
    }
}

/// The config directory: `override_dir` if given, else `<platform config>/vfsh`
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("could not determine the user config directory; pass --config")
}

/// Create the config directory if needed (owner-only on Unix)
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .with_context(|| format!("failed to set permissions on {}", dir.display()))?;
    }

    Ok(())
}
