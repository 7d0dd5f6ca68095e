//! Plugin configuration via `textboard.toml`
//!
//! Every field has a default, so an empty file (or no file) gives the stock
//! text plugin. Edit the file and restart the host to change settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use textboard_core::{Error, Result};

/// Config file name the host looks for next to its other settings.
pub const CONFIG_FILE_NAME: &str = "textboard.toml";

/// Plugin configuration loaded from `textboard.toml`.
///
/// # Example
///
/// ```toml
/// plugin_name = "text"
/// legacy_plugin_dir = "tensorboard_text"
/// legacy_index_file = "tensors.json"
/// tags_route = "/tags"
/// text_route = "/text"
/// # refresh_thread_name = "textboard-index-refresh"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPluginConfig {
    /// Name under which summaries are registered in the backing store.
    #[serde(default = "default_plugin_name")]
    pub plugin_name: String,
    /// Per-run asset folder used by the legacy format.
    #[serde(default = "default_legacy_plugin_dir")]
    pub legacy_plugin_dir: String,
    /// Asset holding a run's legacy tag list (JSON array of strings).
    #[serde(default = "default_legacy_index_file")]
    pub legacy_index_file: String,
    /// Path of the tag listing route.
    #[serde(default = "default_tags_route")]
    pub tags_route: String,
    /// Path of the record listing route.
    #[serde(default = "default_text_route")]
    pub text_route: String,
    /// Name given to the background index refresh thread.
    #[serde(default = "default_refresh_thread_name")]
    pub refresh_thread_name: String,
}

fn default_plugin_name() -> String {
    "text".to_string()
}

fn default_legacy_plugin_dir() -> String {
    "tensorboard_text".to_string()
}

fn default_legacy_index_file() -> String {
    "tensors.json".to_string()
}

fn default_tags_route() -> String {
    "/tags".to_string()
}

fn default_text_route() -> String {
    "/text".to_string()
}

fn default_refresh_thread_name() -> String {
    "textboard-index-refresh".to_string()
}

impl Default for TextPluginConfig {
    fn default() -> Self {
        Self {
            plugin_name: default_plugin_name(),
            legacy_plugin_dir: default_legacy_plugin_dir(),
            legacy_index_file: default_legacy_index_file(),
            tags_route: default_tags_route(),
            text_route: default_text_route(),
            refresh_thread_name: default_refresh_thread_name(),
        }
    }
}

impl TextPluginConfig {
    /// Check names are non-empty and routes are distinct absolute paths.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("plugin_name", &self.plugin_name),
            ("legacy_plugin_dir", &self.legacy_plugin_dir),
            ("legacy_index_file", &self.legacy_index_file),
            ("refresh_thread_name", &self.refresh_thread_name),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!("{} must not be empty", field)));
            }
        }
        for (field, route) in [("tags_route", &self.tags_route), ("text_route", &self.text_route)] {
            if !route.starts_with('/') {
                return Err(Error::invalid_config(format!(
                    "{} '{}' must start with '/'",
                    field, route
                )));
            }
        }
        if self.tags_route == self.text_route {
            return Err(Error::invalid_config(format!(
                "tags_route and text_route are both '{}'",
                self.tags_route
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Text plugin configuration
#
# Name the backing store files text summaries under.
plugin_name = "text"

# Legacy format: each run kept its tag list in
#   <run>/plugins/<legacy_plugin_dir>/<legacy_index_file>
legacy_plugin_dir = "tensorboard_text"
legacy_index_file = "tensors.json"

# HTTP routes, relative to the plugin's mount point.
tags_route = "/tags"
text_route = "/text"

# Thread name of the background tag index refresh.
# refresh_thread_name = "textboard-index-refresh"
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TextPluginConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::invalid_config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::invalid_config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
