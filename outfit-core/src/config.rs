use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// City shown in the `cityText` slot when none is configured.
pub const DEFAULT_CITY_LABEL: &str = "부산광역시";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// base_url = "http://127.0.0.1:5000"
/// city_label = "부산광역시"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Origin that `/api/weather` is resolved against.
    pub base_url: Option<String>,

    /// Label written into the city slot.
    pub city_label: Option<String>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn city_label(&self) -> &str {
        self.city_label.as_deref().unwrap_or(DEFAULT_CITY_LABEL)
    }

    /// Store a base URL, dropping any trailing slash.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "Base URL '{url}' must start with http:// or https://.\n\
                 Hint: run `outfit configure` and enter e.g. {DEFAULT_BASE_URL}"
            ));
        }
        self.base_url = Some(url.to_string());
        Ok(())
    }

    /// Store a city label; blank input resets to the default.
    pub fn set_city_label(&mut self, label: &str) {
        let label = label.trim();
        self.city_label = if label.is_empty() { None } else { Some(label.to_string()) };
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "outfit-weather", "outfit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
