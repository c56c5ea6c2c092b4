//! Configuration management for the Hearth CLI.

use crate::error::{CliError, Result};
use hearth_engine::NamingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// A named connection profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Bloomerang API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key for this profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Title used for a different-surname second spouse ("mrs" or "ms")
    #[serde(default = "default_spouse_title")]
    pub second_spouse_title: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// JSON output
    Json,
    /// Minimal output
    Quiet,
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_api_url() -> String {
    hearth_bloomerang::client::DEFAULT_BASE_URL.to_string()
}

fn default_spouse_title() -> String {
    "mrs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(default_profile(), Profile::default());
        Config {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            api_url: default_api_url(),
            api_key: None,
            second_spouse_title: default_spouse_title(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            color: true,
            format: OutputFormat::default(),
        }
    }
}

impl Profile {
    /// Build the naming configuration this profile describes.
    pub fn naming_config(&self) -> Result<NamingConfig> {
        let second_spouse_title = self
            .second_spouse_title
            .parse()
            .map_err(CliError::Config)?;
        Ok(NamingConfig {
            second_spouse_title,
        })
    }
}

impl Config {
    /// Path to the configuration file (~/.hearth/config.toml).
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(".hearth").join("config.toml"))
    }

    /// Load configuration from disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(&path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// The currently active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles.get(&self.active_profile).ok_or_else(|| {
            CliError::Config(format!("Profile '{}' not found", self.active_profile))
        })
    }

    /// Create or replace a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch the active profile.
    pub fn switch_profile(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            return Err(CliError::Config(format!("Profile '{}' not found", name)));
        }
        self.active_profile = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_engine::SpouseTitle;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_default_profile_values() {
        let profile = Profile::default();
        assert_eq!(profile.api_url, "https://api.bloomerang.co/v2");
        assert!(profile.api_key.is_none());
        assert_eq!(profile.second_spouse_title, "mrs");
    }

    #[test]
    fn test_naming_config_from_profile() {
        let mut profile = Profile::default();
        let naming = profile.naming_config().unwrap();
        assert_eq!(naming.second_spouse_title, SpouseTitle::Mrs);

        profile.second_spouse_title = "ms".to_string();
        let naming = profile.naming_config().unwrap();
        assert_eq!(naming.second_spouse_title, SpouseTitle::Ms);

        profile.second_spouse_title = "dr".to_string();
        assert!(profile.naming_config().is_err());
    }

    #[test]
    fn test_switch_profile() {
        let mut config = Config::default();
        config.set_profile("staging".to_string(), Profile::default());

        assert!(config.switch_profile("staging").is_ok());
        assert_eq!(config.active_profile, "staging");

        assert!(config.switch_profile("missing").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.set_profile(
            "staging".to_string(),
            Profile {
                api_url: "https://staging.example.com/v2".to_string(),
                api_key: Some("secret".to_string()),
                second_spouse_title: "ms".to_string(),
            },
        );

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        let staging = &parsed.profiles["staging"];
        assert_eq!(staging.api_url, "https://staging.example.com/v2");
        assert_eq!(staging.api_key.as_deref(), Some("secret"));
        assert_eq!(staging.second_spouse_title, "ms");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [profiles.default]
            api_key = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.active_profile, "default");
        let profile = parsed.get_active_profile().unwrap();
        assert_eq!(profile.api_url, "https://api.bloomerang.co/v2");
        assert_eq!(profile.second_spouse_title, "mrs");
        assert!(parsed.settings.color);
    }
}
