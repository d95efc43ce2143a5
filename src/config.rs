//! Application configuration management.
//!
//! Holds the defaults the CLI fills into AIGC metadata when flags are not
//! given, plus output naming preferences. Configuration is stored in the
//! user's config directory (typically ~/.config/aigc-tag/config.toml); a
//! missing file means defaults.

use crate::aigc::AigcMetadata;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_content_producer")]
    pub content_producer: String,
    #[serde(default)]
    pub content_propagator: String,
    #[serde(default)]
    pub reserved_code1: String,
    #[serde(default)]
    pub reserved_code2: String,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    #[serde(default)]
    pub replace_existing: bool,
}

fn default_label() -> String {
    "1".to_string()
}

fn default_content_producer() -> String {
    // Try to get username
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME")) // Windows fallback
        .unwrap_or_default()
}

fn default_output_suffix() -> String {
    "_aigc".to_string()
}

fn validate_label(label: &str) -> Result<(), Box<dyn Error>> {
    if label.trim().is_empty() {
        return Err("label must not be empty".into());
    }
    Ok(())
}

/// The suffix is spliced into a file name, so it must stay inside one
fn validate_output_suffix(suffix: &str) -> Result<(), Box<dyn Error>> {
    if suffix.contains('/') || suffix.contains('\\') || suffix.contains("..") {
        return Err(format!("output_suffix {suffix:?} must not contain path separators").into());
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            label: default_label(),
            content_producer: default_content_producer(),
            content_propagator: String::new(),
            reserved_code1: String::new(),
            reserved_code2: String::new(),
            output_suffix: default_output_suffix(),
            replace_existing: false,
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("aigc-tag")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("aigc-tag")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "label" => {
                validate_label(value)?;
                self.label = value.to_string();
            }
            "content_producer" => self.content_producer = value.to_string(),
            "content_propagator" => self.content_propagator = value.to_string(),
            "reserved_code1" => self.reserved_code1 = value.to_string(),
            "reserved_code2" => self.reserved_code2 = value.to_string(),
            "output_suffix" => {
                validate_output_suffix(value)?;
                self.output_suffix = value.to_string();
            }
            "replace_existing" => {
                self.replace_existing = value
                    .parse::<bool>()
                    .map_err(|_| "Value must be 'true' or 'false'")?;
            }
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        Ok(())
    }

    /// Check values that `set_value` guards but a hand-edited file may not
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        validate_label(&self.label)?;
        validate_output_suffix(&self.output_suffix)?;
        Ok(())
    }

    /// Metadata pre-filled from configured defaults, with a fresh `ProduceID`
    pub fn metadata_template(&self) -> AigcMetadata {
        AigcMetadata {
            content_propagator: self.content_propagator.clone(),
            reserved_code1: self.reserved_code1.clone(),
            reserved_code2: self.reserved_code2.clone(),
            ..AigcMetadata::produced_by(&self.label, &self.content_producer)
        }
    }

    /// Default output path: `<stem><suffix>.<ext>` next to the input
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "wav".to_string());
        input.with_file_name(format!("{stem}{}.{ext}", self.output_suffix))
    }
}
