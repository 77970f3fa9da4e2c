//! Configuration file handling.
//!
//! This module provides loading and saving of lockaudit configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/lockaudit/config.toml`
//! - macOS: `~/Library/Application Support/lockaudit/config.toml`
//! - Windows: `%APPDATA%\lockaudit\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "table"
//! fail_on_findings = true
//!
//! [ignore]
//! packages = ["left-pad", "@internal/*"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
///
/// Can be loaded from a TOML file or created with default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    /// Default: "table"
    pub default_format: String,

    /// Whether findings produce a non-zero exit code.
    ///
    /// Default: true (fail the pipeline on findings)
    pub fail_on_findings: bool,

    /// Ignore list for suppressing accepted findings.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Packages to suppress from findings.
///
/// Use this for accepted risks or known false positives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Package names to exclude from findings.
    ///
    /// Supports glob patterns (e.g., "left-pad*", "@internal/*").
    pub packages: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a package should be ignored.
    pub fn should_ignore_package(&self, package: &str) -> bool {
        self.packages.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, package)
            } else {
                pattern == package
            }
        })
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Check prefix (before first *)
    if !parts[0].is_empty() {
        if !remaining.starts_with(parts[0]) {
            return false;
        }
        remaining = &remaining[parts[0].len()..];
    }

    // Check suffix (after last *)
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        if !remaining.ends_with(last_part) {
            return false;
        }
        remaining = &remaining[..remaining.len() - last_part.len()];
    }

    // Check middle parts
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(part) {
            remaining = &remaining[pos + part.len()..];
        } else {
            return false;
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            fail_on_findings: true,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lockaudit")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
