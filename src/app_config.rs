use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::reflow::LayoutLimits;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum visible characters per displayed line
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,

    /// Maximum lines per cue
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Hard-wrap single tokens longer than the line limit
    #[serde(default)]
    pub hard_wrap_oversized: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_line_limit() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Errors only
    Error,
    // @level: Errors and warnings
    Warn,
    // @level: Normal operation
    #[default]
    Info,
    // @level: Detailed diagnostics
    Debug,
    // @level: Everything
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_limit: default_line_limit(),
            max_lines: default_max_lines(),
            hard_wrap_oversized: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn default_config() -> Self {
        Config::default()
    }

    /// Load configuration from a JSON file, writing a default configuration
    /// there first when the file does not exist yet
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.line_limit < 10 {
            return Err(anyhow!(
                "line_limit must be at least 10, got {}",
                self.line_limit
            ));
        }
        if self.max_lines < 1 {
            return Err(anyhow!("max_lines must be at least 1"));
        }
        Ok(())
    }

    /// Layout constraints for the reflow engine
    pub fn layout_limits(&self) -> LayoutLimits {
        LayoutLimits {
            line_limit: self.line_limit,
            max_lines: self.max_lines,
            hard_wrap_oversized: self.hard_wrap_oversized,
        }
    }
}
