/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use cuefix::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_shouldUseDocumentedDefaults() {
    let config = Config::default_config();

    assert_eq!(config.line_limit, 42);
    assert_eq!(config.max_lines, 2);
    assert!(!config.hard_wrap_oversized);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test validation of nonsensical limits
#[test]
fn test_validate_withTinyLineLimit_shouldFail() {
    let config = Config {
        line_limit: 5,
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroMaxLines_shouldFail() {
    let config = Config {
        max_lines: 0,
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

/// Test save/load round trip
#[test]
fn test_save_thenFromFile_shouldRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config {
        line_limit: 38,
        max_lines: 2,
        hard_wrap_oversized: true,
        log_level: LogLevel::Debug,
    };
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_fromFile_withMissingFile_shouldCreateDefault() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::from_file(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    Ok(())
}

/// Test that partial JSON files fill missing fields with defaults
#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &dir.path().to_path_buf(),
        "conf.json",
        r#"{ "line_limit": 36 }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.line_limit, 36);
    assert_eq!(config.max_lines, 2);
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test layout limit mapping
#[test]
fn test_layoutLimits_shouldMirrorConfig() {
    let config = Config {
        line_limit: 30,
        max_lines: 1,
        hard_wrap_oversized: true,
        log_level: LogLevel::Warn,
    };
    let limits = config.layout_limits();

    assert_eq!(limits.line_limit, 30);
    assert_eq!(limits.max_lines, 1);
    assert!(limits.hard_wrap_oversized);
}
