//! TOML configuration loader with validation.
//!
//! Parses a single `LiftConfig` file and validates parameter bounds,
//! follower wiring, and the interference threshold before any hardware
//! is touched.

use std::path::Path;

use lift_common::config::{ConfigError, ConfigLoader};
use lift_common::lift::config::LiftConfig;
use tracing::debug;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LiftConfig, ConfigError> {
    debug!("Loading lift config from {}", path.display());
    let config = LiftConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate configuration from a TOML string (for testing).
pub fn load_config_from_str(content: &str) -> Result<LiftConfig, ConfigError> {
    let config = LiftConfig::from_toml(content)?;
    config.validate()?;
    Ok(config)
}
