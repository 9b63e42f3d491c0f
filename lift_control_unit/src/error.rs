//! Control-unit error type.

use lift_common::config::ConfigError;
use lift_common::hal::driver::HalError;
use thiserror::Error;

/// Errors surfaced by the lift controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Motor controller or sensor fault.
    #[error("hardware: {0}")]
    Hal(#[from] HalError),

    /// Invalid or unreadable configuration.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}
