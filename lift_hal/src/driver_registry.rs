//! Driver registry for HAL drivers.
//!
//! Maps driver names to factories. Constructed at startup and passed by
//! value; there is no global registry.

use std::collections::HashMap;

use lift_common::hal::driver::{DriverFactory, HalDevices, HalError};
use lift_common::lift::config::LiftConfig;
use tracing::debug;

/// Registry of available HAL drivers.
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in drivers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_builtin(&mut registry);
        registry
    }

    /// Register a driver factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a driver factory by name.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Build the motor driver and limit sensor for `name`.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` if no driver with the given name is registered,
    /// or whatever the factory reports.
    pub fn create_devices(&self, name: &str, config: &LiftConfig) -> Result<HalDevices, HalError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| HalError::DriverNotFound(name.to_string()))?;
        debug!("Creating devices with driver '{name}'");
        factory(config)
    }

    /// List all registered driver names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
