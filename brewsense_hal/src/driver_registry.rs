//! Driver registry for board drivers.
//!
//! Constructed at startup, populated via `register()`, and consulted once
//! to build the configured board. No global state.

use brewsense_common::board::{BoardError, BoardFactory, BoardIo};
use brewsense_common::config::BoardConfig;
use std::collections::HashMap;

use crate::drivers::register_all_drivers;

/// Registry of available board drivers.
pub struct DriverRegistry {
    factories: HashMap<&'static str, BoardFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every built-in driver.
    pub fn with_builtin() -> Result<Self, BoardError> {
        let mut registry = Self::new();
        register_all_drivers(&mut registry)?;
        Ok(registry)
    }

    /// Register a driver factory.
    ///
    /// # Errors
    /// `BoardError::ConfigError` if the name is already taken.
    pub fn register(&mut self, name: &'static str, factory: BoardFactory) -> Result<(), BoardError> {
        if self.factories.contains_key(name) {
            return Err(BoardError::ConfigError(format!(
                "driver '{name}' is already registered"
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Get a driver factory by name.
    pub fn get_factory(&self, name: &str) -> Option<BoardFactory> {
        self.factories.get(name).copied()
    }

    /// Create the board named in `config.driver`.
    ///
    /// # Errors
    /// `BoardError::DriverNotFound` for unknown names, or whatever the
    /// driver's factory reports.
    pub fn create_driver(&self, config: &BoardConfig) -> Result<Box<dyn BoardIo>, BoardError> {
        let factory = self
            .get_factory(&config.driver)
            .ok_or_else(|| BoardError::DriverNotFound(config.driver.clone()))?;
        factory(config)
    }

    /// All registered driver names, sorted.
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

#[cfg(test)]
mod tests {
    use super::*;
    use brewsense_common::io::InputBits;
    use brewsense_common::status::IndicatorFrame;

    struct TestBoard;

    impl BoardIo for TestBoard {
        fn name(&self) -> &'static str {
            "test"
        }
        fn init(&mut self) -> Result<(), BoardError> {
            Ok(())
        }
        fn sample(&mut self) -> Result<InputBits, BoardError> {
            Ok(InputBits::ERROR)
        }
        fn drive(&mut self, _frame: &IndicatorFrame, _blink: bool) -> Result<(), BoardError> {
            Ok(())
        }
        fn shutdown(&mut self) -> Result<(), BoardError> {
            Ok(())
        }
    }

    fn create_test(_config: &BoardConfig) -> Result<Box<dyn BoardIo>, BoardError> {
        Ok(Box::new(TestBoard))
    }

    fn config(driver: &str) -> BoardConfig {
        BoardConfig {
            driver: driver.to_string(),
            ..BoardConfig::default()
        }
    }

    #[test]
    fn registry_create_and_lookup() {
        let mut reg = DriverRegistry::new();
        reg.register("test", create_test).unwrap();
        assert!(reg.get_factory("test").is_some());
        assert!(reg.get_factory("nonexistent").is_none());

        let mut board = reg.create_driver(&config("test")).unwrap();
        assert_eq!(board.name(), "test");
        assert_eq!(board.sample().unwrap(), InputBits::ERROR);
    }

    #[test]
    fn unknown_driver_is_reported() {
        let reg = DriverRegistry::new();
        let err = reg.create_driver(&config("gpio")).err().unwrap();
        assert!(matches!(err, BoardError::DriverNotFound(ref n) if n == "gpio"));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut reg = DriverRegistry::new();
        reg.register("test", create_test).unwrap();
        assert!(reg.register("test", create_test).is_err());
    }

    #[test]
    fn builtin_contains_simulation() {
        let reg = DriverRegistry::with_builtin().unwrap();
        assert_eq!(reg.list_drivers(), vec!["simulation"]);
    }
}
