//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Optional YAML file
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE};
