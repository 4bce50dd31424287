//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! programmatic defaults, then `docask.yaml`, then `DOCASK_*`
//! environment variables (highest priority).

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
