//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML
//! file, then `VIDRIP_` prefixed environment variables.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str, load_default_config};
pub use types::{BatchDefaults, Config, ConfigError};
pub use validate::validate_config;
