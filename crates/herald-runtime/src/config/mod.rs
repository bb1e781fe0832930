//! Configuration module for the Herald runtime.
//!
//! Configuration is layered with figment from defaults, an optional
//! TOML/YAML file, and environment variables, then validated.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{
    DispatchConfig, HeraldConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SpanEventConfig,
};
pub use validation::validate_config;
