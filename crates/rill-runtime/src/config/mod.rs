//! Configuration module for Rill applications.
//!
//! Layered loading (defaults, files, `RILL_*` environment variables) and
//! validation of the logging and diagnostics settings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    DiagnosticsConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, RillConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
