//! Rill Runtime - application setup for the Rill event stream core.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`, `RillConfig`)
//! - Logging initialization on top of `tracing-subscriber` (`LoggingBuilder`)
//! - Environment probes such as UI test detection
//!
//! # Example
//!
//! ```rust,no_run
//! fn main() -> rill_runtime::RuntimeResult<()> {
//!     let config = rill_runtime::init()?;
//!     rill_runtime::tracing::info!(ui_test = config.diagnostics.ui_test, "Started");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

use tracing::info;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, DiagnosticsConfig, LoggingConfig, RillConfig,
    validate_config,
};
pub use environment::is_ui_test;
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Loads configuration from the default locations, validates it and installs
/// the global logging subscriber.
pub fn init() -> RuntimeResult<RillConfig> {
    init_with(ConfigLoader::new())
}

/// Like [`init`], with a caller-prepared loader.
pub fn init_with(loader: ConfigLoader) -> RuntimeResult<RillConfig> {
    let config = loader.load()?;
    validate_config(&config)?;
    logging::init_from_config(&config)?;

    info!(
        level = %config.logging.level,
        ui_test = config.diagnostics.ui_test,
        trace_sinks = config.diagnostics.trace_sinks,
        "Rill runtime initialized"
    );
    Ok(config)
}

/// Prelude module for convenient imports.
///
/// This provides the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
