//! Herald Runtime - process wiring for Herald programs.
//!
//! This crate provides:
//! - Process entry point (`HeraldRuntime`): arguments in, output and exit
//!   status out
//! - Layered configuration (`config`): defaults, `<app>.toml`/`<app>.yaml`,
//!   and `<APP>_*` environment variables
//! - Logging configuration (`logging`)
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
//!
//! fn main() -> std::process::ExitCode {
//!     let registry = build_registry();
//!     HeraldRuntime::new(registry).run()
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{ConfigError, ConfigLoader, ConfigResult, HeraldConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::HeraldRuntime;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
