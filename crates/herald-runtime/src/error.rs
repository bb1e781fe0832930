//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use herald_core::DispatchError;

/// Errors that can occur while running a Herald program.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dispatch cycle was aborted.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Command output could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
