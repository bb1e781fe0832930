//! Unified error types for the Herald core.
//!
//! Usage (arity) failures and unknown command names are not errors: the
//! dispatcher recovers from them locally and reports them through
//! [`Outcome`](crate::dispatch::Outcome).

use thiserror::Error;

/// Boxed error returned by command handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Option Parse Errors
// =============================================================================

/// Malformed option input reported by an [`OptionAdapter`](crate::OptionAdapter).
///
/// This is the one failure the core treats as fatal to the process: the
/// options could not be reliably reconstructed, so the runtime prints
/// [`message`](Self::message) and exits with a non-zero status.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct OptionParseError {
    /// The command whose options failed to parse.
    pub command: String,
    /// User-facing diagnostic rendered by the adapter.
    pub message: String,
}

impl OptionParseError {
    /// Creates a parse error for `command`.
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors that abort a dispatch cycle.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The option adapter rejected the input.
    #[error(transparent)]
    OptionParse(#[from] OptionParseError),

    /// A delegation point was dispatched before a subcommand was bound to it.
    #[error("command '{command}' delegates to a subcommand, but no subcommand was bound to it")]
    UnboundSubcommand {
        /// The delegating command.
        command: String,
    },

    /// The handler returned an error.
    #[error("command '{command}' failed: {source}")]
    Handler {
        /// The command whose handler failed.
        command: String,
        /// The handler's error.
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while building a command table.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Two options of one command share a short form.
    #[error("command '{command}': options '{first}' and '{second}' share the short form -{short}")]
    AmbiguousShort {
        /// The command being registered.
        command: String,
        /// The shared short form.
        short: char,
        /// The option declared first.
        first: String,
        /// The option declared second.
        second: String,
    },

    /// No command with this name is registered.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The command exists but is not a delegation point.
    #[error("command '{0}' is not a subcommand group")]
    NotASubcommand(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
