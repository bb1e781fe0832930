//! Collaborator traits: option adapters and help formatters.
//!
//! The dispatcher owns no parsing or rendering logic of its own. Both are
//! delegated through the traits below, with one default implementation of
//! each bound lazily by the registry and replaceable at configuration time.
//!
//! # Architecture
//!
//! ```text
//! args ──▶ Dispatcher ──▶ OptionAdapter::process_options ──▶ OptionMap
//!               │
//!               └──────▶ HelpFormatter::help_list / help_command ──▶ text
//! ```

use crate::command::CommandSpec;
use crate::error::OptionParseError;
use crate::option::OptionMap;

/// Translates raw argument tokens into typed option values.
///
/// Implementations must:
/// - recognize each declared option's short (`-s`) and long (`--name`) form
/// - coerce values according to the option's [`OptionKind`](crate::OptionKind)
/// - remove recognized tokens from `args` in place, preserving the order of
///   the remaining positional tokens
/// - apply each absent option's `default`, if declared
/// - report malformed input as an [`OptionParseError`]
pub trait OptionAdapter: Send + Sync {
    /// Parses the options of `command` out of `args`.
    fn process_options(
        &self,
        args: &mut Vec<String>,
        command: &CommandSpec,
    ) -> Result<OptionMap, OptionParseError>;

    /// Adapter name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Renders the command table or a single command as text.
///
/// Formatters are pure: they return text and never print. `preamble` is the
/// program name followed by the command tokens consumed on the way to this
/// group, e.g. `hammer db`.
pub trait HelpFormatter: Send + Sync {
    /// Renders a listing of `commands`, in the given order.
    fn help_list(&self, preamble: &str, commands: &[&CommandSpec]) -> String;

    /// Renders detailed help for one command.
    fn help_command(&self, preamble: &str, command: &CommandSpec) -> String;
}
