//! Command specifications.
//!
//! A [`CommandSpec`] is the finalized, immutable description of one
//! dispatchable command. Specs are produced by the registry when a
//! declaration is bound to a handler or subcommand; user code reads them but
//! never mutates them.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatch;
use crate::handler::BoxedHandler;
use crate::option::OptionSpec;

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";

/// Usage string of the built-in help command.
pub const HELP_USAGE: &str = "help [COMMAND]";

/// Description of the built-in help command.
pub const HELP_DESCRIPTION: &str = "list available commands or describe a specific command";

// ============================================================================
// Positional parameters
// ============================================================================

/// How a positional parameter participates in arity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Must be present.
    Required,
    /// May be omitted.
    Optional,
    /// Absorbs any number of trailing arguments.
    Rest,
}

/// A positional parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Display name, e.g. `NAME`.
    pub name: String,
    /// Arity participation.
    pub kind: ParamKind,
}

impl Param {
    /// Creates a required parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Required,
        }
    }

    /// Creates an optional parameter.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Optional,
        }
    }

    /// Creates a rest parameter.
    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Rest,
        }
    }
}

/// The accepted argument-count range of a leaf command.
///
/// When a command declares options, the parsed option map is passed to the
/// handler as one implicit trailing parameter: it widens both bounds by one
/// and is counted as one argument by [`accepts`](Self::accepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Minimum argument count.
    pub min: usize,
    /// Maximum argument count; `None` when a rest parameter is declared.
    pub max: Option<usize>,
    /// Whether the option map occupies an argument slot.
    pub options_slot: bool,
}

impl Arity {
    /// Computes the arity for `params`, with or without the option slot.
    pub fn of(params: &[Param], options_slot: bool) -> Self {
        let slot = usize::from(options_slot);
        let required = params
            .iter()
            .filter(|p| p.kind == ParamKind::Required)
            .count();
        let max = if params.iter().any(|p| p.kind == ParamKind::Rest) {
            None
        } else {
            Some(params.len() + slot)
        };
        Self {
            min: required + slot,
            max,
            options_slot,
        }
    }

    /// Returns `true` if `positional` arguments satisfy this arity.
    pub fn accepts(&self, positional: usize) -> bool {
        let count = positional + usize::from(self.options_slot);
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

// ============================================================================
// Command target
// ============================================================================

/// What a command does once resolved.
#[derive(Clone)]
pub enum CommandTarget {
    /// The built-in help command: lists commands or describes one.
    Help,
    /// A leaf handler.
    Handler(BoxedHandler),
    /// Delegates the remaining arguments to a nested dispatcher.
    Subcommand(Arc<dyn Dispatch>),
    /// A delegation point whose dispatcher has not been bound yet.
    Unbound,
}

impl CommandTarget {
    /// Returns `true` if this command forwards to a nested dispatcher,
    /// bound or not.
    pub fn is_delegating(&self) -> bool {
        matches!(self, Self::Subcommand(_) | Self::Unbound)
    }
}

impl fmt::Debug for CommandTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str("Help"),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Subcommand(_) => f.write_str("Subcommand(..)"),
            Self::Unbound => f.write_str("Unbound"),
        }
    }
}

// ============================================================================
// CommandSpec
// ============================================================================

/// Finalized description of one dispatchable command.
pub struct CommandSpec {
    /// Unique key within the owning registry.
    pub name: String,
    /// Invocation string, e.g. `greet NAME`.
    pub usage: String,
    /// One-line description.
    pub description: String,
    /// Optional long-form description.
    pub long_description: Option<String>,
    /// Declared options, in declaration order.
    pub options: IndexMap<String, OptionSpec>,
    /// Positional parameters, in order.
    pub params: Vec<Param>,
    /// What the command does.
    pub target: CommandTarget,
    parser_state: OnceLock<Box<dyn Any + Send + Sync>>,
}

impl CommandSpec {
    /// Creates a spec with the given name and target and no metadata.
    pub fn new(name: impl Into<String>, target: CommandTarget) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            description: String::new(),
            long_description: None,
            options: IndexMap::new(),
            params: Vec::new(),
            target,
            parser_state: OnceLock::new(),
        }
    }

    /// The synthetic help command every registry starts with.
    pub fn builtin_help() -> Self {
        Self {
            usage: HELP_USAGE.to_string(),
            description: HELP_DESCRIPTION.to_string(),
            ..Self::new(HELP_COMMAND, CommandTarget::Help)
        }
    }

    /// Returns `true` for the built-in help command.
    pub fn is_builtin_help(&self) -> bool {
        matches!(self.target, CommandTarget::Help)
    }

    /// Returns `true` if any options are declared.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Returns the nested dispatcher, if bound.
    pub fn subcommand(&self) -> Option<&Arc<dyn Dispatch>> {
        match &self.target {
            CommandTarget::Subcommand(dispatcher) => Some(dispatcher),
            _ => None,
        }
    }

    /// Returns the accepted argument range for this command.
    pub fn arity(&self) -> Arity {
        Arity::of(&self.params, self.has_options())
    }

    /// Returns adapter-owned parser state, building it on first access.
    ///
    /// The state is attached once per spec; adapters downcast it to their own
    /// type and rebuild locally if another adapter attached something else.
    pub fn parser_state<F>(&self, init: F) -> &(dyn Any + Send + Sync)
    where
        F: FnOnce() -> Box<dyn Any + Send + Sync>,
    {
        self.parser_state.get_or_init(init).as_ref()
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("description", &self.description)
            .field("long_description", &self.long_description)
            .field("options", &self.options)
            .field("params", &self.params)
            .field("target", &self.target)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_required_only() {
        let arity = Arity::of(&[Param::required("NAME")], false);
        assert_eq!(arity.min, 1);
        assert_eq!(arity.max, Some(1));
        assert!(!arity.accepts(0));
        assert!(arity.accepts(1));
        assert!(!arity.accepts(2));
    }

    #[test]
    fn test_arity_optional_and_rest() {
        let arity = Arity::of(&[Param::required("SRC"), Param::optional("DST")], false);
        assert_eq!((arity.min, arity.max), (1, Some(2)));

        let arity = Arity::of(&[Param::required("SRC"), Param::rest("FILES")], false);
        assert_eq!(arity.max, None);
        assert!(arity.accepts(40));
        assert!(!arity.accepts(0));
    }

    // The option map is an implicit trailing parameter: it widens both bounds
    // and is always counted, so the positional range is unchanged.
    #[test]
    fn test_arity_options_slot() {
        let arity = Arity::of(&[Param::required("NAME")], true);
        assert_eq!((arity.min, arity.max), (2, Some(2)));
        assert!(!arity.accepts(0));
        assert!(arity.accepts(1));
        assert!(!arity.accepts(2));

        let arity = Arity::of(&[Param::rest("TARGETS")], true);
        assert_eq!((arity.min, arity.max), (1, None));
        assert!(arity.accepts(0));
        assert!(arity.accepts(3));
    }

    #[test]
    fn test_builtin_help() {
        let help = CommandSpec::builtin_help();
        assert_eq!(help.name, HELP_COMMAND);
        assert_eq!(help.usage, HELP_USAGE);
        assert!(help.is_builtin_help());
        assert!(!help.has_options());
        assert!(help.subcommand().is_none());
    }

    #[test]
    fn test_parser_state_initialized_once() {
        let spec = CommandSpec::new("build", CommandTarget::Unbound);
        let first = spec.parser_state(|| Box::new(1_u32));
        assert_eq!(first.downcast_ref::<u32>(), Some(&1));

        let second = spec.parser_state(|| Box::new(2_u32));
        assert_eq!(second.downcast_ref::<u32>(), Some(&1));
        assert!(spec.target.is_delegating());
    }
}
