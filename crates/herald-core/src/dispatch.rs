//! The dispatch seam between command groups.
//!
//! A command that delegates to a nested group holds an `Arc<dyn Dispatch>`.
//! The parent forwards the remaining arguments, the options collected so far,
//! and the command path it has walked, so the nested group can render help
//! with the full invocation prefix.

use std::fmt;

use crate::error::DispatchResult;
use crate::option::OptionMap;

/// Result of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A handler ran; carries its text output, if any.
    Handled(Option<String>),
    /// The built-in help command ran; carries the rendered help.
    Help(String),
    /// The arguments did not fit the command's arity; carries the command's
    /// rendered help. The handler was not invoked.
    Usage(String),
    /// The default command is not registered, so nothing ran.
    Unresolved,
}

impl Outcome {
    /// Returns the text to show the user, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Handled(text) => text.as_deref(),
            Self::Help(text) | Self::Usage(text) => Some(text),
            Self::Unresolved => None,
        }
    }

    /// Returns `true` if a handler was invoked.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// The program name followed by the command tokens consumed so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Starts a path at the program name.
    pub fn new(program: impl Into<String>) -> Self {
        Self(vec![program.into()])
    }

    /// Returns a new path extended by `token`.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.0.clone();
        tokens.push(token.into());
        Self(tokens)
    }

    /// The tokens of this path.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// The space-joined path used as the help preamble.
    pub fn preamble(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preamble())
    }
}

/// A command group that can run one dispatch cycle.
pub trait Dispatch: Send + Sync {
    /// Resolves and runs a command from `args`.
    ///
    /// `options` are the values collected by ancestor groups; `path` is the
    /// program name plus the command tokens the ancestors consumed.
    fn dispatch(
        &self,
        args: Vec<String>,
        options: OptionMap,
        path: &CommandPath,
    ) -> DispatchResult<Outcome>;
}
