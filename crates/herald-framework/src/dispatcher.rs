//! Command dispatcher for the Herald framework.
//!
//! A [`Dispatcher`] runs one dispatch cycle over its [`CommandRegistry`]:
//!
//! 1. The first argument is looked up as a command name. If it names a
//!    registered command it is consumed; otherwise the default command is
//!    selected and the arguments are left untouched
//! 2. The built-in `help` command is answered immediately
//! 3. Declared options are parsed out of the arguments by the option adapter
//!    and merged over the options passed in
//! 4. A delegating command forwards the remaining arguments to its nested
//!    dispatcher
//! 5. A leaf command's positional arguments are checked against its arity;
//!    on mismatch the command's help is returned instead of invoking it
//!
//! ```rust,ignore
//! use herald_framework::{CommandRegistry, Dispatcher};
//! use herald_core::{Invocation, OptionMap};
//!
//! let mut registry = CommandRegistry::new("hammer");
//! registry
//!     .declare("greet NAME", "say hello")
//!     .required("NAME")
//!     .command("greet", |inv: Invocation| format!("Hello, {}!", inv.args[0]))?;
//!
//! let dispatcher = Dispatcher::new(registry);
//! let outcome = dispatcher.start(vec!["greet".into(), "Bob".into()], OptionMap::new())?;
//! assert_eq!(outcome.output(), Some("Hello, Bob!"));
//! ```

use tracing::{Level, debug, error, span, trace, warn};

use herald_core::{
    CommandPath, CommandSpec, CommandTarget, Dispatch, DispatchError, DispatchResult, Invocation,
    OptionMap, Outcome,
};

use crate::registry::CommandRegistry;

/// Runs dispatch cycles over one command group.
///
/// Wrap a dispatcher in an `Arc` to mount it under a parent registry with
/// [`CommandRegistry::register_subcommand`].
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Returns the command table.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Returns the command table for late configuration.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Runs one dispatch cycle as the root of a command path named after
    /// the registry.
    pub fn start(&self, args: Vec<String>, options: OptionMap) -> DispatchResult<Outcome> {
        let path = CommandPath::new(self.registry.name());
        self.dispatch(args, options, &path)
    }

    /// Selects the command for `args`, consuming its name if present.
    ///
    /// Returns the spec and whether a token was consumed, or `None` if the
    /// default command is not registered.
    fn determine_command(&self, args: &mut Vec<String>) -> Option<(&CommandSpec, bool)> {
        if let Some(spec) = args.first().and_then(|token| self.registry.resolve(token)) {
            args.remove(0);
            return Some((spec, true));
        }
        self.registry.default_spec().map(|spec| (spec, false))
    }

    /// Answers the built-in help command.
    fn get_help(&self, args: &mut Vec<String>, path: &CommandPath) -> String {
        let preamble = path.preamble();
        if args.is_empty() {
            return self.registry.help_list(&preamble);
        }
        match self.determine_command(args) {
            Some((spec, _)) => self.registry.help_command(&preamble, spec),
            None => self.registry.help_list(&preamble),
        }
    }
}

impl Dispatch for Dispatcher {
    fn dispatch(
        &self,
        mut args: Vec<String>,
        mut options: OptionMap,
        path: &CommandPath,
    ) -> DispatchResult<Outcome> {
        let span = span!(Level::DEBUG, "dispatch", path = %path);
        let _enter = span.enter();

        let Some((spec, consumed)) = self.determine_command(&mut args) else {
            warn!(
                default_command = self.registry.default_command(),
                "Default command is not registered, nothing to run"
            );
            return Ok(Outcome::Unresolved);
        };
        debug!(command = %spec.name, consumed, remaining = args.len(), "Resolved command");

        if spec.is_builtin_help() {
            return Ok(Outcome::Help(self.get_help(&mut args, path)));
        }

        if spec.has_options() {
            let adapter = self.registry.option_adapter();
            trace!(command = %spec.name, adapter = adapter.name(), "Processing options");
            let parsed = adapter.process_options(&mut args, spec)?;
            options.merge(parsed);
        }

        let handler = match &spec.target {
            CommandTarget::Handler(handler) => handler,
            CommandTarget::Subcommand(dispatcher) => {
                let child = if consumed {
                    path.child(&spec.name)
                } else {
                    path.clone()
                };
                debug!(command = %spec.name, "Delegating to subcommand");
                return dispatcher.dispatch(args, options, &child);
            }
            CommandTarget::Unbound => {
                error!(command = %spec.name, "No subcommand bound to delegating command");
                return Err(DispatchError::UnboundSubcommand {
                    command: spec.name.clone(),
                });
            }
            CommandTarget::Help => return Ok(Outcome::Help(self.get_help(&mut args, path))),
        };

        let arity = spec.arity();
        if !arity.accepts(args.len()) {
            debug!(
                command = %spec.name,
                given = args.len(),
                min = arity.min,
                max = ?arity.max,
                "Argument count out of range, rendering usage"
            );
            let help = self.registry.help_command(&path.preamble(), spec);
            return Ok(Outcome::Usage(help));
        }

        debug!(command = %spec.name, "Invoking handler");
        let invocation = Invocation {
            command: spec.name.clone(),
            args,
            options,
        };
        handler(invocation)
            .map(Outcome::Handled)
            .map_err(|source| DispatchError::Handler {
                command: spec.name.clone(),
                source,
            })
    }
}

impl From<CommandRegistry> for Dispatcher {
    fn from(registry: CommandRegistry) -> Self {
        Self::new(registry)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}
