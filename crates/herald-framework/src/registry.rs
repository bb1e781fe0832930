//! The command registry.
//!
//! A [`CommandRegistry`] owns one command group's table: the commands in
//! registration order, the default command, the staged declarations, and the
//! option adapter and help formatter used for the group.
//!
//! # Declaring commands
//!
//! Metadata is staged first and bound to a name second. The builder form:
//!
//! ```rust,ignore
//! use herald_framework::CommandRegistry;
//! use herald_core::{Invocation, OptionSpec};
//!
//! let mut registry = CommandRegistry::new("hammer");
//!
//! registry
//!     .declare("greet NAME", "say hello")
//!     .required("NAME")
//!     .command("greet", |inv: Invocation| format!("Hello, {}!", inv.args[0]))?;
//!
//! registry
//!     .declare("build [TARGET...]", "build targets")
//!     .option(OptionSpec::flag("verbose"))
//!     .rest("TARGET")
//!     .command("build", build)?;
//! ```
//!
//! The two-step form stages on the registry and finalizes explicitly:
//!
//! ```rust,ignore
//! registry.desc("clean", "remove build output");
//! registry.option(OptionSpec::flag("force"));
//! registry.register_command("clean", Vec::new(), into_handler(clean))?;
//! ```
//!
//! Registering without staging anything first is a no-op, so helpers can be
//! routed through the same code without becoming commands.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use tracing::{debug, warn};

use herald_adapter_clap::ClapAdapter;
use herald_core::{
    BoxedHandler, CommandSpec, CommandTarget, Dispatch, HELP_COMMAND, HandlerResponse,
    HelpFormatter, Invocation, OptionAdapter, OptionSpec, Param, RegistryError, RegistryResult,
    into_handler,
};

use crate::buffer::DeclarationBuffer;
use crate::help::TableHelp;

/// Fields merged into a spec at finalization, alongside the staged metadata.
#[derive(Debug, Clone)]
pub struct CommandExtras {
    /// Positional parameters of the command.
    pub params: Vec<Param>,
    /// What the command does.
    pub target: CommandTarget,
}

/// One command group's command table.
pub struct CommandRegistry {
    name: String,
    default_command: String,
    commands: IndexMap<String, CommandSpec>,
    buffer: DeclarationBuffer,
    option_adapter: OnceLock<Arc<dyn OptionAdapter>>,
    help_formatter: OnceLock<Arc<dyn HelpFormatter>>,
}

impl CommandRegistry {
    /// Creates a registry holding only the built-in `help` command.
    ///
    /// `name` is used as the program name when this registry is the root of a
    /// dispatch.
    pub fn new(name: impl Into<String>) -> Self {
        let mut registry = Self {
            name: name.into(),
            default_command: HELP_COMMAND.to_string(),
            commands: IndexMap::new(),
            buffer: DeclarationBuffer::new(),
            option_adapter: OnceLock::new(),
            help_formatter: OnceLock::new(),
        };
        registry.register_builtin_help();
        registry
    }

    fn register_builtin_help(&mut self) {
        self.commands
            .insert(HELP_COMMAND.to_string(), CommandSpec::builtin_help());
    }

    /// Returns the registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Staging
    // ========================================================================

    /// Stages usage and description for the next command.
    pub fn desc(&mut self, usage: impl Into<String>, description: impl Into<String>) -> &mut Self {
        self.buffer.declare(usage, description);
        self
    }

    /// Stages a long description for the next command.
    pub fn long_desc(&mut self, text: impl Into<String>) -> &mut Self {
        self.buffer.describe_long(text);
        self
    }

    /// Stages an option for the next command.
    pub fn option(&mut self, spec: OptionSpec) -> &mut Self {
        self.buffer.declare_option(spec);
        self
    }

    /// Returns the currently staged declarations.
    pub fn buffer(&self) -> &DeclarationBuffer {
        &self.buffer
    }

    /// Stages usage and description and returns a builder that finalizes the
    /// declaration.
    pub fn declare(
        &mut self,
        usage: impl Into<String>,
        description: impl Into<String>,
    ) -> Declaration<'_> {
        self.buffer.declare(usage, description);
        Declaration {
            registry: self,
            params: Vec::new(),
        }
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Moves the staged declarations into a new command named `name`.
    ///
    /// Returns `Ok(false)` without registering anything if nothing was staged.
    /// A command already registered under `name` is replaced in place.
    pub fn finalize(&mut self, name: &str, extras: CommandExtras) -> RegistryResult<bool> {
        let Some(spec) = self.buffer.take_spec(name, extras.params, extras.target)? else {
            warn!(command = name, "Nothing declared, skipping registration");
            return Ok(false);
        };

        if self.commands.insert(name.to_string(), spec).is_some() {
            warn!(
                registry = %self.name,
                command = name,
                "Command registered twice, keeping the later declaration"
            );
        } else {
            debug!(registry = %self.name, command = name, "Registered command");
        }
        Ok(true)
    }

    /// Registers a leaf command.
    pub fn register_command(
        &mut self,
        name: &str,
        params: Vec<Param>,
        handler: BoxedHandler,
    ) -> RegistryResult<bool> {
        self.finalize(
            name,
            CommandExtras {
                params,
                target: CommandTarget::Handler(handler),
            },
        )
    }

    /// Registers a command that delegates to `dispatcher`.
    pub fn register_subcommand(
        &mut self,
        name: &str,
        dispatcher: Arc<dyn Dispatch>,
    ) -> RegistryResult<bool> {
        self.finalize(
            name,
            CommandExtras {
                params: Vec::new(),
                target: CommandTarget::Subcommand(dispatcher),
            },
        )
    }

    /// Registers a delegation point to be bound later with
    /// [`bind_subcommand`](Self::bind_subcommand).
    pub fn register_group(&mut self, name: &str) -> RegistryResult<bool> {
        self.finalize(
            name,
            CommandExtras {
                params: Vec::new(),
                target: CommandTarget::Unbound,
            },
        )
    }

    /// Binds (or rebinds) the dispatcher of a delegating command.
    pub fn bind_subcommand(
        &mut self,
        name: &str,
        dispatcher: Arc<dyn Dispatch>,
    ) -> RegistryResult<()> {
        let spec = self
            .commands
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))?;

        if !spec.target.is_delegating() {
            return Err(RegistryError::NotASubcommand(name.to_string()));
        }
        spec.target = CommandTarget::Subcommand(dispatcher);
        debug!(registry = %self.name, command = name, "Bound subcommand");
        Ok(())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Sets the command selected when no known command name is given.
    pub fn set_default_command(&mut self, name: impl Into<String>) -> &mut Self {
        self.default_command = name.into();
        self
    }

    /// Replaces the option adapter.
    pub fn set_option_adapter(&mut self, adapter: impl OptionAdapter + 'static) -> &mut Self {
        self.option_adapter = OnceLock::from(Arc::new(adapter) as Arc<dyn OptionAdapter>);
        self
    }

    /// Replaces the help formatter.
    pub fn set_help_formatter(&mut self, formatter: impl HelpFormatter + 'static) -> &mut Self {
        self.help_formatter = OnceLock::from(Arc::new(formatter) as Arc<dyn HelpFormatter>);
        self
    }

    /// Returns the name of the default command.
    pub fn default_command(&self) -> &str {
        &self.default_command
    }

    /// Returns the option adapter, binding [`ClapAdapter`] on first use if
    /// none was set.
    pub fn option_adapter(&self) -> &Arc<dyn OptionAdapter> {
        self.option_adapter.get_or_init(|| {
            debug!(registry = %self.name, "Binding default option adapter");
            Arc::new(ClapAdapter::new())
        })
    }

    /// Returns the help formatter, binding [`TableHelp`] on first use if none
    /// was set.
    pub fn help_formatter(&self) -> &Arc<dyn HelpFormatter> {
        self.help_formatter.get_or_init(|| {
            debug!(registry = %self.name, "Binding default help formatter");
            Arc::new(TableHelp::new())
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns the command registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Returns the spec of the default command, if it is registered.
    pub fn default_spec(&self) -> Option<&CommandSpec> {
        self.resolve(&self.default_command)
    }

    /// Iterates over the commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    /// Number of registered commands, including `help`.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false`: a registry holds at least the built-in `help`.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // ========================================================================
    // Help
    // ========================================================================

    /// Renders the command listing with the given preamble.
    pub fn help_list(&self, preamble: &str) -> String {
        let commands: Vec<&CommandSpec> = self.commands().collect();
        self.help_formatter().help_list(preamble, &commands)
    }

    /// Renders detailed help for `command` with the given preamble.
    pub fn help_command(&self, preamble: &str, command: &CommandSpec) -> String {
        self.help_formatter().help_command(preamble, command)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("name", &self.name)
            .field("default_command", &self.default_command)
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("buffer", &self.buffer)
            .finish()
    }
}

// ============================================================================
// Declaration builder
// ============================================================================

/// Builder returned by [`CommandRegistry::declare`].
///
/// Options and long descriptions are staged on the registry as they are
/// added; the terminal call (`command`, `subcommand`, or `group`) finalizes
/// them into a command.
#[must_use = "a declaration does nothing until it is bound with `command`, `subcommand`, or `group`"]
pub struct Declaration<'r> {
    registry: &'r mut CommandRegistry,
    params: Vec<Param>,
}

impl Declaration<'_> {
    /// Stages a long description.
    pub fn long_desc(self, text: impl Into<String>) -> Self {
        self.registry.buffer.describe_long(text);
        self
    }

    /// Stages an option.
    pub fn option(self, spec: OptionSpec) -> Self {
        self.registry.buffer.declare_option(spec);
        self
    }

    /// Appends a positional parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a required positional parameter.
    pub fn required(self, name: impl Into<String>) -> Self {
        self.param(Param::required(name))
    }

    /// Appends an optional positional parameter.
    pub fn optional(self, name: impl Into<String>) -> Self {
        self.param(Param::optional(name))
    }

    /// Appends a rest parameter absorbing any trailing arguments.
    pub fn rest(self, name: impl Into<String>) -> Self {
        self.param(Param::rest(name))
    }

    /// Binds the declaration to a handler under `name`.
    pub fn command<F, R>(self, name: &str, handler: F) -> RegistryResult<bool>
    where
        F: Fn(Invocation) -> R + Send + Sync + 'static,
        R: HandlerResponse,
    {
        self.registry
            .register_command(name, self.params, into_handler(handler))
    }

    /// Binds the declaration to a nested dispatcher under `name`.
    pub fn subcommand(
        self,
        name: &str,
        dispatcher: impl Dispatch + 'static,
    ) -> RegistryResult<bool> {
        self.registry.register_subcommand(name, Arc::new(dispatcher))
    }

    /// Registers the declaration as a delegation point bound later.
    pub fn group(self, name: &str) -> RegistryResult<bool> {
        self.registry.register_group(name)
    }
}
