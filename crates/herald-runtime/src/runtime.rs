//! Process wiring for a Herald program.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::process::ExitCode;
//! use herald_framework::{CommandRegistry, Dispatcher};
//! use herald_runtime::HeraldRuntime;
//!
//! fn main() -> ExitCode {
//!     let mut registry = CommandRegistry::new("hammer");
//!     // ... declare commands ...
//!
//!     match HeraldRuntime::new(registry).load_config() {
//!         Ok(runtime) => runtime.run(),
//!         Err(e) => {
//!             eprintln!("{e}");
//!             ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```
//!
//! # Exit Status
//!
//! | outcome | output | status |
//! |---|---|---|
//! | handler ran | handler text on stdout | 0 |
//! | help / argument count mismatch | help on stdout | 0 |
//! | default command not registered | nothing | 0 |
//! | malformed options | parser message on stderr | 1 |
//! | handler error, unbound subcommand | diagnostic on stderr | 1 |

use std::io::Write;
use std::process::ExitCode;

use tracing::{debug, info};

use crate::config::{ConfigLoader, HeraldConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use herald_core::{DispatchError, OptionMap, Outcome};
use herald_framework::Dispatcher;

/// Runs a root [`Dispatcher`] as a process.
pub struct HeraldRuntime {
    dispatcher: Dispatcher,
    config: HeraldConfig,
}

impl HeraldRuntime {
    /// Creates a runtime with the default configuration.
    pub fn new(dispatcher: impl Into<Dispatcher>) -> Self {
        Self {
            dispatcher: dispatcher.into(),
            config: HeraldConfig::default(),
        }
    }

    /// Applies a pre-loaded configuration.
    pub fn config(mut self, config: HeraldConfig) -> Self {
        if let Some(name) = &config.dispatch.default_command {
            info!(default_command = %name, "Overriding default command from configuration");
            self.dispatcher
                .registry_mut()
                .set_default_command(name.clone());
        }
        self.config = config;
        self
    }

    /// Loads, validates, and applies configuration for the root registry's
    /// program name.
    pub fn load_config(self) -> RuntimeResult<Self> {
        let app = self.dispatcher.registry().name().to_string();
        let config = ConfigLoader::new(app).load()?;
        validate_config(&config)?;
        Ok(self.config(config))
    }

    /// Returns the active configuration.
    pub fn active_config(&self) -> &HeraldConfig {
        &self.config
    }

    /// Returns the root dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Initializes logging, dispatches the process arguments, and writes the
    /// result to standard output.
    pub fn run(&self) -> ExitCode {
        logging::init_from_config(&self.config.logging);

        let args: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(args, &mut out)
    }

    /// Dispatches `args` and writes the result to `out`, reporting failures
    /// on standard error.
    pub fn run_with<W: Write>(&self, args: Vec<String>, out: &mut W) -> ExitCode {
        match self.try_run(args, out) {
            Ok(outcome) => {
                debug!(handled = outcome.is_handled(), "Dispatch finished");
                ExitCode::SUCCESS
            }
            Err(RuntimeError::Dispatch(DispatchError::OptionParse(e))) => {
                debug!(command = %e.command, "Option parsing failed");
                eprintln!("{}", e.message);
                ExitCode::FAILURE
            }
            Err(e) => {
                debug!(error = %e, "Dispatch failed");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    }

    /// Dispatches `args` and writes any output text to `out`.
    pub fn try_run<W: Write>(&self, args: Vec<String>, out: &mut W) -> RuntimeResult<Outcome> {
        debug!(?args, "Starting dispatch");
        let outcome = self.dispatcher.start(args, OptionMap::new())?;

        if let Some(text) = outcome.output() {
            writeln!(out, "{text}")?;
            out.flush()?;
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for HeraldRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeraldRuntime")
            .field("program", &self.dispatcher.registry().name())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use herald_core::{Invocation, OptionSpec};
    use herald_framework::CommandRegistry;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn hammer() -> CommandRegistry {
        let mut registry = CommandRegistry::new("hammer");
        registry
            .declare("greet NAME", "say hello")
            .required("NAME")
            .command("greet", |inv: Invocation| format!("Hello, {}!", inv.args[0]))
            .unwrap();
        registry
            .declare("build", "build things")
            .option(OptionSpec::flag("verbose"))
            .command("build", |_inv: Invocation| {})
            .unwrap();
        registry
            .declare("fail", "always fails")
            .command("fail", |_inv: Invocation| -> Result<(), std::io::Error> {
                Err(std::io::Error::other("boom"))
            })
            .unwrap();
        registry
    }

    fn run(runtime: &HeraldRuntime, tokens: &[&str]) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = runtime.run_with(args(tokens), &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_handler_output_written() {
        let runtime = HeraldRuntime::new(hammer());
        let (code, out) = run(&runtime, &["greet", "Bob"]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, "Hello, Bob!\n");
    }

    #[test]
    fn test_usage_error_prints_help_and_succeeds() {
        let runtime = HeraldRuntime::new(hammer());
        let (code, out) = run(&runtime, &["greet"]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, "Usage:\n  hammer greet NAME\n\nsay hello\n");
    }

    #[test]
    fn test_listing_on_empty_args() {
        let runtime = HeraldRuntime::new(hammer());
        let (code, out) = run(&runtime, &[]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out.lines().count(), 4);
        assert!(out.starts_with("  hammer help [COMMAND]"));
    }

    #[test]
    fn test_option_parse_failure_exits_nonzero() {
        let runtime = HeraldRuntime::new(hammer());
        let (code, out) = run(&runtime, &["build", "--bogus"]);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_handler_error_exits_nonzero() {
        let runtime = HeraldRuntime::new(hammer());
        let mut out = Vec::new();

        let err = runtime.try_run(args(&["fail"]), &mut out).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Dispatch(DispatchError::Handler { .. })
        ));
        assert_eq!(run(&runtime, &["fail"]).0, ExitCode::FAILURE);
    }

    #[test]
    fn test_config_overrides_default_command() {
        let config = HeraldConfig {
            dispatch: DispatchConfig {
                default_command: Some("greet".to_string()),
            },
            ..Default::default()
        };
        let runtime = HeraldRuntime::new(hammer()).config(config);

        let (code, out) = run(&runtime, &["Alice"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, "Hello, Alice!\n");
        assert_eq!(runtime.dispatcher().registry().default_command(), "greet");
    }

    #[test]
    fn test_unbound_group_exits_nonzero() {
        let mut registry = hammer();
        registry
            .declare("db COMMAND", "database tasks")
            .group("db")
            .unwrap();
        let runtime = HeraldRuntime::new(registry);

        let mut out = Vec::new();
        let err = runtime
            .try_run(args(&["db", "migrate"]), &mut out)
            .unwrap_err();
        let RuntimeError::Dispatch(DispatchError::UnboundSubcommand { command }) = &err else {
            panic!("expected an unbound subcommand error, got {err:?}");
        };
        assert_eq!(command, "db");
        assert!(err.to_string().contains("db"));

        let (code, out) = run(&runtime, &["db", "migrate"]);
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unresolved_default_exits_cleanly() {
        let mut registry = hammer();
        registry.set_default_command("missing");
        let runtime = HeraldRuntime::new(registry);

        let mut out = Vec::new();
        let outcome = runtime.try_run(args(&["stray"]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Unresolved);

        let (code, out) = run(&runtime, &["stray"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.is_empty());
    }

    #[test]
    fn test_quiet_handler_writes_nothing() {
        let runtime = HeraldRuntime::new(hammer());
        let (code, out) = run(&runtime, &["build", "-v"]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.is_empty());
    }
}
