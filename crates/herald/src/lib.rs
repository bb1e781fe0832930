//! # Herald
//!
//! Declarative command dispatch for Rust command-line programs.
//!
//! ## Overview
//!
//! A program declares its commands once: a usage line, a description,
//! options, positional parameters, and a handler. Herald then resolves the
//! command named by the first argument, parses its options, checks the
//! argument count, and runs the handler. Help output is generated from the
//! declarations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌──────────────┐
//! │   Runtime   │────▶│ Dispatcher │────▶│   Handler    │
//! │ (argv, exit)│     │ (registry) │────▶│ Subcommand ──┼──▶ nested Dispatcher
//! └─────────────┘     └────────────┘────▶│ help         │
//!                       │        │       └──────────────┘
//!                OptionAdapter  HelpFormatter
//! ```
//!
//! - **Runtime**: reads process arguments, loads configuration, sets up
//!   logging, maps outcomes to output and exit status
//! - **Dispatcher**: one dispatch cycle over one command group
//! - **Registry**: the group's commands, in declaration order
//! - **OptionAdapter**: option parsing, clap by default
//! - **HelpFormatter**: help rendering, two-column text by default
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! fn main() -> Result<std::process::ExitCode, RegistryError> {
//!     let mut registry = CommandRegistry::new("hammer");
//!     registry
//!         .declare("greet NAME", "say hello")
//!         .required("NAME")
//!         .command("greet", |inv: Invocation| format!("Hello, {}!", inv.args[0]))?;
//!
//!     Ok(HeraldRuntime::new(registry).run())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: load `<app>.toml` configuration files (default)
//! - `yaml-config`: load `<app>.yaml` configuration files
//! - `json-log`: JSON log formatting

pub use herald_adapter_clap as clap_adapter;
pub use herald_core as core;
pub use herald_framework as framework;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use herald_runtime::{HeraldConfig, HeraldRuntime};

    // Declaring and dispatching commands
    pub use herald_framework::{CommandRegistry, Declaration, Dispatcher, JsonHelp, TableHelp};

    // Handler inputs and outputs
    pub use herald_core::{Invocation, OptionKind, OptionMap, OptionSpec, OptionValue, Outcome};

    // Seams for custom implementations
    pub use herald_adapter_clap::ClapAdapter;
    pub use herald_core::{Dispatch, HelpFormatter, OptionAdapter};

    // Errors
    pub use herald_core::{DispatchError, RegistryError};
}
