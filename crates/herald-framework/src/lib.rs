//! # Herald Framework
//!
//! The command table and dispatch algorithm of the Herald command
//! dispatcher.
//!
//! This layer provides:
//! - [`CommandRegistry`]: per-group command table with staged declarations
//! - [`Declaration`]: builder form of a declaration bound by `command`,
//!   `subcommand`, or `group`
//! - [`Dispatcher`]: resolves a command from the arguments and runs it
//! - [`TableHelp`] and [`JsonHelp`] help formatters
//!
//! The registry binds [`herald_adapter_clap::ClapAdapter`] and [`TableHelp`]
//! on first use unless others are injected.

pub mod buffer;
pub mod dispatcher;
pub mod help;
pub mod registry;

pub use buffer::DeclarationBuffer;
pub use dispatcher::Dispatcher;
pub use help::{JsonHelp, TableHelp};
pub use registry::{CommandExtras, CommandRegistry, Declaration};
