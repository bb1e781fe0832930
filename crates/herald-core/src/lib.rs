//! # Herald Core
//!
//! The data model and collaborator contracts of the Herald command
//! dispatcher.
//!
//! This crate provides:
//! - **Declarations**: [`OptionSpec`], [`Param`], and the finalized
//!   [`CommandSpec`]
//! - **Values**: [`OptionValue`] and the ordered [`OptionMap`]
//! - **Handlers**: [`Invocation`], [`HandlerResponse`], [`into_handler`]
//! - **Seams**: the [`OptionAdapter`], [`HelpFormatter`], and [`Dispatch`]
//!   traits
//! - **Errors**: [`DispatchError`], [`OptionParseError`], [`RegistryError`]
//!
//! The registry and dispatch algorithm live in `herald-framework`; the
//! default option adapter lives in `herald-adapter-clap`.

pub mod adapter;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod option;

pub use adapter::{HelpFormatter, OptionAdapter};
pub use command::{
    Arity, CommandSpec, CommandTarget, HELP_COMMAND, HELP_DESCRIPTION, HELP_USAGE, Param,
    ParamKind,
};
pub use dispatch::{CommandPath, Dispatch, Outcome};
pub use error::{
    BoxError, DispatchError, DispatchResult, OptionParseError, RegistryError, RegistryResult,
};
pub use handler::{BoxedHandler, HandlerResponse, HandlerResult, Invocation, into_handler};
pub use option::{OptionKind, OptionMap, OptionSpec, OptionValue};
