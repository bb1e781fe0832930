//! Help formatters.
//!
//! [`TableHelp`] is bound by default; [`JsonHelp`] can be injected with
//! [`CommandRegistry::set_help_formatter`](crate::CommandRegistry::set_help_formatter).

mod json;
mod table;

pub use json::JsonHelp;
pub use table::TableHelp;
