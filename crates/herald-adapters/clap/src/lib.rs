//! # Herald Adapter for clap
//!
//! The default [`OptionAdapter`](herald_core::OptionAdapter) of the Herald
//! command dispatcher, built on [`clap`].
//!
//! ## Quick Start
//!
//! The registry binds a default [`ClapAdapter`] on first use, so most
//! programs never construct one. To change its settings, inject a configured
//! instance:
//!
//! ```rust,ignore
//! use herald_adapter_clap::ClapAdapter;
//! use herald_framework::CommandRegistry;
//!
//! let mut registry = CommandRegistry::new("hammer");
//! registry.set_option_adapter(ClapAdapter::builder().negatable_flags(false).build());
//! ```
//!
//! ## Syntax
//!
//! | input | result |
//! |---|---|
//! | `-v`, `--verbose` | flag `verbose = true` |
//! | `--no-verbose` | flag `verbose = false` |
//! | `-o out`, `-oout`, `--output out`, `--output=out` | `output = "out"` |
//! | `--` | every later token is positional |

mod adapter;
mod parser;

pub use adapter::{ClapAdapter, ClapAdapterBuilder};
