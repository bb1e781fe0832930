//! Command handlers.
//!
//! A handler is any `Fn(Invocation) -> R` where `R` implements
//! [`HandlerResponse`]. [`into_handler`] erases the concrete type so handlers
//! of different shapes can live in one command table.
//!
//! ```rust,ignore
//! use herald_core::{Invocation, into_handler};
//!
//! // No output
//! let quiet = into_handler(|_inv: Invocation| {});
//!
//! // Text written to stdout by the runtime
//! let greet = into_handler(|inv: Invocation| format!("Hello, {}!", inv.arg(0).unwrap_or("world")));
//!
//! // Fallible
//! let parse = into_handler(|inv: Invocation| -> Result<String, std::num::ParseIntError> {
//!     let n: i64 = inv.arg(0).unwrap_or("0").parse()?;
//!     Ok((n * 2).to_string())
//! });
//! ```

use std::sync::Arc;

use crate::error::BoxError;
use crate::option::OptionMap;

/// Result produced by an erased handler: optional text output or an error.
pub type HandlerResult = Result<Option<String>, BoxError>;

/// A type-erased handler.
pub type BoxedHandler = Arc<dyn Fn(Invocation) -> HandlerResult + Send + Sync>;

/// Arguments passed to a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Name of the resolved command.
    pub command: String,
    /// Remaining positional arguments after command and option tokens were
    /// consumed.
    pub args: Vec<String>,
    /// Options parsed along the command path, merged over caller-supplied ones.
    pub options: OptionMap,
}

impl Invocation {
    /// Returns the positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Returns the positional arguments from `index` on.
    pub fn rest(&self, index: usize) -> &[String] {
        self.args.get(index..).unwrap_or_default()
    }

    /// Returns the parsed options.
    pub fn options(&self) -> &OptionMap {
        &self.options
    }
}

// ============================================================================
// HandlerResponse - Handle handler return values
// ============================================================================

/// A trait for types a handler may return.
pub trait HandlerResponse {
    /// Converts the value into optional output text or an error.
    fn into_response(self) -> HandlerResult;
}

/// No output.
impl HandlerResponse for () {
    fn into_response(self) -> HandlerResult {
        Ok(None)
    }
}

impl HandlerResponse for String {
    fn into_response(self) -> HandlerResult {
        Ok(Some(self))
    }
}

impl HandlerResponse for &'static str {
    fn into_response(self) -> HandlerResult {
        Ok(Some(self.to_string()))
    }
}

/// On `Some`, the inner value's response is used. On `None`, no output.
impl<T: HandlerResponse> HandlerResponse for Option<T> {
    fn into_response(self) -> HandlerResult {
        match self {
            Some(t) => t.into_response(),
            None => Ok(None),
        }
    }
}

/// On `Ok`, the inner value's response is used. On `Err`, the error is
/// surfaced to the dispatcher.
impl<T, E> HandlerResponse for Result<T, E>
where
    T: HandlerResponse,
    E: Into<BoxError>,
{
    fn into_response(self) -> HandlerResult {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => Err(e.into()),
        }
    }
}

/// Erases a handler function into a [`BoxedHandler`].
pub fn into_handler<F, R>(handler: F) -> BoxedHandler
where
    F: Fn(Invocation) -> R + Send + Sync + 'static,
    R: HandlerResponse,
{
    Arc::new(move |invocation| handler(invocation).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> Invocation {
        Invocation {
            command: "test".into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            options: OptionMap::new(),
        }
    }

    #[test]
    fn test_unit_response() {
        let handler = into_handler(|_inv: Invocation| {});
        assert_eq!(handler(invocation(&[])).unwrap(), None);
    }

    #[test]
    fn test_string_response() {
        let handler = into_handler(|inv: Invocation| format!("hi {}", inv.arg(0).unwrap_or("?")));
        assert_eq!(
            handler(invocation(&["Bob"])).unwrap().as_deref(),
            Some("hi Bob")
        );
    }

    #[test]
    fn test_result_error_response() {
        let handler = into_handler(|inv: Invocation| -> Result<String, std::num::ParseIntError> {
            let n: i64 = inv.arg(0).unwrap_or("x").parse()?;
            Ok(n.to_string())
        });
        assert!(handler(invocation(&["nope"])).is_err());
        assert_eq!(handler(invocation(&["7"])).unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_rest_slice() {
        let inv = invocation(&["a", "b", "c"]);
        assert_eq!(inv.rest(1), ["b".to_string(), "c".to_string()]);
        assert!(inv.rest(5).is_empty());
    }
}
