//! Errors that can occur while manipulating expressions.
//!
//! Errors that come from parsing carry the spans of the offending input. Errors raised by the
//! algebraic passes themselves have no source to point at, and are created with
//! [`Error::spanless`].

use ariadne::Fmt;
use symsolve_attrs::ErrorKind;
use symsolve_error::{ErrorKind, EXPR};

pub use symsolve_error::Error;

/// A function call names a function that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = format!("the known functions are {}", "sin, cos, log, ln, sqrt, W, InverseFactorial".fg(EXPR)),
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
)]
pub struct ArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A rewriting pass kept changing the expression without settling.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} did not settle after {} passes", pass, limit),
    help = "the rewriting rules may be cycling between equivalent forms",
)]
pub struct FixedPointLimit {
    /// The name of the pass.
    pub pass: &'static str,

    /// The number of passes that were run.
    pub limit: usize,
}

/// Every single-letter variable name is already in use.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "no unused single-letter variable is left for a substitution")]
pub struct VariablesExhausted;
