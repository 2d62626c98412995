//! Symbolic manipulation of algebraic expressions and equations.
//!
//! Expressions are parsed with [`parse`] into an [`Expr`] tree. From there, this crate can:
//!
//! - reduce an expression to its [canonical form](canonical), so that expressions differing
//!   only in the order of their terms and factors compare equal;
//! - [`simplify`] an expression with a set of rewriting rules, evaluating exact arithmetic on
//!   rationals, radicals and trigonometric values;
//! - [`expand`] products over sums, and [`collect`] like terms back together;
//! - read an expression as a [polynomial](polynomial) in one variable;
//! - [`solve`] an equation for one variable, including quadratics, cubics, rational equations
//!   and some equations mixing a variable with its exponential.
//!
//! ```
//! use symsolve_algebra::{parse, simplify, solve};
//!
//! let expr = parse("3/4 + 4/3").unwrap();
//! assert_eq!(simplify(&expr).unwrap().to_string(), "(25/12)");
//!
//! let solutions = solve(&parse("2x + 3 = 7").unwrap(), "x");
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].to_string(), "2");
//! ```
//!
//! Every algorithm returns new trees and never modifies its input. Passes that repeat until the
//! expression stops changing give up with an [`Error`] after a fixed number of passes instead of
//! looping forever.

pub mod canonical;
pub mod collect;
pub mod error;
pub mod expand;
pub mod expr;
mod fixed_point;
pub mod polynomial;
pub mod simplify;
pub mod solve;
pub mod step_collector;
pub mod substitution;
pub mod terms;

pub use canonical::{canonical, equivalent};
pub use collect::{collect, collect_all, normalize_exponents};
pub use error::Error;
pub use expand::{expand, expand_all};
pub use expr::{parse, BinOp, Expr, UnaryOp};
pub use simplify::{simplify, simplify_with_steps};
pub use solve::solve;
