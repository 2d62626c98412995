//! Solving single-variable equations.
//!
//! The [`solve`] function keeps a queue of equations `lhs = rhs`. Each equation has the outermost
//! operation of its left-hand side [inverted](inverse::invert) until the variable stands alone.
//! When the variable appears on both sides of an operation, the equation is handed to a list of
//! factorization strategies instead, which rearrange it or split it into simpler equations and
//! solve those recursively.
//!
//! Every solution found this way is simplified and checked by substituting it back into the
//! equation. Solutions that make the equation [degenerate](Expr::is_degenerate) are dropped.

mod factorize;
pub mod inverse;
pub mod lambert;

use crate::{
    canonical::canonical_string,
    expr::{BinOp, Expr},
    simplify::simplify,
    substitution::substitute,
};
use factorize::{factorize, Problem};
use log::{debug, trace, warn};
use std::collections::{HashSet, VecDeque};

/// The deepest a factorization strategy may nest recursive solves.
pub const MAX_DEPTH: usize = 4;

/// The most equations a single call to [`solve`] will process.
pub const MAX_STEPS: usize = 256;

/// The state shared by every recursive solve of a single equation.
pub(crate) struct Solver {
    /// The number of equations processed so far.
    steps: usize,
}

impl Solver {
    fn new() -> Self {
        Self { steps: 0 }
    }

    /// Solves `lhs = rhs` for `variable`, returning every candidate solution found.
    pub(crate) fn solve(&mut self, lhs: Expr, rhs: Expr, variable: &str, depth: usize) -> Vec<Expr> {
        if depth > MAX_DEPTH {
            debug!("giving up on {} = {}: too deep", lhs, rhs);
            return Vec::new();
        }

        let mut solutions = Vec::new();
        let mut queue = VecDeque::from([(lhs, rhs)]);
        while let Some((lhs, rhs)) = queue.pop_front() {
            self.steps += 1;
            if self.steps > MAX_STEPS {
                warn!("giving up on {} = {}: processed {} equations", lhs, rhs, MAX_STEPS);
                break;
            }
            trace!("solving {} = {} for {}", lhs, rhs, variable);

            if rhs.contains(variable) {
                queue.push_back((lhs - rhs, Expr::zero()));
            } else if lhs.is_named(variable) {
                solutions.push(rhs);
            } else if !lhs.contains(variable) {
                trace!("{} does not contain {}", lhs, variable);
            } else if let Some(equations) = inverse::invert(&lhs, &rhs, variable) {
                queue.extend(equations);
            } else {
                let problem = Problem { lhs: &lhs, rhs: &rhs, variable, depth };
                solutions.extend(factorize(self, &problem));
            }
        }

        solutions
    }
}

/// Returns true if the expression, or any of its subexpressions, is degenerate once simplified.
///
/// Subexpressions are checked on their own, since simplifying the whole expression can cancel a
/// zero divisor that only appears after substitution, such as `(1-1)` in `(1^2-1)/(1-1)`.
fn becomes_degenerate(expr: &Expr) -> bool {
    expr.post_order_iter()
        .filter(|node| !matches!(node, Expr::Symbol(_)))
        .any(|node| match simplify(node) {
            Ok(result) => result.is_degenerate(),
            Err(err) => {
                debug!("could not simplify {}: {}", node, err);
                node.is_degenerate()
            },
        })
}

/// Returns true if the candidate should be kept as a solution of `equation = 0`.
fn verify(equation: &Expr, variable: &str, candidate: &Expr) -> bool {
    if candidate.is_degenerate() || candidate.contains(variable) {
        return false;
    }

    let substituted = substitute(equation, &Expr::symbol(variable), candidate);
    if becomes_degenerate(&substituted) {
        debug!("rejecting {} = {}: the equation becomes degenerate", variable, candidate);
        return false;
    }
    true
}

/// Solves the equation for `variable`.
///
/// An expression without an equals sign is solved as `expr = 0`. Returns an empty list if the
/// variable does not appear, or if no solution could be found.
///
/// ```
/// use symsolve_algebra::{parse, solve};
///
/// let solutions = solve(&parse("2x + 3 = 7").unwrap(), "x");
/// assert_eq!(solutions.len(), 1);
/// assert_eq!(solutions[0].to_string(), "2");
/// ```
pub fn solve(expr: &Expr, variable: &str) -> Vec<Expr> {
    let equation = match expr.as_binary(BinOp::Equals) {
        Some((lhs, rhs)) => lhs.clone() - rhs.clone(),
        None => expr.clone(),
    };
    if !equation.contains(variable) {
        return Vec::new();
    }

    let candidates = Solver::new().solve(equation.clone(), Expr::zero(), variable, 0);

    let mut seen = HashSet::new();
    candidates.into_iter()
        .filter_map(|candidate| match simplify(&candidate) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                debug!("discarding {}: {}", candidate, err);
                None
            },
        })
        .filter(|candidate| verify(&equation, variable, candidate))
        .filter(|candidate| seen.insert(canonical_string(candidate)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use simplelog::{Config, LevelFilter, TestLogger};
    use super::*;

    fn solved(input: &str) -> Vec<String> {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
        let mut solutions = solve(&parse(input).unwrap(), "x")
            .iter()
            .map(canonical_string)
            .collect::<Vec<_>>();
        solutions.sort();
        solutions
    }

    fn expected(values: &[&str]) -> Vec<String> {
        let mut values = values.iter()
            .map(|value| canonical_string(&simplify(&parse(value).unwrap()).unwrap()))
            .collect::<Vec<_>>();
        values.sort();
        values
    }

    #[test]
    fn linear() {
        assert_eq!(solved("2*x + 3 = 7"), expected(&["2"]));
        assert_eq!(solved("x/4 = 2"), expected(&["8"]));
        assert_eq!(solved("5 - x = 1"), expected(&["4"]));
    }

    #[test]
    fn quadratic() {
        assert_eq!(solved("x^2 + x = 2"), expected(&["1", "-2"]));
    }

    #[test]
    fn cubic() {
        assert_eq!(solved("x^3 - 6*x^2 + 11*x - 6 = 0"), expected(&["1", "2", "3"]));
    }

    #[test]
    fn cubic_has_at_most_three_roots() {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
        for input in ["x^3 - x - 6 = 0", "x^3 - 3x + 1 = 0", "2x^3 + x^2 - 5 = 0"] {
            let solutions = solve(&parse(input).unwrap(), "x");
            assert!(solutions.len() <= 3, "{}: {:?}", input, solutions);
        }
    }

    #[test]
    fn complex_roots() {
        assert_eq!(solved("x^2 = -1"), expected(&["i", "-i"]));
    }

    #[test]
    fn rational() {
        assert_eq!(solved("1/x + x = 2"), expected(&["1"]));
    }

    #[test]
    fn lambert() {
        assert_eq!(solved("x + e^x = 1"), expected(&["0"]));
    }

    #[test]
    fn bare_expression_equals_zero() {
        assert_eq!(solved("2x - 8"), expected(&["4"]));
    }

    #[test]
    fn extraneous_roots_are_rejected() {
        assert_eq!(solved("(x^2 - 1)/(x - 1) = 0"), expected(&["-1"]));
        assert_eq!(solved("(x^2 - 4)/(x - 2) = 0"), expected(&["-2"]));
        assert_eq!(solved("x^2/x = 0"), Vec::<String>::new());
    }

    #[test]
    fn degenerate_substitutions() {
        let equation = parse("(x^2 - 1)/(x - 1)").unwrap();
        assert!(!verify(&equation, "x", &Expr::int(-1)));
        assert!(verify(&equation, "x", &Expr::int(3)) && !verify(&equation, "x", &Expr::one()));
        assert!(!verify(&equation, "x", &(Expr::one() / Expr::zero())));
        assert!(!verify(&equation, "x", &Expr::symbol("x")));
    }

    #[test]
    fn variable_absent() {
        assert_eq!(solved("y + 1 = 2"), Vec::<String>::new());
        assert_eq!(solved("2 = 2"), Vec::<String>::new());
    }

    #[test]
    fn unsolvable() {
        assert_eq!(solved("sin(x) = x"), Vec::<String>::new());
    }

    #[test]
    fn solutions_satisfy_the_equation() {
        for input in ["x^2 + x = 2", "2*x + 3 = 7", "x^3 - 6*x^2 + 11*x - 6 = 0"] {
            let expr = parse(input).unwrap();
            let (lhs, rhs) = expr.as_binary(BinOp::Equals).unwrap();
            for solution in solve(&expr, "x") {
                let x = Expr::symbol("x");
                let lhs = simplify(&substitute(lhs, &x, &solution)).unwrap();
                let rhs = simplify(&substitute(rhs, &x, &solution)).unwrap();
                assert_eq!(canonical_string(&lhs), canonical_string(&rhs));
            }
        }
    }
}
