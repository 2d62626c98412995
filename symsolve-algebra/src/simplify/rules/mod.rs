//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the rewritten expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given and its children; the
//! simplifier is responsible for applying them throughout the tree.

pub mod add;
pub mod divide;
pub mod logarithm;
pub mod multiply;
pub mod power;
pub mod trigonometry;
pub mod unary;

use crate::{expr::{BinOp, Expr, UnaryOp}, step_collector::StepCollector};
use super::step::Step;

/// If the expression is a binary operation with the given operator, calls the given
/// transformation function with its operands.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOp,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    let (lhs, rhs) = expr.as_binary(op)?;
    f(lhs, rhs)
}

/// If the expression is a unary operation with the given operator, calls the given transformation
/// function with its operand.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_unary(
    expr: &Expr,
    op: UnaryOp,
    f: impl Fn(&Expr) -> Option<Expr>,
) -> Option<Expr> {
    f(expr.as_unary(op)?)
}

/// Returns the base and exponent of a factor: `b^n` is `(b, n)`, `1/f` is the base of `f` with
/// its exponent negated, and anything else is itself raised to `1`.
pub(crate) fn base_exponent(factor: &Expr) -> (Expr, Expr) {
    if let Some(den) = factor.as_reciprocal() {
        let (base, exp) = base_exponent(den);
        let exp = match exp.as_rational() {
            Some(value) => Expr::from_rational(&-value),
            None => Expr::negate(exp),
        };
        return (base, exp);
    }

    match factor.as_binary(BinOp::Exponentiate) {
        Some((base, exp)) => (base.clone(), exp.clone()),
        None => (factor.clone(), Expr::one()),
    }
}

/// Builds `base^exp`, writing exponents of `0`, `1` and negative rationals without a power.
pub(crate) fn make_power(base: Expr, exp: Expr) -> Expr {
    match exp.as_rational() {
        Some(value) if value == 0 => Expr::one(),
        Some(value) if value == 1 => base,
        Some(value) if value == -1 => Expr::recip(base),
        Some(value) if value < 0 => Expr::recip(Expr::pow(base, Expr::from_rational(&-value))),
        _ => Expr::pow(base, exp),
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| divide::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| logarithm::all(expr, step_collector))
        .or_else(|| unary::all(expr, step_collector))
        .or_else(|| trigonometry::all(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn split(input: &str) -> (String, String) {
        let (base, exp) = base_exponent(&parse(input).unwrap());
        (base.to_string(), exp.to_string())
    }

    #[test]
    fn factor_exponents() {
        assert_eq!(split("x^3"), ("x".to_string(), "3".to_string()));
        assert_eq!(split("1/x"), ("x".to_string(), "(-1)".to_string()));
        assert_eq!(split("1/x^y"), ("x".to_string(), "((-1)*y)".to_string()));
        assert_eq!(split("sin(x)"), ("(sin(x))".to_string(), "1".to_string()));
    }

    #[test]
    fn powers() {
        let x = Expr::symbol("x");
        assert_eq!(make_power(x.clone(), Expr::zero()), Expr::one());
        assert_eq!(make_power(x.clone(), Expr::one()), x);
        assert_eq!(make_power(x.clone(), Expr::int(-2)).to_string(), "(1/(x^2))");
        assert_eq!(make_power(x.clone(), Expr::symbol("y")).to_string(), "(x^y)");
    }
}
