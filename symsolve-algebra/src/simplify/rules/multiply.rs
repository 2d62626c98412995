//! Simplification rules for products.

use crate::{
    canonical::equivalent,
    expr::{BinOp, Expr},
    simplify::step::Step,
    step_collector::StepCollector,
};
use super::{base_exponent, do_binary, make_power};

/// `2*3 = 6`
/// `2/3*3/4 = 1/2`
/// `0.5*3 = 1.5`
pub fn multiply_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Multiply, |lhs, rhs| {
        if lhs.is_decimal() || rhs.is_decimal() {
            return Expr::from_float(lhs.as_float()? * rhs.as_float()?);
        }

        Some(Expr::from_rational(&(lhs.as_rational()? * rhs.as_rational()?)))
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Adds the exponents of two factors with the same base. A reciprocal `1/x` counts as `x^(-1)`.
///
/// `x*x = x^2`
/// `x^a*x^b = x^(a+b)`
/// `x*(1/x) = 1`
///
/// Bases that may be zero, like `1-1`, are left alone.
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Multiply, |lhs, rhs| {
        let (lhs_base, lhs_exp) = base_exponent(lhs);
        let (rhs_base, rhs_exp) = base_exponent(rhs);
        if !lhs_base.can_cancel() || !equivalent(&lhs_base, &rhs_base) {
            return None;
        }

        let exp = match (lhs_exp.as_rational(), rhs_exp.as_rational()) {
            (Some(lhs), Some(rhs)) => Expr::from_rational(&(lhs + rhs)),
            _ => lhs_exp + rhs_exp,
        };
        Some(make_power(lhs_base, exp))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply_numbers(expr, step_collector)
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn apply(input: &str) -> Option<String> {
        all(&parse(input).unwrap(), &mut ()).map(|expr| expr.to_string())
    }

    #[test]
    fn numbers() {
        assert_eq!(apply("2 * 3"), Some("6".to_string()));
        assert_eq!(apply("3 * (1/4)"), Some("(3/4)".to_string()));
        assert_eq!(apply("(2/3) * (3/4)"), Some("(1/2)".to_string()));
        assert_eq!(apply("0.5 * 3"), Some("1.5".to_string()));
    }

    #[test]
    fn like_factors() {
        assert_eq!(apply("x * x"), Some("(x^2)".to_string()));
        assert_eq!(apply("x^2 * x^3"), Some("(x^5)".to_string()));
        assert_eq!(apply("x * (1/x)"), Some("1".to_string()));
        assert_eq!(apply("(1/x) * (1/x)"), Some("(1/(x^2))".to_string()));
        assert_eq!(apply("e^a * e^b"), Some("(e^(a+b))".to_string()));
    }

    #[test]
    fn unlike_factors() {
        assert_eq!(apply("x * y"), None);
        assert_eq!(apply("2 * x"), None);
        assert_eq!(apply("(1-1) * (1/(1-1))"), None);
    }
}
