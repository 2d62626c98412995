//! Simplification rules for quotients.

use crate::{
    canonical::{canonical_string, equivalent},
    expr::{BinOp, Expr},
    simplify::step::Step,
    step_collector::StepCollector,
};
use super::{base_exponent, do_binary, make_power};

/// Reduces a quotient of numbers to lowest terms, with the sign in the numerator.
///
/// `6/4 = 3/2`
/// `3/(-6) = (-1)/2`
/// `(1/2)/3 = 1/6`
pub fn reduce_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Divide, |lhs, rhs| {
        if lhs.is_decimal() || rhs.is_decimal() {
            let rhs = rhs.as_float().filter(|rhs| *rhs != 0.0)?;
            return Expr::from_float(lhs.as_float()? / rhs);
        }

        let (lhs, rhs) = (lhs.as_rational()?, rhs.as_rational()?);
        if rhs == 0 {
            return None;
        }

        let reduced = Expr::from_rational(&(lhs / rhs));
        (canonical_string(&reduced) != canonical_string(expr)).then_some(reduced)
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Subtracts the exponents of a numerator and denominator with the same base.
///
/// `x^5/x^2 = x^3`
/// `x/x^3 = 1/x^2`
///
/// Bases that may be zero, like `1-1`, are left alone.
pub fn divide_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Divide, |lhs, rhs| {
        if lhs.is_one() {
            return None;
        }

        let (lhs_base, lhs_exp) = base_exponent(lhs);
        let (rhs_base, rhs_exp) = base_exponent(rhs);
        if !lhs_base.can_cancel() || !equivalent(&lhs_base, &rhs_base) {
            return None;
        }

        let exp = match (lhs_exp.as_rational(), rhs_exp.as_rational()) {
            (Some(lhs), Some(rhs)) => Expr::from_rational(&(lhs - rhs)),
            _ => lhs_exp - rhs_exp,
        };
        Some(make_power(lhs_base, exp))
    })?;

    step_collector.push(Step::DivideLikeFactors);
    Some(opt)
}

/// Applies all division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    reduce_fraction(expr, step_collector)
        .or_else(|| divide_like_factors(expr, step_collector))
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
        assert_eq!(apply("6 / 4"), Some("(3/2)".to_string()));
        assert_eq!(apply("8 / 4"), Some("2".to_string()));
        assert_eq!(apply("(1/2) / 3"), Some("(1/6)".to_string()));
        assert_eq!(apply("3 / 4"), None);
        assert_eq!(apply("1 / 0"), None);
        assert_eq!(apply("1.5 / 3"), Some("0.5".to_string()));
    }

    #[test]
    fn sign_moves_to_numerator() {
        let expr = Expr::int(3) / Expr::int(-6);
        assert_eq!(all(&expr, &mut ()).unwrap().to_string(), "((-1)/2)");
    }

    #[test]
    fn like_factors() {
        assert_eq!(apply("x^5 / x^2"), Some("(x^3)".to_string()));
        assert_eq!(apply("x / x^3"), Some("(1/(x^2))".to_string()));
        assert_eq!(apply("x / y"), None);
        assert_eq!(apply("1 / x"), None);
        assert_eq!(apply("(2-2)^3 / (2-2)"), None);
    }
}
