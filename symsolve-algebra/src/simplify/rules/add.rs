//! Simplification rules for sums and differences.

use crate::{
    canonical::equivalent,
    expr::{BinOp, Expr},
    simplify::step::Step,
    step_collector::StepCollector,
    terms::{factors, list_product},
};
use rug::Rational;

/// If the expression is a sum or a difference, calls the given transformation function with its
/// operands and `true` if the right operand is subtracted.
fn do_sum(expr: &Expr, f: impl Fn(&Expr, &Expr, bool) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Binary(BinOp::Add, lhs, rhs) => f(lhs, rhs, false),
        Expr::Binary(BinOp::Subtract, lhs, rhs) => f(lhs, rhs, true),
        _ => None,
    }
}

/// `lhs + rhs`, or `lhs - rhs` if `negative` is true.
fn combine(lhs: Expr, rhs: Expr, negative: bool) -> Expr {
    if negative {
        lhs - rhs
    } else {
        lhs + rhs
    }
}

/// If the expression is a quotient with a non-numeric denominator, returns the numerator and
/// denominator.
fn as_symbolic_fraction(expr: &Expr) -> Option<(&Expr, &Expr)> {
    expr.as_binary(BinOp::Divide)
        .filter(|(_, den)| den.as_rational().is_none() && !den.is_decimal())
}

/// `2+3 = 5`
/// `1/2-1/3 = 1/6`
/// `0.5+1/4 = 0.75`
pub fn add_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |lhs, rhs, negative| {
        if lhs.is_decimal() || rhs.is_decimal() {
            let (lhs, rhs) = (lhs.as_float()?, rhs.as_float()?);
            return Expr::from_float(if negative { lhs - rhs } else { lhs + rhs });
        }

        let (lhs, rhs) = (lhs.as_rational()?, rhs.as_rational()?);
        Some(Expr::from_rational(&if negative { lhs - rhs } else { lhs + rhs }))
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// `a+(-1)*a = 0`
/// `(-1)*a+a = 0`
pub fn additive_inverse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |lhs, rhs, negative| {
        if negative {
            return None;
        }

        let cancels = rhs.as_negation().is_some_and(|rhs| equivalent(lhs, rhs))
            || lhs.as_negation().is_some_and(|lhs| equivalent(lhs, rhs));
        cancels.then(Expr::zero)
    })?;

    step_collector.push(Step::AdditiveInverse);
    Some(opt)
}

/// Splits a term into its rational coefficient and the product of its other factors. Returns
/// [`None`] if every factor is a number.
fn split_coefficient(term: &Expr) -> Option<(Rational, Expr)> {
    let mut coefficient = Rational::from(1);
    let mut rest = Vec::new();
    for factor in factors(term, 0) {
        if let Some(value) = factor.as_rational() {
            coefficient *= value;
        } else if let Some(value) = factor.as_reciprocal()
            .and_then(Expr::as_rational)
            .filter(|value| *value != 0)
        {
            coefficient /= value;
        } else {
            rest.push(factor);
        }
    }

    if rest.is_empty() {
        return None;
    }
    Some((coefficient, list_product(rest)))
}

/// Adds the coefficients of two terms that differ only in a rational coefficient.
///
/// `2x+3x = 5x`
/// `x*y/4-y*x/4 = 0`
pub fn like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |lhs, rhs, negative| {
        let (a, lhs_rest) = split_coefficient(lhs)?;
        let (b, rhs_rest) = split_coefficient(rhs)?;
        if !equivalent(&lhs_rest, &rhs_rest) {
            return None;
        }

        let sum = if negative { a - b } else { a + b };
        Some(if sum == 0 {
            Expr::zero()
        } else if sum == 1 {
            lhs_rest
        } else {
            Expr::from_rational(&sum) * lhs_rest
        })
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Adds fractions with a non-numeric denominator over a common denominator. Sums of numeric
/// fractions are left to [`add_numbers`].
///
/// `a/b+c/b = (a+c)/b`
/// `a/b+c/d = (a*d+c*b)/(b*d)`
/// `a/b+c = (a+c*b)/b`
/// `a+c/d = (a*d+c)/d`
pub fn fraction_sum(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |lhs, rhs, negative| {
        match (as_symbolic_fraction(lhs), as_symbolic_fraction(rhs)) {
            (Some((a, b)), Some((c, d))) if equivalent(b, d) => {
                Some(combine(a.clone(), c.clone(), negative) / b.clone())
            },
            (Some((a, b)), Some((c, d))) => Some(
                combine(a.clone() * d.clone(), c.clone() * b.clone(), negative)
                    / (b.clone() * d.clone())
            ),
            (Some((a, b)), None) => Some(
                combine(a.clone(), rhs.clone() * b.clone(), negative) / b.clone()
            ),
            (None, Some((c, d))) => Some(
                combine(lhs.clone() * d.clone(), c.clone(), negative) / d.clone()
            ),
            (None, None) => None,
        }
    })?;

    step_collector.push(Step::FractionSum);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add_numbers(expr, step_collector)
        .or_else(|| additive_inverse(expr, step_collector))
        .or_else(|| like_terms(expr, step_collector))
        .or_else(|| fraction_sum(expr, step_collector))
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
    fn integers() {
        assert_eq!(apply("2 + 3"), Some("5".to_string()));
        assert_eq!(apply("2 - 3"), Some("(-1)".to_string()));
    }

    #[test]
    fn rationals() {
        assert_eq!(apply("3/4 + 4/3"), Some("(25/12)".to_string()));
        assert_eq!(apply("1/2 - 1/2"), Some("0".to_string()));
    }

    #[test]
    fn decimals() {
        assert_eq!(apply("0.5 + 1/4"), Some("0.75".to_string()));
        assert_eq!(apply("1.5 + 1.5"), Some("3".to_string()));
    }

    #[test]
    fn inverse() {
        assert_eq!(apply("x*y + -(y*x)"), Some("0".to_string()));
        assert_eq!(apply("-x + x"), Some("0".to_string()));
        assert_eq!(apply("x - -x"), None);

        let negated = Expr::symbol("x") + Expr::negate(Expr::symbol("x"));
        assert_eq!(all(&negated, &mut ()), Some(Expr::zero()));
    }

    #[test]
    fn like() {
        assert_eq!(apply("2x + 3x"), Some("(5*x)".to_string()));
        assert_eq!(apply("x + x"), Some("(2*x)".to_string()));
        assert_eq!(apply("3*x*y - 2*y*x"), Some("(x*y)".to_string()));
        assert_eq!(apply("x*y/4 - y*x/4"), Some("0".to_string()));
        assert_eq!(apply("2x + 3y"), None);
    }

    #[test]
    fn fractions() {
        assert_eq!(apply("1/x + x"), Some("((1+(x*x))/x)".to_string()));
        assert_eq!(apply("a/x - b/x"), Some("((a-b)/x)".to_string()));
        assert_eq!(apply("a/x + b/y"), Some("(((a*y)+(b*x))/(x*y))".to_string()));
        assert_eq!(apply("x/2 + y/3"), None);
    }
}
