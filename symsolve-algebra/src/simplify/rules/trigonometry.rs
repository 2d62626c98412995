//! Exact and numeric values of the sine and cosine.

use crate::{
    expr::{Expr, UnaryOp},
    simplify::step::Step,
    step_collector::StepCollector,
    terms::{factors, terms},
};
use once_cell::sync::Lazy;
use rug::Rational;
use super::do_unary;

/// Exact values of `sin(r*pi)` for `r` in the first quadrant.
static FIRST_QUADRANT: Lazy<Vec<(Rational, Expr)>> = Lazy::new(|| {
    let half = || Expr::recip(Expr::int(2));
    vec![
        (Rational::from(0), Expr::zero()),
        (Rational::from((1, 6)), half()),
        (Rational::from((1, 4)), Expr::pow(Expr::int(2), half()) / Expr::int(2)),
        (Rational::from((1, 3)), Expr::pow(Expr::int(3), half()) / Expr::int(2)),
        (Rational::from((1, 2)), Expr::one()),
    ]
});

/// If the expression is a rational multiple of `pi`, returns the multiple.
///
/// The expression must be a single term with exactly one factor of `pi`, and every other factor
/// must be rational. `0` is the zero multiple.
fn as_pi_multiple(expr: &Expr) -> Option<Rational> {
    if expr.is_zero() {
        return Some(Rational::new());
    }
    if terms(expr).len() != 1 {
        return None;
    }

    let mut seen_pi = false;
    let mut multiple = Rational::from(1);
    for factor in factors(expr, 0) {
        if factor.is_named("pi") && !seen_pi {
            seen_pi = true;
        } else if let Some(den) = factor.as_reciprocal().and_then(Expr::as_rational) {
            if den == 0 {
                return None;
            }
            multiple /= den;
        } else {
            multiple *= factor.as_rational()?;
        }
    }

    seen_pi.then_some(multiple)
}

/// Returns the exact value of `sin(r*pi)`, if it is in the table.
fn exact_sine(multiple: Rational) -> Option<Expr> {
    // reduce into [0, 2)
    let two = Rational::from(2);
    let turns = (multiple.clone() / &two).floor();
    let mut r = multiple - two * turns;

    // sin(x) = -sin(x - pi) for x in [pi, 2pi)
    let negative = r >= 1;
    if negative {
        r -= 1;
    }
    // sin(x) = sin(pi - x) for x in (pi/2, pi)
    if r > Rational::from((1, 2)) {
        r = Rational::from(1) - r;
    }

    let (_, value) = FIRST_QUADRANT.iter().find(|(key, _)| *key == r)?;
    Some(if negative && !value.is_zero() {
        Expr::negate(value.clone())
    } else {
        value.clone()
    })
}

/// `sin(pi/6) = 1/2`
/// `cos(pi) = -1`
pub fn trigonometric_value(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Sine, |arg| exact_sine(as_pi_multiple(arg)?))
        .or_else(|| do_unary(expr, UnaryOp::Cosine, |arg| {
            // cos(x) = sin(x + pi/2)
            exact_sine(as_pi_multiple(arg)? + Rational::from((1, 2)))
        }))?;
    step_collector.push(Step::TrigonometricValue);
    Some(opt)
}

/// `sin(1) = 0.8414709848078965`
pub fn evaluate_trigonometric(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Sine, |arg| Expr::from_float(arg.as_float()?.sin()))
        .or_else(|| do_unary(expr, UnaryOp::Cosine, |arg| Expr::from_float(arg.as_float()?.cos())))?;
    step_collector.push(Step::EvaluateTrigonometric);
    Some(opt)
}

/// Applies all trigonometric rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    trigonometric_value(expr, step_collector)
        .or_else(|| evaluate_trigonometric(expr, step_collector))
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
    fn multiples_of_pi() {
        assert_eq!(as_pi_multiple(&parse("pi").unwrap()), Some(Rational::from(1)));
        assert_eq!(as_pi_multiple(&parse("2pi/3").unwrap()), Some(Rational::from((2, 3))));
        assert_eq!(as_pi_multiple(&parse("0").unwrap()), Some(Rational::new()));
        assert_eq!(as_pi_multiple(&parse("pi*pi").unwrap()), None);
        assert_eq!(as_pi_multiple(&parse("x*pi").unwrap()), None);
        assert_eq!(as_pi_multiple(&parse("pi + 1").unwrap()), None);
    }

    #[test]
    fn exact_values() {
        assert_eq!(apply("sin(0)"), Some("0".to_string()));
        assert_eq!(apply("sin(pi)"), Some("0".to_string()));
        assert_eq!(apply("sin(pi/6)"), Some("(1/2)".to_string()));
        assert_eq!(apply("sin(5pi/6)"), Some("(1/2)".to_string()));
        assert_eq!(apply("sin(3pi/2)"), Some("((-1)*1)".to_string()));
        assert_eq!(apply("cos(pi)"), Some("((-1)*1)".to_string()));
        assert_eq!(apply("cos(pi/2)"), Some("0".to_string()));
        assert_eq!(apply("cos(2pi)"), Some("1".to_string()));
        assert_eq!(apply("cos(pi/4)"), Some("((2^(1/2))/2)".to_string()));
    }

    #[test]
    fn numeric_values() {
        assert!(apply("sin(1)").is_some_and(|value| value.starts_with("0.84")));
        assert_eq!(apply("cos(0.0)"), Some("1".to_string()));
    }

    #[test]
    fn symbolic_arguments() {
        assert_eq!(apply("sin(x)"), None);
        assert_eq!(apply("cos(pi/5)"), None);
    }
}
