//! Simplification rules for logarithms.

use crate::{
    canonical::equivalent,
    expr::{BinOp, Expr},
    simplify::step::Step,
    step_collector::StepCollector,
};
use rug::{ops::Pow, Rational};
use super::do_binary;

/// The largest integer `k` tried when looking for an exact logarithm `b^k = a`.
const MAX_EXACT_EXPONENT: i32 = 64;

/// `log_b(1) = 0`
pub fn log_of_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Logarithm, |_, arg| arg.is_one().then(Expr::zero))?;
    step_collector.push(Step::LogarithmOfOne);
    Some(opt)
}

/// `log_b(b) = 1`
pub fn log_of_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Logarithm, |base, arg| {
        equivalent(base, arg).then(Expr::one)
    })?;
    step_collector.push(Step::LogarithmOfBase);
    Some(opt)
}

/// `log_b(b^y) = y`
pub fn log_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Logarithm, |base, arg| {
        let (arg_base, exp) = arg.as_binary(BinOp::Exponentiate)?;
        equivalent(base, arg_base).then(|| exp.clone())
    })?;
    step_collector.push(Step::LogarithmOfPower);
    Some(opt)
}

/// Evaluates logarithms of positive numbers to a positive base other than `1`. The result is exact
/// if the argument is an integer power of the base.
///
/// `log_2(8) = 3`
/// `log_2(1/4) = -2`
/// `log_2(3) = 1.584962500721156`
pub fn evaluate_log(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Logarithm, |base, arg| {
        let base_value = base.as_float().filter(|value| *value > 0.0 && *value != 1.0)?;
        let arg_value = arg.as_float().filter(|value| *value > 0.0)?;

        if let (Some(base), Some(arg)) = (base.as_rational(), arg.as_rational()) {
            let exact = (-MAX_EXACT_EXPONENT..=MAX_EXACT_EXPONENT)
                .find(|k| base.clone().pow(*k) == arg);
            if let Some(k) = exact {
                return Some(Expr::from_rational(&Rational::from(k)));
            }
        }

        Expr::from_float(arg_value.ln() / base_value.ln())
    })?;
    step_collector.push(Step::EvaluateLogarithm);
    Some(opt)
}

/// Applies all logarithm rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    log_of_one(expr, step_collector)
        .or_else(|| log_of_base(expr, step_collector))
        .or_else(|| log_of_power(expr, step_collector))
        .or_else(|| evaluate_log(expr, step_collector))
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
    fn symbolic() {
        assert_eq!(apply("log(x, 1)"), Some("0".to_string()));
        assert_eq!(apply("ln(e)"), Some("1".to_string()));
        assert_eq!(apply("log(x + 1, 1 + x)"), Some("1".to_string()));
        assert_eq!(apply("ln(e^(2y))"), Some("(2*y)".to_string()));
        assert_eq!(apply("log(x, y)"), None);
    }

    #[test]
    fn numeric() {
        assert_eq!(apply("log(2, 8)"), Some("3".to_string()));
        assert_eq!(apply("log(2, 1/4)"), Some("(-2)".to_string()));
        assert_eq!(apply("log(10, 1000)"), Some("3".to_string()));
        assert!(apply("log(2, 3)").is_some_and(|value| value.starts_with("1.58")));
    }

    #[test]
    fn undefined() {
        assert_eq!(apply("log(1, 5)"), None);
        assert_eq!(apply("log(2, 0)"), None);
    }
}
