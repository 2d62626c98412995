//! Simplification rules for unary operators and the special functions.

use crate::{
    canonical::equivalent,
    expr::{BinOp, Expr, UnaryOp},
    simplify::step::Step,
    step_collector::StepCollector,
};
use rug::{Integer, Rational};
use super::do_unary;

/// The largest integer whose factorial is computed exactly.
const MAX_FACTORIAL: u32 = 1000;

/// `+a = a`
pub fn unary_plus(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Plus, |child| Some(child.clone()))?;
    step_collector.push(Step::UnaryPlus);
    Some(opt)
}

/// `-(3) = -3`
/// `-a = -1*a`
pub fn negate(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Minus, |child| {
        if child.is_decimal() {
            return Expr::from_float(-child.as_float()?);
        }

        match child.as_rational() {
            Some(value) => Some(Expr::from_rational(&-value)),
            None => Some(Expr::negate(child.clone())),
        }
    })?;
    step_collector.push(Step::Negate);
    Some(opt)
}

/// `4! = 24`
pub fn factorial(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Factorial, |child| {
        let n = child.as_integer()?.to_u32().filter(|n| *n <= MAX_FACTORIAL)?;
        Some(Expr::from_integer(&Integer::from(Integer::factorial(n))))
    })?;
    step_collector.push(Step::EvaluateFactorial);
    Some(opt)
}

/// `InverseFactorial(24) = 4`
pub fn inverse_factorial(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::InverseFactorial, |child| {
        let target = child.as_integer().filter(|value| *value >= 1)?;
        let mut product = Integer::from(1);
        let mut n = 1u32;
        while product < target {
            n += 1;
            product *= n;
        }
        (product == target).then(|| Expr::int(i64::from(n)))
    })?;
    step_collector.push(Step::EvaluateInverseFactorial);
    Some(opt)
}

/// `W(0) = 0`
/// `W(e) = 1`
/// `W(a*e^a) = a`, for a rational `a >= -1`
pub fn lambert_w(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::LambertW, |child| {
        if child.is_zero() {
            return Some(Expr::zero());
        } else if child.is_named("e") {
            return Some(Expr::one());
        }

        let (lhs, rhs) = child.as_binary(BinOp::Multiply)?;
        [(lhs, rhs), (rhs, lhs)].into_iter().find_map(|(coefficient, power)| {
            let (base, exp) = power.as_binary(BinOp::Exponentiate)?;
            let value = coefficient.as_rational()?;
            let applies = base.is_named("e")
                && value >= Rational::from(-1)
                && equivalent(coefficient, exp);
            applies.then(|| coefficient.clone())
        })
    })?;
    step_collector.push(Step::EvaluateLambertW);
    Some(opt)
}

/// Applies all unary rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    unary_plus(expr, step_collector)
        .or_else(|| negate(expr, step_collector))
        .or_else(|| factorial(expr, step_collector))
        .or_else(|| inverse_factorial(expr, step_collector))
        .or_else(|| lambert_w(expr, step_collector))
}
