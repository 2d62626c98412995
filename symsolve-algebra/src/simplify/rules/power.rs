//! Simplification rules for powers, including exact roots and powers of `i` and `e`.

use crate::{
    expr::{BinOp, Expr, UnaryOp},
    simplify::step::Step,
    step_collector::StepCollector,
    terms::{factors, list_product, terms},
};
use rug::{ops::Pow, Integer, Rational};
use super::do_binary;

/// The largest number of bits an exact power may have before it is left unevaluated.
const MAX_POWER_BITS: u64 = 1 << 16;

/// Raises a rational to an integer power, if the result is a reasonable size.
fn rational_pow(base: &Rational, exp: &Integer) -> Option<Rational> {
    let exp = exp.to_i32()?;
    let bits = u64::from(base.numer().significant_bits().max(base.denom().significant_bits()));
    if bits * u64::from(exp.unsigned_abs()) > MAX_POWER_BITS {
        return None;
    }
    if exp < 0 && *base == 0 {
        return None;
    }
    Some(base.clone().pow(exp))
}

/// If the integer is a perfect `n`-th power, returns its `n`-th root.
fn exact_root(value: &Integer, n: u32) -> Option<Integer> {
    let root = Integer::from(value.root_ref(n));
    (root.clone().pow(n) == *value).then_some(root)
}

/// `2^3 = 8`
/// `(2/3)^(-2) = 9/4`
/// `1.5^2 = 2.25`
pub fn power_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        if base.is_decimal() || exp.is_decimal() {
            return Expr::from_float(base.as_float()?.powf(exp.as_float()?));
        }

        let result = rational_pow(&base.as_rational()?, &exp.as_integer()?)?;
        Some(Expr::from_rational(&result))
    })?;

    step_collector.push(Step::PowerNumbers);
    Some(opt)
}

/// `(-1)^(1/2) = i`
pub fn sqrt_of_minus_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        let half = Rational::from((1, 2));
        (base.is_minus_one() && exp.as_rational() == Some(half)).then(|| Expr::symbol("i"))
    })?;

    step_collector.push(Step::SquareRootOfMinusOne);
    Some(opt)
}

/// Splits a negative number raised to a non-integer power.
///
/// `(-4)^(1/2) = (-1)^(1/2) * 4^(1/2)`
pub fn negative_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        let value = base.as_rational().filter(|value| *value < 0 && *value != -1)?;
        if exp.as_integer().is_some() {
            return None;
        }

        Some(
            Expr::pow(Expr::minus_one(), exp.clone())
                * Expr::pow(Expr::from_rational(&-value), exp.clone())
        )
    })?;

    step_collector.push(Step::NegativeBase);
    Some(opt)
}

/// Takes exact roots of positive rationals.
///
/// `8^(1/3) = 2`
/// `(9/4)^(1/2) = 3/2`
/// `4^(3/2) = 8`
/// `4^(-1/2) = 1/2`
pub fn exact_roots(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        let base = base.as_rational().filter(|value| *value >= 0)?;
        let exp = exp.as_rational()?;
        let root = exp.denom().to_u32().filter(|n| *n > 1)?;

        let power = rational_pow(&base, exp.numer())?;
        let num = exact_root(power.numer(), root)?;
        let den = exact_root(power.denom(), root)?;
        Some(Expr::from_rational(&Rational::from((num, den))))
    })?;

    step_collector.push(Step::ExactRoot);
    Some(opt)
}

/// `i^2 = -1`
/// `i^3 = -i`
/// `i^4 = 1`
pub fn power_of_i(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        if !base.is_named("i") {
            return None;
        }

        let i = Expr::symbol("i");
        Some(match exp.as_integer()?.mod_u(4) {
            0 => Expr::one(),
            1 => i,
            2 => Expr::minus_one(),
            _ => Expr::negate(i),
        })
    })?;

    step_collector.push(Step::PowerOfI);
    Some(opt)
}

/// Euler's formula, for an exponent with a single factor of `i`.
///
/// `e^(i*t) = cos(t) + i*sin(t)`
pub fn euler_formula(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        if !base.is_named("e") || terms(exp).len() != 1 {
            return None;
        }

        let mut factors = factors(exp, 0);
        let i = factors.iter().position(|factor| factor.is_named("i"))?;
        factors.remove(i);
        let theta = list_product(factors);
        if theta.contains("i") {
            return None;
        }

        Some(
            Expr::unary(UnaryOp::Cosine, theta.clone())
                + Expr::symbol("i") * Expr::unary(UnaryOp::Sine, theta)
        )
    })?;

    step_collector.push(Step::EulerFormula);
    Some(opt)
}

/// Distributes a power over a product with a numeric factor.
///
/// `(2x)^3 = 2^3 * x^3`
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        let factors = factors(base, 0);
        let coefficient = factors.iter()
            .filter_map(Expr::as_rational)
            .fold(Rational::from(1), |acc, value| acc * value);
        let has_numeric = factors.iter().any(|factor| factor.as_rational().is_some());
        let has_other = factors.iter().any(|factor| factor.as_rational().is_none());
        if !has_numeric || !has_other || coefficient == 1 {
            return None;
        }

        let powers = factors.into_iter()
            .map(|factor| Expr::pow(factor, exp.clone()))
            .collect();
        Some(list_product(powers))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Multiplies the exponents of a power raised to an integer power.
///
/// `(x^2)^3 = x^6`
/// `(x^(1/2))^2 = x`
pub fn power_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Exponentiate, |base, exp| {
        let outer = exp.as_integer()?;
        let (inner_base, inner_exp) = base.as_binary(BinOp::Exponentiate)?;

        let exp = match inner_exp.as_rational() {
            Some(inner) => Expr::from_rational(&(inner * outer)),
            None => inner_exp.clone() * Expr::from_integer(&outer),
        };
        Some(Expr::pow(inner_base.clone(), exp))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_numbers(expr, step_collector)
        .or_else(|| sqrt_of_minus_one(expr, step_collector))
        .or_else(|| negative_base(expr, step_collector))
        .or_else(|| exact_roots(expr, step_collector))
        .or_else(|| power_of_i(expr, step_collector))
        .or_else(|| euler_formula(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}
