//! Closed forms with the Lambert W function.
//!
//! Two shapes of equation are recognized, where `c`, `k`, `a`, `s` and `b` do not contain the
//! variable:
//!
//! - `c*x + k*a^(s*x) = d`, solved by `x = d/c - W(k*L/c * e^(L*d/c))/L`
//! - `x * a^(s*x) = b`, solved by `x = W(b*L)/L`
//!
//! where `L = s*ln(a)`. Only the principal branch is used.

use crate::{
    expr::{BinOp, Expr, UnaryOp},
    terms::{factors, list_product, list_sum, terms},
};

/// An exponential factor `a^(s*x)`.
struct Exponential {
    base: Expr,
    scale: Expr,
}

impl Exponential {
    /// `L = s*ln(a)`
    fn rate(&self) -> Expr {
        self.scale.clone() * Expr::log(Expr::symbol("e"), self.base.clone())
    }
}

/// If the factor is `a^(s*x)` with `a` and `s` free of the variable, returns `a` and `s`.
fn as_exponential(factor: &Expr, variable: &str) -> Option<Exponential> {
    let (base, exp) = factor.as_binary(BinOp::Exponentiate)?;
    if base.contains(variable) {
        return None;
    }
    let scale = as_linear(exp, variable)?;
    Some(Exponential { base: base.clone(), scale })
}

/// If the term is `c*x` with `c` free of the variable, returns `c`.
fn as_linear(term: &Expr, variable: &str) -> Option<Expr> {
    let mut factors = factors(term, 0);
    let index = factors.iter().position(|factor| factor.is_named(variable))?;
    factors.remove(index);
    if factors.iter().any(|factor| factor.contains(variable)) {
        return None;
    }
    Some(list_product(factors))
}

/// If the term is `k*a^(s*x)`, returns `k` and the exponential.
fn as_scaled_exponential(term: &Expr, variable: &str) -> Option<(Expr, Exponential)> {
    let mut factors = factors(term, 0);
    let index = factors.iter().position(|factor| factor.contains(variable))?;
    let exponential = as_exponential(&factors.remove(index), variable)?;
    if factors.iter().any(|factor| factor.contains(variable)) {
        return None;
    }
    Some((list_product(factors), exponential))
}

/// If the term is `m*x*a^(s*x)`, returns `m` and the exponential.
fn as_product(term: &Expr, variable: &str) -> Option<(Expr, Exponential)> {
    let mut factors = factors(term, 0);
    let linear = factors.iter().position(|factor| factor.is_named(variable))?;
    factors.remove(linear);
    as_scaled_exponential(&list_product(factors), variable)
}

/// If the terms are `c*x` and `k*a^(s*x)`, returns `c`, `k` and the exponential.
fn as_linear_sum(linear: &Expr, exponential: &Expr, variable: &str) -> Option<(Expr, (Expr, Exponential))> {
    Some((as_linear(linear, variable)?, as_scaled_exponential(exponential, variable)?))
}

/// Solves `expr = 0` for `variable` if it has one of the shapes above.
pub fn solve(expr: &Expr, variable: &str) -> Option<Expr> {
    let (bearing, free): (Vec<_>, Vec<_>) = terms(expr)
        .into_iter()
        .partition(|term| term.contains(variable));
    let d = Expr::negate(list_sum(free));
    let e = || Expr::symbol("e");

    match bearing.as_slice() {
        [term] => {
            let (m, exponential) = as_product(term, variable)?;
            let rate = exponential.rate();
            let b = d / m;
            Some(Expr::unary(UnaryOp::LambertW, b * rate.clone()) / rate)
        },
        [first, second] => {
            let (c, (k, exponential)) = as_linear_sum(first, second, variable)
                .or_else(|| as_linear_sum(second, first, variable))?;

            let rate = exponential.rate();
            let shift = d / c.clone();
            let argument = k / c * rate.clone() * Expr::pow(e(), rate.clone() * shift.clone());
            Some(shift - Expr::unary(UnaryOp::LambertW, argument) / rate)
        },
        _ => None,
    }
}
