//! Reducing cubics to quadratics.
//!
//! A cubic `x^3 + a*x^2 + b*x + c` is solved in two steps. The substitution `x = t - a/3` removes
//! the square term, leaving the depressed cubic `t^3 + p*t + q`. Vieta's substitution
//! `t = w - p/(3w)` then turns it into `w^3 + q - p^3/(27w^3) = 0`, which after multiplying
//! through by `w^3` is a quadratic in `w^3`.

use crate::{
    collect::collect,
    error::Error,
    expand::expand,
    expr::{parse, Expr},
    simplify::simplify,
    substitution::substitute,
};
use once_cell::sync::Lazy;
use super::Polynomial;

/// Vieta's substitution, `w - p/(3w)`.
static VIETA: Lazy<Option<Expr>> = Lazy::new(|| parse("_x - _p/(3*_x)").ok());

/// Expands, collects and simplifies. The expression is not simplified before it is expanded, since
/// the simplifier would combine the terms of the substitution into a single fraction.
fn rearrange(expr: &Expr, variable: &str) -> Result<Expr, Error> {
    let expr = expand(expr, variable)?;
    simplify(&collect(&expr, variable))
}

/// A cubic with the square term removed: the original variable is `t - shift`, where `t` is the
/// variable of [`Depressed::polynomial`].
#[derive(Debug, Clone)]
pub struct Depressed {
    pub polynomial: Polynomial,
    pub shift: Expr,
}

impl Depressed {
    /// Maps a root of the depressed cubic back to a root of the original cubic.
    pub fn restore(&self, root: Expr) -> Expr {
        root - self.shift.clone()
    }
}

/// Divides the cubic by its leading coefficient and substitutes `x = t - a/3`.
///
/// Returns [`None`] if the polynomial is not a cubic in the variable symbol itself.
pub fn depress(poly: &Polynomial) -> Result<Option<Depressed>, Error> {
    if !poly.is_valid() || poly.degree() != 3 || poly.lowest_degree() < 0 {
        return Ok(None);
    }
    let name = poly.variable_name();
    let Some(variable) = poly.variable().filter(|variable| variable.is_named(name)) else {
        return Ok(None);
    };

    let monic = poly.divide(&poly.coefficient(3))?;
    let shift = simplify(&(monic.coefficient(2) / Expr::int(3)))?;
    if shift.is_zero() {
        return Ok(Some(Depressed { polynomial: monic, shift }));
    }

    let shifted = substitute(&monic.expression(), variable, &(variable.clone() - shift.clone()));
    let polynomial = Polynomial::new(&rearrange(&shifted, name)?, name);
    if !polynomial.is_valid() || polynomial.degree() != 3 {
        return Ok(None);
    }

    Ok(Some(Depressed { polynomial, shift }))
}

/// A quadratic in `w^3`, from Vieta's substitution into a depressed cubic.
#[derive(Debug, Clone)]
pub struct Resolvent {
    pub polynomial: Polynomial,

    /// The coefficient `p` of the depressed cubic.
    pub p: Expr,
}

impl Resolvent {
    /// Maps a root `w` of the resolvent back to the root `w - p/(3w)` of the depressed cubic.
    pub fn restore(&self, w: Expr) -> Expr {
        w.clone() - self.p.clone() / (Expr::int(3) * w)
    }
}

/// Applies Vieta's substitution to a depressed cubic, returning the quadratic in `w^3` it turns
/// into.
pub fn vieta(depressed: &Polynomial) -> Result<Option<Resolvent>, Error> {
    let (Some(variable), Some(template)) = (depressed.variable(), VIETA.as_ref()) else {
        return Ok(None);
    };

    let name = depressed.variable_name();
    let p = depressed.coefficient(1);
    let substitution = substitute(template, &Expr::symbol("_p"), &p);
    let substitution = substitute(&substitution, &Expr::symbol("_x"), variable);

    let expr = substitute(&depressed.expression(), variable, &substitution)
        * Expr::pow(variable.clone(), Expr::int(3));
    let polynomial = Polynomial::new(&rearrange(&expr, name)?, name).compress();
    if !polynomial.is_valid() || polynomial.degree() != 2 || polynomial.lowest_degree() < 0 {
        return Ok(None);
    }

    Ok(Some(Resolvent { polynomial, p }))
}
