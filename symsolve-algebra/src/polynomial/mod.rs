//! Polynomials in a single variable, read off the terms of an expression.
//!
//! A [`Polynomial`] is built from an expression and the name of the variable to solve for. The
//! "variable" of the polynomial is the base that every term's variable-bearing factors are powers
//! of. It is usually the symbol itself, but may be any expression containing it: `e^(2x) + e^x`
//! is a quadratic in `e^x`.

pub mod cubic;
pub mod quadratic;

use crate::{
    canonical::equivalent,
    error::Error,
    expr::{BinOp, Expr},
    simplify::simplify,
    terms::{factors, list_product, list_sum, terms},
};
use std::collections::BTreeMap;

/// Splits a variable-bearing factor into its base and integer exponent.
///
/// Integer factors of a symbolic exponent are pulled out, so `e^(2x)` is `(e^x, 2)`. A reciprocal
/// negates the exponent.
fn split_factor(factor: &Expr) -> (Expr, i64) {
    if let Some(den) = factor.as_reciprocal() {
        let (base, exp) = split_factor(den);
        return match exp.checked_neg() {
            Some(exp) => (base, exp),
            None => (factor.clone(), 1),
        };
    }

    if let Some((base, exp)) = factor.as_binary(BinOp::Exponentiate) {
        if let Some(n) = exp.as_i64() {
            return (base.clone(), n);
        }

        let (integers, rest): (Vec<_>, Vec<_>) = factors(exp, 0)
            .into_iter()
            .partition(|factor| factor.as_i64().is_some());
        let multiple = integers.iter()
            .filter_map(Expr::as_i64)
            .try_fold(1i64, i64::checked_mul);
        if let Some(multiple) = multiple.filter(|n| *n != 1) {
            if !rest.is_empty() {
                return (Expr::pow(base.clone(), list_product(rest)), multiple);
            }
        }
    }

    (factor.clone(), 1)
}

/// A polynomial in a single variable, with symbolic coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// The name of the symbol being solved for.
    variable_name: String,

    /// The base every variable-bearing factor is a power of. [`None`] if no term contains the
    /// variable.
    variable: Option<Expr>,

    /// The coefficient of each degree. Degrees may be negative.
    coefficients: BTreeMap<i64, Expr>,

    /// Whether every term of the expression could be read as a power of the same base.
    valid: bool,
}

impl Polynomial {
    /// Reads a polynomial in `variable_name` off the terms of the expression.
    ///
    /// If two terms have variable-bearing factors with different bases, like `x + e^x`, the
    /// polynomial is not [valid](Self::is_valid).
    pub fn new(expr: &Expr, variable_name: &str) -> Self {
        let mut poly = Self {
            variable_name: variable_name.to_string(),
            variable: None,
            coefficients: BTreeMap::new(),
            valid: true,
        };

        for term in terms(expr) {
            match poly.split_term(&term) {
                Some((degree, coefficient)) => poly.add(degree, coefficient),
                None => {
                    poly.valid = false;
                    break;
                },
            }
        }

        poly
    }

    /// Splits a term into its degree and coefficient, or returns [`None`] if its variable-bearing
    /// factors are not powers of the polynomial's variable.
    fn split_term(&mut self, term: &Expr) -> Option<(i64, Expr)> {
        let (owned, rest): (Vec<_>, Vec<_>) = factors(term, 0)
            .into_iter()
            .partition(|factor| factor.contains(&self.variable_name));

        let mut degree = 0i64;
        for factor in owned {
            let (base, exp) = split_factor(&factor);
            match &self.variable {
                Some(variable) if !equivalent(variable, &base) => return None,
                Some(_) => (),
                None => self.variable = Some(base),
            }
            degree = degree.checked_add(exp)?;
        }

        Some((degree, list_product(rest)))
    }

    /// Adds a coefficient to the given degree.
    pub fn add(&mut self, degree: i64, coefficient: Expr) {
        let entry = match self.coefficients.remove(&degree) {
            Some(existing) => existing + coefficient,
            None => coefficient,
        };
        self.coefficients.insert(degree, entry);
    }

    /// Returns true if every term of the expression was a power of the same base.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The name of the symbol being solved for.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// The base every variable-bearing factor is a power of.
    pub fn variable(&self) -> Option<&Expr> {
        self.variable.as_ref()
    }

    /// Iterates over the degrees with a coefficient that is not literally zero.
    fn degrees(&self) -> impl Iterator<Item = i64> + '_ {
        self.coefficients.iter()
            .filter(|(_, coefficient)| !coefficient.is_zero())
            .map(|(degree, _)| *degree)
    }

    /// The highest degree with a non-zero coefficient, or `0`.
    pub fn degree(&self) -> i64 {
        self.degrees().max().unwrap_or(0)
    }

    /// The lowest degree with a non-zero coefficient, or `0`.
    pub fn lowest_degree(&self) -> i64 {
        self.degrees().min().unwrap_or(0)
    }

    /// The coefficient of the given degree, `0` if there is none.
    pub fn coefficient(&self, degree: i64) -> Expr {
        self.coefficients.get(&degree)
            .cloned()
            .unwrap_or_else(Expr::zero)
    }

    /// Divides every coefficient by `divisor`, simplifying the results.
    pub fn divide(&self, divisor: &Expr) -> Result<Self, Error> {
        let coefficients = self.coefficients.iter()
            .map(|(degree, coefficient)| {
                let quotient = simplify(&(coefficient.clone() / divisor.clone()))?;
                Ok((*degree, quotient))
            })
            .collect::<Result<_, Error>>()?;
        Ok(Self { coefficients, ..self.clone() })
    }

    /// Rebuilds the polynomial as an expression, highest degree first.
    pub fn expression(&self) -> Expr {
        let terms = self.coefficients.iter()
            .rev()
            .map(|(degree, coefficient)| match (&self.variable, *degree) {
                (_, 0) | (None, _) => coefficient.clone(),
                (Some(variable), 1) => coefficient.clone() * variable.clone(),
                (Some(variable), degree) => {
                    coefficient.clone() * Expr::pow(variable.clone(), Expr::int(degree))
                },
            })
            .collect();
        list_sum(terms)
    }

    /// Divides every degree by their greatest common divisor, raising the variable to that power.
    ///
    /// `x^6 + 2x^3 + 1` is compressed to `(x^3)^2 + 2(x^3) + 1`.
    pub fn compress(&self) -> Self {
        let gcd = self.degrees()
            .filter(|degree| *degree != 0)
            .fold(0, |acc, degree| gcd(acc, degree.abs()));
        let Some(variable) = self.variable.as_ref().filter(|_| gcd > 1) else {
            return self.clone();
        };

        Self {
            variable: Some(Expr::pow(variable.clone(), Expr::int(gcd))),
            coefficients: self.coefficients.iter()
                .filter(|(degree, coefficient)| **degree == 0 || !coefficient.is_zero())
                .map(|(degree, coefficient)| (degree / gcd, coefficient.clone()))
                .collect(),
            ..self.clone()
        }
    }

    /// Divides the polynomial by the variable raised to the lowest degree.
    ///
    /// `x^3 + 2x` is lowered to `x^2 + 2`.
    pub fn lower(&self) -> Self {
        let lowest = self.lowest_degree();
        if lowest == 0 {
            return self.clone();
        }

        Self {
            coefficients: self.coefficients.iter()
                .filter(|(_, coefficient)| !coefficient.is_zero())
                .map(|(degree, coefficient)| (degree - lowest, coefficient.clone()))
                .collect(),
            ..self.clone()
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use crate::{canonical::equivalent, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(input: &str) -> Polynomial {
        Polynomial::new(&parse(input).unwrap(), "x")
    }

    #[test]
    fn quadratic() {
        let p = poly("3x^2 + 2x - 1");
        assert!(p.is_valid());
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coefficient(2).to_string(), "3");
        assert_eq!(p.coefficient(1).to_string(), "2");
        assert_eq!(p.coefficient(0).to_string(), "((-1)*1)");
        assert_eq!(p.variable(), Some(&Expr::symbol("x")));
    }

    #[test]
    fn symbolic_coefficients() {
        let p = poly("a*x^2 + b*x + x*c");
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coefficient(1).to_string(), "(b+c)");
        assert_eq!(p.coefficient(0).to_string(), "0");
    }

    #[test]
    fn exponential_base() {
        let p = poly("e^(2x) - 3e^x + 2");
        assert!(p.is_valid());
        assert_eq!(p.degree(), 2);
        assert_eq!(p.variable().unwrap().to_string(), "(e^x)");
    }

    #[test]
    fn mixed_bases_are_invalid() {
        assert!(!poly("x + e^x").is_valid());
        assert!(!poly("x*sin(x) + 1").is_valid());
    }

    #[test]
    fn reciprocal_degrees() {
        let p = poly("x + 1/x");
        assert_eq!(p.lowest_degree(), -1);
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn unrepresentable_degree_is_opaque() {
        let factor = Expr::recip(Expr::pow(Expr::symbol("x"), Expr::int(i64::MIN)));
        let p = Polynomial::new(&factor, "x");
        assert!(p.is_valid());
        assert_eq!(p.degree(), 1);
        assert_eq!(p.variable(), Some(&factor));
    }

    #[test]
    fn rebuild() {
        let p = poly("2x^3 + x - 5");
        assert!(equivalent(&p.expression(), &parse("2*x^3 + 1*x + (-1)*5").unwrap()));
    }

    #[test]
    fn divide() {
        let p = poly("2x^2 + 4x + 6").divide(&Expr::int(2)).unwrap();
        assert_eq!(p.coefficient(2).to_string(), "1");
        assert_eq!(p.coefficient(1).to_string(), "2");
        assert_eq!(p.coefficient(0).to_string(), "3");
    }

    #[test]
    fn compress_and_lower() {
        let p = poly("x^6 + 2x^3 + 1").compress();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.variable().unwrap().to_string(), "(x^3)");

        let p = poly("x^3 + 2x").lower();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.lowest_degree(), 0);
        assert_eq!(p.coefficient(0).to_string(), "2");
    }
}
