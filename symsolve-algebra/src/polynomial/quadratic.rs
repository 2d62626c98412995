//! Completing the square.

use crate::{
    canonical::equivalent,
    collect::collect,
    error::Error,
    expand::expand,
    expr::{parse, Expr},
    simplify::simplify,
    substitution::substitute,
};
use log::debug;
use once_cell::sync::Lazy;
use super::Polynomial;

/// `x^2 + a*x`, with the square completed.
static COMPLETED_SQUARE: Lazy<Option<Expr>> = Lazy::new(|| parse("(_x + _a/2)^2 - (_a/2)^2").ok());

/// Rewrites a quadratic as `(v + a/2)^2 - (a/2)^2 + c`, where `v` is the polynomial's variable and
/// the polynomial has been divided by its leading coefficient. The result has a single occurrence
/// of `v`, so it can be solved by inverting each operation in turn.
///
/// Returns [`None`] if the polynomial is not a quadratic, or if the rewritten expression does not
/// expand back to the polynomial.
pub fn complete_square(poly: &Polynomial) -> Result<Option<Expr>, Error> {
    if !poly.is_valid() || poly.degree() != 2 || poly.lowest_degree() < 0 {
        return Ok(None);
    }
    let (Some(variable), Some(template)) = (poly.variable(), COMPLETED_SQUARE.as_ref()) else {
        return Ok(None);
    };

    let monic = poly.divide(&poly.coefficient(2))?;
    let square = substitute(template, &Expr::symbol("_a"), &monic.coefficient(1));
    let square = substitute(&square, &Expr::symbol("_x"), variable);
    let result = square + monic.coefficient(0);

    let name = poly.variable_name();
    let expected = simplify(&monic.expression())?;
    let found = simplify(&collect(&expand(&result, name)?, name))?;
    if !equivalent(&expected, &found) {
        debug!("completed square {} does not expand to {}", result, expected);
        return Ok(None);
    }

    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use crate::{parse, simplify::simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn completed(input: &str) -> Option<String> {
        let expr = simplify(&parse(input).unwrap()).unwrap();
        complete_square(&Polynomial::new(&expr, "x"))
            .unwrap()
            .map(|expr| simplify(&expr).unwrap().to_string())
    }

    #[test]
    fn monic() {
        let expected = simplify(&parse("(x + 1/2)^2 - 9/4").unwrap()).unwrap().to_string();
        assert_eq!(completed("x^2 + x - 2"), Some(expected));
    }

    #[test]
    fn leading_coefficient() {
        let expected = simplify(&parse("(x + 1)^2 - 4").unwrap()).unwrap().to_string();
        assert_eq!(completed("2x^2 + 4x - 6"), Some(expected));
    }

    #[test]
    fn not_quadratic() {
        assert_eq!(completed("x^3 + x"), None);
        assert_eq!(completed("x + 1"), None);
    }
}
