//! Distributing products over sums.

use crate::{
    error::Error,
    expr::{is_numeric_text, Expr},
    fixed_point::fixed_point,
    terms::{factors, list_product, list_sum, terms},
};

/// Integer powers below this limit are unrolled into repeated factors, so `(x+1)^2` is expanded
/// as `(x+1)*(x+1)`.
const EXPAND_LIMIT: i64 = 5;

/// Expands a single term, returning the terms it expands into.
fn expand_term(term: &Expr, variable: &str) -> Vec<Expr> {
    let mut factors = factors(term, EXPAND_LIMIT);
    let Some(index) = factors.iter()
        .position(|factor| factor.contains(variable) && terms(factor).len() > 1)
    else {
        return vec![term.clone()];
    };

    let sum = factors.remove(index);
    if factors.is_empty() {
        return terms(&sum)
            .iter()
            .flat_map(|term| expand_term(term, variable))
            .collect();
    }

    let coefficient = list_product(factors);
    let (bearing, free): (Vec<_>, Vec<_>) = terms(&sum)
        .into_iter()
        .partition(|term| term.contains(variable));

    let mut out = bearing.into_iter()
        .map(|term| coefficient.clone() * term)
        .collect::<Vec<_>>();
    if !free.is_empty() {
        out.push(coefficient * list_sum(free));
    }
    out
}

/// Distributes every product of a sum containing `variable` over the sum's terms, until no such
/// product remains.
///
/// Terms of a sum that do not contain `variable` are kept together: `(x + a + b)*y` expands to
/// `y*x + y*(a + b)`.
pub fn expand(expr: &Expr, variable: &str) -> Result<Expr, Error> {
    fixed_point("expand", expr, |expr| {
        let terms = terms(expr)
            .iter()
            .flat_map(|term| expand_term(term, variable))
            .collect();
        Ok(list_sum(terms))
    })
}

/// Expands the expression over every symbol it contains. Numbers are skipped.
pub fn expand_all(expr: &Expr) -> Result<Expr, Error> {
    let mut result = expr.clone();
    for symbol in expr.symbols() {
        if !is_numeric_text(symbol) {
            result = expand(&result, symbol)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::{canonical::canonical_string, collect::collect, parse, simplify::simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str, variable: &str) -> String {
        let expr = expand(&parse(input).unwrap(), variable).unwrap();
        simplify(&collect(&expr, variable)).unwrap().to_string()
    }

    fn simplified(input: &str) -> String {
        simplify(&parse(input).unwrap()).unwrap().to_string()
    }

    #[test]
    fn binomials() {
        assert_eq!(expanded("(x+1)*(x+2)", "x"), simplified("x^2 + 3x + 2"));
        assert_eq!(expanded("(x+1)^2", "x"), simplified("x^2 + 2x + 1"));
        assert_eq!(expanded("2(x-3)", "x"), simplified("2x - 6"));
    }

    #[test]
    fn polynomials_survive_expand_and_collect() {
        for input in ["3x^2 + 2x + 1", "x^2 + 2x + 3x", "x*x + 2x*x + 1", "4x^3 - x^3 + x"] {
            let expr = parse(input).unwrap();
            let round_trip = simplify(&collect(&expand(&expr, "x").unwrap(), "x")).unwrap();
            assert_eq!(canonical_string(&round_trip), canonical_string(&simplify(&expr).unwrap()));
        }
    }

    #[test]
    fn free_terms_stay_together() {
        let expr = expand(&parse("(x + a + b)*y").unwrap(), "x").unwrap();
        assert_eq!(terms(&expr).len(), 2);
    }

    #[test]
    fn untouched_without_variable() {
        let expr = parse("(a + b)*c").unwrap();
        assert_eq!(expand(&expr, "x").unwrap().to_string(), "((a+b)*c)");
    }

    #[test]
    fn every_symbol() {
        let expr = expand_all(&parse("(a + b)*(c + d)").unwrap()).unwrap();
        assert_eq!(terms(&expr).len(), 4);
    }
}
