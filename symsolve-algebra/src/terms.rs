//! Flattening expressions into lists of terms and factors, and rebuilding them.
//!
//! Most passes in this crate don't care about the exact tree shape of a sum or product. `a - (b -
//! c)` is the sum of the terms `a`, `-b`, and `c`, and `a / (b / c)` is the product of the factors
//! `a`, `1/b` and `c`. [`terms`] and [`factors`] flatten a tree into these lists, and
//! [`list_sum`] and [`list_product`] rebuild a tree from them.

use crate::expr::{BinOp, Expr};

/// Returns the terms of the expression: the operands of nested [`BinOp::Add`] and
/// [`BinOp::Subtract`] nodes.
///
/// A subtracted term `t` is returned as `-1 * t`. An expression that is not a sum is its own
/// single term.
pub fn terms(expr: &Expr) -> Vec<Expr> {
    let mut out = Vec::new();
    collect_terms(expr, false, &mut out);
    out
}

fn collect_terms(expr: &Expr, negative: bool, out: &mut Vec<Expr>) {
    match expr {
        Expr::Binary(BinOp::Add, lhs, rhs) => {
            collect_terms(lhs, negative, out);
            collect_terms(rhs, negative, out);
        },
        Expr::Binary(BinOp::Subtract, lhs, rhs) => {
            collect_terms(lhs, negative, out);
            collect_terms(rhs, !negative, out);
        },
        term if negative => out.push(Expr::negate(term.clone())),
        term => out.push(term.clone()),
    }
}

/// Returns the factors of the expression: the operands of nested [`BinOp::Multiply`] and
/// [`BinOp::Divide`] nodes.
///
/// A factor `f` in a denominator is returned as `1 / f`. If `limit` is non-zero, a factor `b^n`
/// with an integer exponent `0 < n < limit` is unrolled into `n` copies of `b`; the copies are not
/// flattened further.
pub fn factors(expr: &Expr, limit: i64) -> Vec<Expr> {
    let mut out = Vec::new();
    collect_factors(expr, false, limit, &mut out);
    out
}

fn collect_factors(expr: &Expr, inverse: bool, limit: i64, out: &mut Vec<Expr>) {
    let push = |factor: &Expr, out: &mut Vec<Expr>| {
        if inverse {
            out.push(Expr::recip(factor.clone()));
        } else {
            out.push(factor.clone());
        }
    };

    match expr {
        Expr::Binary(BinOp::Multiply, lhs, rhs) => {
            collect_factors(lhs, inverse, limit, out);
            collect_factors(rhs, inverse, limit, out);
        },
        Expr::Binary(BinOp::Divide, lhs, rhs) => {
            collect_factors(lhs, inverse, limit, out);
            collect_factors(rhs, !inverse, limit, out);
        },
        Expr::Binary(BinOp::Exponentiate, base, exp) => {
            match exp.as_i64() {
                Some(n) if 0 < n && n < limit => {
                    for _ in 0..n {
                        push(base, out);
                    }
                },
                _ => push(expr, out),
            }
        },
        factor => push(factor, out),
    }
}

/// Rebuilds a sum from a list of terms as a left fold of [`BinOp::Add`]. An empty list is `0`.
pub fn list_sum(terms: Vec<Expr>) -> Expr {
    terms.into_iter()
        .reduce(|sum, term| sum + term)
        .unwrap_or_else(Expr::zero)
}

/// Rebuilds a product from a list of factors. An empty list is `1`.
///
/// Reciprocal factors `1/d` are gathered into a single denominator, producing `num / den`. If
/// there are only reciprocal factors, the numerator is `1`.
pub fn list_product(factors: Vec<Expr>) -> Expr {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor.as_reciprocal() {
            Some(den) => denominator.push(den.clone()),
            None => numerator.push(factor),
        }
    }

    let numerator = numerator.into_iter()
        .reduce(|product, factor| product * factor);
    let denominator = denominator.into_iter()
        .reduce(|product, factor| product * factor);

    match (numerator, denominator) {
        (Some(num), Some(den)) => num / den,
        (None, Some(den)) => Expr::recip(den),
        (Some(num), None) => num,
        (None, None) => Expr::one(),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn render(exprs: Vec<Expr>) -> Vec<String> {
        exprs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn nested_terms() {
        let expr = parse("a - (b - c) + d").unwrap();
        assert_eq!(render(terms(&expr)), vec!["a", "((-1)*b)", "c", "d"]);
    }

    #[test]
    fn single_term() {
        let expr = parse("2x").unwrap();
        assert_eq!(render(terms(&expr)), vec!["(2*x)"]);
    }

    #[test]
    fn nested_factors() {
        let expr = parse("a / (b / c) * d").unwrap();
        assert_eq!(render(factors(&expr, 0)), vec!["a", "(1/b)", "c", "d"]);
    }

    #[test]
    fn unrolled_factors() {
        let expr = parse("x^3 * y^7 / z^2").unwrap();
        assert_eq!(
            render(factors(&expr, 5)),
            vec!["x", "x", "x", "(y^7)", "(1/z)", "(1/z)"],
        );
        assert_eq!(render(factors(&expr, 0)), vec!["(x^3)", "(y^7)", "(1/(z^2))"]);
    }

    #[test]
    fn rebuild_sum() {
        assert_eq!(list_sum(vec![]), Expr::zero());
        let sum = list_sum(vec![Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c")]);
        assert_eq!(sum.to_string(), "((a+b)+c)");
    }

    #[test]
    fn rebuild_product() {
        assert_eq!(list_product(vec![]), Expr::one());

        let expr = parse("a / b * c / d").unwrap();
        assert_eq!(list_product(factors(&expr, 0)).to_string(), "((a*c)/(b*d))");

        let recip = list_product(vec![Expr::recip(Expr::symbol("x"))]);
        assert_eq!(recip.to_string(), "(1/x)");
    }
}
