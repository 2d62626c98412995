//! A canonical form for expressions.
//!
//! Two expressions that differ only in the order of their terms, or the order of the factors
//! within a term, have the same canonical form. The canonical form is computed bottom-up: every
//! subexpression is canonicalized first, then each term's factors are sorted by their rendered
//! text and rebuilt with [`list_product`], and finally the terms are sorted the same way and
//! rebuilt with [`list_sum`].
//!
//! No simplification happens here. `x + x` and `2x` have different canonical forms.

use crate::{expr::Expr, terms::{factors, list_product, list_sum, terms}};

/// Returns the canonical form of the expression.
pub fn canonical(expr: &Expr) -> Expr {
    let expr = expr.map_children(canonical);

    let terms = terms(&expr);
    if terms.len() == 1 {
        return canonical_term(&expr);
    }

    let mut terms = terms.iter()
        .map(canonical_term)
        .collect::<Vec<_>>();
    terms.sort_by_cached_key(ToString::to_string);
    list_sum(terms)
}

/// Sorts the factors of a single term.
fn canonical_term(term: &Expr) -> Expr {
    let mut factors = factors(term, 0);
    if factors.len() == 1 {
        return term.clone();
    }

    factors.sort_by_cached_key(ToString::to_string);
    list_product(factors)
}

/// Returns the rendered text of the canonical form of the expression.
pub fn canonical_string(expr: &Expr) -> String {
    canonical(expr).to_string()
}

/// Returns true if both expressions have the same canonical form.
pub fn equivalent(a: &Expr, b: &Expr) -> bool {
    canonical_string(a) == canonical_string(b)
}
