//! Grouping like factors and like terms.

use crate::{
    canonical::canonical_string,
    expr::{is_numeric_text, BinOp, Expr},
    terms::{factors, list_product, list_sum, terms},
};
use rug::Integer;

/// The limit used to unroll small integer powers before regrouping factors.
const EXPAND_LIMIT: i64 = 5;

/// Returns the base of a factor and its integer exponent: `1/b` counts as `b^(-1)`, `b^n` as
/// `b^n`, and `1/b^n` as `b^(-n)`. Any other factor is itself to the first power.
fn integer_power(factor: &Expr) -> (Expr, i64) {
    if let Some(den) = factor.as_reciprocal() {
        let (base, exp) = integer_power(den);
        return match exp.checked_neg() {
            Some(exp) => (base, exp),
            None => (factor.clone(), 1),
        };
    }

    match factor.as_binary(BinOp::Exponentiate) {
        Some((base, exp)) => match exp.as_i64() {
            Some(n) => (base.clone(), n),
            None => (factor.clone(), 1),
        },
        None => (factor.clone(), 1),
    }
}

/// Merges the repeated factors of a single term into powers.
///
/// Bases that may be zero are never merged, so `0/0` stays degenerate. Exponents whose sum
/// overflows are kept as separate factors.
fn normalize_term(term: &Expr) -> Expr {
    if term.is_degenerate() {
        return term.clone();
    }

    let mut groups: Vec<(String, Expr, i64)> = Vec::new();
    for factor in factors(term, EXPAND_LIMIT) {
        let (base, exp) = integer_power(&factor);
        let key = canonical_string(&base);
        let group = groups.iter_mut()
            .find(|(found, ..)| *found == key)
            .filter(|_| base.can_cancel())
            .and_then(|(_, _, total)| Some((total.checked_add(exp)?, total)));
        match group {
            Some((sum, total)) => *total = sum,
            None => groups.push((key, base, exp)),
        }
    }

    let factors = groups.into_iter()
        .filter_map(|(_, base, exp)| match exp {
            0 => None,
            1 => Some(base),
            -1 => Some(Expr::recip(base)),
            exp if exp < 0 => {
                let exp = -Integer::from(exp);
                Some(Expr::recip(Expr::pow(base, Expr::from_integer(&exp))))
            },
            exp => Some(Expr::pow(base, Expr::int(exp))),
        })
        .collect();
    list_product(factors)
}

/// Merges repeated factors of each term of the expression into powers, counting `1/b` as `b^(-1)`.
///
/// ```
/// use symsolve_algebra::{normalize_exponents, parse};
///
/// let expr = parse("x*x*y/x").unwrap();
/// assert_eq!(normalize_exponents(&expr).to_string(), "(x*y)");
/// ```
pub fn normalize_exponents(expr: &Expr) -> Expr {
    let terms = terms(expr)
        .iter()
        .map(normalize_term)
        .collect();
    list_sum(terms)
}

/// A group of terms sharing the same variable-bearing factor.
struct Group {
    key: Option<String>,
    owner: Option<Expr>,

    /// The distinct coefficients of the group, with the number of times each appears.
    coefficients: Vec<(String, Expr, usize)>,
}

impl Group {
    fn add(&mut self, coefficient: Expr) {
        let key = canonical_string(&coefficient);
        match self.coefficients.iter_mut().find(|(found, ..)| *found == key) {
            Some((_, _, count)) => *count += 1,
            None => self.coefficients.push((key, coefficient, 1)),
        }
    }

    fn into_expr(self) -> Expr {
        let sum = list_sum(
            self.coefficients.into_iter()
                .map(|(_, coefficient, count)| match count {
                    1 => coefficient,
                    count => coefficient * Expr::int(count as i64),
                })
                .collect()
        );

        match self.owner {
            Some(owner) if sum.is_one() => owner,
            Some(owner) => owner * sum,
            None => sum,
        }
    }
}

/// Splits a term into the factor that owns it (the product of its factors containing `variable`)
/// and its coefficient. If the term has no such factors, or they are not all the same, the term
/// has no owner and is its own coefficient.
fn split_term(term: &Expr, variable: &str) -> (Option<Expr>, Expr) {
    let (owned, rest): (Vec<_>, Vec<_>) = factors(term, 0)
        .into_iter()
        .partition(|factor| factor.contains(variable));

    let Some(first) = owned.first() else {
        return (None, term.clone());
    };
    let first = canonical_string(first);
    if owned.iter().skip(1).any(|factor| canonical_string(factor) != first) {
        return (None, term.clone());
    }

    (Some(list_product(owned)), list_product(rest))
}

/// Collects the terms of the expression that share the same factor containing `variable`.
///
/// ```
/// use symsolve_algebra::{collect, parse};
///
/// let expr = parse("2x + y*x + 3").unwrap();
/// assert_eq!(collect(&expr, "x").to_string(), "((x*(2+y))+3)");
/// ```
pub fn collect(expr: &Expr, variable: &str) -> Expr {
    let normalized = normalize_exponents(expr);

    let mut groups: Vec<Group> = Vec::new();
    for term in terms(&normalized) {
        let (owner, coefficient) = split_term(&term, variable);
        let key = owner.as_ref().map(canonical_string);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.add(coefficient),
            None => {
                let mut group = Group { key, owner, coefficients: Vec::new() };
                group.add(coefficient);
                groups.push(group);
            },
        }
    }

    list_sum(groups.into_iter().map(Group::into_expr).collect())
}

/// Collects like terms for `x`, then for every other symbol in the expression. Numbers are not
/// collected.
pub fn collect_all(expr: &Expr) -> Expr {
    let mut result = collect(expr, "x");
    for symbol in expr.symbols() {
        if symbol != "x" && !is_numeric_text(symbol) {
            result = collect(&result, symbol);
        }
    }
    result
}
