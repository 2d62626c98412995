//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which reduces an expression by repeatedly
//! applying rewriting rules to it in multiple passes, until a pass no longer changes its
//! canonical form.
//!
//! Each pass works on the flattened shape of the expression. A sum is simplified term by term,
//! then pairs of terms are folded together greedily until no pair changes. A product is handled
//! the same way with its factors, and its repeated factors are then merged into powers with
//! [`normalize_exponents`]. Any other node has its children simplified, then is folded with the
//! [identities](identity) and the [rules](rules).

pub mod identity;
pub mod rules;
pub mod step;

use crate::{
    canonical::canonical_string,
    collect::normalize_exponents,
    error::Error,
    expr::{BinOp, Expr},
    fixed_point::fixed_point,
    step_collector::StepCollector,
    terms::{factors, list_product, list_sum, terms},
};
use log::trace;
use step::Step;

/// Applies the first identity or rule that matches the expression itself, without looking at its
/// children. Degenerate expressions are left alone.
fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    if expr.is_degenerate() {
        return expr.clone();
    }

    match identity::apply(expr, step_collector).or_else(|| rules::all(expr, step_collector)) {
        Some(result) => {
            trace!("{} -> {}", expr, result);
            result
        },
        None => expr.clone(),
    }
}

/// Greedily folds pairs of items joined with the given operator, until no pair of items folds
/// into something with a different canonical form.
///
/// Each successful fold replaces the two items with the result, so this always terminates.
fn fold_pairs(
    mut items: Vec<Expr>,
    op: BinOp,
    step_collector: &mut dyn StepCollector<Step>,
) -> Vec<Expr> {
    'search: loop {
        for i in 0..items.len() {
            for j in 0..items.len() {
                if i == j {
                    continue;
                }

                let pair = Expr::binary(op, items[i].clone(), items[j].clone());
                let mut steps = Vec::new();
                let folded = fold(&pair, &mut steps);
                if canonical_string(&folded) == canonical_string(&pair) {
                    continue;
                }

                for step in steps {
                    step_collector.push(step);
                }
                items.remove(i.max(j));
                items.remove(i.min(j));
                items.push(folded);
                continue 'search;
            }
        }

        return items;
    }
}

/// A single simplification pass over the whole expression.
fn simplify_pass(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = fold(expr, step_collector);

    let terms = terms(&expr);
    if terms.len() > 1 {
        let terms = terms.iter()
            .map(|term| simplify_pass(term, step_collector))
            .collect();
        return list_sum(fold_pairs(terms, BinOp::Add, step_collector));
    }

    let factors = factors(&expr, 0);
    if factors.len() > 1 {
        let factors = factors.iter()
            .map(|factor| match factor.as_reciprocal() {
                Some(den) => Expr::recip(simplify_pass(den, step_collector)),
                None => simplify_pass(factor, step_collector),
            })
            .collect();
        let product = list_product(fold_pairs(factors, BinOp::Multiply, step_collector));

        let normalized = normalize_exponents(&product);
        if canonical_string(&normalized) != canonical_string(&product) {
            step_collector.push(Step::NormalizeExponents);
        }
        return normalized;
    }

    let expr = expr.map_children(|child| simplify_pass(child, step_collector));
    fold(&expr, step_collector)
}

/// Simplify the given expression, collecting each rewrite into the given step collector.
pub fn simplify_with(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    fixed_point("simplify", expr, |expr| Ok(simplify_pass(expr, step_collector)))
}

/// Simplify the given expression.
///
/// The result is in canonical form. Returns an error if the expression is still changing after
/// a fixed number of passes.
pub fn simplify(expr: &Expr) -> Result<Expr, Error> {
    simplify_with(expr, &mut ())
}

/// Simplify the given expression. The steps taken by the simplifier will also be collected and
/// returned. This is useful for debugging, and also for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &Expr) -> Result<(Expr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let expr = simplify_with(expr, &mut steps)?;
    Ok((expr, steps))
}

#[cfg(test)]
mod tests {
    use crate::{canonical::canonical, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        simplify(&parse(input).unwrap()).unwrap().to_string()
    }

    #[test]
    fn numbers() {
        assert_eq!(simplified("1 + 1"), "2");
        assert_eq!(simplified("3/4 + 4/3"), "(25/12)");
        assert_eq!(simplified("2 * 3 - 10"), "(-4)");
        assert_eq!(simplified("2^10 / 4"), "256");
        assert_eq!(simplified("5!"), "120");
    }

    #[test]
    fn complex_numbers() {
        assert_eq!(simplified("(-1)^(1/2)"), "i");
        assert_eq!(simplified("e^(i*pi) + 1"), "0");
        assert_eq!(simplified("i^2 + 1"), "0");
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("x + 0"), "x");
        assert_eq!(simplified("x * 1"), "x");
        assert_eq!(simplified("y - y"), "0");
        assert_eq!(simplified("(x + 1)^0"), "1");
    }

    #[test]
    fn exponent_laws() {
        assert_eq!(simplified("x * x"), "(x^2)");
        assert_eq!(simplified("x^2 * x^3"), "(x^5)");
        assert_eq!(simplified("x / x"), "1");
        assert_eq!(simplified("x * x / x"), "x");
    }

    #[test]
    fn symbolic_fractions() {
        assert_eq!(simplified("1/x + 1/x"), simplified("2/x"));
        assert_eq!(simplified("a/x - b/x"), simplified("(a - b)/x"));
    }

    #[test]
    fn degenerate_expressions_are_kept() {
        let expr = parse("1/0").unwrap();
        assert_eq!(simplify(&expr).unwrap(), canonical(&expr));

        for input in ["(1-1)/(1-1)", "(2^2-4)/(3-3)", "0/0"] {
            assert!(simplify(&parse(input).unwrap()).unwrap().is_degenerate(), "{}", input);
        }
    }

    #[test]
    fn idempotent() {
        for input in ["x^2 + 2x + 1", "e^(i*pi) + 1", "(x+1)/(x-1)", "log(2, 8) * x"] {
            let once = simplify(&parse(input).unwrap()).unwrap();
            let twice = simplify(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn steps() {
        let (expr, steps) = simplify_with_steps(&parse("2 + 3").unwrap()).unwrap();
        assert_eq!(expr.to_string(), "5");
        assert_eq!(steps, vec![Step::AddNumbers]);
    }
}
