//! Algebraic identities, applied by matching the left-hand side of each identity against an
//! expression.
//!
//! Each identity is written as an equation in the variable `x`. An identity applies to an
//! expression if some child or grandchild of the expression, substituted for `x` in the left-hand
//! side, gives an expression with the same canonical form. The expression is then replaced by the
//! right-hand side with the same substitution.
//!
//! Identities that divide by `x`, like `x/x=1`, never bind `x` to something that may be zero.

use crate::{
    canonical::canonical_string,
    expr::{parse, BinOp, Expr},
    step_collector::StepCollector,
    substitution::substitute,
};
use once_cell::sync::Lazy;
use super::step::Step;

/// The identities, tried in order.
const SOURCES: [&str; 18] = [
    "x+0=x",
    "x-0=x",
    "0-x=-x",
    "x-x=0",
    "x*0=0",
    "x*1=x",
    "0/x=0",
    "x/1=x",
    "x/x=1",
    "x*1/x=1",
    "1/(1/x)=x",
    "x^0=1",
    "x^1=x",
    "0^x=0",
    "1^x=1",
    "0!=1",
    "x!*(x+1)=(x+1)!",
    "x!/x=(x-1)!",
];

/// The parsed identities.
static IDENTITIES: Lazy<Vec<Identity>> = Lazy::new(|| {
    SOURCES.iter()
        .filter_map(|source| Identity::parse(source))
        .collect()
});

/// The variable the identities are written in.
static X: Lazy<Expr> = Lazy::new(|| Expr::symbol("x"));

/// A single identity, `lhs = rhs`.
#[derive(Debug)]
struct Identity {
    source: &'static str,
    lhs: Expr,
    rhs: Expr,
    lhs_key: String,

    /// Whether `x` appears in a denominator of the left-hand side.
    divides: bool,
}

impl Identity {
    fn parse(source: &'static str) -> Option<Self> {
        match parse(source).ok()? {
            Expr::Binary(BinOp::Equals, lhs, rhs) => Some(Self {
                source,
                lhs_key: canonical_string(&lhs),
                divides: lhs.post_order_iter().any(|node| {
                    node.as_binary(BinOp::Divide).is_some_and(|(_, den)| den.contains("x"))
                }),
                lhs: *lhs,
                rhs: *rhs,
            }),
            _ => None,
        }
    }

    /// Returns the rewritten expression if the identity applies to the target.
    fn apply(&self, target: &Expr, target_key: &str) -> Option<Expr> {
        if !self.lhs.contains("x") {
            return (self.lhs_key == target_key).then(|| self.rhs.clone());
        }

        bindings(target)
            .into_iter()
            .filter(|binding| !self.divides || binding.can_cancel())
            .find(|binding| canonical_string(&substitute(&self.lhs, &X, binding)) == target_key)
            .map(|binding| substitute(&self.rhs, &X, binding))
    }
}

/// Returns the children and grandchildren of the expression, the values `x` may be bound to.
fn bindings(target: &Expr) -> Vec<&Expr> {
    let children = target.children();
    let grandchildren = children.iter().flat_map(|child| child.children());
    children.iter().copied().chain(grandchildren).collect()
}

/// Applies the first identity that matches the expression.
pub fn apply(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let mut target_key = None;
    for identity in IDENTITIES.iter().filter(|identity| identity.lhs.same_kind(expr)) {
        let key = target_key.get_or_insert_with(|| canonical_string(expr));
        if let Some(result) = identity.apply(expr, key.as_str()) {
            step_collector.push(Step::Identity(identity.source));
            return Some(result);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn rewrite(input: &str) -> Option<String> {
        let mut steps = Vec::new();
        let result = apply(&parse(input).unwrap(), &mut steps)?;
        assert_eq!(steps.len(), 1);
        Some(result.to_string())
    }

    #[test]
    fn all_identities_parse() {
        assert_eq!(IDENTITIES.len(), SOURCES.len());
    }

    #[test]
    fn additive() {
        assert_eq!(rewrite("y + 0"), Some("y".to_string()));
        assert_eq!(rewrite("0 + y"), Some("y".to_string()));
        assert_eq!(rewrite("0 - y"), Some("(-y)".to_string()));
        assert_eq!(rewrite("(a+b) - (b+a)"), Some("0".to_string()));
    }

    #[test]
    fn multiplicative() {
        assert_eq!(rewrite("0 * sin(y)"), Some("0".to_string()));
        assert_eq!(rewrite("1 * y"), Some("y".to_string()));
        assert_eq!(rewrite("y / 1"), Some("y".to_string()));
        assert_eq!(rewrite("(y+1) / (1+y)"), Some("1".to_string()));
        assert_eq!(rewrite("1 / (1 / y)"), Some("y".to_string()));
    }

    #[test]
    fn powers() {
        assert_eq!(rewrite("y^0"), Some("1".to_string()));
        assert_eq!(rewrite("y^1"), Some("y".to_string()));
        assert_eq!(rewrite("1^y"), Some("1".to_string()));
    }

    #[test]
    fn factorials() {
        assert_eq!(rewrite("0!"), Some("1".to_string()));
        assert_eq!(rewrite("n! * (n + 1)"), Some("((n+1)!)".to_string()));
        assert_eq!(rewrite("n! / n"), Some("((n-1)!)".to_string()));
    }

    #[test]
    fn zero_is_never_divided_out() {
        assert_eq!(rewrite("(1-1) / (1-1)"), None);
        assert_eq!(rewrite("0 / 0"), None);
        assert_eq!(rewrite("0 / (2-2)"), None);
        assert_eq!(rewrite("0 / y"), Some("0".to_string()));
    }

    #[test]
    fn no_match() {
        assert_eq!(rewrite("y + 1"), None);
        assert_eq!(rewrite("y * 2"), None);
        assert_eq!(rewrite("y"), None);
    }
}
