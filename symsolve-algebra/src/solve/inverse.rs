//! Undoing the top operation of one side of an equation.

use crate::expr::{BinOp, Expr, UnaryOp};

/// The largest integer power that is inverted into all of its complex roots. Larger powers are
/// inverted into the principal root only.
pub const MAX_ROOTS: i64 = 16;

/// The `n` complex `n`-th roots of `value`: `value^(1/n) * e^(2*pi*i*k/n)` for `k = 1..=n`.
fn roots(value: &Expr, n: i64) -> Vec<Expr> {
    let principal = Expr::pow(value.clone(), Expr::recip(Expr::int(n)));
    (1..=n)
        .map(|k| {
            let turn = Expr::int(2) * Expr::symbol("pi") * Expr::symbol("i") * Expr::int(k)
                / Expr::int(n);
            principal.clone() * Expr::pow(Expr::symbol("e"), turn)
        })
        .collect()
}

/// Inverts a binary operation, given the side containing the variable.
fn invert_binary(op: BinOp, lhs: &Expr, rhs: &Expr, value: &Expr, left: bool) -> Vec<(Expr, Expr)> {
    let value = value.clone();
    match (op, left) {
        (BinOp::Add, true) => vec![(lhs.clone(), value - rhs.clone())],
        (BinOp::Add, false) => vec![(rhs.clone(), value - lhs.clone())],
        (BinOp::Subtract, true) => vec![(lhs.clone(), value + rhs.clone())],
        (BinOp::Subtract, false) => vec![(rhs.clone(), lhs.clone() - value)],
        (BinOp::Multiply, true) => vec![(lhs.clone(), value / rhs.clone())],
        (BinOp::Multiply, false) => vec![(rhs.clone(), value / lhs.clone())],
        (BinOp::Divide, true) => vec![(lhs.clone(), value * rhs.clone())],
        (BinOp::Divide, false) => vec![(rhs.clone(), lhs.clone() / value)],
        (BinOp::Exponentiate, true) => match rhs.as_i64()
            .filter(|n| (2..=MAX_ROOTS).contains(n))
        {
            Some(n) => roots(&value, n)
                .into_iter()
                .map(|root| (lhs.clone(), root))
                .collect(),
            None => vec![(lhs.clone(), Expr::pow(value, Expr::recip(rhs.clone())))],
        },
        (BinOp::Exponentiate, false) => vec![(rhs.clone(), Expr::log(lhs.clone(), value))],
        (BinOp::Logarithm, true) => vec![(lhs.clone(), Expr::pow(rhs.clone(), Expr::recip(value)))],
        (BinOp::Logarithm, false) => vec![(rhs.clone(), Expr::pow(lhs.clone(), value))],
        (BinOp::Equals, true) => vec![(lhs.clone(), rhs.clone())],
        (BinOp::Equals, false) => vec![(rhs.clone(), lhs.clone())],
    }
}

/// Inverts a unary operation. The sine and cosine are not inverted, and give no equations.
fn invert_unary(op: UnaryOp, child: &Expr, value: &Expr) -> Vec<(Expr, Expr)> {
    let value = value.clone();
    let inverse = match op {
        UnaryOp::Plus => value,
        UnaryOp::Minus => Expr::negate(value),
        UnaryOp::Factorial => Expr::unary(UnaryOp::InverseFactorial, value),
        UnaryOp::InverseFactorial => Expr::unary(UnaryOp::Factorial, value),
        UnaryOp::LambertW => value.clone() * Expr::pow(Expr::symbol("e"), value),
        UnaryOp::Sine | UnaryOp::Cosine => return Vec::new(),
    };
    vec![(child.clone(), inverse)]
}

/// Peels the top operation off `lhs` in the equation `lhs = rhs`, moving it to the right-hand
/// side. Returns the equations that must hold for the child of `lhs` containing `variable`.
///
/// Returns [`None`] if `variable` appears in more than one child of `lhs`, or in none of them.
///
/// ```
/// use symsolve_algebra::{parse, solve::inverse::invert, Expr};
///
/// let lhs = parse("2x").unwrap();
/// let equations = invert(&lhs, &Expr::int(6), "x").unwrap();
/// assert_eq!(equations.len(), 1);
/// assert_eq!(equations[0].0.to_string(), "x");
/// assert_eq!(equations[0].1.to_string(), "(6/2)");
/// ```
pub fn invert(lhs: &Expr, rhs: &Expr, variable: &str) -> Option<Vec<(Expr, Expr)>> {
    match lhs {
        Expr::Binary(op, left, right) => match (left.contains(variable), right.contains(variable)) {
            (true, false) => Some(invert_binary(*op, left, right, rhs, true)),
            (false, true) => Some(invert_binary(*op, left, right, rhs, false)),
            _ => None,
        },
        Expr::Unary(op, child) if child.contains(variable) => Some(invert_unary(*op, child, rhs)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, simplify::simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Inverts `lhs = 5` and simplifies the right-hand side of each resulting equation.
    fn inverted(lhs: &str) -> Option<Vec<(String, String)>> {
        let equations = invert(&parse(lhs).unwrap(), &Expr::int(5), "x")?;
        Some(
            equations.into_iter()
                .map(|(lhs, rhs)| (lhs.to_string(), simplify(&rhs).unwrap().to_string()))
                .collect()
        )
    }

    fn solved(rhs: &str) -> Option<Vec<(String, String)>> {
        let rhs = simplify(&parse(rhs).unwrap()).unwrap().to_string();
        Some(vec![("x".to_string(), rhs)])
    }

    #[test]
    fn arithmetic() {
        assert_eq!(inverted("x + 2"), solved("3"));
        assert_eq!(inverted("2 - x"), solved("-3"));
        assert_eq!(inverted("x * 10"), solved("1/2"));
        assert_eq!(inverted("10 / x"), solved("2"));
        assert_eq!(inverted("x / 2"), solved("10"));
    }

    #[test]
    fn peels_one_level() {
        let equations = inverted("2x + 1").unwrap();
        assert_eq!(equations, vec![("(2*x)".to_string(), "4".to_string())]);
    }

    #[test]
    fn powers_and_logarithms() {
        assert_eq!(inverted("log(2, x)"), solved("32"));
        assert_eq!(inverted("2^x"), solved("log(2, 5)"));
        assert_eq!(inverted("x^(1/2)"), solved("25"));
    }

    #[test]
    fn integer_powers_give_every_root() {
        let equations = invert(&parse("x^2").unwrap(), &Expr::int(4), "x").unwrap();
        let roots = equations.into_iter()
            .map(|(_, rhs)| simplify(&rhs).unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(roots, vec!["(-2)".to_string(), "2".to_string()]);
    }

    #[test]
    fn huge_powers_give_the_principal_root() {
        let equations = invert(&parse("x^100000000").unwrap(), &Expr::int(2), "x").unwrap();
        assert_eq!(equations.len(), 1);
        assert_eq!(equations[0].1, Expr::pow(Expr::int(2), Expr::recip(Expr::int(100000000))));

        let limit = Expr::int(MAX_ROOTS);
        let equations = invert(&Expr::pow(Expr::symbol("x"), limit), &Expr::int(2), "x").unwrap();
        assert_eq!(equations.len(), MAX_ROOTS as usize);
    }

    #[test]
    fn unary() {
        assert_eq!(inverted("-x"), solved("-5"));
        assert_eq!(inverted("x!"), solved("InverseFactorial(5)"));
        assert_eq!(inverted("W(x)"), solved("5e^5"));
        assert_eq!(inverted("sin(x)"), Some(Vec::new()));
    }

    #[test]
    fn variable_on_both_sides() {
        assert_eq!(inverted("x^2 + x"), None);
        assert_eq!(inverted("y + 1"), None);
    }
}
