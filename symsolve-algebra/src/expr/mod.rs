//! The expression tree that every algebraic pass in this crate operates on.
//!
//! An [`Expr`] is either a [`Expr::Symbol`], a [`Expr::Binary`] operation with two children, or a
//! [`Expr::Unary`] operation with one child. Numbers are symbols whose name is numeric text, such
//! as `2`, `-3` or `0.5`; the helpers in the `numeric` submodule interpret them.
//!
//! Expressions are immutable values. Every pass builds new trees instead of mutating the ones it
//! was given, so subtrees are cloned freely.
//!
//! # Rendering
//!
//! [`Display`] renders every non-symbol node fully parenthesized, e.g. `x + 2*y` renders as
//! `(x+(2*y))`. The rendering is unambiguous, and is what the canonical form compares, so it must
//! stay stable.
//!
//! # Equality
//!
//! The derived [`PartialEq`] is **structural** equality: `x + 1` and `1 + x` are different. Use
//! [`equivalent`](crate::canonical::equivalent) to compare expressions up to reordering of terms
//! and factors.

mod convert;
mod iter;
mod numeric;

pub use convert::parse;
pub use iter::ExprIter;
pub use numeric::is_numeric_text;

use std::{collections::HashSet, fmt::{self, Display, Formatter}, ops::{Add, Div, Mul, Neg, Sub}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOp {
    /// An equation, `a = b`.
    Equals,

    /// Addition, `a + b`.
    Add,

    /// Subtraction, `a - b`.
    Subtract,

    /// Multiplication, `a * b`.
    Multiply,

    /// Division, `a / b`.
    Divide,

    /// Exponentiation, `a ^ b`.
    Exponentiate,

    /// The logarithm of the right operand to the base of the left operand, `log_a(b)`.
    Logarithm,
}

impl BinOp {
    /// Returns the symbol used to render the operator between its operands.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Exponentiate => "^",
            Self::Logarithm => "log",
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    /// Unary plus, `+a`.
    Plus,

    /// Negation, `-a`.
    Minus,

    /// The factorial, `a!`.
    Factorial,

    /// The inverse of the factorial: the `n` such that `n! = a`.
    InverseFactorial,

    /// The sine, `sin(a)`.
    Sine,

    /// The cosine, `cos(a)`.
    Cosine,

    /// The principal branch of the Lambert W function, `W(a)`.
    LambertW,
}

/// A symbolic expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A variable, a named constant (`e`, `pi`, `i`), or a number.
    Symbol(String),

    /// A binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),

    /// A unary operation.
    Unary(UnaryOp, Box<Expr>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) => {
                if name.starts_with('-') && is_numeric_text(name) {
                    write!(f, "({})", name)
                } else {
                    write!(f, "{}", name)
                }
            },
            Self::Binary(BinOp::Logarithm, base, arg) => write!(f, "(log_({})({}))", base, arg),
            Self::Binary(op, lhs, rhs) => write!(f, "({}{}{})", lhs, op.symbol(), rhs),
            Self::Unary(op, child) => match op {
                UnaryOp::Plus => write!(f, "(+{})", child),
                UnaryOp::Minus => write!(f, "(-{})", child),
                UnaryOp::Factorial => write!(f, "({}!)", child),
                UnaryOp::InverseFactorial => write!(f, "(InverseFactorial({}))", child),
                UnaryOp::Sine => write!(f, "(sin({}))", child),
                UnaryOp::Cosine => write!(f, "(cos({}))", child),
                UnaryOp::LambertW => write!(f, "(W({}))", child),
            },
        }
    }
}

impl Expr {
    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates an integer symbol.
    pub fn int(value: i64) -> Self {
        Self::Symbol(value.to_string())
    }

    /// The integer `0`.
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// The integer `1`.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// The integer `-1`.
    pub fn minus_one() -> Self {
        Self::int(-1)
    }

    /// Creates a binary operation.
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Creates a unary operation.
    pub fn unary(op: UnaryOp, child: Expr) -> Self {
        Self::Unary(op, Box::new(child))
    }

    /// Creates the equation `lhs = rhs`.
    pub fn equals(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOp::Equals, lhs, rhs)
    }

    /// Creates `base ^ exponent`.
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinOp::Exponentiate, base, exponent)
    }

    /// Creates `log_base(arg)`.
    pub fn log(base: Expr, arg: Expr) -> Self {
        Self::binary(BinOp::Logarithm, base, arg)
    }

    /// Creates `1 / expr`.
    pub fn recip(expr: Expr) -> Self {
        Self::binary(BinOp::Divide, Self::one(), expr)
    }

    /// Creates `expr ^ (1/2)`.
    pub fn sqrt(expr: Expr) -> Self {
        Self::pow(expr, Self::recip(Self::int(2)))
    }

    /// Negates the expression by multiplying it with `-1`. No simplification is done.
    pub fn negate(expr: Expr) -> Self {
        Self::binary(BinOp::Multiply, Self::minus_one(), expr)
    }

    /// If the expression is a [`Expr::Symbol`], returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is the symbol with the given name.
    pub fn is_named(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// If the expression is a binary operation with the given operator, returns its operands.
    pub fn as_binary(&self, op: BinOp) -> Option<(&Expr, &Expr)> {
        match self {
            Self::Binary(found, lhs, rhs) if *found == op => Some((lhs, rhs)),
            _ => None,
        }
    }

    /// If the expression is a unary operation with the given operator, returns its operand.
    pub fn as_unary(&self, op: UnaryOp) -> Option<&Expr> {
        match self {
            Self::Unary(found, child) if *found == op => Some(child),
            _ => None,
        }
    }

    /// If the expression is a reciprocal `1 / d`, returns the denominator `d`.
    pub fn as_reciprocal(&self) -> Option<&Expr> {
        self.as_binary(BinOp::Divide)
            .filter(|(num, _)| num.is_one())
            .map(|(_, den)| den)
    }

    /// If the expression is a negation, `-1 * t`, `t * -1` or `-t`, returns `t`.
    pub fn as_negation(&self) -> Option<&Expr> {
        if let Some((lhs, rhs)) = self.as_binary(BinOp::Multiply) {
            if lhs.is_minus_one() {
                return Some(rhs);
            } else if rhs.is_minus_one() {
                return Some(lhs);
            }
        }
        self.as_unary(UnaryOp::Minus)
    }

    /// Returns true if both expressions are the same kind of node: both symbols, or both the same
    /// binary / unary operator.
    pub fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Symbol(_), Self::Symbol(_)) => true,
            (Self::Binary(lhs, ..), Self::Binary(rhs, ..)) => lhs == rhs,
            (Self::Unary(lhs, _), Self::Unary(rhs, _)) => lhs == rhs,
            _ => false,
        }
    }

    /// Returns the direct children of the expression, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Symbol(_) => Vec::new(),
            Self::Binary(_, lhs, rhs) => vec![lhs, rhs],
            Self::Unary(_, child) => vec![child],
        }
    }

    /// Rebuilds the expression with each child replaced by the result of `f`.
    pub fn map_children<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Expr) -> Expr,
    {
        match self {
            Self::Symbol(_) => self.clone(),
            Self::Binary(op, lhs, rhs) => Self::binary(*op, f(lhs), f(rhs)),
            Self::Unary(op, child) => Self::unary(*op, f(child)),
        }
    }

    /// Rebuilds the expression with each child replaced by the result of `f`, stopping at the
    /// first error.
    pub fn try_map_children<F, E>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&Expr) -> Result<Expr, E>,
    {
        Ok(match self {
            Self::Symbol(_) => self.clone(),
            Self::Binary(op, lhs, rhs) => Self::binary(*op, f(lhs)?, f(rhs)?),
            Self::Unary(op, child) => Self::unary(*op, f(child)?),
        })
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression.
    pub fn contains(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.is_named(name))
    }

    /// Returns the distinct symbol names in the expression, numbers included, in the order they
    /// first appear.
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.post_order_iter()
            .filter_map(Expr::as_symbol)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Returns true if the expression can be divided out of a quotient.
    ///
    /// A symbol can be divided out unless it is zero. Any other expression needs a symbol that is
    /// neither a number nor one of the constants `e`, `i` and `pi`: `1-1` is zero, and must be
    /// simplified before anything cancels against it.
    pub fn can_cancel(&self) -> bool {
        match self {
            Self::Symbol(_) => !self.is_zero(),
            _ => self.post_order_iter()
                .filter_map(Expr::as_symbol)
                .any(|name| !is_numeric_text(name) && !matches!(name, "e" | "i" | "pi")),
        }
    }

    /// Returns true if the expression contains a division by zero or a logarithm of zero.
    ///
    /// Only literal zeros are detected; `1/(1-1)` is not degenerate until it is simplified.
    pub fn is_degenerate(&self) -> bool {
        self.post_order_iter().any(|expr| match expr {
            Self::Binary(BinOp::Divide, _, den) => den.is_zero(),
            Self::Binary(BinOp::Logarithm, base, arg) => base.is_zero() || arg.is_zero(),
            _ => false,
        })
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Add, self, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Subtract, self, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Multiply, self, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Divide, self, rhs)
    }
}

/// Negates the expression with [`Expr::negate`].
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::negate(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn render_binary() {
        let expr = x() + Expr::int(2) * Expr::symbol("y");
        assert_eq!(expr.to_string(), "(x+(2*y))");
    }

    #[test]
    fn render_negative_number() {
        assert_eq!(Expr::int(-3).to_string(), "(-3)");
        assert_eq!((x() - Expr::int(-3)).to_string(), "(x-(-3))");
        assert_eq!(Expr::symbol("-").to_string(), "-");
    }

    #[test]
    fn render_functions() {
        let expr = Expr::log(Expr::int(2), Expr::unary(UnaryOp::Sine, x()));
        assert_eq!(expr.to_string(), "(log_(2)((sin(x))))");
        assert_eq!(Expr::unary(UnaryOp::Factorial, x()).to_string(), "(x!)");
        assert_eq!(Expr::unary(UnaryOp::LambertW, x()).to_string(), "(W(x))");
        assert_eq!(Expr::unary(UnaryOp::Minus, x()).to_string(), "(-x)");
    }

    #[test]
    fn negation() {
        let neg = -x();
        assert_eq!(neg.to_string(), "((-1)*x)");
        assert_eq!(neg.as_negation(), Some(&x()));
        assert_eq!((x() * Expr::minus_one()).as_negation(), Some(&x()));
        assert_eq!(x().as_negation(), None);
    }

    #[test]
    fn reciprocal() {
        let recip = Expr::recip(x());
        assert_eq!(recip.as_reciprocal(), Some(&x()));
        assert_eq!((Expr::int(2) / x()).as_reciprocal(), None);
    }

    #[test]
    fn contains_and_symbols() {
        let expr = Expr::pow(x(), Expr::int(2)) + Expr::symbol("y") * x();
        assert!(expr.contains("x"));
        assert!(!expr.contains("z"));
        assert_eq!(expr.symbols(), vec!["x", "2", "y"]);
    }

    #[test]
    fn degenerate() {
        assert!((x() / Expr::zero()).is_degenerate());
        assert!((Expr::one() + Expr::log(Expr::int(10), Expr::zero())).is_degenerate());
        assert!(!(Expr::zero() / x()).is_degenerate());
    }

    #[test]
    fn cancellable() {
        assert!(x().can_cancel());
        assert!(Expr::int(3).can_cancel());
        assert!(Expr::symbol("pi").can_cancel());
        assert!((x() - Expr::one()).can_cancel());
        assert!(!Expr::zero().can_cancel());
        assert!(!(Expr::one() - Expr::one()).can_cancel());
        assert!(!(Expr::pow(Expr::symbol("i"), Expr::int(2)) + Expr::one()).can_cancel());
    }

    #[test]
    fn same_kind() {
        assert!((x() + Expr::one()).same_kind(&(Expr::one() + x())));
        assert!(!(x() + Expr::one()).same_kind(&(x() - Expr::one())));
        assert!(x().same_kind(&Expr::int(4)));
    }
}
