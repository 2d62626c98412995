//! Interpretation of numeric symbols.
//!
//! Numbers are stored as [`Expr::Symbol`]s whose name is numeric text: an optional leading `-`,
//! followed by digits with at most one decimal point. Exact arithmetic is done with [`rug`]'s
//! [`Integer`] and [`Rational`]; decimals are folded with `f64`.

use rug::{Integer, Rational};
use super::{BinOp, Expr};

/// Returns true if the text is a number: an optional `-`, then digits with at most one `.`.
/// Text like `inf` or `NaN` is not numeric.
pub fn is_numeric_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut points = 0;
    let mut has_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '.' => points += 1,
            _ => return false,
        }
    }
    has_digit && points <= 1
}

/// Returns true if the text is an integer: an optional `-`, then only digits.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl Expr {
    /// Returns true if the expression is a numeric symbol.
    pub fn is_numeric(&self) -> bool {
        self.as_symbol().is_some_and(is_numeric_text)
    }

    /// Returns true if the expression is a numeric symbol with a decimal point.
    pub fn is_decimal(&self) -> bool {
        self.as_symbol().is_some_and(|name| is_numeric_text(name) && name.contains('.'))
    }

    /// If the expression is an integer symbol, returns its value.
    pub fn as_integer(&self) -> Option<Integer> {
        let name = self.as_symbol().filter(|name| is_integer_text(name))?;
        name.parse::<Integer>().ok()
    }

    /// If the expression is an integer symbol that fits in an `i64`, returns its value.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()?.to_i64()
    }

    /// If the expression is an integer, or the quotient of two integers with a non-zero
    /// denominator, returns its exact value.
    pub fn as_rational(&self) -> Option<Rational> {
        if let Some(int) = self.as_integer() {
            return Some(Rational::from(int));
        }

        let (num, den) = self.as_binary(BinOp::Divide)?;
        let (num, den) = (num.as_integer()?, den.as_integer()?);
        if den == 0 {
            return None;
        }
        Some(Rational::from((num, den)))
    }

    /// If the expression is a numeric symbol, or the quotient of two numeric expressions with a
    /// non-zero denominator, returns its value as an `f64`.
    pub fn as_float(&self) -> Option<f64> {
        if let Some(name) = self.as_symbol() {
            return if is_numeric_text(name) { name.parse().ok() } else { None };
        }

        let (num, den) = self.as_binary(BinOp::Divide)?;
        let (num, den) = (num.as_float()?, den.as_float()?);
        if den == 0.0 {
            return None;
        }
        Some(num / den)
    }

    /// Creates an integer symbol from an [`Integer`].
    pub fn from_integer(value: &Integer) -> Self {
        Self::Symbol(value.to_string())
    }

    /// Creates the expression for a [`Rational`]: a symbol if its denominator is 1, and a quotient
    /// of two integer symbols otherwise.
    pub fn from_rational(value: &Rational) -> Self {
        if *value.denom() == 1 {
            Self::from_integer(value.numer())
        } else {
            Self::binary(
                BinOp::Divide,
                Self::from_integer(value.numer()),
                Self::from_integer(value.denom()),
            )
        }
    }

    /// Creates a numeric symbol from an `f64`. Integral values are written without a decimal
    /// point. Returns [`None`] if the value is not finite.
    pub fn from_float(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        if value.fract() == 0.0 && value.abs() < 1e15 {
            Some(Self::int(value as i64))
        } else {
            Some(Self::Symbol(value.to_string()))
        }
    }

    /// Returns true if the expression is a numeric symbol equal to zero.
    pub fn is_zero(&self) -> bool {
        self.is_numeric() && self.as_float() == Some(0.0)
    }

    /// Returns true if the expression is a numeric symbol equal to one.
    pub fn is_one(&self) -> bool {
        self.is_numeric() && self.as_float() == Some(1.0)
    }

    /// Returns true if the expression is a numeric symbol equal to negative one.
    pub fn is_minus_one(&self) -> bool {
        self.is_numeric() && self.as_float() == Some(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn int(value: i64) -> Integer {
        Integer::from(value)
    }

    #[test]
    fn numeric_text() {
        assert!(is_numeric_text("12"));
        assert!(is_numeric_text("-12"));
        assert!(is_numeric_text("3.25"));
        assert!(!is_numeric_text("1.2.3"));
        assert!(!is_numeric_text("-"));
        assert!(!is_numeric_text("inf"));
        assert!(!is_numeric_text("NaN"));
        assert!(!is_numeric_text("x2"));
    }

    #[test]
    fn integers() {
        assert_eq!(Expr::int(-42).as_integer(), Some(int(-42)));
        assert_eq!(Expr::symbol("3.0").as_integer(), None);
        assert_eq!(Expr::symbol("x").as_integer(), None);
        assert_eq!(Expr::symbol("123456789012345678901234567890").as_i64(), None);
    }

    #[test]
    fn rationals() {
        let half = Expr::int(2) / Expr::int(4);
        assert_eq!(half.as_rational(), Some(Rational::from((1, 2))));
        assert_eq!((Expr::one() / Expr::zero()).as_rational(), None);
        assert_eq!(Expr::from_rational(&Rational::from((6, 3))), Expr::int(2));
        assert_eq!(Expr::from_rational(&Rational::from((-3, 4))).to_string(), "((-3)/4)");
    }

    #[test]
    fn floats() {
        assert_eq!(Expr::symbol("0.5").as_float(), Some(0.5));
        assert_eq!((Expr::int(1) / Expr::int(4)).as_float(), Some(0.25));
        assert_eq!(Expr::from_float(3.0), Some(Expr::int(3)));
        assert_eq!(Expr::from_float(-0.0), Some(Expr::int(0)));
        assert_eq!(Expr::from_float(0.75), Some(Expr::symbol("0.75")));
        assert_eq!(Expr::from_float(f64::INFINITY), None);
        assert_eq!(Expr::from_float(f64::NAN), None);
    }

    #[test]
    fn constants() {
        assert!(Expr::symbol("0.0").is_zero());
        assert!(Expr::symbol("-0").is_zero());
        assert!(Expr::one().is_one());
        assert!(Expr::symbol("-1.0").is_minus_one());
        assert!(!Expr::symbol("e").is_one());
    }
}
