use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseParen, OpenParen},
    Parse,
    Parser
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let expr = match input.try_parse::<Expr>() {
            Ok(expr) => expr,
            Err(err) => {
                return match input.try_parse::<CloseParen>() {
                    Ok(close_paren) => Err(Error::new(
                        vec![open_paren.span.start..close_paren.span.end],
                        kind::EmptyParenthesis,
                    )),
                    Err(_) => Err(err),
                };
            },
        };
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(vec![open_paren.span.clone()], kind::UnclosedParenthesis))?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
