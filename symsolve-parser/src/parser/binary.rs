use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::Expr,
    op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parse,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Creates the node `lhs op rhs`.
    fn join(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        })
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5

            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            let next_precedence = match input_ahead.try_parse::<BinOp>() {
                Ok(next_op) if next_op.precedence() > precedence
                    || (next_op.precedence() == precedence
                        && next_op.associativity() == Associativity::Right) => next_op.precedence(),

                // lower precedence, or equal precedence and left-associativity, such as
                // `1 * 2 + 3` or `1 * 2 * 3`: let `lhs` become `1 * 2` and parse this operator on
                // the next iteration of the outside loop
                Ok(_) => break,

                // there is no operator, but there could be a primary expression instead; this is
                // implicit multiplication, which binds as tightly as a factor
                Err(_) if precedence < Precedence::Factor => Precedence::Factor,
                Err(_) => break,
            };

            let before = input.clone();
            rhs = Self::parse_expr(input, rhs, next_precedence)?;
            if input.span() == before.span() {
                break;
            }
        }

        Ok(Self::join(lhs, op, rhs))
    }

    /// Parses a binary expression whose left-hand side is `lhs`, consuming operators whose
    /// precedence is at least `precedence`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else if Precedence::Factor >= precedence {
                // implicit multiplication test
                //
                // ensure that we get here because there is *no* operator, not because the
                // operator has lower precedence
                if input_ahead.try_parse::<BinOp>().is_ok() {
                    break;
                }

                // if there is no expression, there is no implicit multiplication and all our
                // attempts to parse a binary expression fail
                let Ok(rhs) = input.try_parse_with_fn(Unary::parse_or_lower) else {
                    break;
                };
                let op_span = lhs.span().end..rhs.span().start;
                lhs = Self::complete_rhs(input, lhs, BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: op_span,
                }, rhs)?;
            } else {
                break;
            }
        }

        Ok(lhs)
    }
}

impl Parse for Binary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.try_parse::<Expr>()? {
            Expr::Binary(binary) => Ok(binary),
            _ => Err(input.error(kind::NonFatal)),
        }
    }
}
