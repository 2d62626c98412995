pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod op;
pub mod paren;
pub mod token;
pub mod unary;

use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use symsolve_error::ErrorKind;

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of input into a syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Set the cursor of this parser to the cursor of another parser over the same source.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.current_token().map_or(false, Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    if values.is_empty() {
                        self.cursor = start;
                        return Err(err);
                    } else {
                        return Ok(values);
                    }
                },
            }

            self.skip_whitespace();
            match self.current_token() {
                Some(token) if token.kind == delimiter => {
                    self.cursor += 1;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of the equals sign (`=`) separating the sides of an equation.
    Equation,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    /// Implicit multiplication (`2x`) has the same precedence.
    Factor,

    /// Precedence of unary plus (`+`) and unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^` and `**`).
    Exp,

    /// Precedence of factorial (`!`).
    Factorial,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use paren::Paren;
    use unary::Unary;

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.14", 0..4));
    }

    #[test]
    fn literal_symbol() {
        let mut parser = Parser::new("  pi  ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, sym("pi", 2..4));
    }

    #[test]
    fn unary_left_associativity() {
        let mut parser = Parser::new("3!!");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: Box::new(num("3", 0..1)),
                op: UnaryOp { kind: UnaryOpKind::Factorial, span: 1..2 },
                span: 0..2,
            })),
            op: UnaryOp { kind: UnaryOpKind::Factorial, span: 2..3 },
            span: 0..3,
        }));
    }

    #[test]
    fn unary_right_associativity() {
        let mut parser = Parser::new("-+3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: Box::new(num("3", 2..3)),
                op: UnaryOp { kind: UnaryOpKind::Plus, span: 1..2 },
                span: 1..3,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..3,
        }));
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3 * x * 5");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("3", 0..1), BinOpKind::Mul, false, 2..3, sym("x", 4..5)),
            BinOpKind::Mul,
            false,
            6..7,
            num("5", 8..9),
        ));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("2^3**4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            bin(num("3", 2..3), BinOpKind::Exp, false, 3..5, num("4", 5..6)),
        ));
    }

    #[test]
    fn binary_mix_precedence() {
        let mut parser = Parser::new("3 + 4 * a - b");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(
                num("3", 0..1),
                BinOpKind::Add,
                false,
                2..3,
                bin(num("4", 4..5), BinOpKind::Mul, false, 6..7, sym("a", 8..9)),
            ),
            BinOpKind::Sub,
            false,
            10..11,
            sym("b", 12..13),
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("1 + 2x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("1", 0..1),
            BinOpKind::Add,
            false,
            2..3,
            bin(
                num("2", 4..5),
                BinOpKind::Mul,
                true,
                5..5,
                bin(sym("x", 5..6), BinOpKind::Exp, false, 6..7, num("2", 7..8)),
            ),
        ));
    }

    #[test]
    fn equation() {
        let mut parser = Parser::new("2x = 4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("x", 1..2)),
            BinOpKind::Eq,
            false,
            3..4,
            num("4", 5..6),
        ));
    }

    #[test]
    fn parenthesized() {
        let mut parser = Parser::new("(x + 1) / 2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            Expr::Paren(Paren {
                expr: Box::new(bin(sym("x", 1..2), BinOpKind::Add, false, 3..4, num("1", 5..6))),
                span: 0..7,
            }),
            BinOpKind::Div,
            false,
            8..9,
            num("2", 10..11),
        ));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("log(2, x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![num("2", 4..5), sym("x", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.to_string(), "unclosed parenthesis");
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![0..2]);
        assert_eq!(err.to_string(), "missing expression inside parenthesis");
    }

    #[test]
    fn trailing_garbage() {
        let mut parser = Parser::new("x + 1 )");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![6..7]);
        assert_eq!(err.to_string(), "expected end of input");
    }

    #[test]
    fn unexpected_eof() {
        let mut parser = Parser::new("x + ");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }
}
