//! Conversion from the parser's AST into [`Expr`].

use crate::error::{ArgumentCount, Error, UnknownFunction};
use symsolve_parser::parser::{
    call::Call,
    expr::Expr as AstExpr,
    literal::Literal,
    op::{BinOpKind, UnaryOpKind},
    Parser,
};
use super::{BinOp, Expr, UnaryOp};

/// Parses the given source into an [`Expr`].
///
/// ```
/// use symsolve_algebra::parse;
///
/// let expr = parse("2x^2 + sqrt(y)").unwrap();
/// assert_eq!(expr.to_string(), "((2*(x^2))+(y^(1/2)))");
/// ```
pub fn parse(input: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(input);
    let ast = parser.try_parse_full::<AstExpr>()?;
    Expr::try_from(&ast)
}

impl TryFrom<&AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: &AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => {
                // `4.` is written as `4`
                let value = match num.value.strip_suffix('.') {
                    Some(int) if !int.is_empty() => int,
                    _ => num.value.as_str(),
                };
                Ok(Self::symbol(value))
            },
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(Self::symbol(&sym.name)),
            AstExpr::Paren(paren) => Self::try_from(paren.expr.as_ref()),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::Unary(unary) => {
                let operand = Self::try_from(unary.operand.as_ref())?;
                let op = match unary.op.kind {
                    UnaryOpKind::Plus => UnaryOp::Plus,
                    UnaryOpKind::Neg => UnaryOp::Minus,
                    UnaryOpKind::Factorial => UnaryOp::Factorial,
                };
                Ok(Self::unary(op, operand))
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(bin.lhs.as_ref())?;
                let rhs = Self::try_from(bin.rhs.as_ref())?;
                let op = match bin.op.kind {
                    BinOpKind::Exp => BinOp::Exponentiate,
                    BinOpKind::Mul => BinOp::Multiply,
                    BinOpKind::Div => BinOp::Divide,
                    BinOpKind::Add => BinOp::Add,
                    BinOpKind::Sub => BinOp::Subtract,
                    BinOpKind::Eq => BinOp::Equals,
                };
                Ok(Self::binary(op, lhs, rhs))
            },
        }
    }
}

/// Checks that the call has the expected number of arguments.
fn expect_args(call: &Call, expected: usize) -> Result<(), Error> {
    if call.args.len() == expected {
        Ok(())
    } else {
        Err(Error::new(vec![call.span()], ArgumentCount {
            name: call.name.name.clone(),
            expected,
            given: call.args.len(),
        }))
    }
}

/// Converts a function call into the operation it names.
///
/// A call to an unknown name with a single argument, such as `x(x + 1)`, is read as implicit
/// multiplication.
fn convert_call(call: &Call) -> Result<Expr, Error> {
    let args = call.args.iter()
        .map(Expr::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let mut args = args.into_iter();
    let mut next_arg = || args.next().unwrap_or_else(Expr::zero);

    let unary = match call.name.name.as_str() {
        "sin" => Some(UnaryOp::Sine),
        "cos" => Some(UnaryOp::Cosine),
        "W" | "lambertw" => Some(UnaryOp::LambertW),
        "InverseFactorial" => Some(UnaryOp::InverseFactorial),
        _ => None,
    };
    if let Some(op) = unary {
        expect_args(call, 1)?;
        return Ok(Expr::unary(op, next_arg()));
    }

    match call.name.name.as_str() {
        "log" => {
            expect_args(call, 2)?;
            let base = next_arg();
            Ok(Expr::log(base, next_arg()))
        },
        "ln" => {
            expect_args(call, 1)?;
            Ok(Expr::log(Expr::symbol("e"), next_arg()))
        },
        "sqrt" => {
            expect_args(call, 1)?;
            Ok(Expr::sqrt(next_arg()))
        },
        name if call.args.len() == 1 => Ok(Expr::symbol(name) * next_arg()),
        name => Err(Error::new(vec![call.name.span.clone()], UnknownFunction {
            name: name.to_string(),
        })),
    }
}
