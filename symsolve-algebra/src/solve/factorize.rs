//! Strategies for equations whose variable appears on both sides of an operation.
//!
//! Each strategy either solves the equation (possibly by solving simpler equations with the
//! [`Solver`]), or declines by returning `Ok(None)`. Strategies are tried in order, and the first
//! one to produce solutions wins.

use crate::{
    canonical::equivalent,
    collect::collect,
    error::{Error, VariablesExhausted},
    expand::expand,
    expr::{BinOp, Expr},
    polynomial::{cubic, quadratic::complete_square, Polynomial},
    simplify::simplify,
    substitution::{allocate_variable, candidate, substitute},
    terms::{factors, terms},
};
use log::{debug, trace};
use super::{inverse::invert, lambert, Solver};

/// The maximum number of times a denominator is multiplied out of an equation.
const MAX_CLEARINGS: usize = 4;

/// An equation `lhs = rhs` to solve for `variable`.
pub(crate) struct Problem<'a> {
    pub lhs: &'a Expr,
    pub rhs: &'a Expr,
    pub variable: &'a str,
    pub depth: usize,
}

impl Problem<'_> {
    /// `lhs - rhs`, simplified.
    fn difference(&self) -> Result<Expr, Error> {
        simplify(&(self.lhs.clone() - self.rhs.clone()))
    }
}

type Strategy = fn(&mut Solver, &Problem) -> Result<Option<Vec<Expr>>, Error>;

/// The strategies, in the order they are tried.
const STRATEGIES: [(&str, Strategy); 7] = [
    ("substitution", substitution),
    ("zero product", zero_product),
    ("polynomial", polynomial),
    ("resimplify", resimplify),
    ("rational clearing", rational_clearing),
    ("expanded polynomial", expanded_polynomial),
    ("lambert w", lambert_w),
];

/// Simplifies, expands, collects and simplifies again.
fn rearrange(expr: &Expr, variable: &str) -> Result<Expr, Error> {
    let expr = expand(&simplify(expr)?, variable)?;
    simplify(&collect(&expr, variable))
}

/// Returns true if the equation `expr = ...` can be solved by inverting operations.
fn is_invertible(expr: &Expr, variable: &str) -> bool {
    expr.is_named(variable) || invert(expr, &Expr::zero(), variable).is_some()
}

/// Tries each strategy in turn. Returns no solutions if none of them succeed.
pub(crate) fn factorize(solver: &mut Solver, problem: &Problem) -> Vec<Expr> {
    for (name, strategy) in STRATEGIES {
        match strategy(solver, problem) {
            Ok(Some(solutions)) if !solutions.is_empty() => {
                debug!("{} solved {} = {}", name, problem.lhs, problem.rhs);
                return solutions;
            },
            Ok(_) => trace!("{} does not apply to {} = {}", name, problem.lhs, problem.rhs),
            Err(err) => debug!("{} failed on {} = {}: {}", name, problem.lhs, problem.rhs, err),
        }
    }

    debug!("no strategy solves {} = {}", problem.lhs, problem.rhs);
    Vec::new()
}

/// Replaces the most common subexpression containing the variable with a fresh variable, solves
/// for the fresh variable, then solves `subexpression = value` for each of its values.
///
/// `e^(2x) + e^x = 6` becomes `a^2 + a = 6`.
fn substitution(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let Some(pattern) = candidate(problem.lhs, problem.variable)? else {
        return Ok(None);
    };
    let fresh = allocate_variable(&(problem.lhs.clone() - problem.rhs.clone()))
        .ok_or_else(|| Error::spanless(VariablesExhausted))?;

    let replaced = substitute(problem.lhs, &pattern, &Expr::symbol(fresh.as_str()));
    let values = solver.solve(replaced, problem.rhs.clone(), &fresh, problem.depth + 1);

    let solutions = values.into_iter()
        .flat_map(|value| solver.solve(pattern.clone(), value, problem.variable, problem.depth + 1))
        .collect();
    Ok(Some(solutions))
}

/// If the right-hand side is zero, solves `factor = 0` for each factor of the left-hand side.
fn zero_product(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    if !simplify(problem.rhs)?.is_zero() {
        return Ok(None);
    }

    let factors = factors(problem.lhs, 0);
    if factors.len() < 2 {
        return Ok(None);
    }

    let solutions = factors.into_iter()
        .filter(|factor| factor.as_reciprocal().is_none() && factor.contains(problem.variable))
        .flat_map(|factor| solver.solve(factor, Expr::zero(), problem.variable, problem.depth + 1))
        .collect();
    Ok(Some(solutions))
}

/// Solves quadratics by completing the square, and cubics by reducing them to quadratics.
fn solve_polynomial(
    solver: &mut Solver,
    expr: &Expr,
    variable: &str,
    depth: usize,
) -> Result<Option<Vec<Expr>>, Error> {
    let poly = Polynomial::new(expr, variable);
    if !poly.is_valid() || poly.lowest_degree() < 0 {
        return Ok(None);
    }

    match poly.degree() {
        2 => {
            let Some(square) = complete_square(&poly)? else {
                return Ok(None);
            };
            Ok(Some(solver.solve(square, Expr::zero(), variable, depth + 1)))
        },
        3 => solve_cubic(solver, &poly, variable, depth),
        _ => Ok(None),
    }
}

fn solve_cubic(
    solver: &mut Solver,
    poly: &Polynomial,
    variable: &str,
    depth: usize,
) -> Result<Option<Vec<Expr>>, Error> {
    let Some(depressed) = cubic::depress(poly)? else {
        return Ok(None);
    };

    let roots = if depressed.polynomial.coefficient(0).is_zero() {
        // t^3 + p*t = t*(t^2 + p)
        let quadratic = depressed.polynomial.lower().expression();
        let mut roots = vec![Expr::zero()];
        roots.extend(solver.solve(quadratic, Expr::zero(), variable, depth + 1));
        roots
    } else {
        let Some(resolvent) = cubic::vieta(&depressed.polynomial)? else {
            return Ok(None);
        };
        let (Some(square), Some(cube)) = (
            complete_square(&resolvent.polynomial)?,
            resolvent.polynomial.variable().cloned(),
        ) else {
            return Ok(None);
        };

        // both roots of the resolvent lead to the same three roots of the cubic, so only the
        // cube roots of one of them are needed
        let fresh = allocate_variable(&square)
            .ok_or_else(|| Error::spanless(VariablesExhausted))?;
        let in_cube = substitute(&square, &cube, &Expr::symbol(&fresh));
        if in_cube.contains(variable) {
            debug!("{} is not a quadratic in {}", square, cube);
            return Ok(None);
        }
        let Some(value) = solver.solve(in_cube, Expr::zero(), &fresh, depth + 1)
            .into_iter()
            .find(|value| simplify(value).is_ok_and(|value| !value.is_zero()))
        else {
            return Ok(None);
        };

        trace!("{} = {}", cube, value);
        solver.solve(cube, value, variable, depth + 1)
            .into_iter()
            .map(|w| resolvent.restore(w))
            .collect()
    };

    Ok(Some(roots.into_iter().map(|root| depressed.restore(root)).collect()))
}

/// Reads `lhs - rhs` as a polynomial.
fn polynomial(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let expr = problem.difference()?;
    solve_polynomial(solver, &expr, problem.variable, problem.depth)
}

/// Rearranges the left-hand side, and solves it again if that makes it invertible. A quotient
/// with the variable in its denominator is multiplied out.
fn resimplify(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let lhs = rearrange(problem.lhs, problem.variable)?;

    if let Some((num, den)) = lhs.as_binary(BinOp::Divide) {
        if den.contains(problem.variable) {
            let cleared = num.clone() - problem.rhs.clone() * den.clone();
            return Ok(Some(solver.solve(cleared, Expr::zero(), problem.variable, problem.depth + 1)));
        }
    }

    if equivalent(&lhs, problem.lhs) || !is_invertible(&lhs, problem.variable) {
        return Ok(None);
    }
    Ok(Some(solver.solve(lhs, problem.rhs.clone(), problem.variable, problem.depth + 1)))
}

/// Returns the first denominator containing the variable in any term of the expression.
fn variable_denominator(expr: &Expr, variable: &str) -> Option<Expr> {
    terms(expr).iter()
        .flat_map(|term| factors(term, 0))
        .find_map(|factor| factor.as_reciprocal().filter(|den| den.contains(variable)).cloned())
}

/// Multiplies `lhs - rhs = 0` by denominators containing the variable until none are left.
fn rational_clearing(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let mut expr = problem.difference()?;
    if variable_denominator(&expr, problem.variable).is_none() {
        return Ok(None);
    }

    for _ in 0..MAX_CLEARINGS {
        let Some(den) = variable_denominator(&expr, problem.variable) else {
            return Ok(Some(solver.solve(expr, Expr::zero(), problem.variable, problem.depth + 1)));
        };
        expr = rearrange(&(expr * den), problem.variable)?;
    }

    Ok(None)
}

/// Reads the fully expanded `lhs - rhs` as a polynomial.
fn expanded_polynomial(solver: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let expr = rearrange(&problem.difference()?, problem.variable)?;
    solve_polynomial(solver, &expr, problem.variable, problem.depth)
}

/// Solves `c*x + k*a^x = d` and `x*a^x = b` with the Lambert W function.
fn lambert_w(_: &mut Solver, problem: &Problem) -> Result<Option<Vec<Expr>>, Error> {
    let expr = problem.difference()?;
    Ok(lambert::solve(&expr, problem.variable).map(|root| vec![root]))
}
