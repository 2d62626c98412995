use crate::{canonical::canonical, error::{Error, FixedPointLimit}, expr::Expr};
use log::warn;

/// The maximum number of passes a rewriting loop may take before giving up.
pub const MAX_PASSES: usize = 64;

/// Applies `pass` to the expression until its canonical form stops changing, and returns that
/// canonical form.
///
/// Returns [`FixedPointLimit`] if the expression is still changing after [`MAX_PASSES`] passes.
pub(crate) fn fixed_point<F>(name: &'static str, expr: &Expr, mut pass: F) -> Result<Expr, Error>
where
    F: FnMut(&Expr) -> Result<Expr, Error>,
{
    let mut current = canonical(expr);
    let mut current_str = current.to_string();

    for _ in 0..MAX_PASSES {
        let next = canonical(&pass(&current)?);
        let next_str = next.to_string();
        if next_str == current_str {
            return Ok(next);
        }

        current = next;
        current_str = next_str;
    }

    warn!("{} did not settle after {} passes: {}", name, MAX_PASSES, current_str);
    Err(Error::spanless(FixedPointLimit { pass: name, limit: MAX_PASSES }))
}
