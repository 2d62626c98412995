//! Replacing subexpressions, and finding subexpressions worth replacing.

use crate::{
    canonical::canonical_string,
    error::{Error, VariablesExhausted},
    expr::Expr,
};
use std::collections::{HashMap, VecDeque};

/// Replaces every subexpression of `expr` that is [equivalent](crate::equivalent) to `pattern`
/// with `replacement`.
///
/// Replaced subexpressions are not searched again, so a replacement that contains the pattern
/// does not recurse.
pub fn substitute(expr: &Expr, pattern: &Expr, replacement: &Expr) -> Expr {
    match pattern.as_symbol() {
        Some(name) => substitute_symbol(expr, name, replacement),
        None => substitute_canonical(expr, &canonical_string(pattern), replacement),
    }
}

fn substitute_symbol(expr: &Expr, name: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Symbol(found) if found == name => replacement.clone(),
        _ => expr.map_children(|child| substitute_symbol(child, name, replacement)),
    }
}

fn substitute_canonical(expr: &Expr, pattern: &str, replacement: &Expr) -> Expr {
    if canonical_string(expr) == pattern {
        return replacement.clone();
    }
    expr.map_children(|child| substitute_canonical(child, pattern, replacement))
}

/// Returns a single-letter variable name that does not appear in the expression. The constants `e`
/// and `i` are never returned.
pub fn allocate_variable(expr: &Expr) -> Option<String> {
    let used = expr.symbols();
    ('a'..='z')
        .filter(|c| !matches!(c, 'e' | 'i'))
        .map(String::from)
        .find(|name| !used.contains(&name.as_str()))
}

/// Finds the subexpression of `expr` whose replacement with a fresh variable removes every
/// occurrence of `variable`.
///
/// Subexpressions below the root are visited breadth-first, and counted by canonical form. Among
/// those whose replacement eliminates `variable`, the most frequent one is returned, with ties
/// going to the one found first. Symbols are never candidates.
///
/// Returns [`VariablesExhausted`] if no fresh variable is available to test the replacement with.
pub fn candidate(expr: &Expr, variable: &str) -> Result<Option<Expr>, Error> {
    let mut found: Vec<(String, &Expr)> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    let mut queue = expr.children().into_iter().collect::<VecDeque<_>>();
    while let Some(node) = queue.pop_front() {
        queue.extend(node.children());
        if matches!(node, Expr::Symbol(_)) || !node.contains(variable) {
            continue;
        }

        let key = canonical_string(node);
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            found.push((key, node));
        }
        *count += 1;
    }

    if found.is_empty() {
        return Ok(None);
    }

    let fresh = allocate_variable(expr)
        .map(Expr::Symbol)
        .ok_or_else(|| Error::spanless(VariablesExhausted))?;

    let mut best: Option<(usize, &Expr)> = None;
    for (key, node) in found {
        if substitute(expr, node, &fresh).contains(variable) {
            continue;
        }

        let count = counts.get(&key).copied().unwrap_or(0);
        if best.map_or(true, |(best_count, _)| count > best_count) {
            best = Some((count, node));
        }
    }

    Ok(best.map(|(_, node)| node.clone()))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;
    use symsolve_error::ErrorKind;

    #[test]
    fn replace_symbol() {
        let expr = parse("x^2 + 2x + y").unwrap();
        let result = substitute(&expr, &Expr::symbol("x"), &parse("a + 1").unwrap());
        assert_eq!(result.to_string(), "((((a+1)^2)+(2*(a+1)))+y)");
    }

    #[test]
    fn substitute_reordered_pattern() {
        let expr = parse("(x*y)^2 + y*x").unwrap();
        let result = substitute(&expr, &parse("y*x").unwrap(), &Expr::symbol("a"));
        assert_eq!(result.to_string(), "((a^2)+a)");
    }

    #[test]
    fn allocate() {
        assert_eq!(allocate_variable(&parse("x + y").unwrap()), Some("a".to_string()));
        assert_eq!(allocate_variable(&parse("a + b + c + d").unwrap()), Some("f".to_string()));
        assert_eq!(allocate_variable(&parse("e + f + g + h").unwrap()), Some("a".to_string()));
    }

    #[test]
    fn exhausted() {
        let all = "a+b+c+d+f+g+h+j+k+l+m+n+o+p+q+r+s+t+u+v+w+x+y+z";
        let expr = parse(&format!("(x^2 + 1)^2 + (x^2 + 1) + {}", all)).unwrap();
        assert_eq!(allocate_variable(&expr), None);
        assert_eq!(candidate(&expr, "x").unwrap_err().to_string(), VariablesExhausted.message());
    }

    #[test]
    fn repeated_subexpression() {
        let expr = parse("(x^2 + 1)^2 + 3(x^2 + 1)").unwrap();
        assert_eq!(candidate(&expr, "x").unwrap(), Some(parse("x^2 + 1").unwrap()));
    }

    #[test]
    fn exponential_candidate() {
        let expr = parse("e^x * e^x - e^x").unwrap();
        assert_eq!(candidate(&expr, "x").unwrap(), Some(parse("e^x").unwrap()));
    }

    #[test]
    fn no_candidate() {
        let expr = parse("x^2 + x").unwrap();
        assert_eq!(candidate(&expr, "x").unwrap(), None);
        assert_eq!(candidate(&parse("2 + y").unwrap(), "x").unwrap(), None);
    }
}
