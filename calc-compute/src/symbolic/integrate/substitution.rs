//! Integration by substitution.
//!
//! For an integrand `f(x)` and a candidate inner function `g(x)`, the quotient `f(x) / g'(x)` is
//! simplified and every occurrence of `g(x)` in it is replaced by a fresh symbol `u`. If the
//! result no longer depends on `x`, it is some `h(u)` with `f(x) = h(g(x))*g'(x)`, and the
//! antiderivative is `H(g(x))`, where `H` is an antiderivative of `h`.
//!
//! This also covers the `f'/f` and `g^n*g'` forms, since `f` and `g` are candidates too.

use crate::symbolic::{derivative::derivative, expr::SymExpr, simplify::simplify};
use super::integrate_inner;

/// Returns a symbol that does not appear in the expression.
fn fresh_symbol(f: &SymExpr, depth: usize) -> String {
    let mut name = format!("_u{}", depth);
    while f.contains_symbol(&name) {
        name.push('_');
    }
    name
}

/// Returns the subexpressions of `f` worth trying as the inner function `g`, innermost first,
/// without duplicates.
fn candidates<'a>(f: &'a SymExpr, var: &str) -> Vec<&'a SymExpr> {
    let mut found: Vec<&SymExpr> = Vec::new();
    for expr in f.post_order_iter() {
        if std::ptr::eq(expr, f)
            || expr.as_symbol() == Some(var)
            || !expr.contains_symbol(var)
            || found.contains(&expr)
        {
            continue;
        }
        found.push(expr);
    }
    found
}

/// Tries to integrate `f` with respect to `var` by substitution.
pub(super) fn integrate(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let name = fresh_symbol(f, depth);
    let u = SymExpr::symbol(name.as_str());

    for g in candidates(f, var) {
        let Ok(dg) = derivative(g, var) else {
            continue;
        };
        let dg = simplify(&dg);
        if dg.is_zero() {
            continue;
        }

        let quotient = simplify(&(f.clone() * dg.recip()));
        let h = simplify(&quotient.substitute(g, &u));
        if h.contains_symbol(var) {
            continue;
        }

        if let Some(antiderivative) = integrate_inner(&h, &name, depth + 1) {
            log::debug!("substituted {} = {} into ∫{} d{}", name, g, f, var);
            return Some(antiderivative.substitute(&u, g));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn inner_functions_come_first() {
        let expr = parse("sin(x**2) + x", &["x"]).unwrap();
        let found = candidates(&expr, "x")
            .into_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(found, vec!["x**2", "sin(x**2)"]);
    }

    #[test]
    fn fresh_symbol_avoids_collisions() {
        let expr = parse("_u0 + x", &["x"]).unwrap();
        assert_eq!(fresh_symbol(&expr, 0), "_u0_");
        assert_eq!(fresh_symbol(&expr, 1), "_u1");
    }

    #[test]
    fn logarithmic_derivative() {
        let expr = simplify(&parse("(2x + 3)/(x**2 + 3x)", &["x"]).unwrap());
        let result = simplify(&integrate(&expr, "x", 0).unwrap());
        assert_eq!(result.to_string(), "log(x**2 + 3*x)");
    }
}
