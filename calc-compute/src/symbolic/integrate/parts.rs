//! Integration by parts: `∫u dv = u*v - ∫v du`.
//!
//! The integrand is split into `u` and `dv` by the LIATE heuristic: `u` is the factor that comes
//! first in the order logarithmic, inverse trigonometric, algebraic. Trigonometric and exponential
//! factors are only ever part of `dv`.

use crate::symbolic::{
    derivative::derivative,
    expr::{Primary, SymExpr},
    simplify::{rules::product, simplify},
};
use super::integrate_inner;

/// How good a choice the factor is for `u`; lower is better. Returns [`None`] if the factor
/// should never be `u`.
fn rank(factor: &SymExpr, var: &str) -> Option<u8> {
    match factor {
        SymExpr::Primary(Primary::Call(name, args)) if args.iter().any(|arg| arg.contains_symbol(var)) => {
            match name.as_str() {
                "log" => Some(0),
                "asin" | "acos" | "atan" => Some(1),
                _ => None,
            }
        },
        SymExpr::Primary(Primary::Symbol(sym)) if sym == var => Some(2),
        SymExpr::Exp(base, exp) if base.as_symbol() == Some(var) => {
            let n = exp.as_number()?;
            (n.is_integer() && *n > 0).then_some(2)
        },
        _ => None,
    }
}

/// Tries to integrate `f` with respect to `var` by parts.
pub(super) fn integrate(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let factors = match f {
        SymExpr::Mul(factors) => factors.as_slice(),
        other => std::slice::from_ref(other),
    };

    let (u_idx, u_rank) = factors.iter()
        .enumerate()
        .filter_map(|(idx, factor)| Some((idx, rank(factor, var)?)))
        .min_by_key(|(_, rank)| *rank)?;

    // a lone power of the variable belongs to the table
    if factors.len() == 1 && u_rank == 2 {
        return None;
    }

    let u = &factors[u_idx];
    let dv = product(
        factors.iter()
            .enumerate()
            .filter(|(idx, _)| *idx != u_idx)
            .map(|(_, factor)| factor.clone()),
    );

    let v = simplify(&integrate_inner(&dv, var, depth + 1)?);
    let du = simplify(&derivative(u, var).ok()?);
    let remaining = simplify(&(v.clone() * du));
    let rest = integrate_inner(&remaining, var, depth + 1)?;

    log::debug!("by parts with u = {}, dv = {}", u, dv);
    Some(u.clone() * v - rest)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn by_parts(source: &str) -> Option<String> {
        let expr = simplify(&parse(source, &["x"]).unwrap());
        integrate(&expr, "x", 0).map(|result| simplify(&result).to_string())
    }

    #[test]
    fn liate_order() {
        let x = SymExpr::symbol("x");
        assert_eq!(rank(&SymExpr::call("log", vec![x.clone()]), "x"), Some(0));
        assert_eq!(rank(&SymExpr::call("atan", vec![x.clone()]), "x"), Some(1));
        assert_eq!(rank(&x.clone().pow(SymExpr::number(3)), "x"), Some(2));
        assert_eq!(rank(&x.clone().pow(SymExpr::number(-1)), "x"), None);
        assert_eq!(rank(&SymExpr::call("exp", vec![x]), "x"), None);
    }

    #[test]
    fn logarithm_times_power() {
        assert_eq!(by_parts("x log(x)").as_deref(), Some("-x**2/4 + x**2*log(x)/2"));
    }

    #[test]
    fn lone_power_is_left_alone() {
        assert_eq!(by_parts("x**3"), None);
    }

    #[test]
    fn no_algebraic_factor() {
        assert_eq!(by_parts("exp(x) sin(x)"), None);
    }
}
