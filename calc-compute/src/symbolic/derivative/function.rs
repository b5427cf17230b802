//! Derivatives of the functions the parser recognizes.

use crate::symbolic::expr::SymExpr;
use super::{derivative, DerivativeError, MultBuilder};

/// `1 - u^2` or `1 + u^2`.
fn one_plus_square(u: &SymExpr, sign: i32) -> SymExpr {
    SymExpr::one() + SymExpr::number(sign) * u.clone().pow(SymExpr::number(2))
}

/// Computes the derivative of `name(u)` with respect to `var` and applies the chain rule.
pub(super) fn function_derivative(name: &str, args: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let [u] = args else {
        return Err(DerivativeError::Unsupported(name.to_string()));
    };
    let call = |name: &str| SymExpr::call(name, vec![u.clone()]);

    let outer = match name {
        "sin" => call("cos"),
        "cos" => -call("sin"),
        "tan" => call("sec").pow(SymExpr::number(2)),
        "sec" => call("sec") * call("tan"),
        "csc" => -(call("csc") * call("cot")),
        "cot" => -call("csc").pow(SymExpr::number(2)),
        "exp" => call("exp"),
        "log" => u.clone().recip(),
        "asin" => one_plus_square(u, -1).pow(SymExpr::number((-1, 2))),
        "acos" => -one_plus_square(u, -1).pow(SymExpr::number((-1, 2))),
        "atan" => one_plus_square(u, 1).recip(),
        "sinh" => call("cosh"),
        "cosh" => call("sinh"),
        "tanh" => call("cosh").pow(SymExpr::number(-2)),
        "abs" => u.clone() * call("abs").recip(),
        _ => return Err(DerivativeError::Unsupported(name.to_string())),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer);
    mult_group.mult(derivative(u, var)?);
    Ok(mult_group.into())
}
