//! Antiderivatives that can be read directly off a table.
//!
//! Every entry applies to a linear argument `u = a*x + b`, dividing the tabulated antiderivative
//! by `a`.

use crate::{primitive::rational, symbolic::expr::{make_fraction, Primary, SymExpr}};
use super::linear_coefficient;

fn call(name: &str, u: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![u.clone()])
}

/// Returns `u` if the expression is `1 + sign*u^2`, in any order.
fn one_plus_square<'a>(expr: &'a SymExpr, sign: i32) -> Option<&'a SymExpr> {
    let SymExpr::Add(terms) = expr else {
        return None;
    };
    let [first, second] = terms.as_slice() else {
        return None;
    };
    let square = if first.is_one() {
        second
    } else if second.is_one() {
        first
    } else {
        return None;
    };

    let (coeff, rest) = square.split_coefficient();
    if coeff != sign {
        return None;
    }
    match rest {
        SymExpr::Exp(_, ref exp) if exp.as_number().is_some_and(|n| *n == 2) => {},
        _ => return None,
    }
    match square {
        SymExpr::Exp(base, _) => Some(base),
        SymExpr::Mul(factors) => factors.iter().find_map(|factor| match factor {
            SymExpr::Exp(base, _) => Some(&**base),
            _ => None,
        }),
        _ => None,
    }
}

/// `∫f(u) du` for the functions with an elementary antiderivative.
fn function(name: &str, u: &SymExpr) -> Option<SymExpr> {
    let result = match name {
        "sin" => -call("cos", u),
        "cos" => call("sin", u),
        "tan" => -call("log", &call("cos", u)),
        "sec" => call("log", &(call("sec", u) + call("tan", u))),
        "csc" => -call("log", &(call("csc", u) + call("cot", u))),
        "cot" => call("log", &call("sin", u)),
        "exp" => call("exp", u),
        "log" => u.clone() * call("log", u) - u.clone(),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "tanh" => call("log", &call("cosh", u)),
        _ => return None,
    };
    Some(result)
}

/// `∫f(u)^n du` for the squares of trigonometric functions, and their reciprocals.
fn trig_power(name: &str, u: &SymExpr, n: i32) -> Option<SymExpr> {
    let double = || call("sin", &(SymExpr::number(2) * u.clone()));
    let result = match (name, n) {
        ("sec", 2) | ("cos", -2) => call("tan", u),
        ("csc", 2) | ("sin", -2) => -call("cot", u),
        ("sin", 2) => make_fraction(u.clone(), SymExpr::number(2)) - make_fraction(double(), SymExpr::number(4)),
        ("cos", 2) => make_fraction(u.clone(), SymExpr::number(2)) + make_fraction(double(), SymExpr::number(4)),
        ("tan", 2) => call("tan", u) - u.clone(),
        ("cot", 2) => -call("cot", u) - u.clone(),
        _ => return None,
    };
    Some(result)
}

/// `∫base^exp dx`
fn power(base: &SymExpr, exp: &SymExpr, var: &str) -> Option<SymExpr> {
    if !base.contains_symbol(var) {
        // a^u
        let a = linear_coefficient(exp, var)?;
        let f = base.clone().pow(exp.clone());
        return Some(make_fraction(f, SymExpr::call("log", vec![base.clone()]) * a));
    }

    if exp.contains_symbol(var) {
        return None;
    }

    if let Some((name, [u])) = base.as_call() {
        let n = exp.as_number().filter(|n| n.is_integer())?.numer().to_i32()?;
        let a = linear_coefficient(u, var)?;
        return Some(make_fraction(trig_power(name, u, n)?, a));
    }

    if exp.as_number().is_some_and(|n| *n == -1) {
        if let Some(u) = one_plus_square(base, 1) {
            let a = linear_coefficient(u, var)?;
            return Some(make_fraction(call("atan", u), a));
        }
    }

    if exp.as_number().is_some_and(|n| *n == rational((-1, 2))) {
        if let Some(u) = one_plus_square(base, -1) {
            let a = linear_coefficient(u, var)?;
            return Some(make_fraction(call("asin", u), a));
        }
    }

    let a = linear_coefficient(base, var)?;
    let raised = match exp.as_number() {
        Some(n) if *n == -1 => return Some(make_fraction(call("log", base), a)),
        Some(n) => SymExpr::number(n.clone() + 1),
        None => exp.clone() + SymExpr::one(),
    };
    Some(make_fraction(base.clone().pow(raised.clone()), raised * a))
}

/// `∫f(u)*g(u) dx` for the products whose antiderivative is a single function.
fn pair(lhs: &SymExpr, rhs: &SymExpr, var: &str) -> Option<SymExpr> {
    let (lhs_name, [u]) = lhs.as_call()? else {
        return None;
    };
    let (rhs_name, [v]) = rhs.as_call()? else {
        return None;
    };
    if u != v {
        return None;
    }

    let result = match (lhs_name, rhs_name) {
        ("sec", "tan") | ("tan", "sec") => call("sec", u),
        ("csc", "cot") | ("cot", "csc") => -call("csc", u),
        _ => return None,
    };
    let a = linear_coefficient(u, var)?;
    Some(make_fraction(result, a))
}

/// Looks up the antiderivative of the expression with respect to `var` in the table. The
/// expression must depend on `var`.
pub(super) fn integrate(f: &SymExpr, var: &str) -> Option<SymExpr> {
    match f {
        SymExpr::Primary(Primary::Symbol(_)) => {
            // anything else would not depend on `var`
            Some(make_fraction(f.clone().pow(SymExpr::number(2)), SymExpr::number(2)))
        },
        SymExpr::Primary(Primary::Call(name, args)) => {
            let [u] = args.as_slice() else {
                return None;
            };
            let a = linear_coefficient(u, var)?;
            Some(make_fraction(function(name, u)?, a))
        },
        SymExpr::Exp(base, exp) => power(base, exp, var),
        SymExpr::Mul(factors) => match factors.as_slice() {
            [lhs, rhs] => pair(lhs, rhs, var),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn lookup(source: &str) -> Option<String> {
        let expr = simplify(&parse(source, &["x"]).unwrap());
        integrate(&expr, "x").map(|result| simplify(&result).to_string())
    }

    #[test]
    fn powers() {
        assert_eq!(lookup("x").as_deref(), Some("x**2/2"));
        assert_eq!(lookup("x**3").as_deref(), Some("x**4/4"));
        assert_eq!(lookup("1/x").as_deref(), Some("log(x)"));
        assert_eq!(lookup("sqrt(x)").as_deref(), Some("2*x**(3/2)/3"));
    }

    #[test]
    fn linear_arguments() {
        assert_eq!(lookup("cos(2x)").as_deref(), Some("sin(2*x)/2"));
        assert_eq!(lookup("exp(3x + 1)").as_deref(), Some("exp(3*x + 1)/3"));
    }

    #[test]
    fn inverse_trigonometric() {
        assert_eq!(lookup("1/(1 + x**2)").as_deref(), Some("atan(x)"));
        assert_eq!(lookup("1/sqrt(1 - x**2)").as_deref(), Some("asin(x)"));
    }

    #[test]
    fn not_in_table() {
        assert_eq!(lookup("sin(x**2)"), None);
        assert_eq!(lookup("x sin(x)"), None);
    }
}
