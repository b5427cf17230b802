//! Symbolic integration.
//!
//! [`integrate`] looks for an antiderivative by trying a fixed ladder of strategies, from the
//! cheapest to the most expensive:
//!
//! 1. The integrand does not depend on the variable: `∫c dx = c*x`.
//! 2. Linearity over sums: `∫(f + g) dx = ∫f dx + ∫g dx`.
//! 3. Constant factors are moved out of the integral: `∫c*f dx = c*∫f dx`.
//! 4. A table of known antiderivatives, applied to linear arguments `a*x + b`. See [`table`].
//! 5. Substitution, when the integrand has the form `f(g(x))*g'(x)`. See [`substitution`].
//! 6. Integration by parts. See [`parts`].
//!
//! Strategies 5 and 6 recurse into the ladder, up to a fixed depth. The integrand is simplified
//! before the ladder starts, which also expands products and small powers of sums, so polynomial
//! integrands reach the ladder as sums of monomials.

mod parts;
mod substitution;
mod table;

use crate::symbolic::{
    derivative::derivative,
    expr::SymExpr,
    simplify::{rules::product, simplify},
};
use std::fmt;

/// The maximum nesting of substitution and integration by parts.
const MAX_DEPTH: usize = 6;

/// An error that can occur while integrating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrateError {
    /// None of the integration strategies found an antiderivative for the (simplified) integrand.
    NoAntiderivative(SymExpr),

    /// The antiderivative has no value at one of the bounds, as with `log(x)` at `x = 0`.
    Undefined {
        antiderivative: SymExpr,
        bound: SymExpr,
    },
}

impl fmt::Display for IntegrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAntiderivative(integrand) => {
                write!(f, "could not find an antiderivative of `{}`", integrand)
            },
            Self::Undefined { antiderivative, bound } => {
                write!(f, "the antiderivative `{}` is undefined at `{}`", antiderivative, bound)
            },
        }
    }
}

impl std::error::Error for IntegrateError {}

/// Returns the derivative of `arg` with respect to `var` if `arg` is linear in `var`, that is,
/// if its derivative is a nonzero expression that does not depend on `var`.
pub(crate) fn linear_coefficient(arg: &SymExpr, var: &str) -> Option<SymExpr> {
    let slope = simplify(&derivative(arg, var).ok()?);
    if slope.is_zero() || slope.contains_symbol(var) {
        None
    } else {
        Some(slope)
    }
}

/// Runs the integration ladder on an already simplified integrand. The result is not simplified.
pub(crate) fn integrate_inner(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH {
        return None;
    }

    if !f.contains_symbol(var) {
        return Some(f.clone() * SymExpr::symbol(var));
    }

    if let SymExpr::Add(terms) = f {
        return terms.iter()
            .map(|term| integrate_inner(term, var, depth))
            .collect::<Option<Vec<_>>>()
            .map(|terms| SymExpr::Add(terms).downgrade());
    }

    if let SymExpr::Mul(factors) = f {
        let (dependent, constant): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.contains_symbol(var));
        if !constant.is_empty() {
            let inner = integrate_inner(&product(dependent), var, depth)?;
            return Some(product(constant) * inner);
        }
    }

    if let Some(result) = table::integrate(f, var) {
        log::debug!("∫{} d{} = {} (table)", f, var, result);
        return Some(result);
    }

    if let Some(result) = substitution::integrate(f, var, depth) {
        log::debug!("∫{} d{} = {} (substitution)", f, var, result);
        return Some(result);
    }

    if let Some(result) = parts::integrate(f, var, depth) {
        log::debug!("∫{} d{} = {} (by parts)", f, var, result);
        return Some(result);
    }

    None
}

/// Computes an antiderivative of the expression with respect to `var`, treating every other
/// symbol as a constant. No constant of integration is added.
///
/// ```
/// use calc_compute::{integrate, parse};
///
/// let expr = parse("x**2", &["x"]).unwrap();
/// assert_eq!(integrate(&expr, "x").unwrap().to_string(), "x**3/3");
/// ```
pub fn integrate(expr: &SymExpr, var: &str) -> Result<SymExpr, IntegrateError> {
    let integrand = simplify(expr);
    match integrate_inner(&integrand, var, 0) {
        Some(result) => Ok(simplify(&result)),
        None => Err(IntegrateError::NoAntiderivative(integrand)),
    }
}

/// Computes the definite integral of the expression with respect to `var`, from `lower` to
/// `upper`, as `F(upper) - F(lower)`, where `F` is the antiderivative found by [`integrate`].
pub fn integrate_definite(
    expr: &SymExpr,
    var: &str,
    lower: &SymExpr,
    upper: &SymExpr,
) -> Result<SymExpr, IntegrateError> {
    let antiderivative = integrate(expr, var)?;
    let var = SymExpr::symbol(var);
    let evaluate = |bound: &SymExpr| {
        let value = simplify(&antiderivative.substitute(&var, bound));
        if is_undefined(&value) {
            Err(IntegrateError::Undefined {
                antiderivative: antiderivative.clone(),
                bound: bound.clone(),
            })
        } else {
            Ok(value)
        }
    };
    let at_upper = evaluate(upper)?;
    let at_lower = evaluate(lower)?;
    Ok(simplify(&(at_upper - at_lower)))
}

/// Returns true if the simplified expression contains `log(0)` or a zero raised to a negative
/// power.
fn is_undefined(expr: &SymExpr) -> bool {
    expr.post_order_iter().any(|expr| match expr {
        SymExpr::Exp(base, exp) => base.is_zero() && exp.as_number().is_some_and(|n| *n < 0),
        _ => expr.as_unary_call("log").is_some_and(SymExpr::is_zero),
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::symbolic::{differentiate, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_x(e: &SymExpr, x: f64) -> f64 {
        e.eval_f64(&|name| match name {
            "x" => Some(x),
            "y" => Some(1.3),
            _ => None,
        })
            .expect("expression should evaluate to a finite number")
    }

    /// Integrates the function, then checks that differentiating the result gives back the
    /// integrand at each of the given points.
    fn check_antiderivative(function: &str, points: impl IntoIterator<Item = f64>) -> SymExpr {
        let expr = parse(function, &["x", "y"]).unwrap();
        let antiderivative = integrate(&expr, "x")
            .unwrap_or_else(|err| panic!("integral of \"{function}\" failed: {err}"));
        let derivative = differentiate(&antiderivative, "x").unwrap();

        for point in points.into_iter() {
            assert_float_absolute_eq!(eval_x(&derivative, point), eval_x(&expr, point), 1e-9);
        }

        antiderivative
    }

    /// Composite Simpson's rule.
    fn simpson(e: &SymExpr, a: f64, b: f64) -> f64 {
        const N: usize = 1000;
        let h = (b - a) / N as f64;
        let inner = (1..N)
            .map(|i| {
                let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
                weight * eval_x(e, a + i as f64 * h)
            })
            .sum::<f64>();
        (eval_x(e, a) + inner + eval_x(e, b)) * h / 3.0
    }

    fn check_definite(function: &str, lower: &str, upper: &str) -> SymExpr {
        let expr = parse(function, &["x", "y"]).unwrap();
        let lower_expr = parse(lower, &[]).unwrap();
        let upper_expr = parse(upper, &[]).unwrap();
        let result = integrate_definite(&expr, "x", &lower_expr, &upper_expr).unwrap();

        let a = eval_x(&lower_expr, 0.0);
        let b = eval_x(&upper_expr, 0.0);
        assert_float_absolute_eq!(eval_x(&result, 0.0), simpson(&expr, a, b), 1e-8);
        result
    }

    #[test]
    fn polynomials() {
        assert_eq!(check_antiderivative("x**2", [0.5, 2.0]).to_string(), "x**3/3");
        check_antiderivative("3x**2 - 4x + 7", [-1.0, 0.0, 2.0]);
        check_antiderivative("(x + 1)**3", [-1.0, 0.0, 2.0]);
        check_antiderivative("(2x + 1)**(1/2)", [0.5, 3.0]);
        check_antiderivative("1/x + 1/x**2", [0.5, 3.0]);
        check_antiderivative("x y**2", [0.5, 3.0]);
    }

    #[test]
    fn constant_integrand() {
        let expr = parse("y", &["x", "y"]).unwrap();
        assert_eq!(integrate(&expr, "x").unwrap().to_string(), "x*y");
    }

    #[test]
    fn table_functions() {
        check_antiderivative("sin(3x) + cos(x/2) + exp(2x - 1)", [0.0, 1.0]);
        check_antiderivative("tan(x) + sec(x) + cot(x) + csc(x)", [0.4, 1.1]);
        check_antiderivative("log(x) + sinh(x) + cosh(2x) + tanh(x)", [0.5, 2.0]);
        check_antiderivative("2**x", [0.0, 1.5]);
        check_antiderivative("sec(x)**2 + csc(x)**2 + sec(x) tan(x) + csc(x) cot(x)", [0.4, 1.1]);
        check_antiderivative("sin(x)**2 + cos(2x)**2 + tan(x)**2", [0.4, 1.1]);
        check_antiderivative("1/(1 + x**2) + 1/sqrt(1 - x**2)", [-0.5, 0.3]);
    }

    #[test]
    fn substitution() {
        check_antiderivative("2x exp(x**2)", [0.0, 1.0]);
        check_antiderivative("x/(x**2 + 1)", [0.0, 2.0]);
        check_antiderivative("sin(x) cos(x)**3", [0.3, 1.2]);
        check_antiderivative("cos(x) exp(sin(x))", [0.3, 1.2]);
        check_antiderivative("log(x)/x", [0.5, 2.0]);

        let expr = parse("tan(x) sec(x)**2", &["x"]).unwrap();
        assert_eq!(integrate(&expr, "x").unwrap().to_string(), "tan(x)**2/2");
    }

    #[test]
    fn by_parts() {
        check_antiderivative("x exp(x)", [0.0, 1.0]);
        check_antiderivative("x**2 sin(x)", [0.0, 1.0]);
        check_antiderivative("x cos(2x)", [0.0, 1.0]);
        check_antiderivative("x log(x)", [0.5, 2.0]);
        check_antiderivative("atan(x)", [0.0, 1.0]);

        let expr = parse("x exp(x)", &["x"]).unwrap();
        let expected = parse("x exp(x) - exp(x)", &["x"]).unwrap();
        assert_eq!(integrate(&expr, "x").unwrap(), simplify(&expected));
    }

    #[test]
    fn definite() {
        assert_eq!(check_definite("x**2", "0", "1").to_string(), "1/3");
        check_definite("sin(x)", "0", "pi/3");
        check_definite("x exp(x)", "0", "2");
        check_definite("1/x", "1", "3");
    }

    #[test]
    fn undefined_at_bound() {
        let expr = parse("1/x", &["x"]).unwrap();
        let zero = SymExpr::zero();
        let one = SymExpr::one();
        match integrate_definite(&expr, "x", &zero, &one) {
            Err(IntegrateError::Undefined { antiderivative, bound }) => {
                assert_eq!(antiderivative.to_string(), "log(x)");
                assert_eq!(bound, zero);
            },
            other => panic!("expected an undefined bound, got {:?}", other),
        }

        let expr = parse("1/x**2", &["x"]).unwrap();
        let upper = parse("2 - 2", &[]).unwrap();
        assert!(matches!(
            integrate_definite(&expr, "x", &one, &upper),
            Err(IntegrateError::Undefined { .. }),
        ));
    }

    #[test]
    fn no_antiderivative() {
        let expr = parse("exp(x**2)", &["x"]).unwrap();
        assert!(matches!(integrate(&expr, "x"), Err(IntegrateError::NoAntiderivative(_))));
    }
}
