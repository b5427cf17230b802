//! Symbolic differentiation.
//!
//! [`derivative`] applies the sum, product, power, and chain rules directly to the expression
//! tree, without simplifying along the way. Use [`differentiate`](crate::symbolic::differentiate)
//! to get a simplified result.

mod function;

use crate::symbolic::expr::{Primary, SymExpr};
use std::fmt;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up the
/// output and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 0,
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => is_trivially_zero(base) && exp.as_number().is_some_and(|n| *n > 0),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up the
/// output and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 1,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => exp.is_zero() || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        value.0.into_iter()
            .fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor)
            .downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::zero()];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_idx in 0..factors.len() {
        let mut inner_mult = MultBuilder::default();
        for (idx, factor) in factors.iter().enumerate() {
            if idx == derivative_idx {
                inner_mult.mult(derivative(factor, var)?);
            } else {
                inner_mult.mult(factor.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`.
///
/// - `(u^n)' = n*u^(n-1)*u'` when `n` is free of the variable
/// - `(a^v)' = a^v*log(a)*v'` when `a` is free of the variable
/// - `(u^v)' = u^v*(v'*log(u) + v*u'/u)` otherwise
fn power_rule(base: &SymExpr, exp: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    let mut mult_group = MultBuilder::default();

    if !exp.contains_symbol(var) {
        let lowered = match exp.as_number() {
            Some(n) => SymExpr::number(n.clone() - 1),
            None => exp.clone() + SymExpr::number(-1),
        };
        mult_group.mult(exp.clone());
        mult_group.mult(base.clone().pow(lowered));
        mult_group.mult(derivative(base, var)?);
    } else if !base.contains_symbol(var) {
        mult_group.mult(base.clone().pow(exp.clone()));
        mult_group.mult(SymExpr::call("log", vec![base.clone()]));
        mult_group.mult(derivative(exp, var)?);
    } else {
        let mut exp_part = MultBuilder::default();
        exp_part.mult(derivative(exp, var)?);
        exp_part.mult(SymExpr::call("log", vec![base.clone()]));

        let mut base_part = MultBuilder::default();
        base_part.mult(exp.clone());
        base_part.mult(derivative(base, var)?);
        base_part.mult(base.clone().recip());

        let mut sum = SumBuilder::default();
        sum.add(exp_part.into());
        sum.add(base_part.into());

        mult_group.mult(base.clone().pow(exp.clone()));
        mult_group.mult(sum.into());
    }

    Ok(mult_group.into())
}

/// An error that can occur while computing a derivative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivativeError {
    /// The expression depends on the variable through a function whose derivative is not known.
    Unsupported(String),
}

impl fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(name) => write!(f, "cannot differentiate the function `{}`", name),
        }
    }
}

impl std::error::Error for DerivativeError {}

/// Computes the derivative of the given expression with respect to `var`, treating every other
/// symbol as a constant. Returns [`Err`] if the derivative could not be symbolically computed.
///
/// The result is not simplified.
pub fn derivative(f: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    if !f.contains_symbol(var) {
        return Ok(SymExpr::zero());
    }

    let expr = match f {
        SymExpr::Primary(Primary::Number(_)) => SymExpr::zero(),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == var {
                SymExpr::one()
            } else {
                SymExpr::zero()
            }
        },
        SymExpr::Primary(Primary::Call(name, args)) => function::function_derivative(name, args, var)?,
        SymExpr::Add(terms) => sum_rule(terms, var)?,
        SymExpr::Mul(factors) => product_rule(factors, var)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, var)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::zero())
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
pub mod tests {
    use crate::symbolic::{differentiate, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Evaluates the expression, substituting `x` and setting `y` to a fixed value.
    fn eval_x(e: &SymExpr, x: f64) -> f64 {
        e.eval_f64(&|name| match name {
            "x" => Some(x),
            "y" => Some(0.7),
            _ => None,
        })
            .expect("expression should evaluate to a finite number")
    }

    /// Performs central finite difference to approximate the derivative of the provided
    /// expression.
    fn finite_difference(e: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let expr = parse(function, &["x", "y"]).unwrap();
        let symbolic = differentiate(&expr, "x")
            .unwrap_or_else(|err| panic!("derivative of \"{function}\" failed: {err}"));

        for point in points.into_iter() {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "For \"{function}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
            );
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x**2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("x**(1/3) + 1/x", [0.5, 1., 2., 5.]);
    }

    #[test]
    fn product_and_quotient() {
        test_for_function("x**2 sin(x)", [0., 1., 2., 5.]);
        test_for_function("(x + 1)/(x**2 + 1)", [-1., 0., 1., 3.]);
    }

    #[test]
    fn chain_rule() {
        test_for_function("sin(x**2)", [0., 0.5, 1., 2.]);
        test_for_function("exp(2x) + log(x**2 + 1)", [-1., 0., 1., 2.]);
        test_for_function("tan(x) + sec(x) + csc(x) + cot(x)", [0.3, 0.7, 1.1]);
        test_for_function("asin(x) + acos(x/2) + atan(3x)", [-0.5, 0., 0.5]);
        test_for_function("sinh(x) + cosh(x) + tanh(x) + sqrt(x**2 + 1)", [-1., 0., 1.5]);
        test_for_function("abs(x - 2)", [-1., 0., 3.]);
    }

    #[test]
    fn exponentials() {
        test_for_function("2**x", [0., 1., 2.5]);
        test_for_function("x**x", [0.5, 1., 2.]);
        test_for_function("E**(x y)", [0., 1., 2.]);
    }

    #[test]
    fn partial_derivative() {
        test_for_function("x**2 y**3 + y", [0., 1., 2.]);
        let expr = parse("x**2*y**3", &["x", "y"]).unwrap();
        assert_eq!(differentiate(&expr, "y").unwrap().to_string(), "3*x**2*y**2");
        assert_eq!(differentiate(&expr, "x").unwrap().to_string(), "2*x*y**3");
    }

    #[test]
    fn simplified_output() {
        let expr = parse("x**2", &["x"]).unwrap();
        assert_eq!(differentiate(&expr, "x").unwrap().to_string(), "2*x");
        let expr = parse("sin(x)", &["x"]).unwrap();
        assert_eq!(differentiate(&expr, "x").unwrap().to_string(), "cos(x)");
        let expr = parse("sqrt(x)", &["x"]).unwrap();
        assert_eq!(differentiate(&expr, "x").unwrap().to_string(), "1/(2*sqrt(x))");
    }

    #[test]
    fn constant_with_respect_to_variable() {
        let expr = parse("sin(y) + y**2", &["x", "y"]).unwrap();
        assert_eq!(derivative(&expr, "x").unwrap(), SymExpr::zero());
    }

    #[test]
    fn unknown_function() {
        let expr = SymExpr::call("gamma", vec![SymExpr::symbol("x")]);
        assert_eq!(derivative(&expr, "x"), Err(DerivativeError::Unsupported("gamma".to_string())));
    }
}
