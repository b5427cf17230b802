//! Symbolic manipulation of calculus expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`SymExpr`] nodes. It's similar to the
//! [`calc_parser::parser::ast::Expr`] nodes produced by [`calc_parser`], with the main difference
//! being that [`SymExpr`] nodes **flatten** out the tree structure, and only know four operations:
//! sums, products, powers, and function calls. Subtraction becomes a sum with a negated term,
//! division becomes a product with a reciprocal factor, and so on.
//!
//! ```
//! use calc_compute::symbolic::expr::{Primary, SymExpr};
//! use calc_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr: SymExpr = ast_expr.into();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::Primary(Primary::Symbol("x".to_string())),
//!     SymExpr::Primary(Primary::Symbol("y".to_string())),
//!     SymExpr::Primary(Primary::Symbol("z".to_string())),
//! ]));
//! ```
//!
//! # Operations
//!
//! - [`parse`] turns source text into a [`SymExpr`].
//! - [`differentiate`] computes a simplified (partial) derivative.
//! - [`integrate()`] computes an antiderivative, and [`integrate_definite`] evaluates it between
//! two bounds.
//! - [`simplify()`] reduces an expression to a canonical form, and [`trig_simplify`] additionally
//! applies trigonometric identities.
//!
//! Rendering is done by the [`Display`](std::fmt::Display) impl of [`SymExpr`].

pub mod derivative;
pub mod expr;
pub mod integrate;
pub mod simplify;
pub mod step_collector;

use calc_error::Error;
use calc_parser::parser::{ast::Expr as AstExpr, Parser};

pub use derivative::{derivative, DerivativeError};
pub use expr::SymExpr;
pub use integrate::{integrate, integrate_definite, IntegrateError};
pub use simplify::{simplify, simplify_with_steps, trig_simplify};
pub use step_collector::StepCollector;

/// Parses the given source into a [`SymExpr`].
///
/// Each name in `symbols` is kept as a single symbol, even if it is made of several letters. Other
/// multi-letter names are read as a product of single-letter symbols, so `xy` is `x*y`.
pub fn parse(source: &str, symbols: &[&str]) -> Result<SymExpr, Vec<Error>> {
    let mut parser = Parser::with_symbols(source, symbols);
    let ast = parser.try_parse_full::<AstExpr>()?;
    Ok(SymExpr::from(ast))
}

/// Computes the derivative of the expression with respect to `var`, treating every other symbol as
/// a constant, and simplifies the result.
pub fn differentiate(expr: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    let raw = derivative(expr, var)?;
    log::debug!("raw derivative of {} with respect to {}: {}", expr, var, raw);
    Ok(simplify(&raw))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_reports_errors() {
        let errors = parse("2x**", &["x"]).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn parse_keeps_declared_symbols() {
        let expr = parse("theta**2", &["theta"]).unwrap();
        assert_eq!(expr.to_string(), "theta**2");
    }

    #[test]
    fn differentiate_is_simplified() {
        let expr = parse("x**2*y**3", &["x", "y"]).unwrap();
        assert_eq!(differentiate(&expr, "y").unwrap().to_string(), "3*x**2*y**2");
    }
}
