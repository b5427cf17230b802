//! Symbolic calculus on expressions parsed by [`calc_parser`].
//!
//! The entry points mirror what a calculus session needs: [`parse`] an expression, then
//! [`differentiate`], [`integrate`] (or [`integrate_definite`]), and finally [`simplify`] or
//! [`trig_simplify`] the result. Every expression renders through its [`Display`] impl in the same
//! notation the parser accepts.
//!
//! ```
//! use calc_compute::{differentiate, parse};
//!
//! let expr = parse("x**2", &["x"]).unwrap();
//! assert_eq!(differentiate(&expr, "x").unwrap().to_string(), "2*x");
//! ```
//!
//! [`Display`]: std::fmt::Display

pub mod primitive;
pub mod symbolic;

pub use symbolic::{
    derivative::DerivativeError,
    differentiate,
    integrate::{integrate, integrate_definite, IntegrateError},
    parse,
    simplify,
    trig_simplify,
    SymExpr,
};
