//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](calc_parser::parser::ast::Expr) type from `calc_parser` is a recursive `enum`
//! that represents the AST of an expression. It's convenient for parsing, but not so much for
//! algebraic manipulation.
//!
//! This module defines [`SymExpr`], which recursively flattens the AST into a list of terms or
//! factors, depending on the operation, and normalizes the expression into sums of products of
//! powers. All submodules in this crate that deal with symbolic manipulation use [`SymExpr`].
//!
//! # Strict equality
//!
//! Determining whether two expressions are mathematically equal is hard in general: `x^2 + 2x + 1`
//! and `(x + 1)^2` are equal, but that is not obvious without first expanding one of them. Instead,
//! the [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**. Two
//! expressions are strictly equal if:
//!
//! - They are the same kind of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//! etc.).
//! - If both are [`SymExpr::Primary`], they hold equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], they have strictly equal terms / factors, in
//! any order.
//! - If both are [`SymExpr::Exp`], they have strictly equal bases and exponents.
//!
//! Strict equality never reports false positives, and it does not depend on simplification, so the
//! simplifier can use it to decide whether terms or factors can be combined.

mod eval;
mod fmt;
mod iter;

use calc_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::primitive::{rational, rational_from_str};
use iter::ExprIter;
use rug::Rational;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

/// The names of the symbols that stand for mathematical constants rather than variables.
pub const CONSTANTS: &[&str] = &["pi", "E"];

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2`, `1/3`, or `0.5` (stored as `1/2`).
    Number(Rational),

    /// A variable or named constant, such as `x`, `theta`, or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)`.
    Call(String, Vec<SymExpr>),
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number.
    pub fn number<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(Rational::from(n)))
    }

    /// The number zero.
    pub fn zero() -> Self {
        Self::number(0)
    }

    /// The number one.
    pub fn one() -> Self {
        Self::number(1)
    }

    /// Creates a symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the reciprocal of this expression. Nonzero numbers are inverted directly; anything
    /// else is raised to the power of `-1`.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(n)) if n != 0 => Self::Primary(Primary::Number(n.recip())),
            expr => expr.pow(Self::number(-1)),
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::number((1, 2)))
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 0)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the function name and arguments.
    pub fn as_call(&self) -> Option<(&str, &[SymExpr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// If the expression is a call to the named function with exactly one argument, returns the
    /// argument.
    pub fn as_unary_call(&self, name: &str) -> Option<&SymExpr> {
        match self.as_call()? {
            (target, [arg]) if target == name => Some(arg),
            _ => None,
        }
    }

    /// Splits the expression into a base and an exponent. If the expression is not
    /// [`SymExpr::Exp`], the exponent is `1`.
    ///
    /// - `a^b` -> `(a, b)`
    /// - `a` -> `(a, 1)`
    pub fn as_power(&self) -> (&SymExpr, SymExpr) {
        match self {
            Self::Exp(base, exp) => (base, (**exp).clone()),
            expr => (expr, Self::one()),
        }
    }

    /// Splits the expression into its rational coefficient and the remaining factors. If the
    /// expression is not [`SymExpr::Mul`], the coefficient is 1.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a` -> `(3, a)`
    /// - `1/4*a*b` -> `(1/4, a*b)`
    /// - `a` -> `(1, a)`
    pub fn split_coefficient(&self) -> (Rational, SymExpr) {
        match self {
            Self::Primary(Primary::Number(n)) => (n.clone(), Self::one()),
            Self::Mul(factors) => {
                let mut coeff = rational(1);
                let mut rest = Vec::new();
                for factor in factors {
                    match factor {
                        Self::Primary(Primary::Number(n)) => coeff *= n,
                        other => rest.push(other.clone()),
                    }
                }
                (coeff, Self::Mul(rest).downgrade())
            },
            expr => (rational(1), expr.clone()),
        }
    }

    /// The inverse of [`SymExpr::split_coefficient`]: multiplies `rest` by `coeff`, skipping
    /// trivial coefficients.
    pub fn from_coefficient(coeff: Rational, rest: SymExpr) -> SymExpr {
        if coeff == 0 {
            Self::zero()
        } else if rest.is_one() {
            Self::Primary(Primary::Number(coeff))
        } else if coeff == 1 {
            rest
        } else {
            Self::Primary(Primary::Number(coeff)) * rest
        }
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Replaces every subexpression strictly equal to `target` with `replacement`. Sums and
    /// products are flattened as they are rebuilt, but nothing else is simplified.
    pub fn substitute(&self, target: &SymExpr, replacement: &SymExpr) -> SymExpr {
        if self == target {
            return replacement.clone();
        }

        match self {
            Self::Primary(Primary::Call(name, args)) => Self::call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(target, replacement)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => terms.iter()
                .map(|term| term.substitute(target, replacement))
                .fold(Self::Add(Vec::new()), |sum, term| sum + term)
                .downgrade(),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.substitute(target, replacement))
                .fold(Self::Mul(Vec::new()), |product, factor| product * factor)
                .downgrade(),
            Self::Exp(base, exp) => base.substitute(target, replacement)
                .pow(exp.substitute(target, replacement)),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::zero(),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::one(),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Creates the fraction `numerator / denominator`, as `numerator * denominator^-1`. If both are
/// numbers, the division is done directly.
pub fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    match (numerator, denominator) {
        (SymExpr::Primary(Primary::Number(n)), SymExpr::Primary(Primary::Number(d))) if d != 0 => {
            SymExpr::Primary(Primary::Number(n / d))
        },
        (numerator, denominator) => numerator * denominator.recip(),
    }
}

/// Returns true if both lists hold strictly equal expressions, in any order, counting
/// duplicates.
fn same_elements(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    for expr in lhs {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, other)| !used[idx] && expr == other);
        match found {
            Some(idx) => used[idx] = true,
            None => return false,
        }
    }

    true
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Builds the expression for a call to a function the parser recognizes. Functions with a direct
/// equivalent are rewritten into it, so the rest of the crate only deals with one spelling:
///
/// - `ln(u)` is `log(u)`
/// - `sqrt(u)` is `u^(1/2)`
/// - `log(u, b)` is `log(u) / log(b)`
fn from_call(name: String, mut args: Vec<SymExpr>) -> SymExpr {
    match (name.as_str(), args.len()) {
        ("sqrt", 1) => args.remove(0).sqrt(),
        ("ln", _) | ("log", 1) => SymExpr::call("log", args),
        ("log", 2) => {
            let base = args.remove(1);
            let arg = args.remove(0);
            make_fraction(
                SymExpr::call("log", vec![arg]),
                SymExpr::call("log", vec![base]),
            )
        },
        _ => SymExpr::call(name, args),
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => Self::Primary(Primary::Number(rational_from_str(&num.value))),
            AstExpr::Literal(Literal::Symbol(sym)) => Self::symbol(sym.name),
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                from_call(call.name.name, args)
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => lhs.pow(rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                }
            },
        }
    }
}

/// Adds two expressions, flattening nested sums. Two numbers are added directly.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs + rhs))
            },
            (Self::Add(mut lhs), Self::Add(rhs)) => {
                lhs.extend(rhs);
                Self::Add(lhs)
            },
            (Self::Add(mut terms), rhs) => {
                terms.push(rhs);
                Self::Add(terms)
            },
            (lhs, Self::Add(mut terms)) => {
                terms.insert(0, lhs);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two expressions, flattening nested products. Two numbers are multiplied directly.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs * rhs))
            },
            (Self::Mul(mut lhs), Self::Mul(rhs)) => {
                lhs.extend(rhs);
                Self::Mul(lhs)
            },
            (Self::Mul(mut factors), rhs) => {
                factors.push(rhs);
                Self::Mul(factors)
            },
            (lhs, Self::Mul(mut factors)) => {
                factors.insert(0, lhs);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::Primary(Primary::Number(-n)),
            expr => Self::number(-1) * expr,
        }
    }
}

impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        make_fraction(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::parser::{ast::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn convert(source: &str) -> SymExpr {
        let mut parser = Parser::new(source);
        SymExpr::from(parser.try_parse_full::<Expr>().unwrap())
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(convert("x + y*z"), convert("z*y + x"));
        assert_ne!(convert("x + x + y"), convert("x + y + y"));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(convert("x - y"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::symbol("y")]),
        ]));
        assert_eq!(convert("x / y"), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y").pow(SymExpr::number(-1)),
        ]));
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(convert("0.5"), SymExpr::number((1, 2)));
        assert_eq!(convert("1/4"), SymExpr::number((1, 4)));
    }

    #[test]
    fn function_spellings() {
        assert_eq!(convert("ln(x)"), SymExpr::call("log", vec![SymExpr::symbol("x")]));
        assert_eq!(convert("sqrt(x)"), SymExpr::symbol("x").sqrt());
        assert_eq!(convert("log(x, 2)"), SymExpr::Mul(vec![
            SymExpr::call("log", vec![SymExpr::symbol("x")]),
            SymExpr::call("log", vec![SymExpr::number(2)]).pow(SymExpr::number(-1)),
        ]));
    }

    #[test]
    fn coefficient_split() {
        let (coeff, rest) = convert("3*x*y/4").split_coefficient();
        assert_eq!(coeff, rational((3, 4)));
        assert_eq!(rest, convert("x*y"));
        assert_eq!(SymExpr::from_coefficient(coeff, rest), convert("3/4*x*y"));
    }

    #[test]
    fn substitute_symbol() {
        let expr = convert("x**2 + sin(x)");
        let replaced = expr.substitute(&SymExpr::symbol("x"), &SymExpr::number(3));
        assert_eq!(replaced, SymExpr::Add(vec![
            SymExpr::number(3).pow(SymExpr::number(2)),
            SymExpr::call("sin", vec![SymExpr::number(3)]),
        ]));
        assert!(!replaced.contains_symbol("x"));
    }
}
