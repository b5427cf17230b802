//! Rendering of expressions in the same notation the parser accepts.
//!
//! Powers are written with `**`, products with `*`, and factors with negative exponents are moved
//! into a denominator, so `x**3*3^-1` prints as `x**3/3`. Terms of a sum are ordered by descending
//! degree with constants last, and factors of a product put numeric bases and symbols before
//! function calls.

use crate::primitive::rational;
use rug::Rational;
use std::{cmp::Reverse, fmt};
use super::{Primary, SymExpr, CONSTANTS};

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => fmt_sum(terms, f),
            Self::Mul(factors) => fmt_product(factors, f),
            Self::Exp(base, exp) => fmt_power(base, exp, f),
        }
    }
}

/// Returns true if the expression would print with a leading minus sign.
fn is_negative(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => *n < 0,
        SymExpr::Mul(_) => expr.split_coefficient().0 < 0,
        _ => false,
    }
}

/// The polynomial degree of the expression, counting every symbol that is not a constant. Used to
/// order the terms of a sum.
fn degree(expr: &SymExpr) -> Rational {
    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if !CONSTANTS.contains(&sym.as_str()) => rational(1),
        SymExpr::Primary(_) => rational(0),
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or_default(),
        SymExpr::Mul(factors) => factors.iter().fold(rational(0), |sum, factor| sum + degree(factor)),
        SymExpr::Exp(base, exp) => match exp.as_number() {
            Some(n) => degree(base) * n,
            None => rational(0),
        },
    }
}

/// The sort key of a term in a sum: higher degree first, then non-constant terms, then by the
/// rendering of the term without its coefficient.
fn term_order(term: &SymExpr) -> (Reverse<Rational>, bool, String) {
    let (_, rest) = term.split_coefficient();
    (Reverse(degree(term)), rest.is_one(), rest.to_string())
}

/// The sort key of a factor in a product: numeric bases, then symbols, then calls, then anything
/// else, each group ordered by the rendering of the base.
fn factor_order(factor: &SymExpr) -> (u8, String) {
    let (base, _) = factor.as_power();
    let rank = match base {
        SymExpr::Primary(Primary::Number(_)) => 0,
        SymExpr::Primary(Primary::Symbol(_)) => 1,
        SymExpr::Primary(Primary::Call(..)) => 2,
        SymExpr::Add(_) => 3,
        _ => 4,
    };
    (rank, base.to_string())
}

/// Wraps the rendered expression in parentheses if `paren` is true.
fn wrap(expr: &SymExpr, paren: bool) -> String {
    if paren {
        format!("({})", expr)
    } else {
        expr.to_string()
    }
}

/// Renders a factor of a product.
fn factor_string(factor: &SymExpr) -> String {
    wrap(factor, matches!(factor, SymExpr::Add(_) | SymExpr::Mul(_)) || is_negative(factor))
}

/// Renders the base of a power.
fn base_string(base: &SymExpr) -> String {
    let paren = match base {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || !n.is_integer(),
        SymExpr::Primary(_) => false,
        _ => true,
    };
    wrap(base, paren)
}

/// Renders the exponent of a power.
fn exponent_string(exp: &SymExpr) -> String {
    let paren = match exp {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || !n.is_integer(),
        SymExpr::Primary(_) => false,
        _ => true,
    };
    wrap(exp, paren)
}

fn fmt_sum(terms: &[SymExpr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut terms = terms.iter().collect::<Vec<_>>();
    terms.sort_by_cached_key(|term| term_order(term));

    for (idx, term) in terms.into_iter().enumerate() {
        let negative = is_negative(term);
        let shown = if negative {
            -term.clone()
        } else {
            term.clone()
        };

        match (idx, negative) {
            (0, true) => write!(f, "-")?,
            (0, false) => {},
            (_, true) => write!(f, " - ")?,
            (_, false) => write!(f, " + ")?,
        }
        write!(f, "{}", wrap(&shown, matches!(shown, SymExpr::Add(_))))?;
    }

    Ok(())
}

fn fmt_product(factors: &[SymExpr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut coeff = rational(1);
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => coeff *= n,
            SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n < 0) => {
                let flipped = -exp.as_number().cloned().unwrap_or_default();
                if flipped == 1 {
                    denom.push((**base).clone());
                } else {
                    denom.push(base.as_ref().clone().pow(SymExpr::Primary(Primary::Number(flipped))));
                }
            },
            other => numer.push(other.clone()),
        }
    }

    if coeff < 0 {
        write!(f, "-")?;
        coeff = -coeff;
    }

    numer.sort_by_cached_key(factor_order);
    denom.sort_by_cached_key(factor_order);

    let mut numer_parts = Vec::new();
    if *coeff.numer() != 1 || numer.is_empty() {
        numer_parts.push(coeff.numer().to_string());
    }
    numer_parts.extend(numer.iter().map(factor_string));

    let mut denom_parts = Vec::new();
    if *coeff.denom() != 1 {
        denom_parts.push(coeff.denom().to_string());
    }
    denom_parts.extend(denom.iter().map(factor_string));

    write!(f, "{}", numer_parts.join("*"))?;
    match denom_parts.len() {
        0 => Ok(()),
        1 => write!(f, "/{}", denom_parts[0]),
        _ => write!(f, "/({})", denom_parts.join("*")),
    }
}

fn fmt_power(base: &SymExpr, exp: &SymExpr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(n) = exp.as_number() {
        if *n == rational((1, 2)) {
            return write!(f, "sqrt({})", base);
        } else if *n == rational((-1, 2)) {
            return write!(f, "1/sqrt({})", base);
        } else if *n == -1 {
            return write!(f, "1/{}", base_string(base));
        }
    }

    write!(f, "{}**{}", base_string(base), exponent_string(exp))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn y() -> SymExpr {
        SymExpr::symbol("y")
    }

    #[test]
    fn polynomial() {
        // 3 + x + x^3/3 + 2x^2
        let expr = SymExpr::number(3)
            + x()
            + x().pow(SymExpr::number(3)) * SymExpr::number((1, 3))
            + SymExpr::number(2) * x().pow(SymExpr::number(2));
        assert_eq!(expr.to_string(), "x**3/3 + 2*x**2 + x + 3");
    }

    #[test]
    fn negative_terms() {
        let expr = -SymExpr::call("cos", vec![x()]) + SymExpr::number(-1) * x() * y();
        assert_eq!(expr.to_string(), "-x*y - cos(x)");
    }

    #[test]
    fn fractions() {
        assert_eq!(SymExpr::number((1, 3)).to_string(), "1/3");
        assert_eq!(
            (SymExpr::number((1, 4)) * x().pow(SymExpr::number(2)) * y().pow(SymExpr::number(2))).to_string(),
            "x**2*y**2/4",
        );
        assert_eq!((x() * y().recip()).to_string(), "x/y");
        assert_eq!((SymExpr::number((1, 2)) * x() * y().recip()).to_string(), "x/(2*y)");
        assert_eq!(x().recip().to_string(), "1/x");
        assert_eq!(x().pow(SymExpr::number(-2)).to_string(), "x**(-2)");
    }

    #[test]
    fn roots_and_grouping() {
        assert_eq!(x().sqrt().to_string(), "sqrt(x)");
        assert_eq!((SymExpr::number((1, 2)) * SymExpr::number(2).sqrt()).to_string(), "sqrt(2)/2");
        assert_eq!((x() + SymExpr::one()).pow(SymExpr::number(2)).to_string(), "(x + 1)**2");
        assert_eq!(x().pow(y() + SymExpr::one()).to_string(), "x**(y + 1)");
        assert_eq!(
            (SymExpr::call("exp", vec![x()]) * x()).to_string(),
            "x*exp(x)",
        );
    }
}
