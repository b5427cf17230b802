//! Simplification rules for powers.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::{do_power, product}, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Rational};

/// The largest integer exponent that is computed exactly.
const MAX_EXACT_EXPONENT: u32 = 1024;

/// The largest root that is checked for an exact result.
const MAX_EXACT_ROOT: u32 = 64;

/// Returns the integer value of the expression, if it is an integer that fits in an `i32`.
fn as_small_integer(expr: &SymExpr) -> Option<i32> {
    let n = expr.as_number()?;
    if n.is_integer() {
        n.numer().to_i32()
    } else {
        None
    }
}

/// Computes `base^exp` exactly, if the result is rational.
fn exact_power(base: &Rational, exp: &Rational) -> Option<Rational> {
    let p = exp.numer().to_i32()?;
    let q = exp.denom().to_u32()?;
    if p.unsigned_abs() > MAX_EXACT_EXPONENT || q > MAX_EXACT_ROOT {
        return None;
    }

    let root = if q == 1 {
        base.clone()
    } else {
        if *base < 0 {
            return None;
        }

        let numer = base.numer().clone().root(q);
        let denom = base.denom().clone().root(q);
        if numer.clone().pow(q) != *base.numer() || denom.clone().pow(q) != *base.denom() {
            return None;
        }
        Rational::from((numer, denom))
    };

    if root == 0 && p < 0 {
        return None;
    }
    Some(root.pow(p))
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        rhs.is_zero().then(SymExpr::one)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.is_one().then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `0^a = 0` for positive numbers `a`
/// `1^a = 1`
pub fn power_of_zero_or_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().is_some_and(|n| *n > 0) {
            Some(SymExpr::zero())
        } else if lhs.is_one() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOfZeroOrOne);
    Some(opt)
}

/// Computes powers of numbers when the result is rational.
///
/// `2^3 = 8`
/// `(9/4)^(1/2) = 3/2`
/// `8^(-2/3) = 1/4`
pub fn power_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let value = exact_power(lhs.as_number()?, rhs.as_number()?)?;
        Some(SymExpr::Primary(Primary::Number(value)))
    })?;

    step_collector.push(Step::PowerNumbers);
    Some(opt)
}

/// Moves the integer part of a fractional exponent of a positive number out of the power, so the
/// remaining exponent is between 0 and 1.
///
/// `2^(3/2) = 2*2^(1/2)`
/// `2^(-1/2) = 1/2*2^(1/2)`
pub fn split_exponent(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_number()?;
        if *base <= 0 || exp.is_integer() || (*exp > 0 && *exp < 1) {
            return None;
        }

        let whole = exp.clone().floor();
        let fraction = exp.clone() - &whole;
        let outside = exact_power(base, &whole)?;
        Some(product([
            SymExpr::Primary(Primary::Number(outside)),
            lhs.clone().pow(SymExpr::Primary(Primary::Number(fraction))),
        ]))
    })?;

    step_collector.push(Step::SplitExponent);
    Some(opt)
}

/// `(a^b)^c = a^(bc)` for integers `c`
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        as_small_integer(rhs)?;
        match lhs {
            SymExpr::Exp(base, exp) => Some((**base).clone().pow((**exp).clone() * rhs.clone())),
            _ => None,
        }
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// `(ab)^c = a^c*b^c` for integers `c`
///
/// For other exponents, only positive numeric factors are moved out: `(4a)^(1/2) = 4^(1/2)*a^(1/2)`.
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };

        if as_small_integer(rhs).is_some() {
            return Some(product(factors.iter().map(|factor| factor.clone().pow(rhs.clone()))));
        }

        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.as_number().is_some_and(|n| *n > 0));
        if positive.is_empty() {
            return None;
        }

        let coeff = positive.into_iter().fold(rational(1), |coeff, factor| match factor {
            SymExpr::Primary(Primary::Number(n)) => coeff * n,
            _ => coeff,
        });
        Some(product([
            SymExpr::Primary(Primary::Number(coeff)).pow(rhs.clone()),
            SymExpr::Mul(rest).downgrade().pow(rhs.clone()),
        ]))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_of_zero_or_one(expr, step_collector))
        .or_else(|| power_numbers(expr, step_collector))
        .or_else(|| split_exponent(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
}
