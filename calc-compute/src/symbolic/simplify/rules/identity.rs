//! Trigonometric identities, applied by [`trig_simplify`](crate::symbolic::trig_simplify).
//!
//! These rules rewrite sums of squared trigonometric functions using the Pythagorean identities.
//! Quotients and reciprocals of sines and cosines become tangents, cotangents, secants, and
//! cosecants. Only [`sine_cosine_sum`] is part of the default rule set; the others change which
//! functions appear in the expression.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_add, do_multiply, do_power, product}, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// Describes one side of an additive identity, given a factor that may start it.
///
/// If the factor matches, returns the factor the partner term must have instead (or [`None`] if
/// the partner term has no such factor), the ratio of the partner's coefficient to this term's
/// coefficient, and the factor that replaces both terms.
type Matcher = fn(&SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)>;

/// If the factor is `name(u)^2`, returns `u`.
fn squared_call<'a>(factor: &'a SymExpr, name: &str) -> Option<&'a SymExpr> {
    match factor {
        SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n == 2) => base.as_unary_call(name),
        _ => None,
    }
}

/// Builds `name(u)^2`.
fn squared(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()]).pow(SymExpr::number(2))
}

/// Returns the non-numeric factors of the expression.
fn factors_of(expr: SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Mul(factors) => factors,
        expr if expr.is_one() => Vec::new(),
        expr => vec![expr],
    }
}

/// Looks for two terms `c*F*a` and `r*c*F*b`, where the matcher recognizes `a` and gives `b`
/// and `r`, and replaces both with `c*F*x`, where `x` is the replacement from the matcher.
fn rewrite_pair(terms: &[SymExpr], matcher: Matcher) -> Option<SymExpr> {
    for (idx, term) in terms.iter().enumerate() {
        let (coeff, rest) = term.split_coefficient();
        let factors = factors_of(rest);

        for (factor_idx, factor) in factors.iter().enumerate() {
            let Some((partner, ratio, replacement)) = matcher(factor) else {
                continue;
            };

            let mut others = factors.clone();
            others.remove(factor_idx);

            let partner_rest = SymExpr::Mul(others.iter().cloned().chain(partner).collect()).downgrade();
            let partner_coeff = coeff.clone() * ratio;
            let partner_idx = terms.iter()
                .enumerate()
                .filter(|(other_idx, _)| *other_idx != idx)
                .find(|(_, other)| {
                    let (other_coeff, other_rest) = other.split_coefficient();
                    other_coeff == partner_coeff && other_rest == partner_rest
                })
                .map(|(other_idx, _)| other_idx);

            if let Some(partner_idx) = partner_idx {
                let combined = SymExpr::from_coefficient(
                    coeff,
                    product(others.into_iter().chain([replacement])),
                );
                let new_terms = terms.iter()
                    .enumerate()
                    .filter(|(other_idx, _)| *other_idx != idx && *other_idx != partner_idx)
                    .map(|(_, other)| other.clone())
                    .chain([combined])
                    .collect::<Vec<_>>();
                return Some(SymExpr::Add(new_terms).downgrade());
            }
        }
    }

    None
}

/// `sin(a)^2 + cos(a)^2 = 1`
fn sine_cosine(factor: &SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)> {
    let arg = squared_call(factor, "sin")?;
    Some((Some(squared("cos", arg)), 1, SymExpr::one()))
}

/// `tan(a)^2 + 1 = sec(a)^2`
fn tangent_plus_one(factor: &SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)> {
    let arg = squared_call(factor, "tan")?;
    Some((None, 1, squared("sec", arg)))
}

/// `sec(a)^2 - 1 = tan(a)^2`
fn secant_minus_one(factor: &SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)> {
    let arg = squared_call(factor, "sec")?;
    Some((None, -1, squared("tan", arg)))
}

/// `sin(a)^2 - 1 = -cos(a)^2`
fn sine_minus_one(factor: &SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)> {
    let arg = squared_call(factor, "sin")?;
    Some((None, -1, -squared("cos", arg)))
}

/// `cos(a)^2 - 1 = -sin(a)^2`
fn cosine_minus_one(factor: &SymExpr) -> Option<(Option<SymExpr>, i32, SymExpr)> {
    let arg = squared_call(factor, "cos")?;
    Some((None, -1, -squared("sin", arg)))
}

/// `sin(a)^2 + cos(a)^2 = 1`, in any multiple.
pub fn sine_cosine_sum(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| rewrite_pair(terms, sine_cosine))?;

    step_collector.push(Step::PythagoreanIdentity);
    Some(opt)
}

/// The Pythagorean identities, in any multiple.
///
/// `sin(a)^2 + cos(a)^2 = 1`
/// `1 + tan(a)^2 = sec(a)^2`
/// `sec(a)^2 - 1 = tan(a)^2`
/// `1 - sin(a)^2 = cos(a)^2`
/// `1 - cos(a)^2 = sin(a)^2`
pub fn pythagorean(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let matchers: [Matcher; 5] = [
            sine_cosine,
            tangent_plus_one,
            secant_minus_one,
            sine_minus_one,
            cosine_minus_one,
        ];
        matchers.into_iter().find_map(|matcher| rewrite_pair(terms, matcher))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PythagoreanIdentity);
    Some(opt)
}

/// Reads the factor as a power of `sin(u)` or `cos(u)`, counting `csc(u)^n` as `sin(u)^-n` and
/// `sec(u)^n` as `cos(u)^-n`. Returns whether the function is `sin`, the argument, and the power.
fn as_sine_cosine_power(factor: &SymExpr) -> Option<(bool, &SymExpr, Rational)> {
    let (base, exp) = factor.as_power();
    let n = exp.as_number()?.clone();
    let (name, args) = base.as_call()?;
    let [arg] = args else {
        return None;
    };

    match name {
        "sin" => Some((true, arg, n)),
        "csc" => Some((true, arg, -n)),
        "cos" => Some((false, arg, n)),
        "sec" => Some((false, arg, -n)),
        _ => None,
    }
}

/// `sin(a)^n * cos(a)^-n = tan(a)^n`
/// `cos(a)^n * sin(a)^-n = cot(a)^n`
/// `sin(a) * sec(a) = tan(a)`
pub fn quotient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        for (sin_idx, sin_factor) in factors.iter().enumerate() {
            let Some((true, arg, n)) = as_sine_cosine_power(sin_factor) else {
                continue;
            };

            let cos_idx = factors.iter().position(|factor| {
                matches!(
                    as_sine_cosine_power(factor),
                    Some((false, other_arg, m)) if other_arg == arg && m == -n.clone()
                )
            });
            let Some(cos_idx) = cos_idx else {
                continue;
            };

            let replacement = if n > 0 {
                SymExpr::call("tan", vec![arg.clone()]).pow(SymExpr::number(n))
            } else {
                SymExpr::call("cot", vec![arg.clone()]).pow(SymExpr::number(-n))
            };
            let rest = factors.iter()
                .enumerate()
                .filter(|(idx, _)| *idx != sin_idx && *idx != cos_idx)
                .map(|(_, factor)| factor.clone());
            return Some(product(rest.chain([replacement])));
        }

        None
    })?;

    step_collector.push(Step::QuotientIdentity);
    Some(opt)
}

/// `cos(a)^-n = sec(a)^n`
/// `sin(a)^-n = csc(a)^n`
pub fn reciprocal(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let n = rhs.as_number().filter(|n| **n < 0)?;
        let (name, args) = lhs.as_call()?;
        let reciprocal_name = match name {
            "cos" => "sec",
            "sin" => "csc",
            _ => return None,
        };
        Some(SymExpr::call(reciprocal_name, args.to_vec()).pow(SymExpr::number(-n.clone())))
    })?;

    step_collector.push(Step::QuotientIdentity);
    Some(opt)
}

/// Applies all trigonometric identities.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    pythagorean(expr, step_collector)
        .or_else(|| quotient(expr, step_collector))
        .or_else(|| reciprocal(expr, step_collector))
}
