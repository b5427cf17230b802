//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power, product}, step::Step},
    step_collector::StepCollector,
};

/// The largest power of a sum that is expanded.
const MAX_EXPANDED_POWER: u32 = 8;

/// The largest number of terms an expanded power may produce.
const MAX_EXPANDED_TERMS: usize = 512;

/// Returns true if the factor is the reciprocal of a sum, such as `(x+1)^-2`.
fn is_sum_denominator(factor: &SymExpr) -> bool {
    match factor {
        SymExpr::Exp(base, exp) => {
            matches!(**base, SymExpr::Add(_)) && exp.as_number().is_some_and(|n| *n < 0)
        },
        _ => false,
    }
}

/// `a*(b+c) = a*b + a*c`
///
/// Products with a sum in the denominator are left alone, so `(x+1)/(x-1)` stays a quotient.
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(is_sum_denominator) {
            return None;
        }

        // find the first `SymExpr::Add`, and distribute every other factor over it
        let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let SymExpr::Add(terms) = &factors[idx] else {
            return None;
        };

        let others = factors.iter()
            .enumerate()
            .filter(|(other_idx, _)| *other_idx != idx)
            .map(|(_, factor)| factor.clone())
            .collect::<Vec<_>>();
        let new_terms = terms.iter()
            .map(|term| product(others.iter().cloned().chain([term.clone()])))
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// Expands small positive integer powers of sums.
///
/// `(a+b)^2 = a^2 + 2ab + b^2`
pub fn expand_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Add(terms) = lhs else {
            return None;
        };
        let n = rhs.as_number()
            .filter(|n| n.is_integer())
            .and_then(|n| n.numer().to_u32())
            .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n))?;
        if terms.len().checked_pow(n).map_or(true, |count| count > MAX_EXPANDED_TERMS) {
            return None;
        }

        // multiply out one copy of the sum at a time
        let mut expanded = terms.clone();
        for _ in 1..n {
            expanded = expanded.iter()
                .flat_map(|lhs| terms.iter().map(move |rhs| lhs.clone() * rhs.clone()))
                .collect();
        }
        Some(SymExpr::Add(expanded))
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it lets like terms meet, so later rules can combine
/// them.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| expand_power(expr, step_collector))
}
