//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let flat = factors.iter()
            .cloned()
            .fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor);
        Some(flat.downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Multiplies the numeric factors together, dropping the product if it is one.
///
/// `2*a*3 = 6a`
/// `1*a = a`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut coeff = rational(1);
        let mut count = 0;
        let mut rest = Vec::new();
        for factor in factors {
            match factor {
                SymExpr::Primary(Primary::Number(n)) => {
                    coeff *= n;
                    count += 1;
                },
                other => rest.push(other.clone()),
            }
        }

        if count == 0 || (count == 1 && coeff != 1) {
            return None;
        }

        if coeff != 1 {
            rest.insert(0, SymExpr::Primary(Primary::Number(coeff)));
        }
        Some(SymExpr::Mul(rest).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors. Bare numbers are left to [`multiply_numbers`].
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// `2^(1/2)*2^(1/2) = 2^(1/2+1/2)`
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut numbers = Vec::new();
        let mut groups: Vec<(SymExpr, Vec<SymExpr>)> = Vec::new();
        for factor in factors {
            if factor.is_number() {
                numbers.push(factor.clone());
                continue;
            }

            // bases must be strictly equal
            let (base, exp) = factor.as_power();
            match groups.iter_mut().find(|(other, _)| other == base) {
                Some((_, exps)) => exps.push(exp),
                None => groups.push((base.clone(), vec![exp])),
            }
        }

        if groups.iter().all(|(_, exps)| exps.len() == 1) {
            return None;
        }

        let combined = groups.into_iter()
            .map(|(base, mut exps)| {
                if exps.len() == 1 {
                    let exp = exps.remove(0);
                    if exp.is_one() {
                        base
                    } else {
                        base.pow(exp)
                    }
                } else {
                    base.pow(SymExpr::Add(exps))
                }
            });
        Some(SymExpr::Mul(numbers.into_iter().chain(combined).collect()).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
