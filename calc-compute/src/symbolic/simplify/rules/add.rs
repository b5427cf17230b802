//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let flat = terms.iter()
            .cloned()
            .fold(SymExpr::Add(Vec::new()), |sum, term| sum + term);
        Some(flat.downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms, including numbers.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `1/2+1/3 = 5/6`
/// `a-a = 0`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // terms are grouped by their non-numeric factors, which must be strictly equal
        let mut groups: Vec<(Rational, SymExpr)> = Vec::new();
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => *sum += coeff,
                None => groups.push((coeff, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coeff, _)| *coeff != 0)
            .map(|(coeff, rest)| SymExpr::from_coefficient(coeff, rest))
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
