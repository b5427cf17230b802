//! Simplification rules for the exponential function and the natural logarithm.
//!
//! Powers of `E` are rewritten into calls to `exp`, so that every other rule only needs to
//! recognize one form.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_call, do_multiply, do_power, product}, step::Step},
    step_collector::StepCollector,
};

/// `E^a = exp(a)`
pub fn euler_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        (lhs.as_symbol() == Some("E")).then(|| SymExpr::call("exp", vec![rhs.clone()]))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::EulerPower);
    Some(opt)
}

/// `exp(0) = 1`
/// `exp(1) = E`
pub fn exp_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "exp", |args| match args {
        [arg] if arg.is_zero() => Some(SymExpr::one()),
        [arg] if arg.is_one() => Some(SymExpr::symbol("E")),
        _ => None,
    })?;

    step_collector.push(Step::ExpValue);
    Some(opt)
}

/// `log(1) = 0`
/// `log(E) = 1`
pub fn log_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| match args {
        [arg] if arg.is_one() => Some(SymExpr::zero()),
        [arg] if arg.as_symbol() == Some("E") => Some(SymExpr::one()),
        _ => None,
    })?;

    step_collector.push(Step::LogValue);
    Some(opt)
}

/// `exp(log(a)) = a`
/// `log(exp(a)) = a`
pub fn exp_log_inverse(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "exp", |args| match args {
        [arg] => arg.as_unary_call("log").cloned(),
        _ => None,
    })
        .or_else(|| do_call(expr, "log", |args| match args {
            [arg] => arg.as_unary_call("exp").cloned(),
            _ => None,
        }))?;

    step_collector.push(Step::ExpLogInverse);
    Some(opt)
}

/// `exp(a)^b = exp(ab)`
pub fn exp_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let arg = lhs.as_unary_call("exp")?;
        Some(SymExpr::call("exp", vec![arg.clone() * rhs.clone()]))
    })?;

    step_collector.push(Step::ExpPower);
    Some(opt)
}

/// `exp(a)*exp(b) = exp(a+b)`
pub fn combine_exp(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (exps, rest): (Vec<_>, Vec<_>) = factors.iter()
            .partition(|factor| factor.as_unary_call("exp").is_some());
        if exps.len() < 2 {
            return None;
        }

        let sum = exps.into_iter()
            .filter_map(|factor| factor.as_unary_call("exp"))
            .cloned()
            .fold(SymExpr::Add(Vec::new()), |sum, arg| sum + arg);
        Some(product(rest.into_iter().cloned().chain([SymExpr::call("exp", vec![sum])])))
    })?;

    step_collector.push(Step::CombineExp);
    Some(opt)
}

/// Applies all exponential and logarithm rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    euler_power(expr, step_collector)
        .or_else(|| exp_value(expr, step_collector))
        .or_else(|| log_value(expr, step_collector))
        .or_else(|| exp_log_inverse(expr, step_collector))
        .or_else(|| exp_power(expr, step_collector))
        .or_else(|| combine_exp(expr, step_collector))
}
