//! Simplification rules for trigonometric functions.

mod table;

use crate::primitive::rational;
use crate::symbolic::{
    expr::{make_fraction, Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// Functions `f` with `f(-x) = -f(x)`.
const ODD: &[&str] = &["sin", "tan", "csc", "cot", "asin", "atan", "sinh", "tanh"];

/// Functions `f` with `f(-x) = f(x)`.
const EVEN: &[&str] = &["cos", "sec", "cosh"];

/// If the angle is a rational multiple of `pi` (including zero), returns it as a fraction of a
/// full turn, reduced to the range 0 (inclusive) to 1 (exclusive).
fn turn_fraction(angle: &SymExpr) -> Option<Rational> {
    // example: sin(pi/6)
    // pi/6 is 1/6 of pi, which is 1/12 of a full turn
    let multiple = match angle {
        SymExpr::Primary(Primary::Number(n)) if *n == 0 => rational(0),
        SymExpr::Primary(Primary::Symbol(sym)) if sym == "pi" => rational(1),
        SymExpr::Mul(_) => {
            let (coeff, rest) = angle.split_coefficient();
            if rest.as_symbol() != Some("pi") {
                return None;
            }
            coeff
        },
        _ => return None,
    };

    let turn: Rational = multiple / 2;
    let whole = turn.clone().floor();
    Some(turn - whole)
}

/// `sin` of the given fraction of a turn.
fn sine_at(turn: &Rational) -> Option<SymExpr> {
    table::SIN_TABLE.get(turn).map(|out| out.to_expr())
}

/// `cos` of the given fraction of a turn, using `cos(t) = sin(t + pi/2)`.
fn cosine_at(turn: &Rational) -> Option<SymExpr> {
    let shifted = turn.clone() + rational((1, 4));
    let whole = shifted.clone().floor();
    sine_at(&(shifted - whole))
}

/// `num/den`, unless the denominator is zero.
fn quotient(num: SymExpr, den: SymExpr) -> Option<SymExpr> {
    if den.is_zero() {
        None
    } else {
        Some(make_fraction(num, den))
    }
}

/// Returns true if the argument would print with a leading minus sign.
fn is_negative(arg: &SymExpr) -> bool {
    match arg {
        SymExpr::Primary(Primary::Number(n)) => *n < 0,
        SymExpr::Mul(_) => arg.split_coefficient().0 < 0,
        _ => false,
    }
}

/// Computes `sin`, `cos`, `tan`, `cot`, `sec`, and `csc` at multiples of `pi/6` and `pi/4`.
///
/// `sin(pi/6) = 1/2`
/// `cos(pi) = -1`
/// `tan(pi/3) = sqrt(3)`
pub fn trig_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    let [arg] = args else {
        return None;
    };
    if !matches!(name, "sin" | "cos" | "tan" | "cot" | "sec" | "csc") {
        return None;
    }

    let turn = turn_fraction(arg)?;
    let sin = sine_at(&turn)?;
    let cos = cosine_at(&turn)?;
    let opt = match name {
        "sin" => Some(sin),
        "cos" => Some(cos),
        "tan" => quotient(sin, cos),
        "cot" => quotient(cos, sin),
        "sec" => quotient(SymExpr::one(), cos),
        _ => quotient(SymExpr::one(), sin),
    }?;

    step_collector.push(Step::TrigValue);
    Some(opt)
}

/// `asin(0) = 0`, `asin(1/2) = pi/6`, `asin(1) = pi/2`
/// `acos(0) = pi/2`, `acos(1/2) = pi/3`, `acos(1) = 0`, `acos(-a) = pi - acos(a)`
/// `atan(0) = 0`, `atan(1) = pi/4`
pub fn inverse_trig_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let pi_times = |n: (i32, i32)| SymExpr::number(n) * SymExpr::symbol("pi");
    let opt = do_call(expr, "asin", |args| {
        let n = args.first()?.as_number()?;
        if *n == 0 {
            Some(SymExpr::zero())
        } else if *n == rational((1, 2)) {
            Some(pi_times((1, 6)))
        } else if *n == 1 {
            Some(pi_times((1, 2)))
        } else {
            None
        }
    })
        .or_else(|| do_call(expr, "acos", |args| {
            let arg = args.first()?;
            if is_negative(arg) {
                return Some(SymExpr::symbol("pi") - SymExpr::call("acos", vec![-arg.clone()]));
            }

            let n = arg.as_number()?;
            if *n == 0 {
                Some(pi_times((1, 2)))
            } else if *n == rational((1, 2)) {
                Some(pi_times((1, 3)))
            } else if *n == 1 {
                Some(SymExpr::zero())
            } else {
                None
            }
        }))
        .or_else(|| do_call(expr, "atan", |args| {
            let n = args.first()?.as_number()?;
            if *n == 0 {
                Some(SymExpr::zero())
            } else if *n == 1 {
                Some(pi_times((1, 4)))
            } else {
                None
            }
        }))?;

    step_collector.push(Step::InverseTrigValue);
    Some(opt)
}

/// `sin(-a) = -sin(a)`
/// `cos(-a) = cos(a)`
/// etc.
pub fn parity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    let [arg] = args else {
        return None;
    };
    if !is_negative(arg) {
        return None;
    }

    let positive = SymExpr::call(name, vec![-arg.clone()]);
    let opt = if ODD.contains(&name) {
        -positive
    } else if EVEN.contains(&name) {
        positive
    } else {
        return None;
    };

    step_collector.push(Step::Parity);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    trig_value(expr, step_collector)
        .or_else(|| inverse_trig_value(expr, step_collector))
        .or_else(|| parity(expr, step_collector))
}
