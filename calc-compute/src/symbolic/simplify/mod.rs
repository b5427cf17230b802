//! Simplification of expressions.
//!
//! Simplification applies a set of rules to every node of an expression, innermost nodes first,
//! until no rule applies anywhere. Each rule is a function that accepts an expression and returns
//! `Some(expr)` if it could rewrite it. The rules live in [`rules`].
//!
//! [`simplify`] applies the algebraic rules: flattening, folding numbers, combining like terms and
//! factors, power rules, exponential and logarithm identities, exact trigonometric values, and
//! expansion of products and small powers of sums, and `sin(a)^2 + cos(a)^2 = 1`.
//! [`trig_simplify`] applies the same rules plus the other Pythagorean identities and the quotient
//! identities.
//!
//! ```
//! use calc_compute::symbolic::{parse, simplify};
//!
//! let expr = parse("x + x + 2*(x + 1)", &["x"]).unwrap();
//! assert_eq!(simplify(&expr).to_string(), "4*x + 2");
//! ```

pub mod rules;
pub mod step;

use log::warn;
use std::borrow::Cow;
use super::{expr::{Primary, SymExpr}, step_collector::{StepCollector, Traced}};
use step::Step;

/// A rule (or a set of rules combined with [`Option::or_else`]) that the simplifier applies to
/// every node.
pub type Rules = fn(&SymExpr, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// The maximum number of passes made over a single node before giving up.
const MAX_PASSES: usize = 256;

/// Simplifies every expression in the list. Returns `None` if none of them changed.
fn simplify_all(
    exprs: &[SymExpr],
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Vec<SymExpr>> {
    let mut changed = false;
    let mut new_exprs = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match inner_simplify_with(expr, rules, step_collector) {
            Some(new_expr) => {
                changed = true;
                new_exprs.push(new_expr);
            },
            None => new_exprs.push(expr.clone()),
        }
    }

    changed.then_some(new_exprs)
}

/// Simplifies the direct children of the expression. Returns `None` if none of them changed.
fn simplify_children(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => simplify_all(args, rules, step_collector)
            .map(|args| SymExpr::call(name.clone(), args)),
        SymExpr::Primary(_) => None,
        SymExpr::Add(terms) => simplify_all(terms, rules, step_collector).map(SymExpr::Add),
        SymExpr::Mul(factors) => simplify_all(factors, rules, step_collector).map(SymExpr::Mul),
        SymExpr::Exp(base, exp) => {
            let new_base = inner_simplify_with(base, rules, step_collector);
            let new_exp = inner_simplify_with(exp, rules, step_collector);
            if new_base.is_none() && new_exp.is_none() {
                return None;
            }

            let base = new_base.unwrap_or_else(|| (**base).clone());
            let exp = new_exp.unwrap_or_else(|| (**exp).clone());
            Some(base.pow(exp))
        },
    }
}

/// Applies the rules to the expression and its subexpressions until no rule applies. Children are
/// simplified before their parent, and a node is revisited whenever a rule rewrites it.
///
/// Returns `None` if the expression was already simplified.
fn inner_simplify_with(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<SymExpr> {
    let mut expr = Cow::Borrowed(expr);
    let mut changed = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_pass = false;

        if let Some(new_expr) = simplify_children(&expr, rules, step_collector) {
            expr = Cow::Owned(new_expr);
            changed_in_pass = true;
        }

        if let Some(new_expr) = rules(&expr, step_collector) {
            expr = Cow::Owned(new_expr);
            changed_in_pass = true;
        }

        if !changed_in_pass {
            return changed.then(|| expr.into_owned());
        }
        changed = true;
    }

    warn!("stopped simplifying `{}` after {} passes", expr, MAX_PASSES);
    Some(expr.into_owned())
}

/// Simplifies the expression with the given rules.
pub fn simplify_with(expr: &SymExpr, rules: Rules) -> SymExpr {
    inner_simplify_with(expr, rules, &mut Traced(())).unwrap_or_else(|| expr.clone())
}

/// Simplifies the expression with the algebraic rules in [`rules::all`].
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, rules::all)
}

/// Simplifies the expression with the algebraic rules in [`rules::all`], and returns the steps
/// that were taken.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Traced(Vec::new());
    let simplified = inner_simplify_with(expr, rules::all, &mut steps)
        .unwrap_or_else(|| expr.clone());
    (simplified, steps.0)
}

/// Simplifies the expression with the algebraic rules and the trigonometric identities in
/// [`rules::all_with_identities`].
pub fn trig_simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, rules::all_with_identities)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse;
    use super::*;

    fn simplified(source: &str) -> String {
        simplify(&parse(source, &["x", "y"]).unwrap()).to_string()
    }

    fn trig_simplified(source: &str) -> String {
        trig_simplify(&parse(source, &["x", "y"]).unwrap()).to_string()
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("2x + 3y - 2x"), "3*y");
        assert_eq!(simplified("x - x"), "0");
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplified("x * x**2 * y / x"), "x**2*y");
        assert_eq!(simplified("x**2 / x**2"), "1");
    }

    #[test]
    fn numbers() {
        assert_eq!(simplified("1/3 + 1/6"), "1/2");
        assert_eq!(simplified("0.5 * 4"), "2");
        assert_eq!(simplified("2**10"), "1024");
        assert_eq!(simplified("(9/4)**(1/2)"), "3/2");
        assert_eq!(simplified("8**(-2/3)"), "1/4");
        assert_eq!(simplified("2**(3/2)"), "2*sqrt(2)");
    }

    #[test]
    fn expansion() {
        assert_eq!(simplified("(x + 1)**2"), "x**2 + 2*x + 1");
        assert_eq!(simplified("x(x - y)"), "x**2 - x*y");
    }

    #[test]
    fn exponential_and_log() {
        assert_eq!(simplified("E**x * E**x"), "exp(2*x)");
        assert_eq!(simplified("ln(E) + exp(0)"), "2");
        assert_eq!(simplified("exp(ln(x))"), "x");
    }

    #[test]
    fn trig_values() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("sin(0)"), "0");
        assert_eq!(simplified("cos(pi/4)"), "sqrt(2)/2");
        assert_eq!(simplified("tan(pi/3)"), "sqrt(3)");
        assert_eq!(simplified("sin(-x)"), "-sin(x)");
        assert_eq!(simplified("atan(1)"), "pi/4");
    }

    #[test]
    fn trig_values_past_one_turn() {
        assert_eq!(simplified("sin(7pi/6)"), "-1/2");
        assert_eq!(simplified("cos(3pi)"), "-1");
        assert_eq!(simplified("sin(5pi/2)"), "1");
    }

    #[test]
    fn identities() {
        assert_eq!(trig_simplified("sin(x)**2 + cos(x)**2"), "1");
        assert_eq!(trig_simplified("3sin(y)**2 + 3cos(y)**2 + x"), "x + 3");
        assert_eq!(trig_simplified("1 + tan(x)**2"), "sec(x)**2");
        assert_eq!(trig_simplified("1 - sin(x)**2"), "cos(x)**2");
        assert_eq!(trig_simplified("sin(x)/cos(x)"), "tan(x)");
    }

    #[test]
    fn sine_cosine_sum_without_identities() {
        assert_eq!(simplified("sin(x)**2 + cos(x)**2"), "1");
        assert_eq!(simplified("2sin(x y)**2 + 2cos(x y)**2 - 1"), "1");
        // identities that change which functions appear are left to `trig_simplify`
        assert_eq!(simplified("1 + tan(x)**2"), "tan(x)**2 + 1");
        assert_eq!(simplified("sin(x)/cos(x)"), "sin(x)/cos(x)");
    }

    #[test]
    fn records_steps() {
        let (expr, steps) = simplify_with_steps(&parse("x + 0", &["x"]).unwrap());
        assert_eq!(expr, SymExpr::symbol("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
