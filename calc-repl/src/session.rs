//! The four calculus flows of a session.
//!
//! Each flow prompts for its inputs, then writes the steps of the computation to the output, one
//! labelled step at a time, ending with the final result. A flow that rejects its input prints the
//! reason and returns [`Ok`]; errors from parsing or from the engine are returned to the caller.

use calc_compute::{differentiate, integrate, integrate_definite, parse, simplify, trig_simplify, SymExpr};
use crate::{error::SessionError, prompt::Prompter};
use log::debug;
use std::io::Write;

const MENU: &[&str] = &[
    "Choose an operation: ",
    "1. Derivative",
    "2. Integral",
    "3. Partial Derivative",
    "4. Double Integral",
];

const SUBSTITUTION_HINT: &[&str] = &[
    "Step 2: Recognize possible substitution pattern (e.g., tan(x) and sec(x)).",
    "Since d(tan(x)) = sec^2(x) dx, we recognize this as a form of u-substitution.",
    "Setting u = tan(x), we find du = sec^2(x) dx.",
];

/// Parses user input as an expression, after rewriting `^` to `**`. The declared `symbols` are
/// never split into single letters.
fn parse_input(source: &str, symbols: &[&str]) -> Result<SymExpr, SessionError> {
    let input = source.replace('^', "**");
    parse(&input, symbols).map_err(|errors| SessionError::Parse { input, errors })
}

/// Parses a pair of bounds, or returns [`None`] if either answer is blank. A lone bound is
/// ignored without being parsed.
fn parse_bounds(lower: &str, upper: &str) -> Result<Option<(SymExpr, SymExpr)>, SessionError> {
    if lower.is_empty() || upper.is_empty() {
        return Ok(None);
    }
    Ok(Some((parse_input(lower, &[])?, parse_input(upper, &[])?)))
}

/// Writes a blank line, a step heading, and the rendered expression.
fn step(out: &mut dyn Write, heading: &str, expr: &SymExpr) -> Result<(), SessionError> {
    writeln!(out)?;
    writeln!(out, "{}", heading)?;
    writeln!(out, "{}", expr)?;
    Ok(())
}

/// Writes the original expression, as parsed.
fn original(out: &mut dyn Write, expr: &SymExpr) -> Result<(), SessionError> {
    step(out, "Original expression (formatted):", expr)
}

/// Splits a comma-separated list of variable names.
fn split_variables(input: &str) -> Vec<&str> {
    input.split(',').map(str::trim).collect()
}

fn derivative_flow(prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<(), SessionError> {
    let var = prompter.prompt("Enter the variable (e.g., 'x'): ")?;
    let var = var.trim();
    let source = prompter.prompt("Enter the expression to calculate its derivative: ")?;
    let expr = parse_input(&source, &[var])?;
    original(out, &expr)?;

    writeln!(out)?;
    writeln!(out, "Calculating derivative...")?;
    let simplified = simplify(&expr);
    step(out, "Step 1: Simplify the expression:", &simplified)?;

    let derivative = differentiate(&simplified, var)?;
    step(out, "Step 2: Take the derivative:", &derivative)?;
    step(out, "Final Result:", &derivative)
}

fn integral_flow(prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<(), SessionError> {
    let var = prompter.prompt("Enter the variable (e.g., 'x'): ")?;
    let var = var.trim();
    let source = prompter.prompt("Enter the expression to calculate its integral: ")?;
    let expr = parse_input(&source, &[var])?;
    original(out, &expr)?;

    let lower = prompter.prompt("lower bound(if you want the indefinite integral, leave it blank): ")?;
    let upper = prompter.prompt("upper bound (if you want the indefinite integral, leave it blank): ")?;
    let bounds = parse_bounds(&lower, &upper)?;

    writeln!(out)?;
    writeln!(out, "Calculating integral...")?;
    let simplified = simplify(&expr);
    step(out, "Step 1: Simplify the expression:", &simplified)?;

    let rendered = simplified.to_string();
    if rendered.contains("tan") && rendered.contains("sec") {
        writeln!(out)?;
        for line in SUBSTITUTION_HINT {
            writeln!(out, "{}", line)?;
        }
    }

    let integral = match &bounds {
        Some((lower, upper)) => {
            let integral = integrate_definite(&simplified, var, lower, upper)?;
            step(out, &format!("Step 3: Integrate the expression from {} to {}:", lower, upper), &integral)?;
            integral
        },
        None => {
            let integral = integrate(&simplified, var)?;
            step(out, "Step 3: Integrate the expression (indefinite):", &integral)?;
            integral
        },
    };

    let result = trig_simplify(&integral);
    step(out, "Step 4: Simplify the integral result (if possible):", &result)?;
    step(out, "Final Result:", &result)
}

fn partial_derivative_flow(prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<(), SessionError> {
    let vars = prompter.prompt("Enter all variables, separated by commas (e.g., 'x,y,z'): ")?;
    let vars = split_variables(&vars);

    let var = prompter.prompt("Enter the variable to differentiate with respect to: ")?;
    if !vars.contains(&var.as_str()) {
        writeln!(out, "Error: {} is not in the list of variables.", var)?;
        return Ok(());
    }

    let source = prompter.prompt("Enter the expression to calculate its partial derivative: ")?;
    let expr = parse_input(&source, &vars)?;
    original(out, &expr)?;

    writeln!(out)?;
    writeln!(out, "Calculating partial derivative with respect to {}...", var)?;
    let simplified = simplify(&expr);
    step(out, "Step 1: Simplify the expression:", &simplified)?;

    let derivative = differentiate(&simplified, &var)?;
    step(out, &format!("Step 2: Take the partial derivative with respect to {}:", var), &derivative)?;

    let result = simplify(&derivative);
    step(out, "Step 3: Simplify the result (if possible):", &result)?;
    step(out, "Final Result:", &result)
}

/// Integrates with respect to `var`, between the bounds if there are any.
fn integrate_between(
    expr: &SymExpr,
    var: &str,
    bounds: &Option<(SymExpr, SymExpr)>,
) -> Result<SymExpr, SessionError> {
    let result = match bounds {
        Some((lower, upper)) => integrate_definite(expr, var, lower, upper)?,
        None => integrate(expr, var)?,
    };
    Ok(result)
}

/// The heading of an integration step of the double integral.
fn integration_heading(number: usize, var: &str, bounds: &Option<(SymExpr, SymExpr)>) -> String {
    match bounds {
        Some((lower, upper)) => {
            format!("Step {}: Integrate with respect to {} from {} to {}:", number, var, lower, upper)
        },
        None => format!("Step {}: Integrate with respect to {} (indefinite):", number, var),
    }
}

fn double_integral_flow(prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<(), SessionError> {
    let vars = prompter.prompt("Enter the two variables, separated by commas (e.g., 'x,y'): ")?;
    let vars = split_variables(&vars);
    let &[x, y] = vars.as_slice() else {
        writeln!(out, "Error: a double integral needs exactly two variables, got {}.", vars.len())?;
        return Ok(());
    };

    let source = prompter.prompt("Enter the expression to calculate its double integral: ")?;
    let expr = parse_input(&source, &vars)?;
    original(out, &expr)?;

    let mut ask_bounds = |var: &str| -> Result<Option<(SymExpr, SymExpr)>, SessionError> {
        let lower = prompter.prompt(&format!("lower bound for {} (leave blank for indefinite): ", var))?;
        let upper = prompter.prompt(&format!("upper bound for {} (leave blank for indefinite): ", var))?;
        parse_bounds(&lower, &upper)
    };
    let x_bounds = ask_bounds(x)?;
    let y_bounds = ask_bounds(y)?;

    writeln!(out)?;
    writeln!(out, "Calculating double integral...")?;
    let simplified = simplify(&expr);
    step(out, "Step 1: Simplify the expression:", &simplified)?;

    let inner = integrate_between(&simplified, y, &y_bounds)?;
    step(out, &integration_heading(2, y, &y_bounds), &inner)?;

    let outer = integrate_between(&inner, x, &x_bounds)?;
    step(out, &integration_heading(3, x, &x_bounds), &outer)?;

    let result = trig_simplify(&outer);
    step(out, "Step 4: Simplify the result (if possible):", &result)?;

    let summary = match (&x_bounds, &y_bounds) {
        (Some((xa, xb)), Some((ya, yb))) => format!(
            "The double integral ∫_{}^{} ∫_{}^{} {} d{} d{} evaluates to:",
            xa, xb, ya, yb, simplified, y, x,
        ),
        (Some((xa, xb)), None) => format!(
            "The integral ∫_{}^{} (∫ {} d{}) d{}, indefinite in {}, evaluates to:",
            xa, xb, simplified, y, x, y,
        ),
        (None, Some((ya, yb))) => format!(
            "The integral ∫ (∫_{}^{} {} d{}) d{}, indefinite in {}, evaluates to:",
            ya, yb, simplified, y, x, x,
        ),
        (None, None) => format!(
            "The indefinite double integral ∫∫ {} d{} d{} evaluates to:",
            simplified, y, x,
        ),
    };
    writeln!(out)?;
    writeln!(out, "{}", summary)?;
    step(out, "Final Result:", &result)
}

/// Runs one session: shows the menu, reads the choice, and runs the chosen flow to completion.
pub fn run_session(prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<(), SessionError> {
    for line in MENU {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    let choice = prompter.prompt("Enter 1, 2, 3, or 4: ")?;
    debug!("selected operation {:?}", choice);

    match choice.as_str() {
        "1" => derivative_flow(prompter, out)?,
        "2" => integral_flow(prompter, out)?,
        "3" => partial_derivative_flow(prompter, out)?,
        "4" => double_integral_flow(prompter, out)?,
        _ => writeln!(out, "Invalid choice. Please restart the program.")?,
    }

    out.flush()?;
    Ok(())
}
