use calc_repl::{run_session, Prompter, SessionError};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;

/// Answers prompts from a fixed script, recording every prompt it was shown.
struct Script {
    answers: VecDeque<&'static str>,
    prompts: Vec<String>,
}

impl Prompter for Script {
    fn prompt(&mut self, prompt: &str) -> Result<String, SessionError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
            .map(str::to_string)
            .ok_or(SessionError::Eof)
    }
}

/// Runs a session with the given answers, returning the result, the transcript, and the prompts
/// that were shown.
fn run(answers: &[&'static str]) -> (Result<(), SessionError>, String, Vec<String>) {
    let mut script = Script {
        answers: answers.iter().copied().collect(),
        prompts: Vec::new(),
    };
    let mut out = Vec::new();
    let result = run_session(&mut script, &mut out);
    let transcript = String::from_utf8(out).unwrap();
    (result, transcript, script.prompts)
}

/// Returns the line after the last `Final Result:` heading.
fn final_result(transcript: &str) -> &str {
    transcript.rsplit("Final Result:\n")
        .next()
        .and_then(|rest| rest.lines().next())
        .unwrap_or_default()
}

const MENU: &str = "Choose an operation: \n1. Derivative\n2. Integral\n3. Partial Derivative\n4. Double Integral\n";

#[test]
fn derivative_transcript() {
    let (result, transcript, prompts) = run(&["1", "x", "x^2"]);
    assert!(result.is_ok());
    assert_eq!(prompts, vec![
        "Enter 1, 2, 3, or 4: ",
        "Enter the variable (e.g., 'x'): ",
        "Enter the expression to calculate its derivative: ",
    ]);
    assert_eq!(transcript, format!("{MENU}{}", "
Original expression (formatted):
x**2

Calculating derivative...

Step 1: Simplify the expression:
x**2

Step 2: Take the derivative:
2*x

Final Result:
2*x
"));
}

#[test]
fn indefinite_integral() {
    let (result, transcript, _) = run(&["2", "x", "x^2", "", ""]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 3: Integrate the expression (indefinite):\nx**3/3\n"));
    assert_eq!(final_result(&transcript), "x**3/3");
}

#[test]
fn definite_integral() {
    let (result, transcript, _) = run(&["2", "x", "x^2", "0", "1"]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 3: Integrate the expression from 0 to 1:\n1/3\n"));
    assert_eq!(final_result(&transcript), "1/3");
}

#[test]
fn one_bound_is_indefinite() {
    let (result, transcript, _) = run(&["2", "x", "x^2", "0", ""]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 3: Integrate the expression (indefinite):"));
    assert_eq!(final_result(&transcript), "x**3/3");
}

#[test]
fn lone_bound_is_not_parsed() {
    let (result, transcript, _) = run(&["2", "x", "x^2", "(", ""]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 3: Integrate the expression (indefinite):"));
    assert_eq!(final_result(&transcript), "x**3/3");

    let (result, _, _) = run(&["4", "x,y", "x*y", "", "2x^", "0", "1"]);
    assert!(result.is_ok());
}

#[test]
fn substitution_hint() {
    let (result, transcript, _) = run(&["2", "x", "tan(x) sec(x)^2", "", ""]);
    assert!(result.is_ok());
    assert!(transcript.contains(
        "\nStep 2: Recognize possible substitution pattern (e.g., tan(x) and sec(x)).\n\
        Since d(tan(x)) = sec^2(x) dx, we recognize this as a form of u-substitution.\n\
        Setting u = tan(x), we find du = sec^2(x) dx.\n"
    ));
    assert_eq!(final_result(&transcript), "tan(x)**2/2");

    let (_, transcript, _) = run(&["2", "x", "tan(x)", "", ""]);
    assert!(!transcript.contains("Recognize possible substitution pattern"));
}

#[test]
fn partial_derivative() {
    let (result, transcript, _) = run(&["3", "x, y", "y", "x^2*y^3"]);
    assert!(result.is_ok());
    assert!(transcript.contains("Calculating partial derivative with respect to y..."));
    assert!(transcript.contains("Step 2: Take the partial derivative with respect to y:\n3*x**2*y**2\n"));
    assert!(transcript.contains("Step 3: Simplify the result (if possible):\n3*x**2*y**2\n"));
    assert_eq!(final_result(&transcript), "3*x**2*y**2");
}

#[test]
fn partial_derivative_keeps_declared_names() {
    let (result, transcript, _) = run(&["3", "r,theta", "theta", "r^2 sin(theta)"]);
    assert!(result.is_ok());
    assert_eq!(final_result(&transcript), "r**2*cos(theta)");
}

#[test]
fn partial_derivative_unknown_variable() {
    let (result, transcript, prompts) = run(&["3", "x,y", "z"]);
    assert!(result.is_ok());
    assert!(transcript.ends_with("Error: z is not in the list of variables.\n"));
    assert_eq!(prompts.len(), 3);
}

#[test]
fn indefinite_double_integral() {
    let (result, transcript, _) = run(&["4", "x,y", "x*y", "", "", "", ""]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 2: Integrate with respect to y (indefinite):\nx*y**2/2\n"));
    assert!(transcript.contains("Step 3: Integrate with respect to x (indefinite):\nx**2*y**2/4\n"));
    assert!(transcript.contains("The indefinite double integral ∫∫ x*y dy dx evaluates to:\n"));
    assert_eq!(final_result(&transcript), "x**2*y**2/4");
}

#[test]
fn definite_double_integral() {
    let (result, transcript, _) = run(&["4", "x,y", "x*y", "0", "1", "0", "2"]);
    assert!(result.is_ok());
    assert!(transcript.contains("Step 2: Integrate with respect to y from 0 to 2:\n2*x\n"));
    assert!(transcript.contains("The double integral ∫_0^1 ∫_0^2 x*y dy dx evaluates to:\n"));
    assert_eq!(final_result(&transcript), "1");
}

#[test]
fn double_integral_asymmetric_bounds() {
    let (result, transcript, _) = run(&["4", "x,y", "x*y", "0", "", "0", "1"]);
    assert!(result.is_ok());
    assert!(transcript.contains("The integral ∫ (∫_0^1 x*y dy) dx, indefinite in x, evaluates to:\n"));
    assert_eq!(final_result(&transcript), "x**2/4");

    let (_, transcript, _) = run(&["4", "x,y", "x*y", "0", "1", "", "1"]);
    assert!(transcript.contains("The integral ∫_0^1 (∫ x*y dy) dx, indefinite in y, evaluates to:\n"));
    assert_eq!(final_result(&transcript), "y**2/4");
}

#[test]
fn double_integral_needs_two_variables() {
    let (result, transcript, prompts) = run(&["4", "x,y,z", "x*y*z"]);
    assert!(result.is_ok());
    assert!(transcript.ends_with("Error: a double integral needs exactly two variables, got 3.\n"));
    assert_eq!(prompts.len(), 2);
}

#[test]
fn invalid_choice() {
    let (result, transcript, prompts) = run(&["5"]);
    assert!(result.is_ok());
    assert_eq!(transcript, format!("{MENU}Invalid choice. Please restart the program.\n"));
    assert_eq!(prompts.len(), 1);

    let (_, transcript, _) = run(&[" 1"]);
    assert!(transcript.ends_with("Invalid choice. Please restart the program.\n"));
}

#[test]
fn parse_error() {
    let (result, _, _) = run(&["1", "x", "2x^"]);
    match result {
        Err(SessionError::Parse { input, errors }) => {
            assert_eq!(input, "2x**");
            assert!(!errors.is_empty());
        },
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn engine_error() {
    let (result, _, _) = run(&["2", "x", "exp(x^2)", "", ""]);
    assert!(matches!(result, Err(SessionError::Integrate(_))));
}

#[test]
fn end_of_input() {
    let (result, transcript, _) = run(&["1", "x"]);
    assert!(matches!(result, Err(SessionError::Eof)));
    assert_eq!(transcript, MENU);
}
