//! The kinds of errors the parser can report.

use ariadne::Fmt;
use calc_attrs::ErrorKind;
use calc_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// An intentionally useless error, used to reject a speculative parse. It should never escape
/// the parser.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A `^` reached the parser. Powers are written with `**`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "`^` is not an operator here",
    labels = ["this caret"],
    help = format!("write powers with {}, as in {}", "`**`".fg(EXPR), "`x**2`".fg(EXPR)),
)]
pub struct CaretOperator;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A function name was not followed by anything it could be applied to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", name),
    labels = ["this function"],
    help = format!("call it with parentheses, as in {}", format!("`{}(x)`", name).fg(EXPR)),
)]
pub struct MissingArgument {
    /// The name of the function.
    pub name: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for `{}`", name),
    labels = [format!("this call has {} argument(s)", given)],
    help = format!("`{}` takes {} argument(s)", name, expected),
)]
pub struct ArgumentCount {
    /// The name of the function.
    pub name: String,

    /// A description of the accepted argument counts.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,
}
