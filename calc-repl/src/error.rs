use calc_compute::{DerivativeError, IntegrateError};
use calc_error::Error as ParseError;
use rustyline::error::ReadlineError;
use std::{fmt, io};

/// Utility enum to package errors that can end a session early.
#[derive(Debug)]
pub enum SessionError {
    /// Errors that occurred while parsing an expression, along with the (normalized) input they
    /// point into.
    Parse {
        input: String,
        errors: Vec<ParseError>,
    },

    /// The expression could not be differentiated.
    Derivative(DerivativeError),

    /// The expression could not be integrated.
    Integrate(IntegrateError),

    /// The input ended (or was interrupted) while a prompt was waiting for an answer.
    Eof,

    /// The line editor failed.
    Readline(ReadlineError),

    /// Reading from stdin or writing the output failed.
    Io(io::Error),
}

impl SessionError {
    /// Report this error to stderr. Parse errors are rendered against the input they came from.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Parse { input, errors } => errors.iter().for_each(|err| {
                if let Err(io_err) = err.report_to_stderr("input", input) {
                    eprintln!("error: {}", io_err);
                }
            }),
            Self::Eof => (),
            other => eprintln!("error: {}", other),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input, errors } => {
                write!(f, "{} error(s) while parsing `{}`", errors.len(), input)
            },
            Self::Derivative(err) => write!(f, "{}", err),
            Self::Integrate(err) => write!(f, "{}", err),
            Self::Eof => write!(f, "unexpected end of input"),
            Self::Readline(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<DerivativeError> for SessionError {
    fn from(err: DerivativeError) -> Self {
        Self::Derivative(err)
    }
}

impl From<IntegrateError> for SessionError {
    fn from(err: IntegrateError) -> Self {
        Self::Integrate(err)
    }
}

impl From<ReadlineError> for SessionError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Eof | ReadlineError::Interrupted => Self::Eof,
            err => Self::Readline(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
