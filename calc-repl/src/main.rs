use calc_repl::{run_session, EditorPrompter, LinePrompter, Prompter, SessionError};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::{io::{self, IsTerminal}, process::ExitCode};

const USAGE: &str = "usage: calc-repl [-v | --verbose]";

/// Reads the command-line arguments, returning the log level to use, or [`None`] if an argument
/// was not recognized.
fn log_level(args: impl Iterator<Item = String>) -> Option<LevelFilter> {
    let mut level = LevelFilter::Warn;
    for arg in args {
        match arg.as_str() {
            "-v" | "--verbose" => level = LevelFilter::Debug,
            _ => return None,
        }
    }
    Some(level)
}

/// Runs the session with the prompter that fits stdin.
fn run() -> Result<(), SessionError> {
    let stdout = io::stdout();
    let mut prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
        Box::new(EditorPrompter::new()?)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), stdout.lock()))
    };

    run_session(prompter.as_mut(), &mut stdout.lock())
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    args.next();

    let Some(level) = log_level(args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    // if the logger cannot be installed, run without diagnostics
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);

    match run() {
        Ok(()) | Err(SessionError::Eof) => ExitCode::SUCCESS,
        Err(err) => {
            err.report_to_stderr();
            ExitCode::FAILURE
        },
    }
}
