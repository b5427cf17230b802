//! Sources of answers for the session's prompts.

use crate::error::SessionError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};

/// Asks the user a question and returns their answer.
pub trait Prompter {
    /// Shows the prompt and returns one line of input, without its line terminator. Returns
    /// [`SessionError::Eof`] if the input has ended.
    fn prompt(&mut self, prompt: &str) -> Result<String, SessionError>;
}

/// Reads answers with line editing and history, for use when stdin is a terminal.
pub struct EditorPrompter {
    editor: DefaultEditor,
}

impl EditorPrompter {
    pub fn new() -> Result<Self, SessionError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl Prompter for EditorPrompter {
    fn prompt(&mut self, prompt: &str) -> Result<String, SessionError> {
        let input = self.editor.readline(prompt)?;
        if !input.trim().is_empty() {
            self.editor.add_history_entry(&input)?;
        }
        Ok(input)
    }
}

/// Reads answers line by line from any reader, writing each prompt to the given writer first.
/// Used when stdin is piped.
pub struct LinePrompter<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(SessionError::Eof);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn strips_line_terminators() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new("x\r\n  y \nz".as_bytes(), &mut out);
        assert_eq!(prompter.prompt("a: ").unwrap(), "x");
        assert_eq!(prompter.prompt("b: ").unwrap(), "  y ");
        assert_eq!(prompter.prompt("c: ").unwrap(), "z");
        assert!(matches!(prompter.prompt("d: "), Err(SessionError::Eof)));
        drop(prompter);
        assert_eq!(String::from_utf8(out).unwrap(), "a: b: c: d: ");
    }
}
