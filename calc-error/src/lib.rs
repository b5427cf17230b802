//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the span-carrying [`Error`] type that wraps them.

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, highlighting the given input.
    pub fn write_report(&self, src_id: &str, input: &str, w: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind};
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug)]
    struct MissingOperand;

    impl ErrorKind for MissingOperand {
        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message("missing operand")
                .with_label(Label::new((src_id, spans[0].clone())).with_color(EXPR).with_message("here"))
                .finish()
        }
    }

    #[test]
    fn report_mentions_message_and_label() {
        let err = Error::new(vec![2..3], MissingOperand);
        let mut buf = Vec::new();
        err.write_report("input", "x +", &mut buf).unwrap();

        let text = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(text.contains("missing operand"), "{}", text);
        assert!(text.contains("here"), "{}", text);
    }

    #[test]
    fn spans_are_kept() {
        let err = Error::new(vec![0..1, 4..5], MissingOperand);
        assert_eq!(err.spans, vec![0..1, 4..5]);
    }
}
