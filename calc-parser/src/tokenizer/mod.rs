pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot classify becomes a [`TokenKind::Symbol`] token, so the parser can
/// report it with a span.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    tokenize(input)
        .spanned()
        .map(|(kind, span)| Token {
            kind: kind.unwrap_or(TokenKind::Symbol),
            lexeme: &input[span.clone()],
            span,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn power_and_caret() {
        compare_tokens(
            "x**2^3",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Caret, "^"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn implicit_product() {
        compare_tokens(
            "3.5xy(x2 - .5) $",
            [
                (TokenKind::Float, "3.5"),
                (TokenKind::Name, "xy"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, ".5"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("sin(x)");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..3, 3..4, 4..5, 5..6]);
    }
}
