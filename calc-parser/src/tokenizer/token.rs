use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("**")]
    Exp,

    /// The caret is not an operator in this grammar; callers rewrite it to `**` before parsing.
    #[token("^")]
    Caret,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if an expression can begin with this token without a leading operator. Such
    /// a token directly after an operand is an implicit multiplication.
    pub fn starts_operand(self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Int | TokenKind::Float | TokenKind::OpenParen)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
