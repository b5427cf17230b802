use calc_error::Error;
use crate::{
    parser::{error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A number literal, such as `2`, `3.14`, or `.5`. The digits are kept as written so that the
/// value can be converted exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitNum {
    /// The digits of the number, as written.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A symbol / identifier literal, such as `x` or `pi`. Symbols are used to represent variables
/// and constants, and name the function of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Literal::Number(LitNum {
                value: token.lexeme.to_owned(),
                span: token.span,
            })),
            TokenKind::Name => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            _ => Err(Error::new(vec![token.span], error::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name],
                found: token.kind,
            })),
        }
    }
}
