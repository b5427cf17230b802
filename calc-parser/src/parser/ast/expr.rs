use calc_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error,
        is_function,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn into_innermost(self) -> Self {
        match self {
            Expr::Paren(paren) => paren.into_innermost(),
            expr => expr,
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Ok(Binary::parse_expr(input, lhs, Precedence::Any)?.0)
    }
}

/// Represents a primary expression in the language. A primary expression is an operand of an
/// operator, and is the only kind of expression that can follow another operand directly to form
/// an implicit multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.peek_token().cloned() else {
            return Err(Error::new(vec![input.eof_span()], error::UnexpectedEof));
        };

        match token.kind {
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Primary::Paren),
            TokenKind::Name if is_function(token.lexeme) => input.try_parse::<Call>().map(Primary::Call),
            _ => input.try_parse::<Literal>().map(Primary::Literal),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
