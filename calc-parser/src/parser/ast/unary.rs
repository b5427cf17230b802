use calc_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        token::op::UnaryOp,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A unary expression, such as `-x`. Both unary operators are prefix operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a unary expression. The operand includes every following operator that binds
    /// tighter than the unary operator, so `-x**2` is `-(x**2)`.
    pub fn parse_right(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;
        let operand = {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?.0
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let is_unary = input.peek_token()
            .is_some_and(|token| matches!(token.kind, TokenKind::Add | TokenKind::Sub));
        if is_unary {
            Self::parse_right(input).map(Expr::Unary)
        } else {
            input.try_parse::<Primary>().map(Expr::from)
        }
    }
}
