use calc_error::Error;
use crate::{
    parser::{ast::expr::Expr, error, token::{CloseParen, OpenParen}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if let Some(token) = input.peek_token() {
            if token.kind == TokenKind::CloseParen {
                let span = open_paren.span.start..token.span.end;
                return Err(Error::new(vec![span], error::EmptyParenthesis));
            }
        }

        let expr = input.try_parse::<Expr>()?;
        let end = match input.try_parse::<CloseParen>() {
            Ok(close_paren) => close_paren.span.end,
            Err(_) => {
                // keep going as if the parenthesis was closed at the end of the inner expression
                input.add_recoverable_error(Error::new(
                    vec![open_paren.span.clone()],
                    error::UnclosedParenthesis { opening: true },
                ));
                expr.span().end
            },
        };

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..end,
        })
    }
}
