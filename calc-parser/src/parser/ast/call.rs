use calc_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}, literal::LitSym},
        error,
        is_function,
        token::{CloseParen, Name, OpenParen},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Returns the accepted argument counts of the given function, and a description of them.
fn arity(name: &str) -> (Range<usize>, &'static str) {
    match name {
        // `log(x, b)` is the logarithm of `x` in base `b`
        "log" => (1..3, "1 or 2"),
        _ => (1..2, "exactly 1"),
    }
}

/// A function call, such as `sin(x)` or `log(x, 2)`.
///
/// A function name followed by an operand without parentheses, such as `sin x`, is also parsed as
/// a call with that operand as its only argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the arguments of a call written with parentheses, returning them and the end of the
    /// call's span.
    fn parse_paren_args(input: &mut Parser, name: &LitSym) -> Result<(Vec<Expr>, usize), Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if let Some(token) = input.peek_token() {
            if token.kind == TokenKind::CloseParen {
                let span = name.span.start..token.span.end;
                return Err(Error::new(vec![span], error::MissingArgument { name: name.name.clone() }));
            }
        }

        let args = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
        let end = match input.try_parse::<CloseParen>() {
            Ok(close_paren) => close_paren.span.end,
            Err(_) => {
                input.add_recoverable_error(Error::new(
                    vec![open_paren.span.clone()],
                    error::UnclosedParenthesis { opening: true },
                ));
                args.last().map_or(open_paren.span.end, |arg| arg.span().end)
            },
        };

        Ok((args, end))
    }

    /// Parses the operand of a function applied without parentheses. The operand extends over any
    /// powers that follow it, so `sin x**2` is `sin(x**2)`.
    fn parse_implicit_arg(input: &mut Parser, name: &LitSym) -> Result<Expr, Error> {
        if !input.at_operand() {
            return Err(Error::new(vec![name.span.clone()], error::MissingArgument { name: name.name.clone() }));
        }

        let operand = input.try_parse::<Primary>()?.into();
        Ok(Binary::parse_expr(input, operand, Precedence::Exp)?.0)
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse_then::<Name, _>(|name, input| {
            if is_function(&name.lexeme) {
                Ok(())
            } else {
                Err(input.error(error::NonFatal))
            }
        })?;
        let name = LitSym { name: name.lexeme, span: name.span };

        let parenthesized = input.peek_token().is_some_and(|token| token.kind == TokenKind::OpenParen);
        let (args, end) = if parenthesized {
            Self::parse_paren_args(input, &name)?
        } else {
            let arg = Self::parse_implicit_arg(input, &name)?;
            let end = arg.span().end;
            (vec![arg], end)
        };

        let (accepted, expected) = arity(&name.name);
        if !accepted.contains(&args.len()) {
            return Err(Error::new(vec![name.span.start..end], error::ArgumentCount {
                name: name.name.clone(),
                expected,
                given: args.len(),
            }));
        }

        let span = name.span.start..end;
        Ok(Self { name, args, span })
    }
}
