pub mod ast;
pub mod error;
pub mod token;

use calc_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Names that are parsed as function calls: `sin(x)`, or `sin x` without parentheses.
pub const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot",
    "asin", "acos", "atan",
    "sinh", "cosh", "tanh",
    "exp", "log", "ln", "sqrt", "abs",
];

/// Names of constants. They are never split into single-letter symbols.
pub const CONSTANTS: &[&str] = &["pi", "E"];

/// Returns true if the given name is a known function.
pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// Splits every multi-letter name that is not a function, constant, or declared symbol into
/// single-letter names, so that `xy` reads as `x*y`. Names containing digits or underscores are
/// kept whole.
fn split_names<'source>(tokens: Box<[Token<'source>]>, symbols: &[&str]) -> Box<[Token<'source>]> {
    let mut split = Vec::with_capacity(tokens.len());
    for token in tokens.into_vec() {
        let splittable = token.kind == TokenKind::Name
            && token.lexeme.len() > 1
            && token.lexeme.bytes().all(|b| b.is_ascii_alphabetic())
            && !is_function(token.lexeme)
            && !CONSTANTS.contains(&token.lexeme)
            && !symbols.contains(&token.lexeme);

        if splittable {
            let start = token.span.start;
            split.extend((0..token.lexeme.len()).map(|i| Token {
                span: start + i..start + i + 1,
                kind: TokenKind::Name,
                lexeme: &token.lexeme[i..i + 1],
            }));
        } else {
            split.push(token);
        }
    }
    split.into_boxed_slice()
}

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// input into an abstract syntax tree.
#[derive(Debug)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// Errors that the parser was able to recover from, such as a missing closing parenthesis.
    /// They are reported together once parsing finishes.
    recoverable_errors: Vec<Error>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, with no declared symbols.
    pub fn new(source: &'source str) -> Self {
        Self::with_symbols(source, &[])
    }

    /// Create a new parser for the given source. The given symbol names are never split into
    /// single-letter symbols.
    pub fn with_symbols(source: &'source str, symbols: &[&str]) -> Self {
        Self {
            tokens: split_names(tokenize_complete(source), symbols),
            cursor: 0,
            recoverable_errors: Vec::new(),
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Records an error that the parser was able to recover from. Parsing continues, but
    /// [`Parser::try_parse_full`] will fail with this error.
    pub fn add_recoverable_error(&mut self, error: Error) {
        self.recoverable_errors.push(error);
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns true if the next non-whitespace token can begin an operand.
    pub fn at_operand(&self) -> bool {
        self.peek_token().is_some_and(|token| token.kind.starts_operand())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(error::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Parses a value without consuming any tokens, returning it if parsing succeeded.
    pub fn peek<T: Parse>(&mut self) -> Option<T> {
        let start = self.cursor;
        let value = self.try_parse::<T>().ok();
        self.cursor = start;
        value
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    if values.is_empty() {
                        self.cursor = start;
                        return Err(err);
                    } else {
                        return Ok(values);
                    }
                },
            }

            match self.peek_token() {
                Some(token) if token.kind == delimiter => {
                    self.next_token()?;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. Recoverable errors recorded by a failed attempt are discarded
    /// along with the attempt.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let errors = self.recoverable_errors.len();
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                self.recoverable_errors.truncate(errors);
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned. Recoverable errors found along the way are
    /// returned as well.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Vec<Error>> {
        let result = T::parse(self);
        let mut errors = std::mem::take(&mut self.recoverable_errors);

        match result {
            Ok(value) => {
                if let Some(token) = self.peek_token() {
                    let span = token.span.start..self.eof_span().end;
                    let error = match token.kind {
                        TokenKind::Caret => Error::new(vec![token.span.clone()], error::CaretOperator),
                        TokenKind::CloseParen => Error::new(
                            vec![token.span.clone()],
                            error::UnclosedParenthesis { opening: false },
                        ),
                        _ => Error::new(vec![span], error::ExpectedEof),
                    };
                    errors.push(error);
                }

                if errors.is_empty() {
                    Ok(value)
                } else {
                    Err(errors)
                }
            },
            Err(err) => {
                errors.push(err);
                Err(errors)
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, the operator appears to the left of the operand.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication shares this precedence.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    /// Returns the error messages for the given input.
    fn messages(input: &str) -> Vec<String> {
        let errors = Parser::new(input).try_parse_full::<Expr>().unwrap_err();
        errors.iter()
            .map(|err| format!("{:?}", err.kind))
            .collect()
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.14", 0..4));
    }

    #[test]
    fn precedence_of_power_over_product() {
        let mut parser = Parser::new("2*x**3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Mul,
            false,
            1..2,
            bin(sym("x", 2..3), BinOpKind::Exp, false, 3..5, num("3", 5..6)),
        ));
    }

    #[test]
    fn power_is_right_associative() {
        let mut parser = Parser::new("2**3**4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp,
            false,
            1..3,
            bin(num("3", 3..4), BinOpKind::Exp, false, 4..6, num("4", 6..7)),
        ));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let mut parser = Parser::new("1-2-3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("1", 0..1), BinOpKind::Sub, false, 1..2, num("2", 2..3)),
            BinOpKind::Sub,
            false,
            3..4,
            num("3", 4..5),
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("2x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("x", 1..2)));
    }

    #[test]
    fn implicit_multiplication_binds_like_product() {
        let mut parser = Parser::new("1 + 2x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("1", 0..1),
            BinOpKind::Add,
            false,
            2..3,
            bin(num("2", 4..5), BinOpKind::Mul, true, 5..5, sym("x", 5..6)),
        ));
    }

    #[test]
    fn implicit_multiplication_under_power() {
        // `x**2y` is `(x**2)*y`
        let mut parser = Parser::new("x**2y");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(sym("x", 0..1), BinOpKind::Exp, false, 1..3, num("2", 3..4)),
            BinOpKind::Mul,
            true,
            4..4,
            sym("y", 4..5),
        ));
    }

    #[test]
    fn implicit_multiplication_with_parens() {
        let mut parser = Parser::new("x(x+1)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            sym("x", 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            Expr::Paren(Paren {
                expr: Box::new(bin(sym("x", 2..3), BinOpKind::Add, false, 3..4, num("1", 4..5))),
                span: 1..6,
            }),
        ));
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let mut parser = Parser::new("-x**2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..4, num("2", 4..5))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..5,
        }));
    }

    #[test]
    fn names_are_split() {
        let mut parser = Parser::new("xy");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(sym("x", 0..1), BinOpKind::Mul, true, 1..1, sym("y", 1..2)));
    }

    #[test]
    fn declared_names_are_kept() {
        let mut parser = Parser::with_symbols("2theta", &["theta"]);
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("theta", 1..6)));
    }

    #[test]
    fn constants_are_kept() {
        let mut parser = Parser::new("pi");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, sym("pi", 0..2));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("sin(x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![sym("x", 4..5)],
            span: 0..6,
        }));
    }

    #[test]
    fn implicit_application() {
        let mut parser = Parser::new("2 sin x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Mul,
            true,
            1..2,
            Expr::Call(Call {
                name: LitSym { name: "sin".to_string(), span: 2..5 },
                args: vec![sym("x", 6..7)],
                span: 2..7,
            }),
        ));
    }

    #[test]
    fn log_with_base() {
        let mut parser = Parser::new("log(x, 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![sym("x", 4..5), num("2", 7..8)],
            span: 0..9,
        }));
    }

    #[test]
    fn caret_is_rejected() {
        assert_eq!(messages("x^2"), vec!["CaretOperator".to_string()]);
    }

    #[test]
    fn unclosed_parenthesis() {
        assert_eq!(messages("(x + 1"), vec!["UnclosedParenthesis { opening: true }".to_string()]);
        assert_eq!(messages("x + 1)"), vec!["UnclosedParenthesis { opening: false }".to_string()]);
    }

    #[test]
    fn empty_parenthesis() {
        assert_eq!(messages("2()"), vec!["EmptyParenthesis".to_string()]);
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(messages("x +"), vec!["UnexpectedEof".to_string()]);
    }

    #[test]
    fn wrong_argument_count() {
        assert_eq!(
            messages("sin(x, y)"),
            vec!["ArgumentCount { name: \"sin\", expected: \"exactly 1\", given: 2 }".to_string()],
        );
    }

    #[test]
    fn trees_have_total_equality() {
        fn same<T: Eq>(a: &T, b: &T) -> bool {
            a == b
        }

        let first = Parser::new("-sin(2x)**2").try_parse_full::<Expr>().unwrap();
        let second = Parser::new("-sin(2x)**2").try_parse_full::<Expr>().unwrap();
        assert!(same(&first, &second));

        let third = Parser::new("-sin(2x)**3").try_parse_full::<Expr>().unwrap();
        assert!(!same(&first, &third));
    }
}
