//! Structs to help parse binary and unary operators.

use calc_error::Error;
use crate::{
    parser::{error, Associativity, Parse, Parser, Precedence},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Pos,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }

    /// Returns the associativity of the unary operation. Both unary operators are prefix
    /// operators.
    pub fn associativity(&self) -> Associativity {
        Associativity::Right
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Sub => UnaryOpKind::Neg,
            TokenKind::Add => UnaryOpKind::Pos,
            _ => return Err(Error::new(vec![token.span], error::UnexpectedToken {
                expected: &[TokenKind::Sub, TokenKind::Add],
                found: token.kind,
            })),
        };

        Ok(Self { kind, span: token.span })
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// Whether this binary operator was implicitly inserted by the parser, as in `2x`.
    pub implicit: bool,

    /// The region of the source code that this operator was parsed from. For implicit
    /// multiplication, this is the (possibly empty) gap between the operands.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Exp => BinOpKind::Exp,
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            _ => return Err(Error::new(vec![token.span], error::UnexpectedToken {
                expected: &[
                    TokenKind::Exp,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                ],
                found: token.kind,
            })),
        };

        Ok(Self {
            kind,
            implicit: false,
            span: token.span,
        })
    }
}
