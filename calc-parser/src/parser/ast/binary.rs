use calc_error::Error;
use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::ops::Range;

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before we build the corresponding AST
    /// node, we check if the operator after `2` has higher precedence than `+`. It does, so we
    /// parse the expression starting with `2` first, giving `2 * 3` as the right-hand-side of
    /// the `1 +` node.
    ///
    /// If it does not (such as in the expression `3 * 2 + 1`), we build the AST node `3 * 2`
    /// first, and [`Self::parse_expr`] will pick up the `+ 1` part of the expression.
    ///
    /// Implicit multiplication is also handled here. In `1 + 2x`, there is no operator after `2`,
    /// but an operand follows, so we continue as if a multiplication operator were present.
    /// [`Self::parse_expr`] reports whether it consumed anything, so that we stop once no operand
    /// follows the right-hand-side.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOp,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            if let Some(next_op) = input.peek::<BinOp>() {
                let binds_tighter = next_op.precedence() > precedence
                    || (next_op.precedence() == precedence && next_op.associativity() == Associativity::Right);
                if binds_tighter {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
                } else {
                    // `1 * 2 + 3` or `1 * 2 * 3`: let `lhs op rhs` become the new left-hand-side
                    break;
                }
            } else if precedence < Precedence::Factor && input.at_operand() {
                // an operand follows with no operator in between, so this is implicit
                // multiplication, which binds tighter than the current operator
                let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                rhs = expr;

                if !changed {
                    break;
                }
            } else {
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the given precedence, and a right-hand-side.
    ///
    /// Returns the parsed expression, and whether anything was parsed after `lhs`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            if let Ok(op) = input.try_parse_then::<BinOp, _>(|op, input| {
                if op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(error::NonFatal))
                }
            }) {
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else if Precedence::Factor >= precedence
                && input.peek::<BinOp>().is_none()
                && input.at_operand()
            {
                let rhs = Expr::from(input.try_parse::<Primary>()?);
                let op = BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..rhs.span().start,
                };
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}
