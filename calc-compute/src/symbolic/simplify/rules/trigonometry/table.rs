//! Exact values of the sine function at well-known angles.
//!
//! The angles are stored as fractions of a full turn, from 0 (inclusive) to 1 (exclusive), so
//! `1/12` is `pi/6` radians and `3/4` is `3pi/2` radians. Values of the other trigonometric
//! functions are derived from this table.

use crate::symbolic::expr::SymExpr;
use once_cell::sync::Lazy;
use rug::Rational;
use std::collections::HashMap;

/// The magnitude of the sine of a well-known angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exact {
    /// `0`
    Zero,

    /// `1/2`
    Half,

    /// `sqrt(2)/2`
    HalfSqrtTwo,

    /// `sqrt(3)/2`
    HalfSqrtThree,

    /// `1`
    One,
}

impl Exact {
    /// Builds the expression for this value.
    pub fn to_expr(self) -> SymExpr {
        let half_root = |n: i32| SymExpr::number((1, 2)) * SymExpr::number(n).sqrt();
        match self {
            Self::Zero => SymExpr::zero(),
            Self::Half => SymExpr::number((1, 2)),
            Self::HalfSqrtTwo => half_root(2),
            Self::HalfSqrtThree => half_root(3),
            Self::One => SymExpr::one(),
        }
    }
}

/// The output of the sine function for a certain angle, and whether to negate the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrigOut {
    /// The magnitude of the output.
    pub output: Exact,

    /// Whether to negate the output.
    pub neg: bool,
}

impl TrigOut {
    /// Builds the expression for this output.
    pub fn to_expr(self) -> SymExpr {
        if self.neg {
            -self.output.to_expr()
        } else {
            self.output.to_expr()
        }
    }
}

/// The sine of every multiple of `pi/6` and `pi/4`, keyed by the fraction of a full turn.
pub static SIN_TABLE: Lazy<HashMap<Rational, TrigOut>> = Lazy::new(|| {
    use Exact::*;

    [
        ((0, 1), Zero, false),
        ((1, 12), Half, false),
        ((1, 8), HalfSqrtTwo, false),
        ((1, 6), HalfSqrtThree, false),
        ((1, 4), One, false),
        ((1, 3), HalfSqrtThree, false),
        ((3, 8), HalfSqrtTwo, false),
        ((5, 12), Half, false),
        ((1, 2), Zero, false),
        ((7, 12), Half, true),
        ((5, 8), HalfSqrtTwo, true),
        ((2, 3), HalfSqrtThree, true),
        ((3, 4), One, true),
        ((5, 6), HalfSqrtThree, true),
        ((7, 8), HalfSqrtTwo, true),
        ((11, 12), Half, true),
    ]
        .into_iter()
        .map(|(turn, output, neg)| (Rational::from(turn), TrigOut { output, neg }))
        .collect()
});
