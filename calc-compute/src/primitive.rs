//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates an exact [`Rational`] from a decimal literal, such as `"12"`, `"0.5"`, `"2."`, or
/// `".25"`.
///
/// The tokenizer only produces digits and at most one `.`, so any other character is ignored.
pub fn rational_from_str(s: &str) -> Rational {
    let mut numer = int(0);
    let mut denom = int(1);
    let mut after_point = false;

    for c in s.chars() {
        if c == '.' {
            after_point = true;
        } else if let Some(digit) = c.to_digit(10) {
            numer = numer * 10 + digit;
            if after_point {
                denom *= 10;
            }
        }
    }

    Rational::from((numer, denom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(rational_from_str("12"), 12);
        assert_eq!(rational_from_str("0.5"), rational((1, 2)));
        assert_eq!(rational_from_str("2."), 2);
        assert_eq!(rational_from_str(".25"), rational((1, 4)));
        assert_eq!(rational_from_str("3.50"), rational((7, 2)));
    }
}
