//! Tokenizer and parser for the expressions typed into the calculator.
//!
//! The grammar is that of ordinary calculator input: `+ - * / **`, parentheses, function calls,
//! and **implicit multiplication** (`2x`, `x(x + 1)`, `(x + 1)(x - 1)`). Function names may also
//! be applied without parentheses (`sin x`), and multi-letter names that are not known functions,
//! constants, or declared symbols are split into single-letter symbols (`xy` is `x*y`).
//!
//! ```
//! use calc_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("2x**2 + 3x");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.span(), 0..10);
//! ```

pub mod parser;
pub mod tokenizer;
