use super::{Primary, SymExpr};
use std::f64::consts::{E, PI};

impl SymExpr {
    /// Evaluates the expression as an [`f64`], looking up symbols other than `pi` and `E` with
    /// `vars`.
    ///
    /// Returns [`None`] if a symbol is unknown, a function is not supported, or the result is not
    /// finite.
    pub fn eval_f64(&self, vars: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
        let value = match self {
            Self::Primary(Primary::Number(n)) => n.to_f64(),
            Self::Primary(Primary::Symbol(sym)) => match sym.as_str() {
                "pi" => PI,
                "E" => E,
                _ => vars(sym)?,
            },
            Self::Primary(Primary::Call(name, args)) => {
                let x = args.first()?.eval_f64(vars)?;
                match name.as_str() {
                    "sin" => x.sin(),
                    "cos" => x.cos(),
                    "tan" => x.tan(),
                    "sec" => x.cos().recip(),
                    "csc" => x.sin().recip(),
                    "cot" => x.tan().recip(),
                    "asin" => x.asin(),
                    "acos" => x.acos(),
                    "atan" => x.atan(),
                    "sinh" => x.sinh(),
                    "cosh" => x.cosh(),
                    "tanh" => x.tanh(),
                    "exp" => x.exp(),
                    "log" => x.ln(),
                    "abs" => x.abs(),
                    _ => return None,
                }
            },
            Self::Add(terms) => terms.iter()
                .map(|term| term.eval_f64(vars))
                .sum::<Option<f64>>()?,
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.eval_f64(vars))
                .product::<Option<f64>>()?,
            Self::Exp(base, exp) => base.eval_f64(vars)?.powf(exp.eval_f64(vars)?),
        };

        value.is_finite().then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn eval_with_constants() {
        // 2*sin(pi/6) + x^2
        let expr = SymExpr::number(2)
            * SymExpr::call("sin", vec![SymExpr::symbol("pi") * SymExpr::number((1, 6))])
            + SymExpr::symbol("x").pow(SymExpr::number(2));
        let value = expr.eval_f64(&|name| (name == "x").then_some(3.0)).unwrap();
        assert_float_relative_eq!(value, 10.0);
    }

    #[test]
    fn eval_unknown_symbol() {
        assert_eq!(SymExpr::symbol("y").eval_f64(&|_| None), None);
    }
}
