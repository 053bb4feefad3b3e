use std::{fmt, rc::Rc};

use crate::{
    bigmath::{BigNumber, MathContext, Notation},
    interpreter::{evaluator::declaration::Declaration, value::matrix::Matrix},
};

/// The value of an evaluated expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    /// A number, including NaN and the infinities.
    Number(BigNumber),
    /// A matrix. Shared since values are copied into every scope that names
    /// them.
    Matrix(Rc<Matrix>),
    /// Placeholder produced while a function body is syntax checked. Every
    /// operation on it yields it again.
    SyntaxCheck,
}

impl From<BigNumber> for EvalValue {
    fn from(n: BigNumber) -> Self {
        Self::Number(n)
    }
}

impl From<Matrix> for EvalValue {
    fn from(m: Matrix) -> Self {
        Self::Matrix(Rc::new(m))
    }
}

impl EvalValue {
    #[must_use]
    pub const fn as_number(&self) -> Option<&BigNumber> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_syntax_check(&self) -> bool {
        matches!(self, Self::SyntaxCheck)
    }

    /// Tests whether the value is the NaN number.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// Formats the value for display.
    ///
    /// Numbers are converted to `mc` first; matrices format every cell the
    /// same way.
    ///
    /// # Example
    /// ```
    /// use bigcalc::{
    ///     bigmath::{BigNumber, MathContext, Notation, RoundingMode},
    ///     interpreter::value::core::EvalValue,
    /// };
    ///
    /// let eval_mc = MathContext::decimal(30, RoundingMode::HalfUp);
    /// let third = BigNumber::one(&eval_mc).div(&BigNumber::from_i64(3, &eval_mc), &eval_mc);
    ///
    /// let display_mc = MathContext::decimal(4, RoundingMode::HalfUp);
    /// assert_eq!(EvalValue::from(third).format(&display_mc, Notation::Plain), "0.3333");
    /// ```
    #[must_use]
    pub fn format(&self, mc: &MathContext, notation: Notation) -> String {
        match self {
            Self::Number(n) => n.convert(mc).format(notation, false),
            Self::Matrix(m) => {
                let mut out = String::from("matrix");
                for r in 0..m.nrows() {
                    out.push('{');
                    for c in 0..m.ncols() {
                        out.push('{');
                        out.push_str(&m.cell(r, c).format(mc, notation));
                        out.push('}');
                    }
                    out.push('}');
                }
                out
            },
            Self::SyntaxCheck => "?".to_string(),
        }
    }
}

impl fmt::Display for EvalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&n.format(Notation::UserFriendly, false)),
            Self::Matrix(m) => write!(f, "{m}"),
            Self::SyntaxCheck => f.write_str("?"),
        }
    }
}

/// One element of an evaluated comma separated list.
#[derive(Debug, Clone)]
pub enum EvalDeclValue {
    Value(EvalValue),
    Declaration(Declaration),
}

impl EvalDeclValue {
    #[must_use]
    pub const fn as_value(&self) -> Option<&EvalValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Declaration(_) => None,
        }
    }
}

impl From<EvalValue> for EvalDeclValue {
    fn from(v: EvalValue) -> Self {
        Self::Value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::RoundingMode;

    #[test]
    fn matrix_cells_use_the_display_context() {
        let mc = MathContext::decimal(30, RoundingMode::HalfUp);
        let two_thirds = BigNumber::from_i64(2, &mc).div(&BigNumber::from_i64(3, &mc), &mc);
        let m = Matrix::from_fn(1, 2, |_, c| {
            if c == 0 { two_thirds.clone().into() } else { BigNumber::one(&mc).into() }
        });

        let display = MathContext::decimal(3, RoundingMode::HalfUp);
        assert_eq!(EvalValue::from(m).format(&display, Notation::Plain), "matrix{{0.667}{1}}");
    }

    #[test]
    fn nan_detection() {
        let mc = MathContext::decimal(10, RoundingMode::HalfUp);
        assert!(EvalValue::from(BigNumber::nan(&mc)).is_nan());
        assert!(!EvalValue::SyntaxCheck.is_nan());
    }
}
