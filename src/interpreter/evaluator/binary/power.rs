use crate::{
    bigmath::{BigNumber, IntegerDivision},
    error::{EvalFailure, EvalOutcome},
    interpreter::{
        evaluator::{
            binary::matmul::{cross_product, invert},
            state::EvalState,
        },
        value::{core::EvalValue, matrix::Matrix},
    },
};

/// Evaluates `base ^ exponent`.
///
/// Two numbers use [`BigNumber::pow`]; the result is not checked for NaN,
/// like the other operators. A square matrix may be raised to an integer
/// power by repeated squaring. A negative power raises the inverse, and the
/// zeroth power is the identity.
///
/// # Errors
/// - Math error for a non-square matrix, a non-integer matrix exponent or
///   any other operand combination.
/// - Math error if a negative power is taken of a singular matrix.
/// - [`EvalFailure::Interrupted`] between squarings.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{binary::power::pow, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let two = EvalValue::from(BigNumber::from_i64(2, &mc));
/// let ten = EvalValue::from(BigNumber::from_i64(10, &mc));
/// assert_eq!(pow(&two, &ten, &state).unwrap().to_string(), "1024");
/// ```
pub fn pow(base: &EvalValue, exponent: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let mc = state.mc();

    match (base, exponent) {
        (EvalValue::Number(b), EvalValue::Number(e)) => Ok(b.pow(e, mc).into()),
        (EvalValue::Matrix(m), EvalValue::Number(e)) if m.is_square() && e.is_integer() => {
            if e.is_negative() {
                let inverse = invert(base, state)?;
                return pow(&inverse, &e.abs().into(), state);
            }

            let two = BigNumber::from_i64(2, mc);
            let mut result = EvalValue::from(Matrix::identity(m.nrows(), mc));
            let mut square = base.clone();
            let mut remaining = e.clone();
            while !remaining.is_zero() {
                if state.is_interrupt_requested() {
                    return Err(EvalFailure::Interrupted);
                }
                if remaining.is_odd() {
                    result = cross_product(&result, &square, state)?;
                }
                remaining = remaining.div_to_int(&two, IntegerDivision::Trunc, mc);
                if !remaining.is_zero() {
                    square = cross_product(&square, &square, state)?;
                }
            }
            Ok(result)
        },
        _ => Err(state.math_error()),
    }
}
