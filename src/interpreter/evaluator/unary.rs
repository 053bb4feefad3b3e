use crate::{
    bigmath::BigNumber,
    error::EvalOutcome,
    interpreter::{
        evaluator::{state::EvalState, utils::validate_result},
        value::core::EvalValue,
    },
};

/// Evaluates a unary minus.
///
/// Numbers are negated, matrices cell by cell. Like the binary operators,
/// the result is not checked for NaN.
///
/// # Errors
/// Math error if a matrix cell cannot be negated.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{state::EvalState, unary::negate}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let five = EvalValue::from(BigNumber::from_i64(5, &mc));
/// assert_eq!(negate(&five, &state).unwrap().to_string(), "-5");
/// ```
pub fn negate(value: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match value {
        EvalValue::Number(n) => Ok(n.negate().into()),
        EvalValue::Matrix(m) => m.try_map(|cell| negate(cell, state)).map(EvalValue::from),
        EvalValue::SyntaxCheck => Err(state.math_error()),
    }
}

/// Product `n·(n-step)·(n-2·step)···` down to 2, one multiplication per
/// step so that a large factorial can be interrupted.
///
/// Guard digits grow with the magnitude of `n` like in the number engine.
/// Arguments other than non-negative integers go to the engine, which
/// yields infinity for infinity and NaN otherwise.
fn stepped_factorial(value: &EvalValue, step: i64, state: &mut EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let Some(n) = value.as_number() else {
        return Err(state.math_error());
    };
    let mc = *state.mc();
    if !n.is_integer() || n.is_negative() {
        let result = if step == 1 { n.factorial(&mc) } else { n.double_factorial(&mc) };
        return validate_result(result.into(), state);
    }

    let work = mc.half_even(n.sci_exponent().map_or(0, |e| usize::try_from(e).unwrap_or(0)));
    let two = BigNumber::from_i64(2, &work);
    let decrement = BigNumber::from_i64(step, &work);
    let mut k = n.convert(&work);
    let mut product = BigNumber::one(&work);
    while k.gte(&two, &work) && !product.is_infinite() {
        product = product.mul(&k, &work);
        k = k.sub(&decrement, &work);
        state.checkpoint()?;
    }
    validate_result(product.convert(&mc).into(), state)
}

/// Evaluates `x!`.
///
/// # Errors
/// - Math error for a matrix or when the factorial is undefined (NaN).
/// - [`EvalFailure::Interrupted`](crate::error::EvalFailure::Interrupted)
///   between multiplications.
pub fn factorial(value: &EvalValue, state: &mut EvalState) -> EvalOutcome<EvalValue> {
    stepped_factorial(value, 1, state)
}

/// Evaluates `x!!`.
///
/// # Errors
/// Math error for a matrix or a negative or fractional argument.
pub fn double_factorial(value: &EvalValue, state: &mut EvalState) -> EvalOutcome<EvalValue> {
    stepped_factorial(value, 2, state)
}

/// Evaluates the postfix transpose `x^T`.
///
/// # Errors
/// Math error unless the value is a matrix.
pub fn transpose(value: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    value.as_matrix()
         .map(|m| EvalValue::from(m.transpose()))
         .ok_or_else(|| state.math_error())
}
