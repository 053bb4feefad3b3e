use crate::{
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            binary::core::div,
            state::EvalState,
            utils::{number_fn1, validate_result},
        },
        value::core::EvalValue,
    },
    util::num::big_to_usize_checked,
};

/// Applies a one-argument [`BigNumber`](crate::bigmath::BigNumber) method to
/// a numeric argument.
///
/// The generated functions return a math error for a non-number argument or
/// a NaN result, and the placeholder while syntax checking.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::builtin::abs, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let r = abs(&[BigNumber::from_i64(-3, &mc).into()], &state).unwrap();
///
/// assert_eq!(r.to_string(), "3");
/// ```
macro_rules! number_builtin {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            pub fn $fname(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
                number_fn1(&args[0], state, |x| x.$method(state.mc()))
            }
        )*
    };
}

number_builtin! {
    exp => exp,
    ln  => ln,
}

pub fn abs(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.abs())
}

/// Sign of a number: `-1`, `0` or `1`.
pub fn sgn(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.signum())
}

/// `frac(a, b)`: the quotient `a / b`, which fails on NaN unlike the `/`
/// operator.
///
/// # Errors
/// Math error for operands `/` rejects or a NaN quotient.
pub fn frac(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    validate_result(div(&args[0], &args[1], state)?, state)
}

/// `ans(n)`: the answer of line `n` of the current calculation.
///
/// # Errors
/// Math error unless `n` is a positive integer naming an earlier line that
/// produced a value.
pub fn ans(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let Some(line) = args[0].as_number().filter(|n| n.is_integer()) else {
        return Err(state.math_error());
    };
    let line = big_to_usize_checked(line, state.math_error())?;
    match state.query_line_ans(line) {
        Some(value) => validate_result(value, state),
        None => Err(state.math_error()),
    }
}
