use crate::{
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            state::EvalState,
            utils::{number_fn1, validate_result},
        },
        value::core::EvalValue,
    },
    util::num::big_to_usize_checked,
};

/// Truncates a number toward zero.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::trunc::trunc, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
///
/// let r = trunc(&[BigNumber::parse("-3.7", &mc).into()], &state).unwrap();
/// assert_eq!(r.to_string(), "-3");
/// ```
pub fn trunc(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.trunc())
}

/// Rounds toward negative infinity. Also evaluates `⌊x⌋`.
pub fn floor(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.floor())
}

/// Rounds toward positive infinity. Also evaluates `⌈x⌉`.
pub fn ceil(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.ceil())
}

/// `round(x)` to an integer, or `round(x, dp)` to `dp` decimal places,
/// rounding halves away from zero.
///
/// # Errors
/// Math error if `x` is not a number, or `dp` is not a non-negative
/// integer.
pub fn round(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let Some(x) = args[0].as_number() else {
        return Err(state.math_error());
    };

    let dp = match args.get(1) {
        None => 0,
        Some(dp) => match dp.as_number().filter(|dp| dp.is_integer()) {
            Some(dp) => big_to_usize_checked(dp, state.math_error())?,
            None => return Err(state.math_error()),
        },
    };
    validate_result(x.round(dp).into(), state)
}
