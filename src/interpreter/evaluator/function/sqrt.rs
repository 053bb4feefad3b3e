use crate::{
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            state::EvalState,
            utils::{number_fn1, number_fn2},
        },
        value::core::EvalValue,
    },
};

/// Square root of a non-negative number.
///
/// Also evaluates the `√x` radical notation.
///
/// # Errors
/// Math error for a negative number or a non-number.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::sqrt::sqrt, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
///
/// let r = sqrt(&[BigNumber::from_i64(144, &mc).into()], &state).unwrap();
/// assert_eq!(r.to_string(), "12");
///
/// assert!(sqrt(&[BigNumber::from_i64(-1, &mc).into()], &state).is_err());
/// ```
pub fn sqrt(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn1(&args[0], state, |x| x.sqrt(state.mc()))
}

/// `nthroot(index, x)`: the `index`-th root of `x`.
///
/// Odd integer indices take roots of negative numbers, so `nthroot(3, -8)`
/// is `-2`. Also evaluates the `³√x` radical notation.
///
/// # Errors
/// Math error if either argument is not a number or there is no real root.
pub fn nthroot(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    number_fn2(&args[0], &args[1], state, |index, x| x.nthroot(index, state.mc()))
}
