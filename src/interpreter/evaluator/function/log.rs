use crate::{
    bigmath::BigNumber,
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            state::EvalState,
            utils::{number_fn1, number_fn2},
        },
        value::core::EvalValue,
    },
};

/// `log(x)` in base ten, or `log(base, x)`.
///
/// The `log_{base}(x)` notation evaluates through here as well.
///
/// # Errors
/// Math error for non-numbers or when the result is NaN, such as for a
/// negative `x`. `log(0)` is negative infinity.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::log::log, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
///
/// let r = log(&[BigNumber::from_i64(2, &mc).into(), BigNumber::from_i64(1, &mc).into()], &state);
/// assert_eq!(r.unwrap().to_string(), "0");
/// ```
pub fn log(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    let mc = state.mc();
    match args {
        [base, x] => number_fn2(base, x, state, |base, x| x.log(base, mc)),
        _ => number_fn1(&args[0], state, |x| x.log(&BigNumber::from_i64(10, mc), mc)),
    }
}
