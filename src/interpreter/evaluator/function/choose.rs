use crate::{
    error::EvalOutcome,
    interpreter::{
        evaluator::{state::EvalState, utils::number_fn2},
        value::core::EvalValue,
    },
};

/// Number of ordered selections of `r` items out of `n`: `n! / (n - r)!`.
///
/// # Errors
/// Math error unless both arguments are non-negative integers with
/// `r <= n`.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::choose::permutation, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let args = [BigNumber::from_i64(5, &mc).into(), BigNumber::from_i64(2, &mc).into()];
///
/// assert_eq!(permutation(&args, &state).unwrap().to_string(), "20");
/// ```
pub fn permutation(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    let mc = state.mc();
    number_fn2(&args[0], &args[1], state, |n, r| {
        n.factorial(mc).div(&n.sub(r, mc).factorial(mc), mc)
    })
}

/// Binomial coefficient `n! / ((n - r)! · r!)`.
///
/// # Errors
/// Math error unless both arguments are non-negative integers with
/// `r <= n`.
pub fn combination(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    let mc = state.mc();
    number_fn2(&args[0], &args[1], state, |n, r| {
        let denominator = n.sub(r, mc).factorial(mc).mul(&r.factorial(mc), mc);
        n.factorial(mc).div(&denominator, mc)
    })
}
