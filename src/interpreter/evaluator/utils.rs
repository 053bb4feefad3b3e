use crate::{
    bigmath::BigNumber,
    error::EvalOutcome,
    interpreter::{evaluator::state::EvalState, value::core::EvalValue},
};

/// Rejects NaN results of built-in functions with a math error.
///
/// Operators do not go through this check: `0/0` is a NaN value, while a
/// function producing NaN is an error.
///
/// # Errors
/// Math error if `value` is the NaN number.
pub fn validate_result(value: EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if value.is_nan() { Err(state.math_error()) } else { Ok(value) }
}

/// Applies a fallible numeric function to one argument.
///
/// In syntax check mode the argument is not looked at and the placeholder
/// is returned. `f` returning `None` is a math error.
///
/// # Errors
/// Math error for a non-number argument, a `None` result or a NaN result.
pub fn try_number_fn1(x: &EvalValue,
                      state: &EvalState,
                      f: impl FnOnce(&BigNumber) -> Option<BigNumber>)
                      -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match x.as_number().and_then(f) {
        Some(n) => validate_result(n.into(), state),
        None => Err(state.math_error()),
    }
}

/// [`try_number_fn1`] for functions that always produce a number.
///
/// # Errors
/// Math error for a non-number argument or a NaN result.
pub fn number_fn1(x: &EvalValue,
                  state: &EvalState,
                  f: impl FnOnce(&BigNumber) -> BigNumber)
                  -> EvalOutcome<EvalValue> {
    try_number_fn1(x, state, |n| Some(f(n)))
}

/// Applies a numeric function to two arguments.
///
/// # Errors
/// Math error if either argument is not a number or the result is NaN.
pub fn number_fn2(a: &EvalValue,
                  b: &EvalValue,
                  state: &EvalState,
                  f: impl FnOnce(&BigNumber, &BigNumber) -> BigNumber)
                  -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => validate_result(f(a, b).into(), state),
        _ => Err(state.math_error()),
    }
}

/// Collects the arguments as numbers, or `None` if any is not one.
#[must_use]
pub fn all_numbers(args: &[EvalValue]) -> Option<Vec<BigNumber>> {
    args.iter().map(|a| a.as_number().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{MathContext, RoundingMode},
        interpreter::value::matrix::Matrix,
    };

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    #[test]
    fn nan_results_are_rejected() {
        let state = state();
        let two = EvalValue::from(BigNumber::from_i64(2, state.mc()));
        assert!(number_fn1(&two, &state, |_| BigNumber::nan(state.mc())).is_err());
        assert!(number_fn1(&two, &state, BigNumber::abs).is_ok());
    }

    #[test]
    fn matrices_are_not_numbers() {
        let state = state();
        let m = EvalValue::from(Matrix::identity(2, state.mc()));
        assert!(number_fn1(&m, &state, BigNumber::abs).is_err());
        assert!(all_numbers(&[m]).is_none());
    }

    #[test]
    fn syntax_check_skips_the_function() {
        let mut state = state();
        let result = state.with_syntax_check(|s| {
                              number_fn1(&EvalValue::SyntaxCheck, s, |_| unreachable!())
                          });
        assert_eq!(result, Ok(EvalValue::SyntaxCheck));
    }
}
