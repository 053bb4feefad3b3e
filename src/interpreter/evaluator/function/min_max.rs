use crate::{
    bigmath::BigNumber,
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            state::EvalState,
            utils::{all_numbers, validate_result},
        },
        value::core::EvalValue,
    },
};

/// Computes the minimum or maximum of one or more numbers.
///
/// The operation is selected by the `name` parameter, which must be `"min"`
/// or `"max"`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: The numbers to compare.
/// - `state`: Evaluation state.
///
/// # Errors
/// Math error if any argument is not a number or is NaN.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::min_max::min_max, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let args: Vec<EvalValue> = [3, 7, -2].iter().map(|&n| BigNumber::from_i64(n, &mc).into()).collect();
///
/// assert_eq!(min_max("min", &args, &state).unwrap().to_string(), "-2");
/// assert_eq!(min_max("max", &args, &state).unwrap().to_string(), "7");
/// ```
pub fn min_max(name: &str, args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let Some(values) = all_numbers(args) else {
        return Err(state.math_error());
    };

    let result = match name {
        "min" => BigNumber::min(&values, state.mc()),
        _ => BigNumber::max(&values, state.mc()),
    };
    validate_result(result.into(), state)
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
    fn single_argument() {
        let state = state();
        let five = EvalValue::from(BigNumber::from_i64(5, state.mc()));
        assert_eq!(min_max("max", &[five.clone()], &state).unwrap(), five);
    }

    #[test]
    fn nan_and_matrices_are_rejected() {
        let state = state();
        let one = EvalValue::from(BigNumber::one(state.mc()));
        let nan = EvalValue::from(BigNumber::nan(state.mc()));
        let m = EvalValue::from(Matrix::identity(2, state.mc()));
        assert!(min_max("min", &[one.clone(), nan], &state).is_err());
        assert!(min_max("min", &[one, m], &state).is_err());
    }
}
