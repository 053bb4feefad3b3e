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

/// Clamps a number to an inclusive range.
///
/// `clamp(x, lo, hi)` returns `lo` if `x < lo`, `hi` if `x > hi`, and `x`
/// otherwise. Reversed bounds are swapped.
///
/// # Errors
/// Math error if any argument is not a number or is NaN.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::clamp::clamp, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let n = |v| EvalValue::from(BigNumber::from_i64(v, &mc));
///
/// assert_eq!(clamp(&[n(12), n(0), n(10)], &state).unwrap().to_string(), "10");
/// assert_eq!(clamp(&[n(5), n(10), n(0)], &state).unwrap().to_string(), "5");
/// ```
pub fn clamp(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let Some([x, lo, hi]) = all_numbers(args).and_then(|v| <[BigNumber; 3]>::try_from(v).ok()) else {
        return Err(state.math_error());
    };

    let mc = state.mc();
    let (lo, hi) = if lo.gt(&hi, mc) { (hi, lo) } else { (lo, hi) };
    let capped = BigNumber::min(&[x, hi], mc);
    validate_result(BigNumber::max(&[capped, lo], mc).into(), state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::{MathContext, RoundingMode};

    #[test]
    fn below_the_range() {
        let mc = MathContext::decimal(10, RoundingMode::HalfUp);
        let state = EvalState::new(None, None, mc);
        let n = |v| EvalValue::from(BigNumber::from_i64(v, &mc));
        assert_eq!(clamp(&[n(-3), n(0), n(10)], &state).unwrap(), n(0));
    }

    #[test]
    fn nan_is_rejected() {
        let mc = MathContext::decimal(10, RoundingMode::HalfUp);
        let state = EvalState::new(None, None, mc);
        let n = |v| EvalValue::from(BigNumber::from_i64(v, &mc));
        assert!(clamp(&[BigNumber::nan(&mc).into(), n(0), n(10)], &state).is_err());
    }
}
