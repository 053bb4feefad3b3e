use crate::{
    bigmath::{BigNumber, MathContext},
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            state::EvalState,
            utils::{all_numbers, validate_result},
        },
        value::core::EvalValue,
    },
};

/// Folds the absolute values of integer arguments with `f`.
///
/// `accept` filters the arguments in addition to being integers.
fn fold_integers(args: &[EvalValue],
                 state: &EvalState,
                 accept: fn(&BigNumber) -> bool,
                 f: fn(&BigNumber, &BigNumber, &MathContext) -> BigNumber)
                 -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let values = all_numbers(args).filter(|v| v.iter().all(|n| n.is_integer() && accept(n)));
    let Some((first, rest)) = values.as_deref().and_then(<[BigNumber]>::split_first) else {
        return Err(state.math_error());
    };

    let mc = state.mc();
    let result = rest.iter().fold(first.abs(), |acc, n| f(&acc, &n.abs(), mc));
    validate_result(result.into(), state)
}

/// Greatest common divisor of two or more integers.
///
/// # Errors
/// Math error if any argument is not an integer.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     interpreter::{evaluator::{function::divisor::gcd, state::EvalState}, value::core::EvalValue},
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let state = EvalState::new(None, None, mc);
/// let args: Vec<EvalValue> = [-12, 18].iter().map(|&n| BigNumber::from_i64(n, &mc).into()).collect();
///
/// assert_eq!(gcd(&args, &state).unwrap().to_string(), "6");
/// ```
pub fn gcd(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    fold_integers(args, state, |_| true, BigNumber::gcd)
}

/// Least common multiple of two or more non-zero integers.
///
/// # Errors
/// Math error if any argument is zero or not an integer.
pub fn lcm(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    fold_integers(args, state, |n| !n.is_zero(), BigNumber::lcm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::RoundingMode;

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(20, RoundingMode::HalfUp))
    }

    fn nums(state: &EvalState, values: &[&str]) -> Vec<EvalValue> {
        values.iter().map(|v| BigNumber::parse(v, state.mc()).into()).collect()
    }

    #[test]
    fn least_common_multiple() {
        let state = state();
        assert_eq!(lcm(&nums(&state, &["4", "6", "10"]), &state).unwrap().to_string(), "60");
        assert!(lcm(&nums(&state, &["4", "0"]), &state).is_err());
    }

    #[test]
    fn gcd_with_zero() {
        let state = state();
        assert_eq!(gcd(&nums(&state, &["0", "9"]), &state).unwrap().to_string(), "9");
    }

    #[test]
    fn fractions_are_rejected() {
        let state = state();
        assert!(gcd(&nums(&state, &["4", "2.5"]), &state).is_err());
    }
}
