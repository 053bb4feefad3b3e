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

/// Reads the `[min, max]` range of `rnd` and `rndint`.
///
/// One argument `a` is the range from zero to `a`. Reversed bounds are
/// swapped.
fn range(args: &[EvalValue],
         state: &EvalState,
         accept: fn(&BigNumber) -> bool)
         -> EvalOutcome<(BigNumber, BigNumber)> {
    let mc = state.mc();
    let values = all_numbers(args).filter(|v| v.iter().all(accept));
    let (a, b) = match values.as_deref() {
        Some([a]) => (BigNumber::zero(false, mc), a.clone()),
        Some([a, b]) => (a.clone(), b.clone()),
        _ => return Err(state.math_error()),
    };
    Ok(if a.gt(&b, mc) { (b, a) } else { (a, b) })
}

/// `rnd(a)` is uniform in `[0, a)`, `rnd(a, b)` uniform in `[a, b)`.
///
/// # Errors
/// Math error unless the bounds are finite numbers.
pub fn rnd(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let mc = state.mc();
    let (min, max) = range(args, state, BigNumber::is_finite)?;

    let span = max.sub(&min, mc);
    validate_result(BigNumber::random(mc).mul(&span, mc).add(&min, mc).into(), state)
}

/// `rndint(a)` is a uniform integer in `[0, a]`, `rndint(a, b)` one in
/// `[a, b]`.
///
/// # Errors
/// Math error unless the bounds are integers.
pub fn rndint(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let mc = state.mc();
    let (min, max) = range(args, state, BigNumber::is_integer)?;

    let span = max.sub(&min, mc).add(&BigNumber::one(mc), mc);
    let value = BigNumber::random(mc).mul(&span, mc).floor().add(&min, mc);
    validate_result(value.into(), state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::{MathContext, RoundingMode};

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(20, RoundingMode::HalfUp))
    }

    fn num(state: &EvalState, n: i64) -> EvalValue {
        BigNumber::from_i64(n, state.mc()).into()
    }

    #[test]
    fn random_numbers_stay_in_range() {
        let state = state();
        let mc = state.mc();
        for _ in 0..50 {
            let r = rnd(&[num(&state, 5), num(&state, 2)], &state).unwrap();
            let r = r.as_number().unwrap();
            assert!(r.gte(&BigNumber::from_i64(2, mc), mc));
            assert!(r.lt(&BigNumber::from_i64(5, mc), mc));
        }
    }

    #[test]
    fn random_integers_cover_both_ends() {
        let state = state();
        let mut seen = [false; 3];
        for _ in 0..200 {
            let r = rndint(&[num(&state, 2)], &state).unwrap();
            let i = r.as_number().and_then(BigNumber::to_i64).unwrap();
            seen[usize::try_from(i).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn bounds_are_checked() {
        let state = state();
        let half = EvalValue::from(BigNumber::parse("0.5", state.mc()));
        assert!(rndint(&[half.clone()], &state).is_err());
        assert!(rnd(&[half], &state).is_ok());
        assert!(rnd(&[BigNumber::infinity(false, state.mc()).into()], &state).is_err());
    }
}
