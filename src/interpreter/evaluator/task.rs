use crate::{error::EvalOutcome, interpreter::evaluator::state::EvalState};

/// Runs a multi-step evaluation with a checkpoint after every step.
///
/// `step` receives the zero based step index. The value of the last step is
/// the result; earlier values are only used through side effects of `step`.
///
/// # Errors
/// - Math error if `count` is zero.
/// - The first error a step returns.
/// - [`EvalFailure::Interrupted`](crate::error::EvalFailure::Interrupted) if
///   an interrupt is observed between steps.
pub fn run_steps<T>(state: &mut EvalState,
                    count: usize,
                    mut step: impl FnMut(&mut EvalState, usize) -> EvalOutcome<T>)
                    -> EvalOutcome<T> {
    if count == 0 {
        return Err(state.math_error());
    }

    let mut index = 0;
    loop {
        let value = step(state, index)?;
        state.checkpoint()?;
        index += 1;
        if index == count {
            log::trace!("task finished after {count} steps");
            return Ok(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{MathContext, RoundingMode},
        error::EvalFailure,
    };

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    #[test]
    fn returns_last_step_value() {
        let mut state = state();
        let mut seen = Vec::new();
        let result = run_steps(&mut state, 3, |_, i| {
                         seen.push(i);
                         Ok(i * 10)
                     });
        assert_eq!(result, Ok(20));
        assert_eq!(seen, [0, 1, 2]);
    }

    #[test]
    fn zero_steps_is_a_math_error() {
        let mut state = state();
        let result = run_steps(&mut state, 0, |_, _| Ok(()));
        assert!(matches!(result, Err(EvalFailure::Error(_))));
    }

    #[test]
    fn interrupt_stops_between_steps() {
        let mut state = state();
        let mut steps = 0;
        let result = run_steps(&mut state, 1_000_000, |s, _| {
                         steps += 1;
                         if steps == 5 {
                             s.request_interrupt();
                         }
                         Ok(())
                     });
        assert_eq!(result, Err(EvalFailure::Interrupted));
        assert_eq!(steps, 5);
    }
}
