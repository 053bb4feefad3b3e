use std::collections::HashMap;

use crate::{
    ast::{Series, SeriesKind},
    bigmath::BigNumber,
    error::{EvalOutcome, SyntaxErrorCode},
    interpreter::{
        evaluator::{
            binary::core::{add, mul},
            state::EvalState,
            task::run_steps,
        },
        parser::utils::is_variable,
        value::core::EvalValue,
    },
    util::num::{big_to_usize_checked, usize_to_big},
};

/// Evaluates `summation{var}{from}{to}{body}` or `product{...}`.
///
/// The bounds must be integers; reversed bounds are swapped. The body is
/// evaluated once per integer in the range with `var` bound to it, and the
/// terms are folded left to right with `+` or `*`. Every term is one task
/// step, so a long series can be interrupted.
///
/// While syntax checking, the body is evaluated once with `var` bound to the
/// placeholder.
///
/// # Errors
/// - `InvalidFunctionParameters` if `var` is not a name.
/// - Math error for non-integer bounds or a range too long to count.
/// - Any error of the bounds or the body.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{MathContext, RoundingMode},
///     interpreter::evaluator::state::EvalState,
///     parse_expression,
/// };
///
/// let mut state = EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp));
/// let expr = parse_expression("summation{n}{1}{10}{n^2}").unwrap();
/// assert_eq!(expr.evaluate(&mut state).unwrap().to_string(), "385");
/// ```
pub fn evaluate_series(series: &Series, state: &mut EvalState) -> EvalOutcome<EvalValue> {
    let var = series.var.to_string().trim().to_string();
    if !is_variable(&var) {
        return Err(state.syntax_error(SyntaxErrorCode::InvalidFunctionParameters, Some(var)));
    }

    let from = series.from.evaluate(state)?;
    let to = series.to.evaluate(state)?;

    if state.is_syntax_check() {
        let frame = HashMap::from([(var, EvalValue::SyntaxCheck)]);
        state.with_locals(frame, |s| series.body.evaluate(s))?;
        return Ok(EvalValue::SyntaxCheck);
    }

    let bounds = from.as_number().zip(to.as_number()).filter(|(a, b)| a.is_integer() && b.is_integer());
    let Some((from, to)) = bounds else {
        return Err(state.math_error());
    };
    let mc = *state.mc();
    let (from, to) = if from.gt(to, &mc) { (to.clone(), from.clone()) } else { (from.clone(), to.clone()) };
    let span = to.sub(&from, &mc).add(&BigNumber::one(&mc), &mc);
    let count = big_to_usize_checked(&span, state.math_error())?;

    log::info!("{} over {var} with {count} terms", series.kind.name());

    let fold = match series.kind {
        SeriesKind::Summation => add,
        SeriesKind::Product => mul,
    };
    let mut acc: Option<EvalValue> = None;

    run_steps(state, count, |s, i| {
        let k = from.add(&usize_to_big(i, &mc), &mc);
        let frame = HashMap::from([(var.clone(), EvalValue::from(k))]);
        let term = s.with_locals(frame, |s| series.body.evaluate(s))?;
        let next = match acc.take() {
            Some(prev) => fold(&prev, &term, s)?,
            None => term,
        };
        acc = Some(next.clone());
        Ok(next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{MathContext, RoundingMode},
        error::{EvalErrorKind, EvalFailure},
        interpreter::parser::core::parse_expression_text,
    };

    fn eval(input: &str) -> EvalOutcome<EvalValue> {
        let mut state = EvalState::new(None, None, MathContext::decimal(20, RoundingMode::HalfUp));
        parse_expression_text(input).unwrap().evaluate(&mut state)
    }

    #[test]
    fn sums_and_products() {
        assert_eq!(eval("summation{k}{1}{100}{k}").unwrap().to_string(), "5050");
        assert_eq!(eval("product{k}{1}{5}{k}").unwrap().to_string(), "120");
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(eval("summation{k}{4}{1}{k}").unwrap().to_string(), "10");
    }

    #[test]
    fn bounds_must_be_integers() {
        let Err(EvalFailure::Error(err)) = eval("summation{k}{1.5}{3}{k}") else {
            panic!("expected a math error")
        };
        assert_eq!(err.kind, EvalErrorKind::MathError(None));
    }

    #[test]
    fn variable_must_be_a_name() {
        let Err(EvalFailure::Error(err)) = eval("summation{2}{1}{3}{k}") else {
            panic!("expected a syntax error")
        };
        assert_eq!(err.kind,
                   EvalErrorKind::SyntaxError(SyntaxErrorCode::InvalidFunctionParameters,
                                              Some("2".to_string())));
    }

    #[test]
    fn loop_variable_is_local() {
        assert!(eval("summation{k}{1}{3}{k}+k").is_err());
    }
}
