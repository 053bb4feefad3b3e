use crate::{
    error::EvalOutcome,
    interpreter::{
        evaluator::{binary::matmul::determinant, state::EvalState, unary},
        value::core::EvalValue,
    },
};

/// `transpose(m)`, the function form of `mᵀ`.
///
/// # Errors
/// Math error unless the argument is a matrix.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{MathContext, RoundingMode},
///     interpreter::evaluator::{function::transpose::transpose, state::EvalState},
///     parse_expression,
/// };
///
/// let mut state = EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp));
/// let m = parse_expression("matrix{{1}{2}}{{3}{4}}").unwrap().evaluate(&mut state).unwrap();
///
/// let r = transpose(&[m], &state).unwrap();
/// assert_eq!(r.to_string(), "matrix{{1}{3}}{{2}{4}}");
/// ```
pub fn transpose(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    unary::transpose(&args[0], state)
}

/// `det(m)`, the determinant of a square matrix.
///
/// # Errors
/// Math error unless the argument is a square matrix.
pub fn det(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    determinant(&args[0], state)
}
