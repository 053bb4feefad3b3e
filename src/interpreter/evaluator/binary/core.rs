use crate::{
    ast::{FactorOp, TermOp},
    bigmath::IntegerDivision,
    error::EvalOutcome,
    interpreter::{
        evaluator::{binary::matmul, state::EvalState},
        value::{core::EvalValue, matrix::Matrix},
    },
};

type BinaryFn = fn(&EvalValue, &EvalValue, &EvalState) -> EvalOutcome<EvalValue>;

/// Applies `op` to every pair of cells of two same-shaped matrices.
fn elementwise(a: &Matrix, b: &Matrix, state: &EvalState, op: BinaryFn) -> EvalOutcome<EvalValue> {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return Err(state.math_error());
    }
    Matrix::try_from_fn(a.nrows(), a.ncols(), |r, c| op(a.cell(r, c), b.cell(r, c), state)).map(EvalValue::from)
}

/// Sums the products of paired values.
///
/// # Errors
/// Math error for an empty sequence or unsupported operands.
pub fn sum_of_products<'a>(pairs: impl IntoIterator<Item = (&'a EvalValue, &'a EvalValue)>,
                           state: &EvalState)
                           -> EvalOutcome<EvalValue> {
    let mut sum: Option<EvalValue> = None;
    for (x, y) in pairs {
        let term = mul(x, y, state)?;
        sum = Some(match sum {
                       Some(prev) => add(&prev, &term, state)?,
                       None => term,
                   });
    }
    sum.ok_or_else(|| state.math_error())
}

/// `a + b` for numbers and same-shaped matrices.
///
/// # Errors
/// Math error for any other combination.
pub fn add(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a, b) {
        (EvalValue::Number(x), EvalValue::Number(y)) => Ok(x.add(y, state.mc()).into()),
        (EvalValue::Matrix(x), EvalValue::Matrix(y)) => elementwise(x, y, state, add),
        _ => Err(state.math_error()),
    }
}

/// `a - b` for numbers and same-shaped matrices.
///
/// # Errors
/// Math error for any other combination.
pub fn sub(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a, b) {
        (EvalValue::Number(x), EvalValue::Number(y)) => Ok(x.sub(y, state.mc()).into()),
        (EvalValue::Matrix(x), EvalValue::Matrix(y)) => elementwise(x, y, state, sub),
        _ => Err(state.math_error()),
    }
}

/// `a * b`.
///
/// - Two numbers multiply.
/// - A number and a matrix scale every cell.
/// - Two vectors (a single row or column each) of the same length give
///   their dot product.
///
/// # Errors
/// Math error for any other combination.
pub fn mul(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a, b) {
        (EvalValue::Number(x), EvalValue::Number(y)) => Ok(x.mul(y, state.mc()).into()),
        (EvalValue::Number(_), EvalValue::Matrix(m)) => {
            m.try_map(|cell| mul(a, cell, state)).map(EvalValue::from)
        },
        (EvalValue::Matrix(m), EvalValue::Number(_)) => {
            m.try_map(|cell| mul(b, cell, state)).map(EvalValue::from)
        },
        (EvalValue::Matrix(x), EvalValue::Matrix(y)) if x.is_vector() && y.is_vector() => {
            if x.cells().count() != y.cells().count() {
                return Err(state.math_error());
            }
            sum_of_products(x.cells().zip(y.cells()), state)
        },
        _ => Err(state.math_error()),
    }
}

/// `a / b` for two numbers, or a matrix divided cell by cell by a number.
///
/// # Errors
/// Math error for any other combination.
pub fn div(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a, b) {
        (EvalValue::Number(x), EvalValue::Number(y)) => Ok(x.div(y, state.mc()).into()),
        (EvalValue::Matrix(m), EvalValue::Number(_)) => {
            m.try_map(|cell| div(cell, b, state)).map(EvalValue::from)
        },
        _ => Err(state.math_error()),
    }
}

/// `a % b` with a floored quotient: the remainder takes the divisor's sign.
///
/// # Errors
/// Math error unless both operands are numbers.
pub fn modulo(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    match (a, b) {
        (EvalValue::Number(x), EvalValue::Number(y)) => {
            Ok(x.modulo(y, IntegerDivision::Floor, state.mc()).into())
        },
        _ => Err(state.math_error()),
    }
}

/// Applies a `+` or `-` operator.
///
/// # Errors
/// See [`add`] and [`sub`].
pub fn eval_term_op(op: TermOp,
                    a: &EvalValue,
                    b: &EvalValue,
                    state: &EvalState)
                    -> EvalOutcome<EvalValue> {
    match op {
        TermOp::Add => add(a, b, state),
        TermOp::Subtract => sub(a, b, state),
    }
}

/// Applies a factor operator.
///
/// # Errors
/// See the operator functions.
pub fn eval_factor_op(op: FactorOp,
                      a: &EvalValue,
                      b: &EvalValue,
                      state: &EvalState)
                      -> EvalOutcome<EvalValue> {
    match op {
        FactorOp::Multiply => mul(a, b, state),
        FactorOp::Divide => div(a, b, state),
        FactorOp::Modulo => modulo(a, b, state),
        FactorOp::CrossProduct => matmul::cross_product(a, b, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::{BigNumber, MathContext, RoundingMode};

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    fn num(state: &EvalState, n: i64) -> EvalValue {
        BigNumber::from_i64(n, state.mc()).into()
    }

    fn row(state: &EvalState, values: &[i64]) -> EvalValue {
        Matrix::from_fn(1, values.len(), |_, c| num(state, values[c])).into()
    }

    fn column(state: &EvalState, values: &[i64]) -> EvalValue {
        Matrix::from_fn(values.len(), 1, |r, _| num(state, values[r])).into()
    }

    #[test]
    fn division_by_zero_is_a_value() {
        let state = state();
        let inf = div(&num(&state, 1), &num(&state, 0), &state).unwrap();
        assert!(inf.as_number().unwrap().is_infinite());
        assert!(div(&num(&state, 0), &num(&state, 0), &state).unwrap().is_nan());
    }

    #[test]
    fn modulo_takes_the_divisor_sign() {
        let state = state();
        let r = modulo(&num(&state, -7), &num(&state, 3), &state).unwrap();
        assert_eq!(r, num(&state, 2));
    }

    #[test]
    fn dot_product_of_row_and_column() {
        let state = state();
        let r = mul(&row(&state, &[1, 2, 3]), &column(&state, &[4, 5, 6]), &state).unwrap();
        assert_eq!(r, num(&state, 32));
        assert!(mul(&row(&state, &[1, 2]), &row(&state, &[1, 2, 3]), &state).is_err());
    }

    #[test]
    fn scalar_scales_matrix_from_either_side() {
        let state = state();
        let left = mul(&num(&state, 2), &row(&state, &[1, 2]), &state).unwrap();
        let right = mul(&row(&state, &[1, 2]), &num(&state, 2), &state).unwrap();
        assert_eq!(left, row(&state, &[2, 4]));
        assert_eq!(left, right);
    }

    #[test]
    fn shapes_must_match_for_addition() {
        let state = state();
        assert!(add(&row(&state, &[1, 2]), &column(&state, &[1, 2]), &state).is_err());
        assert_eq!(sub(&row(&state, &[5, 5]), &row(&state, &[1, 2]), &state).unwrap(),
                   row(&state, &[4, 3]));
        assert!(add(&num(&state, 1), &row(&state, &[1]), &state).is_err());
    }
}
