use crate::{
    error::{EvalFailure, EvalOutcome},
    interpreter::{
        evaluator::{
            binary::core::{add, div, mul, sub, sum_of_products},
            state::EvalState,
            unary::{negate, transpose},
        },
        value::{core::EvalValue, matrix::Matrix},
    },
};

/// Borrows the argument as a square matrix.
fn square_matrix<'a>(a: &'a EvalValue, state: &EvalState) -> EvalOutcome<&'a Matrix> {
    a.as_matrix()
     .filter(|m| m.is_square())
     .ok_or_else(|| state.math_error())
}

/// The matrix product `a ⨯ b`.
///
/// Requires `a.ncols == b.nrows`; the result is `a.nrows` × `b.ncols`.
///
/// # Errors
/// Math error unless both operands are conformant matrices.
pub fn cross_product(a: &EvalValue, b: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let (Some(a), Some(b)) = (a.as_matrix(), b.as_matrix()) else {
        return Err(state.math_error());
    };
    if a.ncols() != b.nrows() {
        return Err(state.math_error());
    }

    Matrix::try_from_fn(a.nrows(), b.ncols(), |r, c| {
        sum_of_products((0..a.ncols()).map(|i| (a.cell(r, i), b.cell(i, c))), state)
    }).map(EvalValue::from)
}

fn det(m: &Matrix, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_interrupt_requested() {
        return Err(EvalFailure::Interrupted);
    }

    match m.nrows() {
        1 => Ok(m.cell(0, 0).clone()),
        2 => {
            let ad = mul(m.cell(0, 0), m.cell(1, 1), state)?;
            let bc = mul(m.cell(0, 1), m.cell(1, 0), state)?;
            sub(&ad, &bc, state)
        },
        n => {
            let mut sum: Option<EvalValue> = None;
            for j in 0..n {
                let cell = m.cell(0, j);
                let factor = if j % 2 == 1 { negate(cell, state)? } else { cell.clone() };
                let minor = det(&m.remove_row_and_column(0, j), state)?;
                let term = mul(&factor, &minor, state)?;
                sum = Some(match sum {
                               Some(prev) => add(&prev, &term, state)?,
                               None => term,
                           });
            }
            sum.ok_or_else(|| state.math_error())
        },
    }
}

/// Determinant of a square matrix by cofactor expansion along the first
/// row.
///
/// The expansion checks for interrupt requests at every level, since its
/// cost grows factorially with the size.
///
/// # Errors
/// Math error unless the argument is a square matrix.
pub fn determinant(a: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    det(square_matrix(a, state)?, state)
}

/// Matrix of signed minors.
fn cofactor(m: &Matrix, state: &EvalState) -> EvalOutcome<Matrix> {
    if m.nrows() == 1 {
        return Ok(Matrix::identity(1, state.mc()));
    }
    Matrix::try_from_fn(m.nrows(), m.ncols(), |i, j| {
        let minor = det(&m.remove_row_and_column(i, j), state)?;
        if (i + j) % 2 == 1 { negate(&minor, state) } else { Ok(minor) }
    })
}

/// Transposed cofactor matrix.
///
/// # Errors
/// Math error unless the argument is a square matrix.
pub fn adjugate(a: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let cofactors = cofactor(square_matrix(a, state)?, state)?;
    transpose(&cofactors.into(), state)
}

/// Inverse of a square matrix: its adjugate divided by its determinant.
///
/// # Errors
/// Math error unless the argument is a square matrix with a nonzero numeric
/// determinant.
pub fn invert(a: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let det = determinant(a, state)?;
    match det.as_number() {
        Some(d) if !d.is_zero() => div(&adjugate(a, state)?, &det, state),
        _ => Err(state.math_error()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bigmath::{BigNumber, MathContext, RoundingMode};

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    fn matrix(state: &EvalState, rows: &[&[i64]]) -> EvalValue {
        Matrix::from_fn(rows.len(), rows[0].len(), |r, c| {
            BigNumber::from_i64(rows[r][c], state.mc()).into()
        }).into()
    }

    fn num(state: &EvalState, n: i64) -> EvalValue {
        BigNumber::from_i64(n, state.mc()).into()
    }

    /// Numeric cell comparison, so that signed zeros compare equal.
    pub(crate) fn same_matrix(a: &EvalValue, b: &EvalValue, state: &EvalState) -> bool {
        let (Some(a), Some(b)) = (a.as_matrix(), b.as_matrix()) else {
            return false;
        };
        a.nrows() == b.nrows()
        && a.ncols() == b.ncols()
        && a.cells().zip(b.cells()).all(|(x, y)| match (x.as_number(), y.as_number()) {
                                          (Some(x), Some(y)) => x.equals(y, state.mc()),
                                          _ => false,
                                      })
    }

    #[test]
    fn product_of_conformant_matrices() {
        let state = state();
        let a = matrix(&state, &[&[1, 2], &[3, 4]]);
        let b = matrix(&state, &[&[5], &[6]]);
        assert_eq!(cross_product(&a, &b, &state).unwrap(), matrix(&state, &[&[17], &[39]]));
        assert!(cross_product(&b, &a, &state).is_err());
    }

    #[test]
    fn determinants() {
        let state = state();
        assert_eq!(determinant(&matrix(&state, &[&[7]]), &state).unwrap(), num(&state, 7));
        assert_eq!(determinant(&matrix(&state, &[&[1, 2], &[3, 4]]), &state).unwrap(),
                   num(&state, -2));
        let m = matrix(&state, &[&[2, 0, 1], &[1, 3, 2], &[1, 1, 1]]);
        assert_eq!(determinant(&m, &state).unwrap(), num(&state, 1));
        assert!(determinant(&matrix(&state, &[&[1, 2]]), &state).is_err());
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let state = state();
        let m = matrix(&state, &[&[2, 0, 1], &[1, 3, 2], &[1, 1, 1]]);
        let inv = invert(&m, &state).unwrap();
        let id = cross_product(&m, &inv, &state).unwrap();
        assert!(same_matrix(&id, &Matrix::identity(3, state.mc()).into(), &state));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let state = state();
        assert!(invert(&matrix(&state, &[&[1, 2], &[2, 4]]), &state).is_err());
    }

    #[test]
    fn determinant_observes_interrupts() {
        let state = state();
        state.request_interrupt();
        let m = matrix(&state, &[&[1, 2], &[3, 4]]);
        assert_eq!(determinant(&m, &state), Err(EvalFailure::Interrupted));
    }
}
