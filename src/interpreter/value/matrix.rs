use std::fmt;

use crate::{
    bigmath::{BigNumber, MathContext},
    interpreter::value::core::EvalValue,
};

/// A fixed `nrows` × `ncols` grid of values, stored row-major.
///
/// Cells are usually numbers but may be any [`EvalValue`]. Every operation
/// returns a new matrix.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{MathContext, RoundingMode},
///     interpreter::value::matrix::Matrix,
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// let m = Matrix::identity(2, &mc);
/// assert_eq!(m.to_string(), "matrix{{1}{0}}{{0}{1}}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    nrows: usize,
    ncols: usize,
    cells: Vec<EvalValue>,
}

impl Matrix {
    /// Builds a matrix cell by cell.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> EvalValue) -> Self {
        match Self::try_from_fn(nrows, ncols, |r, c| Ok::<_, ()>(f(r, c))) {
            Ok(m) => m,
            Err(()) => unreachable!(),
        }
    }

    /// Builds a matrix cell by cell, stopping at the first error.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn try_from_fn<E>(nrows: usize,
                          ncols: usize,
                          mut f: impl FnMut(usize, usize) -> Result<EvalValue, E>)
                          -> Result<Self, E> {
        assert!(nrows >= 1 && ncols >= 1, "Invalid matrix size {nrows}x{ncols}.");

        let mut cells = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                cells.push(f(r, c)?);
            }
        }
        Ok(Self { nrows,
                  ncols,
                  cells })
    }

    /// The `n` × `n` identity matrix.
    #[must_use]
    pub fn identity(n: usize, mc: &MathContext) -> Self {
        Self::from_fn(n, n, |r, c| {
            EvalValue::Number(if r == c { BigNumber::one(mc) } else { BigNumber::zero(false, mc) })
        })
    }

    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Tests whether the matrix is a single row or a single column.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        self.nrows == 1 || self.ncols == 1
    }

    /// # Panics
    /// Panics if the cell is out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &EvalValue {
        assert!(row < self.nrows && col < self.ncols,
                "Cell ({row}, {col}) outside {}x{} matrix.",
                self.nrows,
                self.ncols);
        &self.cells[row * self.ncols + col]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &EvalValue> {
        self.cells.iter()
    }

    /// Applies a fallible function to every cell.
    pub fn try_map<E>(&self, mut f: impl FnMut(&EvalValue) -> Result<EvalValue, E>) -> Result<Self, E> {
        Self::try_from_fn(self.nrows, self.ncols, |r, c| f(self.cell(r, c)))
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |r, c| self.cell(c, r).clone())
    }

    /// The minor matrix without `row` and `col`.
    ///
    /// # Panics
    /// Panics if the matrix has a single row or column.
    #[must_use]
    pub fn remove_row_and_column(&self, row: usize, col: usize) -> Self {
        assert!(self.nrows > 1 && self.ncols > 1, "Cannot shrink a single row or column.");

        Self::from_fn(self.nrows - 1, self.ncols - 1, |r, c| {
            self.cell(if r >= row { r + 1 } else { r }, if c >= col { c + 1 } else { c })
                .clone()
        })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("matrix")?;
        for row in self.cells.chunks(self.ncols) {
            f.write_str("{")?;
            for cell in row {
                write!(f, "{{{cell}}}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::RoundingMode;

    fn mc() -> MathContext {
        MathContext::decimal(10, RoundingMode::HalfUp)
    }

    fn numbered(nrows: usize, ncols: usize) -> Matrix {
        let mc = mc();
        Matrix::from_fn(nrows, ncols, |r, c| {
            let n = i64::try_from(r * ncols + c + 1).unwrap();
            EvalValue::Number(BigNumber::from_i64(n, &mc))
        })
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = numbered(2, 3).transpose();
        assert_eq!((m.nrows(), m.ncols()), (3, 2));
        assert_eq!(m.to_string(), "matrix{{1}{4}}{{2}{5}}{{3}{6}}");
    }

    #[test]
    fn minor_skips_row_and_column() {
        let m = numbered(3, 3).remove_row_and_column(1, 0);
        assert_eq!(m.to_string(), "matrix{{2}{3}}{{8}{9}}");
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let mut seen = 0;
        let result = numbered(2, 2).try_map(|_| {
                                        seen += 1;
                                        if seen == 2 { Err("stop") } else { Ok(EvalValue::SyntaxCheck) }
                                    });
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 2);
    }

    #[test]
    #[should_panic(expected = "Invalid matrix size")]
    fn empty_matrix_is_an_invariant_violation() {
        let _ = Matrix::from_fn(0, 1, |_, _| EvalValue::SyntaxCheck);
    }
}
