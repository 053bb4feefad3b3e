/// Transcendental functions that are not angle related.
///
/// # Responsibilities
/// - `exp`, `pow`, `ln`, `log`, `sqrt`, `nthroot`.
/// - Factorial, double factorial and the greatest common divisor.
pub mod advanced;
/// Digit-level comparison, addition, multiplication and long division.
pub mod basic;
/// The arbitrary precision number type.
///
/// # Responsibilities
/// - Holds NaN, signed infinity and finite signed digit strings in any base.
/// - Rounds every constructed value to its context.
/// - Converts between bases and contexts.
/// - Exposes arithmetic, comparison and rounding helpers.
pub mod big_number;
/// High precision mathematical constants.
pub mod constants;
/// Text output in plain, scientific, engineering and user friendly notation.
pub mod format;
/// Base, precision and rounding mode governing every operation.
pub mod math_context;
/// Number literal parsing.
pub mod parse;
mod round;
/// Generic convergent power series summation.
pub(crate) mod series;
/// Trigonometric and hyperbolic functions and their inverses.
pub mod trigonometric;

pub use basic::IntegerDivision;
pub use big_number::BigNumber;
pub use format::Notation;
pub use math_context::{MAX_BASE, MIN_BASE, MathContext, Precision, RoundingMode, base_name};
pub use parse::ParsedNumber;

/// Lengths and counts in this module stay far below `i64::MAX`.
pub(crate) fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
