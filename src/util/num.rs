use crate::bigmath::{BigNumber, MathContext};

/// Converts an integral [`BigNumber`] to an `i64`.
///
/// # Errors
/// Returns `Err(error)` if the value is NaN, infinite, fractional or out of
/// the `i64` range.
///
/// # Parameters
/// - `value`: The number to convert.
/// - `error`: The error to return if the conversion is not exact.
///
/// # Returns
/// - `Ok(i64)`: The converted value.
/// - `Err(error)`: If the value has no exact `i64` form.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     util::num::big_to_i64_checked,
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// assert_eq!(big_to_i64_checked(&BigNumber::parse("-42", &mc), "bad"), Ok(-42));
/// assert_eq!(big_to_i64_checked(&BigNumber::parse("4.2", &mc), "bad"), Err("bad"));
/// ```
pub fn big_to_i64_checked<E>(value: &BigNumber, error: E) -> Result<i64, E> {
    if !value.is_integer() {
        return Err(error);
    }
    value.to_i64().ok_or(error)
}

/// Converts a non-negative integral [`BigNumber`] to a `usize`.
///
/// # Errors
/// Returns `Err(error)` if the value is negative or has no exact `i64` form.
///
/// # Example
/// ```
/// use bigcalc::{
///     bigmath::{BigNumber, MathContext, RoundingMode},
///     util::num::big_to_usize_checked,
/// };
///
/// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
/// assert_eq!(big_to_usize_checked(&BigNumber::from_i64(7, &mc), ()), Ok(7));
/// assert!(big_to_usize_checked(&BigNumber::from_i64(-7, &mc), ()).is_err());
/// ```
pub fn big_to_usize_checked<E>(value: &BigNumber, error: E) -> Result<usize, E> {
    match value.to_i64().filter(|_| value.is_integer()) {
        Some(n) => usize::try_from(n).map_err(|_| error),
        None => Err(error),
    }
}

/// Builds a [`BigNumber`] from a count or size.
///
/// Counts beyond `i64::MAX` cannot occur for in-memory collections, so the
/// conversion saturates.
#[must_use]
pub fn usize_to_big(value: usize, mc: &MathContext) -> BigNumber {
    BigNumber::from_i64(i64::try_from(value).unwrap_or(i64::MAX), mc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::RoundingMode;

    fn mc() -> MathContext {
        MathContext::decimal(30, RoundingMode::HalfUp)
    }

    #[test]
    fn rejects_special_values() {
        assert!(big_to_i64_checked(&BigNumber::nan(&mc()), ()).is_err());
        assert!(big_to_i64_checked(&BigNumber::infinity(false, &mc()), ()).is_err());
        assert!(big_to_i64_checked(&BigNumber::parse("1e+25", &mc()), ()).is_err());
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(big_to_usize_checked(&BigNumber::zero(true, &mc()), ()), Ok(0));
    }

    #[test]
    fn sizes_round_trip() {
        let big = usize_to_big(12345, &mc());
        assert_eq!(big_to_usize_checked(&big, ()), Ok(12345));
    }
}
