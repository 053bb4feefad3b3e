use std::fmt;

/// Smallest supported number base.
pub const MIN_BASE: u32 = 2;
/// Largest supported number base; digits above 9 are written `A` to `Z`.
pub const MAX_BASE: u32 = 36;

/// Decides what happens to the digits that do not fit the requested precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round towards positive infinity.
    Ceil,
    /// Round towards zero.
    Down,
    /// Round towards negative infinity.
    Floor,
    /// Round to nearest, ties towards zero.
    HalfDown,
    /// Round to nearest, ties to the even neighbour.
    HalfEven,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Assert that no rounding is needed. Discarding a digit panics.
    Unnecessary,
    /// Round away from zero.
    Up,
}

impl RoundingMode {
    /// All rounding modes, in declaration order.
    pub const ALL: [Self; 8] = [Self::Ceil,
                                Self::Down,
                                Self::Floor,
                                Self::HalfDown,
                                Self::HalfEven,
                                Self::HalfUp,
                                Self::Unnecessary,
                                Self::Up];
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ceil => "Ceil",
            Self::Down => "Down",
            Self::Floor => "Floor",
            Self::HalfDown => "HalfDown",
            Self::HalfEven => "HalfEven",
            Self::HalfUp => "HalfUp",
            Self::Unnecessary => "Unnecessary",
            Self::Up => "Up",
        };
        write!(f, "{name}")
    }
}

/// Number of significant digits a [`MathContext`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Keep at most this many significant digits. Never zero.
    Digits(usize),
    /// Keep every digit. Division that never terminates panics.
    Unbounded,
}

impl Precision {
    /// Returns the digit count, or `None` when unbounded.
    #[must_use]
    pub const fn digits(self) -> Option<usize> {
        match self {
            Self::Digits(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Adds guard digits. Unbounded stays unbounded.
    #[must_use]
    pub const fn extended(self, extra: usize) -> Self {
        match self {
            Self::Digits(n) => Self::Digits(n + extra),
            Self::Unbounded => Self::Unbounded,
        }
    }

    /// Tests whether `count` digits still fit.
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        match self {
            Self::Digits(n) => count < n,
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digits(n) => write!(f, "{n}"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Immutable `(base, precision, rounding mode)` triple governing every
/// arithmetic operation's output.
///
/// Every [`BigNumber`](super::BigNumber) carries the context it was rounded
/// to, and every operation takes the context its result must be rounded to.
///
/// # Example
/// ```
/// use bigcalc::bigmath::{MathContext, Precision, RoundingMode};
///
/// let mc = MathContext::new(16, Precision::Digits(20), RoundingMode::HalfEven);
/// assert_eq!(mc.base(), 16);
/// assert_eq!(mc.base_name(false), "Hex");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    base:          u32,
    precision:     Precision,
    rounding_mode: RoundingMode,
}

impl MathContext {
    /// Scientific exponents above this turn a result into infinity.
    pub const MAX_EXPONENT: i64 = 999_999;
    /// Scientific exponents below this turn a result into zero.
    pub const MIN_EXPONENT: i64 = -999_999;

    /// Creates a context.
    ///
    /// # Panics
    /// Panics if `base` is outside `2..=36` or the precision is zero digits.
    #[must_use]
    pub fn new(base: u32, precision: Precision, rounding_mode: RoundingMode) -> Self {
        assert!((MIN_BASE..=MAX_BASE).contains(&base), "Invalid base {base}.");
        assert!(precision != Precision::Digits(0), "Invalid precision 0.");

        Self { base,
               precision,
               rounding_mode }
    }

    /// Base 10 with the given number of digits.
    #[must_use]
    pub fn decimal(digits: usize, rounding_mode: RoundingMode) -> Self {
        Self::new(10, Precision::Digits(digits), rounding_mode)
    }

    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Same base with another precision and rounding mode.
    #[must_use]
    pub fn with_precision(&self, precision: Precision, rounding_mode: RoundingMode) -> Self {
        Self::new(self.base, precision, rounding_mode)
    }

    /// Same context in another base.
    #[must_use]
    pub fn with_base(&self, base: u32) -> Self {
        Self::new(base, self.precision, self.rounding_mode)
    }

    /// Context used for intermediate results: `extra` guard digits and
    /// [`RoundingMode::HalfEven`].
    ///
    /// Returns `self` unchanged when it already rounds half-even and no guard
    /// digits are requested.
    #[must_use]
    pub fn half_even(&self, extra: usize) -> Self {
        if self.rounding_mode == RoundingMode::HalfEven && extra == 0 {
            return *self;
        }

        Self::new(self.base, self.precision.extended(extra), RoundingMode::HalfEven)
    }

    /// Human readable base name, e.g. `Hexadecimal` / `Hex` or `Base 7` /
    /// `B=7`.
    #[must_use]
    pub fn base_name(&self, long: bool) -> String {
        base_name(self.base, long)
    }

    /// Precision in `base` that resolves about as finely as `decimal_digits`
    /// decimal digits.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::MathContext;
    ///
    /// assert_eq!(MathContext::relative_precision(10, 30), 30);
    /// assert_eq!(MathContext::relative_precision(2, 3), 10);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn relative_precision(base: u32, decimal_digits: usize) -> usize {
        let digits = (decimal_digits as f64 / f64::from(base).log10()).ceil();
        (digits as usize).max(1)
    }
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}, {} digits, {}",
               self.base_name(true),
               self.precision,
               self.rounding_mode)
    }
}

/// Human readable name of a base.
#[must_use]
pub fn base_name(base: u32, long: bool) -> String {
    match (base, long) {
        (2, true) => "Binary".to_string(),
        (2, false) => "Bin".to_string(),
        (8, true) => "Octal".to_string(),
        (8, false) => "Oct".to_string(),
        (10, true) => "Decimal".to_string(),
        (10, false) => "Dec".to_string(),
        (16, true) => "Hexadecimal".to_string(),
        (16, false) => "Hex".to_string(),
        (_, true) => format!("Base {base}"),
        (_, false) => format!("B={base}"),
    }
}
