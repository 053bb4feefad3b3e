use std::{borrow::Cow, cmp::Ordering, ops::Neg};

use rand::Rng;

use crate::bigmath::{
    MathContext, RoundingMode,
    basic::{self, IntegerDivision},
    round::{RoundTarget, round_digits, trim_digits},
};

/// Glyph of an infinite value.
pub const INFINITY_SYMBOL: &str = "∞";
/// Digit glyphs, indexed by digit value.
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digit count used by [`BigNumber::random`] when the context is unbounded.
const UNBOUNDED_RANDOM_DIGITS: usize = 100;

/// Magnitude part of a [`BigNumber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Repr {
    /// Not a number. Carries no sign.
    NaN,
    /// Positive or negative infinity.
    Infinity,
    /// The integer `digits` (most significant first) shifted by `exponent`
    /// places. Zero is `[0]` with exponent `0`.
    Finite {
        digits:   Vec<u8>,
        exponent: i64,
    },
}

/// Arbitrary precision signed number in any base from 2 to 36.
///
/// A finite value is `±d1d2...dn × base^exponent`. Infinity and NaN are
/// ordinary values: arithmetic on them follows IEEE-like rules instead of
/// failing. Every value is rounded to the [`MathContext`] it carries, and
/// every operation takes the context its result is rounded to. Operands in a
/// different context are converted first.
///
/// # Example
/// ```
/// use bigcalc::bigmath::{BigNumber, MathContext, RoundingMode};
///
/// let mc = MathContext::decimal(20, RoundingMode::HalfUp);
/// let third = BigNumber::from_i64(1, &mc).div(&BigNumber::from_i64(3, &mc), &mc);
/// assert_eq!(third.to_string(), "3.3333333333333333333e-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigNumber {
    pub(crate) negative: bool,
    pub(crate) repr:     Repr,
    pub(crate) mc:       MathContext,
}

impl BigNumber {
    /// Not a number.
    #[must_use]
    pub const fn nan(mc: &MathContext) -> Self {
        Self { negative: false,
               repr:     Repr::NaN,
               mc:       *mc, }
    }

    /// Signed infinity.
    #[must_use]
    pub const fn infinity(negative: bool, mc: &MathContext) -> Self {
        Self { negative,
               repr: Repr::Infinity,
               mc: *mc }
    }

    /// Signed zero.
    #[must_use]
    pub fn zero(negative: bool, mc: &MathContext) -> Self {
        Self { negative,
               repr: Repr::Finite { digits:   vec![0],
                                    exponent: 0, },
               mc: *mc }
    }

    #[must_use]
    pub fn one(mc: &MathContext) -> Self {
        Self::from_i64(1, mc)
    }

    /// Builds `±digits × base^exponent` and rounds it to `mc`.
    ///
    /// Results whose scientific exponent leaves
    /// [`MathContext::MIN_EXPONENT`]..=[`MathContext::MAX_EXPONENT`] become
    /// signed zero or signed infinity.
    ///
    /// # Panics
    /// Panics if a digit is not below the base of `mc`.
    #[must_use]
    pub fn from_digits(negative: bool, digits: Vec<u8>, exponent: i64, mc: &MathContext) -> Self {
        assert!(digits.iter().all(|&d| u32::from(d) < mc.base()),
                "Digit out of range for base {}.",
                mc.base());

        let mut digits = digits;
        let mut exponent = exponent;

        match mc.precision().digits() {
            Some(sd) => round_digits(negative,
                                     &mut digits,
                                     &mut exponent,
                                     mc.base(),
                                     RoundTarget::SignificantDigits(sd),
                                     mc.rounding_mode()),
            None => trim_digits(&mut digits, &mut exponent),
        }

        Self::clamped(negative, digits, exponent, mc)
    }

    /// Wraps canonical digits without rounding, applying the exponent clamp.
    pub(crate) fn clamped(negative: bool, digits: Vec<u8>, exponent: i64, mc: &MathContext) -> Self {
        let sci_exponent = exponent.saturating_add(super::to_i64(digits.len()) - 1);

        if digits != [0] && sci_exponent > MathContext::MAX_EXPONENT {
            Self::infinity(negative, mc)
        } else if digits != [0] && sci_exponent < MathContext::MIN_EXPONENT {
            Self::zero(negative, mc)
        } else {
            Self { negative,
                   repr: Repr::Finite { digits, exponent },
                   mc: *mc }
        }
    }

    /// Exact integer value rounded to `mc`.
    #[must_use]
    pub fn from_i64(value: i64, mc: &MathContext) -> Self {
        let base = u64::from(mc.base());
        let mut magnitude = value.unsigned_abs();
        let mut digits = Vec::new();

        while magnitude > 0 {
            digits.push(u8::try_from(magnitude % base).unwrap_or_default());
            magnitude /= base;
        }
        digits.reverse();

        Self::from_digits(value < 0, digits, 0, mc)
    }

    /// Converts a machine float through its shortest decimal representation.
    #[must_use]
    pub fn from_f64(value: f64, mc: &MathContext) -> Self {
        if value.is_nan() {
            return Self::nan(mc);
        }
        if value.is_infinite() {
            return Self::infinity(value < 0.0, mc);
        }
        if value == 0.0 {
            return Self::zero(value.is_sign_negative(), mc);
        }

        Self::parse_with(&format!("{value}"), mc, true)
    }

    /// Uniformly random value in `[0, 1)` with as many digits as `mc` keeps.
    #[must_use]
    pub fn random(mc: &MathContext) -> Self {
        let count = mc.precision().digits().unwrap_or(UNBOUNDED_RANDOM_DIGITS);
        let mut rng = rand::thread_rng();
        let digits = (0..count).map(|_| rng.gen_range(0..mc.base()))
                               .map(|d| u8::try_from(d).unwrap_or_default())
                               .collect();

        Self::from_digits(false, digits, -super::to_i64(count), mc)
    }

    /// Context this value is rounded to.
    #[must_use]
    pub const fn mc(&self) -> &MathContext {
        &self.mc
    }

    /// `Some(1)` or `Some(-1)`, `None` for NaN.
    #[must_use]
    pub const fn sign(&self) -> Option<i8> {
        match self.repr {
            Repr::NaN => None,
            _ if self.negative => Some(-1),
            _ => Some(1),
        }
    }

    /// Digits, most significant first. `None` for NaN and infinity.
    #[must_use]
    pub fn digits(&self) -> Option<&[u8]> {
        match &self.repr {
            Repr::Finite { digits, .. } => Some(digits),
            _ => None,
        }
    }

    /// Exponent of the last digit. `None` for NaN and infinity.
    #[must_use]
    pub const fn exponent(&self) -> Option<i64> {
        match self.repr {
            Repr::Finite { exponent, .. } => Some(exponent),
            _ => None,
        }
    }

    /// Exponent after normalising to a single leading digit.
    #[must_use]
    pub fn sci_exponent(&self) -> Option<i64> {
        match &self.repr {
            Repr::Finite { digits, exponent } => Some(exponent + super::to_i64(digits.len()) - 1),
            _ => None,
        }
    }

    #[must_use]
    pub fn digit_count(&self) -> Option<usize> {
        self.digits().map(<[u8]>::len)
    }

    /// Digits after the radix point.
    #[must_use]
    pub fn decimal_places(&self) -> Option<u64> {
        self.exponent().map(|e| (-e).max(0).unsigned_abs())
    }

    /// Zeros folded into the exponent of an integer.
    #[must_use]
    pub fn trailing_zero_count(&self) -> Option<u64> {
        self.exponent().map(|e| e.max(0).unsigned_abs())
    }

    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::NaN)
    }

    /// Positive or negative infinity.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.repr, Repr::Infinity)
    }

    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite { .. })
    }

    /// Zero of either sign.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits() == Some(&[0][..])
    }

    /// `1` or `-1`.
    #[must_use]
    pub fn is_abs_one(&self) -> bool {
        self.digits() == Some(&[1][..]) && self.exponent() == Some(0)
    }

    /// Includes negative zero and negative infinity.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative && !self.is_nan()
    }

    /// Includes positive zero and positive infinity.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        !self.negative && !self.is_nan()
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.exponent().is_some_and(|e| e >= 0)
    }

    #[must_use]
    pub fn is_odd(&self) -> bool {
        self.integer_parity() == Some(1)
    }

    #[must_use]
    pub fn is_even(&self) -> bool {
        self.integer_parity() == Some(0)
    }

    fn integer_parity(&self) -> Option<u32> {
        if !self.is_integer() {
            return None;
        }
        let digits = self.digits()?;

        if self.mc.base() % 2 == 0 {
            let last = if self.exponent() == Some(0) {
                digits.last().copied().unwrap_or_default()
            } else {
                0
            };
            Some(u32::from(last) % 2)
        } else {
            Some(digits.iter().map(|&d| u32::from(d)).sum::<u32>() % 2)
        }
    }

    /// Nearest machine float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            Repr::NaN => f64::NAN,
            Repr::Infinity if self.negative => f64::NEG_INFINITY,
            Repr::Infinity => f64::INFINITY,
            Repr::Finite { .. } if self.mc.base() == 10 => {
                self.to_scientific_string().parse().unwrap_or(f64::NAN)
            },
            Repr::Finite { digits, exponent } => {
                let base = f64::from(self.mc.base());
                let mut value = 0.0;
                let mut exp = *exponent;
                for &d in digits.iter().rev() {
                    let power = i32::try_from(exp).map_or(f64::INFINITY, |e| base.powi(e));
                    value += f64::from(d) * power;
                    exp += 1;
                }
                if self.negative { -value } else { value }
            },
        }
    }

    /// Exact integer value, if this is an integer that fits an `i64`.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        let Repr::Finite { digits, exponent } = &self.repr else {
            return None;
        };
        if *exponent < 0 {
            return None;
        }

        let base = i64::from(self.mc.base());
        let mut value: i64 = 0;
        for &d in digits {
            value = value.checked_mul(base)?.checked_add(i64::from(d))?;
        }
        for _ in 0..*exponent {
            value = value.checked_mul(base)?;
        }

        Some(if self.negative { -value } else { value })
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        self.mul_sign(self.negative)
    }

    /// Flips the sign. NaN stays NaN.
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut res = self.clone();
        if !res.is_nan() {
            res.negative = !res.negative;
        }
        res
    }

    /// Negates when `negative` is set.
    #[must_use]
    pub fn mul_sign(&self, negative: bool) -> Self {
        if negative { self.negate() } else { self.clone() }
    }

    /// `-1`, `0` or `1` as a number, NaN for NaN.
    #[must_use]
    pub fn signum(&self) -> Self {
        match self.sign() {
            None => Self::nan(&self.mc),
            Some(_) if self.is_zero() => Self::zero(false, &self.mc),
            Some(s) => Self::from_i64(i64::from(s), &self.mc),
        }
    }

    /// Multiplies by `base^n` without rounding. NaN, infinity and zero are
    /// returned unchanged.
    #[must_use]
    pub fn shift_exponent(&self, n: i64) -> Self {
        match &self.repr {
            Repr::Finite { digits, exponent } if !self.is_zero() => {
                Self::clamped(self.negative, digits.clone(), exponent + n, &self.mc)
            },
            _ => self.clone(),
        }
    }

    /// Drops the fractional digits.
    #[must_use]
    pub fn trunc(&self) -> Self {
        match &self.repr {
            Repr::Finite { digits, exponent } if *exponent < 0 => {
                let frac = usize::try_from(-exponent).unwrap_or(usize::MAX);
                let kept = digits[..digits.len().saturating_sub(frac)].to_vec();
                Self::from_digits(self.negative, kept, 0, &self.mc)
            },
            _ => self.clone(),
        }
    }

    #[must_use]
    pub fn floor(&self) -> Self {
        if self.is_integer() || !self.is_finite() {
            return self.clone();
        }
        self.to_decimal_places(0, RoundingMode::Floor)
    }

    #[must_use]
    pub fn ceil(&self) -> Self {
        if self.is_integer() || !self.is_finite() {
            return self.clone();
        }
        self.to_decimal_places(0, RoundingMode::Ceil)
    }

    /// Rounds half up to `dp` decimal places.
    #[must_use]
    pub fn round(&self, dp: usize) -> Self {
        self.to_decimal_places(dp, RoundingMode::HalfUp)
    }

    /// Rounds to at most `sd` significant digits.
    #[must_use]
    pub fn to_significant_digits(&self, sd: usize, rounding_mode: RoundingMode) -> Self {
        self.rounded(RoundTarget::SignificantDigits(sd), rounding_mode)
    }

    /// Rounds to at most `dp` digits after the radix point.
    #[must_use]
    pub fn to_decimal_places(&self, dp: usize, rounding_mode: RoundingMode) -> Self {
        self.rounded(RoundTarget::DecimalPlaces(dp), rounding_mode)
    }

    fn rounded(&self, target: RoundTarget, rounding_mode: RoundingMode) -> Self {
        match &self.repr {
            Repr::Finite { digits, exponent } => {
                let mut digits = digits.clone();
                let mut exponent = *exponent;
                round_digits(self.negative,
                             &mut digits,
                             &mut exponent,
                             self.mc.base(),
                             target,
                             rounding_mode);
                Self::clamped(self.negative, digits, exponent, &self.mc)
            },
            _ => self.clone(),
        }
    }

    /// Borrows `self` when it already lives in `mc`, converts otherwise.
    pub(crate) fn in_context(&self, mc: &MathContext) -> Cow<'_, Self> {
        if self.mc == *mc {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.convert(mc))
        }
    }

    /// Re-expresses this value in another context.
    ///
    /// Within one base only the rounding changes. Across bases the digit
    /// polynomial `Σ digit·base^position` is evaluated in the target base.
    #[must_use]
    pub fn convert(&self, to: &MathContext) -> Self {
        if self.mc == *to {
            return self.clone();
        }

        match &self.repr {
            Repr::NaN => Self::nan(to),
            Repr::Infinity => Self::infinity(self.negative, to),
            Repr::Finite { digits, exponent } if self.mc.base() == to.base() => {
                Self::from_digits(self.negative, digits.clone(), *exponent, to)
            },
            Repr::Finite { digits, exponent }
                if digits.len() == 1 && *exponent == 0 && u32::from(digits[0]) < to.base() =>
            {
                Self::from_digits(self.negative, digits.clone(), 0, to)
            },
            Repr::Finite { digits, exponent } => {
                let from_base = Self::from_i64(i64::from(self.mc.base()), to);
                let mut res = Self::zero(false, to);
                let mut exp = *exponent;
                for &d in digits.iter().rev() {
                    let power = from_base.pow(&Self::from_i64(exp, to), to);
                    let term = power.mul(&Self::from_i64(i64::from(d), to), to);
                    res = res.add(&term, to);
                    exp += 1;
                }
                res.mul_sign(self.negative)
            },
        }
    }

    /// Three-way comparison in `mc`. `None` when either side is NaN.
    ///
    /// Zeros of either sign compare equal.
    #[must_use]
    pub fn cmp(&self, other: &Self, mc: &MathContext) -> Option<Ordering> {
        basic::cmp(&self.in_context(mc), &other.in_context(mc))
    }

    /// Numeric equality in `mc`. NaN equals nothing.
    #[must_use]
    pub fn equals(&self, other: &Self, mc: &MathContext) -> bool {
        self.cmp(other, mc) == Some(Ordering::Equal)
    }

    #[must_use]
    pub fn lt(&self, other: &Self, mc: &MathContext) -> bool {
        self.cmp(other, mc) == Some(Ordering::Less)
    }

    #[must_use]
    pub fn lte(&self, other: &Self, mc: &MathContext) -> bool {
        matches!(self.cmp(other, mc), Some(Ordering::Less | Ordering::Equal))
    }

    #[must_use]
    pub fn gt(&self, other: &Self, mc: &MathContext) -> bool {
        self.cmp(other, mc) == Some(Ordering::Greater)
    }

    #[must_use]
    pub fn gte(&self, other: &Self, mc: &MathContext) -> bool {
        matches!(self.cmp(other, mc), Some(Ordering::Greater | Ordering::Equal))
    }

    #[must_use]
    pub fn add(&self, other: &Self, mc: &MathContext) -> Self {
        basic::add(&self.in_context(mc), &other.in_context(mc), mc)
    }

    #[must_use]
    pub fn sub(&self, other: &Self, mc: &MathContext) -> Self {
        basic::add(&self.in_context(mc), &other.in_context(mc).negate(), mc)
    }

    #[must_use]
    pub fn mul(&self, other: &Self, mc: &MathContext) -> Self {
        basic::mul(&self.in_context(mc), &other.in_context(mc), mc)
    }

    #[must_use]
    pub fn div(&self, other: &Self, mc: &MathContext) -> Self {
        basic::div(&self.in_context(mc), &other.in_context(mc), None, mc).0
    }

    /// `1 / self`.
    #[must_use]
    pub fn reciprocal(&self, mc: &MathContext) -> Self {
        Self::one(mc).div(self, mc)
    }

    /// Integer quotient under the given division policy.
    #[must_use]
    pub fn div_to_int(&self, other: &Self, mode: IntegerDivision, mc: &MathContext) -> Self {
        self.div_and_remainder(other, mode, mc).0
    }

    /// Remainder under the given division policy.
    #[must_use]
    pub fn modulo(&self, other: &Self, mode: IntegerDivision, mc: &MathContext) -> Self {
        self.div_and_remainder(other, mode, mc).1
    }

    /// Integer quotient and remainder `self - other·quotient`.
    #[must_use]
    pub fn div_and_remainder(&self,
                             other: &Self,
                             mode: IntegerDivision,
                             mc: &MathContext)
                             -> (Self, Self) {
        let a = self.in_context(mc);
        let b = other.in_context(mc);
        let (q, r) = basic::div(&a, &b, Some(mode), mc);
        (q, r.unwrap_or_else(|| Self::nan(mc)))
    }

    /// Smallest value of the list. NaN if the list is empty or holds NaN.
    #[must_use]
    pub fn min(values: &[Self], mc: &MathContext) -> Self {
        Self::extreme(values, mc, Ordering::Less)
    }

    /// Largest value of the list. NaN if the list is empty or holds NaN.
    #[must_use]
    pub fn max(values: &[Self], mc: &MathContext) -> Self {
        Self::extreme(values, mc, Ordering::Greater)
    }

    fn extreme(values: &[Self], mc: &MathContext, wanted: Ordering) -> Self {
        let Some((first, rest)) = values.split_first() else {
            return Self::nan(mc);
        };

        let mut best = first.convert(mc);
        for value in rest {
            match value.cmp(&best, mc) {
                None => return Self::nan(mc),
                Some(ord) if ord == wanted => best = value.convert(mc),
                Some(_) => {},
            }
        }
        if best.is_nan() { Self::nan(mc) } else { best }
    }

    /// Greatest common divisor of two integers. NaN for non-integers.
    #[must_use]
    pub fn gcd(a: &Self, b: &Self, mc: &MathContext) -> Self {
        let a = a.in_context(mc).abs();
        let b = b.in_context(mc).abs();

        if !a.is_integer() || !b.is_integer() {
            return Self::nan(mc);
        }
        super::advanced::gcd(&a, &b, mc)
    }

    /// Least common multiple of two integers. NaN for non-integers.
    #[must_use]
    pub fn lcm(a: &Self, b: &Self, mc: &MathContext) -> Self {
        let a = a.in_context(mc).abs();
        let b = b.in_context(mc).abs();

        if !a.is_integer() || !b.is_integer() {
            return Self::nan(mc);
        }
        a.mul(&b, mc).div(&super::advanced::gcd(&a, &b, mc), mc)
    }
}

impl Neg for BigNumber {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Neg for &BigNumber {
    type Output = BigNumber;

    fn neg(self) -> BigNumber {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::Precision;

    fn mc() -> MathContext {
        MathContext::decimal(20, RoundingMode::HalfUp)
    }

    fn n(s: &str) -> BigNumber {
        BigNumber::parse(s, &mc())
    }

    #[test]
    fn canonical_forms() {
        let zero = BigNumber::from_i64(0, &mc());
        assert!(zero.is_zero());
        assert_eq!(zero.digits(), Some(&[0][..]));
        assert_eq!(zero.exponent(), Some(0));

        let x = BigNumber::from_digits(false, vec![0, 1, 2, 0], 3, &mc());
        assert_eq!(x.digits(), Some(&[1, 2][..]));
        assert_eq!(x.exponent(), Some(4));
        assert_eq!(x.sci_exponent(), Some(5));

        assert_eq!(BigNumber::nan(&mc()).sign(), None);
        assert_eq!(BigNumber::infinity(true, &mc()).sign(), Some(-1));
        assert!(BigNumber::infinity(true, &mc()).digits().is_none());
    }

    #[test]
    fn rounds_on_construction() {
        let small = MathContext::decimal(3, RoundingMode::HalfUp);
        let x = BigNumber::from_i64(123_456, &small);
        assert_eq!(x.digits(), Some(&[1, 2, 3][..]));
        assert_eq!(x.exponent(), Some(3));
    }

    #[test]
    fn exponent_clamp() {
        let huge = BigNumber::from_digits(false, vec![1], MathContext::MAX_EXPONENT + 1, &mc());
        assert!(huge.is_infinite());
        let tiny = BigNumber::from_digits(true, vec![1], MathContext::MIN_EXPONENT - 1, &mc());
        assert!(tiny.is_zero());
        assert!(tiny.is_negative());
    }

    #[test]
    fn parity() {
        assert!(n("7").is_odd());
        assert!(n("120").is_even());
        assert!(!n("1.5").is_odd());
        assert!(!n("1.5").is_even());

        let base3 = MathContext::new(3, Precision::Digits(10), RoundingMode::HalfUp);
        // 4 is "11" in base 3
        assert!(BigNumber::from_i64(4, &base3).is_even());
        assert!(BigNumber::from_i64(5, &base3).is_odd());
    }

    #[test]
    fn machine_conversions() {
        assert!((n("0.125").to_f64() - 0.125).abs() < f64::EPSILON);
        assert_eq!(n("-1200").to_i64(), Some(-1200));
        assert_eq!(n("1.5").to_i64(), None);

        let hex = MathContext::new(16, Precision::Digits(10), RoundingMode::HalfUp);
        assert!((BigNumber::parse("A.8", &hex).to_f64() - 10.5).abs() < f64::EPSILON);
        assert_eq!(BigNumber::from_f64(0.5, &mc()).to_string(), "5e-1");
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(n("-2.5").trunc().to_plain_string(), "-2");
        assert_eq!(n("0.75").trunc().to_plain_string(), "0");
        assert_eq!(n("-2.5").floor().to_plain_string(), "-3");
        assert_eq!(n("2.1").ceil().to_plain_string(), "3");
        assert_eq!(n("2.345").round(2).to_plain_string(), "2.35");
        assert_eq!(n("123456").to_significant_digits(2, RoundingMode::Down)
                              .to_plain_string(),
                   "120000");
    }

    #[test]
    fn comparisons_treat_signed_zero_as_equal() {
        let m = mc();
        assert!(n("-0").equals(&n("0"), &m));
        assert!(n("-1").lt(&n("0"), &m));
        assert!(n("2").gte(&n("2.0"), &m));
        assert!(!BigNumber::nan(&m).lte(&n("1"), &m));
        assert_eq!(BigNumber::nan(&m).cmp(&n("1"), &m), None);
        assert!(BigNumber::infinity(false, &m).gt(&n("1e+999"), &m));
    }

    #[test]
    fn min_max_and_gcd() {
        let m = mc();
        let values = [n("3"), n("-2"), n("7")];
        assert_eq!(BigNumber::min(&values, &m).to_plain_string(), "-2");
        assert_eq!(BigNumber::max(&values, &m).to_plain_string(), "7");
        assert!(BigNumber::min(&[], &m).is_nan());
        assert!(BigNumber::max(&[n("1"), BigNumber::nan(&m)], &m).is_nan());

        assert_eq!(BigNumber::gcd(&n("12"), &n("-18"), &m).to_plain_string(), "6");
        assert_eq!(BigNumber::lcm(&n("4"), &n("6"), &m).to_plain_string(), "12");
        assert!(BigNumber::gcd(&n("1.5"), &n("3"), &m).is_nan());
    }

    #[test]
    fn random_is_in_unit_interval() {
        let m = mc();
        for _ in 0..20 {
            let r = BigNumber::random(&m);
            assert!(r.gte(&BigNumber::zero(false, &m), &m));
            assert!(r.lt(&BigNumber::one(&m), &m));
        }
    }

    #[test]
    fn signum_and_negation() {
        assert_eq!(n("-3.2").signum().to_plain_string(), "-1");
        assert_eq!(n("0").signum().to_plain_string(), "0");
        assert_eq!((-n("4")).to_plain_string(), "-4");
        assert!(BigNumber::nan(&mc()).negate().is_nan());
    }
}
