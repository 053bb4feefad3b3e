use crate::bigmath::{
    BigNumber, IntegerDivision, MathContext, Precision,
    constants::{CONSTANT_DIGITS, PI, PI_DIV2, TWO_PI},
    series::{SeriesParams, sum_series},
};

pub(crate) static SIN_SERIES: SeriesParams = SeriesParams { name:             "sin",
                                                            safe_min_x:       0.0,
                                                            safe_max_x:       6.3,
                                                            error_digits:     3,
                                                            x_sub:            0,
                                                            sign_0:           1,
                                                            sign_mul:         -1,
                                                            exp_0:            1,
                                                            exp_add:          2,
                                                            div_0:            1,
                                                            div_add:          2,
                                                            div_is_factorial: true };

pub(crate) static COS_SERIES: SeriesParams = SeriesParams { name:             "cos",
                                                            safe_min_x:       0.0,
                                                            safe_max_x:       6.3,
                                                            error_digits:     3,
                                                            x_sub:            0,
                                                            sign_0:           1,
                                                            sign_mul:         -1,
                                                            exp_0:            0,
                                                            exp_add:          2,
                                                            div_0:            0,
                                                            div_add:          2,
                                                            div_is_factorial: true };

/// `atan` for `|x| < 1`.
static ATAN_SMALL_SERIES: SeriesParams = SeriesParams { name:             "atan_1",
                                                        safe_min_x:       0.0,
                                                        safe_max_x:       0.9,
                                                        error_digits:     1,
                                                        x_sub:            0,
                                                        sign_0:           1,
                                                        sign_mul:         -1,
                                                        exp_0:            1,
                                                        exp_add:          2,
                                                        div_0:            1,
                                                        div_add:          2,
                                                        div_is_factorial: false };

/// `π/2 - atan` for `|x| > 1`.
static ATAN_LARGE_SERIES: SeriesParams = SeriesParams { name:             "atan_2",
                                                        safe_min_x:       1.1,
                                                        safe_max_x:       f64::INFINITY,
                                                        error_digits:     1,
                                                        x_sub:            0,
                                                        sign_0:           1,
                                                        sign_mul:         -1,
                                                        exp_0:            -1,
                                                        exp_add:          -2,
                                                        div_0:            1,
                                                        div_add:          2,
                                                        div_is_factorial: false };

fn square(x: &BigNumber, mc: &MathContext) -> BigNumber {
    x.mul(x, mc)
}

/// Reduces `x` into `[0, 2π)`.
///
/// # Panics
/// Panics when the integer part of `x` needs more digits than the stored
/// constant provides.
fn mod_two_pi(x: &BigNumber, mc: &MathContext) -> BigNumber {
    let int_digits = match (x.digit_count(), x.exponent()) {
        (Some(len), Some(exp)) => usize::try_from(super::to_i64(len) + exp).unwrap_or(0),
        _ => 0,
    };
    let digits = mc.precision().digits().unwrap_or(CONSTANT_DIGITS) + int_digits;
    assert!(digits <= CONSTANT_DIGITS, "Not enough precision in constant two_pi.");

    let mod_mc = mc.with_precision(Precision::Digits(digits), mc.rounding_mode());
    x.modulo(&TWO_PI, IntegerDivision::Euclidean, &mod_mc).convert(mc)
}

pub(crate) fn sin(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_nan() || x.is_infinite() {
        return BigNumber::nan(mc_arg);
    } else if x.is_zero() {
        return x.convert(mc_arg);
    }

    let mc = mc_arg.half_even(0);
    sum_series(&SIN_SERIES, &mod_two_pi(x, &mc), &mc).convert(mc_arg)
}

pub(crate) fn cos(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_nan() || x.is_infinite() {
        return BigNumber::nan(mc_arg);
    }

    let mc = mc_arg.half_even(0);
    sum_series(&COS_SERIES, &mod_two_pi(x, &mc), &mc).convert(mc_arg)
}

pub(crate) fn tan(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = mc_arg.half_even(0);
    let x = x.convert(&mc);
    sin(&x, &mc).div(&cos(&x, &mc), &mc).convert(mc_arg)
}

/// `atan(x / sqrt(1 - x²))`.
pub(crate) fn asin(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let one = BigNumber::one(mc_arg);
    if x.is_nan() || x.abs().gt(&one, mc_arg) {
        return BigNumber::nan(mc_arg);
    } else if x.is_negative() {
        return asin(&x.negate(), mc_arg).negate();
    }

    let mc = mc_arg.half_even(0);
    let x = x.convert(&mc);
    let root = BigNumber::one(&mc).sub(&square(&x, &mc), &mc).sqrt(&mc);
    atan(&x.div(&root, &mc), &mc).convert(mc_arg)
}

pub(crate) fn acos(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_nan() || x.abs().gt(&BigNumber::one(mc_arg), mc_arg) {
        return BigNumber::nan(mc_arg);
    }

    let mc = mc_arg.half_even(0);
    PI_DIV2.sub(&asin(&x.convert(&mc), &mc), &mc).convert(mc_arg)
}

pub(crate) fn atan(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = mc_arg.half_even(0);
    let x = x.convert(&mc);

    let result = if x.is_nan() {
        BigNumber::nan(&mc)
    } else if x.is_infinite() {
        PI_DIV2.convert(&mc).mul_sign(x.is_negative())
    } else if x.is_negative() {
        atan(&x.negate(), &mc).negate()
    } else if x.gt(&BigNumber::from_f64(0.8, &mc), &mc) && x.lt(&BigNumber::from_f64(1.2, &mc), &mc) {
        // Close to 1 the series converges slowly:
        // atan(x) = atan((x + b) / (1 - x·b)) - atan(b)
        let b = BigNumber::from_f64(0.5, &mc);
        let shifted = x.add(&b, &mc).div(&BigNumber::one(&mc).sub(&x.mul(&b, &mc), &mc), &mc);
        atan(&shifted, &mc).sub(&atan(&b, &mc), &mc)
    } else if x.lt(&BigNumber::one(&mc), &mc) {
        sum_series(&ATAN_SMALL_SERIES, &x, &mc)
    } else {
        PI_DIV2.sub(&sum_series(&ATAN_LARGE_SERIES, &x, &mc), &mc)
    };

    result.convert(mc_arg)
}

/// Angle of the point `(x, y)` in `(-π, π]`. NaN at the origin.
pub(crate) fn atan2(y: &BigNumber, x: &BigNumber, mc: &MathContext) -> BigNumber {
    let zero = BigNumber::zero(false, mc);

    if x.gt(&zero, mc) {
        atan(&y.div(x, mc), mc)
    } else if x.lt(&zero, mc) && y.gte(&zero, mc) {
        atan(&y.div(x, mc), mc).add(&PI, mc)
    } else if x.lt(&zero, mc) && y.lt(&zero, mc) {
        atan(&y.div(x, mc), mc).sub(&PI, mc)
    } else if x.equals(&zero, mc) && y.gt(&zero, mc) {
        PI_DIV2.convert(mc)
    } else if x.equals(&zero, mc) && y.lt(&zero, mc) {
        PI_DIV2.convert(mc).negate()
    } else {
        BigNumber::nan(mc)
    }
}

/// `(e^x - e^-x) / 2`
pub(crate) fn sinh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_zero() {
        return x.convert(mc_arg);
    }

    let mc = mc_arg.half_even(0);
    let two = BigNumber::from_i64(2, &mc);
    x.exp(&mc).sub(&x.negate().exp(&mc), &mc).div(&two, &mc).convert(mc_arg)
}

/// `(e^x + e^-x) / 2`
pub(crate) fn cosh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = mc_arg.half_even(0);
    let two = BigNumber::from_i64(2, &mc);
    x.exp(&mc).add(&x.negate().exp(&mc), &mc).div(&two, &mc).convert(mc_arg)
}

pub(crate) fn tanh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_zero() {
        return x.convert(mc_arg);
    } else if x.is_infinite() {
        return BigNumber::one(mc_arg).mul_sign(x.is_negative());
    }

    let mc = mc_arg.half_even(0);
    let pos = x.exp(&mc);
    let neg = x.negate().exp(&mc);
    pos.sub(&neg, &mc).div(&pos.add(&neg, &mc), &mc).convert(mc_arg)
}

/// `ln(x + sqrt(x² + 1))`
pub(crate) fn asinh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_zero() || x.is_infinite() {
        return x.convert(mc_arg);
    } else if x.is_negative() {
        return asinh(&x.negate(), mc_arg).negate();
    }

    let mc = mc_arg.half_even(0);
    let root = square(x, &mc).add(&BigNumber::one(&mc), &mc).sqrt(&mc);
    x.add(&root, &mc).ln(&mc).convert(mc_arg)
}

/// `ln(x + sqrt(x² - 1))`
pub(crate) fn acosh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = mc_arg.half_even(0);
    let root = square(x, &mc).sub(&BigNumber::one(&mc), &mc).sqrt(&mc);
    x.add(&root, &mc).ln(&mc).convert(mc_arg)
}

/// `ln((1 + x) / (1 - x)) / 2`
pub(crate) fn atanh(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_zero() {
        return x.convert(mc_arg);
    } else if x.is_abs_one() {
        return BigNumber::infinity(x.is_negative(), mc_arg);
    }

    let mc = mc_arg.half_even(0);
    let one = BigNumber::one(&mc);
    let two = BigNumber::from_i64(2, &mc);
    x.add(&one, &mc)
     .div(&one.sub(x, &mc), &mc)
     .ln(&mc)
     .div(&two, &mc)
     .convert(mc_arg)
}

impl BigNumber {
    /// Sine of an angle in radians.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::{BigNumber, MathContext, RoundingMode};
    ///
    /// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
    /// assert_eq!(BigNumber::one(&mc).sin(&mc).to_plain_string(), "0.8414709848");
    /// ```
    #[must_use]
    pub fn sin(&self, mc: &MathContext) -> Self {
        sin(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn cos(&self, mc: &MathContext) -> Self {
        cos(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn tan(&self, mc: &MathContext) -> Self {
        tan(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn asin(&self, mc: &MathContext) -> Self {
        asin(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn acos(&self, mc: &MathContext) -> Self {
        acos(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn atan(&self, mc: &MathContext) -> Self {
        atan(&self.in_context(mc), mc)
    }

    /// Quadrant aware arctangent of `y / x`.
    #[must_use]
    pub fn atan2(y: &Self, x: &Self, mc: &MathContext) -> Self {
        atan2(&y.in_context(mc), &x.in_context(mc), mc)
    }

    #[must_use]
    pub fn sinh(&self, mc: &MathContext) -> Self {
        sinh(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn cosh(&self, mc: &MathContext) -> Self {
        cosh(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn tanh(&self, mc: &MathContext) -> Self {
        tanh(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn asinh(&self, mc: &MathContext) -> Self {
        asinh(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn acosh(&self, mc: &MathContext) -> Self {
        acosh(&self.in_context(mc), mc)
    }

    #[must_use]
    pub fn atanh(&self, mc: &MathContext) -> Self {
        atanh(&self.in_context(mc), mc)
    }
}
