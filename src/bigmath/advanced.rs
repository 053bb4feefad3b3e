use crate::bigmath::{
    BigNumber, IntegerDivision, MathContext,
    constants::{E, LN2},
    series::{SeriesParams, sum_series},
};

pub(crate) static EXP_SERIES: SeriesParams = SeriesParams { name:             "exp",
                                                            safe_min_x:       0.0,
                                                            safe_max_x:       1.0,
                                                            error_digits:     0,
                                                            x_sub:            0,
                                                            sign_0:           1,
                                                            sign_mul:         1,
                                                            exp_0:            0,
                                                            exp_add:          1,
                                                            div_0:            0,
                                                            div_add:          1,
                                                            div_is_factorial: true };

pub(crate) static LN_SERIES: SeriesParams = SeriesParams { name:             "ln",
                                                           safe_min_x:       0.1,
                                                           safe_max_x:       1.9,
                                                           error_digits:     0,
                                                           x_sub:            1,
                                                           sign_0:           1,
                                                           sign_mul:         -1,
                                                           exp_0:            1,
                                                           exp_add:          1,
                                                           div_0:            1,
                                                           div_add:          1,
                                                           div_is_factorial: false };

/// Upper end of the range `ln` reduces its argument into by halving.
const LN_REDUCED_MAX: f64 = 1.333;

/// Guard digits for results that grow with the magnitude of `x`.
fn power_mc(mc: &MathContext, x: &BigNumber) -> MathContext {
    let extra = x.sci_exponent().map_or(0, |e| usize::try_from(e).unwrap_or(0));
    mc.half_even(extra)
}

pub(crate) fn exp(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = power_mc(mc_arg, x);

    let invert = x.is_negative();
    let x = if invert { x.negate() } else { x.clone() };

    let mut result = if x.is_nan() {
        BigNumber::nan(&mc)
    } else if x.is_infinite() {
        BigNumber::infinity(false, &mc)
    } else if x.is_zero() {
        BigNumber::one(&mc)
    } else {
        let whole = x.floor();
        let fraction = x.sub(&whole, &mc);

        let a = E.pow(&whole, &mc);
        let b = sum_series(&EXP_SERIES, &fraction, &mc);
        a.mul(&b, &mc)
    };

    if invert {
        result = result.reciprocal(&mc);
    }

    result.convert(mc_arg)
}

pub(crate) fn pow(x: &BigNumber, exponent: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = power_mc(mc_arg, exponent);

    let invert = exponent.is_negative();
    let mut exponent = if invert { exponent.negate() } else { exponent.clone() };
    let mut x = x.convert(&mc);

    let mut result = if x.is_nan() || exponent.is_nan() {
        BigNumber::nan(&mc)
    } else if exponent.is_infinite() {
        let one = BigNumber::one(&mc);
        if x.is_negative() {
            BigNumber::nan(&mc)
        } else if x.lt(&one, &mc) {
            BigNumber::zero(false, &mc)
        } else if x.equals(&one, &mc) {
            x
        } else {
            BigNumber::infinity(false, &mc)
        }
    } else if exponent.is_zero() {
        BigNumber::one(&mc)
    } else if exponent.is_integer() {
        let two = BigNumber::from_i64(2, &mc);
        let mut acc = BigNumber::one(&mc);
        loop {
            if exponent.is_odd() {
                acc = acc.mul(&x, &mc);
            }
            exponent = exponent.div_to_int(&two, IntegerDivision::Trunc, &mc);
            if exponent.is_zero() {
                break;
            }
            x = x.mul(&x, &mc);
        }
        acc
    } else if x.is_negative() {
        BigNumber::nan(&mc)
    } else {
        // x^y = e^(ln(x)·y)
        ln(&x, &mc).mul(&exponent, &mc).exp(&mc)
    };

    if invert {
        result = result.reciprocal(&mc);
    }

    result.convert(mc_arg)
}

pub(crate) fn ln(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_nan() || (x.is_negative() && !x.is_zero()) {
        return BigNumber::nan(mc_arg);
    } else if x.is_zero() {
        return BigNumber::infinity(true, mc_arg);
    } else if x.is_abs_one() {
        return BigNumber::zero(false, mc_arg);
    } else if x.is_infinite() {
        return BigNumber::infinity(false, mc_arg);
    }

    let mc = mc_arg.half_even(0);

    // Halve y into [0.666, 1.333) collecting ln 2 for every step.
    let reduced_ln = |y: BigNumber| {
        let two = BigNumber::from_i64(2, &mc);
        let limit = BigNumber::from_f64(LN_REDUCED_MAX, &mc);
        let mut y = y;
        let mut acc = BigNumber::zero(false, &mc);
        while y.gt(&limit, &mc) {
            y = y.div(&two, &mc);
            acc = acc.add(&LN2, &mc);
        }
        sum_series(&LN_SERIES, &y, &mc).add(&acc, &mc)
    };

    // x = a·base^b, ln(x) = ln(a) + b·ln(base)
    let (Some(digits), Some(exponent), Some(b)) = (x.digits(), x.exponent(), x.sci_exponent()) else {
        return BigNumber::nan(mc_arg);
    };
    let a = BigNumber::from_digits(false, digits.to_vec(), exponent - b, x.mc());
    let base = BigNumber::from_i64(i64::from(mc.base()), &mc);

    let result = reduced_ln(a).add(&reduced_ln(base).mul(&BigNumber::from_i64(b, &mc), &mc), &mc);
    result.convert(mc_arg)
}

pub(crate) fn log(base: &BigNumber, x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    let mc = mc_arg.half_even(0);
    let result = ln(&x.convert(&mc), &mc).div(&ln(&base.convert(&mc), &mc), &mc);
    result.convert(mc_arg)
}

/// Newton iteration `r = (r + x/r) / 2` with one guard digit.
pub(crate) fn sqrt(x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_zero() {
        return BigNumber::zero(false, mc_arg);
    } else if x.is_negative() || x.is_nan() {
        return BigNumber::nan(mc_arg);
    } else if x.is_abs_one() || x.is_infinite() {
        return x.convert(mc_arg);
    }

    let mc = mc_arg.half_even(0);
    let mc1 = mc_arg.half_even(1);
    let two = BigNumber::from_i64(2, &mc1);

    let mut result = x.div(&two, &mc1);
    loop {
        let prev = result;
        result = prev.add(&x.div(&prev, &mc1), &mc1).div(&two, &mc1);
        if result.equals(&prev, &mc) {
            break;
        }
    }

    result.convert(mc_arg)
}

pub(crate) fn nthroot(index: &BigNumber, x: &BigNumber, mc_arg: &MathContext) -> BigNumber {
    if x.is_negative() && index.is_odd() {
        return nthroot(index, &x.negate(), mc_arg).negate();
    }

    let mc = mc_arg.half_even(0);
    x.pow(&index.reciprocal(&mc), &mc).convert(mc_arg)
}

/// `x·(x-step)·(x-2·step)···` down to 2, for non-negative integers. Stops
/// early once the product overflows to infinity.
pub(crate) fn factorial(x: &BigNumber, step: i64, mc_arg: &MathContext) -> BigNumber {
    assert!(step == 1 || step == 2, "Factorial step must be 1 or 2.");

    if (x.is_integer() && x.is_positive()) || x.is_zero() {
        let mc = power_mc(mc_arg, x);
        let sub = BigNumber::from_i64(step, &mc);
        let two = BigNumber::from_i64(2, &mc);

        let mut n = x.convert(&mc);
        let mut result = BigNumber::one(&mc);
        while n.gte(&two, &mc) && !result.is_infinite() {
            result = result.mul(&n, &mc);
            n = n.sub(&sub, &mc);
        }

        result.convert(mc_arg)
    } else if x.is_infinite() && x.is_positive() {
        x.convert(mc_arg)
    } else {
        BigNumber::nan(mc_arg)
    }
}

/// Euclid's algorithm on non-negative integers.
pub(crate) fn gcd(a: &BigNumber, b: &BigNumber, mc: &MathContext) -> BigNumber {
    let (mut a, mut b) = if b.gt(a, mc) { (b.clone(), a.clone()) } else { (a.clone(), b.clone()) };

    while !b.is_zero() {
        let r = a.modulo(&b, IntegerDivision::Trunc, mc);
        a = b;
        b = r;
    }

    a.convert(mc)
}

impl BigNumber {
    /// `self` raised to `exponent`.
    ///
    /// Integer exponents use square-and-multiply. Other exponents go through
    /// `e^(ln(self)·exponent)` and give NaN for negative bases.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::{BigNumber, MathContext, RoundingMode};
    ///
    /// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
    /// let two = BigNumber::from_i64(2, &mc);
    /// assert_eq!(two.pow(&BigNumber::from_i64(10, &mc), &mc).to_plain_string(), "1024");
    /// assert_eq!(two.pow(&BigNumber::from_i64(-2, &mc), &mc).to_plain_string(), "0.25");
    /// ```
    #[must_use]
    pub fn pow(&self, exponent: &Self, mc: &MathContext) -> Self {
        pow(&self.in_context(mc), &exponent.in_context(mc), mc)
    }

    /// `e^self`.
    #[must_use]
    pub fn exp(&self, mc: &MathContext) -> Self {
        exp(&self.in_context(mc), mc)
    }

    /// Natural logarithm. `-∞` at zero, NaN below.
    #[must_use]
    pub fn ln(&self, mc: &MathContext) -> Self {
        ln(&self.in_context(mc), mc)
    }

    /// Logarithm of `self` to `base`.
    #[must_use]
    pub fn log(&self, base: &Self, mc: &MathContext) -> Self {
        log(base, self, mc)
    }

    #[must_use]
    pub fn sqrt(&self, mc: &MathContext) -> Self {
        sqrt(&self.in_context(mc), mc)
    }

    /// The `index`th root. Odd roots of negative values are negative.
    #[must_use]
    pub fn nthroot(&self, index: &Self, mc: &MathContext) -> Self {
        nthroot(&index.in_context(mc), &self.in_context(mc), mc)
    }

    /// `self!` for non-negative integers, NaN otherwise.
    #[must_use]
    pub fn factorial(&self, mc: &MathContext) -> Self {
        factorial(&self.in_context(mc), 1, mc)
    }

    /// `self!!`, the product of every second integer down from `self`.
    #[must_use]
    pub fn double_factorial(&self, mc: &MathContext) -> Self {
        factorial(&self.in_context(mc), 2, mc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigmath::{Precision, RoundingMode};

    fn mc() -> MathContext {
        MathContext::decimal(30, RoundingMode::HalfUp)
    }

    fn n(s: &str) -> BigNumber {
        BigNumber::parse(s, &mc())
    }

    /// Compares to 15 significant digits.
    fn assert_close(actual: &BigNumber, expected: &str) {
        let round = |x: &BigNumber| x.to_significant_digits(15, RoundingMode::HalfUp).to_plain_string();
        assert_eq!(round(actual), round(&n(expected)));
    }

    #[test]
    fn exp_values() {
        assert_close(&n("1").exp(&mc()), "2.7182818284590452354");
        assert_close(&n("-2.5").exp(&mc()), "0.08208499862389879517");
        assert_close(&n("10.3").exp(&mc()), "29732.618852891413821");
        assert_eq!(n("0").exp(&mc()).to_plain_string(), "1");
        assert!(n("-∞").exp(&mc()).is_zero());
        assert!(n("∞").exp(&mc()).is_infinite());
    }

    #[test]
    fn ln_and_log() {
        assert_close(&n("2").ln(&mc()), "0.69314718055994530942");
        assert_close(&n("12345.678").ln(&mc()), "9.4210613212918319765");
        assert_close(&n("0.001").ln(&mc()), "-6.9077552789821370521");
        assert_close(&n("5").log(&n("10"), &mc()), "0.69897000433601880479");
        assert_close(&n("1024").log(&n("2"), &mc()), "10");

        assert!(n("-1").ln(&mc()).is_nan());
        let z = n("0").ln(&mc());
        assert!(z.is_infinite() && z.is_negative());
        assert!(n("1").ln(&mc()).is_zero());
    }

    #[test]
    fn ln_in_other_base() {
        let hex = MathContext::new(16, Precision::Digits(24), RoundingMode::HalfUp);
        let x = BigNumber::from_i64(300, &hex);
        assert_close(&x.ln(&hex).convert(&mc()), "5.7037824746562010");
    }

    #[test]
    fn sqrt_values() {
        assert_close(&n("2").sqrt(&mc()), "1.4142135623730950488");
        assert_close(&n("123456789").sqrt(&mc()), "11111.111060555555441");
        assert_eq!(n("4").sqrt(&mc()).to_plain_string(), "2");
        assert_eq!(n("100").sqrt(&mc()).to_plain_string(), "10");
        assert!(n("-2").sqrt(&mc()).is_nan());

        let z = n("-0").sqrt(&mc());
        assert!(z.is_zero() && !z.is_negative());
    }

    #[test]
    fn pow_special_values() {
        let pow = |x: &str, e: &str| n(x).pow(&n(e), &mc());

        assert_eq!(pow("0", "0").to_plain_string(), "1");
        assert_eq!(pow("∞", "0").to_plain_string(), "1");
        assert!(pow("0.5", "∞").is_zero());
        assert!(pow("0.5", "-∞").is_infinite());
        assert_eq!(pow("1", "∞").to_plain_string(), "1");
        assert!(pow("2", "∞").is_infinite());
        assert!(pow("-2", "∞").is_nan());
        assert!(pow("-2", "0.5").is_nan());
        assert!(pow("0", "-7").is_infinite());

        let neg = pow("-0", "-7");
        assert!(neg.is_infinite() && neg.is_negative());

        assert_eq!(pow("-2", "5").to_plain_string(), "-32");
        assert_close(&pow("8.41", "0.63"), "3.8249122606010654325");
        assert_close(&pow("1.23", "2.34"), "1.6232221516853707617");
    }

    #[test]
    fn pow_overflow_saturates() {
        assert!(n("2").pow(&n("1e+9"), &mc()).is_infinite());
        assert!(n("2").pow(&n("-1e+9"), &mc()).is_zero());
    }

    #[test]
    fn nthroot_keeps_sign_for_odd_index() {
        assert_close(&n("-27").nthroot(&n("3"), &mc()), "-3");
        assert_close(&n("16").nthroot(&n("4"), &mc()), "2");
        assert!(n("-16").nthroot(&n("4"), &mc()).is_nan());
    }

    #[test]
    fn factorials() {
        assert_eq!(n("0").factorial(&mc()).to_plain_string(), "1");
        assert_eq!(n("10").factorial(&mc()).to_plain_string(), "3628800");
        assert_eq!(n("7").double_factorial(&mc()).to_plain_string(), "105");
        assert_eq!(n("8").double_factorial(&mc()).to_plain_string(), "384");
        assert!(n("2.5").factorial(&mc()).is_nan());
        assert!(n("-3").factorial(&mc()).is_nan());
        assert!(n("∞").factorial(&mc()).is_infinite());
    }

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(BigNumber::gcd(&n("12"), &n("18"), &mc()).to_plain_string(), "6");
        assert_eq!(BigNumber::gcd(&n("7"), &n("0"), &mc()).to_plain_string(), "7");
        assert_eq!(BigNumber::lcm(&n("4"), &n("6"), &mc()).to_plain_string(), "12");
    }
}
