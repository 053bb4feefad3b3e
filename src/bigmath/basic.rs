use std::cmp::Ordering;

use crate::bigmath::{BigNumber, MathContext, Precision, RoundingMode, big_number::Repr};

/// Guard digits carried by addition.
const ADD_EXTRA_DIGITS: usize = 1;
/// Guard digits carried by long division.
const DIV_EXTRA_DIGITS: usize = 1;

/// Rounding policy for integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerDivision {
    /// Quotient truncated toward zero; the remainder takes the dividend's
    /// sign.
    Trunc,
    /// Quotient rounded toward negative infinity; the remainder takes the
    /// divisor's sign.
    Floor,
    /// Quotient chosen so that the remainder is never negative.
    Euclidean,
}

/// Finite parts of an operand, borrowed.
struct Magnitude<'a> {
    digits:   &'a [u8],
    exponent: i64,
}

impl Magnitude<'_> {
    fn int_len(&self) -> i64 {
        super::to_i64(self.digits.len()) + self.exponent
    }

    /// Digit multiplying `base^power`, zero outside the stored digits.
    fn digit_at_power(&self, power: i64) -> i64 {
        let from_right = power - self.exponent;
        let len = super::to_i64(self.digits.len());
        if from_right < 0 || from_right >= len {
            return 0;
        }
        usize::try_from(len - 1 - from_right).map_or(0, |i| i64::from(self.digits[i]))
    }

    fn cmp(&self, other: &Self) -> Ordering {
        self.int_len()
            .cmp(&other.int_len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

fn magnitude(x: &BigNumber) -> Option<Magnitude<'_>> {
    match &x.repr {
        Repr::Finite { digits, exponent } => Some(Magnitude { digits,
                                                              exponent: *exponent }),
        _ => None,
    }
}

const fn sign_ordering(negative: bool) -> Ordering {
    if negative { Ordering::Less } else { Ordering::Greater }
}

/// Compares two operands of the same context. `None` if either is NaN.
pub(crate) fn cmp(a: &BigNumber, b: &BigNumber) -> Option<Ordering> {
    match (&a.repr, &b.repr) {
        (Repr::NaN, _) | (_, Repr::NaN) => None,
        (Repr::Infinity, Repr::Infinity) if a.negative == b.negative => Some(Ordering::Equal),
        (Repr::Infinity, _) => Some(sign_ordering(a.negative)),
        (_, Repr::Infinity) => Some(sign_ordering(b.negative).reverse()),
        _ if a.is_zero() && b.is_zero() => Some(Ordering::Equal),
        _ if a.is_zero() => Some(sign_ordering(b.negative).reverse()),
        _ if b.is_zero() => Some(sign_ordering(a.negative)),
        _ if a.negative != b.negative => Some(sign_ordering(a.negative)),
        _ => {
            let ord = magnitude(a)?.cmp(&magnitude(b)?);
            Some(if a.negative { ord.reverse() } else { ord })
        },
    }
}

/// Adds two operands of context `mc`.
///
/// Works on magnitudes: the larger one comes first and the smaller one is
/// added or subtracted digit by digit. Positions below the working precision
/// plus one guard digit are ignored.
pub(crate) fn add(a: &BigNumber, b: &BigNumber, mc: &MathContext) -> BigNumber {
    match (&a.repr, &b.repr) {
        (Repr::NaN, _) | (_, Repr::NaN) => return BigNumber::nan(mc),
        (Repr::Infinity, Repr::Infinity) if a.negative != b.negative => {
            return BigNumber::nan(mc);
        },
        (Repr::Infinity, _) => return BigNumber::infinity(a.negative, mc),
        (_, Repr::Infinity) => return BigNumber::infinity(b.negative, mc),
        _ => {},
    }

    if a.negative != b.negative && a.repr == b.repr {
        return BigNumber::zero(a.negative, mc);
    }
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }

    let (Some(ma), Some(mb)) = (magnitude(a), magnitude(b)) else {
        unreachable!("finite operands carry digits");
    };
    let (big, small, big_negative, small_negative) = if ma.cmp(&mb) == Ordering::Less {
        (mb, ma, b.negative, a.negative)
    } else {
        (ma, mb, a.negative, b.negative)
    };

    let negative = big_negative;
    let op: i64 = if big_negative == small_negative { 1 } else { -1 };

    let base = i64::from(mc.base());
    let frac_n = (-big.exponent).max(-small.exponent).max(0);
    let int_n = big.int_len().max(small.int_len()).max(0);
    let total = int_n + frac_n;
    let ignore = match mc.precision().extended(ADD_EXTRA_DIGITS) {
        Precision::Digits(p) => (total - super::to_i64(p)).max(0),
        Precision::Unbounded => 0,
    };

    let mut out: Vec<u8> = Vec::new();
    let mut carry = 0;
    for position in ignore..total {
        let power = position - frac_n;
        let mut sum = big.digit_at_power(power) + op * small.digit_at_power(power) + carry;
        carry = 0;
        if sum < 0 {
            sum += base;
            carry = -1;
        } else if sum >= base {
            sum -= base;
            carry = 1;
        }
        out.push(u8::try_from(sum).unwrap_or_default());
    }
    if carry > 0 {
        out.push(1);
    }
    out.reverse();

    BigNumber::from_digits(negative, out, ignore - frac_n, mc)
}

/// Multiplies two operands of context `mc` by schoolbook convolution.
pub(crate) fn mul(a: &BigNumber, b: &BigNumber, mc: &MathContext) -> BigNumber {
    let negative = a.negative != b.negative;

    match (&a.repr, &b.repr) {
        (Repr::NaN, _) | (_, Repr::NaN) => return BigNumber::nan(mc),
        (Repr::Infinity, _) if b.is_zero() => return BigNumber::nan(mc),
        (_, Repr::Infinity) if a.is_zero() => return BigNumber::nan(mc),
        (Repr::Infinity, _) | (_, Repr::Infinity) => return BigNumber::infinity(negative, mc),
        _ => {},
    }

    if a.is_zero() || b.is_zero() {
        return BigNumber::zero(negative, mc);
    }
    if a.is_abs_one() {
        return b.mul_sign(a.negative);
    }
    if b.is_abs_one() {
        return a.mul_sign(b.negative);
    }

    let (Some(ma), Some(mb)) = (magnitude(a), magnitude(b)) else {
        unreachable!("finite operands carry digits");
    };

    let base = u64::from(mc.base());
    let mut acc = vec![0_u64; ma.digits.len() + mb.digits.len()];
    for (i, &da) in ma.digits.iter().enumerate() {
        for (j, &db) in mb.digits.iter().enumerate() {
            acc[i + j + 1] += u64::from(da) * u64::from(db);
        }
    }

    let mut carry = 0;
    for slot in acc.iter_mut().rev() {
        let value = *slot + carry;
        *slot = value % base;
        carry = value / base;
    }

    let digits = acc.into_iter()
                    .map(|d| u8::try_from(d).unwrap_or_default())
                    .collect();

    BigNumber::from_digits(negative, digits, ma.exponent + mb.exponent, mc)
}

/// Compares unsigned digit strings without leading zeros.
fn cmp_uint(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// `a -= b` for unsigned digit strings with `a >= b`.
fn sub_uint(a: &mut Vec<u8>, b: &[u8], base: u32) {
    let mut borrow = 0;
    let offset = a.len() - b.len();

    for i in (0..a.len()).rev() {
        let sub = if i >= offset { u32::from(b[i - offset]) } else { 0 } + borrow;
        let cur = u32::from(a[i]);
        if cur < sub {
            a[i] = u8::try_from(cur + base - sub).unwrap_or_default();
            borrow = 1;
        } else {
            a[i] = u8::try_from(cur - sub).unwrap_or_default();
            borrow = 0;
        }
    }

    let leading = a.iter().take_while(|&&d| d == 0).count();
    a.drain(..leading);
}

/// Long division of two operands of context `mc`.
///
/// Produces one quotient digit per step. With `mode` set the quotient stops
/// at the radix point and the remainder `a - b·q` is returned as well.
///
/// # Panics
/// Panics when an unbounded division never terminates.
pub(crate) fn div(a: &BigNumber,
                  b: &BigNumber,
                  mode: Option<IntegerDivision>,
                  mc: &MathContext)
                  -> (BigNumber, Option<BigNumber>) {
    let negative = a.negative != b.negative;

    let (quotient, truncated) = if a.is_nan()
                                   || b.is_nan()
                                   || (a.is_zero() && b.is_zero())
                                   || (a.is_infinite() && b.is_infinite())
    {
        (BigNumber::nan(mc), false)
    } else if a.is_infinite() || b.is_zero() {
        (BigNumber::infinity(negative, mc), false)
    } else if b.is_infinite() || a.is_zero() {
        (BigNumber::zero(negative, mc), false)
    } else {
        let (Some(ma), Some(mb)) = (magnitude(a), magnitude(b)) else {
            unreachable!("finite operands carry digits");
        };
        long_division(&ma, &mb, negative, mode.is_some(), mc)
    };

    let Some(mode) = mode else {
        return (quotient, None);
    };

    let one = BigNumber::one(mc);
    let (q, r) = match mode {
        IntegerDivision::Trunc => {
            let r = a.sub(&b.mul(&quotient, mc), mc);
            (quotient, r)
        },
        IntegerDivision::Floor => {
            let q = if truncated && negative { quotient.sub(&one, mc) } else { quotient };
            let r = a.sub(&b.mul(&q, mc), mc);
            (q, r)
        },
        IntegerDivision::Euclidean => {
            let zero = BigNumber::zero(false, mc);
            let q = if b.gt(&zero, mc) && truncated && negative {
                quotient.sub(&one, mc)
            } else if b.lt(&zero, mc) && truncated && !negative {
                quotient.add(&one, mc)
            } else {
                quotient
            };
            let r = a.sub(&b.mul(&q, mc).abs().mul_sign(a.negative), mc);
            (q, r)
        },
    };

    (q, Some(r))
}

fn long_division(a: &Magnitude<'_>,
                 b: &Magnitude<'_>,
                 negative: bool,
                 to_int: bool,
                 mc: &MathContext)
                 -> (BigNumber, bool) {
    let div_mc = MathContext::new(mc.base(),
                                  mc.precision().extended(DIV_EXTRA_DIGITS),
                                  RoundingMode::HalfEven);
    let base = mc.base();

    let mut shift_exp = a.exponent + super::to_i64(a.digits.len()) - b.exponent;
    let mut a_index = 0;
    let mut rem: Vec<u8> = Vec::new();
    let mut rem_history: Vec<Vec<u8>> = Vec::new();
    let mut result: Vec<u8> = Vec::new();

    while div_mc.precision().admits(result.len().max(1)) {
        if to_int && shift_exp <= 0 {
            break;
        }
        if a_index >= a.digits.len() {
            if rem.is_empty() {
                break;
            }
            if div_mc.precision() == Precision::Unbounded {
                assert!(!rem_history.contains(&rem), "Endless repeating division.");
                rem_history.push(rem.clone());
            }
        }

        rem.push(a.digits.get(a_index).copied().unwrap_or_default());
        let leading = rem.iter().take_while(|&&d| d == 0).count();
        rem.drain(..leading);

        let mut q = 0;
        while cmp_uint(&rem, b.digits) != Ordering::Less {
            sub_uint(&mut rem, b.digits, base);
            q += 1;
        }

        if !result.is_empty() || q > 0 {
            result.push(q);
        }

        a_index += 1;
        shift_exp -= 1;
    }

    let truncated = !rem.is_empty() || a_index < a.digits.len();
    let quotient = BigNumber::from_digits(negative, result, shift_exp, &div_mc).convert(mc);

    (quotient, truncated)
}
