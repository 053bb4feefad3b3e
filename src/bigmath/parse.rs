use crate::bigmath::{BigNumber, MathContext, Precision, RoundingMode, big_number::INFINITY_SYMBOL};

/// Pieces of a number literal, split but not yet interpreted.
///
/// Two literal forms are recognised:
/// - decimal style: `[sign]digits[.digits][e(+|-)exponent]`
/// - attribute style: `[sign]digits[.digits][&e=[sign]exponent][&b=base]`
///   with letters as digits above 9 and the attributes in either order.
///
/// Leading and trailing whitespace is allowed. Anything else left over makes
/// the literal invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedNumber<'a> {
    pub negative: bool,
    /// Digits with an optional radix point, `∞`, or empty for zero.
    pub digits:   &'a str,
    /// Exponent text including its sign, written in the literal's base.
    pub exponent: Option<&'a str>,
    /// Base attribute, written in decimal.
    pub base:     Option<&'a str>,
}

struct Cursor<'a> {
    text: &'a str,
    pos:  usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn eat_sign(&mut self) -> Option<char> {
        ['+', '-'].into_iter().find(|&c| self.eat(c))
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.rest()
                      .char_indices()
                      .find(|&(_, c)| !pred(c))
                      .map_or(self.rest().len(), |(i, _)| i);
        self.pos += len;
        &self.text[start..self.pos]
    }

    fn at_end_after_whitespace(&mut self) -> bool {
        self.eat_while(char::is_whitespace);
        self.rest().is_empty()
    }
}

impl<'a> ParsedNumber<'a> {
    /// Splits a literal into its parts. `None` if it fits neither form.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::ParsedNumber;
    ///
    /// let p = ParsedNumber::scan("-1F.8&b=16").unwrap();
    /// assert!(p.negative);
    /// assert_eq!(p.digits, "1F.8");
    /// assert_eq!(p.base, Some("16"));
    /// assert!(ParsedNumber::scan("1&x=2").is_none());
    /// ```
    #[must_use]
    pub fn scan(text: &'a str) -> Option<Self> {
        Self::scan_decimal(text).or_else(|| Self::scan_attributed(text))
    }

    fn scan_decimal(text: &'a str) -> Option<Self> {
        let mut cur = Cursor::new(text);
        cur.eat_while(char::is_whitespace);
        let negative = cur.eat_sign() == Some('-');

        let start = cur.pos;
        let int = cur.eat_while(|c| c.is_ascii_digit());
        if cur.eat('.') {
            let frac = cur.eat_while(|c| c.is_ascii_digit());
            if int.is_empty() && frac.is_empty() {
                return None;
            }
        } else if int.is_empty() {
            return None;
        }
        let digits = &text[start..cur.pos];

        let before_exponent = cur.pos;
        let mut exponent = None;
        if cur.eat('e') || cur.eat('E') {
            let exp_start = cur.pos;
            if cur.eat_sign().is_some() && !cur.eat_while(|c| c.is_ascii_digit()).is_empty() {
                exponent = Some(&text[exp_start..cur.pos]);
            } else {
                cur.pos = before_exponent;
            }
        }

        cur.at_end_after_whitespace().then_some(Self { negative,
                                                       digits,
                                                       exponent,
                                                       base: None })
    }

    fn scan_attributed(text: &'a str) -> Option<Self> {
        let mut cur = Cursor::new(text);
        cur.eat_while(char::is_whitespace);
        let negative = cur.eat_sign() == Some('-');

        let start = cur.pos;
        let int = cur.eat_while(|c| c.is_ascii_alphanumeric());
        if cur.eat('.') {
            let frac = cur.eat_while(|c| c.is_ascii_alphanumeric());
            if int.is_empty() && frac.is_empty() {
                return None;
            }
        } else if int.is_empty() {
            cur.eat_str(INFINITY_SYMBOL);
        }
        let digits = &text[start..cur.pos];

        let mut exponent = None;
        let mut base = None;
        for _ in 0..2 {
            let slot = if cur.eat_str("&e=") {
                &mut exponent
            } else if cur.eat_str("&b=") {
                &mut base
            } else {
                break;
            };

            let value_start = cur.pos;
            cur.eat_sign();
            if cur.eat_while(|c| c.is_ascii_alphanumeric()).is_empty() {
                return None;
            }
            if slot.is_none() {
                *slot = Some(&text[value_start..cur.pos]);
            }
        }

        cur.at_end_after_whitespace().then_some(Self { negative,
                                                       digits,
                                                       exponent,
                                                       base })
    }
}

/// Value of a digit character, letters counting from 10.
pub(crate) fn char_to_digit(c: char) -> Option<u32> {
    c.to_digit(36)
}

/// Parses a signed integer written in `base`. Saturates instead of
/// overflowing.
fn parse_exponent(text: &str, base: u32) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if body.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for c in body.chars() {
        let d = char_to_digit(c).filter(|&d| d < base)?;
        value = value.saturating_mul(i64::from(base)).saturating_add(i64::from(d));
    }

    Some(if negative { -value } else { value })
}

impl BigNumber {
    /// Parses a literal in the base of `mc` (or the literal's own `&b=`
    /// base) and rounds it to `mc`.
    ///
    /// Malformed literals give NaN rather than an error.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::{BigNumber, MathContext, RoundingMode};
    ///
    /// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
    /// assert_eq!(BigNumber::parse("1.5e+3", &mc).to_plain_string(), "1500");
    /// assert_eq!(BigNumber::parse("FF&b=16", &mc).to_plain_string(), "255");
    /// assert!(BigNumber::parse("12x", &mc).is_nan());
    /// ```
    #[must_use]
    pub fn parse(text: &str, mc: &MathContext) -> Self {
        Self::parse_with(text, mc, false)
    }

    /// Like [`BigNumber::parse`], optionally reading the digits as decimal
    /// whatever the base of `mc` is.
    pub(crate) fn parse_with(text: &str, mc: &MathContext, force_decimal: bool) -> Self {
        let Some(parsed) = ParsedNumber::scan(text) else {
            return Self::nan(mc);
        };

        let base = if force_decimal {
            10
        } else if let Some(b) = parsed.base {
            match b.parse::<u32>() {
                Ok(b) if (super::MIN_BASE..=super::MAX_BASE).contains(&b) => b,
                _ => return Self::nan(mc),
            }
        } else {
            mc.base()
        };

        let mut exponent = match parsed.exponent {
            Some(e) => match parse_exponent(e, base) {
                Some(e) => e,
                None => return Self::nan(mc),
            },
            None => 0,
        };

        match parsed.digits {
            "" | "0" => return Self::zero(parsed.negative, mc),
            INFINITY_SYMBOL => return Self::infinity(parsed.negative, mc),
            _ => {},
        }

        if let Some(dot) = parsed.digits.find('.') {
            let after = parsed.digits.len() - dot - 1;
            exponent = exponent.saturating_sub(super::to_i64(after));
        }

        let mut digits = Vec::with_capacity(parsed.digits.len());
        for c in parsed.digits.chars().filter(|&c| c != '.') {
            match char_to_digit(c).filter(|&d| d < base) {
                Some(d) => digits.push(u8::try_from(d).unwrap_or_default()),
                None => return Self::nan(mc),
            }
        }

        if base == mc.base() {
            Self::from_digits(parsed.negative, digits, exponent, mc)
        } else {
            let source = MathContext::new(base, Precision::Digits(digits.len()), RoundingMode::HalfUp);
            Self::from_digits(parsed.negative, digits, exponent, &source).convert(mc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec() -> MathContext {
        MathContext::decimal(20, RoundingMode::HalfUp)
    }

    fn hex() -> MathContext {
        MathContext::new(16, Precision::Digits(20), RoundingMode::HalfUp)
    }

    #[test]
    fn decimal_form_needs_a_signed_exponent() {
        let p = ParsedNumber::scan(" -12.5e+3 ").unwrap();
        assert!(p.negative);
        assert_eq!(p.digits, "12.5");
        assert_eq!(p.exponent, Some("+3"));

        assert_eq!(BigNumber::parse("1.25e-2", &dec()).to_plain_string(), "0.0125");
        // Without a sign the `e` reads as a digit, which decimal rejects.
        assert!(BigNumber::parse("1e5", &dec()).is_nan());
    }

    #[test]
    fn attribute_form() {
        let p = ParsedNumber::scan("1.1&b=2&e=-1").unwrap();
        assert_eq!(p.digits, "1.1");
        assert_eq!(p.exponent, Some("-1"));
        assert_eq!(p.base, Some("2"));

        // 1.1 in binary shifted one place right: 0.75
        assert_eq!(BigNumber::parse("1.1&b=2&e=-1", &dec()).to_plain_string(), "0.75");
        assert_eq!(BigNumber::parse("A&e=2", &hex()).to_plain_string(), "A00&b=16");
    }

    #[test]
    fn lowercase_digits_and_bad_attributes() {
        assert_eq!(BigNumber::parse("ff", &hex()).to_plain_string(), "FF&b=16");
        assert!(BigNumber::parse("1&B=16", &dec()).is_nan());
        assert!(BigNumber::parse("1&b=37", &dec()).is_nan());
        assert!(BigNumber::parse("1&b=1", &dec()).is_nan());
        assert!(BigNumber::parse("1&e=", &dec()).is_nan());
        assert!(BigNumber::parse(".", &dec()).is_nan());
        assert!(BigNumber::parse("2&b=2", &dec()).is_nan());
    }

    #[test]
    fn zero_and_infinity_literals() {
        let z = BigNumber::parse("-0", &dec());
        assert!(z.is_zero() && z.is_negative());
        assert!(BigNumber::parse("", &dec()).is_zero());
        assert!(BigNumber::parse("0.000", &dec()).is_zero());

        let inf = BigNumber::parse("-∞", &dec());
        assert!(inf.is_infinite() && inf.is_negative());
    }

    #[test]
    fn leading_zeros_are_dropped() {
        let x = BigNumber::parse("007.50", &dec());
        assert_eq!(x.digits(), Some(&[7, 5][..]));
        assert_eq!(x.exponent(), Some(-1));
    }

    #[test]
    fn decimal_literal_in_hex_context_keeps_hex_digits() {
        // Without an attribute the context base applies.
        assert_eq!(BigNumber::parse("10", &hex()).to_i64(), Some(16));
        // Floats always come in as decimal.
        assert_eq!(BigNumber::from_f64(10.5, &hex()).to_plain_string(), "A.8&b=16");
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(BigNumber::parse("12 34", &dec()).is_nan());
        assert!(BigNumber::parse("1.2.3", &dec()).is_nan());
    }
}
