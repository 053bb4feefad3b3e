use std::{fmt, str::FromStr};

use crate::bigmath::{
    BigNumber,
    big_number::{ALPHABET, INFINITY_SYMBOL, Repr},
};

/// Leading zeros the user friendly notation writes out before switching to
/// scientific notation.
const MAX_LEADING_ZEROS: i64 = 2;
/// Trailing zeros the user friendly notation writes out before switching to
/// scientific notation.
const MAX_TRAILING_ZEROS: i64 = 6;
/// Longest digit run the user friendly notation writes in plain form.
const MAX_PLAIN_LENGTH: i64 = 9;

/// How a [`BigNumber`] is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notation {
    /// No exponent: `0.000123`.
    Plain,
    /// One digit before the point: `1.23e-4`.
    Scientific,
    /// Exponent a multiple of three: `123e-6`.
    Engineering,
    /// Plain when short, scientific otherwise.
    #[default]
    UserFriendly,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "sci" | "scientific" => Ok(Self::Scientific),
            "eng" | "engineering" => Ok(Self::Engineering),
            "user-friendly" | "friendly" => Ok(Self::UserFriendly),
            other => Err(format!("unknown notation '{other}'")),
        }
    }
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter()
          .map(|&d| ALPHABET.get(usize::from(d)).map_or('?', |&c| char::from(c)))
          .collect()
}

/// Writes `n` in `base` with lowercase letters.
fn integer_to_string(n: u64, base: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut n = n;
    let mut out = Vec::new();
    while n > 0 {
        let d = u32::try_from(n % u64::from(base)).unwrap_or_default();
        out.push(char::from_digit(d, base).unwrap_or('?'));
        n /= u64::from(base);
    }
    out.iter().rev().collect()
}

impl BigNumber {
    /// Writes the value in the given notation.
    ///
    /// Non-decimal values carry their exponent as `&e=` (written in their own
    /// base) and a trailing `&b=` base attribute, so the output parses back to
    /// the same value.
    ///
    /// # Example
    /// ```
    /// use bigcalc::bigmath::{BigNumber, MathContext, Notation, RoundingMode};
    ///
    /// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
    /// let x = BigNumber::parse("0.000123", &mc);
    /// assert_eq!(x.format(Notation::Plain, false), "0.000123");
    /// assert_eq!(x.format(Notation::Scientific, true), "+1.23e-4");
    /// assert_eq!(x.format(Notation::Engineering, false), "123e-6");
    /// ```
    #[must_use]
    pub fn format(&self, notation: Notation, force_sign: bool) -> String {
        let (digits, exponent) = match &self.repr {
            Repr::NaN => return "(NaN)".to_string(),
            Repr::Infinity => {
                let sign = if self.negative { "-" } else if force_sign { "+" } else { "" };
                return format!("{sign}{INFINITY_SYMBOL}");
            },
            Repr::Finite { digits, exponent } => (digits, *exponent),
        };

        let sign = if self.is_zero() && !force_sign {
            ""
        } else if self.negative {
            "-"
        } else if force_sign {
            "+"
        } else {
            ""
        };

        let mut d_str = digits_to_string(digits);
        let mut exp = exponent;

        if !self.is_zero() {
            let len = super::to_i64(d_str.len());
            let mut dot_i = len;
            let mut plain = notation == Notation::Plain;

            if !plain {
                let e_add = len - 1;
                dot_i -= e_add;
                exp += e_add;

                match notation {
                    Notation::Engineering => {
                        while exp % 3 != 0 {
                            dot_i += 1;
                            exp -= 1;
                        }
                    },
                    Notation::UserFriendly => plain = friendly_as_plain(exp, len),
                    Notation::Plain | Notation::Scientific => {},
                }

                if plain {
                    dot_i = len;
                    exp = exponent;
                }
            }

            if plain {
                dot_i += exp;
                exp = 0;
            }

            if dot_i < 0 {
                d_str.insert_str(0, &"0".repeat(usize::try_from(-dot_i).unwrap_or_default()));
                dot_i = 0;
            } else if dot_i > super::to_i64(d_str.len()) {
                let pad = usize::try_from(dot_i).unwrap_or_default() - d_str.len();
                d_str.push_str(&"0".repeat(pad));
            }

            let dot_i = usize::try_from(dot_i).unwrap_or_default();
            if dot_i == 0 {
                d_str.insert_str(0, "0.");
            } else if dot_i < d_str.len() {
                d_str.insert(dot_i, '.');
            }
        }

        let base = self.mc.base();
        let e_str = match exp {
            0 => String::new(),
            e if base == 10 => format!("e{e:+}"),
            e => {
                let sign = if e < 0 { "-" } else { "" };
                format!("&e={sign}{}", integer_to_string(e.unsigned_abs(), base))
            },
        };
        let b_str = if base == 10 { String::new() } else { format!("&b={base}") };

        format!("{sign}{d_str}{e_str}{b_str}")
    }

    /// Writes the value without an exponent.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.format(Notation::Plain, false)
    }

    /// Writes the value with one digit before the point.
    #[must_use]
    pub fn to_scientific_string(&self) -> String {
        self.format(Notation::Scientific, false)
    }

    /// Writes the value with an exponent that is a multiple of three.
    #[must_use]
    pub fn to_engineering_string(&self) -> String {
        self.format(Notation::Engineering, false)
    }

    /// Writes short values plainly and long ones in scientific notation.
    #[must_use]
    pub fn to_user_friendly_string(&self) -> String {
        self.format(Notation::UserFriendly, false)
    }

    /// Scientific notation with an explicit sign.
    #[must_use]
    pub fn value_of(&self) -> String {
        self.format(Notation::Scientific, true)
    }
}

/// Decides whether a value with scientific exponent `exp` and `len` digits is
/// short enough to write plainly.
const fn friendly_as_plain(exp: i64, len: i64) -> bool {
    if exp < 0 {
        let zeros = -exp - 1;
        exp == -1 || (zeros <= MAX_LEADING_ZEROS && len + zeros <= MAX_PLAIN_LENGTH)
    } else if exp < len {
        len <= MAX_PLAIN_LENGTH
    } else {
        let zeros = exp - len + 1;
        zeros <= MAX_TRAILING_ZEROS && len + zeros <= MAX_PLAIN_LENGTH
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_scientific_string())
    }
}
