use crate::bigmath::RoundingMode;

/// How many digits a rounding keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundTarget {
    /// Keep this many significant digits.
    SignificantDigits(usize),
    /// Keep this many digits after the radix point.
    DecimalPlaces(usize),
}

/// Brings a digit vector into canonical form.
///
/// Leading zeros are dropped, trailing zeros are folded into the exponent and
/// zero becomes `[0]` with exponent `0`.
pub(crate) fn trim_digits(digits: &mut Vec<u8>, exponent: &mut i64) {
    let leading = digits.iter().take_while(|&&d| d == 0).count();
    digits.drain(..leading.min(digits.len().saturating_sub(1)));

    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
        *exponent += 1;
    }

    if digits.is_empty() {
        digits.push(0);
    }
    if digits[..] == [0] {
        *exponent = 0;
    }
}

/// Rounds canonical digits in place.
///
/// `digits` and `exponent` describe the magnitude `0.d1d2...dn × base^(n +
/// exponent)`, that is, the integer `d1d2...dn` shifted by `exponent` places.
///
/// # Panics
/// Panics when `mode` is [`RoundingMode::Unnecessary`] and a digit has to be
/// discarded.
pub(crate) fn round_digits(negative: bool,
                           digits: &mut Vec<u8>,
                           exponent: &mut i64,
                           base: u32,
                           target: RoundTarget,
                           mode: RoundingMode) {
    trim_digits(digits, exponent);

    if digits[..] == [0] {
        return;
    }

    let len = to_i64(digits.len());
    let remove_count = match target {
        RoundTarget::SignificantDigits(sd) => len - to_i64(sd),
        RoundTarget::DecimalPlaces(dp) => (-*exponent).max(0) - to_i64(dp),
    };

    if remove_count <= 0 {
        return;
    }

    let digit_at = |i: i64| -> u32 {
        usize::try_from(i).ok()
                          .and_then(|i| digits.get(i))
                          .map_or(0, |&d| u32::from(d))
    };

    let digit_id = len - remove_count;
    let digit = digit_at(digit_id);
    let half = base / 2;
    let is_halfway = base % 2 == 0 && digit == half;

    let round_up = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceil => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => digit > half || is_halfway,
        RoundingMode::HalfDown => digit > half && !is_halfway,
        RoundingMode::HalfEven => {
            digit > half || (is_halfway && digit_at(digit_id - 1) % 2 == 1)
        },
        RoundingMode::Unnecessary => {
            panic!("Got RoundingMode.Unnecessary while attempting to round.")
        },
    };

    let keep = digits.len().saturating_sub(usize::try_from(remove_count).unwrap_or(usize::MAX));
    digits.truncate(keep);
    *exponent += remove_count;

    if round_up {
        let mut carried = true;
        for d in digits.iter_mut().rev() {
            if u32::from(*d) + 1 < base {
                *d += 1;
                carried = false;
                break;
            }
            *d = 0;
        }
        if carried {
            digits.insert(0, 1);
        }
    }

    trim_digits(digits, exponent);
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(negative: bool,
             digits: &[u8],
             exponent: i64,
             target: RoundTarget,
             mode: RoundingMode)
             -> (Vec<u8>, i64) {
        let mut digits = digits.to_vec();
        let mut exponent = exponent;
        round_digits(negative, &mut digits, &mut exponent, 10, target, mode);
        (digits, exponent)
    }

    #[test]
    fn trims_leading_and_trailing_zeros() {
        let mut digits = vec![0, 0, 1, 2, 0, 0];
        let mut exponent = -3;
        trim_digits(&mut digits, &mut exponent);
        assert_eq!(digits, vec![1, 2]);
        assert_eq!(exponent, -1);

        let mut digits = vec![0, 0, 0];
        let mut exponent = 7;
        trim_digits(&mut digits, &mut exponent);
        assert_eq!(digits, vec![0]);
        assert_eq!(exponent, 0);
    }

    #[test]
    fn half_modes_on_ties() {
        let sd = RoundTarget::SignificantDigits(1);
        assert_eq!(round(false, &[2, 5], 0, sd, RoundingMode::HalfUp), (vec![3], 1));
        assert_eq!(round(false, &[2, 5], 0, sd, RoundingMode::HalfDown), (vec![2], 1));
        assert_eq!(round(false, &[2, 5], 0, sd, RoundingMode::HalfEven), (vec![2], 1));
        assert_eq!(round(false, &[3, 5], 0, sd, RoundingMode::HalfEven), (vec![4], 1));
    }

    #[test]
    fn directed_modes_follow_sign() {
        let sd = RoundTarget::SignificantDigits(1);
        assert_eq!(round(false, &[2, 1], 0, sd, RoundingMode::Ceil), (vec![3], 1));
        assert_eq!(round(true, &[2, 1], 0, sd, RoundingMode::Ceil), (vec![2], 1));
        assert_eq!(round(true, &[2, 1], 0, sd, RoundingMode::Floor), (vec![3], 1));
        assert_eq!(round(true, &[2, 9], 0, sd, RoundingMode::Down), (vec![2], 1));
        assert_eq!(round(false, &[2, 1], 0, sd, RoundingMode::Up), (vec![3], 1));
    }

    #[test]
    fn carry_prepends_a_digit() {
        let sd = RoundTarget::SignificantDigits(2);
        assert_eq!(round(false, &[9, 9, 9], -2, sd, RoundingMode::HalfUp), (vec![1], 1));
    }

    #[test]
    fn decimal_places_past_the_digits() {
        // 0.004 rounded to 1 decimal place
        let dp = RoundTarget::DecimalPlaces(1);
        assert_eq!(round(false, &[4], -3, dp, RoundingMode::HalfUp), (vec![0], 0));
        assert_eq!(round(false, &[4], -3, dp, RoundingMode::Up), (vec![1], -1));
        assert_eq!(round(false, &[1, 2, 5], -2, dp, RoundingMode::HalfEven), (vec![1, 2], -1));
    }

    #[test]
    fn nothing_to_remove_is_untouched() {
        let sd = RoundTarget::SignificantDigits(5);
        assert_eq!(round(false, &[1, 2, 3], 4, sd, RoundingMode::Unnecessary),
                   (vec![1, 2, 3], 4));
    }

    #[test]
    #[should_panic(expected = "RoundingMode.Unnecessary")]
    fn unnecessary_panics_when_digits_are_lost() {
        let _ = round(false,
                      &[1, 2, 3],
                      0,
                      RoundTarget::SignificantDigits(2),
                      RoundingMode::Unnecessary);
    }
}
