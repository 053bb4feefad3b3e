use once_cell::sync::Lazy;

use crate::bigmath::{BigNumber, MathContext, Precision, RoundingMode};

/// Digits the constants are stored with. Trigonometric range reduction cannot
/// work beyond this precision.
pub const CONSTANT_DIGITS: usize = 100;

/// Context the constants are stored in.
pub static CONSTANT_MC: Lazy<MathContext> =
    Lazy::new(|| MathContext::new(10, Precision::Digits(CONSTANT_DIGITS), RoundingMode::HalfUp));

/// Euler's number.
pub static E: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("2.71828182845904523536028747135266249775724709369995957496696762772407663035354759457138217852516642743",
                     &CONSTANT_MC)
});

/// Natural logarithm of two.
pub static LN2: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("0.693147180559945309417232121458176568075500134360255254120680009493393621969694715605863326996418687542",
                     &CONSTANT_MC)
});

/// π.
pub static PI: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("3.14159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798",
                     &CONSTANT_MC)
});

/// 2π.
pub static TWO_PI: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("6.28318530717958647692528676655900576839433879875021164194988918461563281257241799725606965068423413596",
                     &CONSTANT_MC)
});

/// π/2.
pub static PI_DIV2: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("1.57079632679489661923132169163975144209858469968755291048747229615390820314310449931401741267105853399",
                     &CONSTANT_MC)
});

/// π/4.
pub static PI_DIV4: Lazy<BigNumber> = Lazy::new(|| {
    BigNumber::parse("0.785398163397448309615660845819875721049292349843776455243736148076954101571552249657008706335529266996",
                     &CONSTANT_MC)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        let mc = *CONSTANT_MC;
        let two = BigNumber::from_i64(2, &mc);

        assert_eq!(E.digit_count(), Some(CONSTANT_DIGITS));
        assert!(PI.mul(&two, &mc).equals(&TWO_PI, &mc));
        assert!(PI.div(&two, &mc).equals(&PI_DIV2, &mc));
        assert!(PI_DIV2.div(&two, &mc).equals(&PI_DIV4, &mc));
    }
}
