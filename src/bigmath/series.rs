use crate::bigmath::{BigNumber, MathContext, RoundingMode};

/// Iterations after which a series is considered divergent.
const MAX_STEPS: usize = 2500;

/// Term generator of a power series
/// `Σ sign·(x - x_sub)^exponent / divisor`.
///
/// Starting from `sign_0`, `exp_0` and `div_0`, every step multiplies the
/// sign by `sign_mul`, adds `exp_add` to the exponent and advances the
/// divisor by `div_add`, either additively or as a running factorial.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesParams {
    pub name:            &'static str,
    /// Below this argument the series converges slowly or loses precision.
    pub safe_min_x:      f64,
    /// Above this argument the series converges slowly or loses precision.
    pub safe_max_x:      f64,
    /// Guard digits carried while summing.
    pub error_digits:    usize,
    pub x_sub:           i64,
    pub sign_0:          i8,
    pub sign_mul:        i8,
    pub exp_0:           i64,
    pub exp_add:         i64,
    pub div_0:           i64,
    pub div_add:         i64,
    pub div_is_factorial: bool,
}

/// Sums a series to the precision of `mc`.
///
/// The sum runs with guard digits until two partial sums are equal. When the
/// largest term dwarfs the result by more orders of magnitude than there are
/// guard digits, the sum is redone with that many guard digits.
///
/// # Panics
/// Panics when the series has not converged after 2500 terms.
pub(crate) fn sum_series(params: &SeriesParams, x: &BigNumber, mc: &MathContext) -> BigNumber {
    sum_series_with(params, x, mc, params.error_digits)
}

fn sum_series_with(params: &SeriesParams,
                   x: &BigNumber,
                   mc_arg: &MathContext,
                   error_digits: usize)
                   -> BigNumber {
    if x.lt(&BigNumber::from_f64(params.safe_min_x, mc_arg), mc_arg)
       || x.gt(&BigNumber::from_f64(params.safe_max_x, mc_arg), mc_arg)
    {
        log::info!("Series iterator: {}({x}) exceeded safe limits.", params.name);
    }

    let mc = mc_arg.with_precision(mc_arg.precision().extended(error_digits), RoundingMode::HalfEven);

    let base_x = x.sub(&BigNumber::from_i64(params.x_sub, &mc), &mc);
    let mut power = base_x.pow(&BigNumber::from_i64(params.exp_0, &mc), &mc);
    let power_mul = base_x.pow(&BigNumber::from_i64(params.exp_add, &mc), &mc);

    let mut div_n = BigNumber::from_i64(params.div_0, &mc);
    let mut div = if params.div_is_factorial { div_n.factorial(&mc) } else { div_n.clone() };
    let div_add = BigNumber::from_i64(params.div_add, &mc);
    let one = BigNumber::one(&mc);

    let mut sign_negative = params.sign_0 < 0;
    let mut result = BigNumber::zero(false, &mc);
    let mut biggest = BigNumber::zero(false, &mc);
    let mut steps = 0;

    loop {
        let term = power.div(&div, &mc).mul_sign(sign_negative);

        if term.abs().gt(&biggest, &mc) {
            biggest = term.abs();
        }

        let next = result.add(&term, &mc);

        steps += 1;
        assert!(steps <= MAX_STEPS,
                "Series iterator: {}({x}) reached max steps {MAX_STEPS}.",
                params.name);

        if next.equals(&result, &mc) {
            result = next;
            break;
        }
        result = next;

        if params.sign_mul < 0 {
            sign_negative = !sign_negative;
        }

        power = power.mul(&power_mul, &mc);

        if params.div_is_factorial {
            for _ in 0..params.div_add {
                div_n = div_n.add(&one, &mc);
                div = div.mul(&div_n, &mc);
            }
        } else {
            div_n = div_n.add(&div_add, &mc);
            div = div_n.clone();
        }
    }

    log::trace!("Series iterator: {}({x}) converged after {steps} steps.", params.name);

    let error = match (biggest.sci_exponent(), result.sci_exponent()) {
        (Some(b), Some(r)) => usize::try_from(b - r).unwrap_or(0),
        _ => 0,
    };

    if error > error_digits {
        log::info!("Series iterator: {}({x}), recalc with {error} error digits.", params.name);
        return sum_series_with(params, x, mc_arg, error);
    }

    result.convert(mc_arg)
}
