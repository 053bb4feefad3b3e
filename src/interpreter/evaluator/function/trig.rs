use crate::{
    bigmath::{BigNumber, MathContext},
    error::EvalOutcome,
    interpreter::{
        evaluator::{
            binary::core::div,
            state::EvalState,
            utils::{number_fn1, number_fn2, try_number_fn1, validate_result},
        },
        value::core::EvalValue,
    },
};

/// Largest magnitude `sin` and `cos` accept, in radians.
const MAX_PERIODIC_ARGUMENT: i64 = 99_999_999;

/// Results of `sin` and `cos` smaller than this are reported as zero.
const ZERO_THRESHOLD: f64 = 1e-20;

/// Shared body of `sin` and `cos`.
///
/// The argument reduction loses the period for huge inputs, so those are
/// rejected; results that are zero up to rounding noise become a zero of
/// the same sign.
fn periodic(x: &EvalValue,
            state: &EvalState,
            f: fn(&BigNumber, &MathContext) -> BigNumber)
            -> EvalOutcome<EvalValue> {
    let mc = state.mc();
    try_number_fn1(x, state, |x| {
        if x.abs().gt(&BigNumber::from_i64(MAX_PERIODIC_ARGUMENT, mc), mc) {
            return None;
        }
        let r = f(x, mc);
        if r.abs().lt(&BigNumber::from_f64(ZERO_THRESHOLD, mc), mc) {
            Some(BigNumber::zero(r.is_negative(), mc))
        } else {
            Some(r)
        }
    })
}

/// Sine of an angle in radians.
///
/// # Errors
/// Math error for a non-number or an argument beyond `±99999999`.
pub fn sin(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    periodic(&args[0], state, BigNumber::sin)
}

/// Cosine of an angle in radians.
///
/// # Errors
/// Math error for a non-number or an argument beyond `±99999999`.
pub fn cos(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    periodic(&args[0], state, BigNumber::cos)
}

/// Tangent as `sin(x) / cos(x)`, so that `tan(pi/2)` is infinite rather
/// than a huge finite number.
///
/// # Errors
/// Math error as for [`sin`], or if the quotient is NaN.
pub fn tan(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    let s = sin(args, state)?;
    let c = cos(args, state)?;
    validate_result(div(&s, &c, state)?, state)
}

/// `atan(x)`, or `atan(y, x)` for the angle of the point `(x, y)`.
pub fn atan(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
    let mc = state.mc();
    match args {
        [y, x] => number_fn2(y, x, state, |y, x| BigNumber::atan2(y, x, mc)),
        _ => number_fn1(&args[0], state, |x| x.atan(mc)),
    }
}

macro_rules! inverse_and_hyperbolic {
    ($($fname:ident),* $(,)?) => {
        $(
            pub fn $fname(args: &[EvalValue], state: &EvalState) -> EvalOutcome<EvalValue> {
                number_fn1(&args[0], state, |x| x.$fname(state.mc()))
            }
        )*
    };
}

inverse_and_hyperbolic!(asin, acos, sinh, cosh, tanh, asinh, acosh, atanh);
