use crate::{
    error::{ArgCount, EvalErrorKind, EvalOutcome, SyntaxErrorCode},
    interpreter::{
        evaluator::{
            function::{builtin, choose, clamp, divisor, log, min_max, random, sqrt, transpose, trig, trunc},
            state::EvalState,
        },
        value::core::EvalValue,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments, already checked against its
/// [`ArgCount`], and the evaluation state.
type BuiltinFn = fn(&[EvalValue], &EvalState) -> EvalOutcome<EvalValue>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an argument count policy,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                args: $args:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name: &'static str,
            args: ArgCount,
            func: BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, args: $args, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "ans"         => { args: ArgCount::Fixed(1), func: builtin::ans },
    "frac"        => { args: ArgCount::Fixed(2), func: builtin::frac },
    "abs"         => { args: ArgCount::Fixed(1), func: builtin::abs },
    "sgn"         => { args: ArgCount::Fixed(1), func: builtin::sgn },
    "exp"         => { args: ArgCount::Fixed(1), func: builtin::exp },
    "sqrt"        => { args: ArgCount::Fixed(1), func: sqrt::sqrt },
    "nthroot"     => { args: ArgCount::Fixed(2), func: sqrt::nthroot },
    "log"         => { args: ArgCount::Range(1, 2), func: log::log },
    "ln"          => { args: ArgCount::Fixed(1), func: builtin::ln },
    "sin"         => { args: ArgCount::Fixed(1), func: trig::sin },
    "cos"         => { args: ArgCount::Fixed(1), func: trig::cos },
    "tan"         => { args: ArgCount::Fixed(1), func: trig::tan },
    "asin"        => { args: ArgCount::Fixed(1), func: trig::asin },
    "acos"        => { args: ArgCount::Fixed(1), func: trig::acos },
    "atan"        => { args: ArgCount::Range(1, 2), func: trig::atan },
    "sinh"        => { args: ArgCount::Fixed(1), func: trig::sinh },
    "cosh"        => { args: ArgCount::Fixed(1), func: trig::cosh },
    "tanh"        => { args: ArgCount::Fixed(1), func: trig::tanh },
    "asinh"       => { args: ArgCount::Fixed(1), func: trig::asinh },
    "acosh"       => { args: ArgCount::Fixed(1), func: trig::acosh },
    "atanh"       => { args: ArgCount::Fixed(1), func: trig::atanh },
    "gcd"         => { args: ArgCount::AtLeast(2), func: divisor::gcd },
    "lcm"         => { args: ArgCount::AtLeast(2), func: divisor::lcm },
    "permutation" => { args: ArgCount::Fixed(2), func: choose::permutation },
    "combination" => { args: ArgCount::Fixed(2), func: choose::combination },
    "transpose"   => { args: ArgCount::Fixed(1), func: transpose::transpose },
    "det"         => { args: ArgCount::Fixed(1), func: transpose::det },
    "min"         => { args: ArgCount::AtLeast(1), func: |args, state| min_max::min_max("min", args, state) },
    "max"         => { args: ArgCount::AtLeast(1), func: |args, state| min_max::min_max("max", args, state) },
    "clamp"       => { args: ArgCount::Fixed(3), func: clamp::clamp },
    "rnd"         => { args: ArgCount::Range(1, 2), func: random::rnd },
    "rndint"      => { args: ArgCount::Range(1, 2), func: random::rndint },
    "round"       => { args: ArgCount::Range(1, 2), func: trunc::round },
    "floor"       => { args: ArgCount::Fixed(1), func: trunc::floor },
    "ceil"        => { args: ArgCount::Fixed(1), func: trunc::ceil },
    "trunc"       => { args: ArgCount::Fixed(1), func: trunc::trunc },
}

/// Tests whether `name` is a builtin function.
#[must_use]
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Evaluates a function call.
///
/// A user function declared under `name` takes precedence over the builtin
/// of the same name. Builtins check the argument count against their
/// policy before running.
///
/// # Errors
/// - `UndeclaredFunction` if neither a user function nor a builtin is
///   called `name`.
/// - `InvalidFunctionArgumentCount` for a wrong number of arguments.
/// - Any error of the function itself.
pub fn evaluate_function(name: &str, args: Vec<EvalValue>, state: &mut EvalState) -> EvalOutcome<EvalValue> {
    if let Some(decl) = state.get_function(name) {
        return decl.call(args, state);
    }

    let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) else {
        return Err(state.syntax_error(SyntaxErrorCode::UndeclaredFunction, Some(name.to_string())));
    };
    if !builtin.args.admits(args.len()) {
        return Err(state.error(EvalErrorKind::InvalidFunctionArgumentCount { function: name.to_string(),
                                                                             required: builtin.args,
                                                                             given:    args.len(), }));
    }
    (builtin.func)(&args, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{BigNumber, MathContext, RoundingMode},
        error::EvalFailure,
    };

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    fn num(state: &EvalState, n: i64) -> EvalValue {
        BigNumber::from_i64(n, state.mc()).into()
    }

    #[test]
    fn table_and_name_list_agree() {
        assert_eq!(BUILTIN_TABLE.len(), BUILTIN_FUNCTIONS.len());
        assert!(is_builtin_function("combination"));
        assert!(!is_builtin_function("choose"));
    }

    #[test]
    fn argument_count_is_checked() {
        let mut state = state();
        let args = vec![num(&state, 1), num(&state, 2), num(&state, 3)];
        let Err(EvalFailure::Error(err)) = evaluate_function("log", args, &mut state) else {
            panic!("expected an error")
        };
        assert_eq!(err.to_string(),
                   "Invalid argument count for \"log\", from 1 to 2 required, 3 given (in line 1)");
    }

    #[test]
    fn unknown_function() {
        let mut state = state();
        let Err(EvalFailure::Error(err)) = evaluate_function("nope", vec![], &mut state) else {
            panic!("expected an error")
        };
        assert_eq!(err.kind,
                   EvalErrorKind::SyntaxError(SyntaxErrorCode::UndeclaredFunction, Some("nope".to_string())));
    }

    #[test]
    fn builtins_run() {
        let mut state = state();
        let args = vec![num(&state, 12), num(&state, 18), num(&state, 8)];
        assert_eq!(evaluate_function("gcd", args, &mut state).unwrap(), num(&state, 2));
    }
}
