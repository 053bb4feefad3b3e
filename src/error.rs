/// Parsing errors.
///
/// Defines the errors raised while tokenizing and parsing calculator input.
/// Every parse error points at a character column of the input line.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the user facing errors raised while evaluating an expression, the
/// syntax error codes, the argument count policies reported by arity errors
/// and the [`EvalFailure`] channel that also carries cancellation.
pub mod eval_error;

pub use eval_error::{ArgCount, EvalError, EvalErrorKind, EvalFailure, EvalOutcome, SyntaxErrorCode};
pub use parse_error::{ParseError, ParseErrorKind, ParseResult};
