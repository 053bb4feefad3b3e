use std::fmt;

use thiserror::Error;

use crate::bigmath::base_name;

/// Result type threaded through the evaluator.
pub type EvalOutcome<T> = Result<T, EvalFailure>;

/// Sub-codes of [`EvalErrorKind::SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorCode {
    UnexpectedData,
    ExpectedValueList,
    ExpectedSingleValue,
    EmptyExpression,
    InadequateExpression,
    InvalidDeclaration,
    InvalidValue,
    InvalidOperator,
    InvalidVariableName,
    InvalidFunctionName,
    InvalidFunctionParameters,
    UndeclaredVariable,
    UndeclaredFunction,
    DeclaringReservedWord,
    SyntaxCheckFailed,
}

impl SyntaxErrorCode {
    /// The code as a sentence, e.g. `Undeclared variable`.
    #[must_use]
    pub const fn sentence(self) -> &'static str {
        match self {
            Self::UnexpectedData => "Unexpected data",
            Self::ExpectedValueList => "Expected value list",
            Self::ExpectedSingleValue => "Expected single value",
            Self::EmptyExpression => "Empty expression",
            Self::InadequateExpression => "Inadequate expression",
            Self::InvalidDeclaration => "Invalid declaration",
            Self::InvalidValue => "Invalid value",
            Self::InvalidOperator => "Invalid operator",
            Self::InvalidVariableName => "Invalid variable name",
            Self::InvalidFunctionName => "Invalid function name",
            Self::InvalidFunctionParameters => "Invalid function parameters",
            Self::UndeclaredVariable => "Undeclared variable",
            Self::UndeclaredFunction => "Undeclared function",
            Self::DeclaringReservedWord => "Declaring reserved word",
            Self::SyntaxCheckFailed => "Syntax check failed",
        }
    }
}

impl fmt::Display for SyntaxErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgCount {
    /// Exactly `n`.
    Fixed(usize),
    /// `n` or more.
    AtLeast(usize),
    /// From `min` to `max`, inclusive.
    Range(usize, usize),
}

impl ArgCount {
    /// Tests whether `n` arguments satisfy this policy.
    ///
    /// # Example
    /// ```
    /// use bigcalc::error::ArgCount;
    ///
    /// assert!(ArgCount::Range(1, 2).admits(2));
    /// assert!(!ArgCount::AtLeast(2).admits(1));
    /// ```
    #[must_use]
    pub const fn admits(self, n: usize) -> bool {
        match self {
            Self::Fixed(m) => n == m,
            Self::AtLeast(min) => n >= min,
            Self::Range(min, max) => n >= min && n <= max,
        }
    }
}

impl fmt::Display for ArgCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::Range(min, max) => write!(f, "from {min} to {max}"),
        }
    }
}

/// The category of an [`EvalError`] and its details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    /// Malformed expression, bad declaration or unknown name.
    #[error("{}", syntax_message(.0, .1))]
    SyntaxError(SyntaxErrorCode, Option<String>),
    /// Invalid numeric operation or mismatched operand types.
    #[error("Math Error{}", detail_suffix(.0))]
    MathError(Option<String>),
    /// A literal that does not parse in the working base.
    #[error("Invalid number \"{number}\" in {}", long_base_name(.base))]
    InvalidNumber {
        number: String,
        base:   u32,
    },
    /// A function called with the wrong number of arguments.
    #[error("Invalid argument count for \"{function}\", {required} required, {given} given")]
    InvalidFunctionArgumentCount {
        function: String,
        required: ArgCount,
        given:    usize,
    },
}

fn syntax_message(code: &SyntaxErrorCode, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{code} \"{detail}\""),
        None => code.to_string(),
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map_or_else(String::new, |d| format!(" ({d})"))
}

fn long_base_name(base: &u32) -> String {
    base_name(*base, true)
}

/// A recoverable, user facing evaluation error.
///
/// Carries the line it happened on and, outside of syntax checks, the
/// innermost user function being evaluated.
///
/// # Example
/// ```
/// use bigcalc::error::{EvalError, EvalErrorKind, SyntaxErrorCode};
///
/// let err = EvalError { kind:     EvalErrorKind::SyntaxError(SyntaxErrorCode::UndeclaredVariable,
///                                                            Some("y".to_string())),
///                       line:     3,
///                       function: Some("f".to_string()), };
/// assert_eq!(err.to_string(), "Undeclared variable \"y\" (in line 3 in function \"f\")");
/// assert_eq!(err.message(), "Undeclared variable \"y\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", location(.line, .function))]
pub struct EvalError {
    pub kind:     EvalErrorKind,
    /// One based line number.
    pub line:     usize,
    pub function: Option<String>,
}

impl EvalError {
    /// The error message without line or function context.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

fn location(line: &usize, function: &Option<String>) -> String {
    match function {
        Some(function) => format!(" (in line {line} in function \"{function}\")"),
        None => format!(" (in line {line})"),
    }
}

/// Why an evaluation produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalFailure {
    /// Cancelled through an interrupt request. Not an error.
    #[error("Interrupted")]
    Interrupted,
    #[error(transparent)]
    Error(#[from] EvalError),
}

impl EvalFailure {
    /// The error, unless the evaluation was interrupted.
    #[must_use]
    pub const fn as_error(&self) -> Option<&EvalError> {
        match self {
            Self::Interrupted => None,
            Self::Error(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_line(kind: EvalErrorKind) -> EvalError {
        EvalError { kind,
                    line: 1,
                    function: None }
    }

    #[test]
    fn math_error_messages() {
        assert_eq!(at_line(EvalErrorKind::MathError(None)).to_string(), "Math Error (in line 1)");
        assert_eq!(at_line(EvalErrorKind::MathError(Some("det".to_string()))).message(),
                   "Math Error (det)");
    }

    #[test]
    fn syntax_error_without_detail() {
        let err = at_line(EvalErrorKind::SyntaxError(SyntaxErrorCode::EmptyExpression, None));
        assert_eq!(err.message(), "Empty expression");
    }

    #[test]
    fn invalid_number_names_the_base() {
        let err = at_line(EvalErrorKind::InvalidNumber { number: "2a".to_string(),
                                                         base:   10, });
        assert_eq!(err.message(), "Invalid number \"2a\" in Decimal");
    }

    #[test]
    fn argument_count_policies() {
        let err = |required: ArgCount| {
            at_line(EvalErrorKind::InvalidFunctionArgumentCount { function: "f".to_string(),
                                                                  required,
                                                                  given: 0 }).message()
        };
        assert_eq!(err(ArgCount::Fixed(2)),
                   "Invalid argument count for \"f\", 2 required, 0 given");
        assert_eq!(err(ArgCount::AtLeast(1)),
                   "Invalid argument count for \"f\", at least 1 required, 0 given");
        assert_eq!(err(ArgCount::Range(1, 2)),
                   "Invalid argument count for \"f\", from 1 to 2 required, 0 given");
    }

    #[test]
    fn interrupted_is_not_an_error() {
        assert!(EvalFailure::Interrupted.as_error().is_none());
    }
}
