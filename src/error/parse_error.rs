use thiserror::Error;

/// Result type used by the lexer and the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong while reading the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// No lexer rule matches the character.
    #[error("Unrecognized char")]
    UnrecognizedChar,
    /// A closing bracket was expected but not found.
    #[error("Expected \"{0}\"")]
    Expected(char),
    /// An exponent that is neither bracketed nor a plain symbol run.
    #[error("Use curly or round brackets.")]
    ExponentBrackets,
    /// Unknown decorated function name or wrong number of `{}` groups.
    #[error("Invalid decorated function.")]
    InvalidDecoratedFunction,
    /// A matrix literal without rows.
    #[error("Invalid rows.")]
    InvalidRows,
    /// A matrix row without cells.
    #[error("Invalid cols.")]
    InvalidCols,
    /// The rows of a matrix literal have different cell counts.
    #[error("Matrix row lengths vary.")]
    MatrixRowLengthsVary,
    /// Input left over after a complete expression.
    #[error("Unexpected \"{0}\"")]
    UnexpectedToken(String),
}

/// A lexing or parsing failure.
///
/// Renders as the error message, the offending input line and a caret under
/// the column where the problem was detected.
///
/// # Example
/// ```
/// use bigcalc::parse_expression;
///
/// let err = parse_expression("1+§").unwrap_err();
/// assert_eq!(err.to_string(), "[Error Pos 2]: Unrecognized char\n1+§\n  ^");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[Error Pos {column}]: {kind}\n{input}\n{}^", pad(.column))]
pub struct ParseError {
    pub kind:   ParseErrorKind,
    /// The complete input text.
    pub input:  String,
    /// Zero based character column of the problem.
    pub column: usize,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, input: &str, column: usize) -> Self {
        Self { kind,
               input: input.to_string(),
               column }
    }
}

fn pad(column: &usize) -> String {
    " ".repeat(*column)
}
