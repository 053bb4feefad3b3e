/// The evaluator module executes node lists and computes results.
///
/// The evaluator walks the flat node list of an expression by recursive
/// descent, applies operators and functions to numbers and matrices, manages
/// declarations and local frames, and yields cooperatively so long
/// computations can be interrupted.
///
/// # Responsibilities
/// - Evaluates expressions, comma separated lists and declarations.
/// - Dispatches user functions and builtins.
/// - Reports evaluation errors with line and function context.
pub mod evaluator;
/// The lexer module tokenizes calculator input.
///
/// The lexer reads the raw input line and produces a stream of tokens such
/// as symbol runs, operators, brackets and the decorated function markers.
/// This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their columns.
/// - Reports unrecognized characters.
pub mod lexer;
/// The parser module builds node lists from tokens.
///
/// The parser processes the token stream produced by the lexer and builds
/// the flat [`Expression`](crate::ast::Expression) of a line, nesting only
/// inside brackets, exponents and decorated functions.
///
/// # Responsibilities
/// - Converts tokens into nodes.
/// - Validates brackets, decorated functions and matrix shapes, reporting
///   errors with their column.
pub mod parser;
/// Line by line evaluation for hosts.
///
/// # Responsibilities
/// - Chains the per-line states and records every line's answer.
/// - Separates the evaluation and display number formats.
/// - Owns the interrupt flag shared with the evaluation.
pub mod session;
/// The value module defines the results of evaluation.
///
/// # Responsibilities
/// - Defines numbers, matrices and the syntax check placeholder.
/// - Formats values for display.
pub mod value;
