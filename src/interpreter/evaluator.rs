/// Binary operator evaluation logic.
///
/// Handles the arithmetic operators on numbers and matrices, including the
/// matrix product, determinant and inverse.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, factorial, double factorial and transpose.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the recursive descent over a flat node list, the handling of
/// declarations and comma separated lists, and the evaluation of decorated
/// nodes.
pub mod core;

/// Evaluation state of one line.
///
/// # Responsibilities
/// - Holds the declarations visible to the line and its local frames.
/// - Carries the interrupt flag and the yield throttle.
/// - Builds errors with line and function context.
pub mod state;

/// Stepwise execution with cooperative interruption.
pub mod task;

/// Variable and user function declarations.
pub mod declaration;

/// Evaluation of `summation` and `product`.
pub mod series;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
