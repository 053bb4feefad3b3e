/// Evaluation results.
///
/// Defines [`EvalValue`](core::EvalValue), the value of an expression, and
/// [`EvalDeclValue`](core::EvalDeclValue), one element of a comma separated
/// list which may also be a declaration.
pub mod core;
/// The matrix value type.
///
/// A rectangular, row-major grid of values with the shape operations the
/// matrix built-ins are written in terms of.
pub mod matrix;
