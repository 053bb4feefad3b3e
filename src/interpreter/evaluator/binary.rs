/// Term and factor operators.
///
/// `+`, `-`, `*`, `/` and `%` on numbers, elementwise and scalar forms on
/// matrices, and the dot product of two vectors.
pub mod core;
/// Matrix products and the functions built on the determinant.
///
/// # Responsibilities
/// - Matrix product for `⨯`.
/// - Determinant by cofactor expansion along the first row.
/// - Adjugate and inverse.
pub mod matmul;
/// Exponentiation of numbers and square matrices.
pub mod power;
