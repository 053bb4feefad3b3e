/// Elementary functions of one number.
///
/// Contains `ans`, `frac`, `abs`, `sgn`, `exp` and `ln`.
pub mod builtin;
/// `permutation` and `combination`.
pub mod choose;
/// The `clamp` function implementation.
///
/// Restricts a value to a specified inclusive range.
pub mod clamp;
/// Function lookup and dispatch.
///
/// # Responsibilities
/// - Registers every builtin with its argument count policy.
/// - Resolves calls to user functions before builtins.
pub mod core;
/// `gcd` and `lcm` of integer lists.
pub mod divisor;
/// Logarithm in base ten or an arbitrary base.
pub mod log;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;
/// Uniform random numbers and integers.
pub mod random;
/// Square roots and n-th roots.
pub mod sqrt;
/// `transpose` and `det` on matrices.
pub mod transpose;
/// Circular and hyperbolic functions and their inverses.
pub mod trig;
/// `trunc`, `floor`, `ceil` and `round`.
pub mod trunc;
