/// Token cursor and the expression grammar.
///
/// Contains the main expression loop, bracket handling, exponents and the
/// entry points for whole input lines.
pub mod core;
/// Decorated functions and matrix literals.
///
/// Builds `frac`, `abs`, `floor`, `ceil`, `sqrt`, `nthroot`, `log`,
/// `summation` and `product` nodes from their `{}` argument groups and
/// validates the shape of matrix literals.
pub mod decorated;
/// Lexical classification of symbol runs.
///
/// Tells number literals from names and lists the reserved words.
pub mod utils;
