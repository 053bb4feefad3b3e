//! # bigcalc
//!
//! bigcalc is an arbitrary precision, arbitrary base expression calculator
//! written in Rust. It parses and evaluates calculator lines with support for
//! variables, user functions, matrices, series and decorated notations such
//! as `frac{1}{3}` and `√2`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::{Calculation, Expression},
    error::ParseResult,
    interpreter::{
        parser::core::{parse_calculation_text, parse_expression_text},
        session::{Session, SessionConfig},
        value::core::EvalDeclValue,
    },
};

/// Defines the structure of parsed input.
///
/// This module declares the [`Node`](ast::Node) enum and the containers that
/// hold a parsed line. An expression is a flat list of nodes; brackets,
/// exponents, matrices and decorated functions nest further lists.
///
/// # Responsibilities
/// - Defines the node kinds for every language construct.
/// - Renders nodes back to input text.
pub mod ast;
/// Arbitrary precision numbers in any base from 2 to 36.
///
/// This module implements the number engine the calculator is built on:
/// a decimal-style digit string number rounded to a
/// [`MathContext`](bigmath::MathContext) after every operation, together with
/// the transcendental functions and the text formats.
///
/// # Responsibilities
/// - Defines [`BigNumber`](bigmath::BigNumber) with NaN and signed infinity.
/// - Implements arithmetic, rounding, comparison and base conversion.
/// - Computes roots, powers, logarithms and trigonometric functions by
///   series to the working precision.
pub mod bigmath;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating a line. Parse errors carry the column of the problem;
/// evaluation errors carry the line and the user function they happened in.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Separates cancellation from errors in [`EvalFailure`](error::EvalFailure).
pub mod error;
/// Orchestrates the evaluation of calculator lines.
///
/// This module ties together lexing, parsing, evaluation and the value
/// types, and exposes the [`Session`] hosts drive line by line.
///
/// # Responsibilities
/// - Coordinates lexer, parser and evaluator.
/// - Manages the flow of declarations and answers between lines.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// # Responsibilities
/// - Convert between `BigNumber` and machine integers without silent data
///   loss.
/// - Measure elapsed time for the yield throttle.
pub mod util;

/// Parses an expression.
///
/// # Errors
/// Returns a parse error for invalid input, including a trailing `=`.
///
/// # Examples
/// ```
/// use bigcalc::parse_expression;
///
/// assert_eq!(parse_expression("2*(3+4)").unwrap().to_string(), "2*(3+4)");
/// assert!(parse_expression("1+1=2").is_err());
/// ```
pub fn parse_expression(text: &str) -> ParseResult<Expression> {
    parse_expression_text(text)
}

/// Parses a calculation: an expression optionally followed by `=` or `≈`
/// and result expressions.
///
/// # Errors
/// Returns a parse error for invalid input.
///
/// # Examples
/// ```
/// use bigcalc::parse_calculation;
///
/// let calc = parse_calculation("1+1=2").unwrap();
/// assert_eq!(calc.expression.to_string(), "1+1");
/// assert_eq!(calc.result().unwrap().to_string(), "2");
/// ```
pub fn parse_calculation(text: &str) -> ParseResult<Calculation> {
    parse_calculation_text(text)
}

/// Evaluates a script line by line and returns the formatted results.
///
/// All lines run in one fresh [`Session`] configured by `config`, so the
/// declarations of a line are visible to the lines after it. Lines that
/// produce exactly one value contribute its formatted text to the result.
///
/// # Errors
/// Returns the first parse or evaluation error.
///
/// # Examples
/// ```
/// use bigcalc::{get_result, interpreter::session::SessionConfig};
///
/// let source = "f(x):=x^2+1\nf(3)\nf(ans)";
/// let res = get_result(source, &SessionConfig::default()).unwrap();
/// assert_eq!(res, ["10", "101"]);
///
/// // Example with an intentional error (unknown variable).
/// let res = get_result("y := x + 1", &SessionConfig::default());
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, config: &SessionConfig) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut session = Session::new(*config);
    let mut results = Vec::new();

    for line in source.lines() {
        let values = session.evaluate_line(line)?;
        if let [EvalDeclValue::Value(value)] = values.as_slice() {
            results.push(session.format_value(value));
        }
    }

    Ok(results)
}
