/// Checked conversions between [`BigNumber`](crate::bigmath::BigNumber) and
/// machine integers.
///
/// Every conversion returns a `Result` so that callers can decide which error
/// a value out of range turns into.
pub mod num;
/// Wall clock measurement for the evaluator's cooperative yield throttle.
pub mod stopwatch;
