use std::{cell::RefCell, rc::Rc};

use thiserror::Error;

use crate::{
    bigmath::{MathContext, Notation, RoundingMode},
    error::{EvalFailure, ParseError},
    interpreter::{
        evaluator::{
            declaration::Declaration,
            state::{EvalState, InterruptHandle, QueryLineAns, YieldHook},
        },
        parser::core::parse_calculation_text,
        value::core::{EvalDeclValue, EvalValue},
    },
};

/// Number formats of a [`Session`].
///
/// Evaluation and display use separate contexts: values are computed in
/// `eval_mc` and converted to `display_mc` only when formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub eval_mc:    MathContext,
    pub display_mc: MathContext,
    pub notation:   Notation,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { eval_mc:    MathContext::decimal(30, RoundingMode::HalfUp),
               display_mc: MathContext::decimal(10, RoundingMode::HalfUp),
               notation:   Notation::UserFriendly, }
    }
}

/// Why a line produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalFailure),
}

/// Answers of the evaluated lines, `None` for lines without one.
#[derive(Debug, Default)]
struct History(RefCell<Vec<Option<EvalValue>>>);

impl QueryLineAns for History {
    fn query_line_ans(&self, line: usize) -> Option<EvalValue> {
        let answers = self.0.borrow();
        line.checked_sub(1).and_then(|i| answers.get(i)).cloned().flatten()
    }
}

/// A sequence of calculation lines sharing their declarations.
///
/// Every line is evaluated in a new [`EvalState`] derived from the previous
/// line's, so declarations flow downward, and `ans(N)` reads the answer of
/// line `N` from the session's history.
///
/// # Example
/// ```
/// use bigcalc::interpreter::session::{Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default());
/// session.evaluate_line("r:=2").unwrap();
/// let values = session.evaluate_line("r^10").unwrap();
///
/// assert_eq!(session.format_line(&values), "1024");
/// ```
pub struct Session {
    config:     SessionConfig,
    prev:       Option<EvalState>,
    history:    Rc<History>,
    interrupt:  InterruptHandle,
    yield_hook: Option<YieldHook>,
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config,
               prev: None,
               history: Rc::default(),
               interrupt: InterruptHandle::default(),
               yield_hook: None }
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number the next evaluated line gets.
    #[must_use]
    pub fn next_line_number(&self) -> usize {
        self.prev.as_ref().map_or(1, |prev| prev.line_number() + 1)
    }

    /// Handle that cancels the line being evaluated.
    ///
    /// The request is cleared once the interrupted line has returned.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Sets the hook called at every cooperative yield of later lines.
    pub fn set_yield_hook(&mut self, hook: Option<YieldHook>) {
        self.yield_hook = hook;
    }

    /// Parses and evaluates one line.
    ///
    /// A blank line has no values but still takes a line number. The line's
    /// state becomes the parent of the next line also when evaluation fails,
    /// keeping the declarations made before the failure.
    ///
    /// # Errors
    /// - [`LineError::Parse`] if the line is not a calculation.
    /// - [`LineError::Eval`] if evaluation fails or is interrupted.
    pub fn evaluate_line(&mut self, text: &str) -> Result<Vec<EvalDeclValue>, LineError> {
        let line_ans: Rc<dyn QueryLineAns> = self.history.clone();
        let mut state = EvalState::new(self.prev.as_ref(), Some(line_ans), self.config.eval_mc)
                            .with_interrupt(self.interrupt.clone())
                            .with_yield_hook(self.yield_hook.clone());

        let outcome = if text.trim().is_empty() {
            Ok(Vec::new())
        } else {
            parse_calculation_text(text).map_err(LineError::from)
                                        .and_then(|calc| {
                                            calc.expression
                                                .execute_list(&mut state, true)
                                                .map_err(LineError::from)
                                        })
        };

        let line = state.line_number();
        match &outcome {
            Ok(values) => log::debug!("line {line}: {} value(s)", values.len()),
            Err(LineError::Eval(EvalFailure::Interrupted)) => {
                log::debug!("line {line}: interrupted");
                self.interrupt.reset();
            },
            Err(e) => log::debug!("line {line}: {e}"),
        }

        self.history.0.borrow_mut().push(state.own_ans().cloned());
        self.prev = Some(state);
        outcome
    }

    /// Formats a value in the display context and notation.
    #[must_use]
    pub fn format_value(&self, value: &EvalValue) -> String {
        value.format(&self.config.display_mc, self.config.notation)
    }

    /// Formats the values of a line, comma separated.
    ///
    /// Variable declarations show as `name := value`, function declarations
    /// as their signature.
    #[must_use]
    pub fn format_line(&self, values: &[EvalDeclValue]) -> String {
        values.iter()
              .map(|value| match value {
                  EvalDeclValue::Value(v) => self.format_value(v),
                  EvalDeclValue::Declaration(Declaration::Variable { name, value }) => {
                      format!("{name} := {}", self.format_value(value))
                  },
                  EvalDeclValue::Declaration(Declaration::Function(f)) => {
                      format!("{}({})", f.name, f.params.join(","))
                  },
              })
              .collect::<Vec<_>>()
              .join(", ")
    }
}
