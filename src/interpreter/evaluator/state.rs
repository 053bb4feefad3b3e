use std::{
    collections::HashMap,
    fmt,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{
    bigmath::{BigNumber, MathContext, constants},
    error::{EvalError, EvalErrorKind, EvalFailure, EvalOutcome, SyntaxErrorCode},
    interpreter::{
        evaluator::declaration::{Declaration, FunctionDeclaration},
        value::core::{EvalDeclValue, EvalValue},
    },
    util::stopwatch::Stopwatch,
};

/// Steps between two cooperative yields.
pub const YIELD_STEPS: u32 = 100;
/// Longest wall clock time between two cooperative yields.
pub const YIELD_INTERVAL: Duration = Duration::from_millis(100);

/// Name the latest saved answer is stored under.
pub const ANS: &str = "ans";

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a handle can be given to another thread
/// or to a yield hook while the evaluation owns the state.
///
/// # Example
/// ```
/// use bigcalc::interpreter::evaluator::state::InterruptHandle;
///
/// let handle = InterruptHandle::default();
/// let remote = handle.clone();
/// remote.request();
/// assert!(handle.is_requested());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle(Arc<AtomicBool>);

impl InterruptHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears a pending request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Looks up the answer of an earlier line for `ans(N)`.
pub trait QueryLineAns {
    /// The answer of the one based line `line`, if it produced one.
    fn query_line_ans(&self, line: usize) -> Option<EvalValue>;
}

/// Called at every cooperative yield point with the active interrupt handle.
pub type YieldHook = Rc<dyn Fn(&InterruptHandle)>;

/// Declared variables and functions of one scope.
#[derive(Debug, Clone, Default)]
pub struct Params {
    variables: HashMap<String, EvalValue>,
    functions: HashMap<String, Rc<FunctionDeclaration>>,
}

impl Params {
    pub fn set_variable(&mut self, name: &str, value: EvalValue) {
        self.variables.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&EvalValue> {
        self.variables.get(name)
    }

    pub fn set_function(&mut self, decl: Rc<FunctionDeclaration>) {
        self.functions.insert(decl.name.clone(), decl);
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Rc<FunctionDeclaration>> {
        self.functions.get(name)
    }
}

/// Scope of the line itself or of one user function call.
#[derive(Debug, Clone)]
struct FunctionState {
    globals: Params,
    /// Parameter frames, innermost last.
    locals:  Vec<HashMap<String, EvalValue>>,
    /// `None` for the line scope.
    name:    Option<String>,
    line:    usize,
}

impl FunctionState {
    fn local_variable(&self, name: &str) -> Option<&EvalValue> {
        self.locals.iter().rev().find_map(|frame| frame.get(name))
    }
}

/// Built-in constants, converted to the working context.
fn variable_constant(name: &str, mc: &MathContext) -> Option<BigNumber> {
    match name {
        "π" | "pi" => Some(constants::PI.convert(mc)),
        "e" => Some(constants::E.convert(mc)),
        "inf" => Some(BigNumber::infinity(false, mc)),
        _ => None,
    }
}

/// Evaluation state of one input line.
///
/// A state is created per line. It starts from a snapshot of the previous
/// line's declarations and is only mutated while its own line is evaluated.
///
/// # Responsibilities
/// - Resolves variables and functions through local frames, the declared
///   globals and the built-in constants.
/// - Tracks user function calls and the syntax check mode.
/// - Builds errors carrying the line number and the innermost function.
/// - Observes interrupt requests and throttles cooperative yields.
pub struct EvalState {
    mc:                 MathContext,
    function_state:     FunctionState,
    function_stack:     Vec<FunctionState>,
    syntax_check:       bool,
    syntax_check_stack: Vec<bool>,
    own_ans:            Option<EvalValue>,
    interrupt:          InterruptHandle,
    break_counter:      u32,
    break_stopwatch:    Stopwatch,
    yield_hook:         Option<YieldHook>,
    line_ans:           Option<Rc<dyn QueryLineAns>>,
}

impl fmt::Debug for EvalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalState")
         .field("mc", &self.mc)
         .field("line", &self.line_number())
         .field("syntax_check", &self.syntax_check)
         .field("own_ans", &self.own_ans)
         .finish_non_exhaustive()
    }
}

impl EvalState {
    /// Creates the state of the line after `prev`, or of line one.
    ///
    /// Declarations of `prev` are copied; later changes to either state do
    /// not affect the other.
    ///
    /// # Example
    /// ```
    /// use bigcalc::{
    ///     bigmath::{MathContext, RoundingMode},
    ///     interpreter::evaluator::state::EvalState,
    /// };
    ///
    /// let mc = MathContext::decimal(10, RoundingMode::HalfUp);
    /// let first = EvalState::new(None, None, mc);
    /// let second = EvalState::new(Some(&first), None, mc);
    /// assert_eq!(second.line_number(), 2);
    /// ```
    #[must_use]
    pub fn new(prev: Option<&Self>,
               line_ans: Option<Rc<dyn QueryLineAns>>,
               mc: MathContext)
               -> Self {
        let (globals, line) = prev.map_or_else(|| (Params::default(), 1), |prev| {
                                                   (prev.function_state.globals.clone(),
                                                    prev.function_state.line + 1)
                                               });

        Self { mc,
               function_state: FunctionState { globals,
                                               locals: Vec::new(),
                                               name: None,
                                               line },
               function_stack: Vec::new(),
               syntax_check: false,
               syntax_check_stack: Vec::new(),
               own_ans: None,
               interrupt: InterruptHandle::default(),
               break_counter: 0,
               break_stopwatch: Stopwatch::start(),
               yield_hook: None,
               line_ans }
    }

    /// Uses a shared interrupt flag instead of a private one.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptHandle) -> Self {
        self.interrupt = interrupt;
        self
    }

    #[must_use]
    pub fn with_yield_hook(mut self, hook: Option<YieldHook>) -> Self {
        self.yield_hook = hook;
        self
    }

    #[must_use]
    pub const fn mc(&self) -> &MathContext {
        &self.mc
    }

    /// Line number errors are reported with. Inside a user function it is
    /// the line the function was declared on.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.function_state.line
    }

    #[must_use]
    pub const fn is_syntax_check(&self) -> bool {
        self.syntax_check
    }

    /// The value saved as this line's answer, if any.
    #[must_use]
    pub const fn own_ans(&self) -> Option<&EvalValue> {
        self.own_ans.as_ref()
    }

    #[must_use]
    pub const fn interrupt_handle(&self) -> &InterruptHandle {
        &self.interrupt
    }

    pub fn request_interrupt(&self) {
        self.interrupt.request();
    }

    #[must_use]
    pub fn is_interrupt_requested(&self) -> bool {
        self.interrupt.is_requested()
    }

    /// Answer of an earlier line through the lookup given at construction.
    #[must_use]
    pub fn query_line_ans(&self, line: usize) -> Option<EvalValue> {
        self.line_ans.as_ref()?.query_line_ans(line)
    }

    /// Counts a step and tells whether it is time to yield.
    fn need_break(&mut self) -> bool {
        self.break_counter += 1;
        if self.break_counter >= YIELD_STEPS || self.break_stopwatch.exceeds(YIELD_INTERVAL) {
            self.break_counter = 0;
            self.break_stopwatch.restart();
            true
        } else {
            false
        }
    }

    /// Cooperative suspension point, reached after every evaluation step.
    ///
    /// # Errors
    /// Returns [`EvalFailure::Interrupted`] if an interrupt was requested
    /// before or during the yield.
    pub fn checkpoint(&mut self) -> EvalOutcome<()> {
        if self.is_interrupt_requested() {
            return Err(EvalFailure::Interrupted);
        }
        if self.need_break() {
            log::trace!("yield at line {}", self.line_number());
            if let Some(hook) = &self.yield_hook {
                hook(&self.interrupt);
            }
            if self.is_interrupt_requested() {
                return Err(EvalFailure::Interrupted);
            }
        }
        Ok(())
    }

    /// Resolves a variable: parameters innermost first, then the declared
    /// globals, then the built-in constants.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<EvalValue> {
        let fs = &self.function_state;
        fs.local_variable(name)
          .or_else(|| fs.globals.variable(name))
          .cloned()
          .or_else(|| variable_constant(name, &self.mc).map(EvalValue::Number))
    }

    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        self.function_state.globals.function(name).cloned()
    }

    /// Declarations visible in the current scope.
    #[must_use]
    pub const fn globals(&self) -> &Params {
        &self.function_state.globals
    }

    pub fn save_declaration(&mut self, decl: &Declaration) {
        let globals = &mut self.function_state.globals;
        match decl {
            Declaration::Variable { name, value } => globals.set_variable(name, value.clone()),
            Declaration::Function(decl) => globals.set_function(Rc::clone(decl)),
        }
    }

    /// Records a value as this line's answer and as the `ans` variable.
    /// Declarations are ignored.
    pub fn save_ans(&mut self, ans: &EvalDeclValue) {
        if let EvalDeclValue::Value(value) = ans {
            self.own_ans = Some(value.clone());
            self.function_state.globals.set_variable(ANS, value.clone());
        }
    }

    /// Runs `f` inside a call of `decl` with its parameters bound to `args`.
    ///
    /// The call scope starts from the declarations `decl` captured. The
    /// caller's scope is restored afterwards, also on error.
    pub fn with_function_call<T>(&mut self,
                                 decl: &FunctionDeclaration,
                                 args: Vec<EvalValue>,
                                 f: impl FnOnce(&mut Self) -> T)
                                 -> T {
        let frame = decl.params.iter().cloned().zip(args).collect();
        let callee = FunctionState { globals: decl.globals.clone(),
                                     locals:  vec![frame],
                                     name:    Some(decl.name.clone()),
                                     line:    decl.line, };
        let caller = std::mem::replace(&mut self.function_state, callee);
        self.function_stack.push(caller);

        let result = f(self);

        if let Some(caller) = self.function_stack.pop() {
            self.function_state = caller;
        }
        result
    }

    /// Runs `f` with an extra local parameter frame.
    pub fn with_locals<T>(&mut self,
                          frame: HashMap<String, EvalValue>,
                          f: impl FnOnce(&mut Self) -> T)
                          -> T {
        self.function_state.locals.push(frame);
        let result = f(self);
        self.function_state.locals.pop();
        result
    }

    /// Runs `f` in syntax check mode and restores the previous mode.
    pub fn with_syntax_check<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.syntax_check_stack.push(self.syntax_check);
        self.syntax_check = true;
        let result = f(self);
        self.syntax_check = self.syntax_check_stack.pop().unwrap_or(false);
        result
    }

    /// The function named in errors: the innermost user function, but never
    /// while syntax checking.
    #[must_use]
    pub fn error_function(&self) -> Option<String> {
        if self.syntax_check || self.function_stack.is_empty() {
            None
        } else {
            self.function_state.name.clone()
        }
    }

    #[must_use]
    pub fn error(&self, kind: EvalErrorKind) -> EvalFailure {
        EvalFailure::Error(EvalError { kind,
                                       line: self.line_number(),
                                       function: self.error_function() })
    }

    #[must_use]
    pub fn syntax_error(&self, code: SyntaxErrorCode, detail: Option<String>) -> EvalFailure {
        self.error(EvalErrorKind::SyntaxError(code, detail))
    }

    #[must_use]
    pub fn math_error(&self) -> EvalFailure {
        self.error(EvalErrorKind::MathError(None))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::bigmath::RoundingMode;

    fn mc() -> MathContext {
        MathContext::decimal(10, RoundingMode::HalfUp)
    }

    fn number(n: i64) -> EvalValue {
        BigNumber::from_i64(n, &mc()).into()
    }

    #[test]
    fn declarations_are_snapshotted_per_line() {
        let mut first = EvalState::new(None, None, mc());
        first.save_declaration(&Declaration::Variable { name:  "x".to_string(),
                                                        value: number(1), });

        let mut second = EvalState::new(Some(&first), None, mc());
        second.save_declaration(&Declaration::Variable { name:  "x".to_string(),
                                                         value: number(2), });

        assert_eq!(first.get_variable("x"), Some(number(1)));
        assert_eq!(second.get_variable("x"), Some(number(2)));
    }

    #[test]
    fn locals_shadow_globals_and_constants() {
        let mut state = EvalState::new(None, None, mc());
        state.save_declaration(&Declaration::Variable { name:  "e".to_string(),
                                                        value: number(5), });
        let frame = HashMap::from([("e".to_string(), number(7))]);

        let inner = state.with_locals(frame, |s| s.get_variable("e"));
        assert_eq!(inner, Some(number(7)));
        assert_eq!(state.get_variable("e"), Some(number(5)));
    }

    #[test]
    fn constants_follow_the_working_context() {
        let state = EvalState::new(None, None, mc());
        let pi = state.get_variable("pi").unwrap();
        assert_eq!(pi.to_string(), "3.141592654");
        assert_eq!(state.get_variable("π"), Some(pi));
        assert!(state.get_variable("inf").unwrap().as_number().unwrap().is_infinite());
    }

    #[test]
    fn ans_is_carried_to_the_next_line() {
        let mut first = EvalState::new(None, None, mc());
        first.save_ans(&EvalDeclValue::Value(number(42)));
        let second = EvalState::new(Some(&first), None, mc());
        assert_eq!(second.get_variable(ANS), Some(number(42)));
        assert!(second.own_ans().is_none());
    }

    #[test]
    fn syntax_check_mode_is_restored() {
        let mut state = EvalState::new(None, None, mc());
        let inside = state.with_syntax_check(|s| s.with_syntax_check(|s| s.is_syntax_check()));
        assert!(inside);
        assert!(!state.is_syntax_check());
    }

    #[test]
    fn interrupt_is_seen_at_the_next_checkpoint() {
        let mut state = EvalState::new(None, None, mc());
        assert!(state.checkpoint().is_ok());
        state.interrupt_handle().clone().request();
        assert_eq!(state.checkpoint(), Err(EvalFailure::Interrupted));
    }

    #[test]
    fn yield_hook_runs_every_hundred_steps() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let hook: YieldHook = Rc::new(move |_| counter.set(counter.get() + 1));
        let mut state = EvalState::new(None, None, mc()).with_yield_hook(Some(hook));

        for _ in 0..250 {
            state.checkpoint().unwrap();
        }
        assert!(calls.get() >= 2);
    }

    #[test]
    fn yield_hook_can_interrupt() {
        let hook: YieldHook = Rc::new(InterruptHandle::request);
        let mut state = EvalState::new(None, None, mc()).with_yield_hook(Some(hook));

        let steps = (0..1000).take_while(|_| state.checkpoint().is_ok()).count();
        assert!(steps < usize::try_from(YIELD_STEPS).unwrap());
    }

    #[test]
    fn errors_carry_line_and_no_function_at_top_level() {
        let first = EvalState::new(None, None, mc());
        let second = EvalState::new(Some(&first), None, mc());
        let EvalFailure::Error(err) = second.math_error() else {
            panic!("expected an error");
        };
        assert_eq!(err.line, 2);
        assert_eq!(err.function, None);
    }
}
