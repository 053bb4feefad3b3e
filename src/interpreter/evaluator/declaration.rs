use std::{collections::HashSet, rc::Rc};

use crate::{
    ast::{Expression, Node},
    error::{ArgCount, EvalErrorKind, EvalOutcome, SyntaxErrorCode},
    interpreter::{
        evaluator::{
            core::ExpressionEvaluator,
            state::{EvalState, Params},
        },
        parser::utils::{is_reserved_word, is_variable},
        value::core::EvalValue,
    },
};

/// A named value or function introduced with `:=`.
#[derive(Debug, Clone)]
pub enum Declaration {
    Variable {
        name:  String,
        value: EvalValue,
    },
    Function(Rc<FunctionDeclaration>),
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. } => name,
            Self::Function(decl) => &decl.name,
        }
    }
}

/// Checks a name about to be declared.
fn check_name(name: &str, invalid: SyntaxErrorCode, state: &EvalState) -> EvalOutcome<()> {
    if !is_variable(name) {
        Err(state.syntax_error(invalid, Some(name.to_string())))
    } else if is_reserved_word(name) {
        Err(state.syntax_error(SyntaxErrorCode::DeclaringReservedWord, Some(name.to_string())))
    } else {
        Ok(())
    }
}

/// Declares `name := <rest of evaluator>`.
///
/// # Errors
/// - `InvalidVariableName` or `DeclaringReservedWord` for a bad name.
/// - Any error of evaluating the value.
pub fn create_variable(name: String,
                       evaluator: &mut ExpressionEvaluator,
                       state: &mut EvalState)
                       -> EvalOutcome<Declaration> {
    check_name(&name, SyntaxErrorCode::InvalidVariableName, state)?;
    let value = evaluator.evaluate(state)?;
    Ok(Declaration::Variable { name, value })
}

/// A user function.
///
/// The body is kept unevaluated. It runs against the declarations visible
/// when the function was declared, so later redeclarations do not change it
/// and a function cannot call itself.
#[derive(Debug)]
pub struct FunctionDeclaration {
    pub name:           String,
    pub params:         Vec<String>,
    pub(crate) body:    Vec<Node>,
    pub(crate) globals: Params,
    /// Line the function was declared on. Errors in its body report it.
    pub(crate) line:    usize,
}

impl FunctionDeclaration {
    /// Declares `name(params) := body`.
    ///
    /// The body is syntax checked right away by calling the function with
    /// placeholder arguments: every name it uses must resolve and the
    /// evaluation must reach the end of the body.
    ///
    /// # Errors
    /// - `InvalidFunctionName` or `DeclaringReservedWord` for a bad name.
    /// - `InvalidFunctionParameters` unless the parameters are distinct,
    ///   valid names.
    /// - `EmptyExpression` for an empty body.
    /// - `SyntaxCheckFailed`, or the error found in the body.
    pub fn create(name: String,
                  params: &Expression,
                  body: &[&Node],
                  state: &mut EvalState)
                  -> EvalOutcome<Rc<Self>> {
        check_name(&name, SyntaxErrorCode::InvalidFunctionName, state)?;

        let params_text = params.to_string();
        let names: Vec<String> = params_text.split(',').map(|p| p.trim().to_string()).collect();
        let mut seen = HashSet::new();
        if !names.iter().all(|p| is_variable(p) && seen.insert(p.as_str())) {
            let detail = if params_text.is_empty() { "<empty>".to_string() } else { params_text };
            return Err(state.syntax_error(SyntaxErrorCode::InvalidFunctionParameters, Some(detail)));
        }
        if body.is_empty() {
            return Err(state.syntax_error(SyntaxErrorCode::EmptyExpression, None));
        }

        let decl = Self { name,
                          params: names,
                          body: body.iter().map(|&node| node.clone()).collect(),
                          globals: state.globals().clone(),
                          line: state.line_number() };

        let placeholders = vec![EvalValue::SyntaxCheck; decl.params.len()];
        let checked = state.with_syntax_check(|s| decl.call(placeholders, s))?;
        if !checked.is_syntax_check() {
            return Err(state.syntax_error(SyntaxErrorCode::SyntaxCheckFailed, None));
        }

        Ok(Rc::new(decl))
    }

    /// Evaluates the body with the parameters bound to `args`.
    ///
    /// # Errors
    /// - `InvalidFunctionArgumentCount` if `args` does not match the
    ///   parameters.
    /// - Any error of the body, reported on the declaring line.
    pub fn call(&self, args: Vec<EvalValue>, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        if args.len() != self.params.len() {
            return Err(state.error(EvalErrorKind::InvalidFunctionArgumentCount {
                function: self.name.clone(),
                required: ArgCount::Fixed(self.params.len()),
                given:    args.len(),
            }));
        }

        state.with_function_call(self, args, |s| ExpressionEvaluator::new(&self.body).evaluate(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{MathContext, RoundingMode},
        error::EvalFailure,
        interpreter::{parser::core::parse_expression_text, value::core::EvalDeclValue},
    };

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    fn declare(input: &str, state: &mut EvalState) -> EvalOutcome<Declaration> {
        let expr = parse_expression_text(input).unwrap();
        let list = expr.execute_list(state, true)?;
        match list.into_iter().next() {
            Some(EvalDeclValue::Declaration(d)) => Ok(d),
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    fn code(result: EvalOutcome<Declaration>) -> SyntaxErrorCode {
        match result {
            Err(EvalFailure::Error(err)) => match err.kind {
                EvalErrorKind::SyntaxError(code, _) => code,
                kind => panic!("unexpected {kind:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn function_sees_declarations_made_before_it() {
        let mut state = state();
        declare("a:=2", &mut state).unwrap();
        let f = declare("f(x):=x*a", &mut state).unwrap();
        assert_eq!(f.name(), "f");
        let Declaration::Function(f) = f else { panic!("expected a function") };
        assert_eq!(f.params, ["x"]);
        assert_eq!(f.line, 1);
    }

    #[test]
    fn bad_parameter_lists() {
        let mut state = state();
        assert_eq!(code(declare("f(x,x):=x", &mut state)), SyntaxErrorCode::InvalidFunctionParameters);
        assert_eq!(code(declare("f(1):=1", &mut state)), SyntaxErrorCode::InvalidFunctionParameters);
        assert_eq!(code(declare("f():=1", &mut state)), SyntaxErrorCode::InvalidFunctionParameters);
    }

    #[test]
    fn reserved_and_invalid_names() {
        let mut state = state();
        assert_eq!(code(declare("ans:=1", &mut state)), SyntaxErrorCode::DeclaringReservedWord);
        assert_eq!(code(declare("frac(x):=x", &mut state)), SyntaxErrorCode::DeclaringReservedWord);
    }

    #[test]
    fn body_is_checked_at_declaration() {
        let mut state = state();
        assert_eq!(code(declare("f(x):=x+y", &mut state)), SyntaxErrorCode::UndeclaredVariable);
        assert_eq!(code(declare("f(x):=f(x)", &mut state)), SyntaxErrorCode::UndeclaredFunction);
        assert_eq!(code(declare("f(x):=x!2", &mut state)), SyntaxErrorCode::UnexpectedData);
        assert!(!state.is_syntax_check());
    }

    #[test]
    fn call_checks_the_argument_count() {
        let mut state = state();
        let Declaration::Function(f) = declare("f(x,y):=x+y", &mut state).unwrap() else {
            panic!("expected a function")
        };
        let Err(EvalFailure::Error(err)) = f.call(vec![EvalValue::SyntaxCheck], &mut state) else {
            panic!("expected an error")
        };
        assert_eq!(err.kind,
                   EvalErrorKind::InvalidFunctionArgumentCount { function: "f".to_string(),
                                                                 required: ArgCount::Fixed(2),
                                                                 given:    1, });
    }
}
