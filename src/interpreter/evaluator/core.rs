use crate::{
    ast::{BracketKind, Expression, Node, TermOp},
    bigmath::BigNumber,
    error::{EvalErrorKind, EvalOutcome, SyntaxErrorCode},
    interpreter::{
        evaluator::{
            binary::{
                core::{add, eval_factor_op, eval_term_op},
                power::pow,
            },
            declaration::{Declaration, FunctionDeclaration, create_variable},
            function::{
                builtin::{abs, frac},
                core::evaluate_function,
                log::log,
                sqrt::{nthroot, sqrt},
                trunc::{ceil, floor},
            },
            series::evaluate_series,
            state::EvalState,
            task::run_steps,
            unary::{double_factorial, factorial, negate, transpose},
        },
        parser::utils::{is_number, is_variable},
        value::{
            core::{EvalDeclValue, EvalValue},
            matrix::Matrix,
        },
    },
};

/// The `name :=` or `name(params) :=` prefix of a declaration.
#[derive(Debug)]
enum DeclPrefix<'a> {
    Variable(String),
    Function(String, &'a Expression),
}

/// Recursive descent evaluator over one comma separated element.
///
/// Expressions are flat node lists, so precedence is resolved here:
///
/// ```text
/// expression     := factor ( ("+" | "-") factor )*
/// factor         := signed_factor ( ("*" | "/" | "%" | "⨯") signed_factor )*
/// signed_factor  := ("+" | "-") signed_factor | primary
/// primary        := ( symbols | evaluable node ) ( "!" | "!!" | "ᵀ" | exponent )*
/// ```
///
/// Spaces are dropped up front. A leading `name :=` or `name(params) :=`
/// is split off as a declaration prefix.
#[derive(Debug)]
pub struct ExpressionEvaluator<'a> {
    nodes: Vec<&'a Node>,
    pos:   usize,
    decl:  Option<DeclPrefix<'a>>,
}

impl<'a> ExpressionEvaluator<'a> {
    #[must_use]
    pub fn new(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut nodes: Vec<&Node> = nodes.into_iter().filter(|n| !matches!(n, Node::Space)).collect();

        let name: String = nodes.iter()
                                .map_while(|n| match n {
                                    Node::Symbol(c) => Some(*c),
                                    _ => None,
                                })
                                .collect();
        let len = name.chars().count();

        let mut decl = None;
        if !name.is_empty() && is_variable(&name) {
            match (nodes.get(len).copied(), nodes.get(len + 1).copied()) {
                (Some(Node::Declare), _) => {
                    nodes.drain(..=len);
                    decl = Some(DeclPrefix::Variable(name));
                },
                (Some(Node::Bracket(BracketKind::Paren, params)), Some(Node::Declare)) => {
                    nodes.drain(..len + 2);
                    decl = Some(DeclPrefix::Function(name, params));
                },
                _ => {},
            }
        }

        Self { nodes,
               pos: 0,
               decl }
    }

    /// Evaluates the nodes after any declaration prefix.
    ///
    /// # Errors
    /// Any syntax or math error of the expression, or an interruption.
    pub fn evaluate(&mut self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        self.pos = 0;
        self.evaluate_expression(state)
    }

    /// Evaluates the element, creating the declaration if it has a prefix.
    ///
    /// # Errors
    /// See [`evaluate`](Self::evaluate), [`create_variable`] and
    /// [`FunctionDeclaration::create`].
    pub fn execute(&mut self, state: &mut EvalState) -> EvalOutcome<EvalDeclValue> {
        self.pos = 0;
        match &self.decl {
            Some(DeclPrefix::Variable(name)) => {
                let name = name.clone();
                create_variable(name, self, state).map(EvalDeclValue::Declaration)
            },
            Some(DeclPrefix::Function(name, params)) => {
                FunctionDeclaration::create(name.clone(), params, &self.nodes, state)
                    .map(|decl| EvalDeclValue::Declaration(Declaration::Function(decl)))
            },
            None => self.evaluate_expression(state).map(EvalDeclValue::Value),
        }
    }

    fn look(&self) -> Option<&'a Node> {
        self.nodes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn evaluate_expression(&mut self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        if self.nodes.is_empty() {
            return Err(state.syntax_error(SyntaxErrorCode::EmptyExpression, None));
        }

        let mut sum = self.evaluate_factor(state)?;
        loop {
            match self.look() {
                Some(Node::TermOp(op)) => {
                    self.advance();
                    let rhs = self.evaluate_factor(state)?;
                    sum = eval_term_op(*op, &sum, &rhs, state)?;
                },
                None | Some(Node::Comma) => return Ok(sum),
                Some(node) => {
                    return Err(state.syntax_error(SyntaxErrorCode::UnexpectedData, Some(node.to_string())));
                },
            }
        }
    }

    fn evaluate_factor(&mut self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        let mut product = self.evaluate_signed_factor(state)?;
        while let Some(Node::FactorOp(op)) = self.look() {
            self.advance();
            let rhs = self.evaluate_signed_factor(state)?;
            product = eval_factor_op(*op, &product, &rhs, state)?;
        }
        Ok(product)
    }

    fn evaluate_signed_factor(&mut self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        if let Some(Node::TermOp(op)) = self.look() {
            self.advance();
            let value = self.evaluate_signed_factor(state)?;
            return match op {
                TermOp::Subtract => negate(&value, state),
                TermOp::Add => Ok(value),
            };
        }
        self.evaluate_primary(state)
    }

    fn evaluate_primary(&mut self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        let node = self.look();
        self.advance();

        let value = match node {
            Some(Node::Symbol(first)) => {
                let mut text = first.to_string();
                while let Some(Node::Symbol(c)) = self.look() {
                    text.push(*c);
                    self.advance();
                }
                let value = self.evaluate_symbols(&text, state)?;
                state.checkpoint()?;
                value
            },
            Some(node) if node.is_evaluable() => node.evaluate(state)?,
            _ => return Err(state.syntax_error(SyntaxErrorCode::InadequateExpression, None)),
        };

        self.evaluate_primary_ops(value, state)
    }

    /// Applies the postfix operators following a primary, left to right.
    fn evaluate_primary_ops(&mut self, mut value: EvalValue, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        loop {
            match self.look() {
                Some(Node::Factorial) => {
                    let mut count = 0;
                    while let Some(Node::Factorial) = self.look() {
                        self.advance();
                        count += 1;
                    }
                    value = match count {
                        1 => factorial(&value, state)?,
                        2 => double_factorial(&value, state)?,
                        _ => {
                            return Err(state.syntax_error(SyntaxErrorCode::InvalidOperator,
                                                          Some("!".repeat(count))));
                        },
                    };
                },
                Some(Node::Transpose) => {
                    self.advance();
                    value = transpose(&value, state)?;
                },
                Some(Node::Exponent(exponent)) => {
                    self.advance();
                    let exponent = exponent.evaluate(state)?;
                    value = pow(&value, &exponent, state)?;
                },
                _ => return Ok(value),
            }
        }
    }

    /// Resolves a run of symbols: a number literal, a function call when a
    /// parenthesized argument list follows, or a variable.
    fn evaluate_symbols(&mut self, text: &str, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        if is_number(text) {
            let value = BigNumber::parse(text, state.mc());
            if value.is_nan() {
                return Err(state.error(EvalErrorKind::InvalidNumber { number: text.to_string(),
                                                                      base:   state.mc().base(), }));
            }
            return Ok(if state.is_syntax_check() { EvalValue::SyntaxCheck } else { value.into() });
        }

        if !is_variable(text) {
            return Err(state.syntax_error(SyntaxErrorCode::InvalidValue, Some(text.to_string())));
        }

        if let Some(Node::Bracket(BracketKind::Paren, args)) = self.look() {
            self.advance();
            let args = args.execute_list(state, false)?
                           .into_iter()
                           .map(|v| match v {
                               EvalDeclValue::Value(v) => Ok(v),
                               EvalDeclValue::Declaration(_) => {
                                   Err(state.syntax_error(SyntaxErrorCode::ExpectedValueList, None))
                               },
                           })
                           .collect::<EvalOutcome<Vec<_>>>()?;
            return evaluate_function(text, args, state);
        }

        match state.get_variable(text) {
            Some(value) => Ok(if state.is_syntax_check() { EvalValue::SyntaxCheck } else { value }),
            None => Err(state.syntax_error(SyntaxErrorCode::UndeclaredVariable, Some(text.to_string()))),
        }
    }
}

impl Expression {
    /// Evaluates every comma separated element in order.
    ///
    /// With `save_result`, each declaration is stored in `state` as soon as
    /// it is made, so later elements see it. A list of a single value also
    /// becomes the line's answer.
    ///
    /// # Errors
    /// The first error of any element.
    pub fn execute_list(&self, state: &mut EvalState, save_result: bool) -> EvalOutcome<Vec<EvalDeclValue>> {
        let groups: Vec<&[Node]> = self.nodes().split(|n| matches!(n, Node::Comma)).collect();
        let single = groups.len() == 1;

        let mut values = Vec::with_capacity(groups.len());
        for group in groups {
            let value = ExpressionEvaluator::new(group).execute(state)?;
            if save_result {
                if let EvalDeclValue::Declaration(decl) = &value {
                    state.save_declaration(decl);
                }
                if single {
                    state.save_ans(&value);
                }
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Evaluates the expression to exactly one value.
    ///
    /// # Errors
    /// `ExpectedSingleValue` for a list or a declaration, or any error of the
    /// element itself.
    pub fn evaluate(&self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        let mut values = self.execute_list(state, false)?;
        match (values.pop(), values.is_empty()) {
            (Some(EvalDeclValue::Value(value)), true) => Ok(value),
            _ => Err(state.syntax_error(SyntaxErrorCode::ExpectedSingleValue, None)),
        }
    }
}

impl Node {
    /// Evaluates a self-contained node: a bracket, a decorated function or a
    /// matrix literal.
    ///
    /// # Errors
    /// `InadequateExpression` for nodes that do not evaluate on their own,
    /// otherwise the errors of the node's arguments and function.
    pub fn evaluate(&self, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        match self {
            Self::Bracket(kind, expr) => run_steps(state, 1, |s, _| {
                                             let value = expr.evaluate(s)?;
                                             match kind {
                                                 BracketKind::Paren => Ok(value),
                                                 BracketKind::Abs => abs(&[value], s),
                                                 BracketKind::Floor => floor(&[value], s),
                                                 BracketKind::Ceil => ceil(&[value], s),
                                             }
                                         }),
            Self::Log { base, arg } => run_steps(state, 1, |s, _| {
                                           let base = base.evaluate(s)?;
                                           let arg = arg.evaluate(s)?;
                                           log(&[base, arg], s)
                                       }),
            Self::Fraction { whole, num, den } => run_steps(state, 1, |s, _| {
                                                      let whole = whole.as_ref().map(|w| w.evaluate(s)).transpose()?;
                                                      let num = num.evaluate(s)?;
                                                      let den = den.evaluate(s)?;
                                                      let part = frac(&[num, den], s)?;
                                                      match whole {
                                                          Some(whole) => mixed_fraction(&whole, &part, s),
                                                          None => Ok(part),
                                                      }
                                                  }),
            Self::Radical { index, radicand } => run_steps(state, 1, |s, _| {
                                                     let radicand = radicand.evaluate(s)?;
                                                     match index {
                                                         Some(index) => {
                                                             let index = index.evaluate(s)?;
                                                             nthroot(&[index, radicand], s)
                                                         },
                                                         None => sqrt(&[radicand], s),
                                                     }
                                                 }),
            Self::Series(series) => run_steps(state, 1, |s, _| evaluate_series(series, s)),
            Self::Matrix(rows) => evaluate_matrix(rows, state),
            _ => Err(state.syntax_error(SyntaxErrorCode::InadequateExpression, None)),
        }
    }
}

/// `whole + part`, with the fraction taking the sign of a negative whole
/// part: `frac{-1}{1}{2}` is `-1.5`.
fn mixed_fraction(whole: &EvalValue, part: &EvalValue, state: &EvalState) -> EvalOutcome<EvalValue> {
    match whole.as_number() {
        Some(w) if w.is_negative() => add(whole, &negate(part, state)?, state),
        _ => add(whole, part, state),
    }
}

/// Evaluates the cells of a matrix literal row by row, one task step each.
fn evaluate_matrix(rows: &[Vec<Expression>], state: &mut EvalState) -> EvalOutcome<EvalValue> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if nrows == 0 || ncols == 0 || rows.iter().any(|row| row.len() != ncols) {
        return Err(state.math_error());
    }

    let mut cells = Vec::with_capacity(nrows * ncols);
    run_steps(state, nrows * ncols, |s, i| {
        cells.push(rows[i / ncols][i % ncols].evaluate(s)?);
        Ok(())
    })?;

    if state.is_syntax_check() {
        return Ok(EvalValue::SyntaxCheck);
    }
    let mut cells = cells.into_iter();
    Matrix::try_from_fn(nrows, ncols, |_, _| cells.next().ok_or_else(|| state.math_error())).map(EvalValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bigmath::{MathContext, Notation, RoundingMode},
        error::EvalFailure,
        interpreter::parser::core::parse_expression_text,
    };

    fn state() -> EvalState {
        EvalState::new(None, None, MathContext::decimal(10, RoundingMode::HalfUp))
    }

    fn eval_in(input: &str, state: &mut EvalState) -> EvalOutcome<EvalValue> {
        parse_expression_text(input).unwrap().evaluate(state)
    }

    /// Result shown to eight digits, hiding last digit noise.
    fn eval(input: &str) -> String {
        let display = MathContext::decimal(8, RoundingMode::HalfUp);
        eval_in(input, &mut state()).unwrap().format(&display, Notation::UserFriendly)
    }

    fn syntax_code(input: &str) -> SyntaxErrorCode {
        match eval_in(input, &mut state()) {
            Err(EvalFailure::Error(err)) => match err.kind {
                EvalErrorKind::SyntaxError(code, _) => code,
                kind => panic!("unexpected {kind:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("1+2*3"), "7");
        assert_eq!(eval("2*3^2"), "18");
        assert_eq!(eval("-2^2"), "-4");
        assert_eq!(eval("(1+2)*3"), "9");
        assert_eq!(eval("10-4-3"), "3");
        assert_eq!(eval("2^3^2"), "64");
    }

    #[test]
    fn spaces_are_ignored() {
        assert_eq!(eval(" 1 + 2 * 3 "), "7");
        assert_eq!(eval("1 2"), "12");
    }

    #[test]
    fn postfix_operators() {
        assert_eq!(eval("5!"), "120");
        assert_eq!(eval("6!!"), "48");
        assert_eq!(eval("3!^2"), "36");
        assert_eq!(syntax_code("5!!!"), SyntaxErrorCode::InvalidOperator);
    }

    #[test]
    fn decorated_functions() {
        assert_eq!(eval("frac{1}{4}"), "0.25");
        assert_eq!(eval("frac{2}{1}{2}"), "2.5");
        assert_eq!(eval("frac{-2}{1}{2}"), "-2.5");
        assert_eq!(eval("abs{-3}+floor{2.7}+ceil{2.1}"), "8");
        assert_eq!(eval("sqrt{16}"), "4");
        assert_eq!(eval("nthroot{3}{27}"), "3");
        assert_eq!(eval("log{2}{1024}"), "10");
    }

    #[test]
    fn matrix_literals() {
        assert_eq!(eval("matrix{{1}{2}}{{3}{4}}ᵀ"), "matrix{{1}{3}}{{2}{4}}");
        assert_eq!(eval("matrix{{1}{2}}*matrix{{3}{4}}"), "11");
    }

    #[test]
    fn structural_errors() {
        assert_eq!(syntax_code(""), SyntaxErrorCode::EmptyExpression);
        assert_eq!(syntax_code("1+"), SyntaxErrorCode::InadequateExpression);
        assert_eq!(syntax_code("5!3"), SyntaxErrorCode::UnexpectedData);
        assert_eq!(syntax_code("1,2"), SyntaxErrorCode::ExpectedSingleValue);
        assert_eq!(syntax_code("x"), SyntaxErrorCode::UndeclaredVariable);
        assert_eq!(syntax_code("g(1)"), SyntaxErrorCode::UndeclaredFunction);
        assert_eq!(syntax_code("sin(x:=1)"), SyntaxErrorCode::ExpectedValueList);
    }

    #[test]
    fn invalid_number_names_the_base() {
        let Err(EvalFailure::Error(err)) = eval_in("12A", &mut state()) else {
            panic!("expected an error")
        };
        assert_eq!(err.kind,
                   EvalErrorKind::InvalidNumber { number: "12A".to_string(),
                                                  base:   10, });
    }

    #[test]
    fn list_declarations_are_visible_to_later_elements() {
        let mut state = state();
        let list = parse_expression_text("a:=2, f(x):=x*a, f(5)").unwrap()
                                                                   .execute_list(&mut state, true)
                                                                   .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].as_value().unwrap().to_string(), "10");
        assert!(state.own_ans().is_none());
    }

    #[test]
    fn single_value_becomes_the_answer() {
        let mut state = state();
        parse_expression_text("6*7").unwrap().execute_list(&mut state, true).unwrap();
        assert_eq!(state.own_ans().unwrap().to_string(), "42");
        assert_eq!(eval_in("ans+1", &mut state).unwrap().to_string(), "43");
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(eval("1/0"), "∞");
        assert_eq!(eval("0/0"), "(NaN)");
    }
}
