use crate::{
    ast::{BracketKind, Calculation, EqualSign, Expression, FactorOp, Node, TermOp},
    error::{ParseError, ParseErrorKind, ParseResult},
    interpreter::{
        lexer::{Lexeme, Token, tokenize},
        parser::decorated::{create_decorated_function, parse_matrix},
    },
};

/// Cursor over the lexemes of one input line.
pub struct TokenStream<'a> {
    input:      &'a str,
    lexemes:    Vec<Lexeme<'a>>,
    pos:        usize,
    end_column: usize,
}

impl<'a> TokenStream<'a> {
    /// Tokenizes `input`.
    ///
    /// # Errors
    /// Returns the lexer error for unrecognized characters.
    pub fn new(input: &'a str) -> ParseResult<Self> {
        Ok(Self { input,
                  lexemes: tokenize(input)?,
                  pos: 0,
                  end_column: input.chars().count() })
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Lexeme<'a>> {
        self.lexemes.get(self.pos)
    }

    #[must_use]
    pub fn peek_token(&self) -> Option<Token> {
        self.peek().map(|l| l.token)
    }

    pub fn next_lexeme(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.lexemes.get(self.pos).copied();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    /// Consumes the next lexeme if it is `token`.
    pub fn eat(&mut self, token: Token) -> bool {
        if self.peek_token() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Column of the next lexeme, or the end of the input.
    #[must_use]
    pub fn column(&self) -> usize {
        self.peek().map_or(self.end_column, |l| l.column)
    }

    #[must_use]
    pub fn error(&self, kind: ParseErrorKind, column: usize) -> ParseError {
        ParseError::new(kind, self.input, column)
    }

    /// An error at the next lexeme.
    #[must_use]
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        self.error(kind, self.column())
    }
}

/// Parses one expression.
///
/// Expressions are flat node lists. The loop consumes spaces, operators,
/// separators, symbol runs, brackets and decorated functions until it meets
/// a token that cannot continue an expression: a closing bracket, `=` or the
/// end of input. The caller decides whether that token is acceptable.
///
/// Grammar:
/// ```text
/// expression := ( " " | "+" | "-" | "*" | "/" | "%" | "⨯" | "!" | "ᵀ"
///               | exponent | ":=" | "," | matrix | symbols | "(" expression ")" )*
/// ```
///
/// # Errors
/// Returns a [`ParseError`] for unbalanced brackets, malformed exponents,
/// decorated functions and matrices.
pub fn parse_expression(tokens: &mut TokenStream) -> ParseResult<Expression> {
    let mut nodes = Vec::new();

    while let Some(lexeme) = tokens.peek().copied() {
        let node = match lexeme.token {
            Token::Space => Node::Space,
            Token::Add => Node::TermOp(TermOp::Add),
            Token::Subtract => Node::TermOp(TermOp::Subtract),
            Token::Multiply => Node::FactorOp(FactorOp::Multiply),
            Token::Divide => Node::FactorOp(FactorOp::Divide),
            Token::Modulo => Node::FactorOp(FactorOp::Modulo),
            Token::CrossProduct => Node::FactorOp(FactorOp::CrossProduct),
            Token::Factorial => Node::Factorial,
            Token::Transpose => Node::Transpose,
            Token::Declare => Node::Declare,
            Token::Comma => Node::Comma,
            Token::Exponent => {
                tokens.next_lexeme();
                nodes.push(Node::Exponent(parse_exponent_value(tokens)?));
                continue;
            },
            Token::Matrix => {
                tokens.next_lexeme();
                nodes.push(parse_matrix(tokens, lexeme.column)?);
                continue;
            },
            Token::Symbols => {
                tokens.next_lexeme();
                parse_symbols(tokens, &lexeme, &mut nodes)?;
                continue;
            },
            Token::LParen => {
                let expr = parse_round_brackets(tokens)?;
                nodes.push(Node::Bracket(BracketKind::Paren, expr));
                continue;
            },
            Token::Equal | Token::RParen | Token::LBrace | Token::RBrace | Token::Discard => break,
        };
        tokens.next_lexeme();
        nodes.push(node);
    }

    Ok(Expression(nodes))
}

/// Handles a symbol run and whatever bracket follows it.
///
/// - `name(...)` becomes the symbols and a bracket, resolved as a function
///   call at evaluation time.
/// - `name{...}{...}` becomes a decorated function.
/// - Anything else leaves one symbol node per character.
fn parse_symbols(tokens: &mut TokenStream,
                 symbols: &Lexeme,
                 nodes: &mut Vec<Node>)
                 -> ParseResult<()> {
    match tokens.peek_token() {
        Some(Token::LParen) => {
            let arg = parse_round_brackets(tokens)?;
            nodes.extend(symbols.text.chars().map(Node::Symbol));
            nodes.push(Node::Bracket(BracketKind::Paren, arg));
        },
        Some(Token::LBrace) => {
            let mut args = Vec::new();
            while let Some(arg) = parse_curly_brackets(tokens)? {
                args.push(arg);
            }
            let node = create_decorated_function(symbols.text, args).ok_or_else(|| {
                           tokens.error(ParseErrorKind::InvalidDecoratedFunction, symbols.column)
                       })?;
            nodes.push(node);
        },
        _ => nodes.extend(symbols.text.chars().map(Node::Symbol)),
    }
    Ok(())
}

/// Parses what follows `^`: `{...}`, `(...)` or an optionally signed symbol
/// run such as `2`, `-1` or `n`.
fn parse_exponent_value(tokens: &mut TokenStream) -> ParseResult<Expression> {
    if let Some(expr) = parse_curly_brackets(tokens)? {
        return Ok(expr);
    }
    if tokens.peek_token() == Some(Token::LParen) {
        let expr = parse_round_brackets(tokens)?;
        return Ok(Expression(vec![Node::Bracket(BracketKind::Paren, expr)]));
    }

    let mut nodes = Vec::new();
    if tokens.eat(Token::Add) {
        nodes.push(Node::TermOp(TermOp::Add));
    } else if tokens.eat(Token::Subtract) {
        nodes.push(Node::TermOp(TermOp::Subtract));
    }

    match tokens.peek().copied() {
        Some(Lexeme { token: Token::Symbols,
                      text,
                      .. }) => {
            tokens.next_lexeme();
            nodes.extend(text.chars().map(Node::Symbol));
            Ok(Expression(nodes))
        },
        _ => Err(tokens.error_here(ParseErrorKind::ExponentBrackets)),
    }
}

/// Parses `( expression )`. The next token must be `(`.
fn parse_round_brackets(tokens: &mut TokenStream) -> ParseResult<Expression> {
    tokens.next_lexeme();
    let expr = parse_expression(tokens)?;
    if !tokens.eat(Token::RParen) {
        return Err(tokens.error_here(ParseErrorKind::Expected(')')));
    }
    Ok(expr)
}

/// Parses `{ expression }` if the next token is `{`.
pub(crate) fn parse_curly_brackets(tokens: &mut TokenStream) -> ParseResult<Option<Expression>> {
    if !tokens.eat(Token::LBrace) {
        return Ok(None);
    }
    let expr = parse_expression(tokens)?;
    if !tokens.eat(Token::RBrace) {
        return Err(tokens.error_here(ParseErrorKind::Expected('}')));
    }
    Ok(Some(expr))
}

/// Fails on anything left after a complete parse.
fn expect_end(tokens: &TokenStream) -> ParseResult<()> {
    match tokens.peek() {
        None => Ok(()),
        Some(lexeme) => Err(tokens.error(ParseErrorKind::UnexpectedToken(lexeme.text.to_string()),
                                         lexeme.column)),
    }
}

/// Parses a complete expression line. A `=` is not accepted.
///
/// # Errors
/// Returns a [`ParseError`] for invalid input or trailing tokens.
pub fn parse_expression_text(input: &str) -> ParseResult<Expression> {
    let mut tokens = TokenStream::new(input)?;
    let expr = parse_expression(&mut tokens)?;
    expect_end(&tokens)?;
    Ok(expr)
}

/// Parses an expression followed by any number of `= result` groups.
///
/// # Errors
/// Returns a [`ParseError`] for invalid input or trailing tokens.
pub fn parse_calculation_text(input: &str) -> ParseResult<Calculation> {
    let mut tokens = TokenStream::new(input)?;
    let expression = parse_expression(&mut tokens)?;
    let mut results = Vec::new();

    while let Some(lexeme) = tokens.peek().copied() {
        if lexeme.token != Token::Equal {
            break;
        }
        tokens.next_lexeme();
        let sign = if lexeme.text == "≈" { EqualSign::Approx } else { EqualSign::Equal };
        results.push((sign, parse_expression(&mut tokens)?));
    }

    expect_end(&tokens)?;
    Ok(Calculation { expression,
                     results })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expression {
        parse_expression_text(input).unwrap()
    }

    #[test]
    fn symbol_runs_split_into_characters() {
        assert_eq!(parse("ab").nodes(), [Node::Symbol('a'), Node::Symbol('b')]);
    }

    #[test]
    fn function_call_keeps_symbols_and_bracket() {
        let expr = parse("f(x)");
        assert!(matches!(expr.nodes(),
                         [Node::Symbol('f'), Node::Bracket(BracketKind::Paren, _)]));
        assert_eq!(expr.to_string(), "f(x)");
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(parse("2^3").to_string(), "2^{3}");
        assert_eq!(parse("2^-x").to_string(), "2^{-x}");
        assert_eq!(parse("2^{1+1}").to_string(), "2^{1+1}");
        assert_eq!(parse("2^(1+1)").to_string(), "2^(1+1)");
    }

    #[test]
    fn exponent_needs_brackets_for_operators() {
        let err = parse_expression_text("2^*3").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExponentBrackets);
        assert_eq!(err.column, 2);
    }

    #[test]
    fn unbalanced_brackets() {
        assert_eq!(parse_expression_text("(1+2").unwrap_err().kind,
                   ParseErrorKind::Expected(')'));
        assert_eq!(parse_expression_text("sqrt{2").unwrap_err().kind,
                   ParseErrorKind::Expected('}'));
        assert_eq!(parse_expression_text("1+2)").unwrap_err().kind,
                   ParseErrorKind::UnexpectedToken(")".to_string()));
    }

    #[test]
    fn expression_rejects_equal_sign() {
        assert!(parse_expression_text("1=1").is_err());
    }

    #[test]
    fn calculation_keeps_every_result() {
        let calc = parse_calculation_text("1+1 = 2 ≈ 2.0").unwrap();
        assert_eq!(calc.results.len(), 2);
        assert_eq!(calc.results[1].0, EqualSign::Approx);
        assert_eq!(calc.to_string(), "1+1 = 2 ≈ 2.0");
    }

    #[test]
    fn text_form_reparses_to_the_same_tree() {
        for input in ["x:=2, f(a,b):=a*b+x", "frac{1}{3}+abs{-2}", "matrix{{1}{2}}{{3}{4}}ᵀ",
                      "summation{n}{1}{10}{n^2}", "5!!-log{2}{8}%3⨯y"]
        {
            let expr = parse(input);
            assert_eq!(parse(&expr.to_string()), expr, "{input}");
        }
    }
}
