use crate::{
    ast::{BracketKind, Expression, Node, Series, SeriesKind},
    error::{ParseErrorKind, ParseResult},
    interpreter::{
        lexer::Token,
        parser::core::{TokenStream, parse_curly_brackets},
    },
};

/// Builds the node of a decorated function from its name and `{}` groups.
///
/// Returns `None` for unknown names and wrong group counts.
///
/// | name                    | groups |
/// |-------------------------|--------|
/// | `abs`, `floor`, `ceil`  | 1      |
/// | `sqrt`                  | 1      |
/// | `frac`                  | 2 or 3 |
/// | `nthroot`, `log`        | 2      |
/// | `summation`, `product`  | 4      |
#[must_use]
pub fn create_decorated_function(name: &str, args: Vec<Expression>) -> Option<Node> {
    let mut args = args.into_iter();
    let node = match (name, args.len()) {
        ("abs", 1) => Node::Bracket(BracketKind::Abs, args.next()?),
        ("floor", 1) => Node::Bracket(BracketKind::Floor, args.next()?),
        ("ceil", 1) => Node::Bracket(BracketKind::Ceil, args.next()?),
        ("sqrt", 1) => Node::Radical { index:    None,
                                       radicand: args.next()?, },
        ("nthroot", 2) => Node::Radical { index:    args.next(),
                                          radicand: args.next()?, },
        ("log", 2) => Node::Log { base: args.next()?,
                                  arg:  args.next()?, },
        ("frac", 2) => Node::Fraction { whole: None,
                                        num:   args.next()?,
                                        den:   args.next()?, },
        ("frac", 3) => Node::Fraction { whole: args.next(),
                                        num:   args.next()?,
                                        den:   args.next()?, },
        ("summation" | "product", 4) => {
            let kind = if name == "product" { SeriesKind::Product } else { SeriesKind::Summation };
            Node::Series(Box::new(Series { kind,
                                           var: args.next()?,
                                           from: args.next()?,
                                           to: args.next()?,
                                           body: args.next()? }))
        },
        _ => return None,
    };
    Some(node)
}

/// Parses the rows of a matrix literal. The `matrix` keyword at `column` has
/// been consumed.
///
/// Grammar: `matrix := "matrix" ( "{" ( "{" expression "}" )+ "}" )+`
///
/// # Errors
/// Returns a [`ParseError`](crate::error::ParseError) for a missing `}`, no
/// rows, an empty row or rows of different lengths.
pub fn parse_matrix(tokens: &mut TokenStream, column: usize) -> ParseResult<Node> {
    let mut rows: Vec<Vec<Expression>> = Vec::new();

    while tokens.eat(Token::LBrace) {
        let mut row = Vec::new();
        while let Some(cell) = parse_curly_brackets(tokens)? {
            row.push(cell);
        }
        if !tokens.eat(Token::RBrace) {
            return Err(tokens.error_here(ParseErrorKind::Expected('}')));
        }
        rows.push(row);
    }

    let Some(first) = rows.first() else {
        return Err(tokens.error(ParseErrorKind::InvalidRows, column));
    };
    let ncols = first.len();
    if ncols == 0 {
        return Err(tokens.error(ParseErrorKind::InvalidCols, column));
    }
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(tokens.error(ParseErrorKind::MatrixRowLengthsVary, column));
    }

    Ok(Node::Matrix(rows))
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BracketKind, Node},
        error::ParseErrorKind,
        interpreter::parser::core::parse_expression_text,
    };

    fn single(input: &str) -> Node {
        let mut expr = parse_expression_text(input).unwrap();
        assert_eq!(expr.0.len(), 1, "{input}");
        expr.0.remove(0)
    }

    #[test]
    fn bracket_family() {
        assert!(matches!(single("floor{2.5}"), Node::Bracket(BracketKind::Floor, _)));
        assert!(matches!(single("ceil{2.5}"), Node::Bracket(BracketKind::Ceil, _)));
    }

    #[test]
    fn mixed_fraction_has_a_whole_part() {
        assert!(matches!(single("frac{1}{2}{3}"), Node::Fraction { whole: Some(_), .. }));
        assert!(matches!(single("frac{2}{3}"), Node::Fraction { whole: None, .. }));
    }

    #[test]
    fn wrong_group_count_is_rejected() {
        let err = parse_expression_text("1+nthroot{2}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDecoratedFunction);
        assert_eq!(err.column, 2);
        assert!(parse_expression_text("foo{1}").is_err());
    }

    #[test]
    fn matrix_shape_is_validated() {
        let kind = |s: &str| parse_expression_text(s).unwrap_err().kind;
        assert_eq!(kind("matrix{}"), ParseErrorKind::InvalidCols);
        assert_eq!(kind("matrix{{1}{2}}{{3}}"), ParseErrorKind::MatrixRowLengthsVary);
        assert_eq!(kind("matrix{{1}"), ParseErrorKind::Expected('}'));
    }

    #[test]
    fn matrix_cells_are_kept_in_row_order() {
        let Node::Matrix(rows) = single("matrix{{1}{2}{3}}{{4}{5}{6}}") else {
            panic!("not a matrix");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2].to_string(), "6");
    }
}
