use std::fmt;

/// `+` or `-`, binary or unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermOp {
    Add,
    Subtract,
}

/// Operators binding tighter than [`TermOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorOp {
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `⨯`, the matrix product.
    CrossProduct,
}

/// Separator between a calculation and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualSign {
    /// `=`
    Equal,
    /// `≈`
    Approx,
}

/// The bracket family. All of them wrap a single expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    /// `( )`, the identity.
    Paren,
    /// `abs{ }`
    Abs,
    /// `floor{ }`
    Floor,
    /// `ceil{ }`
    Ceil,
}

/// Whether a series adds or multiplies its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Summation,
    Product,
}

impl SeriesKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Summation => "summation",
            Self::Product => "product",
        }
    }
}

/// `summation{var}{from}{to}{body}` or `product{var}{from}{to}{body}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    /// Names the loop variable.
    pub var:  Expression,
    pub from: Expression,
    pub to:   Expression,
    pub body: Expression,
}

/// One element of an expression.
///
/// Expressions are flat: operators, separators and single characters of
/// names and numbers are siblings. Only bracketed and decorated constructs
/// own child expressions. Operator precedence is resolved at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A significant space. Ignored by the evaluator.
    Space,
    /// One character of a name or a number literal.
    Symbol(char),
    TermOp(TermOp),
    FactorOp(FactorOp),
    /// `:=`
    Declare,
    Equal(EqualSign),
    /// `,`
    Comma,
    /// `!`
    Factorial,
    /// `ᵀ`
    Transpose,
    /// `^` and its exponent.
    Exponent(Expression),
    Bracket(BracketKind, Expression),
    /// `log{base}{arg}`
    Log {
        base: Expression,
        arg:  Expression,
    },
    /// `frac{num}{den}` or the mixed form `frac{whole}{num}{den}`.
    Fraction {
        whole: Option<Expression>,
        num:   Expression,
        den:   Expression,
    },
    /// `sqrt{radicand}` or `nthroot{index}{radicand}`.
    Radical {
        index:    Option<Expression>,
        radicand: Expression,
    },
    Series(Box<Series>),
    /// `matrix{{a}{b}}{{c}{d}}`, rows of cells.
    Matrix(Vec<Vec<Expression>>),
}

impl Node {
    /// Tests whether the node evaluates to a value on its own.
    ///
    /// Symbols are not: a run of them forms a number, a variable or a
    /// function call only in context.
    #[must_use]
    pub const fn is_evaluable(&self) -> bool {
        matches!(self,
                 Self::Bracket(..)
                 | Self::Log { .. }
                 | Self::Fraction { .. }
                 | Self::Radical { .. }
                 | Self::Series(_)
                 | Self::Matrix(_))
    }

    /// Tests whether the node is a postfix operator.
    #[must_use]
    pub const fn is_primary_op(&self) -> bool {
        matches!(self, Self::Factorial | Self::Transpose | Self::Exponent(_))
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, name: &str, args: &[&Expression]) -> fmt::Result {
    f.write_str(name)?;
    for arg in args {
        write!(f, "{{{arg}}}")?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str(" "),
            Self::Symbol(c) => write!(f, "{c}"),
            Self::TermOp(TermOp::Add) => f.write_str("+"),
            Self::TermOp(TermOp::Subtract) => f.write_str("-"),
            Self::FactorOp(op) => f.write_str(match op {
                                     FactorOp::Multiply => "*",
                                     FactorOp::Divide => "/",
                                     FactorOp::Modulo => "%",
                                     FactorOp::CrossProduct => "⨯",
                                 }),
            Self::Declare => f.write_str(":="),
            Self::Equal(EqualSign::Equal) => f.write_str("="),
            Self::Equal(EqualSign::Approx) => f.write_str("≈"),
            Self::Comma => f.write_str(","),
            Self::Factorial => f.write_str("!"),
            Self::Transpose => f.write_str("ᵀ"),
            Self::Exponent(exp) => match exp.nodes() {
                [Self::Bracket(BracketKind::Paren, _)] => write!(f, "^{exp}"),
                _ => write!(f, "^{{{exp}}}"),
            },
            Self::Bracket(BracketKind::Paren, expr) => write!(f, "({expr})"),
            Self::Bracket(BracketKind::Abs, expr) => write_args(f, "abs", &[expr]),
            Self::Bracket(BracketKind::Floor, expr) => write_args(f, "floor", &[expr]),
            Self::Bracket(BracketKind::Ceil, expr) => write_args(f, "ceil", &[expr]),
            Self::Log { base, arg } => write_args(f, "log", &[base, arg]),
            Self::Fraction { whole: Some(whole),
                             num,
                             den, } => write_args(f, "frac", &[whole, num, den]),
            Self::Fraction { whole: None, num, den } => write_args(f, "frac", &[num, den]),
            Self::Radical { index: Some(index),
                            radicand, } => write_args(f, "nthroot", &[index, radicand]),
            Self::Radical { index: None, radicand } => write_args(f, "sqrt", &[radicand]),
            Self::Series(series) => write_args(f,
                                               series.kind.name(),
                                               &[&series.var, &series.from, &series.to, &series.body]),
            Self::Matrix(rows) => {
                f.write_str("matrix")?;
                for row in rows {
                    f.write_str("{")?;
                    for cell in row {
                        write!(f, "{{{cell}}}")?;
                    }
                    f.write_str("}")?;
                }
                Ok(())
            },
        }
    }
}

/// An ordered list of sibling nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression(pub Vec<Node>);

impl Expression {
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Node>> for Expression {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|node| write!(f, "{node}"))
    }
}

/// A top level input line: an expression and the result expressions written
/// after `=` or `≈`.
///
/// # Example
/// ```
/// use bigcalc::parse_calculation;
///
/// let calc = parse_calculation("1+1=2").unwrap();
/// assert_eq!(calc.expression.to_string(), "1+1");
/// assert_eq!(calc.to_string(), "1+1=2");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Calculation {
    pub expression: Expression,
    pub results:    Vec<(EqualSign, Expression)>,
}

impl Calculation {
    /// The first result expression, if any.
    #[must_use]
    pub fn result(&self) -> Option<&Expression> {
        self.results.first().map(|(_, expr)| expr)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)?;
        for (sign, expr) in &self.results {
            write!(f, "{}{expr}", Node::Equal(*sign))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(s: &str) -> Vec<Node> {
        s.chars().map(Node::Symbol).collect()
    }

    #[test]
    fn exponent_braces_unless_parenthesized() {
        let bare = Node::Exponent(Expression(symbols("2")));
        assert_eq!(bare.to_string(), "^{2}");

        let paren = Node::Exponent(Expression(vec![Node::Bracket(BracketKind::Paren,
                                                                 Expression(symbols("2")))]));
        assert_eq!(paren.to_string(), "^(2)");
    }

    #[test]
    fn decorated_functions_render_their_groups() {
        let x = Expression(symbols("x"));
        let fraction = Node::Fraction { whole: Some(Expression(symbols("1"))),
                                        num:   Expression(symbols("2")),
                                        den:   Expression(symbols("3")), };
        assert_eq!(fraction.to_string(), "frac{1}{2}{3}");

        let series = Node::Series(Box::new(Series { kind: SeriesKind::Product,
                                                    var:  x.clone(),
                                                    from: Expression(symbols("1")),
                                                    to:   Expression(symbols("5")),
                                                    body: x, }));
        assert_eq!(series.to_string(), "product{x}{1}{5}{x}");
    }

    #[test]
    fn matrix_renders_rows() {
        let cell = |s: &str| Expression(symbols(s));
        let m = Node::Matrix(vec![vec![cell("1"), cell("2")], vec![cell("3"), cell("4")]]);
        assert_eq!(m.to_string(), "matrix{{1}{2}}{{3}{4}}");
        assert!(m.is_evaluable());
        assert!(!Node::Symbol('1').is_evaluable());
    }
}
