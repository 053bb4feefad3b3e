use logos::Logos;

use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// Represents a lexical token in the calculator input.
///
/// Names and numbers are not told apart here: both are a single
/// [`Token::Symbols`] run. The parser splits it into one node per character
/// and the evaluator decides what the run means.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// Tabs and line breaks.
    #[regex(r"[\t\n\r]+", logos::skip)]
    Discard,
    /// A space is kept as a node.
    #[token(" ")]
    Space,
    /// `=` or `≈`
    #[regex("[=≈]")]
    Equal,
    /// `:=`
    #[token(":=")]
    Declare,
    /// `,`
    #[token(",")]
    Comma,
    /// `+`
    #[token("+")]
    Add,
    /// `-`
    #[token("-")]
    Subtract,
    /// `*`
    #[token("*")]
    Multiply,
    /// `/`
    #[token("/")]
    Divide,
    /// `%`
    #[token("%")]
    Modulo,
    /// `⨯`
    #[token("⨯")]
    CrossProduct,
    /// `!`
    #[token("!")]
    Factorial,
    /// `ᵀ`
    #[token("ᵀ")]
    Transpose,
    /// `^`
    #[token("^")]
    Exponent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// The `matrix` keyword. Only a keyword when a `{` follows.
    #[token("matrix", matrix_keyword)]
    Matrix,
    /// Latin and Greek letters, digits, `.` and `∞`.
    #[regex(r"[∞.a-zA-Z0-9αβγδεζηθικλμνξπρσςτυφχψωΓΔΘΛΞΠΣΥΦΨΩ]+")]
    Symbols,
}

fn matrix_keyword(lex: &logos::Lexer<Token>) -> Token {
    if lex.remainder().starts_with('{') { Token::Matrix } else { Token::Symbols }
}

/// A token with its text and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token:  Token,
    pub text:   &'a str,
    /// Zero based character column.
    pub column: usize,
}

/// Splits the input into lexemes.
///
/// # Errors
/// Returns a [`ParseErrorKind::UnrecognizedChar`] error pointing at the first
/// character no rule matches.
///
/// # Example
/// ```
/// use bigcalc::interpreter::lexer::{Token, tokenize};
///
/// let lexemes = tokenize("x:=2").unwrap();
/// let tokens: Vec<Token> = lexemes.iter().map(|l| l.token).collect();
/// assert_eq!(tokens, [Token::Symbols, Token::Declare, Token::Symbols]);
/// assert_eq!(lexemes[2].column, 3);
/// ```
pub fn tokenize(input: &str) -> ParseResult<Vec<Lexeme<'_>>> {
    let mut lexemes = Vec::new();
    let mut lexer = Token::lexer(input);

    // Byte offsets from logos are turned into character columns incrementally.
    let mut byte_pos = 0;
    let mut column = 0;

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        column += input[byte_pos..span.start].chars().count();
        byte_pos = span.start;

        match token {
            Ok(token) => lexemes.push(Lexeme { token,
                                               text: lexer.slice(),
                                               column }),
            Err(()) => return Err(ParseError::new(ParseErrorKind::UnrecognizedChar, input, column)),
        }
    }

    Ok(lexemes)
}
