use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens in single or double quotes, such as `'a,b'`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    Str(String),
    /// Boolean literal tokens, such as `True`.
    #[token("True", parse_bool)]
    #[token("true", parse_bool)]
    #[token("False", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `None`
    #[token("None")]
    NoneLiteral,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `in`
    #[token("in")]
    In,
    /// `is`
    #[token("is")]
    Is,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `do`
    #[token("do")]
    Do,
    /// `import`
    #[token("import")]
    Import,
    /// Identifier tokens; variable, function or module names such as `row`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip)]
    Comment,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// Line breaks separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Automatically resets or increments as newlines are processed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// What an open bracket on the nesting stack belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Nesting {
    /// `(`, `[` or a mapping `{`: line breaks inside are insignificant.
    Bracket,
    /// A `do {` block: line breaks separate statements.
    Block,
}

/// Converts source text into `(Token, line)` pairs.
///
/// Line breaks inside parentheses, brackets and mapping braces are dropped so
/// that long expressions can span several lines. Inside `do { ... }` blocks
/// and at the top level they are kept as statement separators.
///
/// # Errors
/// - `LiteralTooLarge` for integer literals beyond `i64`.
/// - `InvalidStringLiteral` for strings with unknown escapes.
/// - `UnexpectedToken` for any other unrecognized input.
///
/// # Example
/// ```
/// use puf::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("sum(\n  row\n)").unwrap();
/// assert!(tokens.iter().all(|(token, _)| *token != Token::NewLine));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    let mut nesting: Vec<Nesting> = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        let Ok(token) = token else {
            return Err(lexing_error(lexer.slice(), line));
        };

        match token {
            Token::LParen | Token::LBracket => nesting.push(Nesting::Bracket),
            Token::LBrace => {
                let opens_block = matches!(tokens.last(), Some((Token::Do, _)));
                nesting.push(if opens_block { Nesting::Block } else { Nesting::Bracket });
            },
            Token::RParen | Token::RBracket | Token::RBrace => {
                nesting.pop();
            },
            Token::NewLine if nesting.last() == Some(&Nesting::Bracket) => continue,
            _ => {},
        }

        // A newline token reports the line it ends, not the one it starts.
        let line = if token == Token::NewLine { line - 1 } else { line };
        tokens.push((token, line));
    }

    Ok(tokens)
}

/// Maps a slice the lexer rejected to the most specific parse error.
fn lexing_error(slice: &str, line: usize) -> ParseError {
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        ParseError::LiteralTooLarge { line }
    } else if slice.starts_with(['"', '\'']) {
        ParseError::InvalidStringLiteral { literal: slice.to_string(),
                                           line }
    } else {
        ParseError::UnexpectedToken { token: slice.to_string(),
                                      line }
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the literal does not fit into an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes of a string literal and resolves its escapes.
///
/// Supported escapes are `\n`, `\t`, `\r`, `\0`, `\\`, `\'` and `\"`.
/// Any other escape rejects the literal.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(match chars.next()? {
                     'n' => '\n',
                     't' => '\t',
                     'r' => '\r',
                     '0' => '\0',
                     '\\' => '\\',
                     '\'' => '\'',
                     '"' => '"',
                     _ => return None,
                 });
    }

    Some(out)
}
