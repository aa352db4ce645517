use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, skip_separators},
            statement::parse_statement,
        },
    },
};

/// Parses a block expression delimited by braces.
///
/// A block consists of zero or more statements separated by newlines or
/// semicolons. Parsing continues until a closing `}` token is encountered.
/// Leading and trailing separators inside the block are ignored.
///
/// Grammar: `block := "{" (statement (separator statement)*)? "}"`
///
/// The resulting expression is returned as `Expr::Block { statements, line }`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `line`: Line number of the opening brace.
///
/// # Returns
/// A block expression containing all parsed statements.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the closing brace is missing.
/// - `UnexpectedToken` if two statements are not separated.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_separators(tokens);

        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
            Some(_) => {},
        }

        statements.push(parse_statement(tokens)?);

        match tokens.peek() {
            Some((Token::NewLine | Token::Semicolon | Token::RBrace, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';', newline or '}}', found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Expr::Block { statements, line })
}
