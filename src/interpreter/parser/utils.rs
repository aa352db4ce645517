use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list and tuple displays, call arguments,
/// function parameters and mapping literals. It repeatedly calls `parse_item`
/// to parse one element, expecting either:
///
/// - a comma, to continue the list (a comma directly before the closing
///   token is allowed), or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    let mut line = tokens.peek().map_or(0, |(_, l)| *l);

    loop {
        if let Some((tok, _)) = tokens.peek()
           && tok == closing
        {
            tokens.next();
            break;
        }

        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, l)) => {
                line = *l;
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Consumes an identifier token and returns its name. Reserved names are
/// the caller's concern.
///
/// # Errors
/// `UnexpectedToken` for any other token, `UnexpectedEndOfInput` at the end.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a mapping literal of the form `{ key: value, ... }`.
///
/// Keys and values are full expressions; whether a key is acceptable is
/// decided at runtime. An empty mapping `{}` is accepted.
///
/// Grammar: `mapping := "{" (entry ("," entry)* ","?)? "}"`,
/// `entry := expression ":" expression`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `{`.
///
/// # Returns
/// An `Expr::MapLiteral` with its entries in source order.
///
/// # Errors
/// Returns a `ParseError` if:
/// - `{` is missing,
/// - an entry lacks its `:`,
/// - the closing `}` is missing.
pub fn parse_map_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::LBrace, line)) => *line,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("expected '{{', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let entries = parse_comma_separated(tokens, parse_map_entry, &Token::RBrace)?;

    Ok(Expr::MapLiteral { entries, line })
}

/// Parses one `key: value` pair of a mapping literal.
fn parse_map_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Expr, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let key = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::Colon, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected ':' after mapping key, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: key.line_number() }),
    }
    let value = parse_expression(tokens)?;

    Ok((key, value))
}
