use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_logical_or, statement::parse_statement, unary::parse_do_block},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It parses the lowest
/// precedence level, logical OR, and then an optional trailing conditional
/// `value if condition else alternative`. The alternative is itself a full
/// expression, so conditionals chain to the right.
///
/// Grammar: `expression := logical_or ("if" logical_or "else" expression)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let value = parse_logical_or(tokens)?;

    let Some((Token::If, line)) = tokens.peek() else {
        return Ok(value);
    };
    let line = *line;
    tokens.next();

    let condition = parse_logical_or(tokens)?;
    match tokens.next() {
        Some((Token::Else, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'else' in conditional expression, found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }
    let alternative = parse_expression(tokens)?;

    Ok(Expr::IfExpr { condition: Box::new(condition),
                      then_branch: Box::new(value),
                      else_branch: Some(Box::new(alternative)),
                      line })
}

/// Parses an `if` expression with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> do { <statements> }
///     else if <condition> do { <statements> }
///     else do { <statements> }
/// ```
/// The `do` keyword begins the body block for each branch.
/// Nested `else if` constructs are parsed recursively.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// An `Expr::IfExpr` node representing the full conditional expression.
///
/// # Errors
/// - `UnexpectedToken` if the expected `do`, `if`, or `else` keywords are
///   missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;

    match tokens.peek() {
        Some((Token::Do, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken {
                token: "Expected 'do' after if condition".to_string(),
                line,
            });
        },
    }

    let then_expr = parse_do_block(tokens)?;

    let else_branch = match tokens.peek() {
        Some((Token::Else, _)) => {
            tokens.next();

            match tokens.peek() {
                Some((Token::If, line2)) => {
                    tokens.next();
                    Some(Box::new(parse_if(tokens, *line2)?))
                },

                Some((Token::Do, _)) => Some(Box::new(parse_do_block(tokens)?)),

                _ => {
                    return Err(ParseError::UnexpectedToken {
                        token: "Expected 'if' or 'do' after else".to_string(),
                        line,
                    });
                },
            }
        },

        _ => None,
    };

    Ok(Expr::IfExpr { condition: Box::new(condition),
                      then_branch: Box::new(then_expr),
                      else_branch,
                      line })
}

/// Parses a command: exactly one expression, optionally surrounded by line
/// breaks.
///
/// Anything after the expression is rejected, so `1 2` or `x = 1` are errors
/// rather than silently ignored.
///
/// # Errors
/// - Any lexing error from [`tokenize`].
/// - `UnexpectedEndOfInput` for an empty command.
/// - `UnexpectedTrailingTokens` when tokens remain after the expression.
///
/// # Example
/// ```
/// use puf::interpreter::parser::core::parse_command;
///
/// assert!(parse_command("sum(cols[0])").is_ok());
/// assert!(parse_command("1 2").is_err());
/// ```
pub fn parse_command(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    skip_separators(&mut iter);
    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { line: 1 });
    }

    let expr = parse_expression(&mut iter)?;

    skip_separators(&mut iter);
    if let Some((tok, line)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                          line:  *line, });
    }

    Ok(expr)
}

/// Parses a whole program: statements separated by line breaks or `;`.
///
/// # Errors
/// - Any lexing error from [`tokenize`].
/// - `UnexpectedTrailingTokens` when a statement is followed by something
///   other than a separator.
/// - Propagates statement parsing errors.
///
/// # Example
/// ```
/// use puf::interpreter::parser::core::parse_program;
///
/// let program = parse_program("import math\ntotal = 0; total += 1\n").unwrap();
/// assert_eq!(program.len(), 3);
/// ```
pub fn parse_program(source: &str) -> ParseResult<Vec<Statement>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_separators(&mut iter);
        if iter.peek().is_none() {
            break;
        }

        statements.push(parse_statement(&mut iter)?);

        match iter.peek() {
            None | Some((Token::NewLine | Token::Semicolon, _)) => {},
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                                  line:  *line, });
            },
        }
    }

    Ok(statements)
}

/// Consumes any run of statement separators.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}
