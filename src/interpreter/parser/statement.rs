use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses one statement of a script or block.
///
/// Imports, assignments and function definitions are recognised by a short
/// lookahead; anything else is an expression statement, tagged with the line
/// of its first token.
///
/// # Example
/// ```
/// use puf::{ast::Statement, interpreter::parser::core::parse_program};
///
/// let program = parse_program("area(w, h) = w * h").unwrap();
/// assert!(matches!(&program[0], Statement::Function(def) if def.params == ["w", "h"]));
/// ```
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_import(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(statement);
    }

    let current_line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;

    Ok(Statement::Expression { expr,
                               line: current_line })
}

/// Parses an import statement of the form `import <name> ("," <name>)*`.
///
/// If the next token is not `import`, this function returns `Ok(None)` and
/// does not consume any input.
///
/// # Errors
/// Returns a `ParseError` if a module name is missing.
fn parse_import<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Import, line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;
    tokens.next();

    let mut names = vec![parse_identifier(tokens)?];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        names.push(parse_identifier(tokens)?);
    }

    Ok(Some(Statement::Import { names, line }))
}

/// Parses `name = expr` or `name op= expr` with `op` one of `+ - * /`.
///
/// Nothing is consumed unless an identifier is directly followed by an
/// assignment operator. Builtin names cannot be rebound.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), _)) = tokens.peek() else {
        return Ok(None);
    };
    let name = name.clone();

    let mut lookahead = tokens.clone();
    lookahead.next();
    let (op, line) = match lookahead.peek() {
        Some((Token::Equals, line)) => (None, *line),
        Some((Token::PlusAssign, line)) => (Some(BinaryOperator::Add), *line),
        Some((Token::MinusAssign, line)) => (Some(BinaryOperator::Sub), *line),
        Some((Token::MulAssign, line)) => (Some(BinaryOperator::Mul), *line),
        Some((Token::DivAssign, line)) => (Some(BinaryOperator::Div), *line),
        _ => return Ok(None),
    };

    if is_reserved_identifier(&name) {
        return Err(ParseError::IdentifierReserved { name, line });
    }

    // Identifier and operator.
    tokens.next();
    tokens.next();

    let value = parse_expression(tokens)?;
    Ok(Some(match op {
                None => Statement::Assignment { name, value, line },
                Some(op) => Statement::CompoundAssignment { name,
                                                            op,
                                                            value,
                                                            line },
            }))
}

/// Parses `name(a, b) = expr`.
///
/// A call such as `f(x)` looks the same up to its closing parenthesis, so
/// the definition is only committed to once `=` follows the balanced
/// parentheses; until then nothing is consumed.
///
/// # Errors
/// - `InvalidFunctionDefinition` if the parameters are not distinct
///   identifiers.
/// - `IdentifierReserved` for a builtin name.
/// - `UnexpectedEndOfInput` if the parentheses never close.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let current_line = tokens.peek().map_or(0, |(_, l)| *l);
    let Some((Token::Identifier(name), _)) = tokens.peek() else {
        return Ok(None);
    };
    let name = name.clone();

    let mut lookahead = tokens.clone();
    lookahead.next();
    let Some((Token::LParen, _)) = lookahead.peek() else {
        return Ok(None);
    };
    lookahead.next();

    let mut parens = 1;
    while parens > 0 {
        match lookahead.next() {
            Some((Token::LParen, _)) => parens += 1,
            Some((Token::RParen, _)) => parens -= 1,
            Some(_) => {},
            None => return Err(ParseError::UnexpectedEndOfInput { line: current_line }),
        }
    }

    let Some((Token::Equals, line)) = lookahead.peek() else {
        return Ok(None);
    };
    let line = *line;

    if is_reserved_identifier(&name) {
        return Err(ParseError::IdentifierReserved { name, line });
    }

    // Name and opening parenthesis.
    tokens.next();
    tokens.next();

    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)
                 .map_err(|_| ParseError::InvalidFunctionDefinition { line })?;
    if params.iter()
             .enumerate()
             .any(|(i, param)| params[..i].contains(param))
    {
        return Err(ParseError::InvalidFunctionDefinition { line });
    }
    tokens.next();

    let body = parse_expression(tokens)?;
    Ok(Some(Statement::Function(FunctionDef { name,
                                              params,
                                              body,
                                              line })))
}
