use std::iter::Peekable;

use crate::{
    ast::{ComprehensionContext, Expr, ForExprContext, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::Token,
        parser::{
            binary::{parse_exponent, parse_logical_or},
            block::parse_block,
            core::{ParseResult, parse_expression, parse_if},
            utils::{parse_comma_separated, parse_identifier, parse_map_literal},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric identity)
///
/// Unary operators are right-associative, so an input like `--x` is parsed as
/// `-( -x )`. Logical `not` binds looser and is handled by the binary parser.
///
/// If no unary operator is present, the function delegates to
/// [`parse_exponent`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | exponent
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or the exponent-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_exponent(tokens),
    };
    let Some((_, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line: *line })
}

/// Parses a primary expression followed by any postfix operators.
pub(crate) fn parse_postfix_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let primary = parse_primary(tokens)?;
    parse_postfix(tokens, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string, boolean and `None` literals
/// - identifiers
/// - parenthesized expressions and tuples
/// - list displays and list comprehensions (`[ ... ]`)
/// - mapping literals (`{ ... }`)
/// - `do` blocks
/// - `if` expressions
/// - `for` expressions
///
/// This function does not handle unary operators or postfix operators.
/// It dispatches to specialized parsing functions depending on the leading
/// token.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" ( expression ("," expression)* ","? )? ")"
///              | "[" elements "]"
///              | "[" expression "for" identifier "in" logical_or ("if" logical_or)? "]"
///              | "{" entries "}"
///              | do_block
///              | if_expression
///              | for_expression
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Real(..)
         | Token::Integer(..)
         | Token::Bool(..)
         | Token::Str(..)
         | Token::NoneLiteral,
         _) => parse_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Do, _) => parse_do_block(tokens),
        (Token::LBrace, _) => parse_map_literal(tokens),
        (Token::LBracket, _) => parse_list_literal(tokens),
        (Token::If, _) => parse_if_expression(tokens),
        (Token::For, _) => parse_for_expression(tokens),
        (Token::Identifier(name), line) => {
            let expr = Expr::Variable { name: name.clone(),
                                        line: *line, };
            tokens.next();
            Ok(expr)
        },
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// three kinds of postfix constructs, in any order and number:
///
/// 1. **Subscripts** `expr[index]` and slices `expr[start:stop:step]`.
/// 2. **Calls** `expr(arg1, arg2, ...)`.
/// 3. **Attributes** `expr.name` and method calls `expr.name(args)`.
///
/// ```text
///     line.split(",")[0].strip()
/// ```
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" subscript "]"
///              | postfix "(" arguments ")"
///              | postfix "." identifier
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an `[` is not properly closed with `]`,
/// - a `.` is not followed by an identifier,
/// - an index or argument expression fails to parse.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                node = parse_subscript(tokens, node, line)?;
            },
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    line };
            },
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let name = parse_identifier(tokens)?;

                if let Some((Token::LParen, _)) = tokens.peek() {
                    tokens.next();
                    let arguments =
                        parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                    node = Expr::MethodCall { target: Box::new(node),
                                              name,
                                              arguments,
                                              line };
                } else {
                    node = Expr::Attribute { target: Box::new(node),
                                             name,
                                             line };
                }
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses the inside of `[...]` after a postfix `[`.
///
/// A subscript without a colon is a plain index. Otherwise each of the three
/// slice bounds may be omitted: `a[1:]`, `a[:-1]`, `a[::2]`.
///
/// # Errors
/// `ExpectedClosingBracket` if the subscript is not closed with `]`.
fn parse_subscript<'a, I>(tokens: &mut Peekable<I>, target: Expr, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let start = match tokens.peek() {
        Some((Token::Colon, _)) => None,
        _ => Some(Box::new(parse_expression(tokens)?)),
    };

    if let Some(index) = start.as_ref()
       && let Some((Token::RBracket, _)) = tokens.peek()
    {
        tokens.next();
        return Ok(Expr::Index { target: Box::new(target),
                                index: index.clone(),
                                line });
    }

    match tokens.next() {
        Some((Token::Colon, _)) => {},
        _ => return Err(ParseError::ExpectedClosingBracket { line }),
    }
    let stop = parse_slice_bound(tokens)?;

    let step = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        parse_slice_bound(tokens)?
    } else {
        None
    };

    match tokens.next() {
        Some((Token::RBracket, _)) => Ok(Expr::Slice { target: Box::new(target),
                                                       start,
                                                       stop,
                                                       step,
                                                       line }),
        _ => Err(ParseError::ExpectedClosingBracket { line }),
    }
}

/// Parses an optional slice bound, which is absent before `:` or `]`.
fn parse_slice_bound<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Box<Expr>>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Colon | Token::RBracket, _)) => Ok(None),
        _ => Ok(Some(Box::new(parse_expression(tokens)?))),
    }
}

/// Parses a numeric, string, boolean or `None` literal.
///
/// Grammar (simplified):
/// ```text
///     literal := INTEGER | REAL | STRING | BOOL | "None"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at a literal.
///
/// # Returns
/// An [`Expr::Literal`] containing the parsed value.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((tok, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let value = match tok {
        Token::Real(n) => LiteralValue::Real(*n),
        Token::Integer(n) => LiteralValue::Integer(*n),
        Token::Bool(b) => LiteralValue::Bool(*b),
        Token::Str(s) => LiteralValue::Str(s.clone()),
        Token::NoneLiteral => LiteralValue::None,
        other => {
            return Err(ParseError::UnexpectedToken { token: format!("{other:?}"),
                                                     line:  *line, });
        },
    };

    Ok(Expr::Literal { value,
                       line: *line })
}

/// Parses a parenthesized expression or a tuple display.
///
/// Expected forms:
/// - `()` is the empty tuple,
/// - `( expression )` is the expression itself (no wrapper node),
/// - `( expression , ... )` is a tuple, so `(x,)` has one element.
///
/// Failure to find the closing parenthesis yields
/// `ParseError::ExpectedClosingParen`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The inner expression or an [`Expr::TupleLiteral`].
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::TupleLiteral { elements: Vec::new(),
                                       line });
    }

    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((Token::Comma, _)) => {
            let mut elements = vec![expr];
            elements.extend(parse_comma_separated(tokens, parse_expression, &Token::RParen)?);
            Ok(Expr::TupleLiteral { elements, line })
        },
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses `do { ... }` into an [`Expr::Block`].
///
/// # Errors
/// `UnexpectedToken` when `do` is not followed by `{`, plus any error of the
/// statements inside.
pub fn parse_do_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, do_line) = match tokens.next() {
        Some((Token::Do, line)) => (Token::Do, line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'do', found {tok:?}"),
                                                     line:  *line, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line: 0 });
        },
    };

    let line = match tokens.next() {
        Some((Token::LBrace, line)) => line,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '{{' after 'do', found {tok:?}"),
                                                     line:  *line, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line: *do_line });
        },
    };

    parse_block(tokens, *line)
}

/// Parses a list display `[expr1, expr2, ..., exprN]` or a list
/// comprehension `[element for var in iterable if condition]`.
///
/// The first element decides the form: when it is followed by `for`, the
/// rest is a comprehension; otherwise the remaining elements are parsed as a
/// comma-separated list.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `[`
///
/// # Returns
/// An [`Expr::ListLiteral`] or [`Expr::Comprehension`] node.
///
/// # Errors
/// Returns a `ParseError` if:
/// - elements cannot be parsed,
/// - the comprehension variable is missing or reserved,
/// - the closing `]` is missing.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::ListLiteral { elements: Vec::new(),
                                      line });
    }

    let first = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::RBracket, _)) => Ok(Expr::ListLiteral { elements: vec![first],
                                                             line }),
        Some((Token::Comma, _)) => {
            let mut elements = vec![first];
            elements.extend(parse_comma_separated(tokens, parse_expression, &Token::RBracket)?);
            Ok(Expr::ListLiteral { elements, line })
        },
        Some((Token::For, _)) => parse_comprehension(tokens, first, line),
        Some((tok, l)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected ',', 'for' or ']', found {tok:?}"),
                                              line:  *l, })
        },
        None => Err(ParseError::ExpectedClosingBracket { line }),
    }
}

/// Parses the tail of a list comprehension after its `for` keyword.
///
/// The iterable and the filter are parsed at logical-or level, so the `if`
/// of the filter is not mistaken for a conditional expression.
fn parse_comprehension<'a, I>(tokens: &mut Peekable<I>,
                              element: Expr,
                              line: usize)
                              -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = parse_loop_variable(tokens, line)?;
    let iterable = parse_logical_or(tokens)?;

    let condition = if let Some((Token::If, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_logical_or(tokens)?))
    } else {
        None
    };

    match tokens.next() {
        Some((Token::RBracket, _)) => {
            Ok(Expr::Comprehension { context: ComprehensionContext { element: Box::new(element),
                                                                     var,
                                                                     iterable:
                                                                         Box::new(iterable),
                                                                     condition },
                                     line })
        },
        _ => Err(ParseError::ExpectedClosingBracket { line }),
    }
}

/// Parses `identifier "in"` for loops and comprehensions.
///
/// The loop variable must not be reserved.
fn parse_loop_variable<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        _ => {
            return Err(ParseError::UnexpectedToken { token:
                                                         "Expected loop variable".to_string(),
                                                     line });
        },
    };

    if is_reserved_identifier(&var) {
        return Err(ParseError::IdentifierReserved { name: var, line });
    }

    match tokens.next() {
        Some((Token::In, _)) => Ok(var),
        _ => Err(ParseError::UnexpectedToken { token: "Expected 'in' after loop variable".to_string(),
                                               line }),
    }
}

/// Consumes `if` and hands over to [`parse_if`].
fn parse_if_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    parse_if(tokens, *line)
}

/// Parses `for x in iterable do { ... }`.
///
/// The iterable is parsed at `or` level, without the conditional form.
///
/// # Errors
/// A reserved or missing loop variable, a missing `in` or `do`, or errors of
/// the iterable and body.
fn parse_for_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let var = parse_loop_variable(tokens, line)?;
    let iterable = parse_logical_or(tokens)?;

    match tokens.peek() {
        Some((Token::Do, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken { token:
                                                         "Expected 'do' after for iterable".to_string(),
                                                     line });
        },
    }

    let body = parse_do_block(tokens)?;

    Ok(Expr::ForExpr { context: ForExprContext { var,
                                                 iterable: Box::new(iterable),
                                                 body: Box::new(body) },
                       line })
}
