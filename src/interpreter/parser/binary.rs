use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_postfix_expression, parse_unary},
        },
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or`.
/// Precedence is lower than `and`.
///
/// Grammar: `logical_or := logical_and ("or" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An `Expr::Logical` tree using `LogicalOperator::Or`.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;

    while let Some((Token::Or, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_logical_and(tokens)?;

        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::Or,
                               right: Box::new(right),
                               line };
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `and`.
/// Precedence is higher than `or` and lower than `not`.
///
/// Grammar: `logical_and := logical_not ("and" logical_not)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// An `Expr::Logical` tree using `LogicalOperator::And`.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_not(tokens)?;

    while let Some((Token::And, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_logical_not(tokens)?;

        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::And,
                               right: Box::new(right),
                               line };
    }

    Ok(left)
}

/// Parses a prefix `not`.
///
/// `not` binds looser than comparisons, so `not a == b` is `not (a == b)`.
///
/// Grammar: `logical_not := "not" logical_not | comparison`
pub fn parse_logical_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_logical_not(tokens)?;
        return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                  expr: Box::new(expr),
                                  line });
    }

    parse_comparison(tokens)
}

/// Parses comparison, membership and identity operators.
///
/// This parser handles `<`, `>`, `<=`, `>=`, `==`, `!=`, `in`, `not in`, `is`
/// and `is not`. Comparisons chain: `a < b < c` means `a < b and b < c`,
/// with the middle operand evaluated once per comparison it takes part in.
///
/// Grammar: `comparison := additive (comparison_op additive)*`
///
/// # Parameters
/// - `tokens`: Token stream (token + line number) wrapped in a `Peekable`.
///
/// # Returns
/// A single `Expr::BinaryOp`, or an `and`-chain of them for chained
/// comparisons.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;
    let mut chain: Option<Expr> = None;

    while let Some((op, line)) = peek_comparison_operator(tokens) {
        consume_comparison_operator(tokens, op);
        let right = parse_additive(tokens)?;

        let comparison = Expr::BinaryOp { left: Box::new(left),
                                          op,
                                          right: Box::new(right.clone()),
                                          line };
        chain = Some(match chain {
                         None => comparison,
                         Some(previous) => Expr::Logical { left: Box::new(previous),
                                                           op: LogicalOperator::And,
                                                           right: Box::new(comparison),
                                                           line },
                     });
        left = right;
    }

    Ok(chain.unwrap_or(left))
}

/// Looks at the next one or two tokens for a comparison operator.
fn peek_comparison_operator<'a, I>(tokens: &mut Peekable<I>) -> Option<(BinaryOperator, usize)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = tokens.peek()?;
    let line = *line;

    match token {
        Token::Not => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((Token::In, _)) => Some((BinaryOperator::NotIn, line)),
                _ => None,
            }
        },
        Token::Is => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((Token::Not, _)) => Some((BinaryOperator::IsNot, line)),
                _ => Some((BinaryOperator::Is, line)),
            }
        },
        token => token_to_binary_operator(token).filter(|op| is_relational_op(*op))
                                                .map(|op| (op, line)),
    }
}

/// Consumes the tokens of an operator found by [`peek_comparison_operator`].
fn consume_comparison_operator<'a, I>(tokens: &mut Peekable<I>, op: BinaryOperator)
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    if matches!(op, BinaryOperator::NotIn | BinaryOperator::IsNot) {
        tokens.next();
    }
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `//` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "//" | "%") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Mul
                       | BinaryOperator::Div
                       | BinaryOperator::FloorDiv
                       | BinaryOperator::Mod)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// The exponent is parsed as a unary expression, which in turn reaches back
/// here, so `a ** b ** c` parses as `a ** (b ** c)` and `2 ** -1` is
/// accepted. Because the base is a postfix expression, `-2 ** 2` is
/// `-(2 ** 2)`.
///
/// The rule is: `exponent := postfix ("**" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix_expression(tokens)?;

    if let Some((Token::DoubleStar, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   line });
    }

    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token on its own represents a
/// binary operator (`+`, `-`, `*`, `/`, `//`, `%`, `**`, the comparison
/// operators, `in` and `is`). The two-token forms `not in` and `is not` are
/// recognized by the comparison parser. Returns `None` for all other tokens.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use puf::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleSlash),
///            Some(BinaryOperator::FloorDiv));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::In => Some(BinaryOperator::In),
        Token::Is => Some(BinaryOperator::Is),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the comparison class.
///
/// Supported categories:
/// - Strict relations: `<`, `>`
/// - Non-strict relations: `<=`, `>=`
/// - Equality: `==`, `!=`
/// - Membership and identity: `in`, `not in`, `is`, `is not`
///
/// # Example
/// ```
/// use puf::{ast::BinaryOperator, interpreter::parser::binary::is_relational_op};
///
/// assert!(is_relational_op(BinaryOperator::Less));
/// assert!(is_relational_op(BinaryOperator::NotIn));
/// assert!(!is_relational_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::In
             | BinaryOperator::NotIn
             | BinaryOperator::Is
             | BinaryOperator::IsNot)
}
