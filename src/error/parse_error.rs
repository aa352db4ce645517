use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error on line {line}: Expected closing bracket ']' but none found.")]
    ExpectedClosingBracket {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The function definition syntax was invalid.
    #[error("Error on line {line}: Invalid function definition syntax. Example: f(x) = x * x")]
    InvalidFunctionDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after parsing should have completed.
    #[error("Error on line {line}: Extra tokens after expression. Check your input: {token}")]
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A string literal contained an unknown escape sequence.
    #[error("Error on line {line}: Invalid escape sequence in string literal: {literal}")]
    InvalidStringLiteral {
        /// The offending literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to bind a keyword or builtin name.
    #[error("Error on line {line}: Identifier {name} is reserved.")]
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer literal does not fit into 64 bits.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Returns the source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedClosingParen { line }
            | Self::ExpectedClosingBracket { line }
            | Self::InvalidFunctionDefinition { line }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::InvalidStringLiteral { line, .. }
            | Self::IdentifierReserved { line, .. }
            | Self::LiteralTooLarge { line } => *line,
        }
    }
}
