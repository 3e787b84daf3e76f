use std::fmt;

/// A byte-offset span in a type-reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors that occur while parsing a type reference such as `[String!]!`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeRefError {
    /// The input contained no tokens.
    Empty,

    /// The lexer encountered a character that does not start any token.
    InvalidToken { span: Span },

    /// The parser encountered an unexpected token.
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// The parser reached the end of input when more tokens were expected.
    UnexpectedEndOfInput { expected: String },

    /// A complete type was parsed but tokens remain.
    TrailingInput { span: Span },
}

impl fmt::Display for TypeRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "type reference is empty"),
            Self::InvalidToken { span } => write!(f, "invalid token at {span}"),
            Self::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                write!(f, "expected {expected}, found {found} at {span}")
            }
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::TrailingInput { span } => {
                write!(f, "unexpected trailing input at {span}")
            }
        }
    }
}

impl std::error::Error for TypeRefError {}

/// Errors that occur while rendering a grammar to schema text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RenderError {
    /// The grammar's root symbol is not a rule.
    MissingRoot { root: String },

    /// A `NonTerminal` names a rule the grammar does not define.
    UndefinedRule { name: String, referenced_from: String },

    /// Rule nesting exceeded the configured maximum depth.
    DepthExceeded { rule: String, limit: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot { root } => write!(f, "root rule '{root}' is not defined"),
            Self::UndefinedRule {
                name,
                referenced_from,
            } => {
                write!(
                    f,
                    "cannot render undefined rule '{name}' referenced from '{referenced_from}'"
                )
            }
            Self::DepthExceeded { rule, limit } => {
                write!(
                    f,
                    "render depth limit {limit} exceeded while entering rule '{rule}'"
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}
