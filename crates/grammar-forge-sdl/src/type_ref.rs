//! GraphQL type references (`String`, `[Post!]!`, ...) and their grammar
//! element form.

use std::fmt;

use grammar_forge_core::{GrammarElement, TerminalPattern};

use crate::error::{Span, TypeRefError};
use crate::lexer::SpannedToken;
use crate::token::Token;

/// Terminal name used for a literal type name inside an element tree.
pub const NAMED_TYPE_TERMINAL: &str = "NamedType";

/// A parsed GraphQL type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Parses a type reference like `[String!]!`.
    pub fn parse(source: &str) -> Result<TypeRef, TypeRefError> {
        let tokens = crate::lexer::tokenize(source)
            .map_err(|errors| errors.into_iter().next().unwrap_or(TypeRefError::Empty))?;
        if tokens.is_empty() {
            return Err(TypeRefError::Empty);
        }
        let mut parser = Parser::new(tokens);
        let parsed = parser.parse_type()?;
        if let Some(extra) = parser.peek() {
            return Err(TypeRefError::TrailingInput {
                span: extra.span.clone(),
            });
        }
        Ok(parsed)
    }

    /// The innermost named type.
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Builds the element subtree for this reference.
    ///
    /// A named type becomes a `NamedType` terminal carrying the name as a
    /// literal, a list wraps its inner subtree in bracket tokens, and a
    /// non-null wrapper appends a `!` token. `[String!]!` therefore nests
    /// bang, bracket, bang around the named type.
    pub fn to_element(&self) -> GrammarElement {
        match self {
            Self::Named(name) => GrammarElement::terminal_with_pattern(
                NAMED_TYPE_TERMINAL,
                TerminalPattern::literal(name.clone()),
            ),
            Self::List(inner) => GrammarElement::sequence(vec![
                GrammarElement::token("["),
                inner.to_element(),
                GrammarElement::token("]"),
            ]),
            Self::NonNull(inner) => {
                GrammarElement::sequence(vec![inner.to_element(), GrammarElement::token("!")])
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl std::str::FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

/// Recursive descent parser over type-reference tokens.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<SpannedToken, TypeRefError> {
        match self.advance() {
            Some(st) if st.token == expected => Ok(st),
            Some(st) => Err(unexpected(expected.description(), &st)),
            None => Err(TypeRefError::UnexpectedEndOfInput {
                expected: expected.description().to_string(),
            }),
        }
    }

    /// type = ( "[" type "]" | Name ) "!"?
    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        let base = match self.advance() {
            Some(st) if st.token == Token::LBracket => {
                let inner = self.parse_type()?;
                self.expect(Token::RBracket)?;
                TypeRef::List(Box::new(inner))
            }
            Some(st) if st.token == Token::Name => TypeRef::Named(st.text),
            Some(st) => return Err(unexpected("type name or '['", &st)),
            None => {
                return Err(TypeRefError::UnexpectedEndOfInput {
                    expected: "type name or '['".to_string(),
                })
            }
        };

        if self.peek().is_some_and(|st| st.token == Token::Bang) {
            self.advance();
            Ok(TypeRef::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }
}

fn unexpected(expected: &str, st: &SpannedToken) -> TypeRefError {
    TypeRefError::UnexpectedToken {
        expected: expected.to_string(),
        found: format!("{} ('{}')", st.token.description(), st.text),
        span: Span::new(st.span.start, st.span.end),
    }
}
