use logos::Logos;

/// Tokens of a GraphQL type reference such as `[String!]!`.
///
/// Whitespace and commas are insignificant, as in SDL itself.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f,]+")]
pub enum Token {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("!")]
    Bang,

    #[regex(r"[_A-Za-z][_0-9A-Za-z]*")]
    Name,
}

impl Token {
    /// Returns a human-readable description for error messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Bang => "'!'",
            Self::Name => "type name",
        }
    }
}
