use logos::Logos;

use crate::error::{Span, TypeRefError};
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Tokenizes a type reference.
///
/// # Errors
///
/// Returns one `TypeRefError::InvalidToken` per byte range the lexer
/// cannot match.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, Vec<TypeRefError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for (result, range) in Token::lexer(source).spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => tokens.push(SpannedToken {
                token,
                span,
                text: source[range].to_string(),
            }),
            Err(()) => errors.push(TypeRefError::InvalidToken { span }),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
