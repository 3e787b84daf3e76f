use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// The matcher attached to a terminal symbol.
///
/// In structured form a literal is a bare JSON string and a regular
/// expression is an explicit `{"source": ..., "flags": ...}` object, since
/// JSON has no native regex value. [`TerminalPattern::to_regex`] is the
/// decode step that turns either form back into a compiled matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerminalPattern {
    /// Exact text, e.g. `"{"` or `"type"`.
    Literal(String),
    /// A regular expression source plus single-letter flags.
    Regex {
        source: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        flags: String,
    },
}

impl TerminalPattern {
    /// Creates a literal pattern.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a regex pattern without flags.
    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            flags: String::new(),
        }
    }

    /// Creates a regex pattern with the given flags (`i`, `m`, `s`, `x`, `U`).
    pub fn regex_with_flags(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// Returns the literal text when this is a literal pattern.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Regex { .. } => None,
        }
    }

    /// Returns true if this pattern is a regular expression.
    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regex { .. })
    }

    /// Compiles this pattern into a [`Regex`].
    ///
    /// Literals are escaped so they match their exact text. Unknown flag
    /// characters are rejected rather than ignored.
    pub fn to_regex(&self) -> Result<Regex, GrammarError> {
        match self {
            Self::Literal(text) => Regex::new(&regex::escape(text)).map_err(|e| {
                GrammarError::InvalidPattern {
                    pattern: text.clone(),
                    message: e.to_string(),
                }
            }),
            Self::Regex { source, flags } => {
                let mut builder = RegexBuilder::new(source);
                for flag in flags.chars() {
                    match flag {
                        'i' => builder.case_insensitive(true),
                        'm' => builder.multi_line(true),
                        's' => builder.dot_matches_new_line(true),
                        'x' => builder.ignore_whitespace(true),
                        'U' => builder.swap_greed(true),
                        other => {
                            return Err(GrammarError::InvalidPattern {
                                pattern: source.clone(),
                                message: format!("unsupported flag '{other}'"),
                            })
                        }
                    };
                }
                builder.build().map_err(|e| GrammarError::InvalidPattern {
                    pattern: source.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}

impl std::fmt::Display for TerminalPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text:?}"),
            Self::Regex { source, flags } => write!(f, "/{source}/{flags}"),
        }
    }
}
