use std::fmt;

use crate::validate::ValidationReport;

/// Errors raised by grammar construction, decoding, and validation.
///
/// External error details are kept as `String` so the type stays
/// `Clone + Eq`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GrammarError {
    /// Validation found errors (or warnings treated as errors).
    ValidationFailed(ValidationReport),
    /// A terminal pattern could not be compiled.
    InvalidPattern { pattern: String, message: String },
    /// The structured-data form could not be encoded or decoded.
    Json(String),
    /// A rule name was looked up but is not defined in the grammar.
    UnknownRule(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(report) => {
                write!(f, "grammar validation failed: ")?;
                let issues: Vec<String> = report
                    .errors
                    .iter()
                    .chain(report.warnings.iter())
                    .map(ToString::to_string)
                    .collect();
                if issues.is_empty() {
                    write!(f, "no issues recorded")
                } else {
                    write!(f, "{}", issues.join("; "))
                }
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid terminal pattern '{pattern}': {message}")
            }
            Self::Json(message) => write!(f, "structured grammar error: {message}"),
            Self::UnknownRule(name) => write!(f, "rule '{name}' is not defined"),
        }
    }
}

impl std::error::Error for GrammarError {}

impl From<serde_json::Error> for GrammarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationIssue;

    #[test]
    fn error_display_messages() {
        let cases = vec![
            (
                GrammarError::InvalidPattern {
                    pattern: "[".into(),
                    message: "unclosed class".into(),
                },
                "invalid terminal pattern '['",
            ),
            (
                GrammarError::Json("expected value".into()),
                "structured grammar error: expected value",
            ),
            (
                GrammarError::UnknownRule("Missing".into()),
                "rule 'Missing' is not defined",
            ),
        ];

        for (error, expected_prefix) in cases {
            let msg = error.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error display for {error:?} = '{msg}', expected to start with '{expected_prefix}'"
            );
        }
    }

    #[test]
    fn validation_failed_lists_issues() {
        let report = ValidationReport {
            errors: vec![ValidationIssue::MissingRoot {
                root: "Document".into(),
            }],
            warnings: vec![],
        };
        let msg = GrammarError::ValidationFailed(report).to_string();
        assert!(msg.contains("grammar validation failed"));
        assert!(msg.contains("Document"));
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(GrammarError::UnknownRule("X".into()));
        assert!(err.to_string().contains("not defined"));
    }

    #[test]
    fn from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted = GrammarError::from(err);
        assert!(matches!(converted, GrammarError::Json(_)));
    }
}
