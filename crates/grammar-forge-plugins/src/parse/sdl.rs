use grammar_forge_core::Grammar;

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Parser, Plugin, PluginMetadata};

/// The input format is recognized but cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("reading {format} input is not supported")]
pub struct UnsupportedInput {
    pub format: String,
}

/// Placeholder for reading GraphQL schema text.
///
/// Registered so pipelines can name it, but every call fails with
/// [`UnsupportedInput`].
pub struct SdlParser {
    metadata: PluginMetadata,
}

impl SdlParser {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "GraphQL SDL",
                "Reads GraphQL schema text (not supported yet)",
            ),
        }
    }
}

impl Default for SdlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SdlParser {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }
}

impl Parser for SdlParser {
    fn input_format(&self) -> Option<&str> {
        Some("graphql")
    }

    fn parse(&self, _input: &str, _options: &PluginOptions) -> Result<Grammar, PluginFailure> {
        Err(Box::new(UnsupportedInput {
            format: "GraphQL SDL".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_unsupported() {
        let err = SdlParser::new()
            .parse("type Query { id: ID }", &PluginOptions::new())
            .unwrap_err();
        assert!(err.downcast_ref::<UnsupportedInput>().is_some());
        assert_eq!(err.to_string(), "reading GraphQL SDL input is not supported");
    }
}
