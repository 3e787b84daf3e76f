use grammar_forge_core::{validate, Grammar};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Parser, Plugin, PluginMetadata};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JsonParserOptions {
    /// Reject grammars with validation errors.
    pub validate: bool,
}

/// Reads the structured-data form of a grammar.
pub struct JsonParser {
    metadata: PluginMetadata,
}

impl JsonParser {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin("JSON", "Reads grammars in their JSON form"),
        }
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for JsonParser {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        options.check::<JsonParserOptions>().map(drop)
    }
}

impl Parser for JsonParser {
    fn input_format(&self) -> Option<&str> {
        Some("json")
    }

    fn parse(&self, input: &str, options: &PluginOptions) -> Result<Grammar, PluginFailure> {
        let options: JsonParserOptions = options.decode()?;
        let grammar = Grammar::from_json_str(input)?;
        if options.validate {
            validate(&grammar).into_result(false)?;
        }
        Ok(grammar)
    }
}
