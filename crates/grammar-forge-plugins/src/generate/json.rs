use grammar_forge_core::Grammar;
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Generator, GeneratorOutput, Plugin, PluginMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JsonGeneratorOptions {
    pub pretty: bool,
    /// Return the JSON value itself instead of text.
    pub as_data: bool,
}

impl Default for JsonGeneratorOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            as_data: false,
        }
    }
}

/// Writes the structured-data form of a grammar.
pub struct JsonGenerator {
    metadata: PluginMetadata,
}

impl JsonGenerator {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin("JSON", "Writes grammars in their JSON form"),
        }
    }
}

impl Default for JsonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for JsonGenerator {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        options.check::<JsonGeneratorOptions>().map(drop)
    }
}

impl Generator for JsonGenerator {
    fn output_format(&self) -> Option<&str> {
        Some("json")
    }

    fn generate(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<GeneratorOutput, PluginFailure> {
        let options: JsonGeneratorOptions = options.decode()?;
        let output = if options.as_data {
            GeneratorOutput::Data(grammar.to_json_value()?)
        } else if options.pretty {
            GeneratorOutput::Text(grammar.to_json_string_pretty()?)
        } else {
            GeneratorOutput::Text(grammar.to_json_string()?)
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_forge_core::GrammarElement as E;

    fn grammar() -> Grammar {
        Grammar::builder("A")
            .rule("A", E::optional(E::token("a")))
            .build()
    }

    #[test]
    fn output_parses_back() {
        let text = JsonGenerator::new()
            .generate(&grammar(), &PluginOptions::new())
            .unwrap()
            .into_text();
        assert!(text.contains('\n'));
        assert_eq!(Grammar::from_json_str(&text).unwrap(), grammar());
    }

    #[test]
    fn compact_and_data_forms() {
        let generator = JsonGenerator::new();
        let compact = generator
            .generate(&grammar(), &PluginOptions::new().with("pretty", false))
            .unwrap()
            .into_text();
        assert!(!compact.contains('\n'));

        let data = generator
            .generate(&grammar(), &PluginOptions::new().with("asData", true))
            .unwrap();
        let value = data.as_data().unwrap();
        assert_eq!(value["rules"]["A"]["definition"]["kind"], "Optional");
    }
}
