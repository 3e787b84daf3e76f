use std::fmt;

use grammar_forge_core::Grammar;
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;

/// The three plugin registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Parser,
    Transformer,
    Generator,
}

impl PluginKind {
    pub const ALL: [PluginKind; 3] = [Self::Parser, Self::Transformer, Self::Generator];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parser => "parser",
            Self::Transformer => "transformer",
            Self::Generator => "generator",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive information every plugin carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl PluginMetadata {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    /// Metadata stamped with this crate's version.
    pub(crate) fn builtin(name: &str, description: &str) -> Self {
        Self::new(name, env!("CARGO_PKG_VERSION"), description)
    }
}

/// Behavior shared by every plugin kind.
pub trait Plugin: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    /// Checks caller-supplied options before the plugin runs.
    ///
    /// Returns every problem found. The default accepts anything.
    fn validate_options(&self, _options: &PluginOptions) -> Result<(), Vec<String>> {
        Ok(())
    }
}

/// Turns source text into a grammar.
pub trait Parser: Plugin {
    /// The input format this parser reads, e.g. `json`.
    fn input_format(&self) -> Option<&str> {
        None
    }

    fn parse(&self, input: &str, options: &PluginOptions) -> Result<Grammar, PluginFailure>;
}

/// Produces a new grammar from an existing one.
///
/// Implementations must not rely on observing their own output later;
/// the registry threads the returned value into the next stage.
pub trait Transformer: Plugin {
    fn transform(&self, grammar: &Grammar, options: &PluginOptions)
        -> Result<Grammar, PluginFailure>;
}

/// Renders a grammar into some output form.
pub trait Generator: Plugin {
    /// The output format this generator writes, e.g. `graphql`.
    fn output_format(&self) -> Option<&str> {
        None
    }

    fn generate(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<GeneratorOutput, PluginFailure>;
}

/// What a generator produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratorOutput {
    Text(String),
    Data(serde_json::Value),
}

impl GeneratorOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Text(_) => None,
            Self::Data(value) => Some(value),
        }
    }

    /// Text output as is; data output pretty-printed.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Data(value) => format!("{value:#}"),
        }
    }
}

impl fmt::Display for GeneratorOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Data(value) => write!(f, "{value:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_is_lowercase() {
        let names: Vec<String> = PluginKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["parser", "transformer", "generator"]);
    }

    #[test]
    fn kind_serde_is_lowercase() {
        let json = serde_json::to_string(&PluginKind::Transformer).unwrap();
        assert_eq!(json, "\"transformer\"");
    }

    #[test]
    fn data_output_prints_as_json() {
        let output = GeneratorOutput::Data(serde_json::json!({ "root": "Document" }));
        assert!(output.as_text().is_none());
        let text = output.into_text();
        assert!(text.contains("\"root\": \"Document\""));
    }

    #[test]
    fn builtin_metadata_uses_crate_version() {
        let metadata = PluginMetadata::builtin("Normalize", "sorts rules");
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
