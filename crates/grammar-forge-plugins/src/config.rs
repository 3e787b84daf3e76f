use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PluginError;
use crate::options::PluginOptions;
use crate::registry::OptionsById;

/// A parse → transform → generate pipeline, usually loaded from TOML.
///
/// ```toml
/// parser = "json"
/// transformers = ["normalize", "simplify"]
/// generator = "graphql-sdl"
///
/// [options.normalize]
/// sortRules = false
///
/// [generator_options]
/// pretty = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default = "default_parser")]
    pub parser: String,
    #[serde(default)]
    pub transformers: Vec<String>,
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Transformer options keyed by transformer id.
    #[serde(default)]
    pub options: OptionsById,
    #[serde(default)]
    pub parser_options: PluginOptions,
    #[serde(default)]
    pub generator_options: PluginOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: default_parser(),
            transformers: Vec::new(),
            generator: default_generator(),
            options: OptionsById::new(),
            parser_options: PluginOptions::new(),
            generator_options: PluginOptions::new(),
        }
    }
}

fn default_parser() -> String {
    "json".to_string()
}

fn default_generator() -> String {
    "graphql-sdl".to_string()
}

impl PipelineConfig {
    /// Decodes a pipeline from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PluginError> {
        toml::from_str(text).map_err(|e| PluginError::Config {
            message: format!("invalid pipeline config: {e}"),
        })
    }

    /// Reads and decodes a pipeline file.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let text = std::fs::read_to_string(path).map_err(|e| PluginError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded pipeline config");
        Ok(config)
    }

    /// Encodes the pipeline as TOML.
    pub fn to_toml_string(&self) -> Result<String, PluginError> {
        toml::to_string(self).map_err(|e| PluginError::Config {
            message: format!("failed to encode pipeline config: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.parser, "json");
        assert_eq!(config.generator, "graphql-sdl");
    }

    #[test]
    fn options_tables_decode_as_json_objects() {
        let config = PipelineConfig::from_toml_str(
            r#"
transformers = ["normalize", "add-field"]
generator = "rust-types"

[options.normalize]
sortRules = false

[options.add-field]
ruleName = "ObjectTypeDefinition"
fieldName = "id"
fieldType = "ID!"

[[options.add-field.arguments]]
name = "first"
type = "Int"
defaultValue = 10
"#,
        )
        .unwrap();

        assert_eq!(config.transformers, ["normalize", "add-field"]);
        assert_eq!(config.options["normalize"].get("sortRules"), Some(&json!(false)));
        let add_field = &config.options["add-field"];
        assert_eq!(
            add_field.get("arguments"),
            Some(&json!([{ "name": "first", "type": "Int", "defaultValue": 10 }]))
        );
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let err = PipelineConfig::from_toml_str("generatr = \"json\"").unwrap_err();
        assert!(matches!(err, PluginError::Config { .. }));
        assert!(err.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn toml_round_trip() {
        let config = PipelineConfig {
            transformers: vec!["simplify".into()],
            generator_options: PluginOptions::new().with("pretty", false),
            ..PipelineConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(PipelineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
