use grammar_forge_core::Grammar;
use grammar_forge_sdl::print_rust_types;

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Generator, GeneratorOutput, Plugin, PluginMetadata};

/// Writes one placeholder Rust struct per rule.
pub struct RustTypesGenerator {
    metadata: PluginMetadata,
}

impl RustTypesGenerator {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Rust types",
                "Writes a placeholder Rust struct for every rule",
            ),
        }
    }
}

impl Default for RustTypesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for RustTypesGenerator {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        match options.keys().next() {
            Some(key) => Err(vec![format!("unknown option '{key}'")]),
            None => Ok(()),
        }
    }
}

impl Generator for RustTypesGenerator {
    fn output_format(&self) -> Option<&str> {
        Some("rust")
    }

    fn generate(
        &self,
        grammar: &Grammar,
        _options: &PluginOptions,
    ) -> Result<GeneratorOutput, PluginFailure> {
        Ok(GeneratorOutput::Text(print_rust_types(grammar)))
    }
}
