use grammar_forge_core::Grammar;
use grammar_forge_sdl::{render, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Generator, GeneratorOutput, Plugin, PluginMetadata};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SdlGeneratorOptions {
    pub include_descriptions: bool,
    pub pretty: bool,
    pub indent: usize,
    pub max_depth: usize,
}

impl Default for SdlGeneratorOptions {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            include_descriptions: render.include_descriptions,
            pretty: render.pretty,
            indent: render.indent,
            max_depth: render.max_depth,
        }
    }
}

impl From<SdlGeneratorOptions> for RenderOptions {
    fn from(options: SdlGeneratorOptions) -> Self {
        Self {
            include_descriptions: options.include_descriptions,
            pretty: options.pretty,
            indent: options.indent,
            max_depth: options.max_depth,
        }
    }
}

/// Renders one representative GraphQL schema document.
pub struct SdlGenerator {
    metadata: PluginMetadata,
}

impl SdlGenerator {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "GraphQL SDL",
                "Renders a representative GraphQL schema document",
            ),
        }
    }
}

impl Default for SdlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SdlGenerator {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        let options: SdlGeneratorOptions = options.check()?;
        if options.max_depth == 0 {
            return Err(vec!["maxDepth must be at least 1".to_string()]);
        }
        Ok(())
    }
}

impl Generator for SdlGenerator {
    fn output_format(&self) -> Option<&str> {
        Some("graphql")
    }

    fn generate(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<GeneratorOutput, PluginFailure> {
        let options: SdlGeneratorOptions = options.decode()?;
        let text = render(grammar, &options.into())?;
        Ok(GeneratorOutput::Text(text))
    }
}
