use grammar_forge_core::{validate, Grammar};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Plugin, PluginMetadata, Transformer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Fail the pipeline instead of logging problems.
    pub fail_on_error: bool,
    pub treat_warnings_as_errors: bool,
}

/// A pipeline checkpoint: returns the grammar unchanged when it passes.
pub struct ValidateTransformer {
    metadata: PluginMetadata,
}

impl ValidateTransformer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Validate",
                "Checks the grammar's root and references without changing it",
            ),
        }
    }
}

impl Default for ValidateTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ValidateTransformer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        options.check::<ValidateOptions>().map(drop)
    }
}

impl Transformer for ValidateTransformer {
    fn transform(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<Grammar, PluginFailure> {
        let options: ValidateOptions = options.decode()?;
        let report = validate(grammar);

        if options.fail_on_error {
            report.into_result(options.treat_warnings_as_errors)?;
        } else if !report.errors.is_empty() || !report.warnings.is_empty() {
            tracing::warn!(
                errors = report.errors.len(),
                warnings = report.warnings.len(),
                "grammar has validation issues"
            );
            for issue in report.errors.iter().chain(&report.warnings) {
                tracing::warn!(%issue, "validation issue");
            }
        }

        Ok(grammar.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_forge_core::{GrammarElement as E, GrammarError};

    fn dangling() -> Grammar {
        Grammar::builder("A")
            .rule("A", E::non_terminal("Missing"))
            .build()
    }

    fn unreachable() -> Grammar {
        Grammar::builder("A")
            .rule("A", E::terminal("x"))
            .rule("B", E::terminal("y"))
            .build()
    }

    #[test]
    fn passes_valid_grammars_through() {
        let plugin = ValidateTransformer::new();
        let options = PluginOptions::new().with("failOnError", true);
        let g = Grammar::builder("A").rule("A", E::terminal("x")).build();
        assert_eq!(plugin.transform(&g, &options).unwrap(), g);
    }

    #[test]
    fn logs_by_default() {
        let plugin = ValidateTransformer::new();
        let out = plugin.transform(&dangling(), &PluginOptions::new()).unwrap();
        assert_eq!(out, dangling());
    }

    #[test]
    fn fails_when_asked() {
        let plugin = ValidateTransformer::new();
        let options = PluginOptions::new().with("failOnError", true);
        let err = plugin.transform(&dangling(), &options).unwrap_err();
        let grammar_error = err.downcast_ref::<GrammarError>().unwrap();
        assert!(matches!(grammar_error, GrammarError::ValidationFailed(_)));
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn warnings_fail_only_when_promoted() {
        let plugin = ValidateTransformer::new();
        let lenient = PluginOptions::new().with("failOnError", true);
        assert!(plugin.transform(&unreachable(), &lenient).is_ok());

        let strict = lenient.with("treatWarningsAsErrors", true);
        assert!(plugin.transform(&unreachable(), &strict).is_err());
    }
}
