use grammar_forge_core::{Grammar, GrammarElement};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Plugin, PluginMetadata, Transformer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Order rules lexicographically by name.
    pub sort_rules: bool,
    /// Drop structurally equal alternatives of every `OneOf`.
    pub remove_duplicates: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            sort_rules: true,
            remove_duplicates: true,
        }
    }
}

/// Deduplicates choices and orders rules.
pub fn normalize(grammar: &Grammar, options: &NormalizeOptions) -> Grammar {
    let deduped = if options.remove_duplicates {
        grammar.map_rules(|rule| dedup_alternatives(&rule.definition))
    } else {
        grammar.clone()
    };

    if options.sort_rules {
        deduped.with_sorted_rules()
    } else {
        deduped
    }
}

/// Removes repeated `OneOf` alternatives, innermost first.
///
/// The first occurrence of each alternative survives and survivors keep
/// their relative order.
pub fn dedup_alternatives(element: &GrammarElement) -> GrammarElement {
    element.rewrite_bottom_up(&mut |node| match node {
        GrammarElement::OneOf { options } => {
            let mut kept: Vec<GrammarElement> = Vec::with_capacity(options.len());
            for option in options {
                if !kept.contains(&option) {
                    kept.push(option);
                }
            }
            GrammarElement::OneOf { options: kept }
        }
        other => other,
    })
}

pub struct NormalizeTransformer {
    metadata: PluginMetadata,
}

impl NormalizeTransformer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Normalize",
                "Removes duplicate alternatives and sorts rules by name",
            ),
        }
    }
}

impl Default for NormalizeTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for NormalizeTransformer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        options.check::<NormalizeOptions>().map(drop)
    }
}

impl Transformer for NormalizeTransformer {
    fn transform(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<Grammar, PluginFailure> {
        let options: NormalizeOptions = options.decode()?;
        tracing::trace!(?options, "normalizing grammar");
        Ok(normalize(grammar, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_forge_core::GrammarElement as E;

    fn sample() -> Grammar {
        Grammar::builder("Value")
            .rule(
                "Value",
                E::one_of(vec![
                    E::non_terminal("Int"),
                    E::non_terminal("String"),
                    E::non_terminal("Int"),
                ]),
            )
            .rule("String", E::terminal("String"))
            .rule("Int", E::terminal("Int"))
            .build()
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let out = normalize(&sample(), &NormalizeOptions::default());
        assert_eq!(
            out.rule("Value").unwrap().definition,
            E::one_of(vec![E::non_terminal("Int"), E::non_terminal("String")])
        );
    }

    #[test]
    fn rules_are_sorted_by_name() {
        let out = normalize(&sample(), &NormalizeOptions::default());
        assert_eq!(out.rule_names().collect::<Vec<_>>(), ["Int", "String", "Value"]);
        assert_eq!(out.root, "Value");
    }

    #[test]
    fn both_steps_can_be_disabled() {
        let options = NormalizeOptions {
            sort_rules: false,
            remove_duplicates: false,
        };
        assert_eq!(normalize(&sample(), &options), sample());
    }

    #[test]
    fn inner_duplicates_collapse_before_outer_comparison() {
        let a = E::one_of(vec![E::token("x"), E::token("x")]);
        let b = E::one_of(vec![E::token("x")]);
        let out = dedup_alternatives(&E::one_of(vec![a, b]));
        assert_eq!(out, E::one_of(vec![E::one_of(vec![E::token("x")])]));
    }

    #[test]
    fn input_is_untouched() {
        let input = sample();
        let _ = normalize(&input, &NormalizeOptions::default());
        assert_eq!(input, sample());
    }

    #[test]
    fn options_use_camel_case() {
        let options = PluginOptions::new().with("sortRules", false);
        let decoded: NormalizeOptions = options.decode().unwrap();
        assert!(!decoded.sort_rules);
        assert!(decoded.remove_duplicates);
        assert!(NormalizeTransformer::new()
            .validate_options(&PluginOptions::new().with("sort_rules", false))
            .is_err());
    }
}
