use grammar_forge_core::{Grammar, GrammarElement as E, ProductionRule};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Plugin, PluginMetadata, Transformer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AddDescriptionOptions {
    /// Rules to wrap. Every rule when absent.
    pub rule_names: Option<Vec<String>>,
    pub description_rule: String,
}

impl Default for AddDescriptionOptions {
    fn default() -> Self {
        Self {
            rule_names: None,
            description_rule: "Description".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot add descriptions to undefined rules: {}", .0.join(", "))]
pub struct UnknownRules(pub Vec<String>);

/// Prefixes rule definitions with an optional description.
///
/// Each selected definition `d` becomes `Sequence[Optional(desc), d]`.
/// Definitions that already start that way and the description rule
/// itself are left alone, so the transform can be applied repeatedly.
/// When the description rule is missing it is added as a bare
/// `StringValue` terminal.
pub fn add_description(
    grammar: &Grammar,
    options: &AddDescriptionOptions,
) -> Result<Grammar, UnknownRules> {
    if let Some(names) = &options.rule_names {
        let unknown: Vec<String> = names
            .iter()
            .filter(|name| !grammar.contains_rule(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(UnknownRules(unknown));
        }
    }

    let description = options.description_rule.as_str();
    let selected = |rule: &ProductionRule| {
        rule.name != description
            && options
                .rule_names
                .as_ref()
                .map_or(true, |names| names.contains(&rule.name))
    };

    let mut wrapped = 0usize;
    let mut next = grammar.map_rules(|rule| {
        if !selected(rule) || is_wrapped(&rule.definition, description) {
            return rule.definition.clone();
        }
        wrapped += 1;
        E::sequence(vec![
            E::optional(E::non_terminal(description)),
            rule.definition.clone(),
        ])
    });

    if wrapped > 0 && !next.contains_rule(description) {
        next = next.with_rule(ProductionRule::new(description, E::terminal("StringValue")));
    }

    tracing::trace!(wrapped, description_rule = %description, "added descriptions");
    Ok(next)
}

fn is_wrapped(definition: &E, description: &str) -> bool {
    match definition {
        E::Sequence { elements } => matches!(
            elements.first(),
            Some(E::Optional { element }) if element.references(description)
        ),
        _ => false,
    }
}

pub struct AddDescriptionTransformer {
    metadata: PluginMetadata,
}

impl AddDescriptionTransformer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Add description",
                "Prefixes rule definitions with an optional description",
            ),
        }
    }
}

impl Default for AddDescriptionTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for AddDescriptionTransformer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        let options: AddDescriptionOptions = options.check()?;
        if options.description_rule.is_empty() {
            return Err(vec!["descriptionRule must not be empty".to_string()]);
        }
        Ok(())
    }
}

impl Transformer for AddDescriptionTransformer {
    fn transform(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<Grammar, PluginFailure> {
        let options: AddDescriptionOptions = options.decode()?;
        Ok(add_description(grammar, &options)?)
    }
}
