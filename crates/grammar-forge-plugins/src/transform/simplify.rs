use grammar_forge_core::{Grammar, GrammarElement};
use serde::{Deserialize, Serialize};

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Plugin, PluginMetadata, Transformer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SimplifyOptions {
    /// Splice the children of a nested `Sequence` into its parent.
    pub flatten_sequences: bool,
    /// Replace a one-element `Sequence` or `OneOf` by that element.
    pub collapse_singletons: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            flatten_sequences: true,
            collapse_singletons: true,
        }
    }
}

/// Flattens and collapses every rule definition. Applying it twice gives
/// the same grammar as applying it once.
pub fn simplify(grammar: &Grammar, options: &SimplifyOptions) -> Grammar {
    grammar.map_rules(|rule| simplify_element(&rule.definition, options))
}

pub fn simplify_element(element: &GrammarElement, options: &SimplifyOptions) -> GrammarElement {
    element.rewrite_bottom_up(&mut |node| simplify_node(node, options))
}

/// Simplifies one node whose children are already simplified.
fn simplify_node(node: GrammarElement, options: &SimplifyOptions) -> GrammarElement {
    match node {
        GrammarElement::Sequence { elements } => {
            let elements = if options.flatten_sequences {
                elements
                    .into_iter()
                    .flat_map(|child| match child {
                        GrammarElement::Sequence { elements } => elements,
                        other => vec![other],
                    })
                    .collect()
            } else {
                elements
            };
            collapse(elements, options, GrammarElement::sequence)
        }
        GrammarElement::OneOf { options: alternatives } => {
            collapse(alternatives, options, GrammarElement::one_of)
        }
        other => other,
    }
}

fn collapse(
    mut children: Vec<GrammarElement>,
    options: &SimplifyOptions,
    rebuild: fn(Vec<GrammarElement>) -> GrammarElement,
) -> GrammarElement {
    if options.collapse_singletons && children.len() == 1 {
        if let Some(only) = children.pop() {
            return only;
        }
    }
    rebuild(children)
}

pub struct SimplifyTransformer {
    metadata: PluginMetadata,
}

impl SimplifyTransformer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Simplify",
                "Flattens nested sequences and collapses single-element groups",
            ),
        }
    }
}

impl Default for SimplifyTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimplifyTransformer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        options.check::<SimplifyOptions>().map(drop)
    }
}

impl Transformer for SimplifyTransformer {
    fn transform(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<Grammar, PluginFailure> {
        let options: SimplifyOptions = options.decode()?;
        tracing::trace!(?options, "simplifying grammar");
        Ok(simplify(grammar, &options))
    }
}
