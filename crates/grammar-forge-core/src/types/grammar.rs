use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

use super::element::GrammarElement;
use super::rule::ProductionRule;

/// Descriptive information carried alongside a grammar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other keys found in the structured form.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A context-free grammar: a root symbol and its production rules.
///
/// Rules keep insertion order, which is the order renderers and
/// generators present them in. The rule graph may be mutually recursive;
/// each individual definition is a finite tree.
///
/// A `Grammar` is a value. Methods that "change" it take `&self` and
/// return a new grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    pub root: String,
    pub rules: IndexMap<String, ProductionRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GrammarMetadata>,
}

impl Grammar {
    /// Creates a grammar from rules, keyed by each rule's name.
    ///
    /// A later rule with the same name replaces an earlier one but keeps
    /// the earlier position.
    pub fn new(root: impl Into<String>, rules: impl IntoIterator<Item = ProductionRule>) -> Self {
        Self {
            root: root.into(),
            rules: rules
                .into_iter()
                .map(|rule| (rule.name.clone(), rule))
                .collect(),
            metadata: None,
        }
    }

    /// Starts building a grammar with the given root symbol.
    pub fn builder(root: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder {
            root: root.into(),
            rules: IndexMap::new(),
            metadata: None,
        }
    }

    pub fn rule(&self, name: &str) -> Option<&ProductionRule> {
        self.rules.get(name)
    }

    /// Looks up a rule's definition, failing with [`GrammarError::UnknownRule`].
    pub fn definition(&self, name: &str) -> Result<&GrammarElement, GrammarError> {
        self.rules
            .get(name)
            .map(|rule| &rule.definition)
            .ok_or_else(|| GrammarError::UnknownRule(name.to_string()))
    }

    pub fn contains_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in presentation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds a new grammar whose rule definitions are produced by `f`.
    ///
    /// Root, metadata, and rule order are carried over.
    pub fn map_rules<F>(&self, mut f: F) -> Grammar
    where
        F: FnMut(&ProductionRule) -> GrammarElement,
    {
        Grammar {
            root: self.root.clone(),
            rules: self
                .rules
                .iter()
                .map(|(key, rule)| (key.clone(), rule.with_definition(f(rule))))
                .collect(),
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a copy of this grammar with `rule` inserted, replacing any
    /// rule of the same name in place or appending otherwise.
    pub fn with_rule(&self, rule: ProductionRule) -> Grammar {
        let mut next = self.clone();
        next.rules.insert(rule.name.clone(), rule);
        next
    }

    /// Returns a copy of this grammar with rules ordered by name.
    pub fn with_sorted_rules(&self) -> Grammar {
        let mut next = self.clone();
        next.rules.sort_keys();
        next
    }

    /// Returns a copy with different metadata.
    pub fn with_metadata(&self, metadata: Option<GrammarMetadata>) -> Grammar {
        Grammar {
            metadata,
            ..self.clone()
        }
    }

    // -- Structured data --

    /// Encodes this grammar into its structured-data form.
    pub fn to_json_value(&self) -> Result<serde_json::Value, GrammarError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encodes this grammar as pretty-printed JSON text.
    pub fn to_json_string_pretty(&self) -> Result<String, GrammarError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encodes this grammar as compact JSON text.
    pub fn to_json_string(&self) -> Result<String, GrammarError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a grammar from JSON text.
    ///
    /// Decoding checks shape only; run [`validate`](crate::validate) for
    /// the referential-integrity invariants.
    pub fn from_json_str(json: &str) -> Result<Grammar, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a grammar from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Grammar, GrammarError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "root: {}", self.root)?;
        for rule in self.rules.values() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Incremental constructor for [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    root: String,
    rules: IndexMap<String, ProductionRule>,
    metadata: Option<GrammarMetadata>,
}

impl GrammarBuilder {
    /// Adds (or replaces) a rule.
    pub fn rule(mut self, name: impl Into<String>, definition: GrammarElement) -> Self {
        let name = name.into();
        self.rules
            .insert(name.clone(), ProductionRule::new(name, definition));
        self
    }

    pub fn metadata(mut self, metadata: GrammarMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn build(self) -> Grammar {
        Grammar {
            root: self.root,
            rules: self.rules,
            metadata: self.metadata,
        }
    }
}
