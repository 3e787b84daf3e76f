//! Injects a field definition into a rule's field list.
//!
//! The field is built as a grammar subtree:
//!
//! ```text
//! Sequence[ Description?, Name, Arguments?, ":", Type, Directive* ]
//! ```
//!
//! and spliced into the first field-list container found in the target
//! rule. The container is replaced by an inline `{ List(field) }` block,
//! so the rule afterwards describes exactly the new field.

use grammar_forge_core::{Grammar, GrammarElement as E, TerminalPattern};
use grammar_forge_sdl::{rules, TypeRef, TypeRefError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PluginFailure;
use crate::options::PluginOptions;
use crate::plugin::{Plugin, PluginMetadata, Transformer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddFieldOptions {
    pub rule_name: String,
    pub field_name: String,
    /// A type reference such as `[String!]!`.
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Vec<FieldArgument>,
    #[serde(default)]
    pub directives: Vec<FieldDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FieldArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    /// Strings are taken as schema source text; other values as JSON.
    #[serde(default)]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDirective {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<DirectiveArgument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectiveArgument {
    pub name: String,
    /// Strings are taken as schema source text; other values as JSON.
    pub value: Value,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AddFieldError {
    #[error("rule '{0}' is not defined")]
    UnknownRule(String),

    #[error("invalid type '{type_ref}': {source}")]
    InvalidType {
        type_ref: String,
        source: TypeRefError,
    },

    #[error("'{0}' is not a valid name")]
    InvalidName(String),
}

impl AddFieldOptions {
    /// Every problem with these options that can be found without a grammar.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.rule_name.is_empty() {
            problems.push("ruleName must not be empty".to_string());
        }

        let mut name = |what: &str, value: &str| {
            if !is_name(value) {
                problems.push(format!("{what} '{value}' is not a valid name"));
            }
        };
        name("fieldName", &self.field_name);
        for argument in &self.arguments {
            name("argument name", &argument.name);
        }
        for directive in &self.directives {
            name("directive name", &directive.name);
            for argument in &directive.arguments {
                name("directive argument name", &argument.name);
            }
        }

        let types = std::iter::once(&self.field_type)
            .chain(self.arguments.iter().map(|a| &a.type_ref));
        for source in types {
            if let Err(err) = TypeRef::parse(source) {
                problems.push(format!("invalid type '{source}': {err}"));
            }
        }

        problems
    }
}

/// Returns a grammar in which `options.rule_name` holds the new field.
pub fn add_field(grammar: &Grammar, options: &AddFieldOptions) -> Result<Grammar, AddFieldError> {
    let rule = grammar
        .rule(&options.rule_name)
        .ok_or_else(|| AddFieldError::UnknownRule(options.rule_name.clone()))?;

    let container = field_container(field_element(options)?);
    let definition = match replace_first_container(&rule.definition, &container) {
        Some(replaced) => replaced,
        None => {
            tracing::trace!(rule = %rule.name, "no field list found, appending one");
            append(&rule.definition, container)
        }
    };

    Ok(grammar.with_rule(rule.with_definition(definition)))
}

/// The subtree for one field definition.
pub fn field_element(options: &AddFieldOptions) -> Result<E, AddFieldError> {
    let mut elements = Vec::new();
    if let Some(description) = &options.description {
        elements.push(literal(rules::DESCRIPTION, string_literal(description)));
    }
    elements.push(literal("Name", checked_name(&options.field_name)?));
    if !options.arguments.is_empty() {
        elements.push(arguments_element(&options.arguments)?);
    }
    elements.push(E::token(":"));
    elements.push(type_element(&options.field_type)?);
    for directive in &options.directives {
        elements.push(directive_element(directive)?);
    }
    Ok(E::sequence(elements))
}

fn arguments_element(arguments: &[FieldArgument]) -> Result<E, AddFieldError> {
    let mut items = Vec::with_capacity(arguments.len());
    for argument in arguments {
        let mut parts = vec![
            literal("ArgumentName", checked_name(&argument.name)?),
            E::token(":"),
            type_element(&argument.type_ref)?,
        ];
        if let Some(value) = &argument.default_value {
            parts.push(E::sequence(vec![E::token("="), value_element(value)]));
        }
        items.push(E::sequence(parts));
    }
    Ok(parenthesized(items))
}

fn directive_element(directive: &FieldDirective) -> Result<E, AddFieldError> {
    let mut parts = vec![
        E::token("@"),
        literal("DirectiveName", checked_name(&directive.name)?),
    ];
    if !directive.arguments.is_empty() {
        let mut items = Vec::with_capacity(directive.arguments.len());
        for argument in &directive.arguments {
            items.push(E::sequence(vec![
                literal("ArgumentName", checked_name(&argument.name)?),
                E::token(":"),
                value_element(&argument.value),
            ]));
        }
        parts.push(parenthesized(items));
    }
    Ok(E::sequence(parts))
}

/// `Sequence["(", a, ",", b, ..., ")"]`
fn parenthesized(items: Vec<E>) -> E {
    let mut elements = vec![E::token("(")];
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            elements.push(E::token(","));
        }
        elements.push(item);
    }
    elements.push(E::token(")"));
    E::sequence(elements)
}

fn type_element(source: &str) -> Result<E, AddFieldError> {
    TypeRef::parse(source)
        .map(|type_ref| type_ref.to_element())
        .map_err(|source_err| AddFieldError::InvalidType {
            type_ref: source.to_string(),
            source: source_err,
        })
}

fn value_element(value: &Value) -> E {
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    literal("Value", text)
}

fn literal(name: &str, text: String) -> E {
    E::terminal_with_pattern(name, TerminalPattern::literal(text))
}

/// A double-quoted string with JSON escapes, which schema strings accept.
fn string_literal(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn checked_name(name: &str) -> Result<String, AddFieldError> {
    if is_name(name) {
        Ok(name.to_string())
    } else {
        Err(AddFieldError::InvalidName(name.to_string()))
    }
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// `Sequence["{", List(field), "}"]`
fn field_container(field: E) -> E {
    E::sequence(vec![E::token("{"), E::list(field), E::token("}")])
}

fn is_container(element: &E) -> bool {
    match element {
        E::NonTerminal { name } => {
            name == rules::FIELDS_DEFINITION || name == rules::INPUT_FIELDS_DEFINITION
        }
        E::Sequence { elements } => matches!(
            elements.as_slice(),
            [open, E::List { .. }, close] if open.is_token("{") && close.is_token("}")
        ),
        _ => false,
    }
}

/// Replaces the first container in pre-order, or returns `None`.
fn replace_first_container(element: &E, replacement: &E) -> Option<E> {
    if is_container(element) {
        return Some(replacement.clone());
    }
    match element {
        E::Sequence { elements } => replace_in_sequence(elements, replacement).map(E::sequence),
        E::OneOf { options } => replace_in(options, replacement).map(E::one_of),
        E::Optional { element } => replace_first_container(element, replacement).map(E::optional),
        E::List { element } => replace_first_container(element, replacement).map(E::list),
        E::Terminal { .. } | E::NonTerminal { .. } => None,
    }
}

/// Like `replace_in`, but also matches a `"{", List, "}"` run that a
/// flattening pass has spliced into the sequence.
fn replace_in_sequence(elements: &[E], replacement: &E) -> Option<Vec<E>> {
    for index in 0..elements.len() {
        if is_flattened_container(&elements[index..]) {
            let mut next = elements[..index].to_vec();
            next.push(replacement.clone());
            next.extend_from_slice(&elements[index + 3..]);
            return Some(next);
        }
        if let Some(replaced) = replace_first_container(&elements[index], replacement) {
            let mut next = elements.to_vec();
            next[index] = replaced;
            return Some(next);
        }
    }
    None
}

fn is_flattened_container(window: &[E]) -> bool {
    matches!(
        window,
        [open, E::List { .. }, close, ..] if open.is_token("{") && close.is_token("}")
    )
}

fn replace_in(children: &[E], replacement: &E) -> Option<Vec<E>> {
    children.iter().enumerate().find_map(|(index, child)| {
        replace_first_container(child, replacement).map(|replaced| {
            let mut next = children.to_vec();
            next[index] = replaced;
            next
        })
    })
}

fn append(definition: &E, container: E) -> E {
    match definition {
        E::Sequence { elements } => {
            let mut elements = elements.clone();
            elements.push(container);
            E::sequence(elements)
        }
        other => E::sequence(vec![other.clone(), container]),
    }
}

pub struct AddFieldTransformer {
    metadata: PluginMetadata,
}

impl AddFieldTransformer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::builtin(
                "Add field",
                "Adds a field definition to the field list of a rule",
            ),
        }
    }
}

impl Default for AddFieldTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for AddFieldTransformer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_options(&self, options: &PluginOptions) -> Result<(), Vec<String>> {
        let options: AddFieldOptions = options.check()?;
        let problems = options.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

impl Transformer for AddFieldTransformer {
    fn transform(
        &self,
        grammar: &Grammar,
        options: &PluginOptions,
    ) -> Result<Grammar, PluginFailure> {
        let options: AddFieldOptions = options.decode()?;
        tracing::trace!(rule = %options.rule_name, field = %options.field_name, "adding field");
        Ok(add_field(grammar, &options)?)
    }
}
