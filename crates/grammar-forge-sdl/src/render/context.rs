use crate::grammar::rules;

/// A root operation of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    /// The operation keyword, e.g. `query`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// The conventional root type name, e.g. `Query`.
    pub fn root_type(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

/// Where in the document the renderer currently is.
///
/// Contexts are never mutated. Every structural step derives a new
/// context for its subtree, so siblings cannot see each other's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext<'g> {
    pub current_rule: Option<&'g str>,
    /// Number of rules entered on the path from the root.
    pub depth: usize,
    pub in_description: bool,
    pub in_field_list: bool,
    pub in_input_fields: bool,
    pub in_arguments_definition: bool,
    pub in_directive: bool,
    pub in_enum_value: bool,
    pub in_implements: bool,
    pub in_union_members: bool,
    pub operation: Option<OperationKind>,
    /// 1-based index of the field being rendered in the nearest field list.
    pub field_index: usize,
}

impl<'g> RenderContext<'g> {
    /// Derives the context for the body of `rule`.
    pub fn entering_rule(&self, rule: &'g str) -> Self {
        let mut next = Self {
            current_rule: Some(rule),
            depth: self.depth + 1,
            ..self.clone()
        };

        match rule {
            rules::DESCRIPTION => next.in_description = true,
            rules::FIELDS_DEFINITION => {
                next = next.entering_field_list();
                next.in_input_fields = false;
            }
            rules::INPUT_FIELDS_DEFINITION => {
                next = next.entering_field_list();
                next.in_input_fields = true;
            }
            rules::ARGUMENTS_DEFINITION => next.in_arguments_definition = true,
            rules::DIRECTIVES | rules::DIRECTIVE => next = next.entering_directive(),
            rules::ENUM_VALUES_DEFINITION | rules::ENUM_VALUE_DEFINITION | rules::ENUM_VALUE => {
                next.in_enum_value = true;
            }
            rules::IMPLEMENTS_INTERFACES => next.in_implements = true,
            rules::UNION_MEMBER_TYPES => next.in_union_members = true,
            rules::OBJECT_TYPE_DEFINITION
            | rules::INTERFACE_TYPE_DEFINITION
            | rules::UNION_TYPE_DEFINITION
            | rules::ENUM_TYPE_DEFINITION
            | rules::INPUT_OBJECT_TYPE_DEFINITION
            | rules::SCALAR_TYPE_DEFINITION
            | rules::DIRECTIVE_DEFINITION
            | rules::SCHEMA_DEFINITION => {
                next = Self {
                    current_rule: Some(rule),
                    depth: next.depth,
                    ..Self::default()
                };
            }
            _ => {}
        }

        next
    }

    /// Context for the members of a `{ ... }` field list.
    ///
    /// Field lists of an input object hold input fields.
    pub fn entering_field_list(&self) -> Self {
        Self {
            in_field_list: true,
            in_input_fields: self.in_input_fields
                || self.current_rule == Some(rules::INPUT_OBJECT_TYPE_DEFINITION),
            in_description: false,
            field_index: 0,
            ..self.clone()
        }
    }

    /// Context for a parenthesized argument list of a field.
    pub fn entering_arguments_definition(&self) -> Self {
        Self {
            in_arguments_definition: true,
            ..self.clone()
        }
    }

    /// Context for a directive application (`@name(args)`).
    pub fn entering_directive(&self) -> Self {
        Self {
            in_directive: true,
            in_enum_value: false,
            in_description: false,
            ..self.clone()
        }
    }

    /// Context for one root operation entry of a schema definition.
    pub fn with_operation(&self, operation: OperationKind) -> Self {
        Self {
            operation: Some(operation),
            ..self.clone()
        }
    }

    /// Context for the next field of the current field list.
    pub fn next_field(&self) -> Self {
        Self {
            field_index: self.field_index + 1,
            ..self.clone()
        }
    }
}
