//! Terminal classification and placeholder text.

use crate::grammar::{rules, EXECUTABLE_DIRECTIVE_LOCATIONS, TYPE_SYSTEM_DIRECTIVE_LOCATIONS};

use super::context::RenderContext;

const KEYWORDS: &[&str] = &[
    "type",
    "interface",
    "union",
    "enum",
    "input",
    "scalar",
    "schema",
    "extend",
    "directive",
    "implements",
    "on",
    "repeatable",
    "query",
    "mutation",
    "subscription",
    "fragment",
    "true",
    "false",
    "null",
];

pub(crate) const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

pub(crate) const BUILTIN_DIRECTIVES: &[&str] =
    &["deprecated", "skip", "include", "specifiedBy", "oneOf"];

pub(crate) fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
        || TYPE_SYSTEM_DIRECTIVE_LOCATIONS.contains(&text)
        || EXECUTABLE_DIRECTIVE_LOCATIONS.contains(&text)
}

/// Single non-alphanumeric characters, plus the spread operator.
pub(crate) fn is_punctuator(text: &str) -> bool {
    if text == "..." {
        return true;
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric() && c != '_' && c != '"',
        _ => false,
    }
}

/// What a bare name stands for, hinted by the terminal's own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameHint {
    Any,
    TypeReference,
    Directive,
    Argument,
}

/// Lexical category of a terminal, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TerminalClass {
    Name(NameHint),
    String,
    Int,
    Float,
    Boolean,
    Null,
    Enum,
    Other,
}

pub(crate) fn classify(name: &str) -> TerminalClass {
    match name {
        "Name" | "name" | "Identifier" | "Ident" => TerminalClass::Name(NameHint::Any),
        "NamedType" | "TypeName" => TerminalClass::Name(NameHint::TypeReference),
        "DirectiveName" => TerminalClass::Name(NameHint::Directive),
        "ArgumentName" => TerminalClass::Name(NameHint::Argument),
        "StringValue" | "String" | "StringLiteral" | "BlockString" | "BlockStringValue"
        | "Description" => TerminalClass::String,
        "IntValue" | "Int" | "IntLiteral" | "Integer" => TerminalClass::Int,
        "FloatValue" | "Float" | "FloatLiteral" => TerminalClass::Float,
        "BooleanValue" | "Boolean" | "BooleanLiteral" => TerminalClass::Boolean,
        "NullValue" | "Null" => TerminalClass::Null,
        "EnumValue" => TerminalClass::Enum,
        _ => TerminalClass::Other,
    }
}

/// Placeholder for a value-like terminal with no literal pattern.
pub(crate) fn value_placeholder<'a>(
    class: TerminalClass,
    name: &'a str,
    ctx: &RenderContext<'_>,
) -> &'a str {
    match class {
        TerminalClass::String | TerminalClass::Other if ctx.in_description => {
            "\"Example description\""
        }
        TerminalClass::String => "\"example\"",
        TerminalClass::Int => "42",
        TerminalClass::Float => "3.14",
        TerminalClass::Boolean => "true",
        TerminalClass::Null => "null",
        TerminalClass::Enum => "EXAMPLE_VALUE",
        TerminalClass::Name(_) | TerminalClass::Other => name,
    }
}

/// Kinds of named types in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    Scalar,
}

impl TypeKind {
    /// The type kind a definition rule introduces, if any.
    pub(crate) fn defined_by(rule: &str) -> Option<TypeKind> {
        match rule {
            rules::OBJECT_TYPE_DEFINITION => Some(Self::Object),
            rules::INTERFACE_TYPE_DEFINITION => Some(Self::Interface),
            rules::UNION_TYPE_DEFINITION => Some(Self::Union),
            rules::ENUM_TYPE_DEFINITION => Some(Self::Enum),
            rules::INPUT_OBJECT_TYPE_DEFINITION => Some(Self::InputObject),
            rules::SCALAR_TYPE_DEFINITION => Some(Self::Scalar),
            _ => None,
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::InputObject => "input",
            Self::Scalar => "scalar",
        }
    }

    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            Self::Object => "ExampleType",
            Self::Interface => "ExampleInterface",
            Self::Union => "ExampleUnion",
            Self::Enum => "ExampleEnum",
            Self::InputObject => "ExampleInput",
            Self::Scalar => "ExampleScalar",
        }
    }
}

/// The meaning of a name at a specific position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameRole {
    TypeReference(TypeKind),
    TypeDefinition(TypeKind),
    DirectiveReference,
    DirectiveDefinition,
    Argument,
    Field,
    EnumValue,
    Generic,
}

/// Resolves what a name means here.
///
/// Checked in order: the enclosing rule when it pins the meaning down,
/// then enum-value, argument, directive and field-list flags, then type
/// definition rules.
pub(crate) fn resolve_role(hint: NameHint, ctx: &RenderContext<'_>) -> NameRole {
    let rule = ctx.current_rule.unwrap_or_default();
    match hint {
        NameHint::TypeReference => return NameRole::TypeReference(reference_kind(ctx)),
        NameHint::Directive if rule == rules::DIRECTIVE_DEFINITION => {
            return NameRole::DirectiveDefinition
        }
        NameHint::Directive => return NameRole::DirectiveReference,
        NameHint::Argument => return NameRole::Argument,
        NameHint::Any => {}
    }

    if rule == rules::NAMED_TYPE {
        NameRole::TypeReference(reference_kind(ctx))
    } else if rule == rules::ARGUMENT {
        NameRole::Argument
    } else if ctx.in_enum_value {
        NameRole::EnumValue
    } else if ctx.in_arguments_definition && rule == rules::INPUT_VALUE_DEFINITION {
        NameRole::Argument
    } else if rule == rules::DIRECTIVE_DEFINITION {
        NameRole::DirectiveDefinition
    } else if ctx.in_directive {
        NameRole::DirectiveReference
    } else if ctx.in_field_list {
        NameRole::Field
    } else if let Some(kind) = TypeKind::defined_by(rule) {
        NameRole::TypeDefinition(kind)
    } else {
        NameRole::Generic
    }
}

fn reference_kind(ctx: &RenderContext<'_>) -> TypeKind {
    if ctx.operation.is_some() || ctx.in_union_members {
        TypeKind::Object
    } else if ctx.in_implements {
        TypeKind::Interface
    } else if ctx.in_arguments_definition || ctx.in_input_fields {
        TypeKind::InputObject
    } else {
        TypeKind::Object
    }
}

/// Placeholder text for a name in the given role.
pub(crate) fn name_placeholder(role: NameRole, ctx: &RenderContext<'_>) -> String {
    match role {
        NameRole::TypeReference(kind) => match ctx.operation {
            Some(operation) => operation.root_type().to_string(),
            None => kind.placeholder().to_string(),
        },
        NameRole::TypeDefinition(kind) => kind.placeholder().to_string(),
        NameRole::DirectiveReference | NameRole::DirectiveDefinition | NameRole::Generic => {
            "example".to_string()
        }
        NameRole::Argument => "arg".to_string(),
        NameRole::Field if ctx.field_index > 1 => format!("exampleField{}", ctx.field_index),
        NameRole::Field => "exampleField".to_string(),
        NameRole::EnumValue => "EXAMPLE_VALUE".to_string(),
    }
}
