//! The built-in grammar of GraphQL type-system documents.
//!
//! Rule names follow the GraphQL specification. The renderer keys its
//! context handling off these names, so a grammar produced elsewhere that
//! uses the same names renders the same way.

use grammar_forge_core::{Grammar, GrammarElement as E, GrammarMetadata, TerminalPattern};

/// Rule names used by [`sdl_grammar`] and understood by the renderer.
pub mod rules {
    pub const DOCUMENT: &str = "Document";
    pub const DEFINITION: &str = "Definition";
    pub const SCHEMA_DEFINITION: &str = "SchemaDefinition";
    pub const ROOT_OPERATION_TYPE_DEFINITION: &str = "RootOperationTypeDefinition";
    pub const OPERATION_TYPE: &str = "OperationType";
    pub const TYPE_DEFINITION: &str = "TypeDefinition";
    pub const OBJECT_TYPE_DEFINITION: &str = "ObjectTypeDefinition";
    pub const INTERFACE_TYPE_DEFINITION: &str = "InterfaceTypeDefinition";
    pub const UNION_TYPE_DEFINITION: &str = "UnionTypeDefinition";
    pub const ENUM_TYPE_DEFINITION: &str = "EnumTypeDefinition";
    pub const INPUT_OBJECT_TYPE_DEFINITION: &str = "InputObjectTypeDefinition";
    pub const SCALAR_TYPE_DEFINITION: &str = "ScalarTypeDefinition";
    pub const IMPLEMENTS_INTERFACES: &str = "ImplementsInterfaces";
    pub const FIELDS_DEFINITION: &str = "FieldsDefinition";
    pub const FIELD_DEFINITION: &str = "FieldDefinition";
    pub const ARGUMENTS_DEFINITION: &str = "ArgumentsDefinition";
    pub const INPUT_VALUE_DEFINITION: &str = "InputValueDefinition";
    pub const INPUT_FIELDS_DEFINITION: &str = "InputFieldsDefinition";
    pub const UNION_MEMBER_TYPES: &str = "UnionMemberTypes";
    pub const ENUM_VALUES_DEFINITION: &str = "EnumValuesDefinition";
    pub const ENUM_VALUE_DEFINITION: &str = "EnumValueDefinition";
    pub const ENUM_VALUE: &str = "EnumValue";
    pub const DEFAULT_VALUE: &str = "DefaultValue";
    pub const VALUE: &str = "Value";
    pub const LIST_VALUE: &str = "ListValue";
    pub const OBJECT_VALUE: &str = "ObjectValue";
    pub const OBJECT_FIELD: &str = "ObjectField";
    pub const TYPE: &str = "Type";
    pub const NAMED_TYPE: &str = "NamedType";
    pub const LIST_TYPE: &str = "ListType";
    pub const NON_NULL_TYPE: &str = "NonNullType";
    pub const DIRECTIVES: &str = "Directives";
    pub const DIRECTIVE: &str = "Directive";
    pub const ARGUMENTS: &str = "Arguments";
    pub const ARGUMENT: &str = "Argument";
    pub const DIRECTIVE_DEFINITION: &str = "DirectiveDefinition";
    pub const DIRECTIVE_LOCATIONS: &str = "DirectiveLocations";
    pub const DIRECTIVE_LOCATION: &str = "DirectiveLocation";
    pub const DESCRIPTION: &str = "Description";
}

/// Type-system directive locations, in the order the GraphQL specification lists
/// them.
pub const TYPE_SYSTEM_DIRECTIVE_LOCATIONS: &[&str] = &[
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

/// Executable directive locations.
pub const EXECUTABLE_DIRECTIVE_LOCATIONS: &[&str] = &[
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
];

const NAME_PATTERN: &str = "[_A-Za-z][_0-9A-Za-z]*";
const STRING_PATTERN: &str = r#""([^"\\\n]|\\.)*""#;
const INT_PATTERN: &str = "-?(0|[1-9][0-9]*)";
const FLOAT_PATTERN: &str = r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?";

fn name() -> E {
    E::terminal_with_pattern("Name", TerminalPattern::regex(NAME_PATTERN))
}

fn string_value() -> E {
    E::terminal_with_pattern("StringValue", TerminalPattern::regex(STRING_PATTERN))
}

fn nt(rule: &str) -> E {
    E::non_terminal(rule)
}

fn opt(rule: &str) -> E {
    E::optional(E::non_terminal(rule))
}

/// Builds the grammar of GraphQL type-system documents.
///
/// The root is `Document`. Every rule is reachable from it and every
/// reference resolves, so the grammar validates without findings.
pub fn sdl_grammar() -> Grammar {
    use rules::*;

    Grammar::builder(DOCUMENT)
        .rule(DOCUMENT, E::list(nt(DEFINITION)))
        .rule(
            DEFINITION,
            E::one_of(vec![
                nt(SCHEMA_DEFINITION),
                nt(TYPE_DEFINITION),
                nt(DIRECTIVE_DEFINITION),
            ]),
        )
        .rule(
            SCHEMA_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("schema"),
                opt(DIRECTIVES),
                E::token("{"),
                E::list(nt(ROOT_OPERATION_TYPE_DEFINITION)),
                E::token("}"),
            ]),
        )
        .rule(
            ROOT_OPERATION_TYPE_DEFINITION,
            E::sequence(vec![nt(OPERATION_TYPE), E::token(":"), nt(NAMED_TYPE)]),
        )
        .rule(
            OPERATION_TYPE,
            E::one_of(vec![
                E::token("query"),
                E::token("mutation"),
                E::token("subscription"),
            ]),
        )
        .rule(
            TYPE_DEFINITION,
            E::one_of(vec![
                nt(OBJECT_TYPE_DEFINITION),
                nt(INTERFACE_TYPE_DEFINITION),
                nt(UNION_TYPE_DEFINITION),
                nt(ENUM_TYPE_DEFINITION),
                nt(INPUT_OBJECT_TYPE_DEFINITION),
                nt(SCALAR_TYPE_DEFINITION),
            ]),
        )
        .rule(
            OBJECT_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("type"),
                name(),
                opt(IMPLEMENTS_INTERFACES),
                opt(DIRECTIVES),
                opt(FIELDS_DEFINITION),
            ]),
        )
        .rule(
            INTERFACE_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("interface"),
                name(),
                opt(IMPLEMENTS_INTERFACES),
                opt(DIRECTIVES),
                opt(FIELDS_DEFINITION),
            ]),
        )
        .rule(
            UNION_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("union"),
                name(),
                opt(DIRECTIVES),
                opt(UNION_MEMBER_TYPES),
            ]),
        )
        .rule(
            ENUM_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("enum"),
                name(),
                opt(DIRECTIVES),
                opt(ENUM_VALUES_DEFINITION),
            ]),
        )
        .rule(
            INPUT_OBJECT_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("input"),
                name(),
                opt(DIRECTIVES),
                opt(INPUT_FIELDS_DEFINITION),
            ]),
        )
        .rule(
            SCALAR_TYPE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("scalar"),
                name(),
                opt(DIRECTIVES),
            ]),
        )
        .rule(
            IMPLEMENTS_INTERFACES,
            E::one_of(vec![
                E::sequence(vec![E::token("implements"), nt(NAMED_TYPE)]),
                E::sequence(vec![nt(IMPLEMENTS_INTERFACES), E::token("&"), nt(NAMED_TYPE)]),
            ]),
        )
        .rule(
            FIELDS_DEFINITION,
            E::sequence(vec![
                E::token("{"),
                E::list(nt(FIELD_DEFINITION)),
                E::token("}"),
            ]),
        )
        .rule(
            FIELD_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                name(),
                opt(ARGUMENTS_DEFINITION),
                E::token(":"),
                nt(TYPE),
                opt(DIRECTIVES),
            ]),
        )
        .rule(
            ARGUMENTS_DEFINITION,
            E::sequence(vec![
                E::token("("),
                E::list(nt(INPUT_VALUE_DEFINITION)),
                E::token(")"),
            ]),
        )
        .rule(
            INPUT_VALUE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                name(),
                E::token(":"),
                nt(TYPE),
                opt(DEFAULT_VALUE),
                opt(DIRECTIVES),
            ]),
        )
        .rule(
            INPUT_FIELDS_DEFINITION,
            E::sequence(vec![
                E::token("{"),
                E::list(nt(INPUT_VALUE_DEFINITION)),
                E::token("}"),
            ]),
        )
        .rule(
            UNION_MEMBER_TYPES,
            E::one_of(vec![
                E::sequence(vec![E::token("="), nt(NAMED_TYPE)]),
                E::sequence(vec![nt(UNION_MEMBER_TYPES), E::token("|"), nt(NAMED_TYPE)]),
            ]),
        )
        .rule(
            ENUM_VALUES_DEFINITION,
            E::sequence(vec![
                E::token("{"),
                E::list(nt(ENUM_VALUE_DEFINITION)),
                E::token("}"),
            ]),
        )
        .rule(
            ENUM_VALUE_DEFINITION,
            E::sequence(vec![opt(DESCRIPTION), nt(ENUM_VALUE), opt(DIRECTIVES)]),
        )
        .rule(ENUM_VALUE, name())
        .rule(
            DEFAULT_VALUE,
            E::sequence(vec![E::token("="), nt(VALUE)]),
        )
        .rule(
            VALUE,
            E::one_of(vec![
                string_value(),
                E::terminal_with_pattern("IntValue", TerminalPattern::regex(INT_PATTERN)),
                E::terminal_with_pattern("FloatValue", TerminalPattern::regex(FLOAT_PATTERN)),
                E::terminal_with_pattern("BooleanValue", TerminalPattern::regex("true|false")),
                E::terminal_with_pattern("NullValue", TerminalPattern::literal("null")),
                nt(ENUM_VALUE),
                nt(LIST_VALUE),
                nt(OBJECT_VALUE),
            ]),
        )
        .rule(
            LIST_VALUE,
            E::sequence(vec![
                E::token("["),
                E::optional(E::list(nt(VALUE))),
                E::token("]"),
            ]),
        )
        .rule(
            OBJECT_VALUE,
            E::sequence(vec![
                E::token("{"),
                E::optional(E::list(nt(OBJECT_FIELD))),
                E::token("}"),
            ]),
        )
        .rule(
            OBJECT_FIELD,
            E::sequence(vec![name(), E::token(":"), nt(VALUE)]),
        )
        .rule(
            TYPE,
            E::one_of(vec![nt(NON_NULL_TYPE), nt(LIST_TYPE), nt(NAMED_TYPE)]),
        )
        .rule(NAMED_TYPE, name())
        .rule(
            LIST_TYPE,
            E::sequence(vec![E::token("["), nt(TYPE), E::token("]")]),
        )
        .rule(
            NON_NULL_TYPE,
            E::one_of(vec![
                E::sequence(vec![nt(NAMED_TYPE), E::token("!")]),
                E::sequence(vec![nt(LIST_TYPE), E::token("!")]),
            ]),
        )
        .rule(DIRECTIVES, E::list(nt(DIRECTIVE)))
        .rule(
            DIRECTIVE,
            E::sequence(vec![E::token("@"), name(), opt(ARGUMENTS)]),
        )
        .rule(
            ARGUMENTS,
            E::sequence(vec![E::token("("), E::list(nt(ARGUMENT)), E::token(")")]),
        )
        .rule(
            ARGUMENT,
            E::sequence(vec![name(), E::token(":"), nt(VALUE)]),
        )
        .rule(
            DIRECTIVE_DEFINITION,
            E::sequence(vec![
                opt(DESCRIPTION),
                E::token("directive"),
                E::token("@"),
                name(),
                opt(ARGUMENTS_DEFINITION),
                E::optional(E::token("repeatable")),
                E::token("on"),
                nt(DIRECTIVE_LOCATIONS),
            ]),
        )
        .rule(
            DIRECTIVE_LOCATIONS,
            E::one_of(vec![
                nt(DIRECTIVE_LOCATION),
                E::sequence(vec![
                    nt(DIRECTIVE_LOCATIONS),
                    E::token("|"),
                    nt(DIRECTIVE_LOCATION),
                ]),
            ]),
        )
        .rule(
            DIRECTIVE_LOCATION,
            E::one_of(
                TYPE_SYSTEM_DIRECTIVE_LOCATIONS
                    .iter()
                    .chain(EXECUTABLE_DIRECTIVE_LOCATIONS)
                    .map(|location| E::token(*location))
                    .collect(),
            ),
        )
        .rule(DESCRIPTION, string_value())
        .metadata(GrammarMetadata {
            name: Some("graphql-sdl".into()),
            description: Some("GraphQL type-system definition language".into()),
            ..GrammarMetadata::default()
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_forge_core::validate;

    #[test]
    fn builtin_grammar_validates_cleanly() {
        let report = validate(&sdl_grammar());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn root_is_document() {
        let g = sdl_grammar();
        assert_eq!(g.root, rules::DOCUMENT);
        assert_eq!(g.rule_names().next(), Some(rules::DOCUMENT));
    }

    #[test]
    fn regex_terminals_compile() {
        let g = sdl_grammar();
        let mut count = 0;
        for rule in g.rules.values() {
            rule.definition.walk(&mut |element| {
                if let E::Terminal {
                    pattern: Some(pattern),
                    ..
                } = element
                {
                    assert!(pattern.to_regex().is_ok(), "{pattern}");
                    count += 1;
                }
            });
        }
        assert!(count > 0);
    }

    #[test]
    fn fields_definition_is_an_inline_block() {
        let g = sdl_grammar();
        let def = g.definition(rules::FIELDS_DEFINITION).unwrap();
        let children = def.children();
        assert!(children[0].is_token("{"));
        assert!(children[2].is_token("}"));
    }
}
