//! Renders a grammar as one representative schema document.
//!
//! The renderer walks the grammar from its root and manufactures a single
//! instance of the language: the first alternative of every choice, every
//! optional part, one repetition of every list. Bare names are resolved
//! against an immutable [`RenderContext`] so the same `Name` terminal
//! becomes a type name in one place and a field name in another.
//!
//! After the walk, a closure pass appends stub definitions for every type
//! and directive the document references but does not define.

mod context;
mod layout;
mod symbols;
mod terminal;

use grammar_forge_core::{Grammar, GrammarElement, TerminalPattern};

use crate::error::RenderError;
use crate::grammar::rules;

pub use context::{OperationKind, RenderContext};
pub use terminal::TypeKind;

use layout::{Layout, Part};
use symbols::SymbolTable;
use terminal::{NameRole, TerminalClass};

/// Output controls for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit description strings. When false, description nodes render as
    /// nothing.
    pub include_descriptions: bool,
    /// Multi-line output with indented blocks. When false, everything is
    /// separated by single spaces.
    pub pretty: bool,
    /// Spaces per indentation level in pretty mode.
    pub indent: usize,
    /// Maximum number of nested rules before rendering gives up.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_descriptions: true,
            pretty: true,
            indent: 2,
            max_depth: 64,
        }
    }
}

impl RenderOptions {
    /// Single-line output.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

/// Renders `grammar` into schema text.
///
/// # Errors
///
/// Fails when the root or a referenced rule is missing, or when rule
/// nesting exceeds `options.max_depth`.
pub fn render(grammar: &Grammar, options: &RenderOptions) -> Result<String, RenderError> {
    Renderer::new(grammar, options).render_document()
}

struct Renderer<'g> {
    grammar: &'g Grammar,
    include_descriptions: bool,
    max_depth: usize,
    layout: Layout,
    symbols: SymbolTable,
}

impl<'g> Renderer<'g> {
    fn new(grammar: &'g Grammar, options: &RenderOptions) -> Self {
        Self {
            grammar,
            include_descriptions: options.include_descriptions,
            max_depth: options.max_depth,
            layout: Layout {
                pretty: options.pretty,
                indent: options.indent,
            },
            symbols: SymbolTable::default(),
        }
    }

    fn render_document(mut self) -> Result<String, RenderError> {
        let grammar = self.grammar;
        if !grammar.contains_rule(&grammar.root) {
            return Err(RenderError::MissingRoot {
                root: grammar.root.clone(),
            });
        }

        let root = RenderContext::default();
        let mut blocks = vec![self.render_rule(&grammar.root, &root)?];

        if !self.symbols.schema_rendered && grammar.contains_rule(rules::SCHEMA_DEFINITION) {
            blocks.push(self.render_rule(rules::SCHEMA_DEFINITION, &root)?);
        }

        blocks.extend(self.symbols.stubs(&self.layout));

        tracing::debug!(
            root = %grammar.root,
            blocks = blocks.len(),
            pretty = self.layout.pretty,
            "rendered grammar"
        );

        Ok(self.layout.document(&blocks))
    }

    fn render_rule(&mut self, name: &str, ctx: &RenderContext<'g>) -> Result<String, RenderError> {
        let grammar = self.grammar;
        let Some(rule) = grammar.rule(name) else {
            return Err(RenderError::UndefinedRule {
                name: name.to_string(),
                referenced_from: ctx.current_rule.unwrap_or(&grammar.root).to_string(),
            });
        };

        if ctx.depth >= self.max_depth {
            return Err(RenderError::DepthExceeded {
                rule: rule.name.clone(),
                limit: self.max_depth,
            });
        }

        if !self.include_descriptions && rule.name == rules::DESCRIPTION {
            return Ok(String::new());
        }

        if rule.name == rules::SCHEMA_DEFINITION {
            if self.symbols.schema_rendered {
                return Ok(String::new());
            }
            self.symbols.schema_rendered = true;
        }

        let inner = ctx.entering_rule(&rule.name);
        tracing::trace!(rule = %rule.name, depth = inner.depth, "rendering rule");
        self.render_element(&rule.definition, &inner)
    }

    fn render_element(
        &mut self,
        element: &'g GrammarElement,
        ctx: &RenderContext<'g>,
    ) -> Result<String, RenderError> {
        if !self.include_descriptions && is_description(element) {
            return Ok(String::new());
        }

        match element {
            GrammarElement::Terminal { name, pattern } => {
                Ok(self.render_terminal(name, pattern.as_ref(), ctx))
            }
            GrammarElement::NonTerminal { name } => self.render_rule(name, ctx),
            GrammarElement::Sequence { elements } => self.render_sequence(elements, ctx),
            GrammarElement::OneOf { options } => self.render_one_of(options, ctx),
            GrammarElement::Optional { element } => self.render_element(element, ctx),
            GrammarElement::List { element } => self.render_list(element, ctx),
        }
    }

    fn render_terminal(
        &mut self,
        name: &str,
        pattern: Option<&TerminalPattern>,
        ctx: &RenderContext<'g>,
    ) -> String {
        if terminal::is_keyword(name) || terminal::is_punctuator(name) {
            return name.to_string();
        }

        let literal = pattern.and_then(TerminalPattern::as_literal);
        match terminal::classify(name) {
            TerminalClass::Name(hint) => {
                let role = terminal::resolve_role(hint, ctx);
                let text = match literal {
                    Some(text) => text.to_string(),
                    None => terminal::name_placeholder(role, ctx),
                };
                self.record(role, &text, ctx);
                text
            }
            class => match literal {
                Some(text) => text.to_string(),
                None => terminal::value_placeholder(class, name, ctx).to_string(),
            },
        }
    }

    fn record(&mut self, role: NameRole, text: &str, ctx: &RenderContext<'g>) {
        match role {
            NameRole::TypeReference(kind) => self.symbols.reference_type(text, kind),
            NameRole::TypeDefinition(kind) => self.symbols.define_type(text, kind),
            NameRole::DirectiveReference => self.symbols.reference_directive(text),
            NameRole::DirectiveDefinition => self.symbols.define_directive(text),
            NameRole::Argument if ctx.in_directive => self.symbols.directive_argument(text),
            NameRole::Argument | NameRole::Field | NameRole::EnumValue | NameRole::Generic => {}
        }
    }

    fn render_sequence(
        &mut self,
        elements: &'g [GrammarElement],
        ctx: &RenderContext<'g>,
    ) -> Result<String, RenderError> {
        let child_ctx = match elements.first() {
            Some(first) if first.is_token("@") => ctx.entering_directive(),
            Some(first) if first.is_token("(") && ctx.in_field_list && !ctx.in_directive => {
                ctx.entering_arguments_definition()
            }
            _ => ctx.clone(),
        };

        let mut parts = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let text = if opens_field_list(elements, index) {
                self.render_element(element, &child_ctx.entering_field_list())?
            } else {
                self.render_element(element, &child_ctx)?
            };
            if text.is_empty() {
                continue;
            }
            parts.push(Part {
                text,
                is_description: is_description(element),
            });
        }

        Ok(self.layout.sequence(&parts))
    }

    fn render_one_of(
        &mut self,
        options: &'g [GrammarElement],
        ctx: &RenderContext<'g>,
    ) -> Result<String, RenderError> {
        let matching_operation = ctx.operation.and_then(|operation| {
            options
                .iter()
                .find(|option| option.is_token(operation.keyword()))
        });

        match matching_operation.or_else(|| options.first()) {
            Some(choice) => self.render_element(choice, ctx),
            None => Ok(String::new()),
        }
    }

    fn render_list(
        &mut self,
        element: &'g GrammarElement,
        ctx: &RenderContext<'g>,
    ) -> Result<String, RenderError> {
        if element.references(rules::ROOT_OPERATION_TYPE_DEFINITION)
            || ctx.current_rule == Some(rules::SCHEMA_DEFINITION)
        {
            let mut entries = Vec::with_capacity(OperationKind::ALL.len());
            for operation in OperationKind::ALL {
                entries.push(self.render_element(element, &ctx.with_operation(operation))?);
            }
            return Ok(self.layout.lines(&entries));
        }

        if ctx.in_field_list {
            return self.render_element(element, &ctx.next_field());
        }

        self.render_element(element, ctx)
    }
}

/// A list sitting directly between `{` and `}` holds the members of a
/// field list, unless it is a schema's root operation list.
fn opens_field_list(elements: &[GrammarElement], index: usize) -> bool {
    let (Some(previous), Some(GrammarElement::List { element }), Some(next)) = (
        index.checked_sub(1).and_then(|i| elements.get(i)),
        elements.get(index),
        elements.get(index + 1),
    ) else {
        return false;
    };
    previous.is_token("{")
        && next.is_token("}")
        && !element.references(rules::ROOT_OPERATION_TYPE_DEFINITION)
}

fn is_description(element: &GrammarElement) -> bool {
    match element {
        GrammarElement::NonTerminal { name } | GrammarElement::Terminal { name, .. } => {
            name == rules::DESCRIPTION
        }
        GrammarElement::Optional { element } => is_description(element),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::sdl_grammar;
    use grammar_forge_core::GrammarElement as E;

    fn render_default(grammar: &Grammar) -> String {
        render(grammar, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn builtin_grammar_renders_schema_first() {
        let text = render_default(&sdl_grammar());
        assert!(text.starts_with("\"Example description\"\nschema @example(arg: \"example\") {\n"));
        assert!(text.contains("  query: Query\n  mutation: Mutation\n  subscription: Subscription\n}"));
        assert!(text.contains("type Query {\n  placeholder: String\n}"));
        assert!(text.contains("directive @example(arg: String) on SCHEMA"));
    }

    #[test]
    fn descriptions_can_be_left_out() {
        let options = RenderOptions {
            include_descriptions: false,
            ..RenderOptions::default()
        };
        let text = render(&sdl_grammar(), &options).unwrap();
        assert!(!text.contains("Example description"));
        assert!(text.starts_with("schema @example"));
    }

    #[test]
    fn compact_output_is_one_line() {
        let text = render(&sdl_grammar(), &RenderOptions::compact()).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.contains("schema @ example ( arg : \"example\" ) {"));
    }

    #[test]
    fn object_type_fields_and_arguments() {
        let mut g = sdl_grammar();
        g.root = rules::OBJECT_TYPE_DEFINITION.into();
        let options = RenderOptions {
            include_descriptions: false,
            ..RenderOptions::default()
        };
        let text = render(&g, &options).unwrap();
        assert!(text.starts_with(
            "type ExampleType implements ExampleInterface @example(arg: \"example\") {\n  \
             exampleField(arg: ExampleInput! = \"example\" @example(arg: \"example\")): ExampleType! @example(arg: \"example\")\n}"
        ));
        assert!(text.contains("interface ExampleInterface {\n  placeholder: String\n}"));
        assert!(text.contains("input ExampleInput {\n  placeholder: String\n}"));
        assert!(!text.contains("type ExampleType {"));
    }

    #[test]
    fn enum_values_use_enum_placeholder() {
        let mut g = sdl_grammar();
        g.root = rules::ENUM_TYPE_DEFINITION.into();
        let options = RenderOptions {
            include_descriptions: false,
            ..RenderOptions::default()
        };
        let text = render(&g, &options).unwrap();
        assert!(text.starts_with(
            "enum ExampleEnum @example(arg: \"example\") {\n  EXAMPLE_VALUE @example(arg: \"example\")\n}"
        ));
    }

    #[test]
    fn directive_definition_is_not_stubbed() {
        let mut g = sdl_grammar();
        g.root = rules::DIRECTIVE_DEFINITION.into();
        let options = RenderOptions {
            include_descriptions: false,
            ..RenderOptions::default()
        };
        let text = render(&g, &options).unwrap();
        assert!(text.starts_with("directive @example(arg: ExampleInput! = \"example\" @example(arg: \"example\")) repeatable on SCHEMA"));
        assert_eq!(text.matches("directive @example").count(), 1);
    }

    #[test]
    fn undefined_rule_is_an_error() {
        let g = Grammar::builder("A").rule("A", E::non_terminal("B")).build();
        let err = render(&g, &RenderOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UndefinedRule {
                name: "B".into(),
                referenced_from: "A".into(),
            }
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let g = Grammar::builder("Nope").rule("A", E::terminal("a")).build();
        assert!(matches!(
            render(&g, &RenderOptions::default()),
            Err(RenderError::MissingRoot { .. })
        ));
    }

    #[test]
    fn runaway_recursion_hits_depth_limit() {
        let g = Grammar::builder("A")
            .rule("A", E::sequence(vec![E::token("x"), E::non_terminal("A")]))
            .build();
        let options = RenderOptions {
            max_depth: 8,
            ..RenderOptions::default()
        };
        assert_eq!(
            render(&g, &options).unwrap_err(),
            RenderError::DepthExceeded {
                rule: "A".into(),
                limit: 8,
            }
        );
    }

    #[test]
    fn literal_type_names_are_stubbed() {
        let g = Grammar::builder(rules::OBJECT_TYPE_DEFINITION)
            .rule(
                rules::OBJECT_TYPE_DEFINITION,
                E::sequence(vec![
                    E::token("type"),
                    E::terminal_with_pattern("Name", TerminalPattern::literal("User")),
                    E::token("{"),
                    E::list(E::sequence(vec![
                        E::terminal_with_pattern("Name", TerminalPattern::literal("posts")),
                        E::token(":"),
                        E::sequence(vec![
                            E::token("["),
                            E::terminal_with_pattern(
                                "NamedType",
                                TerminalPattern::literal("Post"),
                            ),
                            E::token("]"),
                        ]),
                    ])),
                    E::token("}"),
                ]),
            )
            .build();
        let text = render_default(&g);
        assert_eq!(
            text,
            "type User {\n  posts: [Post]\n}\n\n\
             type Post {\n  placeholder: String\n}\n\n\
             type Query {\n  placeholder: String\n}"
        );
    }

    #[test]
    fn non_graphql_grammar_renders_terminal_names() {
        let g = Grammar::builder("Expr")
            .rule(
                "Expr",
                E::one_of(vec![
                    E::sequence(vec![E::terminal("Number"), E::token("+"), E::terminal("Number")]),
                    E::terminal("Number"),
                ]),
            )
            .build();
        assert_eq!(render_default(&g), "Number + Number");
    }
}
