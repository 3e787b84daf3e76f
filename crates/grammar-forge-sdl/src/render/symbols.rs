//! Names defined and referenced while rendering, and the stub blocks that
//! close the document over its references.

use indexmap::{IndexMap, IndexSet};

use crate::grammar::TYPE_SYSTEM_DIRECTIVE_LOCATIONS;

use super::layout::Layout;
use super::terminal::{TypeKind, BUILTIN_DIRECTIVES, BUILTIN_SCALARS};

const QUERY: &str = "Query";

#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    defined_types: IndexMap<String, TypeKind>,
    referenced_types: IndexMap<String, TypeKind>,
    defined_directives: IndexSet<String>,
    /// Referenced directives with the argument names seen on them.
    referenced_directives: IndexMap<String, IndexSet<String>>,
    last_directive: Option<String>,
    pub schema_rendered: bool,
}

impl SymbolTable {
    pub fn define_type(&mut self, name: &str, kind: TypeKind) {
        self.defined_types.entry(name.to_string()).or_insert(kind);
    }

    pub fn reference_type(&mut self, name: &str, kind: TypeKind) {
        if BUILTIN_SCALARS.contains(&name) {
            return;
        }
        self.referenced_types
            .entry(name.to_string())
            .and_modify(|seen| *seen = merged_reference(*seen, kind))
            .or_insert(kind);
    }

    pub fn define_directive(&mut self, name: &str) {
        self.defined_directives.insert(name.to_string());
        self.last_directive = None;
    }

    pub fn reference_directive(&mut self, name: &str) {
        if BUILTIN_DIRECTIVES.contains(&name) {
            self.last_directive = None;
            return;
        }
        self.referenced_directives.entry(name.to_string()).or_default();
        self.last_directive = Some(name.to_string());
    }

    /// Attaches an argument name to the most recently referenced directive.
    pub fn directive_argument(&mut self, argument: &str) {
        let Some(directive) = &self.last_directive else {
            return;
        };
        if let Some(arguments) = self.referenced_directives.get_mut(directive) {
            arguments.insert(argument.to_string());
        }
    }

    /// Stub definitions for every referenced but undefined name.
    ///
    /// When the document defines or stubs any type, a `Query` type is
    /// guaranteed to exist exactly once.
    pub fn stubs(&self, layout: &Layout) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut has_query = self.defined_types.contains_key(QUERY);

        for (name, kind) in &self.referenced_types {
            if self.defined_types.contains_key(name) {
                continue;
            }
            tracing::trace!(name = %name, ?kind, "stubbing type");
            blocks.push(type_stub(name, *kind, layout));
            has_query |= name == QUERY;
        }

        if !has_query && !(self.defined_types.is_empty() && blocks.is_empty()) {
            blocks.push(type_stub(QUERY, TypeKind::Object, layout));
        }

        for (name, arguments) in &self.referenced_directives {
            if self.defined_directives.contains(name) {
                continue;
            }
            tracing::trace!(name = %name, "stubbing directive");
            blocks.push(directive_stub(name, arguments));
        }

        blocks
    }
}

/// The stub kind for a name referenced in two positions.
///
/// A name used both as an input type and as an object type becomes a
/// scalar, the one kind valid in argument and field positions alike.
/// Interfaces keep their kind, since `implements` accepts nothing else.
fn merged_reference(seen: TypeKind, next: TypeKind) -> TypeKind {
    match (seen, next) {
        (a, b) if a == b => a,
        (TypeKind::Interface, _) | (_, TypeKind::Interface) => TypeKind::Interface,
        (TypeKind::InputObject, _) | (_, TypeKind::InputObject) => TypeKind::Scalar,
        (seen, _) => seen,
    }
}

fn type_stub(name: &str, kind: TypeKind, layout: &Layout) -> String {
    let head = format!("{} {name}", kind.keyword());
    match kind {
        TypeKind::Object | TypeKind::Interface | TypeKind::InputObject => {
            layout.block(&head, &["placeholder: String"])
        }
        TypeKind::Enum => layout.block(&head, &["EXAMPLE_VALUE"]),
        TypeKind::Union => format!("{head} = {QUERY}"),
        TypeKind::Scalar => head,
    }
}

fn directive_stub(name: &str, arguments: &IndexSet<String>) -> String {
    let mut out = format!("directive @{name}");
    if !arguments.is_empty() {
        let arguments: Vec<String> = arguments.iter().map(|a| format!("{a}: String")).collect();
        out.push('(');
        out.push_str(&arguments.join(", "));
        out.push(')');
    }
    out.push_str(" on ");
    out.push_str(&TYPE_SYSTEM_DIRECTIVE_LOCATIONS.join(" | "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRETTY: Layout = Layout {
        pretty: true,
        indent: 2,
    };

    #[test]
    fn nothing_referenced_means_no_stubs() {
        assert!(SymbolTable::default().stubs(&PRETTY).is_empty());
    }

    #[test]
    fn referenced_types_are_stubbed_once() {
        let mut table = SymbolTable::default();
        table.reference_type("Post", TypeKind::Object);
        table.reference_type("Post", TypeKind::Object);
        table.reference_type("String", TypeKind::Object);
        let stubs = table.stubs(&PRETTY);
        assert_eq!(
            stubs,
            vec![
                "type Post {\n  placeholder: String\n}".to_string(),
                "type Query {\n  placeholder: String\n}".to_string(),
            ]
        );
    }

    #[test]
    fn input_and_output_use_of_one_name_stubs_a_scalar() {
        for order in [
            [TypeKind::InputObject, TypeKind::Object],
            [TypeKind::Object, TypeKind::InputObject],
        ] {
            let mut table = SymbolTable::default();
            for kind in order {
                table.reference_type("Post", kind);
            }
            let stubs = table.stubs(&PRETTY);
            assert_eq!(stubs[0], "scalar Post");
            assert!(!stubs.iter().any(|s| s.starts_with("input Post")));
            assert!(!stubs.iter().any(|s| s.starts_with("type Post")));
        }
    }

    #[test]
    fn interface_references_keep_their_kind() {
        assert_eq!(
            merged_reference(TypeKind::Object, TypeKind::Interface),
            TypeKind::Interface
        );
        assert_eq!(
            merged_reference(TypeKind::Interface, TypeKind::InputObject),
            TypeKind::Interface
        );
        assert_eq!(
            merged_reference(TypeKind::Union, TypeKind::Object),
            TypeKind::Union
        );
    }

    #[test]
    fn defined_types_are_not_stubbed() {
        let mut table = SymbolTable::default();
        table.define_type("Query", TypeKind::Object);
        table.reference_type("Query", TypeKind::Object);
        assert!(table.stubs(&PRETTY).is_empty());
    }

    #[test]
    fn query_added_when_only_definitions_exist() {
        let mut table = SymbolTable::default();
        table.define_type("ExampleType", TypeKind::Object);
        assert_eq!(table.stubs(&PRETTY).len(), 1);
    }

    #[test]
    fn directive_stub_carries_seen_arguments() {
        let mut table = SymbolTable::default();
        table.reference_directive("auth");
        table.directive_argument("requires");
        table.reference_directive("deprecated");
        table.directive_argument("reason");
        let stubs = table.stubs(&PRETTY);
        assert_eq!(stubs.len(), 1);
        assert!(stubs[0].starts_with("directive @auth(requires: String) on SCHEMA | SCALAR"));
        assert!(stubs[0].ends_with("INPUT_FIELD_DEFINITION"));
    }

    #[test]
    fn defined_directives_are_not_stubbed() {
        let mut table = SymbolTable::default();
        table.define_directive("example");
        table.reference_directive("example");
        assert!(table.stubs(&PRETTY).is_empty());
    }

    #[test]
    fn interface_and_input_stubs() {
        let layout = Layout {
            pretty: false,
            indent: 2,
        };
        assert_eq!(
            type_stub("Node", TypeKind::Interface, &layout),
            "interface Node { placeholder: String }"
        );
        assert_eq!(
            type_stub("Filter", TypeKind::InputObject, &layout),
            "input Filter { placeholder: String }"
        );
    }
}
