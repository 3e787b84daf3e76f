use grammar_forge_core::Grammar;

/// Writes one placeholder Rust struct per rule, in rule order.
///
/// Each struct is documented with the rule's notation so the generated
/// file doubles as a readable listing of the grammar.
pub fn print_rust_types(grammar: &Grammar) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "//! Placeholder types for the grammar rooted at `{}`.\n",
        grammar.root
    ));

    for rule in grammar.rules.values() {
        output.push('\n');
        output.push_str(&format!("/// `{}`\n", rule.to_string().replace('`', "'")));
        output.push_str("#[derive(Debug, Clone, Default, PartialEq, Eq)]\n");
        output.push_str(&format!("pub struct {};\n", type_ident(&rule.name)));
    }

    output
}

/// Converts a rule name to an UpperCamelCase identifier.
fn type_ident(name: &str) -> String {
    let mut ident = String::new();
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            ident.push(first.to_ascii_uppercase());
            ident.push_str(chars.as_str());
        }
    }
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, 'R');
    }
    ident
}
