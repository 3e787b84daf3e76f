use serde::{Deserialize, Serialize};

use super::element::GrammarElement;

/// A named production: `name ::= definition`.
///
/// Inside a [`Grammar`](super::Grammar) the name must equal the key the
/// rule is stored under; the validator reports a mismatch as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRule {
    pub name: String,
    pub definition: GrammarElement,
}

impl ProductionRule {
    pub fn new(name: impl Into<String>, definition: GrammarElement) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }

    /// Returns a copy of this rule with a different definition.
    pub fn with_definition(&self, definition: GrammarElement) -> Self {
        Self {
            name: self.name.clone(),
            definition,
        }
    }
}

impl std::fmt::Display for ProductionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::= {}", self.name, self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let rule = ProductionRule::new(
            "Document",
            GrammarElement::list(GrammarElement::non_terminal("Definition")),
        );
        assert_eq!(rule.to_string(), "Document ::= Definition+");
    }

    #[test]
    fn with_definition_keeps_name() {
        let rule = ProductionRule::new("A", GrammarElement::terminal("x"));
        let changed = rule.with_definition(GrammarElement::terminal("y"));
        assert_eq!(changed.name, "A");
        assert_eq!(rule.definition, GrammarElement::terminal("x"));
    }

    #[test]
    fn serde_roundtrip() {
        let rule = ProductionRule::new("A", GrammarElement::non_terminal("B"));
        let json = serde_json::to_string(&rule).unwrap();
        let back: ProductionRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);
    }
}
