use std::collections::HashSet;

use grammar_forge_core::{
    validate, Grammar, GrammarElement, ProductionRule, TerminalPattern, ValidationIssue,
};
use proptest::prelude::*;

/// Rule names are drawn from a small pool so references both hit and miss.
fn rule_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Alpha"),
        Just("Beta"),
        Just("Gamma"),
        Just("Delta"),
        Just("Epsilon"),
    ]
    .prop_map(String::from)
}

fn leaf() -> impl Strategy<Value = GrammarElement> {
    prop_oneof![
        "[A-Za-z]{1,8}".prop_map(GrammarElement::terminal),
        ("[A-Z][a-z]{0,5}", "[a-z{}!:]{1,3}").prop_map(|(name, lit)| {
            GrammarElement::terminal_with_pattern(name, TerminalPattern::literal(lit))
        }),
        ("[A-Z][a-z]{0,5}", "[a-z0-9]{1,4}", "[imsx]{0,2}").prop_map(|(name, src, flags)| {
            GrammarElement::terminal_with_pattern(
                name,
                TerminalPattern::regex_with_flags(src, flags),
            )
        }),
        rule_name().prop_map(GrammarElement::non_terminal),
    ]
}

fn element() -> impl Strategy<Value = GrammarElement> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(GrammarElement::sequence),
            prop::collection::vec(inner.clone(), 0..4).prop_map(GrammarElement::one_of),
            inner.clone().prop_map(GrammarElement::optional),
            inner.prop_map(GrammarElement::list),
        ]
    })
}

fn grammar() -> impl Strategy<Value = Grammar> {
    (
        prop::collection::btree_map(rule_name(), element(), 1..5),
        rule_name(),
    )
        .prop_map(|(rules, root)| {
            Grammar::new(
                root,
                rules
                    .into_iter()
                    .map(|(name, definition)| ProductionRule::new(name, definition)),
            )
        })
}

proptest! {
    /// A missing-reference error is reported iff some NonTerminal names an
    /// absent rule, anywhere in the grammar.
    #[test]
    fn undefined_reference_iff_dangling_non_terminal(g in grammar()) {
        let defined: HashSet<&str> = g.rule_names().collect();
        let dangling = g
            .rules
            .values()
            .flat_map(|r| r.definition.referenced_names())
            .any(|name| !defined.contains(name));

        let report = validate(&g);
        let reported = report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationIssue::UndefinedReference { .. }));
        prop_assert_eq!(dangling, reported);
    }

    /// Warnings never make a grammar invalid.
    #[test]
    fn warnings_never_fail_validation(g in grammar()) {
        let report = validate(&g);
        let only_warnings = report.errors.is_empty();
        prop_assert_eq!(report.is_valid(), only_warnings);
    }

    /// Encoding then decoding reproduces root, rules, and patterns.
    #[test]
    fn structured_roundtrip(g in grammar()) {
        let json = g.to_json_string().unwrap();
        let back = Grammar::from_json_str(&json).unwrap();
        prop_assert_eq!(&g.root, &back.root);
        prop_assert_eq!(
            g.rule_names().collect::<Vec<_>>(),
            back.rule_names().collect::<Vec<_>>()
        );
        prop_assert_eq!(g, back);
    }

    /// Regex patterns decode into compilable matchers.
    #[test]
    fn regex_patterns_compile_after_roundtrip(src in "[a-z0-9]{1,6}", flags in "[imsx]{0,3}") {
        let pattern = TerminalPattern::regex_with_flags(src.clone(), flags);
        let json = serde_json::to_string(&pattern).unwrap();
        let back: TerminalPattern = serde_json::from_str(&json).unwrap();
        let re = back.to_regex().unwrap();
        prop_assert!(re.is_match(&src));
    }
}
