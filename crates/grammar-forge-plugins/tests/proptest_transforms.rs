use grammar_forge_core::{Grammar, GrammarElement, ProductionRule};
use grammar_forge_plugins::transform::add_description::{add_description, AddDescriptionOptions};
use grammar_forge_plugins::transform::normalize::{normalize, NormalizeOptions};
use grammar_forge_plugins::transform::simplify::{simplify, SimplifyOptions};
use proptest::prelude::*;

fn rule_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("Alpha"), Just("Beta"), Just("Gamma"), Just("Delta")].prop_map(String::from)
}

/// Few distinct leaves, so generated choices often repeat alternatives.
fn leaf() -> impl Strategy<Value = GrammarElement> {
    prop_oneof![
        prop_oneof![Just("a"), Just("b"), Just("{")].prop_map(GrammarElement::token),
        rule_name().prop_map(GrammarElement::non_terminal),
    ]
}

fn element() -> impl Strategy<Value = GrammarElement> {
    leaf().prop_recursive(4, 40, 4, |inner| {
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
        prop::collection::vec((rule_name(), element()), 1..5),
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

fn simplify_options() -> impl Strategy<Value = SimplifyOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(flatten_sequences, collapse_singletons)| {
        SimplifyOptions {
            flatten_sequences,
            collapse_singletons,
        }
    })
}

fn choices_are_distinct(element: &GrammarElement) -> bool {
    let mut distinct = true;
    element.walk(&mut |node| {
        if let GrammarElement::OneOf { options } = node {
            for (i, option) in options.iter().enumerate() {
                if options[..i].contains(option) {
                    distinct = false;
                }
            }
        }
    });
    distinct
}

proptest! {
    #[test]
    fn simplify_is_idempotent(g in grammar(), options in simplify_options()) {
        let once = simplify(&g, &options);
        let twice = simplify(&once, &options);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn simplify_never_grows_a_definition(g in grammar()) {
        let out = simplify(&g, &SimplifyOptions::default());
        for (rule, simplified) in g.rules.values().zip(out.rules.values()) {
            prop_assert!(simplified.definition.node_count() <= rule.definition.node_count());
        }
    }

    #[test]
    fn normalize_leaves_no_duplicate_alternatives(g in grammar()) {
        let out = normalize(&g, &NormalizeOptions::default());
        for rule in out.rules.values() {
            prop_assert!(choices_are_distinct(&rule.definition), "{}", rule);
        }
        let names: Vec<&str> = out.rule_names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        prop_assert_eq!(names, sorted);
        prop_assert_eq!(&out.root, &g.root);
    }

    #[test]
    fn normalize_is_idempotent(g in grammar()) {
        let once = normalize(&g, &NormalizeOptions::default());
        prop_assert_eq!(normalize(&once, &NormalizeOptions::default()), once);
    }

    #[test]
    fn add_description_is_idempotent(g in grammar()) {
        let options = AddDescriptionOptions::default();
        let once = add_description(&g, &options).unwrap();
        let twice = add_description(&once, &options).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.contains_rule("Description"));
    }
}
