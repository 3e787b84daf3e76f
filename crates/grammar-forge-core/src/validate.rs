//! Structural validation of [`Grammar`] values.
//!
//! Three passes run in a fixed order:
//!
//! - the root symbol must name a rule (always checked first),
//! - every `NonTerminal` in every rule must name a rule, whether or not the
//!   rule is reachable from the root,
//! - rules not reachable from the root are reported as warnings.
//!
//! Errors make a grammar invalid; warnings never do.

use std::collections::HashSet;
use std::fmt;

use crate::error::GrammarError;
use crate::types::Grammar;

/// A single finding produced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationIssue {
    /// The grammar's root symbol is not a rule.
    MissingRoot { root: String },
    /// A `NonTerminal` inside `rule` names a rule that does not exist.
    UndefinedReference { rule: String, reference: String },
    /// A rule is stored under a key that differs from its own name.
    RuleNameMismatch { key: String, name: String },
    /// A rule cannot be reached from the root.
    UnreferencedRule { name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot { root } => {
                write!(f, "root rule '{root}' is not defined")
            }
            Self::UndefinedReference { rule, reference } => {
                write!(
                    f,
                    "undefined rule '{reference}' referenced in rule '{rule}'"
                )
            }
            Self::RuleNameMismatch { key, name } => {
                write!(f, "rule stored under '{key}' is named '{name}'")
            }
            Self::UnreferencedRule { name } => {
                write!(f, "rule '{name}' is not reachable from the root")
            }
        }
    }
}

/// The outcome of validating a grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no errors were found. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the report into a `Result`.
    ///
    /// With `warnings_as_errors` set, any warning also fails.
    pub fn into_result(self, warnings_as_errors: bool) -> Result<(), GrammarError> {
        if self.errors.is_empty() && (!warnings_as_errors || self.warnings.is_empty()) {
            Ok(())
        } else {
            Err(GrammarError::ValidationFailed(self))
        }
    }
}

/// Validates the structural invariants of a grammar.
pub fn validate(grammar: &Grammar) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !grammar.contains_rule(&grammar.root) {
        report.errors.push(ValidationIssue::MissingRoot {
            root: grammar.root.clone(),
        });
    }

    for (key, rule) in &grammar.rules {
        if *key != rule.name {
            report.errors.push(ValidationIssue::RuleNameMismatch {
                key: key.clone(),
                name: rule.name.clone(),
            });
        }
    }

    check_references(grammar, &mut report);
    check_reachability(grammar, &mut report);

    tracing::debug!(
        root = %grammar.root,
        rules = grammar.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated grammar"
    );

    report
}

fn check_references(grammar: &Grammar, report: &mut ValidationReport) {
    for (rule_name, rule) in &grammar.rules {
        let mut seen = HashSet::new();
        for reference in rule.definition.referenced_names() {
            if !grammar.contains_rule(reference) && seen.insert(reference) {
                report.errors.push(ValidationIssue::UndefinedReference {
                    rule: rule_name.clone(),
                    reference: reference.to_string(),
                });
            }
        }
    }
}

fn check_reachability(grammar: &Grammar, report: &mut ValidationReport) {
    let reachable = reachable_from_root(grammar);
    for name in grammar.rule_names() {
        if !reachable.contains(name) {
            report.warnings.push(ValidationIssue::UnreferencedRule {
                name: name.to_string(),
            });
        }
    }
}

/// Names of all rules reachable from the root, including the root itself.
///
/// Returns an empty set when the root is undefined.
pub fn reachable_from_root(grammar: &Grammar) -> HashSet<&str> {
    let mut reachable = HashSet::new();
    let mut to_visit = vec![grammar.root.as_str()];

    while let Some(name) = to_visit.pop() {
        let Some(rule) = grammar.rule(name) else {
            continue;
        };
        if !reachable.insert(name) {
            continue;
        }
        to_visit.extend(rule.definition.referenced_names());
    }

    reachable
}
