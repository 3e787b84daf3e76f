mod element;
mod grammar;
mod pattern;
mod rule;

pub use element::{ElementKind, GrammarElement};
pub use grammar::{Grammar, GrammarBuilder, GrammarMetadata};
pub use pattern::TerminalPattern;
pub use rule::ProductionRule;
