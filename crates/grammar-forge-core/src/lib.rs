//! # grammar-forge-core
//!
//! The grammar data model shared by every grammar-forge crate.
//!
//! A [`Grammar`] is a root symbol plus an ordered map of
//! [`ProductionRule`]s, each holding one [`GrammarElement`] tree. Values
//! are plain owned data: every rewrite produces a new grammar and never
//! touches its input.
//!
//! # Example
//!
//! ```
//! use grammar_forge_core::{validate, Grammar, GrammarElement as E};
//!
//! let grammar = Grammar::builder("Document")
//!     .rule("Document", E::list(E::non_terminal("Definition")))
//!     .rule("Definition", E::terminal("Name"))
//!     .build();
//!
//! let report = validate(&grammar);
//! assert!(report.is_valid());
//! assert_eq!(grammar.rule_names().count(), 2);
//! ```

pub mod error;
pub mod types;
pub mod validate;

pub use error::GrammarError;
pub use types::{
    ElementKind, Grammar, GrammarBuilder, GrammarElement, GrammarMetadata, ProductionRule,
    TerminalPattern,
};
pub use validate::{validate, ValidationIssue, ValidationReport};
