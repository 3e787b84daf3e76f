//! # grammar-forge-sdl
//!
//! GraphQL schema-definition-language support for grammar-forge.
//!
//! This crate provides:
//! - [`sdl_grammar`], the grammar of GraphQL type-system documents
//! - [`render`], which manufactures one representative schema document
//!   from any grammar, stubbing out every name it references
//! - [`TypeRef`], a lexer and recursive descent parser for type
//!   references such as `[String!]!`
//! - [`print_rust_types`], a placeholder Rust type listing per rule
//!
//! # Example
//!
//! ```
//! use grammar_forge_sdl::{render, sdl_grammar, RenderOptions};
//!
//! let text = render(&sdl_grammar(), &RenderOptions::default()).unwrap();
//! assert_eq!(text.matches("schema ").count(), 1);
//! assert!(text.contains("query: Query"));
//! assert!(text.contains("type Query {"));
//! ```

pub mod error;
pub mod grammar;
mod lexer;
pub mod render;
pub mod rust_types;
pub mod token;
pub mod type_ref;

pub use error::{RenderError, Span, TypeRefError};
pub use grammar::{rules, sdl_grammar};
pub use render::{render, OperationKind, RenderContext, RenderOptions};
pub use rust_types::print_rust_types;
pub use type_ref::{TypeRef, NAMED_TYPE_TERMINAL};
