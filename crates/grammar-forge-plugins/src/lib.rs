//! # grammar-forge-plugins
//!
//! Plugin contracts and the registry that runs them.
//!
//! A pipeline is one parser, any number of transformers applied in
//! order, and one generator. Plugins are looked up by id in a
//! [`PluginRegistry`], which validates options, threads each stage's
//! output into the next, and wraps every failure (panics included) in a
//! [`PluginError`] naming the plugin. The crate writes nothing to the
//! terminal itself; a caught panic still passes through the process
//! panic hook, which hosts can replace with `std::panic::set_hook`.
//!
//! Built-in plugins:
//!
//! | kind        | ids |
//! |-------------|-----|
//! | parser      | `json`, `graphql-sdl` (unsupported) |
//! | transformer | `normalize`, `simplify`, `add-field`, `add-description`, `validate` |
//! | generator   | `graphql-sdl`, `json`, `rust-types` |
//!
//! # Example
//!
//! ```
//! use grammar_forge_plugins::{OptionsById, PluginRegistry};
//! use grammar_forge_sdl::sdl_grammar;
//!
//! let registry = PluginRegistry::with_builtins();
//! let result = registry
//!     .transform(&sdl_grammar(), &["normalize", "simplify"], &OptionsById::new())
//!     .unwrap();
//! assert_eq!(result.applied, ["normalize", "simplify"]);
//!
//! let generated = registry.generate(&result.grammar, "graphql-sdl", None).unwrap();
//! assert_eq!(generated.format.as_deref(), Some("graphql"));
//! ```

pub mod builtins;
pub mod config;
pub mod error;
pub mod generate;
pub mod options;
pub mod parse;
pub mod plugin;
pub mod registry;
pub mod transform;

pub use config::PipelineConfig;
pub use error::{PluginError, PluginFailure, PluginPanic};
pub use options::PluginOptions;
pub use plugin::{Generator, GeneratorOutput, Parser, Plugin, PluginKind, PluginMetadata, Transformer};
pub use registry::{
    GenerateResult, OptionsById, ParseResult, PipelineOutput, PluginInfo, PluginRegistry,
    TransformResult,
};
