//! Built-in structural transformers.
//!
//! Each transformer is a pure function of its input grammar and a typed
//! option struct, wrapped in a plugin type for the registry.

pub mod add_description;
pub mod add_field;
pub mod normalize;
pub mod simplify;
pub mod validate;

pub use add_description::{AddDescriptionOptions, AddDescriptionTransformer};
pub use add_field::{AddFieldError, AddFieldOptions, AddFieldTransformer};
pub use normalize::{NormalizeOptions, NormalizeTransformer};
pub use simplify::{SimplifyOptions, SimplifyTransformer};
pub use validate::{ValidateOptions, ValidateTransformer};
