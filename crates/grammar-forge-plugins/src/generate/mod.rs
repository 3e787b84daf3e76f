//! Built-in generators.

pub mod json;
pub mod rust_types;
pub mod sdl;

pub use json::{JsonGenerator, JsonGeneratorOptions};
pub use rust_types::RustTypesGenerator;
pub use sdl::{SdlGenerator, SdlGeneratorOptions};
