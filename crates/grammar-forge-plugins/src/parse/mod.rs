//! Built-in parsers.

pub mod json;
pub mod sdl;

pub use json::{JsonParser, JsonParserOptions};
pub use sdl::{SdlParser, UnsupportedInput};
