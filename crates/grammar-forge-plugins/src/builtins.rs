//! The plugins every [`PluginRegistry::with_builtins`](crate::PluginRegistry::with_builtins)
//! registry starts with, paired with their ids.

use std::sync::Arc;

use crate::generate::{JsonGenerator, RustTypesGenerator, SdlGenerator};
use crate::parse::{JsonParser, SdlParser};
use crate::plugin::{Generator, Parser, Transformer};
use crate::transform::{
    AddDescriptionTransformer, AddFieldTransformer, NormalizeTransformer, SimplifyTransformer,
    ValidateTransformer,
};

pub const JSON: &str = "json";
pub const GRAPHQL_SDL: &str = "graphql-sdl";
pub const RUST_TYPES: &str = "rust-types";
pub const NORMALIZE: &str = "normalize";
pub const SIMPLIFY: &str = "simplify";
pub const ADD_FIELD: &str = "add-field";
pub const ADD_DESCRIPTION: &str = "add-description";
pub const VALIDATE: &str = "validate";

pub(crate) fn parsers() -> Vec<(&'static str, Arc<dyn Parser>)> {
    vec![
        (JSON, Arc::new(JsonParser::new()) as Arc<dyn Parser>),
        (GRAPHQL_SDL, Arc::new(SdlParser::new()) as Arc<dyn Parser>),
    ]
}

pub(crate) fn transformers() -> Vec<(&'static str, Arc<dyn Transformer>)> {
    vec![
        (NORMALIZE, Arc::new(NormalizeTransformer::new()) as Arc<dyn Transformer>),
        (SIMPLIFY, Arc::new(SimplifyTransformer::new()) as Arc<dyn Transformer>),
        (ADD_FIELD, Arc::new(AddFieldTransformer::new()) as Arc<dyn Transformer>),
        (ADD_DESCRIPTION, Arc::new(AddDescriptionTransformer::new()) as Arc<dyn Transformer>),
        (VALIDATE, Arc::new(ValidateTransformer::new()) as Arc<dyn Transformer>),
    ]
}

pub(crate) fn generators() -> Vec<(&'static str, Arc<dyn Generator>)> {
    vec![
        (GRAPHQL_SDL, Arc::new(SdlGenerator::new()) as Arc<dyn Generator>),
        (JSON, Arc::new(JsonGenerator::new()) as Arc<dyn Generator>),
        (RUST_TYPES, Arc::new(RustTypesGenerator::new()) as Arc<dyn Generator>),
    ]
}
