use std::any::Any;

use crate::plugin::PluginKind;

/// The error type plugins return from their own operations.
pub type PluginFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the plugin registry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PluginError {
    /// A plugin with this id already exists in the registry of this kind.
    #[error("{kind} '{id}' is already registered")]
    DuplicateRegistration { id: String, kind: PluginKind },

    /// No enabled plugin with this id exists in the registry of this kind.
    #[error("{kind} '{id}' is not registered or is disabled")]
    NotFound { id: String, kind: PluginKind },

    /// The plugin rejected its options before running.
    #[error("invalid options for {kind} '{id}': {}", errors.join("; "))]
    InvalidOptions {
        id: String,
        kind: PluginKind,
        errors: Vec<String>,
    },

    /// A transformer failed or panicked.
    #[error("transformer '{id}' failed: {message}")]
    TransformationFailed {
        id: String,
        message: String,
        source: PluginFailure,
    },

    /// A generator failed or panicked.
    #[error("generator '{id}' failed: {message}")]
    GenerationFailed {
        id: String,
        message: String,
        source: PluginFailure,
    },

    /// A parser failed or panicked.
    #[error("parser '{id}' failed: {message}")]
    ParsingFailed {
        id: String,
        message: String,
        source: PluginFailure,
    },

    /// Pipeline configuration could not be read or decoded.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl PluginError {
    /// The id of the plugin involved, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::DuplicateRegistration { id, .. }
            | Self::NotFound { id, .. }
            | Self::InvalidOptions { id, .. }
            | Self::TransformationFailed { id, .. }
            | Self::GenerationFailed { id, .. }
            | Self::ParsingFailed { id, .. } => Some(id),
            Self::Config { .. } => None,
        }
    }

    /// The kind of plugin involved, if any.
    pub fn kind(&self) -> Option<PluginKind> {
        match self {
            Self::DuplicateRegistration { kind, .. }
            | Self::NotFound { kind, .. }
            | Self::InvalidOptions { kind, .. } => Some(*kind),
            Self::TransformationFailed { .. } => Some(PluginKind::Transformer),
            Self::GenerationFailed { .. } => Some(PluginKind::Generator),
            Self::ParsingFailed { .. } => Some(PluginKind::Parser),
            Self::Config { .. } => None,
        }
    }

    /// Wraps a failure of the plugin `id` of `kind`.
    pub(crate) fn failed(kind: PluginKind, id: &str, source: PluginFailure) -> Self {
        let id = id.to_string();
        let message = source.to_string();
        match kind {
            PluginKind::Parser => Self::ParsingFailed {
                id,
                message,
                source,
            },
            PluginKind::Transformer => Self::TransformationFailed {
                id,
                message,
                source,
            },
            PluginKind::Generator => Self::GenerationFailed {
                id,
                message,
                source,
            },
        }
    }
}

/// A plugin panicked instead of returning an error.
#[derive(Debug, thiserror::Error)]
#[error("plugin panicked: {message}")]
pub struct PluginPanic {
    pub message: String,
}

impl PluginPanic {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self { message }
    }
}
