//! Error taxonomy for template generation

use thiserror::Error;

/// Errors that can occur during template generation.
#[derive(Debug, Error)]
pub enum Error {
    /// The user declined a prompt; the run stops cleanly and silently.
    #[error("generation cancelled by the user")]
    Exit,

    /// A configuration literal or module could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// An expression could not be evaluated against the context.
    #[error("interpolation error: {0}")]
    Interpolation(String),

    /// An executable template or config module failed.
    #[error("module execution failed for '{path}': {message}")]
    Module {
        /// Path of the module that failed
        path: String,
        /// Host-reported failure message
        message: String,
    },

    /// Enumeration or selection produced no files to generate.
    #[error("no template files to generate")]
    NoTemplateFiles,

    /// An input was referenced but never resolved to a value.
    #[error("missing input value: {0}")]
    MissingInput(String),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is the cooperative-cancellation sentinel.
    pub fn is_exit(&self) -> bool {
        matches!(self, Error::Exit)
    }
}

/// Convenience alias used across the stencil crates.
pub type Result<T> = std::result::Result<T, Error>;
