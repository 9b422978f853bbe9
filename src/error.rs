//! Unified error type for erender.

use thiserror::Error;

/// Errors that can occur while translating and rendering an ER model.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request envelope carried no `body`.
    #[error("no JSON provided in body")]
    MissingBody,

    /// The body was empty, not JSON, or had no `entities` section.
    #[error("invalid JSON or missing entities section")]
    InvalidPayload,

    /// The payload had `entities` but did not match the ER data model.
    #[error("invalid entity model: {0}")]
    InvalidModel(String),

    /// The renderer program could not be located.
    #[error("renderer executable '{0}' not found on PATH")]
    RendererNotFound(String),

    /// The renderer ran but failed; the message is passed through verbatim.
    #[error("{0}")]
    Renderer(String),

    /// An I/O error occurred.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The Lambda runtime loop stopped with an error.
    #[error("Lambda runtime error: {0}")]
    Runtime(String),
}

impl RenderError {
    /// HTTP-style status code for this error.
    ///
    /// Payload problems are the caller's fault (400); everything else is ours (500).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingBody | Self::InvalidPayload | Self::InvalidModel(_) => 400,
            Self::RendererNotFound(_)
            | Self::Renderer(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::InvalidArgument(_)
            | Self::Runtime(_) => 500,
        }
    }
}
