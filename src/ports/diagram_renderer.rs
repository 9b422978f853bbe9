//! Diagram renderer port for the external ER rendering collaborator.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A request to render the script at one path into an image at another.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Path of the ER script to read.
    pub script_path: PathBuf,
    /// Path the image must be written to.
    pub output_path: PathBuf,
}

/// Image bytes produced by a render, as stored in cassettes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedDiagram {
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Boxed future type returned by [`DiagramRenderer::render`].
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = Result<(), RenderError>> + Send + 'a>>;

/// Turns an ER script file into an image file.
///
/// Implementations either write the image to `output_path` and return `Ok`,
/// or return an error whose message is reported to the caller as-is.
pub trait DiagramRenderer: Send + Sync {
    /// Render the script described by the request.
    fn render(&self, request: &RenderRequest) -> RenderFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
