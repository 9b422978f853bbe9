//! Request translation: envelope in, rendered diagram envelope out.

use std::io::Write;

use serde_json::Value;
use tempfile::{Builder, NamedTempFile};

use crate::envelope::{parse_request, ResponseEnvelope};
use crate::error::RenderError;
use crate::model::ErModel;
use crate::params::OutputFormat;
use crate::ports::{DiagramRenderer, RenderRequest};
use crate::script::generate_script;

/// Turns request envelopes into response envelopes using a diagram renderer.
pub struct Translator {
    renderer: Box<dyn DiagramRenderer>,
    format: OutputFormat,
    filename: String,
}

impl Translator {
    /// Create a translator producing `format` images offered for download as
    /// `filename` plus the format's extension.
    #[must_use]
    pub fn new(
        renderer: Box<dyn DiagramRenderer>,
        format: OutputFormat,
        filename: impl Into<String>,
    ) -> Self {
        Self { renderer, format, filename: filename.into() }
    }

    /// Handle one request envelope. Never fails: errors become 4xx/5xx envelopes.
    pub async fn handle(&self, event: &Value) -> ResponseEnvelope {
        let result = match parse_request(event) {
            Ok(model) => self.render_model(&model).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(data) => {
                tracing::info!(bytes = data.len(), "rendered diagram");
                ResponseEnvelope::image(&data, self.format, &self.filename)
            }
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    tracing::warn!(status, "render failed: {e}");
                } else {
                    tracing::info!(status, "rejected request: {e}");
                }
                ResponseEnvelope::error(&e)
            }
        }
    }

    /// Render a model to image bytes.
    ///
    /// The script and image temp files are removed when this returns, whether
    /// or not rendering succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp files cannot be written or read, or if the
    /// renderer fails or produces nothing.
    pub async fn render_model(&self, model: &ErModel) -> Result<Vec<u8>, RenderError> {
        tracing::debug!(
            entities = model.entities.len(),
            relations = model.relations.len(),
            "translating model"
        );
        let script = generate_script(model);

        let mut script_file = temp_file(".er")?;
        script_file.write_all(script.as_bytes())?;
        script_file.flush()?;
        let image_file = temp_file(&format!(".{}", self.format.extension()))?;

        let request = RenderRequest {
            script_path: script_file.path().to_path_buf(),
            output_path: image_file.path().to_path_buf(),
        };
        self.renderer.render(&request).await?;

        let data = tokio::fs::read(&request.output_path).await?;
        if data.is_empty() {
            return Err(RenderError::Renderer("renderer produced no output".to_string()));
        }
        if !self.format.matches_signature(&data) {
            tracing::warn!(format = %self.format, "renderer output does not look like {}", self.format);
        }
        Ok(data)
    }
}

fn temp_file(suffix: &str) -> Result<NamedTempFile, RenderError> {
    Ok(Builder::new().prefix("erender-").suffix(suffix).tempfile()?)
}
