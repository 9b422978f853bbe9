//! Recording adapter for the `DiagramRenderer` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::RenderError;
use crate::ports::diagram_renderer::{
    DiagramRenderer, RenderFuture, RenderRequest, RenderedDiagram,
};

/// Cassette input for a render: the script text, since temp paths differ per run.
#[derive(Serialize)]
struct RecordedInput {
    script: String,
}

/// Records render interactions while delegating to an inner implementation.
pub struct RecordingDiagramRenderer {
    inner: Box<dyn DiagramRenderer>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDiagramRenderer {
    /// Creates a new recording renderer wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn DiagramRenderer>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl DiagramRenderer for RecordingDiagramRenderer {
    fn render(&self, request: &RenderRequest) -> RenderFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let script = tokio::fs::read_to_string(&request.script_path).await?;
            let result = match self.inner.render(&request).await {
                Ok(()) => tokio::fs::read(&request.output_path)
                    .await
                    .map(|data| RenderedDiagram { data })
                    .map_err(RenderError::Io),
                Err(e) => Err(e),
            };
            record_result(
                &recorder,
                "diagram_renderer",
                "render",
                &RecordedInput { script },
                &result,
            );
            result.map(|_| ())
        })
    }
}
