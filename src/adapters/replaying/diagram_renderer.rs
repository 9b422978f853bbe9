//! Replaying adapter for the `DiagramRenderer` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RenderError;
use crate::ports::diagram_renderer::{
    DiagramRenderer, RenderFuture, RenderRequest, RenderedDiagram,
};

/// Serves recorded render results from a cassette.
///
/// A recorded image is written to the request's output path, exactly as the
/// live renderer would; a recorded error is returned as a renderer failure.
pub struct ReplayingDiagramRenderer {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingDiagramRenderer {
    /// Create a replaying renderer backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl DiagramRenderer for ReplayingDiagramRenderer {
    fn render(&self, request: &RenderRequest) -> RenderFuture<'_> {
        let output = next_output(&self.replayer, "diagram_renderer", "render");
        let output_path = request.output_path.clone();
        Box::pin(async move {
            let diagram = output
                .and_then(replay_result::<RenderedDiagram>)
                .map_err(RenderError::Renderer)?;
            tokio::fs::write(&output_path, &diagram.data).await?;
            Ok(())
        })
    }
}
