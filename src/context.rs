//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::command::CommandRenderer;
use crate::adapters::recording::diagram_renderer::RecordingDiagramRenderer;
use crate::adapters::replaying::diagram_renderer::ReplayingDiagramRenderer;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::RenderError;
use crate::ports::DiagramRenderer;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Diagram renderer port.
    pub renderer: Box<dyn DiagramRenderer>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording adapter is still alive or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        tracing::debug!(interactions = recorder.interactions().len(), "writing cassette");
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context running the configured renderer program.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        let renderer = CommandRenderer::new(config.renderer_program(), config.renderer.args.clone());
        Self { renderer: Box::new(renderer) }
    }

    /// Create a recording context that wraps the live renderer with a recorder.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let live_ctx = Self::live(config);

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".erender/cassettes")
            .join(&timestamp)
            .join("diagram_renderer.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-diagram_renderer"),
            get_commit_hash(),
        )));

        let renderer = RecordingDiagramRenderer::new(live_ctx.renderer, Arc::clone(&recorder));
        (Self { renderer: Box::new(renderer) }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, RenderError> {
        let cassette = Cassette::load(path)
            .map_err(|e| RenderError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Ok(Self { renderer: Box::new(ReplayingDiagramRenderer::new(replayer)) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
