//! Live adapter that shells out to an ER rendering program.

use std::ffi::OsString;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::RenderError;
use crate::ports::diagram_renderer::{DiagramRenderer, RenderFuture, RenderRequest};

/// Placeholder replaced with the script path in renderer arguments.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder replaced with the image path in renderer arguments.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Renders diagrams by running an external program such as `eralchemy`.
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Create a renderer for `program`, invoked with `args` after placeholder
    /// substitution.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    fn expand_args(&self, request: &RenderRequest) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                INPUT_PLACEHOLDER => request.script_path.clone().into_os_string(),
                OUTPUT_PLACEHOLDER => request.output_path.clone().into_os_string(),
                other => OsString::from(
                    other
                        .replace(INPUT_PLACEHOLDER, &request.script_path.to_string_lossy())
                        .replace(OUTPUT_PLACEHOLDER, &request.output_path.to_string_lossy()),
                ),
            })
            .collect()
    }
}

impl DiagramRenderer for CommandRenderer {
    fn render(&self, request: &RenderRequest) -> RenderFuture<'_> {
        let args = self.expand_args(request);
        Box::pin(async move {
            let path = which::which(&self.program)
                .map_err(|_| RenderError::RendererNotFound(self.program.clone()))?;

            tracing::debug!(program = %path.display(), ?args, "spawning renderer");

            let output = Command::new(&path)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await?;

            if output.status.success() {
                return Ok(());
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            if message.is_empty() {
                Err(RenderError::Renderer(format!("renderer exited with {}", output.status)))
            } else {
                Err(RenderError::Renderer(message.to_string()))
            }
        })
    }
}
