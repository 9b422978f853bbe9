//! Output file naming and saving for the `render` subcommand.

use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::params::OutputFormat;

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // no leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "diagram".to_string()
    } else {
        result
    }
}

/// Resolve the output path: the explicit path, or the model file's stem with
/// the format's extension in the current directory.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, model_path: &Path, format: OutputFormat) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }
    let stem = model_path.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}.{}", sanitize_for_filename(&stem, 50), format.extension()))
}

/// Write rendered image bytes to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_image(data: &[u8], output_path: &Path) -> Result<(), RenderError> {
    std::fs::write(output_path, data).map_err(RenderError::Io)
}
