//! Output format parameters and their HTTP/file mappings.

use std::fmt;

/// Image formats the renderer can be asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Scalable Vector Graphics.
    Svg,
    /// Portable Network Graphics.
    Png,
}

impl OutputFormat {
    /// MIME type sent as `Content-Type`.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }

    /// File extension, also used as the temp file suffix so the renderer
    /// picks the right output format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Whether `data` starts with this format's signature.
    #[must_use]
    pub fn matches_signature(self, data: &[u8]) -> bool {
        match self {
            Self::Svg => {
                let head = String::from_utf8_lossy(&data[..data.len().min(256)]);
                let head = head.trim_start();
                head.starts_with("<?xml") || head.starts_with("<svg")
            }
            Self::Png => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parse and validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(OutputFormat::Svg),
        "png" => Ok(OutputFormat::Png),
        _ => Err(format!("Unsupported format '{format}'. Valid: svg, png")),
    }
}
