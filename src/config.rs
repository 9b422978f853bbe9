//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::command::{INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER};
use crate::params::{validate_format, OutputFormat};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// External renderer invocation.
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Image format and download filename.
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level used when `RUST_LOG` is unset.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How to invoke the rendering program.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Program name or path, resolved on `PATH`.
    pub program: String,
    /// Arguments; `{input}` and `{output}` are replaced with the temp file paths.
    pub args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "eralchemy".to_string(),
            args: vec![
                "-i".to_string(),
                INPUT_PLACEHOLDER.to_string(),
                "-o".to_string(),
                OUTPUT_PLACEHOLDER.to_string(),
            ],
        }
    }
}

/// Rendered image settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Image format: `svg` or `png`.
    pub format: String,
    /// Download filename without extension.
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".to_string(), filename: "diagrama_er".to_string() }
    }
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Renderer program, preferring `ERENDER_RENDERER`.
    #[must_use]
    pub fn renderer_program(&self) -> String {
        std::env::var("ERENDER_RENDERER")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| self.renderer.program.clone())
    }

    /// Output format, preferring `ERENDER_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not supported.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        let format =
            std::env::var("ERENDER_FORMAT").unwrap_or_else(|_| self.output.format.clone());
        validate_format(&format)
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `ERENDER_CONFIG` environment variable
/// 3. `~/.config/erender/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("ERENDER_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/erender/config.toml")
    } else {
        PathBuf::from("erender.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.renderer.program, "eralchemy");
        assert_eq!(config.renderer.args, ["-i", "{input}", "-o", "{output}"]);
        assert_eq!(config.output.format, "svg");
        assert_eq!(config.output.filename, "diagrama_er");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.renderer.program, "eralchemy");
    }

    #[test]
    fn load_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[renderer]
program = "/opt/bin/eralchemy"
args = ["--input={input}", "--output={output}"]

[output]
format = "png"
filename = "schema"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.renderer.program, "/opt/bin/eralchemy");
        assert_eq!(config.renderer.args, ["--input={input}", "--output={output}"]);
        assert_eq!(config.output.format, "png");
        assert_eq!(config.output.filename, "schema");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nfilename = \"model\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.filename, "model");
        assert_eq!(config.output.format, "svg");
        assert_eq!(config.renderer.program, "eralchemy");
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse config"));
    }

    #[test]
    fn unsupported_format_rejected() {
        let config = Config {
            output: OutputConfig { format: "gif".into(), filename: "x".into() },
            ..Config::default()
        };
        let err = validate_format(&config.output.format).unwrap_err();
        assert!(err.contains("Unsupported format 'gif'"));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
