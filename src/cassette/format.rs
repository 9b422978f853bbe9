//! Cassette file format.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Sequence number within the cassette.
    pub seq: u64,
    /// Port name, e.g. `diagram_renderer`.
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized result using the `Ok`/`Err` convention.
    pub output: serde_json::Value,
}

impl Cassette {
    /// Read and parse a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_handwritten_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svg.cassette.yaml");
        std::fs::write(
            &path,
            "name: svg\nrecorded_at: \"2026-10-01T00:00:00Z\"\ncommit: test\ninteractions:\n  \
             - seq: 0\n    port: diagram_renderer\n    method: render\n    input: {}\n    \
             output:\n      Ok:\n        data: PHN2Zy8+\n",
        )
        .unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "svg");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].output["Ok"]["data"], "PHN2Zy8+");
    }

    #[test]
    fn load_nonexistent_fails() {
        let err = Cassette::load(Path::new("/nonexistent/cassette.yaml")).unwrap_err();
        assert!(err.starts_with("Failed to read cassette file"));
    }

    #[test]
    fn load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "interactions: [[[").unwrap();
        assert!(Cassette::load(&path).unwrap_err().starts_with("Failed to parse"));
    }
}
