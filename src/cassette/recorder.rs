//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Accumulates interactions and writes them as a YAML cassette on
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Record an interaction; `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Interactions recorded so far.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Write the cassette to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sequence_numbers_follow_recording_order() {
        let mut recorder = CassetteRecorder::new("unused.yaml", "seq", "abc");
        recorder.record("diagram_renderer", "render", json!({}), json!({"Ok": {"data": ""}}));
        recorder.record("diagram_renderer", "render", json!({}), json!({"Err": "boom"}));
        let seqs: Vec<u64> = recorder.interactions().iter().map(|i| i.seq).collect();
        assert_eq!(seqs, [0, 1]);
    }

    #[test]
    fn finish_writes_loadable_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/test.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "blog-model", "deadbeef");
        recorder.record(
            "diagram_renderer",
            "render",
            json!({"script": "user {\n    id int PK\n}\n\n"}),
            json!({"Ok": {"data": "PHN2Zy8+"}}),
        );

        let written = recorder.finish().expect("finish should succeed");
        assert_eq!(written, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "blog-model");
        assert_eq!(cassette.commit, "deadbeef");
        assert_eq!(cassette.interactions[0].input["script"], "user {\n    id int PK\n}\n\n");
    }
}
