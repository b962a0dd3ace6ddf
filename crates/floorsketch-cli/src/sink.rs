//! Artifact sink writing `<stem>.svg` and `<stem>.meta.json` into one directory

use std::fs;
use std::path::{Path, PathBuf};

use floorsketch::errors::SinkError;
use floorsketch::{ArtifactHandle, ArtifactSink, FloorplanMetadata, SvgArtifact};

pub struct DirectorySink {
    dir: PathBuf,
    stem: String,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    fn path(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{extension}", self.stem))
    }

    /// Write the metadata as pretty JSON beside the SVG
    pub fn write_metadata(&self, metadata: &FloorplanMetadata) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path("meta.json");
        fs::write(&path, serde_json::to_string_pretty(metadata)?)?;
        Ok(path)
    }
}

impl ArtifactSink for DirectorySink {
    fn persist(&mut self, artifact: SvgArtifact) -> Result<ArtifactHandle, SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path("svg");
        fs::write(&path, &artifact.bytes)?;
        tracing::debug!(path = %path.display(), bytes = artifact.byte_len(), "wrote svg");
        Ok(ArtifactHandle(display(&path)))
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
