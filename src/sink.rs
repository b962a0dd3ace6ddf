//! Handing finished SVGs to storage.
//!
//! The pipeline never does I/O itself. A caller wraps the SVG in an
//! [`SvgArtifact`] and gives it to whatever [`ArtifactSink`] it owns.

use crate::errors::SinkError;

/// MIME type of every artifact this crate produces
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// SVG bytes ready for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl SvgArtifact {
    pub fn new(svg: impl Into<String>) -> Self {
        Self {
            bytes: svg.into().into_bytes(),
            content_type: SVG_CONTENT_TYPE,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Opaque reference to a persisted artifact (a path, a key, a URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactHandle(pub String);

impl std::fmt::Display for ArtifactHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Somewhere artifacts can be stored
pub trait ArtifactSink {
    fn persist(&mut self, artifact: SvgArtifact) -> Result<ArtifactHandle, SinkError>;
}
