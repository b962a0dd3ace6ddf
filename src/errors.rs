//! Error types with rich diagnostics using miette
//!
//! Load errors carry source spans so a bad scan document points at the
//! offending byte. Everything else is plain data.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column pair, clamped to the source length
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let line_start: usize = self
            .source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + column.saturating_sub(1)).min(self.source.len())
    }
}

// ============================================================================
// Load Errors
// ============================================================================

/// Errors that occur while reading a scan document or a mesh
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("invalid JSON: {message}")]
    #[diagnostic(code(floorsketch::load::invalid_json))]
    InvalidJson {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("expected a JSON object at the document root")]
    #[diagnostic(
        code(floorsketch::load::not_an_object),
        help("RoomPlan exports are objects with floors, sections, doors, windows and objects")
    )]
    NotAnObject,

    #[error("malformed mesh: {message}")]
    #[diagnostic(code(floorsketch::load::malformed_mesh))]
    MalformedMesh {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("could not read this")]
        span: SourceSpan,
    },

    #[error("vertex {index} has {found} components, expected 3")]
    #[diagnostic(code(floorsketch::load::short_vertex))]
    ShortVertex { index: usize, found: usize },
}

impl LoadError {
    /// Point a serde_json error at the byte it stopped on
    pub fn json(ctx: &SourceContext, err: serde_json::Error) -> Self {
        LoadError::InvalidJson {
            message: err.to_string(),
            src: ctx.named_source(),
            span: (ctx.offset_of(err.line(), err.column()), 0).into(),
        }
    }
}

// ============================================================================
// Extraction Errors
// ============================================================================

/// Errors that occur while turning input records into floorplan primitives
#[derive(Error, Diagnostic, Debug)]
pub enum ExtractError {
    #[error("could not read {kind}: {message}")]
    #[diagnostic(code(floorsketch::extract::element_kind))]
    ElementKind { kind: &'static str, message: String },

    #[error("outline needs at least 3 points, got {found}")]
    #[diagnostic(code(floorsketch::extract::too_few_points))]
    TooFewPoints { found: usize },

    #[error("invalid outline scale: {0}")]
    #[diagnostic(code(floorsketch::extract::invalid_scale))]
    InvalidScale(NumericError),

    #[error("invalid {option}: {error}")]
    #[diagnostic(code(floorsketch::extract::invalid_option))]
    InvalidOption {
        option: &'static str,
        error: NumericError,
    },

    #[error("mesh has no finite vertices")]
    #[diagnostic(code(floorsketch::extract::empty_mesh))]
    EmptyMesh,

    #[error("outline point {index} is not finite")]
    #[diagnostic(code(floorsketch::extract::non_finite_point))]
    NonFinitePoint { index: usize },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid canvas width: {0}")]
    #[diagnostic(code(floorsketch::render::invalid_canvas))]
    InvalidCanvas(NumericError),

    #[error("infinite or NaN in bounds")]
    #[diagnostic(code(floorsketch::render::invalid_bounds))]
    InvalidBounds,

    #[error("{element} projects to a non-finite position")]
    #[diagnostic(code(floorsketch::render::non_finite))]
    NonFinite { element: &'static str },

    #[error("SVG serialization failed: {0}")]
    #[diagnostic(code(floorsketch::render::xml))]
    Xml(String),
}

// ============================================================================
// Sink Errors
// ============================================================================

/// Errors reported by an artifact sink
#[derive(Error, Diagnostic, Debug)]
pub enum SinkError {
    #[error("could not persist artifact: {0}")]
    #[diagnostic(code(floorsketch::sink::io))]
    Io(#[from] std::io::Error),

    #[error("could not encode metadata: {0}")]
    #[diagnostic(code(floorsketch::sink::metadata))]
    Metadata(#[from] serde_json::Error),
}

/// Any failure inside the generation pipeline
#[derive(Error, Diagnostic, Debug)]
pub enum FloorplanError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}
