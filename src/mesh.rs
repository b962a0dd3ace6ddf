//! Vertex loading for the point-cloud path.
//!
//! Two inputs are understood: a JSON vertex array (`[[x, y, z], ...]` or
//! `{"vertices": [...]}`) and Wavefront OBJ text, of which only the `v`
//! lines are read.

use glam::{DVec3, dvec3};
use pest::Parser;
use pest::error::InputLocation;
use pest_derive::Parser;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{LoadError, SourceContext};
use crate::log;

#[derive(Parser)]
#[grammar = "mesh.pest"]
struct ObjParser;

#[derive(Deserialize)]
#[serde(untagged)]
enum VertexJson {
    Bare(Vec<Vec<f64>>),
    Wrapped { vertices: Vec<Vec<f64>> },
}

/// Load mesh vertices from JSON or OBJ text.
///
/// Text whose first non-blank character is `[` or `{` is read as JSON,
/// anything else as OBJ. Extra components past z (OBJ `w`, vertex colors)
/// are ignored.
pub fn load_vertices(name: &str, text: &str) -> Result<Vec<DVec3>, LoadError> {
    let ctx = SourceContext::new(name, text);
    let vertices = match text.trim_start().chars().next() {
        Some('[' | '{') => load_json(&ctx)?,
        _ => load_obj(&ctx)?,
    };
    log::debug!(name, vertices = vertices.len(), "loaded mesh");
    Ok(vertices)
}

fn load_json(ctx: &SourceContext) -> Result<Vec<DVec3>, LoadError> {
    let value: Value = serde_json::from_str(&ctx.source).map_err(|e| LoadError::json(ctx, e))?;

    let rows = match VertexJson::deserialize(&value) {
        Ok(VertexJson::Bare(rows) | VertexJson::Wrapped { vertices: rows }) => rows,
        Err(_) => {
            return Err(LoadError::MalformedMesh {
                message: r#"expected [[x, y, z], ...] or {"vertices": [[x, y, z], ...]}"#
                    .to_string(),
                src: ctx.named_source(),
                span: (0, ctx.source.len()).into(),
            });
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_slice() {
            [x, y, z, ..] => Ok(dvec3(*x, *y, *z)),
            _ => Err(LoadError::ShortVertex {
                index,
                found: row.len(),
            }),
        })
        .collect()
}

fn load_obj(ctx: &SourceContext) -> Result<Vec<DVec3>, LoadError> {
    let mesh = ObjParser::parse(Rule::mesh, &ctx.source)
        .map_err(|e| {
            let span = match e.location {
                InputLocation::Pos(pos) => (pos, 0),
                InputLocation::Span((start, end)) => (start, end - start),
            };
            LoadError::MalformedMesh {
                message: e.variant.message().to_string(),
                src: ctx.named_source(),
                span: span.into(),
            }
        })?
        .next();

    let mut vertices = Vec::new();
    for pair in mesh.into_iter().flat_map(|m| m.into_inner()) {
        if pair.as_rule() != Rule::vertex {
            continue;
        }
        let mut coords = [0.0; 3];
        for (slot, number) in coords.iter_mut().zip(pair.into_inner()) {
            let span = number.as_span();
            *slot = number
                .as_str()
                .parse()
                .map_err(|e: std::num::ParseFloatError| LoadError::MalformedMesh {
                    message: e.to_string(),
                    src: ctx.named_source(),
                    span: (span.start(), span.end() - span.start()).into(),
                })?;
        }
        vertices.push(DVec3::from_array(coords));
    }
    Ok(vertices)
}
