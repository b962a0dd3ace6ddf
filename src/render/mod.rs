//! SVG rendering of extracted floorplan elements
//!
//! Draw order is fixed: background, floor boundary, room sections, doors,
//! windows, furniture. Every element goes through one [`Viewport`].

pub mod defaults;
pub mod glyphs;
pub mod svg;

use crate::config::RenderOptions;
use crate::errors::RenderError;
use crate::extract::FloorplanElements;
use crate::layout::Viewport;
use crate::log;
use crate::types::Bounds;

use glyphs::{Boundary, Element, Glyph};
use svg::SvgNode;

/// A serialized SVG and the viewport it was drawn with
#[derive(Debug, Clone)]
pub struct RenderedSvg {
    pub svg: String,
    pub viewport: Viewport,
}

/// Render `elements` into an SVG document fitted to `bounds`.
pub fn render_svg(
    elements: &FloorplanElements,
    bounds: &Bounds,
    options: &RenderOptions,
) -> Result<RenderedSvg, RenderError> {
    options.validate()?;
    let viewport = Viewport::fit(*bounds, options)?;

    let mut doc = svg::document(viewport.canvas);
    doc.children.push(SvgNode::Rect(svg::background(
        viewport.canvas,
        defaults::BACKGROUND,
    )));

    for element in draw_list(elements) {
        element.render(&viewport, &mut doc.children)?;
    }

    log::debug!(nodes = doc.children.len(), "rendered floorplan");
    Ok(RenderedSvg {
        svg: svg::to_xml(&doc)?,
        viewport,
    })
}

/// Elements in paint order
fn draw_list(elements: &FloorplanElements) -> Vec<Element> {
    let mut list = Vec::with_capacity(
        1 + elements.sections.len()
            + elements.doors.len()
            + elements.windows.len()
            + elements.objects.len(),
    );
    list.push(Element::from(Boundary {
        points: elements.floor.clone(),
    }));
    list.extend(elements.sections.iter().cloned().map(Element::from));
    list.extend(elements.doors.iter().cloned().map(Element::from));
    list.extend(elements.windows.iter().cloned().map(Element::from));
    list.extend(elements.objects.iter().cloned().map(Element::from));
    list
}
