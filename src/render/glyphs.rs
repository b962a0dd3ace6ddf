//! Per-element drawing.
//!
//! Every drawable kind implements [`Glyph`]; [`Element`] dispatches over
//! them so the renderer can walk one list in draw order.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use super::defaults;
use super::svg::{self, Paint, SvgNode};
use crate::errors::RenderError;
use crate::extract::{Door, Furniture, RoomSection, Window};
use crate::layout::Viewport;
use crate::types::Point2D;

/// Something that can be drawn onto the floorplan canvas
#[enum_dispatch]
pub trait Glyph {
    /// Append this element's SVG nodes
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError>;
}

/// Any drawable floorplan element
#[enum_dispatch(Glyph)]
#[derive(Debug, Clone)]
pub enum Element {
    Boundary(Boundary),
    RoomSection(RoomSection),
    Door(Door),
    Window(Window),
    Furniture(Furniture),
}

/// The floor outline, drawn as given
#[derive(Debug, Clone)]
pub struct Boundary {
    pub points: Vec<Point2D>,
}

impl Glyph for Boundary {
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError> {
        if self.points.is_empty() {
            return Ok(());
        }
        let points = self
            .points
            .iter()
            .map(|&p| viewport.project_finite(p, "floor boundary"))
            .collect::<Result<Vec<_>, _>>()?;
        out.push(SvgNode::Polygon(svg::polygon(
            &points,
            Paint::outlined(defaults::FLOOR_FILL, defaults::INK, defaults::FLOOR_STROKE_WIDTH),
        )));
        Ok(())
    }
}

impl Glyph for RoomSection {
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError> {
        let at = viewport.project_finite(self.center, "room section")?;
        out.push(SvgNode::Circle(svg::circle(
            at,
            defaults::SECTION_MARKER_RADIUS,
            Paint::fill(defaults::SECTION_MARKER),
        )));
        out.push(SvgNode::Text(svg::label(
            at - DVec2::Y * defaults::SECTION_LABEL_OFFSET,
            title_case_label(&self.label),
            defaults::SECTION_FONT_SIZE,
        )));
        Ok(())
    }
}

impl Glyph for Door {
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError> {
        let at = viewport.project_finite(self.position, "door")?;
        let fill = if self.is_open {
            defaults::DOOR_OPEN
        } else {
            defaults::DOOR_CLOSED
        };
        out.push(SvgNode::Rect(svg::centered_rect(
            at,
            finite(viewport.scale.px_x(self.width), "door")?,
            defaults::DOOR_THICKNESS,
            Paint::outlined(fill, defaults::INK, defaults::GLYPH_STROKE_WIDTH),
        )));
        Ok(())
    }
}

impl Glyph for Window {
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError> {
        let at = viewport.project_finite(self.position, "window")?;
        out.push(SvgNode::Rect(svg::centered_rect(
            at,
            finite(viewport.scale.px_x(self.width), "window")?,
            defaults::WINDOW_THICKNESS,
            Paint::outlined(defaults::WINDOW_FILL, defaults::INK, defaults::GLYPH_STROKE_WIDTH),
        )));
        Ok(())
    }
}

impl Glyph for Furniture {
    fn render(&self, viewport: &Viewport, out: &mut Vec<SvgNode>) -> Result<(), RenderError> {
        let at = viewport.project_finite(self.position, "furniture")?;
        let width = finite(viewport.scale.px_x(self.width), "furniture")?;
        let depth = finite(viewport.scale.px_y(self.depth), "furniture")?;
        out.push(SvgNode::Rect(svg::centered_rect(
            at,
            width,
            depth,
            Paint::outlined(
                defaults::furniture_fill(&self.kind),
                defaults::INK,
                defaults::GLYPH_STROKE_WIDTH,
            ),
        )));
        if width > defaults::FURNITURE_LABEL_MIN_WIDTH {
            out.push(SvgNode::Text(svg::label(
                at,
                capitalize(&self.kind),
                defaults::FURNITURE_FONT_SIZE,
            )));
        }
        Ok(())
    }
}

fn finite(px: f64, element: &'static str) -> Result<f64, RenderError> {
    if px.is_finite() {
        Ok(px)
    } else {
        Err(RenderError::NonFinite { element })
    }
}

/// `livingRoom` -> `Living Room`.
///
/// Splits before every uppercase letter, then upper-cases the first letter
/// of each run of letters and lower-cases the rest.
pub fn title_case_label(label: &str) -> String {
    let mut spaced = String::with_capacity(label.len() + 4);
    for c in label.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut out = String::with_capacity(spaced.len());
    let mut in_word = false;
    for c in spaced.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// `sofa` -> `Sofa`, `TV` -> `Tv`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::types::Bounds;
    use glam::dvec2;

    fn viewport() -> Viewport {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 4.0, max_y: 2.0 };
        Viewport::fit(b, &RenderOptions::default()).unwrap()
    }

    fn render(element: impl Into<Element>) -> Vec<SvgNode> {
        let mut out = Vec::new();
        element.into().render(&viewport(), &mut out).unwrap();
        out
    }

    #[test]
    fn title_case() {
        assert_eq!(title_case_label("livingRoom"), "Living Room");
        assert_eq!(title_case_label("bedroom"), "Bedroom");
        assert_eq!(title_case_label("DiningRoom"), "Dining Room");
        assert_eq!(title_case_label("room2b"), "Room2B");
        assert_eq!(title_case_label(""), "");
    }

    #[test]
    fn capitalize_type() {
        assert_eq!(capitalize("sofa"), "Sofa");
        assert_eq!(capitalize("TV"), "Tv");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn open_door_is_blue_and_centered() {
        let nodes = render(Door { position: dvec2(2.0, 1.0), width: 0.5, is_open: true });
        let [SvgNode::Rect(rect)] = nodes.as_slice() else {
            panic!("expected one rect, got {nodes:?}");
        };
        assert_eq!(rect.fill.as_deref(), Some(defaults::DOOR_OPEN));
        assert_eq!(rect.width, Some(100.0));
        assert_eq!(rect.height, Some(defaults::DOOR_THICKNESS));
        assert_eq!(rect.x, Some(400.0 - 50.0));
        assert_eq!(rect.y, Some(200.0 - 5.0));
    }

    #[test]
    fn closed_door_is_orange() {
        let nodes = render(Door { position: dvec2(2.0, 1.0), width: 0.5, is_open: false });
        let [SvgNode::Rect(rect)] = nodes.as_slice() else {
            panic!("expected one rect");
        };
        assert_eq!(rect.fill.as_deref(), Some(defaults::DOOR_CLOSED));
    }

    #[test]
    fn small_furniture_has_no_label() {
        let small = Furniture { position: dvec2(1.0, 1.0), width: 0.1, depth: 0.1, kind: "chair".into() };
        assert_eq!(render(small).len(), 1);
        let big = Furniture { position: dvec2(1.0, 1.0), width: 1.0, depth: 0.5, kind: "table".into() };
        let nodes = render(big);
        assert_eq!(nodes.len(), 2);
        let SvgNode::Text(label) = &nodes[1] else {
            panic!("expected a label");
        };
        assert_eq!(label.content, "Table");
    }

    #[test]
    fn furniture_fill_by_type() {
        let nodes = render(Furniture { position: dvec2(1.0, 1.0), width: 0.1, depth: 0.1, kind: "cabinet".into() });
        let SvgNode::Rect(rect) = &nodes[0] else {
            panic!("expected a rect");
        };
        assert_eq!(rect.fill.as_deref(), Some("#E3F2FD"));
    }

    #[test]
    fn section_marker_and_label() {
        let nodes = render(RoomSection { center: dvec2(2.0, 1.0), label: "livingRoom".into() });
        assert!(matches!(&nodes[0], SvgNode::Circle(c) if c.cx == Some(400.0) && c.cy == Some(200.0)));
        assert!(matches!(&nodes[1], SvgNode::Text(t) if t.y == Some(190.0) && t.content == "Living Room"));
    }

    #[test]
    fn tiny_furniture_stays_finite() {
        let nodes = render(Furniture { position: dvec2(2.0, 1.0), width: 1e-306, depth: 0.5, kind: "table".into() });
        let SvgNode::Rect(rect) = &nodes[0] else {
            panic!("expected a rect");
        };
        assert!(rect.width.is_some_and(f64::is_finite));
        assert_eq!(svg::fmt_num(rect.width.unwrap_or_default()), "0");
    }

    #[test]
    fn boundary_points_are_projected() {
        let nodes = render(Boundary { points: vec![dvec2(0.0, 0.0), dvec2(4.0, 0.0), dvec2(4.0, 2.0)] });
        let [SvgNode::Polygon(polygon)] = nodes.as_slice() else {
            panic!("expected one polygon");
        };
        assert_eq!(polygon.points.as_deref(), Some("0,400 800,400 800,0"));
        assert_eq!(polygon.stroke_width, Some(defaults::FLOOR_STROKE_WIDTH));
    }

    #[test]
    fn empty_boundary_draws_nothing() {
        assert!(render(Boundary { points: Vec::new() }).is_empty());
    }
}
