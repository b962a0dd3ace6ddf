//! SVG DOM construction and serialization
//!
//! Elements are `facet_svg` types; `facet_xml` writes them out with every
//! float going through [`fmt_num`], so output is byte-stable.

use std::fmt::Write;

use facet_svg::facet_xml::{self, SerializeOptions};
pub use facet_svg::{Circle, Polygon, Rect, SVG_NS, Svg, SvgNode, Text};
use glam::DVec2;

use super::defaults;
use crate::errors::RenderError;
use crate::types::Canvas;

/// Fill and optional outline shared by the shapes we draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: &'static str,
    pub stroke: Option<(&'static str, f64)>,
}

impl Paint {
    pub fn fill(fill: &'static str) -> Self {
        Paint { fill, stroke: None }
    }

    pub fn outlined(fill: &'static str, stroke: &'static str, stroke_width: f64) -> Self {
        Paint {
            fill,
            stroke: Some((stroke, stroke_width)),
        }
    }

    fn stroke(&self) -> Option<String> {
        self.stroke.map(|(color, _)| color.to_string())
    }

    fn stroke_width(&self) -> Option<f64> {
        self.stroke.map(|(_, width)| width)
    }
}

/// Root element sized to `canvas`, with a matching viewBox
pub fn document(canvas: Canvas) -> Svg {
    let (w, h) = (fmt_num(canvas.width), fmt_num(canvas.height));
    Svg {
        xmlns: Some(SVG_NS.to_string()),
        view_box: Some(format!("0 0 {w} {h}")),
        width: Some(w),
        height: Some(h),
        children: Vec::new(),
    }
}

/// Full-canvas rect with no position attributes
pub fn background(canvas: Canvas, fill: &'static str) -> Rect {
    Rect {
        width: Some(canvas.width),
        height: Some(canvas.height),
        fill: Some(fill.to_string()),
        ..Default::default()
    }
}

/// Rect of the given size centered on `center`
pub fn centered_rect(center: DVec2, width: f64, height: f64, paint: Paint) -> Rect {
    Rect {
        x: Some(center.x - width / 2.0),
        y: Some(center.y - height / 2.0),
        width: Some(width),
        height: Some(height),
        fill: Some(paint.fill.to_string()),
        stroke: paint.stroke(),
        stroke_width: paint.stroke_width(),
    }
}

pub fn circle(center: DVec2, r: f64, paint: Paint) -> Circle {
    Circle {
        cx: Some(center.x),
        cy: Some(center.y),
        r: Some(r),
        fill: Some(paint.fill.to_string()),
        stroke: paint.stroke(),
        stroke_width: paint.stroke_width(),
    }
}

pub fn polygon(points: &[DVec2], paint: Paint) -> Polygon {
    Polygon {
        points: Some(points_attr(points)),
        fill: Some(paint.fill.to_string()),
        stroke: paint.stroke(),
        stroke_width: paint.stroke_width(),
    }
}

/// Middle-anchored label in the default font
pub fn label(at: DVec2, content: String, font_size: f64) -> Text {
    Text {
        x: Some(at.x),
        y: Some(at.y),
        text_anchor: Some("middle".to_string()),
        font_family: Some(defaults::FONT_FAMILY.to_string()),
        font_size: Some(font_size),
        fill: Some(defaults::INK.to_string()),
        content,
    }
}

/// `x,y` pairs separated by spaces
pub fn points_attr(points: &[DVec2]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(p.x), fmt_num(p.y));
    }
    out
}

/// Serialize a document to XML text
pub fn to_xml(svg: &Svg) -> Result<String, RenderError> {
    fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
        write!(writer, "{}", fmt_num(value))
    }

    let options = SerializeOptions {
        float_formatter: Some(format_float),
        ..Default::default()
    };
    facet_xml::to_string_with_options(svg, &options).map_err(|e| RenderError::Xml(e.to_string()))
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    // Subnormal-range inputs overflow `scale`
    if !rounded.is_finite() {
        return "0".to_string();
    }

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    match s {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(800.0), "800");
        assert_eq!(fmt_num(66.66666666666667), "66.6667");
        assert_eq!(fmt_num(549.9999999999999), "550");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-12.25), "-12.25");
        assert_eq!(fmt_num(1_234_567.0), "1234570");
    }

    #[test]
    fn fmt_num_small_values() {
        assert_eq!(fmt_num(-0.0000001), "-0.0000001");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn fmt_num_never_writes_nan() {
        for value in [1e-305, -1e-305, 1e-310, f64::MIN_POSITIVE, 5e-324] {
            let s = fmt_num(value);
            assert!(s.parse::<f64>().is_ok_and(f64::is_finite), "{value:e} -> {s}");
        }
    }

    #[test]
    fn document_view_box_matches_size() {
        let svg = document(Canvas { width: 800.0, height: 333.3333333 });
        assert_eq!(svg.width.as_deref(), Some("800"));
        assert_eq!(svg.height.as_deref(), Some("333.333"));
        assert_eq!(svg.view_box.as_deref(), Some("0 0 800 333.333"));
        assert_eq!(svg.xmlns.as_deref(), Some(SVG_NS));
    }

    #[test]
    fn points_are_space_separated_pairs() {
        let points = [dvec2(0.0, 0.0), dvec2(10.5, 0.0), dvec2(10.5, 20.0 / 3.0)];
        assert_eq!(points_attr(&points), "0,0 10.5,0 10.5,6.66667");
        assert_eq!(points_attr(&[]), "");
    }

    #[test]
    fn rect_is_centered() {
        let r = centered_rect(dvec2(10.0, 10.0), 4.0, 2.0, Paint::outlined("white", "#191919", 1.0));
        assert_eq!((r.x, r.y), (Some(8.0), Some(9.0)));
        assert_eq!(r.stroke.as_deref(), Some("#191919"));
        assert_eq!(r.stroke_width, Some(1.0));
    }

    #[test]
    fn serialized_floats_use_fmt_num() {
        let mut svg = document(Canvas { width: 100.0, height: 50.0 });
        svg.children.push(SvgNode::Circle(circle(
            dvec2(100.0 / 3.0, 1e-305),
            3.0,
            Paint::fill("#349552"),
        )));
        let xml = to_xml(&svg).unwrap();
        assert!(xml.contains(r#"cx="33.3333""#), "{xml}");
        assert!(xml.contains(r#"cy="0""#), "{xml}");
        assert!(!xml.contains("NaN"));
    }

    #[test]
    fn serializes_and_parses_back() {
        let mut svg = document(Canvas { width: 100.0, height: 50.0 });
        svg.children.push(SvgNode::Rect(background(
            Canvas { width: 100.0, height: 50.0 },
            "#FCF7F4",
        )));
        svg.children.push(SvgNode::Polygon(polygon(
            &[dvec2(0.0, 0.0), dvec2(10.5, 0.0), dvec2(10.5, 20.0)],
            Paint::outlined("white", "#191919", 2.0),
        )));
        svg.children.push(SvgNode::Text(label(dvec2(5.0, 6.0), "Tom & Jerry's <den>".into(), 14.0)));

        let xml = to_xml(&svg).unwrap();
        assert!(xml.starts_with("<svg"));
        assert!(!xml.contains("<den>"));

        let parsed: Svg = facet_xml::from_str(&xml).unwrap();
        assert_eq!(parsed.view_box, svg.view_box);
        assert_eq!(parsed.children, svg.children);
    }
}
