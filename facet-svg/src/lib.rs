//! Facet-derived types for the SVG elements a floorplan is drawn with.
//!
//! The same types serialize through `facet-xml` and parse back from it:
//!
//! ```rust
//! use facet_svg::Svg;
//!
//! let svg_str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
//!     <rect x="10" y="10" width="80" height="80" fill="white"/>
//! </svg>"#;
//!
//! let svg: Svg = facet_xml::from_str(svg_str).unwrap();
//! assert_eq!(svg.children.len(), 1);
//! ```

use facet::Facet;
use facet_xml as xml;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root SVG element
#[derive(Facet, Debug, Clone, Default, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Svg {
    #[facet(xml::attribute)]
    pub xmlns: Option<String>,
    #[facet(xml::attribute)]
    pub width: Option<String>,
    #[facet(xml::attribute)]
    pub height: Option<String>,
    #[facet(xml::attribute, rename = "viewBox")]
    pub view_box: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// Any node a floorplan contains
#[derive(Facet, Debug, Clone, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
pub enum SvgNode {
    #[facet(rename = "rect")]
    Rect(Rect),
    #[facet(rename = "circle")]
    Circle(Circle),
    #[facet(rename = "polygon")]
    Polygon(Polygon),
    #[facet(rename = "text")]
    Text(Text),
}

impl SvgNode {
    /// Element name as written in the document
    pub fn tag(&self) -> &'static str {
        match self {
            SvgNode::Rect(_) => "rect",
            SvgNode::Circle(_) => "circle",
            SvgNode::Polygon(_) => "polygon",
            SvgNode::Text(_) => "text",
        }
    }

    pub fn fill(&self) -> Option<&str> {
        match self {
            SvgNode::Rect(r) => r.fill.as_deref(),
            SvgNode::Circle(c) => c.fill.as_deref(),
            SvgNode::Polygon(p) => p.fill.as_deref(),
            SvgNode::Text(t) => t.fill.as_deref(),
        }
    }
}

/// SVG rect element (`<rect>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Rect {
    #[facet(xml::attribute)]
    pub x: Option<f64>,
    #[facet(xml::attribute)]
    pub y: Option<f64>,
    #[facet(xml::attribute)]
    pub width: Option<f64>,
    #[facet(xml::attribute)]
    pub height: Option<f64>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
}

/// SVG circle element (`<circle>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Circle {
    #[facet(xml::attribute)]
    pub cx: Option<f64>,
    #[facet(xml::attribute)]
    pub cy: Option<f64>,
    #[facet(xml::attribute)]
    pub r: Option<f64>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
}

/// SVG polygon element (`<polygon>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Polygon {
    /// Space-separated `x,y` pairs
    #[facet(xml::attribute)]
    pub points: Option<String>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
}

/// SVG text element (`<text>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Text {
    #[facet(xml::attribute)]
    pub x: Option<f64>,
    #[facet(xml::attribute)]
    pub y: Option<f64>,
    #[facet(xml::attribute, rename = "text-anchor")]
    pub text_anchor: Option<String>,
    #[facet(xml::attribute, rename = "font-family")]
    pub font_family: Option<String>,
    #[facet(xml::attribute, rename = "font-size")]
    pub font_size: Option<f64>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::text)]
    pub content: String,
}

// Re-export facet_xml for convenience
pub use facet_xml;
