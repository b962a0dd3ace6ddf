//! Palette and glyph sizes (pixels unless noted)

pub const BACKGROUND: &str = "#FCF7F4";
pub const INK: &str = "#191919";
pub const FLOOR_FILL: &str = "white";
pub const FLOOR_STROKE_WIDTH: f64 = 2.0;
pub const GLYPH_STROKE_WIDTH: f64 = 1.0;
pub const FONT_FAMILY: &str = "sans-serif";

pub const SECTION_MARKER: &str = "#349552";
pub const SECTION_MARKER_RADIUS: f64 = 3.0;
pub const SECTION_FONT_SIZE: f64 = 14.0;
/// Label baseline sits this far above the marker
pub const SECTION_LABEL_OFFSET: f64 = 10.0;

pub const DOOR_OPEN: &str = "#35B0FE";
pub const DOOR_CLOSED: &str = "#F17F38";
pub const DOOR_THICKNESS: f64 = 10.0;

pub const WINDOW_FILL: &str = "#07C0C3";
pub const WINDOW_THICKNESS: f64 = 6.0;

pub const FURNITURE_DEFAULT: &str = "#D9D9D9";
pub const FURNITURE_FONT_SIZE: f64 = 10.0;
/// Furniture narrower than this gets no label
pub const FURNITURE_LABEL_MIN_WIDTH: f64 = 30.0;

/// Fill for a furniture type, gray when unlisted
pub fn furniture_fill(kind: &str) -> &'static str {
    match kind {
        "bed" | "sofa" | "chair" => "#E8F5E9",
        "table" => "#FFF3E0",
        "storage" | "cabinet" => "#E3F2FD",
        _ => FURNITURE_DEFAULT,
    }
}
