//! RoomPlan scan documents.
//!
//! The document keeps each top-level collection as raw JSON and only
//! validates it into typed records when that collection is asked for, so a
//! malformed `doors` array cannot take `windows` or the floor down with it.

use glam::{DVec2, dvec2};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::{ExtractError, LoadError, SourceContext};

/// Transforms are flattened 4x4 matrices; the translation lives at 12..=13
const TRANSLATION_X: usize = 12;
const TRANSLATION_Y: usize = 13;

/// A parsed RoomPlan export
#[derive(Debug, Clone, Default)]
pub struct RoomScanDocument {
    floors: Option<Value>,
    sections: Option<Value>,
    doors: Option<Value>,
    windows: Option<Value>,
    objects: Option<Value>,
}

/// One story of the scan. Only the first is ever drawn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRecord {
    #[serde(default)]
    pub polygon_corners: Option<Vec<Vec<f64>>>,
}

/// A labelled room region
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionRecord {
    #[serde(default)]
    pub center: Option<Vec<f64>>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Anything placed by a transform: doors, windows and furniture
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacedRecord {
    #[serde(default)]
    pub transform: Option<Vec<f64>>,
    #[serde(default)]
    pub dimensions: Option<Vec<f64>>,
    #[serde(default)]
    pub category: Option<Map<String, Value>>,
}

impl RoomScanDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(name: &str, text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| LoadError::json(&SourceContext::new(name, text), e))?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(mut root) = value else {
            return Err(LoadError::NotAnObject);
        };
        Ok(RoomScanDocument {
            floors: root.remove("floors"),
            sections: root.remove("sections"),
            doors: root.remove("doors"),
            windows: root.remove("windows"),
            objects: root.remove("objects"),
        })
    }

    pub fn floors(&self) -> Result<Vec<FloorRecord>, ExtractError> {
        collection("floors", self.floors.as_ref())
    }

    pub fn sections(&self) -> Result<Vec<SectionRecord>, ExtractError> {
        collection("sections", self.sections.as_ref())
    }

    pub fn doors(&self) -> Result<Vec<PlacedRecord>, ExtractError> {
        collection("doors", self.doors.as_ref())
    }

    pub fn windows(&self) -> Result<Vec<PlacedRecord>, ExtractError> {
        collection("windows", self.windows.as_ref())
    }

    pub fn objects(&self) -> Result<Vec<PlacedRecord>, ExtractError> {
        collection("objects", self.objects.as_ref())
    }
}

/// Validate one top-level collection. Absent or null means empty.
fn collection<T: DeserializeOwned>(
    kind: &'static str,
    value: Option<&Value>,
) -> Result<Vec<T>, ExtractError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            Vec::<T>::deserialize(value).map_err(|e| ExtractError::ElementKind {
                kind,
                message: e.to_string(),
            })
        }
    }
}

impl SectionRecord {
    /// Center projected to the floor plane, if it has at least x and y
    pub fn center(&self) -> Option<DVec2> {
        match self.center.as_deref() {
            Some([x, y, ..]) => Some(dvec2(*x, *y)),
            _ => None,
        }
    }
}

impl PlacedRecord {
    /// Number of transform entries present
    pub fn transform_len(&self) -> usize {
        self.transform.as_ref().map_or(0, Vec::len)
    }

    /// Translation column of the transform projected to the floor plane.
    /// `None` when the transform is too short to carry a translation.
    pub fn position(&self) -> Option<DVec2> {
        let t = self.transform.as_deref()?;
        match (t.get(TRANSLATION_X), t.get(TRANSLATION_Y)) {
            (Some(x), Some(y)) => Some(dvec2(*x, *y)),
            _ => None,
        }
    }

    /// `dimensions[0]`, or `default` when dimensions are missing or empty
    pub fn width_or(&self, default: f64) -> f64 {
        self.dimensions
            .as_deref()
            .and_then(|d| d.first().copied())
            .unwrap_or(default)
    }

    /// `dimensions[2]`, or `default` when fewer than three values are given
    pub fn depth_or(&self, default: f64) -> f64 {
        self.dimensions
            .as_deref()
            .and_then(|d| d.get(2).copied())
            .unwrap_or(default)
    }

    /// First key of the category map, in document order
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref()?.keys().next().map(String::as_str)
    }

    /// `category.door.isOpen`, false when absent or not a boolean
    pub fn is_open(&self) -> bool {
        self.category
            .as_ref()
            .and_then(|c| c.get("door"))
            .and_then(|door| door.get("isOpen"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn placed(value: Value) -> PlacedRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(
            RoomScanDocument::from_value(json!([1, 2, 3])),
            Err(LoadError::NotAnObject)
        ));
    }

    #[test]
    fn invalid_json_points_at_the_error() {
        let err = RoomScanDocument::from_json_str("scan.json", "{\n  \"floors\": [,]\n}").unwrap_err();
        match err {
            LoadError::InvalidJson { span, .. } => assert!(span.offset() > 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_collections_are_empty() {
        let doc = RoomScanDocument::from_value(json!({})).unwrap();
        assert!(doc.floors().unwrap().is_empty());
        assert!(doc.doors().unwrap().is_empty());
        let doc = RoomScanDocument::from_value(json!({ "doors": null })).unwrap();
        assert!(doc.doors().unwrap().is_empty());
    }

    #[test]
    fn malformed_collection_fails_alone() {
        let doc = RoomScanDocument::from_value(json!({
            "doors": "not a list",
            "windows": [{ "transform": vec![0.0; 16] }],
        }))
        .unwrap();
        assert!(matches!(doc.doors(), Err(ExtractError::ElementKind { kind: "doors", .. })));
        assert_eq!(doc.windows().unwrap().len(), 1);
    }

    #[test]
    fn position_reads_translation() {
        let mut t = vec![0.0; 16];
        t[12] = 2.0;
        t[13] = 1.5;
        let rec = placed(json!({ "transform": t }));
        assert_eq!(rec.position(), Some(dvec2(2.0, 1.5)));
    }

    #[test]
    fn short_transform_has_no_position() {
        assert_eq!(placed(json!({ "transform": vec![0.0; 11] })).position(), None);
        assert_eq!(placed(json!({ "transform": vec![0.0; 13] })).position(), None);
        assert_eq!(placed(json!({})).position(), None);
    }

    #[test]
    fn dimension_defaults() {
        let rec = placed(json!({ "dimensions": [] }));
        assert_eq!(rec.width_or(0.8), 0.8);
        let rec = placed(json!({ "dimensions": [1.2, 0.9] }));
        assert_eq!(rec.width_or(0.5), 1.2);
        assert_eq!(rec.depth_or(0.5), 0.5);
        let rec = placed(json!({ "dimensions": [1.2, 0.9, 0.7] }));
        assert_eq!(rec.depth_or(0.5), 0.7);
    }

    #[test]
    fn category_keeps_document_order() {
        let rec = placed(json!({ "category": { "table": {}, "chair": {} } }));
        assert_eq!(rec.category_name(), Some("table"));
        assert_eq!(placed(json!({})).category_name(), None);
    }

    #[test]
    fn door_open_flag() {
        assert!(placed(json!({ "category": { "door": { "isOpen": true } } })).is_open());
        assert!(!placed(json!({ "category": { "door": {} } })).is_open());
        assert!(!placed(json!({ "category": { "door": { "isOpen": "yes" } } })).is_open());
    }

    #[test]
    fn section_center_needs_two_components() {
        let s: SectionRecord = serde_json::from_value(json!({ "center": [1.0, 2.0, 3.0] })).unwrap();
        assert_eq!(s.center(), Some(dvec2(1.0, 2.0)));
        let s: SectionRecord = serde_json::from_value(json!({ "center": [1.0] })).unwrap();
        assert_eq!(s.center(), None);
    }
}
