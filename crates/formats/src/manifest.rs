use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0";

/// Declarative board description.
///
/// Elements reference one another by id; order matters, references must
/// point at earlier entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardManifest {
    pub version: String,
    pub board_id: String,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    pub elements: Vec<ElementEntry>,
}

impl BoardManifest {
    pub fn new(board_id: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            board_id: board_id.into(),
            name: None,
            content_hash: None,
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementEntry {
    Point(PointEntry),
    Segment(SegmentEntry),
    Slider(SliderEntry),
}

impl ElementEntry {
    pub fn id(&self) -> &str {
        match self {
            ElementEntry::Point(e) => &e.id,
            ElementEntry::Segment(e) => &e.id,
            ElementEntry::Slider(e) => &e.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointEntry {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentEntry {
    pub id: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderEntry {
    pub id: String,
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub min: f64,
    pub start: f64,
    pub max: f64,
    #[serde(default = "default_true")]
    pub ticks: bool,
    #[serde(default = "default_tick_count")]
    pub tick_count: u32,
    #[serde(default = "default_true")]
    pub label: bool,
    #[serde(default = "default_snap_width")]
    pub snap_width: f64,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_true() -> bool {
    true
}

fn default_tick_count() -> u32 {
    4
}

fn default_snap_width() -> f64 {
    board::prefabs::SNAP_DISABLED
}

fn default_precision() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::{BoardManifest, ElementEntry, PointEntry, SliderEntry};
    use pretty_assertions::assert_eq;

    #[test]
    fn manifest_round_trips_through_json() {
        let mut manifest = BoardManifest::new("b1");
        manifest.name = Some("demo".to_string());
        manifest.elements.push(ElementEntry::Point(PointEntry {
            id: "p".to_string(),
            x: 1.0,
            y: 2.0,
        }));

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: BoardManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(manifest, back);
    }

    #[test]
    fn slider_entry_defaults_apply_on_parse() {
        let json = r#"{
            "kind": "slider",
            "id": "a",
            "from": [0.0, 0.0],
            "to": [4.0, 0.0],
            "min": 0.0,
            "start": 1.0,
            "max": 10.0
        }"#;
        let entry: ElementEntry = serde_json::from_str(json).unwrap();
        let ElementEntry::Slider(SliderEntry {
            ticks,
            tick_count,
            label,
            snap_width,
            precision,
            ..
        }) = entry
        else {
            panic!("expected slider entry");
        };
        assert!(ticks);
        assert_eq!(tick_count, 4);
        assert!(label);
        assert_eq!(snap_width, board::prefabs::SNAP_DISABLED);
        assert_eq!(precision, 2);
    }

    #[test]
    fn content_hash_is_omitted_when_absent() {
        let manifest = BoardManifest::new("b1");
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(!json.contains("content_hash"));
    }
}
