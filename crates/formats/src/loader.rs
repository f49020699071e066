use std::collections::BTreeMap;

use board::Board;
use board::element::ElementId;
use board::prefabs::{Slider, SliderOptions, SliderRange, spawn_slider};
use foundation::math::Vec2;

use crate::manifest::{BoardManifest, ElementEntry};

#[derive(Debug)]
pub enum BoardLoadError {
    Parse(String),
    DuplicateId { id: String },
    UnknownReference { id: String, reference: String },
}

impl std::fmt::Display for BoardLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardLoadError::Parse(msg) => write!(f, "manifest parse error: {msg}"),
            BoardLoadError::DuplicateId { id } => {
                write!(f, "duplicate element id {id:?}")
            }
            BoardLoadError::UnknownReference { id, reference } => {
                write!(f, "element {id:?} references unknown element {reference:?}")
            }
        }
    }
}

impl std::error::Error for BoardLoadError {}

/// A board built from a manifest, with the manifest's ids resolved.
///
/// Slider entries resolve to their glider element; the full composite handle
/// is kept in `sliders` under the same id.
#[derive(Debug)]
pub struct LoadedBoard {
    pub board: Board,
    pub elements: BTreeMap<String, ElementId>,
    pub sliders: BTreeMap<String, Slider>,
}

pub fn load_board_from_json_str(payload: &str) -> Result<LoadedBoard, BoardLoadError> {
    let manifest: BoardManifest =
        serde_json::from_str(payload).map_err(|e| BoardLoadError::Parse(e.to_string()))?;
    build_board(&manifest)
}

pub fn build_board(manifest: &BoardManifest) -> Result<LoadedBoard, BoardLoadError> {
    let mut board = Board::new();
    let mut elements: BTreeMap<String, ElementId> = BTreeMap::new();
    let mut sliders: BTreeMap<String, Slider> = BTreeMap::new();

    for entry in &manifest.elements {
        let id = entry.id().to_string();
        if elements.contains_key(&id) {
            return Err(BoardLoadError::DuplicateId { id });
        }

        let element = match entry {
            ElementEntry::Point(e) => board.add_point(Vec2::new(e.x, e.y)),
            ElementEntry::Segment(e) => {
                let from = resolve(&elements, &id, &e.from)?;
                let to = resolve(&elements, &id, &e.to)?;
                board.add_segment(from, to)
            }
            ElementEntry::Slider(e) => {
                let slider = spawn_slider(
                    &mut board,
                    Vec2::new(e.from[0], e.from[1]),
                    Vec2::new(e.to[0], e.to[1]),
                    SliderRange::new(e.min, e.start, e.max),
                    SliderOptions {
                        name: Some(id.clone()),
                        with_ticks: e.ticks,
                        tick_count: e.tick_count,
                        with_label: e.label,
                        snap_width: e.snap_width,
                        precision: e.precision,
                    },
                );
                let glider = slider.glider;
                sliders.insert(id.clone(), slider);
                glider
            }
        };
        elements.insert(id, element);
    }

    Ok(LoadedBoard {
        board,
        elements,
        sliders,
    })
}

fn resolve(
    elements: &BTreeMap<String, ElementId>,
    id: &str,
    reference: &str,
) -> Result<ElementId, BoardLoadError> {
    elements
        .get(reference)
        .copied()
        .ok_or_else(|| BoardLoadError::UnknownReference {
            id: id.to_string(),
            reference: reference.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{BoardLoadError, load_board_from_json_str};
    use board::element::ElementKind;
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    const DEMO: &str = r#"{
        "version": "1.0",
        "board_id": "demo",
        "name": "demo board",
        "elements": [
            { "kind": "point", "id": "a", "x": 0.0, "y": 0.0 },
            { "kind": "point", "id": "b", "x": 4.0, "y": 0.0 },
            { "kind": "segment", "id": "ab", "from": "a", "to": "b" },
            {
                "kind": "slider", "id": "s",
                "from": [0.0, 2.0], "to": [4.0, 2.0],
                "min": 0.0, "start": 2.5, "max": 10.0
            }
        ]
    }"#;

    #[test]
    fn builds_points_segments_and_sliders() {
        let loaded = load_board_from_json_str(DEMO).unwrap();

        let a = loaded.elements["a"];
        assert_eq!(loaded.board.kind(a), Some(ElementKind::Point));
        assert_eq!(loaded.board.position(a), Some(Vec2::new(0.0, 0.0)));

        let ab = loaded.elements["ab"];
        assert_eq!(loaded.board.kind(ab), Some(ElementKind::Segment));

        let slider = &loaded.sliders["s"];
        assert_eq!(slider.name(), Some("s"));
        assert_eq!(slider.value(&loaded.board), 2.5);
        // The manifest id of a slider resolves to its glider.
        assert_eq!(loaded.elements["s"], slider.glider);
        assert_eq!(
            loaded.board.kind(slider.glider),
            Some(ElementKind::Glider)
        );
    }

    #[test]
    fn unknown_reference_fails() {
        let payload = r#"{
            "version": "1.0",
            "board_id": "demo",
            "name": null,
            "elements": [
                { "kind": "segment", "id": "ab", "from": "a", "to": "b" }
            ]
        }"#;
        let err = load_board_from_json_str(payload).unwrap_err();
        assert!(matches!(err, BoardLoadError::UnknownReference { .. }));
        assert_eq!(
            err.to_string(),
            "element \"ab\" references unknown element \"a\""
        );
    }

    #[test]
    fn duplicate_id_fails() {
        let payload = r#"{
            "version": "1.0",
            "board_id": "demo",
            "name": null,
            "elements": [
                { "kind": "point", "id": "p", "x": 0.0, "y": 0.0 },
                { "kind": "point", "id": "p", "x": 1.0, "y": 0.0 }
            ]
        }"#;
        let err = load_board_from_json_str(payload).unwrap_err();
        assert!(matches!(err, BoardLoadError::DuplicateId { .. }));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = load_board_from_json_str("not json").unwrap_err();
        assert!(matches!(err, BoardLoadError::Parse(_)));
    }
}
