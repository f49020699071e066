use foundation::bounds::Aabb2;

use crate::Board;
use crate::element::ElementKind;
use crate::groups::ElementSet;
use crate::spatial::{Bvh, Item as BvhItem};

/// Unified element query.
///
/// Board queries are intersections over:
/// - kind
/// - spatial (bbox, via element bounds)
/// - visibility
///
/// Ordering contract:
/// - `query_elements` returns an `ElementSet` whose iteration is in
///   ascending `ElementId::index()` order.
#[derive(Debug, Clone)]
pub struct ElementQuery {
    pub kind: Option<ElementKind>,
    pub bbox: Option<Aabb2>,
    pub visible_only: bool,
    pub limit: usize,
}

impl Default for ElementQuery {
    fn default() -> Self {
        Self {
            kind: None,
            bbox: None,
            visible_only: true,
            limit: 1000,
        }
    }
}

pub fn query_elements(board: &Board, query: &ElementQuery) -> ElementSet {
    let mut out = ElementSet::new();

    // With a bbox the BVH prunes candidates; both paths yield ascending order.
    let candidates: Vec<_> = match query.bbox {
        Some(bbox) => {
            let mut items: Vec<BvhItem> = Vec::new();
            for (element, _kind) in board.elements() {
                let Some(bounds) = board.bounds(element) else {
                    continue;
                };
                items.push(BvhItem { element, bounds });
            }
            Bvh::build(items).query_aabb(&bbox)
        }
        None => board.elements().map(|(element, _kind)| element).collect(),
    };

    for element in candidates {
        if out.len() >= query.limit {
            break;
        }
        if let Some(kind) = query.kind
            && board.kind(element) != Some(kind)
        {
            continue;
        }
        if query.visible_only && !board.is_visible(element) {
            continue;
        }
        out.insert(element);
    }

    out
}
