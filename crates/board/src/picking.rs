use foundation::bounds::Aabb2;
use foundation::math::Vec2;
use foundation::math::precision::stable_total_cmp_f64;

use crate::Board;
use crate::element::{ElementId, ElementKind};
use crate::spatial::{Bvh, Item as BvhItem};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub element: ElementId,
    pub kind: ElementKind,
    /// Distance from the query point to the closest point of the element.
    pub distance: f64,
    /// Closest point of the element to the query point.
    pub point: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Board-space pick radius.
    pub radius: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { radius: 0.25 }
    }
}

/// Deterministic picking of the element nearest to a board-space point.
///
/// Ordering contract:
/// - If multiple elements lie at the same distance, the lower
///   `ElementId::index()` wins.
/// - Otherwise, the closest element within `opts.radius` wins.
///
/// Notes:
/// - Points, gliders and texts are measured by point distance; segments by
///   point-to-segment distance.
/// - Hidden elements and elements without bounds (ticks, groups) are
///   ignored.
pub fn pick(board: &Board, at: Vec2, opts: PickOptions) -> Option<PickHit> {
    let mut items: Vec<BvhItem> = Vec::new();
    for (element, _kind) in board.elements() {
        if !board.is_visible(element) {
            continue;
        }
        let Some(bounds) = board.bounds(element) else {
            continue;
        };
        items.push(BvhItem { element, bounds });
    }

    if items.is_empty() {
        return None;
    }

    let bvh = Bvh::build(items);
    let query = Aabb2::at_point([at.x, at.y]).inflate(opts.radius);

    let mut best: Option<PickHit> = None;
    for element in bvh.query_aabb(&query) {
        let Some(kind) = board.kind(element) else {
            continue;
        };
        let Some(closest) = closest_point_on_element(board, element, kind, at) else {
            continue;
        };
        let distance = at.distance(closest);
        if distance > opts.radius {
            continue;
        }

        let candidate = PickHit {
            element,
            kind,
            distance,
            point: closest,
        };
        best = match best {
            None => Some(candidate),
            Some(current) => {
                let ord = stable_total_cmp_f64(candidate.distance, current.distance)
                    .then_with(|| candidate.element.index().cmp(&current.element.index()));
                if ord.is_lt() { Some(candidate) } else { Some(current) }
            }
        };
    }

    best
}

fn closest_point_on_element(
    board: &Board,
    element: ElementId,
    kind: ElementKind,
    at: Vec2,
) -> Option<Vec2> {
    match kind {
        ElementKind::Point | ElementKind::Glider | ElementKind::Text => board.position(element),
        ElementKind::Segment => {
            let (from, to) = board.segment_endpoints(element)?;
            Some(closest_point_on_segment(from, to, at))
        }
        ElementKind::Ticks | ElementKind::Group => None,
    }
}

fn closest_point_on_segment(from: Vec2, to: Vec2, at: Vec2) -> Vec2 {
    let dir = to - from;
    let len2 = dir.length_squared();
    if len2 <= 0.0 {
        return from;
    }
    let t = ((at - from).dot(dir) / len2).clamp(0.0, 1.0);
    from.lerp(to, t)
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, pick};
    use crate::Board;
    use crate::element::ElementKind;
    use crate::elements::Visibility;
    use foundation::math::Vec2;

    #[test]
    fn picks_nearest_point_within_radius() {
        let mut board = Board::new();
        let near = board.add_point(Vec2::new(1.0, 0.0));
        let _far = board.add_point(Vec2::new(5.0, 0.0));

        let hit = pick(
            &board,
            Vec2::new(1.1, 0.0),
            PickOptions { radius: 0.5 },
        )
        .expect("hit");
        assert_eq!(hit.element, near);
        assert_eq!(hit.kind, ElementKind::Point);
        assert!(hit.distance <= 0.11);
    }

    #[test]
    fn misses_outside_radius() {
        let mut board = Board::new();
        board.add_point(Vec2::new(10.0, 10.0));
        assert!(pick(&board, Vec2::new(0.0, 0.0), PickOptions::default()).is_none());
    }

    #[test]
    fn segment_is_measured_by_perpendicular_distance() {
        let mut board = Board::new();
        let a = board.add_point(Vec2::new(0.0, 0.0));
        let b = board.add_point(Vec2::new(10.0, 0.0));
        let seg = board.add_segment(a, b);

        let hit = pick(
            &board,
            Vec2::new(5.0, 0.2),
            PickOptions { radius: 0.25 },
        )
        .expect("hit");
        assert_eq!(hit.element, seg);
        assert_eq!(hit.point, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn equal_distance_tie_breaks_on_lower_index() {
        let mut board = Board::new();
        let first = board.add_point(Vec2::new(1.0, 0.0));
        let _second = board.add_point(Vec2::new(-1.0, 0.0));

        let hit = pick(
            &board,
            Vec2::new(0.0, 0.0),
            PickOptions { radius: 2.0 },
        )
        .expect("hit");
        assert_eq!(hit.element, first);
    }

    #[test]
    fn hidden_elements_are_not_pickable() {
        let mut board = Board::new();
        let p = board.add_point(Vec2::new(0.0, 0.0));
        board.set_visibility(p, Visibility::hidden());
        assert!(pick(&board, Vec2::new(0.0, 0.0), PickOptions::default()).is_none());
    }
}
