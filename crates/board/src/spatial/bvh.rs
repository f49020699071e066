use foundation::bounds::Aabb2;
use foundation::math::precision::stable_total_cmp_f64;

use crate::element::ElementId;

/// A deterministic bounding volume hierarchy (BVH) over `Aabb2` items.
///
/// Ordering contract:
/// - `query_aabb` returns elements in ascending `ElementId::index()` order.
///
/// Correctness + determinism first; performance later.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        bounds: Aabb2,
        items: Vec<Item>,
    },
    Internal {
        bounds: Aabb2,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Item {
    pub element: ElementId,
    pub bounds: Aabb2,
}

impl Bvh {
    pub fn build(items: Vec<Item>) -> Self {
        let mut nodes = Vec::new();
        let mut items = items;
        if !items.is_empty() {
            let _root = build_node(&mut nodes, &mut items);
        }
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Query the BVH for items that intersect `query`.
    ///
    /// Returns elements in ascending `ElementId::index()` order.
    pub fn query_aabb(&self, query: &Aabb2) -> Vec<ElementId> {
        if self.nodes.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ElementId> = Vec::new();
        let mut stack: Vec<usize> = vec![0];

        while let Some(idx) = stack.pop() {
            match &self.nodes[idx] {
                Node::Leaf { bounds, items } => {
                    if !bounds.intersects(query) {
                        continue;
                    }
                    for item in items {
                        if item.bounds.intersects(query) {
                            hits.push(item.element);
                        }
                    }
                }
                Node::Internal {
                    bounds,
                    left,
                    right,
                } => {
                    if !bounds.intersects(query) {
                        continue;
                    }
                    // Stack order doesn't matter because we sort output, but keep it stable.
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        hits.sort_by_key(|e| e.index());
        hits.dedup();
        hits
    }
}

const LEAF_MAX: usize = 8;

fn build_node(nodes: &mut Vec<Node>, items: &mut [Item]) -> usize {
    if items.len() <= LEAF_MAX {
        let bounds = bounds_for_items(items);
        let leaf_items = items.to_vec();
        let idx = nodes.len();
        nodes.push(Node::Leaf {
            bounds,
            items: leaf_items,
        });
        return idx;
    }

    let bounds = bounds_for_items(items);
    let axis = split_axis(&bounds);

    items.sort_by(|a, b| {
        let ca = centroid_axis(&a.bounds, axis);
        let cb = centroid_axis(&b.bounds, axis);
        stable_total_cmp_f64(ca, cb).then_with(|| a.element.index().cmp(&b.element.index()))
    });

    let mid = items.len() / 2;
    let (left_items, right_items) = items.split_at_mut(mid);

    let idx = nodes.len();
    // Placeholder; will patch after children are built.
    nodes.push(Node::Leaf {
        bounds,
        items: Vec::new(),
    });

    let left = build_node(nodes, left_items);
    let right = build_node(nodes, right_items);

    nodes[idx] = Node::Internal {
        bounds,
        left,
        right,
    };
    idx
}

fn centroid_axis(aabb: &Aabb2, axis: usize) -> f64 {
    (aabb.min[axis] + aabb.max[axis]) * 0.5
}

fn split_axis(bounds: &Aabb2) -> usize {
    let ex = bounds.max[0] - bounds.min[0];
    let ey = bounds.max[1] - bounds.min[1];

    // Deterministic tie-break: prefer X.
    if ex >= ey { 0 } else { 1 }
}

fn bounds_for_items(items: &[Item]) -> Aabb2 {
    let mut b = items[0].bounds;
    for item in &items[1..] {
        b = b.union(&item.bounds);
    }
    b
}

#[cfg(test)]
mod tests {
    use super::{Bvh, Item};
    use crate::element::ElementId;
    use foundation::bounds::Aabb2;
    use foundation::handles::Handle;

    fn e(idx: u32) -> ElementId {
        ElementId(Handle::new(idx, 0))
    }

    #[test]
    fn query_returns_elements_in_index_order() {
        let items = vec![
            Item {
                element: e(2),
                bounds: Aabb2::new([10.0, 0.0], [11.0, 1.0]),
            },
            Item {
                element: e(1),
                bounds: Aabb2::new([0.0, 0.0], [1.0, 1.0]),
            },
            Item {
                element: e(3),
                bounds: Aabb2::new([0.5, 0.5], [2.0, 2.0]),
            },
        ];
        let bvh = Bvh::build(items);

        let hits = bvh.query_aabb(&Aabb2::new([0.25, 0.25], [1.5, 1.5]));
        assert_eq!(hits, vec![e(1), e(3)]);
    }

    #[test]
    fn build_is_input_order_independent_for_results() {
        let a = vec![
            Item {
                element: e(1),
                bounds: Aabb2::new([0.0, 0.0], [1.0, 1.0]),
            },
            Item {
                element: e(2),
                bounds: Aabb2::new([2.0, 0.0], [3.0, 1.0]),
            },
            Item {
                element: e(3),
                bounds: Aabb2::new([4.0, 0.0], [5.0, 1.0]),
            },
        ];
        let mut b = a.clone();
        b.reverse();

        let q = Aabb2::new([1.5, 0.0], [4.5, 1.0]);
        let ha = Bvh::build(a).query_aabb(&q);
        let hb = Bvh::build(b).query_aabb(&q);
        assert_eq!(ha, hb);
        assert_eq!(ha, vec![e(2), e(3)]);
    }

    #[test]
    fn split_path_handles_many_items() {
        // Force internal nodes (> LEAF_MAX items along X).
        let items: Vec<Item> = (0..32)
            .map(|i| Item {
                element: e(i),
                bounds: Aabb2::new([f64::from(i), 0.0], [f64::from(i) + 0.5, 1.0]),
            })
            .collect();
        let bvh = Bvh::build(items);

        let hits = bvh.query_aabb(&Aabb2::new([10.25, 0.0], [12.25, 1.0]));
        assert_eq!(hits, vec![e(10), e(11), e(12)]);
    }
}
