use foundation::bounds::Aabb2;
use foundation::math::Vec2;

pub struct SpatialAnalysis;

impl SpatialAnalysis {
    pub fn aabb2_points(points: &[Vec2]) -> Option<Aabb2> {
        let first = points.first()?;
        let mut min = [first.x, first.y];
        let mut max = [first.x, first.y];
        for p in points.iter().skip(1) {
            min[0] = min[0].min(p.x);
            min[1] = min[1].min(p.y);
            max[0] = max[0].max(p.x);
            max[1] = max[1].max(p.y);
        }
        Some(Aabb2::new(min, max))
    }

    /// Returns (index, squared distance).
    pub fn nearest_point(points: &[Vec2], target: Vec2) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            let d2 = (*p - target).length_squared();
            if best.map(|(_, bd2)| d2 < bd2).unwrap_or(true) {
                best = Some((i, d2));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::SpatialAnalysis;
    use foundation::math::Vec2;

    #[test]
    fn aabb_covers_all_points() {
        let pts = vec![Vec2::new(0.0, 1.0), Vec2::new(-2.0, 3.0), Vec2::new(4.0, 0.0)];
        let b = SpatialAnalysis::aabb2_points(&pts).unwrap();
        assert_eq!(b.min, [-2.0, 0.0]);
        assert_eq!(b.max, [4.0, 3.0]);
    }

    #[test]
    fn nearest_point_picks_closest() {
        let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let (i, d2) = SpatialAnalysis::nearest_point(&pts, Vec2::new(9.0, 0.0)).unwrap();
        assert_eq!(i, 1);
        assert!(d2 < 2.0);
    }
}
