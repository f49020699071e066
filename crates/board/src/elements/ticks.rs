use foundation::math::Vec2;

use crate::element::ElementId;

/// Hosts shorter than this produce no tick geometry; the interpolation
/// denominator would be degenerate.
pub const DEGENERATE_HOST_EPS: f64 = 1e-12;

/// Tick marks along a host segment.
///
/// `count` is the number of intervals; a non-degenerate host yields
/// `count + 1` marks. Label values are interpolated linearly over
/// `label_range` and formatted with `precision` digits.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub host: ElementId,
    pub count: u32,
    pub draw_labels: bool,
    pub label_range: (f64, f64),
    pub precision: usize,
}

impl Ticks {
    pub fn new(
        host: ElementId,
        count: u32,
        draw_labels: bool,
        label_range: (f64, f64),
        precision: usize,
    ) -> Self {
        Self {
            host,
            count,
            draw_labels,
            label_range,
            precision,
        }
    }

    /// Computes mark geometry for the resolved host endpoints.
    ///
    /// Returns an empty vec for `count == 0` or a degenerate host
    /// (coincident endpoints).
    pub fn marks(&self, from: Vec2, to: Vec2) -> Vec<TickMark> {
        if self.count == 0 || from.distance(to) < DEGENERATE_HOST_EPS {
            return Vec::new();
        }

        let (min, max) = self.label_range;
        let mut out = Vec::with_capacity(self.count as usize + 1);
        for i in 0..=self.count {
            let frac = f64::from(i) / f64::from(self.count);
            let value = min + (max - min) * frac;
            let label = self
                .draw_labels
                .then(|| format!("{value:.prec$}", prec = self.precision));
            out.push(TickMark {
                position: from.lerp(to, frac),
                value,
                label,
            });
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub position: Vec2,
    pub value: f64,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Ticks;
    use crate::element::ElementId;
    use foundation::handles::Handle;
    use foundation::math::Vec2;

    fn host() -> ElementId {
        ElementId(Handle::new(0, 0))
    }

    #[test]
    fn marks_interpolate_positions_and_values() {
        let ticks = Ticks::new(host(), 2, true, (-5.0, 5.0), 1);
        let marks = ticks.marks(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].value, -5.0);
        assert_eq!(marks[1].value, 0.0);
        assert_eq!(marks[2].value, 5.0);
        assert_eq!(marks[1].position, Vec2::new(2.0, 0.0));
        assert_eq!(marks[2].label.as_deref(), Some("5.0"));
    }

    #[test]
    fn degenerate_host_yields_no_marks() {
        let ticks = Ticks::new(host(), 4, true, (0.0, 1.0), 2);
        let p = Vec2::new(3.0, 3.0);
        assert!(ticks.marks(p, p).is_empty());
    }

    #[test]
    fn labels_are_omitted_when_disabled() {
        let ticks = Ticks::new(host(), 1, false, (0.0, 1.0), 2);
        let marks = ticks.marks(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(marks.iter().all(|m| m.label.is_none()));
    }
}
