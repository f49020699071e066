use foundation::math::Vec2;

use crate::Board;
use crate::element::ElementId;
use crate::elements::Ticks;
use crate::elements::ticks::DEGENERATE_HOST_EPS;

/// Sentinel snap width: disables snapping.
pub const SNAP_DISABLED: f64 = -1.0;

/// Value range of a slider: `[min, max]` with the initial value `start`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub start: f64,
    pub max: f64,
}

impl SliderRange {
    pub fn new(min: f64, start: f64, max: f64) -> Self {
        Self { min, start, max }
    }
}

#[derive(Debug, Clone)]
pub struct SliderOptions {
    /// Display name, shown in the label as `name = value`.
    pub name: Option<String>,
    pub with_ticks: bool,
    /// Number of tick intervals along the baseline.
    pub tick_count: u32,
    pub with_label: bool,
    /// Snap grid width; `SNAP_DISABLED` (or any non-positive width) turns
    /// snapping off.
    pub snap_width: f64,
    /// Display digits for tick labels and the value label.
    pub precision: usize,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            name: None,
            with_ticks: true,
            tick_count: 4,
            with_label: true,
            snap_width: SNAP_DISABLED,
            precision: 2,
        }
    }
}

/// Composite slider control.
///
/// Owns (through the board's ownership records on the glider) two anchor
/// points, their drag group, the baseline, the progress indicator, and the
/// optional ticks and label. The scalar value is derived from the glider's
/// normalized offset along the baseline.
#[derive(Debug, Clone)]
pub struct Slider {
    pub glider: ElementId,
    pub anchor_lo: ElementId,
    pub anchor_hi: ElementId,
    pub group: ElementId,
    pub baseline: ElementId,
    pub indicator: ElementId,
    pub ticks: Option<ElementId>,
    pub label: Option<ElementId>,
    min: f64,
    max: f64,
    snap_width: f64,
    precision: usize,
    name: Option<String>,
}

/// Wires a slider onto the board.
///
/// Construction order: anchors, group, baseline, ticks (optional), glider,
/// indicator, label (optional). Every sub-element is registered as owned by
/// the glider in teardown order (label, ticks, indicator, baseline, group,
/// anchors), so removing the glider releases the whole composite.
pub fn spawn_slider(
    board: &mut Board,
    from: Vec2,
    to: Vec2,
    range: SliderRange,
    options: SliderOptions,
) -> Slider {
    let anchor_lo = board.add_point(from);
    let anchor_hi = board.add_point(to);
    let group = board.add_group(&[anchor_lo, anchor_hi]);
    let baseline = board.add_segment(anchor_lo, anchor_hi);

    let ticks = options.with_ticks.then(|| {
        board.add_ticks(Ticks::new(
            baseline,
            options.tick_count,
            true,
            (range.min, range.max),
            options.precision,
        ))
    });

    let glider = board.add_glider(baseline, start_offset(range));
    let indicator = board.add_segment(anchor_lo, glider);

    let mut slider = Slider {
        glider,
        anchor_lo,
        anchor_hi,
        group,
        baseline,
        indicator,
        ticks,
        label: None,
        min: range.min,
        max: range.max,
        snap_width: options.snap_width,
        precision: options.precision,
        name: options.name,
    };

    if options.with_label {
        // The label sits just past the high anchor, off the baseline.
        let position = to.lerp(from, -0.1);
        let content = slider.label_text(board);
        slider.label = Some(board.add_text(position, content));
    }

    // Teardown order: label, ticks, indicator, baseline, group, anchors.
    if let Some(label) = slider.label {
        board.own(glider, label);
    }
    if let Some(ticks) = ticks {
        board.own(glider, ticks);
    }
    board.own(glider, indicator);
    board.own(glider, baseline);
    board.own(glider, group);
    board.own(glider, anchor_hi);
    board.own(glider, anchor_lo);

    slider
}

fn start_offset(range: SliderRange) -> f64 {
    let span = range.max - range.min;
    if span.abs() < DEGENERATE_HOST_EPS {
        return 0.0;
    }
    (range.start - range.min) / span
}

impl Slider {
    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current scalar value, derived from the glider's normalized offset
    /// and snapped to the grid when snapping is enabled.
    pub fn value(&self, board: &Board) -> f64 {
        let t = board.glider(self.glider).map(|g| g.t).unwrap_or(0.0);
        let raw = self.min + t * (self.max - self.min);
        if self.snap_width <= 0.0 {
            return raw;
        }
        let snapped = (raw / self.snap_width).round() * self.snap_width;
        snapped.clamp(self.min, self.max)
    }

    /// Sets the value, clamped to `[min, max]`, by moving the glider.
    pub fn set_value(&self, board: &mut Board, value: f64) {
        let span = self.max - self.min;
        let t = if span.abs() < DEGENERATE_HOST_EPS {
            0.0
        } else {
            (value.clamp(self.min, self.max) - self.min) / span
        };
        board.set_glider_offset(self.glider, t);
    }

    /// Rewrites the label text from the current value.
    ///
    /// No-op for sliders constructed without a label.
    pub fn refresh_label(&self, board: &mut Board) {
        if let Some(label) = self.label {
            let content = self.label_text(board);
            board.set_text_content(label, content);
        }
    }

    fn label_text(&self, board: &Board) -> String {
        let value = self.value(board);
        match &self.name {
            Some(name) => format!("{name} = {value:.prec$}", prec = self.precision),
            None => format!("{value:.prec$}", prec = self.precision),
        }
    }

    /// Tears the composite down: owned sub-elements first, in the fixed
    /// order recorded at construction, then the glider itself.
    pub fn remove(self, board: &mut Board) {
        board.remove(self.glider);
    }
}
