use foundation::bounds::Aabb2;
use foundation::handles::Handle;
use foundation::math::Vec2;

use crate::element::{ElementId, ElementKind};
use crate::elements::{
    Glider, Point, Segment, Text, TickMark, Ticks, Visibility, glider::clamp_offset,
};
use crate::events::{Change, ChangeKind, ChangeLog};
use crate::groups::{ElementSet, Group};

/// Column-store board of geometric elements.
///
/// Each element kind lives in its own column; an element occupies one index
/// across all columns. Positions of gliders are derived, not stored:
/// `position` resolves them through the host segment on every call, so
/// there is no propagation machinery to keep in sync.
///
/// Ownership contract:
/// - `own(owner, child)` records `child` for teardown.
/// - `remove(owner)` removes owned children first, in recorded order, then
///   the owner itself.
#[derive(Debug, Default)]
pub struct Board {
    next_index: u32,
    kinds: Vec<Option<ElementKind>>,
    points: Vec<Option<Point>>,
    segments: Vec<Option<Segment>>,
    gliders: Vec<Option<Glider>>,
    ticks: Vec<Option<Ticks>>,
    texts: Vec<Option<Text>>,
    groups: Vec<Option<Group>>,
    visibility: Vec<Option<Visibility>>,
    owned: Vec<Option<Vec<ElementId>>>,
    log: ChangeLog,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self, kind: ElementKind) -> ElementId {
        let id = ElementId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        self.kinds[idx] = Some(kind);
        self.log.record(id, ChangeKind::Added(kind));
        id
    }

    pub fn add_point(&mut self, position: Vec2) -> ElementId {
        let id = self.spawn(ElementKind::Point);
        self.points[id.index() as usize] = Some(Point::new(position));
        id
    }

    pub fn add_segment(&mut self, from: ElementId, to: ElementId) -> ElementId {
        let id = self.spawn(ElementKind::Segment);
        self.segments[id.index() as usize] = Some(Segment::new(from, to));
        id
    }

    pub fn add_glider(&mut self, host: ElementId, t: f64) -> ElementId {
        let id = self.spawn(ElementKind::Glider);
        self.gliders[id.index() as usize] = Some(Glider::new(host, t));
        id
    }

    pub fn add_ticks(&mut self, ticks: Ticks) -> ElementId {
        let id = self.spawn(ElementKind::Ticks);
        self.ticks[id.index() as usize] = Some(ticks);
        id
    }

    pub fn add_text(&mut self, position: Vec2, content: impl Into<String>) -> ElementId {
        let id = self.spawn(ElementKind::Text);
        self.texts[id.index() as usize] = Some(Text::new(position, content));
        id
    }

    pub fn add_group(&mut self, members: &[ElementId]) -> ElementId {
        let id = self.spawn(ElementKind::Group);
        let set: ElementSet = members.iter().copied().collect();
        self.groups[id.index() as usize] = Some(Group::new(set));
        id
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.kinds.get(id.index() as usize).and_then(|k| *k)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.kind(id).is_some()
    }

    /// Live elements in ascending index order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, ElementKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter_map(|(idx, kind)| kind.map(|k| (ElementId(Handle::new(idx as u32, 0)), k)))
    }

    pub fn point(&self, id: ElementId) -> Option<&Point> {
        self.points.get(id.index() as usize)?.as_ref()
    }

    pub fn segment(&self, id: ElementId) -> Option<&Segment> {
        self.segments.get(id.index() as usize)?.as_ref()
    }

    pub fn glider(&self, id: ElementId) -> Option<&Glider> {
        self.gliders.get(id.index() as usize)?.as_ref()
    }

    pub fn ticks(&self, id: ElementId) -> Option<&Ticks> {
        self.ticks.get(id.index() as usize)?.as_ref()
    }

    pub fn text(&self, id: ElementId) -> Option<&Text> {
        self.texts.get(id.index() as usize)?.as_ref()
    }

    pub fn group(&self, id: ElementId) -> Option<&Group> {
        self.groups.get(id.index() as usize)?.as_ref()
    }

    pub fn set_point_position(&mut self, id: ElementId, position: Vec2) -> bool {
        let idx = id.index() as usize;
        let Some(Some(point)) = self.points.get_mut(idx) else {
            return false;
        };
        point.position = position;
        self.log.record(id, ChangeKind::Moved);
        true
    }

    pub fn set_glider_offset(&mut self, id: ElementId, t: f64) -> bool {
        let idx = id.index() as usize;
        let Some(Some(glider)) = self.gliders.get_mut(idx) else {
            return false;
        };
        glider.t = clamp_offset(t);
        self.log.record(id, ChangeKind::Moved);
        true
    }

    pub fn set_text_content(&mut self, id: ElementId, content: impl Into<String>) -> bool {
        let idx = id.index() as usize;
        let Some(Some(text)) = self.texts.get_mut(idx) else {
            return false;
        };
        text.content = content.into();
        true
    }

    pub fn set_visibility(&mut self, id: ElementId, visibility: Visibility) {
        if !self.contains(id) {
            return;
        }
        self.visibility[id.index() as usize] = Some(visibility);
    }

    /// Elements are visible unless explicitly hidden.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.visibility
            .get(id.index() as usize)
            .and_then(|v| *v)
            .map(|v| v.visible)
            .unwrap_or(true)
    }

    /// Resolved board-space position of a point-like element.
    ///
    /// Points and texts return their stored position; gliders interpolate
    /// along their host segment at the current offset. Segments, ticks and
    /// groups have no single position.
    pub fn position(&self, id: ElementId) -> Option<Vec2> {
        match self.kind(id)? {
            ElementKind::Point => Some(self.point(id)?.position),
            ElementKind::Text => Some(self.text(id)?.position),
            ElementKind::Glider => {
                let glider = self.glider(id)?;
                let (from, to) = self.segment_endpoints(glider.host)?;
                Some(from.lerp(to, glider.t))
            }
            ElementKind::Segment | ElementKind::Ticks | ElementKind::Group => None,
        }
    }

    /// Resolved endpoint positions of a segment.
    pub fn segment_endpoints(&self, id: ElementId) -> Option<(Vec2, Vec2)> {
        let segment = self.segment(id)?;
        let from = self.position(segment.from)?;
        let to = self.position(segment.to)?;
        Some((from, to))
    }

    /// Tick mark geometry for a ticks element, resolved against its host.
    ///
    /// Empty when the host is missing or degenerate.
    pub fn tick_marks(&self, id: ElementId) -> Vec<TickMark> {
        let Some(ticks) = self.ticks(id) else {
            return Vec::new();
        };
        let Some((from, to)) = self.segment_endpoints(ticks.host) else {
            return Vec::new();
        };
        ticks.marks(from, to)
    }

    /// Bounding box of an element, where one is defined.
    pub fn bounds(&self, id: ElementId) -> Option<Aabb2> {
        match self.kind(id)? {
            ElementKind::Point | ElementKind::Glider | ElementKind::Text => {
                let p = self.position(id)?;
                Some(Aabb2::at_point([p.x, p.y]))
            }
            ElementKind::Segment => {
                let (from, to) = self.segment_endpoints(id)?;
                Aabb2::from_points(&[[from.x, from.y], [to.x, to.y]])
            }
            ElementKind::Ticks | ElementKind::Group => None,
        }
    }

    /// Records `child` as owned by `owner` for cascading teardown.
    ///
    /// Children are removed in the order they were recorded.
    pub fn own(&mut self, owner: ElementId, child: ElementId) {
        let idx = owner.index() as usize;
        if !self.contains(owner) {
            return;
        }
        self.owned[idx].get_or_insert_with(Vec::new).push(child);
    }

    /// Removes an element and everything it owns.
    ///
    /// Owned children are removed first, in recorded order; the element
    /// itself goes last. Returns `true` if the element existed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let idx = id.index() as usize;
        let Some(kind) = self.kind(id) else {
            return false;
        };

        if let Some(children) = self.owned.get_mut(idx).and_then(Option::take) {
            for child in children {
                self.remove(child);
            }
        }

        self.kinds[idx] = None;
        self.points[idx] = None;
        self.segments[idx] = None;
        self.gliders[idx] = None;
        self.ticks[idx] = None;
        self.texts[idx] = None;
        self.groups[idx] = None;
        self.visibility[idx] = None;
        self.log.record(id, ChangeKind::Removed(kind));
        true
    }

    /// Moves every point member of a group by `delta`.
    ///
    /// Non-point members (segments between them, gliders) follow through
    /// derived positions. Returns the number of points moved.
    pub fn translate_group(&mut self, group: ElementId, delta: Vec2) -> usize {
        let Some(group) = self.group(group) else {
            return 0;
        };
        let member_indices: Vec<u32> = group.members.iter_indices().collect();

        let mut moved = 0;
        for idx in member_indices {
            let member = ElementId(Handle::new(idx, 0));
            let Some(point) = self.point(member) else {
                continue;
            };
            let next = point.position + delta;
            if self.set_point_position(member, next) {
                moved += 1;
            }
        }
        moved
    }

    pub fn revision(&self) -> u64 {
        self.log.revision()
    }

    pub fn changes(&self) -> &[Change] {
        self.log.changes()
    }

    pub fn drain_changes(&mut self) -> Vec<Change> {
        self.log.drain()
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.kinds.len() <= idx {
            let new_len = idx + 1;
            self.kinds.resize(new_len, None);
            self.points.resize(new_len, None);
            self.segments.resize(new_len, None);
            self.gliders.resize(new_len, None);
            self.ticks.resize(new_len, None);
            self.texts.resize(new_len, None);
            self.groups.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.owned.resize(new_len, None);
        }
    }
}
