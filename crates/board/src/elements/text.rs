use foundation::math::Vec2;

/// Text anchored at a board-space position.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Vec2,
    pub content: String,
}

impl Text {
    pub fn new(position: Vec2, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }
}
