use crate::sprite::Sprite;
use crate::types::{Heading, Id};

/// Plain-data copy of one sprite's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteSnapshot {
    pub id: Id,
    pub x: i32,
    pub y: i32,
    pub size: u16,
    pub heading: Heading,
    /// None when the frame cycles are out of sync
    pub frames: Option<usize>,
    pub current_frame: Option<Id>,
}

impl SpriteSnapshot {
    pub fn capture(id: Id, sprite: &Sprite) -> Self {
        Self {
            id,
            x: sprite.x(),
            y: sprite.y(),
            size: sprite.size(),
            heading: sprite.heading(),
            frames: sprite.frame_count(),
            current_frame: sprite.current_frame_id(),
        }
    }

    /// Whether the sprite has at least one frame to show
    pub fn visible(&self) -> bool {
        self.current_frame.is_some()
    }
}
