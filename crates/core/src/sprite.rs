//! Sprite module - a positioned, rotatable stack of animation frames
//!
//! Each sprite owns two frame cycles: upright frames ("H", shown at 0/90/180/270
//! degrees) and diagonal frames ("D", shown at 45/135/225/315 degrees). Frames
//! are always added and removed in matched pairs and advanced in lock-step, so
//! both cycles hold the same frame ids in the same order.

use crate::bitmap::Bitmap;
use crate::compose::{line_number, read_byte_piece, start_position};
use crate::ring::Ring;
use crate::types::{FrameStyle, Heading, Id, MAX_SPRITE_SIDE};

/// A sprite: position, heading and two synchronized frame cycles
#[derive(Debug, Clone)]
pub struct Sprite {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) heading: Heading,
    /// Side length of every frame, fixed at creation
    size: u16,
    upright: Ring<Bitmap>,
    diagonal: Ring<Bitmap>,
}

impl Sprite {
    /// New sprite at (0, 0), heading 0, no frames
    /// Side lengths are clamped to `1..=MAX_SPRITE_SIDE`
    pub fn new(side_length: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            heading: Heading::R0,
            size: side_length.clamp(1, MAX_SPRITE_SIDE as i32) as u16,
            upright: Ring::new(),
            diagonal: Ring::new(),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Side length in pixels
    pub fn size(&self) -> u16 {
        self.size
    }

    /// The frame cycle for one style
    pub fn frames(&self, style: FrameStyle) -> &Ring<Bitmap> {
        match style {
            FrameStyle::Upright => &self.upright,
            FrameStyle::Diagonal => &self.diagonal,
        }
    }

    fn frames_mut(&mut self, style: FrameStyle) -> &mut Ring<Bitmap> {
        match style {
            FrameStyle::Upright => &mut self.upright,
            FrameStyle::Diagonal => &mut self.diagonal,
        }
    }

    /// Frame `frame_id` of one style
    pub fn frame(&self, style: FrameStyle, frame_id: Id) -> Option<&Bitmap> {
        self.frames(style).get(frame_id)
    }

    pub fn frame_mut(&mut self, style: FrameStyle, frame_id: Id) -> Option<&mut Bitmap> {
        self.frames_mut(style).get_mut(frame_id)
    }

    /// Frame currently shown for one style
    pub fn current_frame(&self, style: FrameStyle) -> Option<&Bitmap> {
        self.frames(style).current()
    }

    /// Id of the frame currently shown
    pub fn current_frame_id(&self) -> Option<Id> {
        self.upright.current_id()
    }

    /// Append a blank upright/diagonal frame pair under `frame_id`
    ///
    /// Returns false, changing nothing, if either cycle already has the id.
    pub fn add_frame(&mut self, frame_id: Id) -> bool {
        if self.upright.contains(frame_id) || self.diagonal.contains(frame_id) {
            return false;
        }
        let side = self.size as i32;
        if !self.upright.add_with_id(frame_id, Bitmap::new(side)) {
            return false;
        }
        if !self.diagonal.add_with_id(frame_id, Bitmap::new(side)) {
            log::warn!("diagonal frame {:#04x} rejected, rolling back upright frame", frame_id);
            self.upright.remove(frame_id);
            return false;
        }
        true
    }

    /// Remove the frame pair `frame_id` from both cycles
    ///
    /// Returns false, changing nothing, unless both cycles hold the id.
    pub fn remove_frame(&mut self, frame_id: Id) -> bool {
        if !(self.upright.contains(frame_id) && self.diagonal.contains(frame_id)) {
            return false;
        }
        self.upright.remove(frame_id) && self.diagonal.remove(frame_id)
    }

    /// Advance both frame cycles by one frame
    pub fn next_frame(&mut self) {
        self.upright.rotate();
        self.diagonal.rotate();
    }

    /// Number of frame pairs, or None if the two cycles disagree
    pub fn frame_count(&self) -> Option<usize> {
        let upright = self.upright.size();
        (upright == self.diagonal.size()).then_some(upright)
    }

    /// Whether the sprite's bounding box overlaps the given pixel rectangle
    pub fn overlaps(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        let (sx, sy, size) = (self.x as i64, self.y as i64, self.size as i64);
        let (x, y) = (x as i64, y as i64);
        sx < x + width as i64 && x < sx + size && sy < y + height as i64 && y < sy + size
    }

    /// Glyph row bits this sprite contributes to the cell row starting at
    /// screen pixel (`target_x`, `target_y`), `width` pixels wide
    ///
    /// Missing frames and off-sprite lines contribute 0. `scratch` holds the
    /// frame line between calls so repeated reads do not allocate.
    pub fn read_cell_row(&self, target_x: i32, target_y: i32, width: u8, scratch: &mut Vec<u8>) -> u8 {
        let plan = self.heading.read_plan();
        let Some(frame) = self.current_frame(plan.style) else {
            return 0;
        };

        let size = self.size as i32;
        let line = line_number(plan, self.y, target_y, size);
        let line_bytes = frame
            .read_line_into(plan.axis, line, scratch)
            .then_some(scratch.as_slice());

        let start = start_position(plan.direction, self.x, target_x, size);
        read_byte_piece(plan.direction, start, line_bytes, size, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sprite_defaults() {
        let sprite = Sprite::new(6);
        assert_eq!((sprite.x(), sprite.y()), (0, 0));
        assert_eq!(sprite.heading(), Heading::R0);
        assert_eq!(sprite.size(), 6);
        assert_eq!(sprite.frame_count(), Some(0));
        assert!(sprite.current_frame(FrameStyle::Upright).is_none());
        assert_eq!(Sprite::new(0).size(), 1);
    }

    #[test]
    fn test_frames_added_in_pairs() {
        let mut sprite = Sprite::new(4);
        assert!(sprite.add_frame(b'a'));
        assert!(sprite.add_frame(b'b'));
        assert!(!sprite.add_frame(b'a'));
        assert_eq!(sprite.frame_count(), Some(2));
        assert_eq!(sprite.frame(FrameStyle::Diagonal, b'b').map(|f| f.size()), Some(4));
    }

    #[test]
    fn test_next_frame_lock_step() {
        let mut sprite = Sprite::new(3);
        sprite.add_frame(1);
        sprite.add_frame(2);
        assert_eq!(sprite.current_frame_id(), Some(1));

        sprite.next_frame();
        assert_eq!(sprite.frames(FrameStyle::Upright).current_id(), Some(2));
        assert_eq!(sprite.frames(FrameStyle::Diagonal).current_id(), Some(2));

        sprite.next_frame();
        assert_eq!(sprite.current_frame_id(), Some(1));
    }

    #[test]
    fn test_remove_frame_pair() {
        let mut sprite = Sprite::new(3);
        sprite.add_frame(1);
        sprite.add_frame(2);
        assert!(sprite.remove_frame(1));
        assert!(!sprite.remove_frame(1));
        assert_eq!(sprite.frame_count(), Some(1));
        assert_eq!(sprite.current_frame_id(), Some(2));
    }

    #[test]
    fn test_frame_count_detects_desync() {
        let mut sprite = Sprite::new(3);
        sprite.add_frame(1);
        sprite.diagonal.remove(1);
        assert_eq!(sprite.frame_count(), None);
    }

    #[test]
    fn test_overlaps() {
        let mut sprite = Sprite::new(4);
        sprite.x = 3;
        sprite.y = -2;
        assert!(sprite.overlaps(0, 0, 5, 8));
        assert!(!sprite.overlaps(7, 0, 5, 8));
        assert!(!sprite.overlaps(0, 2, 5, 8));
        assert!(!sprite.overlaps(i32::MAX - 2, i32::MIN, 5, 8));
    }

    #[test]
    fn test_read_cell_row_upright() {
        let mut sprite = Sprite::new(5);
        sprite.add_frame(1);
        let frame = sprite.frame_mut(FrameStyle::Upright, 1).unwrap();
        frame.draw_pixel(0, 0);
        frame.draw_pixel(2, 0);

        let mut scratch = Vec::new();
        assert_eq!(sprite.read_cell_row(0, 0, 5, &mut scratch), 0b1_0100);
        assert_eq!(sprite.read_cell_row(0, 1, 5, &mut scratch), 0);
        assert_eq!(sprite.read_cell_row(0, 9, 5, &mut scratch), 0);
    }

    #[test]
    fn test_read_cell_row_without_frames() {
        let sprite = Sprite::new(5);
        let mut scratch = Vec::new();
        assert_eq!(sprite.read_cell_row(0, 0, 5, &mut scratch), 0);
    }
}
