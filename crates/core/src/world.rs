//! World module - the sprite registry and per-cell glyph compositing
//!
//! A [`SpriteWorld`] owns every sprite and knows the pixel size of one
//! character cell. Hosts edit sprites through it and then ask for the glyph
//! of any cell with [`SpriteWorld::composite_cell`]: the bytes are ready for
//! a custom-character upload, one byte per glyph row, pixels packed into the
//! low `width` bits with the leftmost pixel most significant.
//!
//! Cell (row, col) starts at screen pixel `(col * width, row * height)`.
//! Sprites may sit at negative positions; the first cell's top-left corner is
//! the origin that [`Bounds`] are measured from.

use arrayvec::ArrayVec;

use crate::bitmap::Bitmap;
use crate::error::{Result, WorldError};
use crate::ring::Ring;
use crate::snapshot::SpriteSnapshot;
use crate::sprite::Sprite;
use crate::types::{Bounds, CellGeometry, FrameStyle, Heading, Id, MAX_CELL_HEIGHT};

/// Glyph rows for one character cell (`height` bytes)
pub type Glyph = ArrayVec<u8, MAX_CELL_HEIGHT>;

/// Owns all sprites and composites them into character-cell glyphs
#[derive(Debug, Clone)]
pub struct SpriteWorld {
    geometry: CellGeometry,
    bounds: Bounds,
    sprites: Ring<Sprite>,
}

impl Default for SpriteWorld {
    fn default() -> Self {
        Self::new(CellGeometry::default())
    }
}

impl SpriteWorld {
    /// Create an empty, unbounded world for cells of the given size
    ///
    /// The geometry is re-clamped to `1..=8` x `1..=16`.
    pub fn new(geometry: CellGeometry) -> Self {
        Self {
            geometry: CellGeometry::new(geometry.width as i32, geometry.height as i32),
            bounds: Bounds::UNBOUNDED,
            sprites: Ring::new(),
        }
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Limit sprite movement to the given offsets around the first cell
    pub fn set_bounds(&mut self, bounds: Bounds) {
        log::debug!("bounds set to {:?}", bounds);
        self.bounds = bounds;
    }

    /// Lift all movement limits
    pub fn remove_bounds(&mut self) {
        self.set_bounds(Bounds::UNBOUNDED);
    }

    // ---- queries ----

    pub fn sprite(&self, id: Id) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.sprites.contains(id)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.size()
    }

    pub fn sprite_x(&self, id: Id) -> Option<i32> {
        self.sprite(id).map(Sprite::x)
    }

    pub fn sprite_y(&self, id: Id) -> Option<i32> {
        self.sprite(id).map(Sprite::y)
    }

    /// Heading of a sprite in degrees
    pub fn sprite_rotation(&self, id: Id) -> Option<i32> {
        self.sprite(id).map(|s| s.heading().degrees())
    }

    /// Side length of a sprite
    pub fn size(&self, id: Id) -> Option<u16> {
        self.sprite(id).map(Sprite::size)
    }

    /// Number of frame pairs a sprite holds
    pub fn frames(&self, id: Id) -> Result<usize> {
        let sprite = self.sprite(id).ok_or(WorldError::SpriteNotFound(id))?;
        sprite.frame_count().ok_or_else(|| {
            let upright = sprite.frames(FrameStyle::Upright).size();
            let diagonal = sprite.frames(FrameStyle::Diagonal).size();
            log::warn!(
                "sprite {:#04x} frame cycles out of sync ({} vs {})",
                id,
                upright,
                diagonal
            );
            WorldError::FramesDesynchronized {
                id,
                upright,
                diagonal,
            }
        })
    }

    /// State of every sprite, in registry order
    pub fn snapshot(&self) -> Vec<SpriteSnapshot> {
        self.sprites
            .iter()
            .map(|(id, sprite)| SpriteSnapshot::capture(id, sprite))
            .collect()
    }

    // ---- bounds checks ----

    /// Whether the sprite touches any bound
    pub fn at_bounds(&self, id: Id) -> bool {
        self.at_top_bound(id)
            || self.at_right_bound(id)
            || self.at_bottom_bound(id)
            || self.at_left_bound(id)
    }

    pub fn at_top_bound(&self, id: Id) -> bool {
        let edge = -(self.bounds.top as i64);
        self.sprite(id).is_some_and(|s| s.y as i64 == edge)
    }

    pub fn at_right_bound(&self, id: Id) -> bool {
        let edge = self.bounds.right as i64 + self.geometry.width as i64;
        self.sprite(id)
            .is_some_and(|s| s.x as i64 + s.size() as i64 == edge)
    }

    pub fn at_bottom_bound(&self, id: Id) -> bool {
        let edge = self.bounds.bottom as i64 + self.geometry.height as i64;
        self.sprite(id)
            .is_some_and(|s| s.y as i64 + s.size() as i64 == edge)
    }

    pub fn at_left_bound(&self, id: Id) -> bool {
        let edge = -(self.bounds.left as i64);
        self.sprite(id).is_some_and(|s| s.x as i64 == edge)
    }

    // ---- sprite lifecycle and transforms ----

    /// Create a sprite at (0, 0), heading 0, with no frames
    /// Returns false if the id is taken
    pub fn create_sprite(&mut self, id: Id, side_length: i32) -> bool {
        if self.sprites.contains(id) {
            return false;
        }
        let created = self.sprites.add_with_id(id, Sprite::new(side_length));
        if created {
            log::debug!("sprite {:#04x} created (side {})", id, side_length.max(1));
        }
        created
    }

    /// Remove a sprite and all its frames
    pub fn remove_sprite(&mut self, id: Id) -> bool {
        let removed = self.sprites.remove(id);
        if removed {
            log::debug!("sprite {:#04x} removed", id);
        }
        removed
    }

    /// Move a sprite by (dx, dy), stopping at the bounds
    ///
    /// Along each axis the movement is limited to the room left before the
    /// near (left/top) bound first, then the far (right/bottom) bound. When
    /// the bounds are narrower than the sprite the near bound wins.
    pub fn shift_sprite(&mut self, id: Id, dx: i32, dy: i32) {
        let bounds = self.bounds;
        let geometry = self.geometry;
        let Some(sprite) = self.sprites.get_mut(id) else {
            return;
        };

        // Room is measured in i64 so bounds anywhere in the i32 range stay exact
        let size = sprite.size() as i64;
        let (x, y) = (sprite.x as i64, sprite.y as i64);
        let room_left = -(bounds.left as i64) - x;
        let room_top = -(bounds.top as i64) - y;
        let room_right = (geometry.width as i64 + bounds.right as i64) - (x + size);
        let room_bottom = (geometry.height as i64 + bounds.bottom as i64) - (y + size);

        let applied_x = clamp_shift(dx as i64, room_left, room_right);
        let applied_y = clamp_shift(dy as i64, room_top, room_bottom);
        if (applied_x, applied_y) != (dx as i64, dy as i64) {
            log::trace!(
                "sprite {:#04x} shift ({}, {}) clamped to ({}, {})",
                id,
                dx,
                dy,
                applied_x,
                applied_y
            );
        }

        sprite.x = clamp_position(x + applied_x, size);
        sprite.y = clamp_position(y + applied_y, size);
    }

    /// Turn a sprite by a multiple of 45 degrees; anything else is ignored
    pub fn rotate_sprite(&mut self, id: Id, degrees: i32) {
        if degrees % 45 != 0 {
            return;
        }
        if let Some(sprite) = self.sprites.get_mut(id) {
            if let Some(heading) = sprite.heading.rotated(degrees) {
                sprite.heading = heading;
            }
        }
    }

    /// Set a sprite's heading directly
    pub fn set_heading(&mut self, id: Id, heading: Heading) -> bool {
        match self.sprites.get_mut(id) {
            Some(sprite) => {
                sprite.heading = heading;
                true
            }
            None => false,
        }
    }

    // ---- frames ----

    /// Append a blank upright/diagonal frame pair to a sprite
    pub fn add_frame(&mut self, id: Id, frame_id: Id) -> bool {
        let added = self
            .sprites
            .get_mut(id)
            .is_some_and(|s| s.add_frame(frame_id));
        if added {
            log::debug!("sprite {:#04x} frame {:#04x} added", id, frame_id);
        }
        added
    }

    /// Remove a frame pair from a sprite
    pub fn remove_frame(&mut self, id: Id, frame_id: Id) -> bool {
        let removed = self
            .sprites
            .get_mut(id)
            .is_some_and(|s| s.remove_frame(frame_id));
        if removed {
            log::debug!("sprite {:#04x} frame {:#04x} removed", id, frame_id);
        }
        removed
    }

    fn edit_frame(
        &mut self,
        id: Id,
        style: FrameStyle,
        frame_id: Id,
        edit: impl FnOnce(&mut Bitmap) -> bool,
    ) -> bool {
        self.sprites
            .get_mut(id)
            .and_then(|s| s.frame_mut(style, frame_id))
            .is_some_and(edit)
    }

    pub fn draw_frame_h(&mut self, id: Id, frame_id: Id, x: i32, y: i32) -> bool {
        self.edit_frame(id, FrameStyle::Upright, frame_id, |f| f.draw_pixel(x, y))
    }

    pub fn draw_frame_d(&mut self, id: Id, frame_id: Id, x: i32, y: i32) -> bool {
        self.edit_frame(id, FrameStyle::Diagonal, frame_id, |f| f.draw_pixel(x, y))
    }

    pub fn erase_frame_h(&mut self, id: Id, frame_id: Id, x: i32, y: i32) -> bool {
        self.edit_frame(id, FrameStyle::Upright, frame_id, |f| f.clear_pixel(x, y))
    }

    pub fn erase_frame_d(&mut self, id: Id, frame_id: Id, x: i32, y: i32) -> bool {
        self.edit_frame(id, FrameStyle::Diagonal, frame_id, |f| f.clear_pixel(x, y))
    }

    /// Blank a whole upright frame
    pub fn clear_frame_h(&mut self, id: Id, frame_id: Id) -> bool {
        self.edit_frame(id, FrameStyle::Upright, frame_id, |f| {
            f.clear();
            true
        })
    }

    /// Blank a whole diagonal frame
    pub fn clear_frame_d(&mut self, id: Id, frame_id: Id) -> bool {
        self.edit_frame(id, FrameStyle::Diagonal, frame_id, |f| {
            f.clear();
            true
        })
    }

    /// Advance a sprite's animation by one frame
    /// Returns false only if the sprite does not exist
    pub fn next_frame(&mut self, id: Id) -> bool {
        match self.sprites.get_mut(id) {
            Some(sprite) => {
                sprite.next_frame();
                true
            }
            None => false,
        }
    }

    // ---- compositing ----

    /// Glyph for the character cell at (row, col)
    ///
    /// Every sprite's contribution is OR-ed together. Returns None when the
    /// cell ends up blank, which hosts treat as "no custom glyph needed".
    /// Cells whose pixels lie outside the `i32` plane are always blank.
    pub fn composite_cell(&self, row: i32, col: i32) -> Option<Glyph> {
        let width = self.geometry.width;
        let height = self.geometry.height as usize;
        let cell_x = col.checked_mul(width as i32)?;
        let cell_y = row.checked_mul(height as i32)?;
        cell_x.checked_add(width as i32)?;
        cell_y.checked_add(height as i32)?;

        let mut glyph = Glyph::new();
        glyph.extend(std::iter::repeat(0).take(height));

        let mut scratch = Vec::new();
        for (id, sprite) in self.sprites.iter() {
            if !sprite.overlaps(cell_x, cell_y, width as i32, height as i32) {
                continue;
            }
            log::trace!("cell ({}, {}) reads sprite {:#04x}", row, col, id);
            for (i, byte) in glyph.iter_mut().enumerate() {
                *byte |= sprite.read_cell_row(cell_x, cell_y + i as i32, width, &mut scratch);
            }
        }

        glyph.iter().any(|&b| b != 0).then_some(glyph)
    }

    /// Glyphs for a whole `rows x cols` display, row-major
    pub fn composite_display(&self, rows: u16, cols: u16) -> Vec<Option<Glyph>> {
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                cells.push(self.composite_cell(row, col));
            }
        }
        cells
    }
}

/// Limit a displacement to `[near, far]`, checking the near side first
///
/// With `near > far` (bounds tighter than the sprite) the result is not a
/// true clamp: anything below `near` goes to `near`, anything above `far`
/// goes to `far`.
fn clamp_shift(delta: i64, near: i64, far: i64) -> i64 {
    if near > delta {
        near
    } else if far < delta {
        far
    } else {
        delta
    }
}

/// Keep a sprite edge coordinate inside `i32`, leaving room for its far edge
fn clamp_position(position: i64, size: i64) -> i32 {
    position.clamp(i32::MIN as i64, i32::MAX as i64 - size) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_5x5() -> SpriteWorld {
        SpriteWorld::new(CellGeometry::new(5, 5))
    }

    #[test]
    fn test_clamp_shift() {
        assert_eq!(clamp_shift(3, -5, 5), 3);
        assert_eq!(clamp_shift(-9, -5, 5), -5);
        assert_eq!(clamp_shift(9, -5, 5), 5);
        // Inverted interval
        assert_eq!(clamp_shift(0, 2, -2), 2);
        assert_eq!(clamp_shift(3, 2, -2), -2);
    }

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(7, 4), 7);
        assert_eq!(clamp_position(i64::from(i32::MAX) + 10, 4), i32::MAX - 4);
        assert_eq!(clamp_position(i64::from(i32::MIN) - 10, 4), i32::MIN);
    }

    #[test]
    fn test_create_and_remove() {
        let mut world = world_5x5();
        assert!(world.create_sprite(b'A', 5));
        assert!(!world.create_sprite(b'A', 3));
        assert_eq!(world.size(b'A'), Some(5));
        assert!(world.remove_sprite(b'A'));
        assert!(!world.remove_sprite(b'A'));
        assert!(!world.contains(b'A'));
    }

    #[test]
    fn test_rotation() {
        let mut world = world_5x5();
        world.create_sprite(1, 4);
        world.rotate_sprite(1, 10);
        assert_eq!(world.sprite_rotation(1), Some(0));
        world.rotate_sprite(1, 405);
        assert_eq!(world.sprite_rotation(1), Some(45));
        world.rotate_sprite(1, -90);
        assert_eq!(world.sprite_rotation(1), Some(315));
        world.rotate_sprite(9, 90);
        assert_eq!(world.sprite_rotation(9), None);
    }

    #[test]
    fn test_shift_unbounded() {
        let mut world = world_5x5();
        world.create_sprite(1, 3);
        world.shift_sprite(1, -7, 12);
        assert_eq!((world.sprite_x(1), world.sprite_y(1)), (Some(-7), Some(12)));
    }

    #[test]
    fn test_shift_clamped_to_zero_bounds() {
        let mut world = world_5x5();
        world.set_bounds(Bounds::new(0, 0, 0, 0));
        world.create_sprite(1, 5);

        world.shift_sprite(1, 10, 0);
        assert_eq!(world.sprite_x(1), Some(0));
        world.shift_sprite(1, -10, 0);
        assert_eq!(world.sprite_x(1), Some(0));
        assert!(world.at_bounds(1));
    }

    #[test]
    fn test_frames_error() {
        let mut world = world_5x5();
        assert_eq!(world.frames(7), Err(WorldError::SpriteNotFound(7)));
        world.create_sprite(7, 2);
        world.add_frame(7, 1);
        assert_eq!(world.frames(7), Ok(1));
    }

    #[test]
    fn test_composite_blank_world() {
        let world = world_5x5();
        assert_eq!(world.composite_cell(0, 0), None);
    }
}
