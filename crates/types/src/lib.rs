//! Plain data shared by the sprite compositor and its hosts
//!
//! Identifiers, headings, cell sizes and movement bounds live here so a
//! display driver can name them without pulling in the compositing code.
//! Nothing in this crate allocates or depends on another crate.
//!
//! # Character Cells
//!
//! A character cell is the pixel rectangle of one custom glyph on a character LCD:
//!
//! - **Width**: 1..=8 pixels (one glyph row is packed into the low bits of a byte)
//! - **Height**: 1..=16 pixels (one byte per glyph row)
//! - **Default**: 5 x 8, the common HD44780 custom-character size
//!
//! # Identifiers
//!
//! Sprites and frames are keyed by a one-byte [`Id`]. The value [`NOT_FOUND_ID`]
//! (`'~'`) is reserved and can never be stored, which caps every registry at
//! [`MAX_RING_ENTRIES`] entries.
//!
//! # Headings
//!
//! Sprites turn in 45° steps. Each [`Heading`] maps to a [`ReadPlan`]:
//!
//! | Heading | Line | Direction | Style |
//! |---------|------|-----------|-------|
//! | 0 | row | forward | upright |
//! | 45 | row | forward | diagonal |
//! | 90 | column | backward | upright |
//! | 135 | column | backward | diagonal |
//! | 180 | row | backward | upright |
//! | 225 | row | backward | diagonal |
//! | 270 | column | forward | upright |
//! | 315 | column | forward | diagonal |
//!
//! # Examples
//!
//! ```
//! use lcd_sprites_types::{CellGeometry, Heading, FrameStyle, LineAxis, ReadDirection};
//!
//! // Headings wrap around a full turn
//! let heading = Heading::R315.rotated(90).unwrap();
//! assert_eq!(heading, Heading::R45);
//!
//! // Only multiples of 45 are accepted
//! assert_eq!(Heading::R0.rotated(10), None);
//!
//! // Each heading knows how to read its frame
//! let plan = Heading::R90.read_plan();
//! assert_eq!(plan.axis, LineAxis::Column);
//! assert_eq!(plan.direction, ReadDirection::Backward);
//! assert_eq!(plan.style, FrameStyle::Upright);
//!
//! // Cell geometry is clamped, never rejected
//! let geometry = CellGeometry::new(12, 0);
//! assert_eq!((geometry.width, geometry.height), (8, 1));
//! ```

/// One-byte identifier used for sprites and frames
pub type Id = u8;

/// Reserved identifier that signals "not found" and is never stored
pub const NOT_FOUND_ID: Id = b'~';

/// Maximum number of entries one ring can hold (every byte value except the sentinel)
pub const MAX_RING_ENTRIES: usize = 255;

/// Default glyph width in pixels (HD44780 5x8 characters)
pub const DEFAULT_CELL_WIDTH: u8 = 5;

/// Default glyph height in pixels (HD44780 5x8 characters)
pub const DEFAULT_CELL_HEIGHT: u8 = 8;

/// Widest supported glyph; one glyph row must fit into a byte
pub const MAX_CELL_WIDTH: u8 = 8;

/// Tallest supported glyph (one byte per row)
pub const MAX_CELL_HEIGHT: usize = 16;

/// Bound value treated as "no bound" on a side (10000 pixels)
pub const BOUND_UNLIMITED: i32 = 10_000;

/// Largest sprite side length in pixels
///
/// A 256x256 frame packs into 8 KiB, so one frame pair costs 16 KiB. That is
/// already wider than a 40x4 display of 5x8 cells (200x32 pixels).
pub const MAX_SPRITE_SIDE: u16 = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hd44780_geometry_defaults() {
        assert_eq!(DEFAULT_CELL_WIDTH, 5);
        assert_eq!(DEFAULT_CELL_HEIGHT, 8);
        assert!(DEFAULT_CELL_WIDTH <= MAX_CELL_WIDTH);
        assert!(DEFAULT_CELL_HEIGHT as usize <= MAX_CELL_HEIGHT);
    }

    #[test]
    fn sprite_side_cap_fits_largest_display() {
        let widest_display = 40 * DEFAULT_CELL_WIDTH as u16;
        assert!(MAX_SPRITE_SIDE >= widest_display);
        let frame_bytes = (MAX_SPRITE_SIDE as usize).pow(2).div_ceil(8);
        assert_eq!(frame_bytes, 8 * 1024);
    }

    #[test]
    fn sentinel_is_tilde() {
        assert_eq!(NOT_FOUND_ID, 0x7E);
        assert_eq!(MAX_RING_ENTRIES, 255);
    }

    #[test]
    fn heading_degrees_round_trip() {
        for degrees in (0..360).step_by(45) {
            let heading = Heading::from_degrees(degrees).unwrap();
            assert_eq!(heading.degrees(), degrees);
        }
        assert_eq!(Heading::from_degrees(360), None);
        assert_eq!(Heading::from_degrees(-45), None);
        assert_eq!(Heading::from_degrees(30), None);
    }

    #[test]
    fn heading_rotation_arithmetic() {
        assert_eq!(Heading::R0.rotated(405), Some(Heading::R45));
        assert_eq!(Heading::R0.rotated(-45), Some(Heading::R315));
        assert_eq!(Heading::R0.rotated(-405), Some(Heading::R315));
        assert_eq!(Heading::R180.rotated(720), Some(Heading::R180));
        assert_eq!(Heading::R90.rotated(10), None);
    }

    #[test]
    fn read_plan_table() {
        use FrameStyle::*;
        use LineAxis::*;
        use ReadDirection::*;

        let expected = [
            (Heading::R0, Row, Forward, Upright),
            (Heading::R45, Row, Forward, Diagonal),
            (Heading::R90, Column, Backward, Upright),
            (Heading::R135, Column, Backward, Diagonal),
            (Heading::R180, Row, Backward, Upright),
            (Heading::R225, Row, Backward, Diagonal),
            (Heading::R270, Column, Forward, Upright),
            (Heading::R315, Column, Forward, Diagonal),
        ];
        for (heading, axis, direction, style) in expected {
            let plan = heading.read_plan();
            assert_eq!(plan, ReadPlan { axis, direction, style }, "{:?}", heading);
        }
        assert_eq!(ReadPlan::for_degrees(10), None);
    }

    #[test]
    fn bounds_clamp_negative_sides() {
        let bounds = Bounds::new(-1, 2, -3, 4);
        assert_eq!(bounds, Bounds { top: 0, right: 2, bottom: 0, left: 4 });
        assert_eq!(Bounds::default(), Bounds::UNBOUNDED);
    }
}

/// The eight sprite headings, in 45° steps clockwise from upright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heading {
    #[default]
    R0,
    R45,
    R90,
    R135,
    R180,
    R225,
    R270,
    R315,
}

impl Heading {
    /// All headings in clockwise order
    pub const ALL: [Heading; 8] = [
        Heading::R0,
        Heading::R45,
        Heading::R90,
        Heading::R135,
        Heading::R180,
        Heading::R225,
        Heading::R270,
        Heading::R315,
    ];

    /// Parse a heading from an exact degree value in `0..360`
    ///
    /// # Examples
    ///
    /// ```
    /// use lcd_sprites_types::Heading;
    ///
    /// assert_eq!(Heading::from_degrees(135), Some(Heading::R135));
    /// assert_eq!(Heading::from_degrees(400), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if !(0..360).contains(&degrees) || degrees % 45 != 0 {
            return None;
        }
        Self::ALL.get((degrees / 45) as usize).copied()
    }

    /// Heading in degrees (0, 45, ..., 315)
    pub fn degrees(&self) -> i32 {
        match self {
            Heading::R0 => 0,
            Heading::R45 => 45,
            Heading::R90 => 90,
            Heading::R135 => 135,
            Heading::R180 => 180,
            Heading::R225 => 225,
            Heading::R270 => 270,
            Heading::R315 => 315,
        }
    }

    /// Turn by `degrees`, which must be a multiple of 45 (any sign, any magnitude)
    ///
    /// The new heading is `(current + 360 + degrees % 360) % 360`.
    /// Returns `None` when `degrees` is not a multiple of 45.
    ///
    /// # Examples
    ///
    /// ```
    /// use lcd_sprites_types::Heading;
    ///
    /// assert_eq!(Heading::R0.rotated(405), Some(Heading::R45));
    /// assert_eq!(Heading::R45.rotated(-90), Some(Heading::R315));
    /// assert_eq!(Heading::R0.rotated(10), None);
    /// ```
    pub fn rotated(&self, degrees: i32) -> Option<Self> {
        if degrees % 45 != 0 {
            return None;
        }
        Self::from_degrees((self.degrees() + 360 + degrees % 360) % 360)
    }

    /// How frames are read when the sprite faces this heading
    pub fn read_plan(&self) -> ReadPlan {
        use FrameStyle::{Diagonal, Upright};
        use LineAxis::{Column, Row};
        use ReadDirection::{Backward, Forward};

        let (axis, direction, style) = match self {
            Heading::R0 => (Row, Forward, Upright),
            Heading::R45 => (Row, Forward, Diagonal),
            Heading::R90 => (Column, Backward, Upright),
            Heading::R135 => (Column, Backward, Diagonal),
            Heading::R180 => (Row, Backward, Upright),
            Heading::R225 => (Row, Backward, Diagonal),
            Heading::R270 => (Column, Forward, Upright),
            Heading::R315 => (Column, Forward, Diagonal),
        };
        ReadPlan {
            axis,
            direction,
            style,
        }
    }
}

/// Which of a sprite's two frame cycles a frame belongs to
///
/// - **Upright** ("H"): used at 0, 90, 180 and 270 degrees
/// - **Diagonal** ("D"): used at 45, 135, 225 and 315 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStyle {
    Upright,
    Diagonal,
}

impl FrameStyle {
    /// Single-letter tag used in logs ("H" or "D")
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStyle::Upright => "H",
            FrameStyle::Diagonal => "D",
        }
    }
}

/// Which kind of bitmap line feeds one on-screen pixel row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAxis {
    Row,
    Column,
}

/// Direction to walk along a bitmap line while filling a glyph row left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadDirection {
    Forward,
    Backward,
}

impl ReadDirection {
    /// Step applied to the source index per output bit (+1 or -1)
    pub fn step(&self) -> i32 {
        match self {
            ReadDirection::Forward => 1,
            ReadDirection::Backward => -1,
        }
    }
}

/// Frame selection and read direction for one heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadPlan {
    pub axis: LineAxis,
    pub direction: ReadDirection,
    pub style: FrameStyle,
}

impl ReadPlan {
    /// Plan for a raw degree value; anything but the eight headings yields `None`
    pub fn for_degrees(degrees: i32) -> Option<Self> {
        Heading::from_degrees(degrees).map(|h| h.read_plan())
    }
}

/// Pixel dimensions of one character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellGeometry {
    pub width: u8,
    pub height: u8,
}

impl CellGeometry {
    /// Create a geometry, clamping width to `1..=8` and height to `1..=16`
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.clamp(1, MAX_CELL_WIDTH as i32) as u8,
            height: height.clamp(1, MAX_CELL_HEIGHT as i32) as u8,
        }
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
        }
    }
}

/// Movement limits, in pixels outward from the edges of the first character cell
///
/// A sprite's bounding box may not be shifted past any of these sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Bounds {
    /// Effectively unbounded on every side
    pub const UNBOUNDED: Bounds = Bounds {
        top: BOUND_UNLIMITED,
        right: BOUND_UNLIMITED,
        bottom: BOUND_UNLIMITED,
        left: BOUND_UNLIMITED,
    };

    /// Create bounds; negative offsets are clamped to 0
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top: top.max(0),
            right: right.max(0),
            bottom: bottom.max(0),
            left: left.max(0),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
