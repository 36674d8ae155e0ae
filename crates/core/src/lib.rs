//! Sprite compositing core - pure, deterministic, and testable
//!
//! This crate turns animated, movable bitmap sprites into the custom glyphs of a
//! character LCD. It has **zero dependencies** on display hardware or I/O:
//! hosts edit sprites, ask for the glyph of a character cell, and upload the
//! bytes themselves.
//!
//! # Module Structure
//!
//! - [`bitmap`]: square, bit-packed frame with pixel access and row/column reads
//! - [`ring`]: id-keyed, rotatable collection used for the sprite registry and frame cycles
//! - [`sprite`]: position, heading and the paired upright/diagonal frame cycles
//! - [`compose`]: pure geometry mapping screen pixels onto frame lines
//! - [`world`]: sprite registry, bounds, and per-cell compositing
//! - [`snapshot`]: plain-data view of sprite state
//! - [`error`]: errors for queries that must tell "missing" from "broken"
//!
//! # Bit Order
//!
//! Every byte in this crate is packed most-significant bit first. A glyph row
//! uses the low `width` bits, with the leftmost pixel in bit `width - 1`, which
//! is the layout HD44780-style controllers expect for custom characters.
//!
//! # Example
//!
//! ```
//! use lcd_sprites_core::SpriteWorld;
//! use lcd_sprites_core::types::CellGeometry;
//!
//! let mut world = SpriteWorld::new(CellGeometry::new(5, 8));
//! world.create_sprite(b'A', 5);
//! world.add_frame(b'A', b'f');
//! world.draw_frame_h(b'A', b'f', 0, 0);
//!
//! let glyph = world.composite_cell(0, 0).unwrap();
//! assert_eq!(glyph[0], 0b1_0000);
//! assert_eq!(world.composite_cell(0, 1), None);
//! ```
//!
//! # Ownership
//!
//! The world exclusively owns every sprite and bitmap. It is single-threaded;
//! hosts that share one across threads must serialize access themselves.

pub mod bitmap;
pub mod compose;
pub mod error;
pub mod ring;
pub mod snapshot;
pub mod sprite;
pub mod world;

pub use lcd_sprites_types as types;

// Re-export commonly used types for convenience
pub use bitmap::Bitmap;
pub use error::{Result, WorldError};
pub use ring::Ring;
pub use snapshot::SpriteSnapshot;
pub use sprite::Sprite;
pub use world::{Glyph, SpriteWorld};
