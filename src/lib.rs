//! LCD sprites (workspace facade crate).
//!
//! This package exposes the `lcd_sprites::{core,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use lcd_sprites_core as core;
pub use lcd_sprites_types as types;

pub use lcd_sprites_core::{Bitmap, Glyph, Ring, SpriteSnapshot, SpriteWorld, WorldError};
