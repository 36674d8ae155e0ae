//! Bitmap module - one square, bit-packed sprite frame
//!
//! Pixels are stored row-major in a flat byte buffer, eight pixels per byte.
//! Pixel (x, y) lives at flat index `y * length + x`; its byte is `index / 8`
//! and its bit is `7 - index % 8` (most-significant bit first).
//! Row and column reads use the same packing, which is what display drivers
//! consume bit-for-bit.

use crate::types::{LineAxis, MAX_SPRITE_SIDE};

/// A square, bit-packed monochrome image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Side length in pixels (at least 1)
    length: u16,
    /// Packed pixels, `ceil(length² / 8)` bytes
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a blank bitmap; side lengths are clamped to `1..=MAX_SPRITE_SIDE`
    pub fn new(side_length: i32) -> Self {
        let length = side_length.clamp(1, MAX_SPRITE_SIDE as i32) as u16;
        let area = (length as usize) * (length as usize);
        Self {
            length,
            pixels: vec![0; area.div_ceil(8)],
        }
    }

    /// Side length in pixels
    pub fn size(&self) -> u16 {
        self.length
    }

    /// Number of bytes in the packed buffer
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// Raw packed pixels
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of bytes in one row or column read
    pub fn line_byte_len(&self) -> usize {
        (self.length as usize).div_ceil(8)
    }

    /// Flat pixel index, or None if out of bounds
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let length = self.length as i32;
        if x < 0 || x >= length || y < 0 || y >= length {
            return None;
        }
        Some((y as usize) * (self.length as usize) + (x as usize))
    }

    /// Read a pixel; out-of-bounds pixels read as off
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.pixels[i / 8] & (1 << (7 - i % 8)) != 0,
            None => false,
        }
    }

    /// Turn a pixel on
    /// Returns false if out of bounds
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> bool {
        self.set_pixel(x, y, true)
    }

    /// Turn a pixel off
    /// Returns false if out of bounds
    pub fn clear_pixel(&mut self, x: i32, y: i32) -> bool {
        self.set_pixel(x, y, false)
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        let mask = 1u8 << (7 - i % 8);
        if on {
            self.pixels[i / 8] |= mask;
        } else {
            self.pixels[i / 8] &= !mask;
        }
        true
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Packed copy of row `row`, or None if out of range
    pub fn get_row(&self, row: i32) -> Option<Vec<u8>> {
        let mut out = Vec::with_capacity(self.line_byte_len());
        self.read_line_into(LineAxis::Row, row, &mut out)
            .then_some(out)
    }

    /// Packed copy of column `col`, or None if out of range
    pub fn get_col(&self, col: i32) -> Option<Vec<u8>> {
        let mut out = Vec::with_capacity(self.line_byte_len());
        self.read_line_into(LineAxis::Column, col, &mut out)
            .then_some(out)
    }

    /// Fill `out` with a packed row or column, reusing its allocation
    ///
    /// `out` is cleared first. Returns false (leaving `out` empty) if `line`
    /// is outside `[0, length)`.
    pub fn read_line_into(&self, axis: LineAxis, line: i32, out: &mut Vec<u8>) -> bool {
        out.clear();
        if line < 0 || line >= self.length as i32 {
            return false;
        }
        out.resize(self.line_byte_len(), 0);

        for i in 0..self.length as i32 {
            let on = match axis {
                LineAxis::Row => self.get_pixel(i, line),
                LineAxis::Column => self.get_pixel(line, i),
            };
            if on {
                let i = i as usize;
                out[i / 8] |= 1 << (7 - i % 8);
            }
        }
        true
    }
}
