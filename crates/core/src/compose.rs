//! Compose module - pure geometry for mapping screen pixels onto sprite frames
//!
//! A glyph row on screen is filled from one row or column of a sprite frame.
//! Which line, where to start on it and which way to walk depend only on the
//! sprite's heading (see [`ReadPlan`]), its position and its size.

use crate::types::{LineAxis, ReadDirection, ReadPlan};

/// Frame line (row or column index) that feeds screen pixel row `target_y`
///
/// Rows read forward and columns read backward count from the sprite's top
/// edge; the other two cases count from its bottom edge.
pub fn line_number(plan: ReadPlan, sprite_y: i32, target_y: i32, size: i32) -> i32 {
    match (plan.axis, plan.direction) {
        (LineAxis::Row, ReadDirection::Forward) | (LineAxis::Column, ReadDirection::Backward) => {
            target_y - sprite_y
        }
        _ => sprite_y + size - 1 - target_y,
    }
}

/// Index along the frame line that maps to screen column `target_x`
pub fn start_position(direction: ReadDirection, sprite_x: i32, target_x: i32, size: i32) -> i32 {
    match direction {
        ReadDirection::Forward => target_x - sprite_x,
        ReadDirection::Backward => sprite_x + size - 1 - target_x,
    }
}

/// Pack `width` bits of a frame line into the low bits of one glyph byte
///
/// Bit `i` of the window (`start + i * step`) lands at output bit
/// `width - 1 - i`, so the leftmost screen pixel is the most significant bit
/// of the window. Source indices outside `[0, line_len)` read as 0, as does
/// an absent line.
pub fn read_byte_piece(
    direction: ReadDirection,
    start: i32,
    line: Option<&[u8]>,
    line_len: i32,
    width: u8,
) -> u8 {
    let Some(line) = line else {
        return 0;
    };

    let step = direction.step();
    let width = width.min(8) as i32;
    let mut out = 0u8;

    for i in 0..width {
        let from = start + step * i;
        if from < 0 || from >= line_len {
            continue;
        }
        let from = from as usize;
        let Some(byte) = line.get(from / 8) else {
            continue;
        };
        let bit = (byte >> (7 - from % 8)) & 1;
        out |= bit << (width - 1 - i);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrameStyle, Heading};

    fn plan(heading: Heading) -> ReadPlan {
        heading.read_plan()
    }

    #[test]
    fn test_line_number_counts_from_top_or_bottom() {
        // Sprite at y=2, size 4, screen row 3
        assert_eq!(line_number(plan(Heading::R0), 2, 3, 4), 1);
        assert_eq!(line_number(plan(Heading::R90), 2, 3, 4), 1);
        assert_eq!(line_number(plan(Heading::R180), 2, 3, 4), 2);
        assert_eq!(line_number(plan(Heading::R270), 2, 3, 4), 2);
    }

    #[test]
    fn test_line_number_ignores_style() {
        let upright = plan(Heading::R0);
        let diagonal = ReadPlan {
            style: FrameStyle::Diagonal,
            ..upright
        };
        assert_eq!(line_number(upright, -3, 0, 5), line_number(diagonal, -3, 0, 5));
    }

    #[test]
    fn test_start_position() {
        assert_eq!(start_position(ReadDirection::Forward, 1, 0, 5), -1);
        assert_eq!(start_position(ReadDirection::Forward, -2, 0, 5), 2);
        assert_eq!(start_position(ReadDirection::Backward, 0, 0, 5), 4);
        assert_eq!(start_position(ReadDirection::Backward, 3, 5, 5), 2);
    }

    #[test]
    fn test_read_forward_window() {
        let line = [0b1011_0000];
        assert_eq!(
            read_byte_piece(ReadDirection::Forward, 0, Some(&line[..]), 5, 5),
            0b1_0110
        );
        // Shifted one pixel right on screen: leading bit is empty
        assert_eq!(
            read_byte_piece(ReadDirection::Forward, -1, Some(&line[..]), 5, 5),
            0b0_1011
        );
    }

    #[test]
    fn test_read_backward_window() {
        let line = [0b1011_0000];
        assert_eq!(
            read_byte_piece(ReadDirection::Backward, 4, Some(&line[..]), 5, 5),
            0b0_1101
        );
    }

    #[test]
    fn test_read_spans_bytes() {
        let line = [0b0000_0001, 0b1000_0000];
        assert_eq!(
            read_byte_piece(ReadDirection::Forward, 7, Some(&line[..]), 9, 5),
            0b1_1000
        );
    }

    #[test]
    fn test_read_ignores_bits_past_line_length() {
        // Padding bits beyond line_len are never read even if set
        let line = [0b1111_1111];
        assert_eq!(
            read_byte_piece(ReadDirection::Forward, 0, Some(&line[..]), 3, 5),
            0b1_1100
        );
    }

    #[test]
    fn test_absent_line_reads_zero() {
        assert_eq!(read_byte_piece(ReadDirection::Forward, 0, None, 5, 5), 0);
    }
}
