//! Error types for sprite world queries

use thiserror::Error;

use crate::types::Id;

/// Errors surfaced by [`SpriteWorld`](crate::world::SpriteWorld) queries
///
/// Routine misses (unknown ids, off-bitmap pixels) are reported as `false` or
/// `None`; this type only covers queries that must distinguish "missing" from
/// "broken".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// No sprite with this id
    #[error("sprite {0:#04x} not found")]
    SpriteNotFound(Id),

    /// The upright and diagonal frame cycles hold different numbers of frames
    #[error("sprite {id:#04x} frame cycles out of sync: {upright} upright vs {diagonal} diagonal")]
    FramesDesynchronized {
        id: Id,
        upright: usize,
        diagonal: usize,
    },
}

/// Result type for sprite world queries
pub type Result<T> = std::result::Result<T, WorldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            WorldError::SpriteNotFound(b'A').to_string(),
            "sprite 0x41 not found"
        );
        let err = WorldError::FramesDesynchronized {
            id: 1,
            upright: 2,
            diagonal: 3,
        };
        assert_eq!(
            err.to_string(),
            "sprite 0x01 frame cycles out of sync: 2 upright vs 3 diagonal"
        );
    }
}
