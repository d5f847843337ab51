//! Generation errors
//!
//! Only conditions that make the output meaningless are errors. A template
//! too large for its slot or a split that keeps failing its ratio guard are
//! logged and absorbed by the pipeline instead.

use thiserror::Error;

use crate::dungeon::RoomType;

/// Errors that abort a generation call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("Couldn't find templates of type \"{0}\"")]
    NoTemplatesForType(RoomType),

    #[error("Couldn't find containers to fit {count} templates of type \"{room_type}\"")]
    NoContainersAvailable { room_type: RoomType, count: usize },

    /// The neighbour rules produced a mask the lookup table does not know.
    /// This is an internal invariant violation, not a user error.
    #[error("Unmapped wall bitmask {mask:#010b} at ({x}, {y})")]
    UnmappedBitmask { x: usize, y: usize, mask: u8 },

    #[error("Invalid generation parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid room template \"{id}\": {reason}")]
    InvalidTemplate { id: String, reason: String },
}
