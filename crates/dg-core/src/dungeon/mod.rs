//! Dungeon structure
//!
//! Partition tree, corridors, room templates and their placement, and the
//! generation pipeline tying them together.

mod assign;
mod corridor;
mod generation;
mod rect;
mod room;
mod tree;

pub use assign::{
    AssignmentReport, QuotaOutcome, ROOM_QUOTAS, RoomQuota, assign_rooms, fill_by_type,
    find_fitting_template,
};
pub use corridor::{Corridor, Direction, make_corridor};
pub use generation::{Dungeon, DungeonLayers, generate, generate_with_rng};
pub use rect::{Point, Rectangle};
pub use room::{Room, RoomTemplate, RoomType, TemplateLayers};
pub use tree::{Container, PartitionTree, build_tree, split_container};
