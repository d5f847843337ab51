//! Tile layers
//!
//! Grids, the wall auto-tiling pass, and the compositors that rasterize a
//! partition tree into the tiles, props and monsters layers.

mod compositor;
mod mask;
mod props;
mod tilemap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::TemplateLayers;

pub use compositor::{carve_corridors, carve_rooms, composite_tiles, stamp_rooms};
pub use mask::{
    SOLID_WALL_TILE, TileDirection, compute_bitmask, compute_hole, compute_tiles_mask,
    tile_for_mask,
};
pub use props::{MonsterType, PropType, carve_torches, composite_monsters, composite_props};
pub use tilemap::TileMap;

/// Unresolved wall, before auto-tiling
pub const WALL: i32 = 1;
/// Walkable floor
pub const FLOOR: i32 = 0;
/// Top row of a hole
pub const HOLE_EDGE: i32 = -1;
/// Hole cell below another hole cell
pub const HOLE_INTERIOR: i32 = -2;

/// Coarse class of a tiles-layer value
///
/// Props and monsters may only sit on `Floor` cells; the compositors do not
/// enforce it, callers rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Hole,
    Floor,
    Wall,
}

impl TileKind {
    pub fn of(value: i32) -> Self {
        match value.cmp(&0) {
            std::cmp::Ordering::Less => TileKind::Hole,
            std::cmp::Ordering::Equal => TileKind::Floor,
            std::cmp::Ordering::Greater => TileKind::Wall,
        }
    }
}

/// One of the three parallel layers of a template or dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TileLayer {
    Tiles,
    Props,
    Monsters,
}

impl TileLayer {
    /// The matching grid of a template
    pub fn of(self, layers: &TemplateLayers) -> &TileMap {
        match self {
            TileLayer::Tiles => &layers.tiles,
            TileLayer::Props => &layers.props,
            TileLayer::Monsters => &layers.monsters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_kind() {
        assert_eq!(TileKind::of(HOLE_INTERIOR), TileKind::Hole);
        assert_eq!(TileKind::of(HOLE_EDGE), TileKind::Hole);
        assert_eq!(TileKind::of(FLOOR), TileKind::Floor);
        assert_eq!(TileKind::of(WALL), TileKind::Wall);
        assert_eq!(TileKind::of(SOLID_WALL_TILE), TileKind::Wall);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(TileLayer::Monsters.to_string(), "monsters");
        let layer: TileLayer = serde_json::from_str("\"props\"").unwrap();
        assert_eq!(layer, TileLayer::Props);
    }
}
