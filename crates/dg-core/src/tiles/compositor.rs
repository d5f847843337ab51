//! Tiles layer compositing
//!
//! The map starts as solid wall. Corridors are carved first, then every
//! placed room stamps its template tiles over them, and finally the
//! auto-tiling pass resolves wall and hole styles on the fully carved grid.

use crate::dungeon::PartitionTree;
use crate::error::GenerateError;

use super::mask::compute_tiles_mask;
use super::tilemap::TileMap;
use super::{FLOOR, TileLayer, WALL};

/// Rasterize the tree into a resolved tiles layer of `width × height`
pub fn composite_tiles(
    tree: &PartitionTree,
    width: usize,
    height: usize,
) -> Result<TileMap, GenerateError> {
    let mut tiles = TileMap::new(width, height, WALL);

    carve_corridors(tree, &mut tiles);
    carve_rooms(tree, &mut tiles);

    compute_tiles_mask(&tiles)
}

/// Set every corridor cell to floor, walking the tree in pre-order
pub fn carve_corridors(node: &PartitionTree, tiles: &mut TileMap) {
    if let Some(corridor) = &node.container().corridor {
        tiles.fill_rect(&corridor.rect, FLOOR);
    }

    if let Some((left, right)) = node.children() {
        carve_corridors(left, tiles);
        carve_corridors(right, tiles);
    }
}

/// Copy each room's template tiles verbatim at the room position
pub fn carve_rooms(tree: &PartitionTree, tiles: &mut TileMap) {
    stamp_rooms(tree, tiles, TileLayer::Tiles);
}

/// Copy `layer` of every placed room onto `target` at the room position
pub fn stamp_rooms(tree: &PartitionTree, target: &mut TileMap, layer: TileLayer) {
    for room in tree.rooms() {
        target.stamp(layer.of(&room.template.layers), room.x, room.y);
    }
}
