//! Wall auto-tiling
//!
//! Every wall cell gets an 8-bit mask describing which neighbours are walls
//! too, and the mask is translated to a wall style id. Diagonal neighbours
//! only count when both adjacent cardinal neighbours are walls, which limits
//! the reachable masks to the 47 listed in [`tile_for_mask`].

use bitflags::bitflags;

use crate::error::GenerateError;

use super::tilemap::TileMap;
use super::{HOLE_EDGE, HOLE_INTERIOR, TileKind};

bitflags! {
    /// Neighbour bits of a wall mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileDirection: u8 {
        const NORTH_WEST = 1;
        const NORTH = 2;
        const NORTH_EAST = 4;
        const WEST = 8;
        const EAST = 16;
        const SOUTH_WEST = 32;
        const SOUTH = 64;
        const SOUTH_EAST = 128;
    }
}

/// Wall style id for a neighbour mask, or `None` for an unreachable mask
pub const fn tile_for_mask(mask: TileDirection) -> Option<i32> {
    let id = match mask.bits() {
        2 => 1,
        8 => 2,
        10 => 3,
        11 => 4,
        16 => 5,
        18 => 6,
        22 => 7,
        24 => 8,
        26 => 9,
        27 => 10,
        30 => 11,
        31 => 12,
        64 => 13,
        66 => 14,
        72 => 15,
        74 => 16,
        75 => 17,
        80 => 18,
        82 => 19,
        86 => 20,
        88 => 21,
        90 => 22,
        91 => 23,
        94 => 24,
        95 => 25,
        104 => 26,
        106 => 27,
        107 => 28,
        120 => 29,
        122 => 30,
        123 => 31,
        126 => 32,
        127 => 33,
        208 => 34,
        210 => 35,
        214 => 36,
        216 => 37,
        218 => 38,
        219 => 39,
        222 => 40,
        223 => 41,
        // Never produced (south-west without west); kept for old content
        246 => 36,
        248 => 42,
        250 => 43,
        251 => 44,
        254 => 45,
        255 => 46,
        0 => 47,
        _ => return None,
    };
    Some(id)
}

/// Wall style of a cell fully surrounded by walls
pub const SOLID_WALL_TILE: i32 = 46;

/// Neighbour mask of the cell at (x, y). The map edge counts as wall.
pub fn compute_bitmask(tiles: &TileMap, x: usize, y: usize) -> TileDirection {
    let solid = |dx: i64, dy: i64| match tiles.get_signed(x as i64 + dx, y as i64 + dy) {
        Some(value) => TileKind::of(value) == TileKind::Wall,
        None => true,
    };

    let mut mask = TileDirection::empty();
    mask.set(TileDirection::NORTH, solid(0, -1));
    mask.set(TileDirection::WEST, solid(-1, 0));
    mask.set(TileDirection::EAST, solid(1, 0));
    mask.set(TileDirection::SOUTH, solid(0, 1));

    let diagonals = [
        (TileDirection::NORTH_WEST, TileDirection::NORTH | TileDirection::WEST, -1, -1),
        (TileDirection::NORTH_EAST, TileDirection::NORTH | TileDirection::EAST, 1, -1),
        (TileDirection::SOUTH_WEST, TileDirection::SOUTH | TileDirection::WEST, -1, 1),
        (TileDirection::SOUTH_EAST, TileDirection::SOUTH | TileDirection::EAST, 1, 1),
    ];
    for (corner, sides, dx, dy) in diagonals {
        if mask.contains(sides) && solid(dx, dy) {
            mask.insert(corner);
        }
    }

    mask
}

/// Hole style of the cell at (x, y): an edge unless the cell above is a hole
pub fn compute_hole(tiles: &TileMap, x: usize, y: usize) -> i32 {
    let above = y
        .checked_sub(1)
        .and_then(|above| tiles.get(x, above))
        .map(TileKind::of);
    if above == Some(TileKind::Hole) {
        HOLE_INTERIOR
    } else {
        HOLE_EDGE
    }
}

/// Resolve every wall cell to its style id and every hole to edge/interior.
///
/// Neighbours are read from the input, so the result does not depend on scan
/// order. Floors are left untouched. Style ids stay positive and hole ids
/// stay negative, so running the pass again on its own output changes
/// nothing.
pub fn compute_tiles_mask(tiles: &TileMap) -> Result<TileMap, GenerateError> {
    let mut result = tiles.clone();

    for (x, y, value) in tiles.cells() {
        match TileKind::of(value) {
            TileKind::Wall => {
                let mask = compute_bitmask(tiles, x, y);
                let id = tile_for_mask(mask).ok_or(GenerateError::UnmappedBitmask {
                    x,
                    y,
                    mask: mask.bits(),
                })?;
                result.set(x, y, id);
            }
            TileKind::Hole => result.set(x, y, compute_hole(tiles, x, y)),
            TileKind::Floor => {}
        }
    }

    Ok(result)
}
