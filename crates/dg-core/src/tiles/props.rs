//! Props and monsters layers
//!
//! Both layers are copied from the placed room templates. The props layer
//! additionally gets torches on the inner corners of walls, derived from the
//! resolved tiles layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::dungeon::PartitionTree;

use super::compositor::stamp_rooms;
use super::mask::{TileDirection, tile_for_mask};
use super::tilemap::TileMap;
use super::TileLayer;

/// Props layer ids
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(i32)]
pub enum PropType {
    // Traps
    Peak = 1,
    // Decor
    Bone = 2,
    CrateSilver = 3,
    CrateWood = 4,
    Flag = 5,
    Handcuff1 = 6,
    Handcuff2 = 7,
    Lamp = 8,
    Skull = 9,
    StonesLarge = 10,
    StonesSmall = 11,
    Torch = 12,
    WebLeft = 13,
    WebRight = 14,
    // Items
    HealthLarge = 15,
    HealthSmall = 16,
    KeyGold = 17,
    KeySilver = 18,
    ManaLarge = 19,
    ManaSmall = 20,
    // Spawns
    Ladder = 21,
}

impl PropType {
    pub const fn id(self) -> i32 {
        self as i32
    }
}

/// Monsters layer ids
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(i32)]
pub enum MonsterType {
    Bandit = 1,
    Mushroom = 2,
    Skeleton = 3,
    Troll = 4,
}

impl MonsterType {
    pub const fn id(self) -> i32 {
        self as i32
    }
}

/// Props layer: room props, then torches on wall corners
pub fn composite_props(
    tree: &PartitionTree,
    tiles: &TileMap,
    width: usize,
    height: usize,
) -> TileMap {
    let mut props = TileMap::new(width, height, 0);
    stamp_rooms(tree, &mut props, TileLayer::Props);
    carve_torches(tiles, &mut props);
    props
}

/// Monsters layer: room monsters only
pub fn composite_monsters(tree: &PartitionTree, width: usize, height: usize) -> TileMap {
    let mut monsters = TileMap::new(width, height, 0);
    stamp_rooms(tree, &mut monsters, TileLayer::Monsters);
    monsters
}

/// Put a torch on every north-west and north-east inner wall corner.
///
/// `tiles` must already be resolved by the auto-tiling pass. Torches
/// overwrite whatever prop was there.
pub fn carve_torches(tiles: &TileMap, props: &mut TileMap) {
    let left_corner =
        tile_for_mask(TileDirection::NORTH | TileDirection::WEST | TileDirection::NORTH_WEST);
    let right_corner =
        tile_for_mask(TileDirection::NORTH | TileDirection::EAST | TileDirection::NORTH_EAST);

    for (x, y, tile) in tiles.cells() {
        if Some(tile) == left_corner || Some(tile) == right_corner {
            props.set(x, y, PropType::Torch.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::compute_tiles_mask;
    use strum::IntoEnumIterator;

    #[test]
    fn test_prop_ids_are_contiguous() {
        for (i, prop) in PropType::iter().enumerate() {
            assert_eq!(prop.id(), i as i32 + 1);
            assert_eq!(PropType::from_repr(prop.id()), Some(prop));
        }
        assert_eq!(PropType::Torch.id(), 12);
        assert_eq!(MonsterType::from_repr(4), Some(MonsterType::Troll));
        assert_eq!(MonsterType::from_repr(0), None);
    }

    #[test]
    fn test_torches_on_inner_corners() {
        // A room whose top corners are inner corners of the surrounding wall
        let raw = TileMap::try_from(vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap();
        let tiles = compute_tiles_mask(&raw).unwrap();
        let mut props = TileMap::new(5, 4, 0);
        props.set(0, 0, PropType::Skull.id());
        carve_torches(&tiles, &mut props);

        let torches: Vec<(usize, usize)> = props
            .cells()
            .filter(|(_, _, v)| *v == PropType::Torch.id())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(torches.is_empty(), "a closed room has no N+W-only corners");

        // Open the bottom-right so the left wall becomes a N+W+NW corner
        let raw = TileMap::try_from(vec![
            vec![1, 1, 1],
            vec![1, 1, 0],
            vec![1, 0, 0],
        ])
        .unwrap();
        let tiles = compute_tiles_mask(&raw).unwrap();
        let mut props = TileMap::new(3, 3, 0);
        carve_torches(&tiles, &mut props);
        assert_eq!(props.get(1, 1), Some(PropType::Torch.id()));
        assert_eq!(props.get(0, 0), Some(0));
    }

    #[test]
    fn test_right_corner_torch() {
        let raw = TileMap::try_from(vec![
            vec![1, 1, 1],
            vec![0, 1, 1],
            vec![0, 0, 1],
        ])
        .unwrap();
        let tiles = compute_tiles_mask(&raw).unwrap();
        let mut props = TileMap::new(3, 3, 0);
        props.set(1, 1, PropType::Bone.id());
        carve_torches(&tiles, &mut props);
        assert_eq!(props.get(1, 1), Some(PropType::Torch.id()));
    }
}
