//! Dungeon generation
//!
//! Runs the whole pipeline for one set of arguments: partition the map,
//! connect siblings with corridors, place room templates, then rasterize the
//! tiles, props and monsters layers.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::DungeonArgs;
use crate::error::GenerateError;
use crate::rng::DungeonRng;
use crate::tiles::{TileLayer, TileMap, composite_monsters, composite_props, composite_tiles};

use super::assign::assign_rooms;
use super::room::RoomTemplate;
use super::tree::{Container, PartitionTree, build_tree};

/// The three map-sized layers of a generated dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayers {
    pub tiles: TileMap,
    pub props: TileMap,
    pub monsters: TileMap,
}

impl DungeonLayers {
    pub fn get(&self, layer: TileLayer) -> &TileMap {
        match layer {
            TileLayer::Tiles => &self.tiles,
            TileLayer::Props => &self.props,
            TileLayer::Monsters => &self.monsters,
        }
    }
}

/// A generated dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    pub tree: PartitionTree,
    pub layers: DungeonLayers,
}

/// Generate a dungeon, seeding from `args.params.seed` or from entropy
pub fn generate(args: &DungeonArgs) -> Result<Dungeon, GenerateError> {
    let mut rng = match args.params.seed_text() {
        Some(seed) => DungeonRng::from_seed_str(seed),
        None => DungeonRng::from_entropy(),
    };
    generate_with_rng(args, &mut rng)
}

/// Generate a dungeon drawing every random decision from `rng`
pub fn generate_with_rng(
    args: &DungeonArgs,
    rng: &mut DungeonRng,
) -> Result<Dungeon, GenerateError> {
    let start = Instant::now();
    let params = &args.params;

    params.validate()?;
    for template in &args.rooms {
        template.validate()?;
    }
    let templates: Vec<Arc<RoomTemplate>> = args.rooms.iter().cloned().map(Arc::new).collect();

    let root = Container::new(params.root_region());
    let mut tree = build_tree(root, params.iterations, params, rng);

    let report = assign_rooms(&mut tree, &templates, rng)?;
    debug!(
        "Placed {} rooms in {} leaves: {:?}",
        report.total_placed(),
        tree.leaves().len(),
        report.outcomes
    );

    let width = params.map_width as usize;
    let height = params.map_height as usize;
    let tiles = composite_tiles(&tree, width, height)?;
    let props = composite_props(&tree, &tiles, width, height);
    let monsters = composite_monsters(&tree, width, height);

    info!(
        "Dungeon generated in {}ms (seed {})",
        start.elapsed().as_millis(),
        rng.seed()
    );

    Ok(Dungeon {
        width: params.map_width,
        height: params.map_height,
        tree,
        layers: DungeonLayers {
            tiles,
            props,
            monsters,
        },
    })
}
