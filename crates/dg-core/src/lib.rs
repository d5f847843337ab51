//! dg-core: template-driven dungeon generation
//!
//! Partitions a map into a binary tree of containers, joins siblings with
//! corridors, fills the leaves with author-made room templates and
//! rasterizes the result into auto-tiled tiles, props and monsters layers.
//!
//! This crate does no I/O apart from the catalog and parameter file helpers.

pub mod catalog;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod tiles;

mod rng;

pub use config::{DungeonArgs, DungeonParams};
pub use dungeon::{Dungeon, generate, generate_with_rng};
pub use error::GenerateError;
pub use rng::DungeonRng;
