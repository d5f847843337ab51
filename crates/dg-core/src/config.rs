//! Generation parameters
//!
//! `DungeonParams` holds the numeric knobs of a generation run and
//! `DungeonArgs` bundles them with the room template catalog. Both use the
//! camelCase JSON field names of the editor's interchange format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dungeon::{Rectangle, RoomTemplate};
use crate::error::GenerateError;

/// Largest accepted map side, in cells
pub const MAX_MAP_SIZE: i32 = 4096;

/// Numeric parameters of a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DungeonParams {
    /// Width of the map in cells
    pub map_width: i32,
    /// Height of the map in cells
    pub map_height: i32,
    /// Margin kept solid around the partitioned region
    pub map_gutter_width: i32,
    /// Partition recursion depth
    pub iterations: u32,
    /// Maximum attempts to split one container
    pub container_split_retries: u32,
    /// Minimum aspect ratio of a split child along the cut axis
    pub container_minimum_ratio: f64,
    /// Containers at most twice this size on either side are not split
    pub container_minimum_size: i32,
    /// Thickness of corridors
    pub corridor_width: i32,
    /// Optional seed; the same seed and inputs reproduce the same dungeon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Default for DungeonParams {
    fn default() -> Self {
        Self {
            map_width: 96,
            map_height: 56,
            map_gutter_width: 1,
            iterations: 5,
            container_split_retries: 20,
            container_minimum_ratio: 0.45,
            container_minimum_size: 4,
            corridor_width: 2,
            seed: None,
        }
    }
}

impl DungeonParams {
    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ParamsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse parameters from JSON. Missing fields take their defaults.
    pub fn from_json_str(contents: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Check that the parameters describe a usable map
    pub fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |msg: String| Err(GenerateError::InvalidParams(msg));

        if self.map_width <= 0 || self.map_height <= 0 {
            return invalid(format!(
                "map size {}x{} must be positive",
                self.map_width, self.map_height
            ));
        }
        if self.map_width > MAX_MAP_SIZE || self.map_height > MAX_MAP_SIZE {
            return invalid(format!(
                "map size {}x{} exceeds {MAX_MAP_SIZE}x{MAX_MAP_SIZE}",
                self.map_width, self.map_height
            ));
        }
        if self.map_gutter_width < 0 {
            return invalid(format!(
                "mapGutterWidth {} must not be negative",
                self.map_gutter_width
            ));
        }
        if self.root_region().is_empty() {
            return invalid(format!(
                "mapGutterWidth {} leaves no room inside a {}x{} map",
                self.map_gutter_width, self.map_width, self.map_height
            ));
        }
        if !self.container_minimum_ratio.is_finite() || self.container_minimum_ratio < 0.0 {
            return invalid(format!(
                "containerMinimumRatio {} must be a finite non-negative number",
                self.container_minimum_ratio
            ));
        }
        if self.container_minimum_size < 0
            || self.container_minimum_size > self.map_width.max(self.map_height)
        {
            return invalid(format!(
                "containerMinimumSize {} must be between 0 and the larger map side",
                self.container_minimum_size
            ));
        }
        if self.corridor_width <= 0 || self.corridor_width > self.map_width.min(self.map_height) {
            return invalid(format!(
                "corridorWidth {} must be between 1 and the smaller map side",
                self.corridor_width
            ));
        }
        Ok(())
    }

    /// The region that gets partitioned: the map minus its gutter
    pub fn root_region(&self) -> Rectangle {
        let gutter = self.map_gutter_width;
        let margin = gutter.saturating_mul(2);
        Rectangle::new(
            gutter,
            gutter,
            self.map_width.saturating_sub(margin),
            self.map_height.saturating_sub(margin),
        )
    }

    /// Seed text, if one was given and is not empty
    pub fn seed_text(&self) -> Option<&str> {
        self.seed.as_deref().filter(|seed| !seed.is_empty())
    }
}

/// Everything a generation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonArgs {
    /// Room template catalog
    pub rooms: Vec<RoomTemplate>,
    #[serde(flatten)]
    pub params: DungeonParams,
}

impl DungeonArgs {
    pub fn new(rooms: Vec<RoomTemplate>, params: DungeonParams) -> Self {
        Self { rooms, params }
    }
}

/// Parameter file errors
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
