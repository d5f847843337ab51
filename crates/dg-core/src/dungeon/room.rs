//! Room templates and placed rooms
//!
//! A `RoomTemplate` is an author-made blueprint of fixed size with three
//! parallel layers (tiles, props, monsters). Generation never mutates a
//! template; a placed `Room` shares it through an `Arc` and only adds a
//! position.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::GenerateError;
use crate::tiles::TileMap;

use super::rect::Rectangle;

/// Logical purpose of a room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoomType {
    Entrance,
    Monsters,
    Heal,
    Treasure,
    MiniBoss,
    Boss,
}

/// The three parallel layers of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLayers {
    pub tiles: TileMap,
    pub props: TileMap,
    pub monsters: TileMap,
}

impl TemplateLayers {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            tiles: TileMap::new(width, height, 0),
            props: TileMap::new(width, height, 0),
            monsters: TileMap::new(width, height, 0),
        }
    }
}

/// Author-provided room blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub width: i32,
    pub height: i32,
    pub layers: TemplateLayers,
}

impl RoomTemplate {
    /// An all-floor template with empty prop and monster layers
    pub fn blank(id: impl Into<String>, room_type: RoomType, width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0) as usize, height.max(0) as usize);
        Self {
            id: id.into(),
            room_type,
            width,
            height,
            layers: TemplateLayers::blank(w, h),
        }
    }

    /// Copy of this template with every layer resized.
    ///
    /// Existing cells are kept where they still fit; new cells are zero.
    pub fn resized(&self, width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0) as usize, height.max(0) as usize);
        Self {
            id: self.id.clone(),
            room_type: self.room_type,
            width,
            height,
            layers: TemplateLayers {
                tiles: self.layers.tiles.resized(w, h),
                props: self.layers.props.resized(w, h),
                monsters: self.layers.monsters.resized(w, h),
            },
        }
    }

    /// Check that the declared size is positive and matches every layer
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(self.invalid(format!(
                "size {}x{} must be positive",
                self.width, self.height
            )));
        }

        let layers = [
            ("tiles", &self.layers.tiles),
            ("props", &self.layers.props),
            ("monsters", &self.layers.monsters),
        ];
        for (name, layer) in layers {
            if layer.width() != self.width as usize || layer.height() != self.height as usize {
                return Err(self.invalid(format!(
                    "{} layer is {}x{}, expected {}x{}",
                    name,
                    layer.width(),
                    layer.height(),
                    self.width,
                    self.height
                )));
            }
        }
        Ok(())
    }

    /// True when the template fits inside `rect`
    pub fn fits_in(&self, rect: &Rectangle) -> bool {
        self.width <= rect.width && self.height <= rect.height
    }

    fn invalid(&self, reason: String) -> GenerateError {
        GenerateError::InvalidTemplate {
            id: self.id.clone(),
            reason,
        }
    }
}

/// A template instantiated at a position inside a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RoomRecord", from = "RoomRecord")]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub id: String,
    pub template: Arc<RoomTemplate>,
}

impl Room {
    /// Place `template` with its top-left cell at (x, y)
    pub fn new(x: i32, y: i32, template: Arc<RoomTemplate>) -> Self {
        Self {
            x,
            y,
            id: template.id.clone(),
            template,
        }
    }

    pub fn width(&self) -> i32 {
        self.template.width
    }

    pub fn height(&self) -> i32 {
        self.template.height
    }

    pub fn room_type(&self) -> RoomType {
        self.template.room_type
    }

    /// Footprint of the room on the map
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width(), self.height())
    }
}

/// Interchange shape of a room: the footprint is written out in full
#[derive(Serialize, Deserialize)]
struct RoomRecord {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    id: String,
    template: Arc<RoomTemplate>,
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        Self {
            x: room.x,
            y: room.y,
            width: room.width(),
            height: room.height(),
            id: room.id,
            template: room.template,
        }
    }
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            id: record.id,
            template: record.template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_room_type_names() {
        let names: Vec<String> = RoomType::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            ["entrance", "monsters", "heal", "treasure", "mini-boss", "boss"]
        );
        let parsed: RoomType = serde_json::from_str("\"mini-boss\"").unwrap();
        assert_eq!(parsed, RoomType::MiniBoss);
    }

    #[test]
    fn test_template_json_shape() {
        let json = r#"{
            "id": "hall",
            "type": "heal",
            "width": 2,
            "height": 1,
            "layers": {
                "tiles": [[0, 1]],
                "props": [[0, 16]],
                "monsters": [[0, 0]]
            }
        }"#;
        let template: RoomTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.room_type, RoomType::Heal);
        assert_eq!(template.layers.props.get(1, 0), Some(16));
        assert!(template.validate().is_ok());

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["type"], "heal");
        assert_eq!(value["layers"]["tiles"], serde_json::json!([[0, 1]]));
    }

    #[test]
    fn test_validate_rejects_mismatched_layer() {
        let mut template = RoomTemplate::blank("t", RoomType::Boss, 3, 2);
        template.layers.props = TileMap::new(3, 3, 0);
        let err = template.validate().unwrap_err();
        assert!(matches!(err, GenerateError::InvalidTemplate { ref id, .. } if id == "t"));
    }

    #[test]
    fn test_validate_rejects_empty_size() {
        let template = RoomTemplate::blank("t", RoomType::Boss, 0, 2);
        assert!(template.validate().is_err());
    }

    #[test]
    fn test_resized_keeps_content() {
        let mut template = RoomTemplate::blank("t", RoomType::Treasure, 2, 2);
        template.layers.tiles.set(1, 1, 1);
        let bigger = template.resized(4, 3);
        assert!(bigger.validate().is_ok());
        assert_eq!(bigger.layers.tiles.get(1, 1), Some(1));
        assert_eq!(bigger.layers.tiles.get(3, 2), Some(0));
    }

    #[test]
    fn test_room_json_has_derived_size() {
        let template = Arc::new(RoomTemplate::blank("small", RoomType::Entrance, 3, 2));
        let room = Room::new(4, 5, Arc::clone(&template));
        let value = serde_json::to_value(&room).unwrap();
        assert_eq!(value["width"], 3);
        assert_eq!(value["height"], 2);
        assert_eq!(value["id"], "small");

        let back: Room = serde_json::from_value(value).unwrap();
        assert_eq!(back, room);
        assert_eq!(back.rect(), Rectangle::new(4, 5, 3, 2));
    }

    #[test]
    fn test_fits_in() {
        let template = RoomTemplate::blank("t", RoomType::Monsters, 4, 6);
        assert!(template.fits_in(&Rectangle::new(0, 0, 4, 6)));
        assert!(!template.fits_in(&Rectangle::new(0, 0, 3, 10)));
    }
}
