//! Corridor synthesis
//!
//! Every split node of the partition tree gets one straight corridor joining
//! the centers of its two child containers. Corridors follow container
//! geometry, not the rooms later placed inside the containers.

use serde::{Deserialize, Serialize};

use super::rect::Rectangle;
use super::tree::Container;

/// Orientation of a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// A straight rectangular passage carved as floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CorridorRecord", from = "CorridorRecord")]
pub struct Corridor {
    pub rect: Rectangle,
}

impl Corridor {
    pub fn new(rect: Rectangle) -> Self {
        Self { rect }
    }

    /// `Horizontal` when wider than tall, otherwise `Vertical`
    pub fn direction(&self) -> Direction {
        if self.rect.width > self.rect.height {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CorridorRecord {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    direction: Direction,
}

impl From<Corridor> for CorridorRecord {
    fn from(corridor: Corridor) -> Self {
        let Rectangle {
            x,
            y,
            width,
            height,
        } = corridor.rect;
        Self {
            x,
            y,
            width,
            height,
            direction: corridor.direction(),
        }
    }
}

impl From<CorridorRecord> for Corridor {
    fn from(record: CorridorRecord) -> Self {
        Corridor::new(Rectangle::new(
            record.x,
            record.y,
            record.width,
            record.height,
        ))
    }
}

/// Join the centers of two sibling containers.
///
/// Centers are rounded up to whole cells. When they share a column the
/// corridor runs vertically, otherwise horizontally along the row of the
/// left center. The run covers both centers inclusively and is
/// `corridor_width` cells thick, offset by half its width. Coincident
/// centers yield an empty corridor.
pub fn make_corridor(left: &Container, right: &Container, corridor_width: i32) -> Corridor {
    let from = left.rect.center();
    let to = right.rect.center();
    let (fx, fy) = (from.x.ceil() as i32, from.y.ceil() as i32);
    let (tx, ty) = (to.x.ceil() as i32, to.y.ceil() as i32);
    let half = (f64::from(corridor_width) / 2.0).ceil() as i32;

    let rect = if fx == tx {
        let span = (ty - fy).abs();
        let height = if span == 0 { 0 } else { span.saturating_add(corridor_width) };
        Rectangle::new(fx - half, fy.min(ty) - half, corridor_width, height)
    } else {
        let span = (tx - fx).abs();
        Rectangle::new(
            fx.min(tx) - half,
            fy - half,
            span.saturating_add(corridor_width),
            corridor_width,
        )
    };

    Corridor::new(rect)
}
