//! Rectangular integer grids
//!
//! A `TileMap` is the storage for every layer of a dungeon and of a room
//! template. It serializes as a plain array of rows so it matches the JSON
//! produced and consumed by the editor.

use serde::{Deserialize, Serialize};

use crate::dungeon::Rectangle;

/// A `height × width` grid of signed integers, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl TileMap {
    /// Create a grid filled with `value`
    pub fn new(width: usize, height: usize, value: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at (x, y), or `None` when off the grid
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Value at signed coordinates, or `None` when off the grid
    pub fn get_signed(&self, x: i64, y: i64) -> Option<i32> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    /// Set the value at (x, y). Writes outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: i32) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Iterate over the rows of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        // chunks() panics on a zero chunk size
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Iterate over `(x, y, value)` for every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % self.width, i / self.width, v))
    }

    /// Copy of this grid with new dimensions.
    ///
    /// Cells inside both grids keep their value; new cells are zero.
    pub fn resized(&self, width: usize, height: usize) -> Self {
        let mut result = Self::new(width, height, 0);
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                result.set(x, y, self.cells[y * self.width + x]);
            }
        }
        result
    }

    /// Copy `layer` onto this grid with its top-left cell at (x, y).
    ///
    /// Later writes win. Cells that land outside the grid are dropped.
    pub fn stamp(&mut self, layer: &TileMap, x: i32, y: i32) {
        for (lx, ly, value) in layer.cells() {
            let px = i64::from(x) + lx as i64;
            let py = i64::from(y) + ly as i64;
            if px >= 0 && py >= 0 {
                self.set(px as usize, py as usize, value);
            }
        }
    }

    /// Set every cell covered by `rect` to `value`, clipped to the grid
    pub fn fill_rect(&mut self, rect: &Rectangle, value: i32) {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = (rect.right().max(0) as usize).min(self.width);
        let y1 = (rect.down().max(0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.width + x] = value;
            }
        }
    }
}

impl TryFrom<Vec<Vec<i32>>> for TileMap {
    type Error = String;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 && height > 0 {
            return Err(format!("{height} rows but no columns"));
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                ));
            }
            cells.extend(row);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

impl From<TileMap> for Vec<Vec<i32>> {
    fn from(map: TileMap) -> Self {
        map.rows().map(<[i32]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[i32]]) -> TileMap {
        TileMap::try_from(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_new_and_get() {
        let map = TileMap::new(3, 2, 1);
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.get(2, 1), Some(1));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.get(0, 2), None);
        assert_eq!(map.get_signed(-1, 0), None);
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let mut map = TileMap::new(2, 2, 0);
        map.set(5, 5, 9);
        assert!(map.cells().all(|(_, _, v)| v == 0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![0, 0], vec![0]];
        assert!(TileMap::try_from(rows).is_err());
    }

    #[test]
    fn test_rows_without_columns_rejected() {
        assert!(TileMap::try_from(vec![Vec::new()]).is_err());
        assert!(serde_json::from_str::<TileMap>("[[], []]").is_err());
        assert_eq!(serde_json::from_str::<TileMap>("[]").unwrap(), TileMap::new(0, 0, 0));
    }

    #[test]
    fn test_json_shape_is_array_of_rows() {
        let map = grid(&[&[1, 0, -1], &[2, 3, 4]]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[[1,0,-1],[2,3,4]]");
        let back: TileMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_resized_crops_and_pads() {
        let map = grid(&[&[1, 2], &[3, 4]]);
        let grown = map.resized(3, 1);
        assert_eq!(Vec::<Vec<i32>>::from(grown), vec![vec![1, 2, 0]]);
        let shrunk = map.resized(1, 3);
        assert_eq!(Vec::<Vec<i32>>::from(shrunk), vec![vec![1], vec![3], vec![0]]);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut map = TileMap::new(3, 3, 0);
        let layer = grid(&[&[5, 6], &[7, 8]]);
        map.stamp(&layer, 2, -1);
        assert_eq!(
            Vec::<Vec<i32>>::from(map),
            vec![vec![0, 0, 7], vec![0, 0, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn test_fill_rect_clips_and_ignores_empty() {
        let mut map = TileMap::new(4, 4, 1);
        map.fill_rect(&Rectangle::new(-1, 2, 3, 5), 0);
        map.fill_rect(&Rectangle::new(1, 1, 0, 3), 0);
        assert_eq!(
            Vec::<Vec<i32>>::from(map),
            vec![
                vec![1, 1, 1, 1],
                vec![1, 1, 1, 1],
                vec![0, 0, 1, 1],
                vec![0, 0, 1, 1],
            ]
        );
    }

    #[test]
    fn test_empty_map_round_trips() {
        let map = TileMap::new(0, 0, 0);
        assert_eq!(map.rows().count(), 0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[]");
    }
}
