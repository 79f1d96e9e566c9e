//! Tile map resource and data types.
//!
//! The [`TileMap`] is the host's grid: per-cell image key and wall flag. It
//! answers the queries the behavior layer needs (tiles by image, pixel/tile
//! conversion, wall tests, line of sight) and can be loaded from a JSON file
//! with the [`TileMapFile`] layout.
//!
//! # File format
//!
//! ```json
//! {
//!   "tile_size": 16,
//!   "map_width": 10,
//!   "map_height": 8,
//!   "tileset": ["floor", "wall", "spawn"],
//!   "walls": [1],
//!   "layers": [{ "name": "ground", "positions": [{ "x": 0, "y": 0, "id": 1 }] }]
//! }
//! ```
//!
//! Later layers overwrite earlier ones. Cells outside the map count as walls.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::sprite::Bounds;

/// Single tile placement within a layer.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Index into [`TileMapFile::tileset`].
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// On-disk tile map.
#[derive(Debug, Deserialize, Serialize)]
pub struct TileMapFile {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Image key for each tile id.
    pub tileset: Vec<String>,
    /// Tile ids that block movement.
    #[serde(default)]
    pub walls: Vec<u32>,
    pub layers: Vec<Tilelayer>,
}

/// Column/row of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileLocation {
    pub col: i32,
    pub row: i32,
}

impl TileLocation {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    pub tile_size: f32,
    pub width: u32,
    pub height: u32,
    tiles: Vec<Option<String>>,
    walls: Vec<bool>,
}

impl TileMap {
    /// Empty, wall-free map.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let cells = (width * height) as usize;
        Self {
            tile_size,
            width,
            height,
            tiles: vec![None; cells],
            walls: vec![false; cells],
        }
    }

    pub fn from_file_data(file: &TileMapFile) -> Result<Self, String> {
        let mut map = TileMap::new(file.map_width, file.map_height, file.tile_size as f32);
        for layer in &file.layers {
            for pos in &layer.positions {
                let image = file.tileset.get(pos.id as usize).ok_or_else(|| {
                    format!(
                        "Layer '{}' uses tile id {} outside the tileset",
                        layer.name, pos.id
                    )
                })?;
                let loc = TileLocation::new(pos.x as i32, pos.y as i32);
                if !map.set_tile_at(loc, Some(image.as_str())) {
                    return Err(format!(
                        "Layer '{}' places a tile at ({}, {}) outside the map",
                        layer.name, pos.x, pos.y
                    ));
                }
                map.set_wall_at(loc, file.walls.contains(&pos.id));
            }
        }
        Ok(map)
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let file: TileMapFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse tilemap JSON: {}", e))?;
        Self::from_file_data(&file)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tilemap {:?}: {}", path, e))?;
        let map = Self::from_json_str(&json)?;
        info!(
            "Loaded tilemap {:?}: {}x{} tiles of {}px",
            path, map.width, map.height, map.tile_size
        );
        Ok(map)
    }

    fn cell(&self, loc: TileLocation) -> Option<usize> {
        if loc.col < 0 || loc.row < 0 {
            return None;
        }
        let (col, row) = (loc.col as u32, loc.row as u32);
        (col < self.width && row < self.height).then(|| (row * self.width + col) as usize)
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    pub fn pixel_to_tile(&self, pixel: Vec2) -> TileLocation {
        TileLocation::new(
            (pixel.x / self.tile_size).floor() as i32,
            (pixel.y / self.tile_size).floor() as i32,
        )
    }

    /// Centre of `loc` in pixels.
    pub fn tile_to_pixel(&self, loc: TileLocation) -> Vec2 {
        Vec2::new(
            (loc.col as f32 + 0.5) * self.tile_size,
            (loc.row as f32 + 0.5) * self.tile_size,
        )
    }

    pub fn tile_at(&self, loc: TileLocation) -> Option<&str> {
        self.cell(loc).and_then(|i| self.tiles[i].as_deref())
    }

    /// Every cell showing `image`, row by row.
    pub fn tiles_by_type(&self, image: &str) -> Vec<TileLocation> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_deref() == Some(image))
            .map(|(i, _)| {
                let i = i as u32;
                TileLocation::new((i % self.width) as i32, (i / self.width) as i32)
            })
            .collect()
    }

    /// Replace the image at `loc`. Returns `false` outside the map.
    pub fn set_tile_at(&mut self, loc: TileLocation, image: Option<&str>) -> bool {
        match self.cell(loc) {
            Some(i) => {
                self.tiles[i] = image.map(str::to_string);
                true
            }
            None => false,
        }
    }

    pub fn set_wall_at(&mut self, loc: TileLocation, wall: bool) -> bool {
        match self.cell(loc) {
            Some(i) => {
                self.walls[i] = wall;
                true
            }
            None => false,
        }
    }

    /// Wall test; cells outside the map are walls.
    pub fn is_wall(&self, loc: TileLocation) -> bool {
        self.cell(loc).map(|i| self.walls[i]).unwrap_or(true)
    }

    /// True when any cell under `bounds` is a wall.
    pub fn overlaps_wall(&self, bounds: &Bounds) -> bool {
        // Shrink by a hair so a box resting exactly on a tile edge does not
        // count the neighbouring cell.
        const EDGE: f32 = 1e-3;
        let min = self.pixel_to_tile(Vec2::new(bounds.left + EDGE, bounds.top + EDGE));
        let max = self.pixel_to_tile(Vec2::new(bounds.right - EDGE, bounds.bottom - EDGE));
        for row in min.row..=max.row {
            for col in min.col..=max.col {
                if self.is_wall(TileLocation::new(col, row)) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the segment `from -> to` crosses no wall cell.
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let step = (self.tile_size * 0.25).max(1.0);
        let length = from.distance(to);
        let steps = (length / step).ceil().max(1.0) as u32;
        (0..=steps).all(|i| {
            let point = from.lerp(to, i as f32 / steps as f32);
            !self.is_wall(self.pixel_to_tile(point))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "tile_size": 16,
        "map_width": 4,
        "map_height": 3,
        "tileset": ["floor", "wall", "spawn"],
        "walls": [1],
        "layers": [
            { "name": "ground", "positions": [
                { "x": 0, "y": 0, "id": 0 }, { "x": 1, "y": 0, "id": 0 },
                { "x": 2, "y": 1, "id": 1 }, { "x": 3, "y": 2, "id": 2 }
            ] },
            { "name": "objects", "positions": [ { "x": 1, "y": 0, "id": 2 } ] }
        ]
    }"#;

    #[test]
    fn loads_layers_and_walls() {
        let map = TileMap::from_json_str(JSON).unwrap();
        assert_eq!(map.tile_at(TileLocation::new(0, 0)), Some("floor"));
        assert_eq!(map.tile_at(TileLocation::new(1, 0)), Some("spawn"));
        assert!(map.is_wall(TileLocation::new(2, 1)));
        assert!(!map.is_wall(TileLocation::new(0, 0)));
        assert_eq!(
            map.tiles_by_type("spawn"),
            vec![TileLocation::new(1, 0), TileLocation::new(3, 2)]
        );
    }

    #[test]
    fn rejects_unknown_tile_ids() {
        let json = r#"{ "tile_size": 8, "map_width": 1, "map_height": 1, "tileset": [],
            "layers": [{ "name": "l", "positions": [{ "x": 0, "y": 0, "id": 3 }] }] }"#;
        assert!(TileMap::from_json_str(json).is_err());
    }

    #[test]
    fn pixel_tile_round_trip() {
        let map = TileMap::new(10, 10, 16.0);
        let loc = map.pixel_to_tile(Vec2::new(33.0, 17.0));
        assert_eq!(loc, TileLocation::new(2, 1));
        assert_eq!(map.tile_to_pixel(loc), Vec2::new(40.0, 24.0));
    }

    #[test]
    fn outside_cells_are_walls() {
        let map = TileMap::new(2, 2, 16.0);
        assert!(map.is_wall(TileLocation::new(-1, 0)));
        assert!(map.is_wall(TileLocation::new(2, 0)));
        assert!(!map.is_wall(TileLocation::new(1, 1)));
    }

    #[test]
    fn overlap_ignores_touching_edges() {
        let mut map = TileMap::new(4, 4, 16.0);
        map.set_wall_at(TileLocation::new(2, 1), true);
        let touching = Bounds::from_center(Vec2::new(24.0, 24.0), Vec2::splat(16.0));
        assert!(!map.overlaps_wall(&touching));
        let inside = Bounds::from_center(Vec2::new(26.0, 24.0), Vec2::splat(16.0));
        assert!(map.overlaps_wall(&inside));
    }

    #[test]
    fn walls_block_line_of_sight() {
        let mut map = TileMap::new(8, 3, 16.0);
        let from = map.tile_to_pixel(TileLocation::new(0, 1));
        let to = map.tile_to_pixel(TileLocation::new(7, 1));
        assert!(map.line_of_sight(from, to));
        map.set_wall_at(TileLocation::new(4, 1), true);
        assert!(!map.line_of_sight(from, to));
        let above = map.tile_to_pixel(TileLocation::new(7, 0));
        assert!(map.line_of_sight(map.tile_to_pixel(TileLocation::new(0, 0)), above));
    }
}
