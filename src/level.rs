//! Level/geometry provider boundary
//!
//! Levels are addressed by a 1-based index and named `level_{N}`. A provider
//! answers `Ok(None)` when a level does not exist: running past the last
//! level is how a playthrough is won, not a failure.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAP_SCALE, TILE_SIZE};
use crate::error::{Error, Result};
use crate::sim::geometry::{LevelGeometry, Platform, Rect};

/// Spawn points declared by a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawns {
    pub player: Vec2,
    #[serde(default)]
    pub enemies: Vec<Vec2>,
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

fn default_scale() -> f32 {
    MAP_SCALE
}

/// One level's named collections, in scaled pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    /// Map width in tiles
    pub width_tiles: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub walls: Vec<Rect>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub ladders: Vec<Rect>,
    #[serde(default)]
    pub coins: Vec<Rect>,
    #[serde(default)]
    pub background: Vec<Rect>,
    #[serde(default)]
    pub foreground: Vec<Rect>,
    pub spawns: Spawns,
}

impl LevelData {
    /// Conventional resource name for a level index
    pub fn resource_name(index: u32) -> String {
        format!("level_{index}")
    }

    /// Total map width in pixels; the level-complete threshold
    pub fn pixel_width(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size * self.scale
    }

    pub fn geometry(&self) -> LevelGeometry {
        LevelGeometry {
            walls: self.walls.clone(),
            platforms: self.platforms.clone(),
            ladders: self.ladders.clone(),
        }
    }

    pub fn from_json_str(index: u32, json: &str) -> Result<Self> {
        let level: Self =
            serde_json::from_str(json).map_err(|source| Error::LevelParse { index, source })?;
        level.validate(index)?;
        Ok(level)
    }

    /// Reject levels the simulation cannot run
    pub fn validate(&self, index: u32) -> Result<()> {
        let width = self.pixel_width();
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidLevel {
                index,
                reason: format!("pixel width must be positive, got {width}"),
            });
        }
        if !self.spawns.player.is_finite() {
            return Err(Error::InvalidLevel {
                index,
                reason: "player spawn is not finite".into(),
            });
        }
        if self.spawns.enemies.iter().any(|s| !s.is_finite()) {
            return Err(Error::InvalidLevel {
                index,
                reason: "enemy spawn is not finite".into(),
            });
        }
        Ok(())
    }
}

/// Source of level data
pub trait LevelProvider {
    /// Resolve level `index`; `Ok(None)` when it does not exist
    fn load(&mut self, index: u32) -> Result<Option<LevelData>>;
}

/// Levels held in memory, index 1 first
#[derive(Debug, Clone, Default)]
pub struct InMemoryLevels {
    levels: Vec<LevelData>,
}

impl InMemoryLevels {
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelProvider for InMemoryLevels {
    fn load(&mut self, index: u32) -> Result<Option<LevelData>> {
        let Some(slot) = (index as usize).checked_sub(1) else {
            return Ok(None);
        };
        Ok(self.levels.get(slot).cloned())
    }
}

/// Directory of `level_{N}.json` files
#[derive(Debug, Clone)]
pub struct JsonLevelDir {
    root: PathBuf,
}

impl JsonLevelDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, index: u32) -> PathBuf {
        self.root
            .join(LevelData::resource_name(index))
            .with_extension("json")
    }
}

impl LevelProvider for JsonLevelDir {
    fn load(&mut self, index: u32) -> Result<Option<LevelData>> {
        let path = self.path_for(index);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No level file at {}", path.display());
                return Ok(None);
            }
            Err(source) => return Err(Error::LevelIo { index, path, source }),
        };
        LevelData::from_json_str(index, &json).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_JSON: &str = r#"{
        "name": "meadow",
        "width_tiles": 40,
        "walls": [ { "center": [10.0, 32.0], "size": [20.0, 64.0] } ],
        "platforms": [
            { "rect": { "center": [1280.0, -32.0], "size": [2560.0, 64.0] } },
            { "rect": { "center": [600.0, 200.0], "size": [128.0, 16.0] },
              "velocity": [2.0, 0.0], "boundary_left": 500.0, "boundary_right": 800.0 }
        ],
        "coins": [ { "center": [300.0, 32.0], "size": [32.0, 32.0] } ],
        "spawns": { "player": [64.0, 32.0], "enemies": [[900.0, 32.0]] }
    }"#;

    #[test]
    fn test_parse_level() {
        let level = LevelData::from_json_str(1, LEVEL_JSON).unwrap();
        assert_eq!(level.name, "meadow");
        assert_eq!(level.pixel_width(), 40.0 * 128.0 * 0.5);
        assert_eq!(level.platforms.len(), 2);
        assert_eq!(level.platforms[1].boundary_right, Some(800.0));
        assert_eq!(level.platforms[0].velocity, Vec2::ZERO);
        assert_eq!(level.spawns.enemies, vec![Vec2::new(900.0, 32.0)]);
        assert!(level.ladders.is_empty());
    }

    #[test]
    fn test_zero_width_is_invalid() {
        let json = r#"{ "width_tiles": 0, "spawns": { "player": [0.0, 0.0] } }"#;
        let err = LevelData::from_json_str(3, json).unwrap_err();
        assert!(matches!(err, Error::InvalidLevel { index: 3, .. }));
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let err = LevelData::from_json_str(2, "{").unwrap_err();
        assert!(matches!(err, Error::LevelParse { index: 2, .. }));
    }

    #[test]
    fn test_in_memory_absence() {
        let level = LevelData::from_json_str(1, LEVEL_JSON).unwrap();
        let mut levels = InMemoryLevels::new(vec![level]);
        assert!(levels.load(1).unwrap().is_some());
        assert!(levels.load(2).unwrap().is_none());
        assert!(levels.load(0).unwrap().is_none());
    }

    #[test]
    fn test_bundled_levels_parse() {
        let mut levels = JsonLevelDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/levels"));
        let first = levels.load(1).unwrap().unwrap();
        let second = levels.load(2).unwrap().unwrap();
        assert!(second.pixel_width() > first.pixel_width());
        assert!(!first.spawns.enemies.is_empty());
        assert!(levels.load(3).unwrap().is_none());
    }

    #[test]
    fn test_json_dir_naming_and_absence() {
        let dir = std::env::temp_dir().join(format!("suzy-levels-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("level_1.json"), LEVEL_JSON).unwrap();

        let mut levels = JsonLevelDir::new(&dir);
        assert_eq!(levels.path_for(7), dir.join("level_7.json"));
        assert!(levels.load(1).unwrap().is_some());
        assert!(levels.load(2).unwrap().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
