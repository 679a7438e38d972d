//! Suzy - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (agents, contacts, projectiles, enemy AI, session flow)
//! - `level`: Level/geometry provider boundary
//! - `input`: Press/release events folded into per-frame input
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use level::{InMemoryLevels, JsonLevelDir, LevelData, LevelProvider};
pub use tuning::{Difficulty, Tuning};

/// Fixed defaults the tuning layer starts from
pub mod consts {
    /// Frame callback cadence of the host scheduler
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Window size
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Tile maps are authored at 128px tiles and loaded at half scale
    pub const TILE_SIZE: f32 = 128.0;
    pub const MAP_SCALE: f32 = 0.5;

    pub const STARTING_LIVES: u32 = 3;

    /// Seed used by the native runner when none is given
    pub const DEFAULT_SEED: u64 = 0x5a2f_c0ff_ee00_1234;
}
