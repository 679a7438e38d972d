//! Data-driven game balance
//!
//! Every speed, probability and threshold the simulation reads lives in one
//! immutable [`Tuning`] value handed to the session at construction.
//! Distances are pixels, speeds are pixels per frame.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to every enemy decision probability
    pub fn aggression(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 2.0,
        }
    }

    /// Multiplier applied to enemy patrol speed
    pub fn enemy_pace(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    pub fn starting_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => STARTING_LIVES,
            Difficulty::Hard => 2,
        }
    }
}

/// Game balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player movement ===
    pub move_speed: f32,
    pub ladder_speed: f32,
    /// Upward impulse handed to the physics collaborator on jump
    pub jump_speed: f32,
    pub gravity: f32,
    /// Jumps allowed before touching ground again (1 = no double jump)
    pub max_jumps: u32,

    // === Session ===
    pub starting_lives: u32,
    pub coin_value: u32,
    /// One bonus life each time the score reaches a multiple of this
    pub bonus_life_every: u32,
    /// Falling below this height costs a life
    pub death_depth: f32,

    // === Agents ===
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    /// Original visual scale of every agent
    pub agent_scale: f32,
    /// Downward displacement used by the on-platform probe
    pub contact_probe: f32,
    /// Raw animation advances per visible frame
    pub animation_divisor: u32,
    /// Per-frame multiplicative decay while sitting
    pub sit_shrink: f32,
    /// Sitting never shrinks below this fraction of the original scale
    pub sit_min_scale: f32,
    /// Per-frame multiplicative growth while jumping
    pub jump_grow: f32,

    // === Projectiles ===
    pub shot_speed: f32,
    pub shot_size: Vec2,
    pub shot_vertical_offset: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_fall_speed: f32,
    pub enemy_hop_speed: f32,
    pub enemy_reverse_chance: f32,
    pub enemy_hop_chance: f32,
    pub enemy_fire_chance: f32,
    /// Wall/edge bounce moves the enemy this many of its own steps
    pub wall_nudge_factor: f32,
    /// Friendly-fire respawn height above the camera, in viewport heights
    pub respawn_height_factor: f32,

    // === Camera ===
    pub camera_smoothing: f32,
    pub look_down_offset: f32,
    pub viewport: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            ladder_speed: 5.0,
            jump_speed: 20.0,
            gravity: 1.5,
            max_jumps: 1,

            starting_lives: STARTING_LIVES,
            coin_value: 10,
            bonus_life_every: 100,
            death_depth: -1000.0,

            player_size: Vec2::splat(TILE_SIZE * MAP_SCALE),
            enemy_size: Vec2::splat(TILE_SIZE * MAP_SCALE),
            agent_scale: 1.0,
            contact_probe: 2.0,
            animation_divisor: 20,
            sit_shrink: 0.97,
            sit_min_scale: 0.3,
            jump_grow: 1.03,

            shot_speed: 12.0,
            shot_size: Vec2::new(16.0, 6.0),
            shot_vertical_offset: 20.0,

            enemy_speed: 2.0,
            enemy_fall_speed: 5.0,
            enemy_hop_speed: 8.0,
            enemy_reverse_chance: 0.005,
            enemy_hop_chance: 0.005,
            enemy_fire_chance: 0.005,
            wall_nudge_factor: 10.0,
            respawn_height_factor: 2.0,

            camera_smoothing: 0.1,
            look_down_offset: 200.0,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }
}

impl Tuning {
    /// Default balance adjusted for a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let base = Self::default();
        let aggression = difficulty.aggression();
        Self {
            starting_lives: difficulty.starting_lives(),
            enemy_speed: base.enemy_speed * difficulty.enemy_pace(),
            enemy_reverse_chance: (base.enemy_reverse_chance * aggression).min(1.0),
            enemy_hop_chance: (base.enemy_hop_chance * aggression).min(1.0),
            enemy_fire_chance: (base.enemy_fire_chance * aggression).min(1.0),
            ..base
        }
    }

    /// Parse and validate a JSON tuning document (missing fields take defaults)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::TuningIo {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let chances = [
            ("enemy_reverse_chance", self.enemy_reverse_chance),
            ("enemy_hop_chance", self.enemy_hop_chance),
            ("enemy_fire_chance", self.enemy_fire_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidTuning(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.starting_lives == 0 {
            return Err(Error::InvalidTuning("starting_lives must be at least 1".into()));
        }
        if self.bonus_life_every == 0 {
            return Err(Error::InvalidTuning("bonus_life_every must be positive".into()));
        }
        if self.animation_divisor == 0 {
            return Err(Error::InvalidTuning("animation_divisor must be positive".into()));
        }
        for (name, size) in [
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("shot_size", self.shot_size),
            ("viewport", self.viewport),
        ] {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(Error::InvalidTuning(format!("{name} must be positive")));
            }
        }
        if !(0.0..=1.0).contains(&self.sit_min_scale) || !(0.0..=1.0).contains(&self.sit_shrink) {
            return Err(Error::InvalidTuning(
                "sit_shrink and sit_min_scale must be in [0, 1]".into(),
            ));
        }
        if self.jump_grow < 1.0 {
            return Err(Error::InvalidTuning("jump_grow must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.camera_smoothing) {
            return Err(Error::InvalidTuning("camera_smoothing must be in [0, 1]".into()));
        }
        Ok(())
    }
}
