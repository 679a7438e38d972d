//! Game state and core simulation types
//!
//! Everything that changes from frame to frame lives in [`GameState`]. The
//! collaborators (level provider, physics engine) are held by the session.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::agent::{Agent, AgentId, AnimationSet, Facing, Role};
use super::camera::Camera;
use super::geometry::{LevelGeometry, Rect};
use super::projectile::Projectile;
use crate::level::LevelData;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; waiting for a restart trigger
    GameOver,
    /// No further level exists; waiting for a restart trigger
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Notable things that happened during a frame, for audio and HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired { owner: AgentId },
    CoinCollected { score: u32 },
    BonusLife { lives: u32 },
    EnemyDestroyed { id: AgentId },
    EnemyRespawned { id: AgentId },
    PlayerDied { lives_left: u32 },
    LevelLoaded { index: u32 },
    LevelComplete { index: u32 },
    GameOver { level: u32 },
    Won { level: u32 },
    Restarted,
}

/// Frame tables for each role
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: Arc<AnimationSet>,
    pub enemy: Arc<AnimationSet>,
}

impl Sprites {
    pub fn new(player: AnimationSet, enemy: AnimationSet) -> Self {
        Self {
            player: Arc::new(player),
            enemy: Arc::new(enemy),
        }
    }
}

impl Default for Sprites {
    fn default() -> Self {
        Self::new(
            AnimationSet::with_prefix("player", 2),
            AnimationSet::with_prefix("enemy", 2),
        )
    }
}

/// Purely visual layers, passed through for the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenery {
    pub background: Vec<Rect>,
    pub foreground: Vec<Rect>,
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared random source for enemy decisions and respawns
    pub rng: Pcg32,
    /// 1-based index of the loaded level (0 before the first load)
    pub level_index: u32,
    /// Points collected on the current level
    pub score: u32,
    pub lives: u32,
    /// Reaching this x coordinate completes the level
    pub level_width: f32,
    pub phase: GamePhase,
    /// Frames simulated since the session started
    pub frame: u64,
    pub player: Agent,
    /// Live enemies (spawn order)
    pub enemies: Vec<Agent>,
    /// Live shots (spawn order)
    pub projectiles: Vec<Projectile>,
    pub coins: Vec<Rect>,
    pub geometry: LevelGeometry,
    pub scenery: Scenery,
    pub camera: Camera,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) tuning: Tuning,
    sprites: Sprites,
    next_id: u32,
}

impl GameState {
    /// Fresh session state with no level installed yet
    pub fn new(tuning: Tuning, sprites: Sprites, seed: u64) -> Self {
        let player = Agent::new(
            AgentId(1),
            Role::Player,
            Vec2::ZERO,
            tuning.player_size,
            tuning.agent_scale,
            Arc::clone(&sprites.player),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            score: 0,
            lives: tuning.starting_lives,
            level_width: 0.0,
            phase: GamePhase::Playing,
            frame: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            coins: Vec::new(),
            geometry: LevelGeometry::default(),
            scenery: Scenery::default(),
            camera: Camera::new(tuning.viewport),
            events: Vec::new(),
            tuning,
            sprites,
            next_id: 2,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Add an enemy at `center`, patrolling in a random direction
    pub fn spawn_enemy(&mut self, center: Vec2) -> AgentId {
        let id = AgentId(self.next_entity_id());
        let mut enemy = Agent::new(
            id,
            Role::Enemy,
            center,
            self.tuning.enemy_size,
            self.tuning.agent_scale,
            Arc::clone(&self.sprites.enemy),
        );
        let facing = if self.rng.random::<bool>() {
            Facing::Right
        } else {
            Facing::Left
        };
        enemy.facing = facing;
        enemy.body.velocity.x = facing.sign() * self.tuning.enemy_speed;
        self.enemies.push(enemy);
        id
    }

    /// Fire a shot from `shooter` (player or live enemy). Returns false if
    /// no such agent exists.
    pub fn shoot(&mut self, shooter: AgentId) -> bool {
        let id = self.next_entity_id();
        let agent = if self.player.id == shooter {
            Some(&self.player)
        } else {
            self.enemies.iter().find(|e| e.id == shooter)
        };
        let Some(agent) = agent else {
            return false;
        };
        let shot = Projectile::fired_by(id, agent, &self.tuning);
        log::trace!("Shot {id} fired by {shooter:?}");
        self.projectiles.push(shot);
        self.events.push(GameEvent::ShotFired { owner: shooter });
        true
    }

    /// Add points, granting one life per bonus threshold crossed.
    /// Returns the number of lives granted.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let every = self.tuning.bonus_life_every.max(1);
        let before = self.score / every;
        self.score = self.score.saturating_add(points);
        let granted = self.score / every - before;
        if granted > 0 {
            self.lives += granted;
            log::info!("Bonus life at score {} ({} lives)", self.score, self.lives);
            self.events.push(GameEvent::BonusLife { lives: self.lives });
        }
        granted
    }

    /// Replace all per-level state with `level`. Lives persist; score resets.
    pub fn install_level(&mut self, index: u32, level: &LevelData) {
        self.level_index = index;
        self.score = 0;
        self.level_width = level.pixel_width();
        self.geometry = level.geometry();
        self.coins = level.coins.clone();
        self.scenery = Scenery {
            background: level.background.clone(),
            foreground: level.foreground.clone(),
        };
        self.projectiles.clear();

        self.enemies.clear();
        for &spawn in &level.spawns.enemies {
            self.spawn_enemy(spawn);
        }

        self.player.respawn_at(level.spawns.player);
        self.player.facing = Facing::Right;
        let target = self.camera.target_for(self.player.position(), 0.0);
        self.camera.snap_to(target);

        log::info!(
            "Level {} loaded: width={}px, enemies={}, coins={}",
            index,
            self.level_width,
            self.enemies.len(),
            self.coins.len()
        );
        self.events.push(GameEvent::LevelLoaded { index });
    }

    /// Back to the state of a new run: fresh score, lives and random stream
    pub fn reset_session(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.level_index = 0;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.next_id = 2;
        self.enemies.clear();
        self.projectiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Tuning::default(), Sprites::default(), 42)
    }

    #[test]
    fn test_bonus_life_at_threshold() {
        let mut state = state();
        state.score = 90;
        let lives = state.lives;

        assert_eq!(state.add_score(10), 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.lives, lives + 1);

        // No second grant until the next multiple
        assert_eq!(state.add_score(10), 0);
        assert_eq!(state.lives, lives + 1);
    }

    #[test]
    fn test_shoot_from_player_and_unknown() {
        let mut state = state();
        let player = state.player.id;
        assert!(state.shoot(player));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].owner, player);
        assert!(!state.shoot(AgentId(999)));
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_enemy_spawn_patrols() {
        let mut state = state();
        let id = state.spawn_enemy(Vec2::new(100.0, 50.0));
        let enemy = &state.enemies[0];
        assert_eq!(enemy.id, id);
        assert_ne!(id, state.player.id);
        assert_eq!(enemy.body.velocity.x.abs(), state.tuning().enemy_speed);
        assert_eq!(enemy.facing.sign(), enemy.body.velocity.x.signum());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert_ne!(a, state.player.id.0);
    }
}
