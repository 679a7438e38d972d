//! Projectiles: spawning, bounds culling and hit resolution
//!
//! A shot remembers who fired it only as an [`AgentId`] so friend/foe can be
//! told apart after the shooter has been destroyed or relocated.

use glam::Vec2;
use rand::Rng;

use super::agent::{Agent, AgentId};
use super::geometry::{LevelGeometry, Rect};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub owner: AgentId,
    pub bounds: Rect,
    pub velocity: Vec2,
}

impl Projectile {
    /// Spawn a shot ahead of `shooter` in the direction it faces
    pub fn fired_by(id: u32, shooter: &Agent, tuning: &Tuning) -> Self {
        let dir = shooter.facing.sign();
        let offset = Vec2::new(
            dir * (shooter.bounds().size.x + tuning.shot_size.x / 2.0),
            tuning.shot_vertical_offset,
        );
        Self {
            id,
            owner: shooter.id,
            bounds: Rect::new(shooter.position() + offset, tuning.shot_size),
            velocity: Vec2::new(dir * tuning.shot_speed, 0.0),
        }
    }

    /// Per-entity motion step
    #[inline]
    pub fn advance(&mut self) {
        self.bounds.center += self.velocity;
    }
}

/// Where friendly-fire victims reappear
#[derive(Debug, Clone, Copy)]
pub struct RespawnArea {
    /// Height the victim is moved to, above the visible area
    pub y: f32,
    /// Horizontal displacement range (viewport width)
    pub spread: f32,
}

/// What happened to the shot collection this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    pub player_hit: bool,
    /// Enemies removed by player fire
    pub destroyed: Vec<AgentId>,
    /// Enemies relocated by enemy fire
    pub respawned: Vec<AgentId>,
    /// Shots that left the level
    pub culled: usize,
    /// Shots removed on a hit
    pub spent: usize,
}

/// Cull and resolve every live shot.
///
/// Shots are taken out of `shots` and only survivors are pushed back, so each
/// removal happens exactly once and later shots see enemies removed by
/// earlier ones.
pub fn resolve_projectiles<R: Rng>(
    shots: &mut Vec<Projectile>,
    player: &Agent,
    enemies: &mut Vec<Agent>,
    geometry: &LevelGeometry,
    level_width: f32,
    respawn: RespawnArea,
    rng: &mut R,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    let live = std::mem::take(shots);

    for shot in live {
        if shot.bounds.outside_span(0.0, level_width) {
            report.culled += 1;
            continue;
        }

        let hits_player = shot.bounds.overlaps(player.bounds());
        let struck: Vec<AgentId> = enemies
            .iter()
            .filter(|e| shot.bounds.overlaps(e.bounds()))
            .map(|e| e.id)
            .collect();
        let hits_geometry = geometry.overlaps_solid(&shot.bounds);

        if !hits_player && struck.is_empty() && !hits_geometry {
            shots.push(shot);
            continue;
        }

        // Shot is gone before any target is processed
        report.spent += 1;
        let from_player = shot.owner == player.id;

        for id in struck {
            if from_player {
                enemies.retain(|e| e.id != id);
                log::debug!("Enemy {:?} destroyed by shot {}", id, shot.id);
                report.destroyed.push(id);
            } else if let Some(enemy) = enemies.iter_mut().find(|e| e.id == id) {
                let dx = (rng.random::<f32>() - 0.5) * respawn.spread;
                enemy.body.bounds.center = Vec2::new(enemy.position().x + dx, respawn.y);
                log::debug!("Enemy {:?} respawned by friendly fire", id);
                report.respawned.push(id);
            }
        }

        if hits_player {
            report.player_hit = true;
        }
    }

    report
}
