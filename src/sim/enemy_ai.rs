//! Enemy decision policy
//!
//! Each enemy patrols horizontally, turns around at walls and ledges, and
//! occasionally reverses, hops or fires. Every probabilistic choice takes
//! its own draw from the injected random source.

use rand::Rng;

use super::agent::Agent;
use crate::tuning::Tuning;

/// Intent produced for one enemy this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyIntent {
    /// Fire a shot in the facing direction
    pub fire: bool,
    /// Direction was reversed this frame
    pub reversed: bool,
}

#[inline]
fn roll<R: Rng>(rng: &mut R, chance: f32) -> bool {
    rng.random::<f32>() < chance
}

/// Choose velocity and attack intent from this frame's contact flags
pub fn decide<R: Rng>(enemy: &mut Agent, tuning: &Tuning, rng: &mut R) -> EnemyIntent {
    let contacts = enemy.contacts;
    let mut intent = EnemyIntent::default();

    if contacts.collided_with_solid || !contacts.on_platform {
        // Bounce off walls and ledges, stepping clear so we don't stick
        enemy.body.velocity.x = -enemy.body.velocity.x;
        enemy.body.bounds.center.x += enemy.body.velocity.x * tuning.wall_nudge_factor;
        intent.reversed = true;
    } else if roll(rng, tuning.enemy_reverse_chance) {
        enemy.body.velocity.x = -enemy.body.velocity.x;
        intent.reversed = true;
    }

    enemy.body.velocity.y = if !contacts.on_platform {
        -tuning.enemy_fall_speed
    } else if roll(rng, tuning.enemy_hop_chance) {
        tuning.enemy_hop_speed
    } else {
        0.0
    };

    intent.fire = roll(rng, tuning.enemy_fire_chance);
    intent
}
