//! Fixed-cadence simulation tick
//!
//! Advances one frame in a strict order: input, physics, level-complete
//! check, camera, contacts and state machine, animation, per-entity motion,
//! fall check, pickups and enemy contact, projectiles, enemy decisions.
//! Transitions that need the level provider (advance, death, restart) are
//! reported back to the session instead of performed here.

use super::contact::classify;
use super::enemy_ai;
use super::physics::PhysicsEngine;
use super::projectile::{RespawnArea, resolve_projectiles};
use super::state::{GameEvent, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb up (ladders only)
    pub up: bool,
    /// Climb down (ladders only)
    pub down: bool,
    /// Jump pressed this frame
    pub jump: bool,
    /// Sit / look down held
    pub sit: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Any key or pointer action this frame (restarts from terminal screens)
    pub restart: bool,
}

/// What the session has to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing beyond the frame itself
    Continue,
    /// Player reached the level width
    LevelComplete,
    /// Player fell out of the level, touched an enemy or was shot
    PlayerDied,
    /// Restart requested from a terminal phase
    Restart,
    /// Terminal phase, nothing simulated
    Halted,
}

/// Advance the game state by one frame
pub fn tick<P: PhysicsEngine + ?Sized>(
    state: &mut GameState,
    physics: &mut P,
    input: &TickInput,
) -> TickOutcome {
    if state.phase.is_terminal() {
        return if input.restart {
            TickOutcome::Restart
        } else {
            TickOutcome::Halted
        };
    }

    state.frame += 1;
    apply_input(state, physics, input);

    physics.integrate(&mut state.player.body, &state.geometry);

    if state.player.position().x >= state.level_width {
        log::info!("Level {} complete", state.level_index);
        state.events.push(GameEvent::LevelComplete {
            index: state.level_index,
        });
        return TickOutcome::LevelComplete;
    }

    let look_down = if input.sit {
        state.tuning.look_down_offset
    } else {
        0.0
    };
    let target = state.camera.target_for(state.player.position(), look_down);
    state.camera.follow(target, state.tuning.camera_smoothing);

    let probe = state.tuning.contact_probe;
    state.player.contacts = classify(state.player.bounds(), &state.geometry, probe);
    state.player.update_state(&state.tuning);
    for enemy in &mut state.enemies {
        enemy.contacts = classify(enemy.bounds(), &state.geometry, probe);
        enemy.update_state(&state.tuning);
    }

    state.player.advance_animation();
    for enemy in &mut state.enemies {
        enemy.advance_animation();
    }

    state.geometry.advance_platforms();
    for enemy in &mut state.enemies {
        enemy.body.bounds.center += enemy.body.velocity;
    }
    for shot in &mut state.projectiles {
        shot.advance();
    }

    if state.player.position().y < state.tuning.death_depth {
        log::info!("Player fell out of level {}", state.level_index);
        return TickOutcome::PlayerDied;
    }

    collect_coins(state);

    let player_bounds = *state.player.bounds();
    if state.enemies.iter().any(|e| e.bounds().overlaps(&player_bounds)) {
        log::info!("Player caught by an enemy");
        return TickOutcome::PlayerDied;
    }

    let respawn = RespawnArea {
        y: state.camera.top() + state.tuning.viewport.y * state.tuning.respawn_height_factor,
        spread: state.tuning.viewport.x,
    };
    let report = resolve_projectiles(
        &mut state.projectiles,
        &state.player,
        &mut state.enemies,
        &state.geometry,
        state.level_width,
        respawn,
        &mut state.rng,
    );
    state.events.extend(
        report
            .destroyed
            .iter()
            .map(|&id| GameEvent::EnemyDestroyed { id }),
    );
    state.events.extend(
        report
            .respawned
            .iter()
            .map(|&id| GameEvent::EnemyRespawned { id }),
    );
    if report.player_hit {
        log::info!("Player shot");
        return TickOutcome::PlayerDied;
    }

    run_enemy_policy(state);

    TickOutcome::Continue
}

/// Map held keys and edges onto the player before physics runs
fn apply_input<P: PhysicsEngine + ?Sized>(
    state: &mut GameState,
    physics: &mut P,
    input: &TickInput,
) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.body.velocity.x = match (input.left, input.right) {
        (true, false) => -tuning.move_speed,
        (false, true) => tuning.move_speed,
        _ => 0.0,
    };

    if state.geometry.overlaps_ladder(player.bounds()) {
        player.body.velocity.y = match (input.up, input.down) {
            (true, false) => tuning.ladder_speed,
            (false, true) => -tuning.ladder_speed,
            _ => 0.0,
        };
    }

    player.sitting = input.sit;

    if input.jump && physics.can_jump(&player.body, &state.geometry) {
        physics.jump(&mut player.body, tuning.jump_speed);
    }

    if input.fire {
        let id = state.player.id;
        state.shoot(id);
    }
}

/// Remove touched coins and award their points
fn collect_coins(state: &mut GameState) {
    let player_bounds = *state.player.bounds();
    let before = state.coins.len();
    state.coins.retain(|coin| !coin.overlaps(&player_bounds));
    let collected = before - state.coins.len();

    for _ in 0..collected {
        state.add_score(state.tuning.coin_value);
        state.events.push(GameEvent::CoinCollected { score: state.score });
    }
}

/// Let every live enemy pick its velocity and maybe fire
fn run_enemy_policy(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        let intent = enemy_ai::decide(&mut state.enemies[i], &state.tuning, &mut state.rng);
        if intent.fire {
            let id = state.enemies[i].id;
            state.shoot(id);
        }
    }
}
