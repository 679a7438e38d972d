//! Level and session progression
//!
//! Owns the collaborators and performs the transitions a frame asks for:
//! advancing to the next level (or winning when there is none), soft
//! respawn on death while lives remain, game over, and restart.

use super::physics::{PhysicsEngine, PhysicsParams};
use super::state::{GameEvent, GamePhase, GameState, Sprites};
use super::tick::{TickInput, TickOutcome, tick};
use crate::error::Result;
use crate::level::{LevelData, LevelProvider};
use crate::tuning::Tuning;

/// A playthrough: game state plus the level and physics collaborators
#[derive(Debug)]
pub struct Session<L, P> {
    state: GameState,
    levels: L,
    physics: P,
}

impl<L: LevelProvider, P: PhysicsEngine> Session<L, P> {
    /// Validate `tuning` and load level 1
    pub fn new(tuning: Tuning, sprites: Sprites, levels: L, physics: P, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let mut session = Self {
            state: GameState::new(tuning, sprites, seed),
            levels,
            physics,
        };
        let level = session.resolve(1)?;
        session.install(1, level);
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that script situations
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Run one frame and perform whatever transition it asked for
    pub fn tick(&mut self, input: &TickInput) -> Result<TickOutcome> {
        let outcome = tick(&mut self.state, &mut self.physics, input);
        match outcome {
            TickOutcome::LevelComplete => self.advance_level()?,
            TickOutcome::PlayerDied => self.handle_death()?,
            TickOutcome::Restart => self.restart()?,
            TickOutcome::Continue | TickOutcome::Halted => {}
        }
        Ok(outcome)
    }

    /// Move on to the next level; winning if it does not exist
    pub fn advance_level(&mut self) -> Result<()> {
        let next = self.state.level_index + 1;
        let level = self.resolve(next)?;
        self.install(next, level);
        Ok(())
    }

    /// Lose a life and replay the level, or end the run on the last life.
    /// On error the life is kept and the current level stays in place.
    pub fn handle_death(&mut self) -> Result<()> {
        if self.state.lives > 1 {
            let index = self.state.level_index;
            let level = self.resolve(index)?;
            self.state.lives -= 1;
            log::info!("Player died, {} lives left", self.state.lives);
            self.state.events.push(GameEvent::PlayerDied {
                lives_left: self.state.lives,
            });
            self.install(index, level);
        } else {
            log::info!("Game over on level {}", self.state.level_index);
            self.state.events.push(GameEvent::PlayerDied { lives_left: 0 });
            self.state.events.push(GameEvent::GameOver {
                level: self.state.level_index,
            });
            self.state.phase = GamePhase::GameOver;
        }
        Ok(())
    }

    /// Start over from level 1 with fresh score and lives.
    /// On error the terminal state is left untouched.
    pub fn restart(&mut self) -> Result<()> {
        let level = self.resolve(1)?;
        log::info!("Restarting session");
        self.state.reset_session();
        self.state.events.push(GameEvent::Restarted);
        self.install(1, level);
        Ok(())
    }

    /// Fetch and validate level `index` without touching any state
    fn resolve(&mut self, index: u32) -> Result<Option<LevelData>> {
        let level = self.levels.load(index)?;
        if let Some(level) = &level {
            level.validate(index)?;
        }
        Ok(level)
    }

    /// Install a resolved level, or win when there was none
    fn install(&mut self, index: u32, level: Option<LevelData>) {
        match level {
            Some(level) => {
                self.state.install_level(index, &level);
                self.physics
                    .reset(PhysicsParams::from_tuning(self.state.tuning()));
            }
            None => {
                log::info!("No level {index}: playthrough won");
                self.state.events.push(GameEvent::Won {
                    level: self.state.level_index,
                });
                self.state.phase = GamePhase::Won;
            }
        }
    }
}
