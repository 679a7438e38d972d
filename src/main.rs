//! Suzy headless runner
//!
//! Plays the bundled levels with a scripted controller and logs what happens.
//! Usage: `suzy [TUNING_JSON | easy | normal | hard] [LEVEL_DIR]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> suzy::Result<()> {
    use suzy::consts::{DEFAULT_SEED, FRAMES_PER_SECOND};
    use suzy::input::{Action, Controls, InputEvent};
    use suzy::sim::{GameEvent, GamePhase, PhysicsParams, PlatformerPhysics, Session, Sprites};
    use suzy::{Difficulty, JsonLevelDir, Tuning};

    env_logger::init();
    log::info!("Suzy (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(arg) => match Difficulty::from_str(&arg) {
            Some(difficulty) => {
                log::info!("Difficulty: {}", difficulty.as_str());
                Tuning::from_difficulty(difficulty)
            }
            None => Tuning::load(arg)?,
        },
        None => Tuning::default(),
    };
    let levels = JsonLevelDir::new(
        args.next()
            .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/levels").to_string()),
    );
    log::info!("Levels from {}", levels.root().display());

    let physics = PlatformerPhysics::new(PhysicsParams::from_tuning(&tuning));
    let mut session = Session::new(tuning, Sprites::default(), levels, physics, DEFAULT_SEED)?;

    let mut controls = Controls::new();
    controls.handle(InputEvent::Pressed(Action::Right));

    let max_frames = 120 * FRAMES_PER_SECOND;
    let mut frame = 0;
    while frame < max_frames && session.phase() == GamePhase::Playing {
        // Hop and shoot on a fixed rhythm
        if frame % 45 == 0 {
            controls.handle(InputEvent::Pressed(Action::Jump));
        }
        if frame % 90 == 30 {
            controls.handle(InputEvent::Pressed(Action::Fire));
        }

        session.tick(&controls.frame_input())?;
        for event in session.drain_events() {
            match event {
                GameEvent::ShotFired { .. } => log::trace!("{event:?}"),
                GameEvent::CoinCollected { .. } | GameEvent::EnemyRespawned { .. } => {
                    log::debug!("{event:?}")
                }
                _ => log::info!("frame {frame}: {event:?}"),
            }
        }
        frame += 1;
    }

    let state = session.state();
    log::info!(
        "Stopped after {} frames: {:?} on level {}, score {}, lives {}",
        frame,
        state.phase,
        state.level_index,
        state.score,
        state.lives
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive the library directly on the web
}
