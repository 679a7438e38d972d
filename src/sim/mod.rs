//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame callback, speeds in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod agent;
pub mod camera;
pub mod contact;
pub mod enemy_ai;
pub mod geometry;
pub mod physics;
pub mod projectile;
pub mod session;
pub mod state;
pub mod tick;

#[cfg(test)]
pub mod testing;

pub use agent::{Agent, AgentId, AgentState, AnimationSet, Body, Facing, FrameSeq, Role};
pub use camera::Camera;
pub use contact::{ContactFlags, classify};
pub use enemy_ai::{EnemyIntent, decide};
pub use geometry::{LevelGeometry, Platform, Rect};
pub use physics::{PhysicsEngine, PhysicsParams, PlatformerPhysics};
pub use projectile::{Projectile, ResolveReport, RespawnArea, resolve_projectiles};
pub use session::Session;
pub use state::{GameEvent, GamePhase, GameState, Scenery, Sprites};
pub use tick::{TickInput, TickOutcome, tick};
