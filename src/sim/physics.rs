//! Physics collaborator boundary
//!
//! The session never integrates motion itself: it hands bodies to a
//! [`PhysicsEngine`], issues jump impulses and reads back position and
//! velocity. [`PlatformerPhysics`] is a small gravity + AABB integrator for
//! the native runner and tests.

use glam::Vec2;

use super::agent::Body;
use super::geometry::LevelGeometry;
use crate::tuning::Tuning;

/// How far below the body to look for ground before allowing a jump
const GROUND_PROBE: f32 = 5.0;

/// Parameters the engine is re-established with on every level load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub gravity: f32,
    /// Jumps allowed between ground contacts
    pub max_jumps: u32,
}

impl PhysicsParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            max_jumps: tuning.max_jumps.max(1),
        }
    }
}

/// Per-frame motion integration for the player
pub trait PhysicsEngine {
    /// Forget per-level state (jump counters) and take new parameters
    fn reset(&mut self, params: PhysicsParams);

    /// Advance `body` one frame, resolving contact with solid geometry
    fn integrate(&mut self, body: &mut Body, geometry: &LevelGeometry);

    fn can_jump(&self, body: &Body, geometry: &LevelGeometry) -> bool;

    /// Apply an upward impulse
    fn jump(&mut self, body: &mut Body, impulse: f32);
}

/// Gravity, ladders and axis-separated AABB resolution
#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    params: PhysicsParams,
    jumps_since_ground: u32,
}

impl PlatformerPhysics {
    pub fn new(params: PhysicsParams) -> Self {
        Self {
            params,
            jumps_since_ground: 0,
        }
    }

    fn grounded(body: &Body, geometry: &LevelGeometry) -> bool {
        let probe = body.bounds.translated(Vec2::new(0.0, -GROUND_PROBE));
        geometry.overlaps_solid(&probe)
    }
}

impl PhysicsEngine for PlatformerPhysics {
    fn reset(&mut self, params: PhysicsParams) {
        self.params = params;
        self.jumps_since_ground = 0;
    }

    fn integrate(&mut self, body: &mut Body, geometry: &LevelGeometry) {
        if !geometry.overlaps_ladder(&body.bounds) {
            body.velocity.y -= self.params.gravity;
        }

        let half = body.bounds.half();

        body.bounds.center.x += body.velocity.x;
        for solid in geometry.solids() {
            if !solid.overlaps(&body.bounds) {
                continue;
            }
            if body.velocity.x > 0.0 {
                body.bounds.center.x = solid.left() - half.x;
            } else if body.velocity.x < 0.0 {
                body.bounds.center.x = solid.right() + half.x;
            }
        }

        body.bounds.center.y += body.velocity.y;
        for solid in geometry.solids() {
            if !solid.overlaps(&body.bounds) {
                continue;
            }
            if body.velocity.y < 0.0 {
                body.bounds.center.y = solid.top() + half.y;
                self.jumps_since_ground = 0;
            } else if body.velocity.y > 0.0 {
                body.bounds.center.y = solid.bottom() - half.y;
            }
            body.velocity.y = 0.0;
        }
    }

    fn can_jump(&self, body: &Body, geometry: &LevelGeometry) -> bool {
        if geometry.overlaps_ladder(&body.bounds) {
            return false;
        }
        Self::grounded(body, geometry)
            || (self.params.max_jumps > 1 && self.jumps_since_ground < self.params.max_jumps)
    }

    fn jump(&mut self, body: &mut Body, impulse: f32) {
        body.velocity.y = impulse;
        self.jumps_since_ground += 1;
    }
}
