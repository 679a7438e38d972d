//! Contact classification against level geometry
//!
//! Produces the per-frame flags the state machine and enemy policy consume.
//! Classification is read-only: the on-platform probe tests a displaced copy
//! of the agent's bounds instead of moving the agent.

use glam::Vec2;

use super::geometry::{LevelGeometry, Rect};

/// How an agent relates to the level geometry this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFlags {
    /// Solid geometry directly below (within the probe distance)
    pub on_platform: bool,
    /// Overlapping a ladder
    pub on_ladder: bool,
    /// Overlapping a wall or platform at the current position
    pub collided_with_solid: bool,
}

/// Classify `bounds` against `geometry`, probing `probe` pixels downward
pub fn classify(bounds: &Rect, geometry: &LevelGeometry, probe: f32) -> ContactFlags {
    let probed = bounds.translated(Vec2::new(0.0, -probe));
    ContactFlags {
        on_platform: geometry.overlaps_solid(&probed),
        on_ladder: geometry.overlaps_ladder(bounds),
        collided_with_solid: geometry.overlaps_solid(bounds),
    }
}
