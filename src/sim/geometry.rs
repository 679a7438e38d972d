//! Axis-aligned level geometry
//!
//! Everything in a level is a rectangle described by its center and size,
//! with y pointing up. Walls are static; platforms may patrol between
//! optional boundaries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Penetration below this is treated as touching, not overlapping
pub const CONTACT_EPSILON: f32 = 1e-3;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Build from bottom-left corner
    pub fn from_min(min: Vec2, size: Vec2) -> Self {
        Self {
            center: min + size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Copy of this rectangle moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            size: self.size,
        }
    }

    /// Penetration depth along each axis (non-positive on an axis means apart)
    #[inline]
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        self.half() + other.half() - (self.center - other.center).abs()
    }

    /// True when the rectangles share area (edges that merely touch do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let pen = self.penetration(other);
        pen.x > CONTACT_EPSILON && pen.y > CONTACT_EPSILON
    }

    /// True when the horizontal extent lies entirely outside `[min_x, max_x]`
    #[inline]
    pub fn outside_span(&self, min_x: f32, max_x: f32) -> bool {
        self.right() < min_x || self.left() > max_x
    }
}

/// A platform, optionally moving back and forth between boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub boundary_left: Option<f32>,
    #[serde(default)]
    pub boundary_right: Option<f32>,
    #[serde(default)]
    pub boundary_bottom: Option<f32>,
    #[serde(default)]
    pub boundary_top: Option<f32>,
}

impl Platform {
    /// A platform that never moves
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            velocity: Vec2::ZERO,
            boundary_left: None,
            boundary_right: None,
            boundary_bottom: None,
            boundary_top: None,
        }
    }

    /// Move by velocity, reversing on any boundary crossed
    pub fn advance(&mut self) {
        if self.velocity == Vec2::ZERO {
            return;
        }
        self.rect.center += self.velocity;

        if let Some(left) = self.boundary_left
            && self.rect.left() < left
            && self.velocity.x < 0.0
        {
            self.velocity.x = -self.velocity.x;
        }
        if let Some(right) = self.boundary_right
            && self.rect.right() > right
            && self.velocity.x > 0.0
        {
            self.velocity.x = -self.velocity.x;
        }
        if let Some(bottom) = self.boundary_bottom
            && self.rect.bottom() < bottom
            && self.velocity.y < 0.0
        {
            self.velocity.y = -self.velocity.y;
        }
        if let Some(top) = self.boundary_top
            && self.rect.top() > top
            && self.velocity.y > 0.0
        {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Static and moving geometry of the loaded level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelGeometry {
    pub walls: Vec<Rect>,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Rect>,
}

impl LevelGeometry {
    /// Walls and platforms, the geometry agents cannot pass through
    pub fn solids(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.walls
            .iter()
            .chain(self.platforms.iter().map(|p| &p.rect))
    }

    pub fn overlaps_solid(&self, rect: &Rect) -> bool {
        self.solids().any(|s| s.overlaps(rect))
    }

    pub fn overlaps_ladder(&self, rect: &Rect) -> bool {
        self.ladders.iter().any(|l| l.overlaps(rect))
    }

    /// Advance every moving platform one frame
    pub fn advance_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.advance();
        }
    }
}
