//! Smoothed camera follow
//!
//! The camera position is the bottom-left corner of the viewport in level
//! coordinates. Rendering reads it; the simulation only moves it.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport,
        }
    }

    /// Viewport origin that centers `focus`, lowered by `look_down`
    pub fn target_for(&self, focus: Vec2, look_down: f32) -> Vec2 {
        let mut target = focus - self.viewport / 2.0 - Vec2::new(0.0, look_down);
        // Never scroll past the left edge of the level
        target.x = target.x.max(0.0);
        target
    }

    /// Move a `smoothing` fraction of the way toward `target`
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        self.position = self.position.lerp(target, smoothing.clamp(0.0, 1.0));
    }

    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Top edge of the visible area
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.viewport.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges() {
        let mut camera = Camera::new(Vec2::new(1000.0, 800.0));
        let target = camera.target_for(Vec2::new(2000.0, 400.0), 0.0);
        assert_eq!(target, Vec2::new(1500.0, 0.0));

        camera.follow(target, 0.1);
        assert!((camera.position.x - 150.0).abs() < 1e-3);
        for _ in 0..200 {
            camera.follow(target, 0.1);
        }
        assert!((camera.position - target).length() < 0.01);
    }

    #[test]
    fn test_look_down_and_left_clamp() {
        let camera = Camera::new(Vec2::new(1000.0, 800.0));
        let normal = camera.target_for(Vec2::new(100.0, 400.0), 0.0);
        let looking = camera.target_for(Vec2::new(100.0, 400.0), 200.0);
        assert_eq!(normal.x, 0.0);
        assert_eq!(looking.y, normal.y - 200.0);
        assert_eq!(camera.top(), 800.0);
    }
}
