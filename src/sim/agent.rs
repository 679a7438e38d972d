//! Agents and their animation state machine
//!
//! Player and enemies share one record; the role tag decides which decision
//! policy the session runs for it. Motion lives in [`Body`], which the
//! physics collaborator integrates in place.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::ContactFlags;
use super::geometry::Rect;
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Identity token for an agent (never an owning reference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
}

/// Side the agent is looking at; mirrors frames and aims shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal velocity, `None` when standing still
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Animation/behavior state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Climb,
    /// Idle on the ground with the sit intent held (visual only)
    Sit,
}

impl AgentState {
    pub const COUNT: usize = 6;
    pub const ALL: [AgentState; Self::COUNT] = [
        AgentState::Idle,
        AgentState::Walk,
        AgentState::Jump,
        AgentState::Fall,
        AgentState::Climb,
        AgentState::Sit,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Ordered texture keys for one state, per facing side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSeq {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl FrameSeq {
    pub fn new(left: Vec<String>, right: Vec<String>) -> Self {
        Self { left, right }
    }

    /// Same keys on both sides (the renderer mirrors them)
    pub fn symmetric(frames: Vec<String>) -> Self {
        Self {
            left: frames.clone(),
            right: frames,
        }
    }

    fn is_complete(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }

    pub fn side(&self, facing: Facing) -> &[String] {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }
}

/// Frame table indexed by [`AgentState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSet {
    frames: [FrameSeq; AgentState::COUNT],
}

impl AnimationSet {
    /// Build the table. Idle frames are required; any other state without
    /// frames on both sides shows the idle frames instead.
    pub fn new(entries: impl IntoIterator<Item = (AgentState, FrameSeq)>) -> Result<Self> {
        let mut frames: [FrameSeq; AgentState::COUNT] = Default::default();
        for (state, seq) in entries {
            frames[state.index()] = seq;
        }

        let idle = frames[AgentState::Idle.index()].clone();
        if !idle.is_complete() {
            return Err(Error::MissingIdleFrames);
        }
        for state in AgentState::ALL {
            let seq = &mut frames[state.index()];
            if !seq.is_complete() {
                log::debug!("No frames for {state:?}, falling back to idle");
                *seq = idle.clone();
            }
        }
        Ok(Self { frames })
    }

    /// Conventional `{prefix}_{state}_{n}` keys, `frame_count` frames per state
    pub fn with_prefix(prefix: &str, frame_count: usize) -> Self {
        let frames = AgentState::ALL.map(|state| {
            let name = format!("{state:?}").to_lowercase();
            let side = |dir: &str| {
                (0..frame_count.max(1))
                    .map(|i| format!("{prefix}_{name}_{dir}_{i}"))
                    .collect::<Vec<_>>()
            };
            FrameSeq::new(side("left"), side("right"))
        });
        Self { frames }
    }

    pub fn frames(&self, state: AgentState, facing: Facing) -> &[String] {
        self.frames[state.index()].side(facing)
    }
}

/// Position and velocity, integrated by the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub bounds: Rect,
    pub velocity: Vec2,
}

impl Body {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Rect::new(center, size),
            velocity: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.bounds.center
    }
}

/// A player or enemy character
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub role: Role,
    pub body: Body,
    pub facing: Facing,
    pub state: AgentState,
    /// Raw animation advances since spawn
    pub anim_cursor: u32,
    pub contacts: ContactFlags,
    /// Sit intent (player input); enemies never sit
    pub sitting: bool,
    /// Current visual scale
    pub scale: f32,
    /// Scale the agent was created with
    pub base_scale: f32,
    animations: Arc<AnimationSet>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        role: Role,
        center: Vec2,
        size: Vec2,
        scale: f32,
        animations: Arc<AnimationSet>,
    ) -> Self {
        Self {
            id,
            role,
            body: Body::new(center, size),
            facing: Facing::default(),
            state: AgentState::Idle,
            anim_cursor: 0,
            contacts: ContactFlags::default(),
            sitting: false,
            scale,
            base_scale: scale,
            animations,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.body.bounds
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Put the agent back at `center` as if freshly spawned
    pub fn respawn_at(&mut self, center: Vec2) {
        self.body.bounds.center = center;
        self.body.velocity = Vec2::ZERO;
        self.state = AgentState::Idle;
        self.anim_cursor = 0;
        self.contacts = ContactFlags::default();
        self.sitting = false;
        self.scale = self.base_scale;
    }

    /// Recompute state from velocity and this frame's contact flags.
    ///
    /// Rules apply in order, later ones overriding: walk/idle by horizontal
    /// velocity, sit shrink, jump/fall while airborne, climb on a ladder.
    pub fn update_state(&mut self, tuning: &Tuning) {
        let vel = self.body.velocity;
        let contacts = self.contacts;

        match Facing::from_velocity(vel.x) {
            Some(facing) => {
                self.state = AgentState::Walk;
                self.facing = facing;
            }
            None => self.state = AgentState::Idle,
        }

        if self.state == AgentState::Idle && self.sitting && contacts.on_platform {
            self.state = AgentState::Sit;
            let floor = self.base_scale * tuning.sit_min_scale;
            self.scale = (self.scale * tuning.sit_shrink).max(floor);
        }

        if !contacts.on_platform {
            if vel.y > 0.0 {
                self.state = AgentState::Jump;
                self.scale = (self.scale * tuning.jump_grow).min(self.base_scale);
            } else if vel.y < 0.0 {
                self.state = AgentState::Fall;
            }
        }

        if contacts.on_ladder {
            self.state = AgentState::Climb;
        }
    }

    /// One raw animation step; called once per frame
    #[inline]
    pub fn advance_animation(&mut self) {
        self.anim_cursor = self.anim_cursor.wrapping_add(1);
    }

    /// Texture key to draw, holding each frame for `animation_divisor` advances
    pub fn current_frame(&self, tuning: &Tuning) -> &str {
        let seq = self.animations.frames(self.state, self.facing);
        let index = (self.anim_cursor / tuning.animation_divisor.max(1)) as usize % seq.len();
        &seq[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn idle_only() -> Arc<AnimationSet> {
        Arc::new(
            AnimationSet::new([(
                AgentState::Idle,
                FrameSeq::new(keys(&["idle_l"]), keys(&["idle_r"])),
            )])
            .unwrap(),
        )
    }

    fn agent() -> Agent {
        Agent::new(
            AgentId(1),
            Role::Player,
            Vec2::ZERO,
            Vec2::splat(32.0),
            1.0,
            Arc::new(AnimationSet::with_prefix("hero", 3)),
        )
    }

    fn grounded() -> ContactFlags {
        ContactFlags {
            on_platform: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_sets_facing() {
        let tuning = Tuning::default();
        let mut a = agent();
        a.contacts = grounded();

        a.body.velocity = Vec2::new(-5.0, 0.0);
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Walk);
        assert_eq!(a.facing, Facing::Left);

        // Stopping keeps the last facing
        a.body.velocity = Vec2::ZERO;
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Idle);
        assert_eq!(a.facing, Facing::Left);
    }

    #[test]
    fn test_airborne_jump_and_fall() {
        let tuning = Tuning::default();
        let mut a = agent();

        a.body.velocity = Vec2::new(5.0, 10.0);
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Jump);
        assert_eq!(a.facing, Facing::Right);

        a.body.velocity = Vec2::new(0.0, -3.0);
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Fall);
    }

    #[test]
    fn test_ladder_overrides_everything() {
        let tuning = Tuning::default();
        let mut a = agent();
        a.contacts = ContactFlags {
            on_ladder: true,
            ..Default::default()
        };
        a.body.velocity = Vec2::new(-5.0, 8.0);
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Climb);
        // Facing rule still ran first
        assert_eq!(a.facing, Facing::Left);
    }

    #[test]
    fn test_sit_shrinks_to_floor() {
        let tuning = Tuning::default();
        let mut a = agent();
        a.contacts = grounded();
        a.sitting = true;

        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Sit);
        assert!(a.scale < 1.0);

        for _ in 0..500 {
            a.update_state(&tuning);
        }
        assert!((a.scale - tuning.sit_min_scale).abs() < 1e-6);
    }

    #[test]
    fn test_sit_requires_ground_and_idle() {
        let tuning = Tuning::default();
        let mut a = agent();
        a.sitting = true;
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Idle);
        assert_eq!(a.scale, 1.0);

        a.contacts = grounded();
        a.body.velocity = Vec2::new(5.0, 0.0);
        a.update_state(&tuning);
        assert_eq!(a.state, AgentState::Walk);
        assert_eq!(a.scale, 1.0);
    }

    #[test]
    fn test_jump_regrows_capped_at_base() {
        let tuning = Tuning::default();
        let mut a = agent();
        a.scale = 0.5;
        a.body.velocity = Vec2::new(0.0, 10.0);
        for _ in 0..200 {
            a.update_state(&tuning);
        }
        assert_eq!(a.scale, a.base_scale);
    }

    #[test]
    fn test_missing_idle_is_an_error() {
        let err = AnimationSet::new([(
            AgentState::Walk,
            FrameSeq::symmetric(keys(&["walk"])),
        )])
        .unwrap_err();
        assert!(matches!(err, Error::MissingIdleFrames));
    }

    #[test]
    fn test_missing_states_alias_idle() {
        let set = idle_only();
        for state in AgentState::ALL {
            assert_eq!(set.frames(state, Facing::Left), keys(&["idle_l"]).as_slice());
            assert_eq!(set.frames(state, Facing::Right), keys(&["idle_r"]).as_slice());
        }
    }

    #[test]
    fn test_animation_is_throttled() {
        let tuning = Tuning::default();
        let mut a = agent();
        let first = a.current_frame(&tuning).to_string();
        for _ in 0..19 {
            a.advance_animation();
        }
        assert_eq!(a.current_frame(&tuning), first);
        a.advance_animation();
        assert_eq!(a.current_frame(&tuning), "hero_idle_right_1");
        // Wraps modulo sequence length
        for _ in 0..40 {
            a.advance_animation();
        }
        assert_eq!(a.current_frame(&tuning), "hero_idle_right_0");
    }

    #[test]
    fn test_animation_rate_follows_tuning() {
        let tuning = Tuning {
            animation_divisor: 5,
            ..Tuning::default()
        };
        let mut a = agent();
        for _ in 0..5 {
            a.advance_animation();
        }
        assert_eq!(a.current_frame(&tuning), "hero_idle_right_1");
        assert_eq!(a.current_frame(&Tuning::default()), "hero_idle_right_0");
    }

    #[test]
    fn test_respawn_resets_visuals() {
        let mut a = agent();
        a.scale = 0.3;
        a.state = AgentState::Fall;
        a.body.velocity = Vec2::new(3.0, -2.0);
        a.respawn_at(Vec2::new(10.0, 20.0));
        assert_eq!(a.position(), Vec2::new(10.0, 20.0));
        assert_eq!(a.body.velocity, Vec2::ZERO);
        assert_eq!(a.state, AgentState::Idle);
        assert_eq!(a.scale, 1.0);
    }

    proptest! {
        #[test]
        fn prop_climb_wins_on_ladder(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            on_platform: bool,
            collided: bool,
            sitting: bool,
        ) {
            let tuning = Tuning::default();
            let mut a = agent();
            a.sitting = sitting;
            a.body.velocity = Vec2::new(vx, vy);
            a.contacts = ContactFlags { on_platform, on_ladder: true, collided_with_solid: collided };
            a.update_state(&tuning);
            prop_assert_eq!(a.state, AgentState::Climb);
        }

        #[test]
        fn prop_facing_only_changes_when_moving(
            start_left: bool,
            vy in -20.0f32..20.0,
            on_platform: bool,
            on_ladder: bool,
        ) {
            let tuning = Tuning::default();
            let mut a = agent();
            a.facing = if start_left { Facing::Left } else { Facing::Right };
            let before = a.facing;
            a.body.velocity = Vec2::new(0.0, vy);
            a.contacts = ContactFlags { on_platform, on_ladder, collided_with_solid: false };
            a.update_state(&tuning);
            prop_assert_eq!(a.facing, before);
            prop_assert!(a.scale <= a.base_scale);
            prop_assert!(a.scale >= a.base_scale * tuning.sit_min_scale);
        }
    }
}
