//! Dye pack: a small wandering object with a finite set of behaviour states.
//!
//! Only the four corner-region wander states are driven today. The excited,
//! chase and cool-down states are named so saved state and callers can refer to
//! them, but nothing transitions into them yet.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::transform::Transform;
use crate::core::object_set::{Expirable, ObjectSet};
use crate::core::rng::Rng;

/// Behaviour state of a dye pack. Discriminants are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DyePackState {
    TopLeftRegion = 0,
    TopRightRegion = 1,
    BottomLeftRegion = 2,
    BottomRightRegion = 3,
    ExcitedCWRotate = 10,
    ExcitedCCWRotate = 11,
    ChaseState = 12,
    CoolDownEnlarge = 13,
    CoolDownShrink = 14,
}

impl DyePackState {
    pub const REGIONS: [DyePackState; 4] = [
        DyePackState::TopLeftRegion,
        DyePackState::TopRightRegion,
        DyePackState::BottomLeftRegion,
        DyePackState::BottomRightRegion,
    ];

    /// Whether this is one of the four corner-region wander states.
    pub fn is_region(self) -> bool {
        (self as u8) < 4
    }

    /// Reference corner for a region state, `None` for the reserved states.
    pub fn reference_position(self) -> Option<Vec2> {
        if self.is_region() {
            Some(DyePack::REFERENCE_POSITIONS[self as usize])
        } else {
            None
        }
    }

    /// Map a uniform sample in [0, 1) onto one of the four regions,
    /// a quarter of the interval each.
    pub fn region_from_unit(r: f32) -> DyePackState {
        if r < 0.25 {
            DyePackState::TopLeftRegion
        } else if r < 0.5 {
            DyePackState::TopRightRegion
        } else if r < 0.75 {
            DyePackState::BottomLeftRegion
        } else {
            DyePackState::BottomRightRegion
        }
    }
}

/// Pixel rectangle of the dye pack inside its texture: left, right, bottom, top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRegion {
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
    pub top: u32,
}

#[derive(Debug, Clone)]
pub struct DyePack {
    id: EntityId,
    sprite: SpriteRegion,
    xform: Transform,
    current_state: DyePackState,
    target_position: Vec2,
    /// Update frames spent in the current state.
    state_time_tick: u32,
    front_dir: Vec2,
    /// World units per second.
    speed: f32,
    /// Hits left before the pack is removed.
    lives: i32,
}

/// Ordered set of dye packs.
pub type DyePackSet = ObjectSet<DyePack>;

impl DyePack {
    pub const REF_WIDTH: f32 = 1.6;
    pub const REF_HEIGHT: f32 = 2.6;
    /// 100 world units in 5 seconds.
    pub const REFERENCE_SPEED: f32 = 100.0 / 5.0;
    pub const WANDER_SPEED_FACTOR: f32 = 1.6;
    pub const JITTER_X: f32 = 15.0;
    pub const JITTER_Y: f32 = 10.0;
    pub const COLOR: [f32; 4] = [0.2, 0.2, 0.5, 0.1];
    pub const SPRITE: SpriteRegion = SpriteRegion {
        left: 610,
        right: 690,
        bottom: 53,
        top: 193,
    };
    /// Corner anchors indexed by region discriminant.
    pub const REFERENCE_POSITIONS: [Vec2; 4] = [
        Vec2::new(-15.0, 80.0),
        Vec2::new(120.0, 80.0),
        Vec2::new(-15.0, -15.0),
        Vec2::new(120.0, -15.0),
    ];

    pub fn new(id: EntityId, position: Vec2, rng: &mut Rng) -> Self {
        let mut pack = Self {
            id,
            sprite: Self::SPRITE,
            xform: Transform::new()
                .with_position(position)
                .with_size(Vec2::new(Self::REF_WIDTH, Self::REF_HEIGHT))
                .with_color(Self::COLOR),
            current_state: DyePackState::TopLeftRegion,
            target_position: Vec2::ZERO,
            state_time_tick: 0,
            front_dir: Vec2::NEG_Y,
            speed: 0.0,
            lives: 1,
        };
        pack.compute_next_state(rng);
        pack
    }

    /// Draw a fresh state and, independently, a fresh target region.
    fn compute_next_state(&mut self, rng: &mut Rng) {
        self.current_state = Self::random_region(rng);
        let next = Self::random_region(rng);
        self.target_position = Self::randomized_position(next, rng);
        self.state_time_tick = 0;
        self.compute_speed();
    }

    fn compute_speed(&mut self) {
        self.front_dir = Vec2::NEG_Y;
        self.speed = Self::WANDER_SPEED_FACTOR * Self::REFERENCE_SPEED;
    }

    fn random_region(rng: &mut Rng) -> DyePackState {
        DyePackState::region_from_unit(rng.next_f32())
    }

    fn randomized_position(region: DyePackState, rng: &mut Rng) -> Vec2 {
        let p = region
            .reference_position()
            .unwrap_or(Self::REFERENCE_POSITIONS[0]);
        let x = p.x + (rng.next_f32() - 0.5) * Self::JITTER_X;
        let y = p.y + (rng.next_f32() - 0.5) * Self::JITTER_Y;
        Vec2::new(x, y)
    }

    /// Advance one frame: move along the facing direction.
    pub fn update(&mut self, dt: f32) {
        self.state_time_tick += 1;
        self.xform.position += self.front_dir * self.speed * dt;
    }

    /// Register a hit. The pack expires once its lives run out.
    pub fn set_expired(&mut self) {
        self.lives -= 1;
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn lives_remaining(&self) -> i32 {
        self.lives
    }

    pub fn current_state(&self) -> DyePackState {
        self.current_state
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn state_time_tick(&self) -> u32 {
        self.state_time_tick
    }

    pub fn front_dir(&self) -> Vec2 {
        self.front_dir
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn xform(&self) -> &Transform {
        &self.xform
    }

    pub fn sprite(&self) -> SpriteRegion {
        self.sprite
    }
}

impl Expirable for DyePack {
    fn has_expired(&self) -> bool {
        self.lives <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_buckets() {
        assert_eq!(DyePackState::region_from_unit(0.0), DyePackState::TopLeftRegion);
        assert_eq!(DyePackState::region_from_unit(0.2499), DyePackState::TopLeftRegion);
        assert_eq!(DyePackState::region_from_unit(0.25), DyePackState::TopRightRegion);
        assert_eq!(DyePackState::region_from_unit(0.5), DyePackState::BottomLeftRegion);
        assert_eq!(DyePackState::region_from_unit(0.75), DyePackState::BottomRightRegion);
        assert_eq!(DyePackState::region_from_unit(0.9999), DyePackState::BottomRightRegion);
    }

    #[test]
    fn reserved_states_have_no_region() {
        for s in [
            DyePackState::ExcitedCWRotate,
            DyePackState::ExcitedCCWRotate,
            DyePackState::ChaseState,
            DyePackState::CoolDownEnlarge,
            DyePackState::CoolDownShrink,
        ] {
            assert!(!s.is_region());
            assert!(s.reference_position().is_none());
        }
        assert_eq!(DyePackState::ChaseState as u8, 12);
    }

    #[test]
    fn new_pack_starts_in_a_region_with_wander_speed() {
        let mut rng = Rng::new(3);
        let pack = DyePack::new(EntityId(1), Vec2::new(50.0, 40.0), &mut rng);
        assert!(pack.current_state().is_region());
        assert_eq!(pack.front_dir(), Vec2::new(0.0, -1.0));
        assert!((pack.speed() - 32.0).abs() < 1e-5);
        assert_eq!(pack.xform().size, Vec2::new(1.6, 2.6));
        assert_eq!(pack.sprite().right, 690);
        assert_eq!(pack.state_time_tick(), 0);
    }

    #[test]
    fn region_frequencies_are_uniform() {
        let mut rng = Rng::new(2024);
        let mut counts = [0usize; 4];
        let n = 40_000;
        for _ in 0..n {
            let pack = DyePack::new(EntityId(1), Vec2::ZERO, &mut rng);
            counts[pack.current_state() as usize] += 1;
        }
        for (i, c) in counts.iter().enumerate() {
            let freq = *c as f32 / n as f32;
            assert!((freq - 0.25).abs() < 0.015, "region {} freq {}", i, freq);
        }
    }

    #[test]
    fn target_stays_in_jitter_window() {
        let mut rng = Rng::new(11);
        for _ in 0..5_000 {
            let pack = DyePack::new(EntityId(1), Vec2::ZERO, &mut rng);
            let t = pack.target_position();
            let near = DyePack::REFERENCE_POSITIONS.iter().any(|r| {
                (t.x - r.x).abs() <= 7.5 && (t.y - r.y).abs() <= 5.0
            });
            assert!(near, "target {:?} outside every jitter window", t);
        }
    }

    #[test]
    fn update_moves_down_at_speed() {
        let mut rng = Rng::new(5);
        let mut pack = DyePack::new(EntityId(1), Vec2::new(10.0, 10.0), &mut rng);
        pack.update(0.5);
        assert_eq!(pack.state_time_tick(), 1);
        assert!((pack.xform().position.y - (10.0 - 16.0)).abs() < 1e-4);
        assert!((pack.xform().position.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn expiry_counts_down_lives() {
        let mut rng = Rng::new(1);
        let mut pack = DyePack::new(EntityId(1), Vec2::ZERO, &mut rng);
        assert!(!pack.has_expired());
        assert_eq!(pack.lives_remaining(), 1);
        pack.set_expired();
        assert!(pack.has_expired());
        assert_eq!(pack.lives_remaining(), 0);
    }
}
