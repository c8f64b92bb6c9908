use glam::Vec2;

use crate::components::particle::Particle;
use crate::components::particle_object::{ParticleGameObject, ParticleObjectSet};
use crate::core::object_set::{Expirable, ObjectSet};
use crate::core::rng::Rng;

/// Spends a fixed budget of particles from one point over several frames.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// Where particles are born.
    pub position: Vec2,
    /// Particles still to emit.
    remaining: u32,
    /// Min/max initial speed magnitude.
    pub speed_range: (f32, f32),
    /// Initial direction is `up` rotated by up to ± this many radians.
    pub spread: f32,
    /// Update frames each particle lives.
    pub cycles_to_live: (i32, i32),
    /// Starting rendered size.
    pub size: f32,
    /// Per-frame size change.
    pub size_delta: f32,
    pub color: [f32; 4],
    pub color_delta: [f32; 4],
    /// Per-particle drag multiplier.
    pub drag: f32,
}

/// Ordered set of live emitters.
pub type EmitterSet = ObjectSet<ParticleEmitter>;

impl ParticleEmitter {
    /// Below this many remaining, everything left goes out in one frame.
    pub const MIN_TO_EMIT: u32 = 5;
    /// Fraction of the remaining budget emitted per frame at most.
    pub const BURST_FRACTION: f32 = 0.2;

    pub fn new(position: Vec2, count: u32) -> Self {
        Self {
            position,
            remaining: count,
            speed_range: (10.0, 30.0),
            spread: std::f32::consts::FRAC_PI_4,
            cycles_to_live: (30, 90),
            size: 1.0,
            size_delta: -0.01,
            color: [1.0, 0.8, 0.2, 1.0],
            color_delta: [0.0, -0.01, 0.0, -0.01],
            drag: Particle::DEFAULT_DRAG,
        }
    }

    // -- Builder pattern --

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_cycles_to_live(mut self, min: i32, max: i32) -> Self {
        self.cycles_to_live = (min, max.max(min));
        self
    }

    pub fn with_size(mut self, size: f32, delta: f32) -> Self {
        self.size = size;
        self.size_delta = delta;
        self
    }

    pub fn with_color(mut self, color: [f32; 4], delta: [f32; 4]) -> Self {
        self.color = color;
        self.color_delta = delta;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// How many to emit this frame given a uniform sample `r` in [0, 1).
    fn batch_size(&self, r: f32) -> u32 {
        if self.remaining < Self::MIN_TO_EMIT {
            return self.remaining;
        }
        let share = (r * Self::BURST_FRACTION * self.remaining as f32) as u32;
        share.max(Self::MIN_TO_EMIT).min(self.remaining)
    }

    /// Emit this frame's batch into `set`. Returns how many were added.
    pub fn emit(&mut self, set: &mut ParticleObjectSet, rng: &mut Rng) -> usize {
        let count = self.batch_size(rng.next_f32());
        self.remaining -= count;
        for _ in 0..count {
            set.add(self.create_particle(rng));
        }
        count as usize
    }

    fn create_particle(&self, rng: &mut Rng) -> ParticleGameObject {
        let angle = std::f32::consts::FRAC_PI_2 + rng.range_f32(-self.spread, self.spread);
        let speed = rng.range_f32(self.speed_range.0, self.speed_range.1);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
        let (min_life, max_life) = self.cycles_to_live;
        let span = (i64::from(max_life) - i64::from(min_life) + 1).clamp(1, i64::from(u32::MAX));
        let life = i64::from(min_life) + i64::from(rng.next_int(span as u32));
        let life = life.min(i64::from(max_life.max(min_life))) as i32;

        let particle = Particle::new(self.position)
            .with_velocity(velocity)
            .with_drag(self.drag);
        ParticleGameObject::new(self.position, self.size, life)
            .with_particle(particle)
            .with_color(self.color)
            .with_size_delta(self.size_delta)
            .with_color_delta(self.color_delta)
    }
}

impl Expirable for ParticleEmitter {
    fn has_expired(&self) -> bool {
        self.remaining == 0
    }
}
