use glam::Vec2;

use crate::components::particle::Particle;
use crate::components::transform::Transform;
use crate::core::object_set::{Expirable, ObjectSet};

/// A particle plus what it looks like and how long it lives.
#[derive(Debug, Clone)]
pub struct ParticleGameObject {
    particle: Particle,
    /// Size, rotation and tint. Its position mirrors the particle's.
    xform: Transform,
    /// Updates left before the object expires.
    cycles_to_live: i32,
    /// Added to the rendered size every update.
    size_delta: f32,
    /// Added to the tint every update.
    color_delta: [f32; 4],
}

/// Ordered set of particle game objects.
pub type ParticleObjectSet = ObjectSet<ParticleGameObject>;

impl ParticleGameObject {
    pub fn new(position: Vec2, size: f32, cycles_to_live: i32) -> Self {
        Self {
            particle: Particle::new(position),
            xform: Transform::new()
                .with_position(position)
                .with_size(Vec2::splat(size)),
            cycles_to_live,
            size_delta: 0.0,
            color_delta: [0.0; 4],
        }
    }

    // -- Builder pattern --

    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.xform.position = particle.position();
        self.particle = particle;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.xform.color = color;
        self
    }

    pub fn with_size_delta(mut self, delta: f32) -> Self {
        self.size_delta = delta;
        self
    }

    pub fn with_color_delta(mut self, delta: [f32; 4]) -> Self {
        self.color_delta = delta;
        self
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }

    /// Copy of the render transform, position synced to the particle.
    pub fn xform(&self) -> Transform {
        Transform {
            position: self.particle.position(),
            ..self.xform
        }
    }

    /// The particle and its transform, borrowed together for collision.
    pub fn parts_mut(&mut self) -> (&mut Particle, Transform) {
        let xf = self.xform();
        (&mut self.particle, xf)
    }

    pub fn cycles_to_live(&self) -> i32 {
        self.cycles_to_live
    }

    /// Advance one frame: integrate the particle and age the object.
    pub fn update(&mut self, field: Vec2, dt: f32) {
        self.particle.update(field, dt);
        self.xform.position = self.particle.position();
        self.cycles_to_live -= 1;

        let size = (self.xform.size.x + self.size_delta).max(0.0);
        self.xform.size = Vec2::splat(size);
        for (c, d) in self.xform.color.iter_mut().zip(self.color_delta) {
            *c = (*c + d).clamp(0.0, 1.0);
        }
    }
}

impl Expirable for ParticleGameObject {
    fn has_expired(&self) -> bool {
        self.cycles_to_live < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_cycles_run_out() {
        let mut obj = ParticleGameObject::new(Vec2::ZERO, 1.0, 1);
        obj.update(Vec2::ZERO, 0.016);
        assert_eq!(obj.cycles_to_live(), 0);
        assert!(!obj.has_expired());
        obj.update(Vec2::ZERO, 0.016);
        assert!(obj.has_expired());
    }

    #[test]
    fn xform_tracks_particle_position() {
        let mut obj = ParticleGameObject::new(Vec2::new(0.0, 10.0), 1.0, 100);
        obj.update(Vec2::new(0.0, -50.0), 0.1);
        assert_eq!(obj.xform().position, obj.particle().position());
        assert!(obj.xform().position.y < 10.0);
    }

    #[test]
    fn size_and_color_deltas_are_clamped() {
        let mut obj = ParticleGameObject::new(Vec2::ZERO, 1.0, 100)
            .with_color([0.9, 0.5, 0.1, 1.0])
            .with_size_delta(-0.6)
            .with_color_delta([0.2, 0.0, -0.2, 0.0]);
        obj.update(Vec2::ZERO, 0.016);
        obj.update(Vec2::ZERO, 0.016);
        let xf = obj.xform();
        assert_eq!(xf.size, Vec2::ZERO);
        assert_eq!(xf.color[0], 1.0);
        assert_eq!(xf.color[2], 0.0);
    }
}
