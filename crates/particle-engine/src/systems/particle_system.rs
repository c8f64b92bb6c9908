use glam::Vec2;

use crate::api::config::ParticleConfig;
use crate::components::particle::Particle;
use crate::components::particle_object::ParticleObjectSet;
use crate::components::rigid::{ParticleCollider, RigidCircle, RigidRectangle};
use crate::components::transform::Transform;
use crate::core::object_set::ObjectSet;
use crate::systems::collision::{self, CollisionScratch};

/// Simulation context for particles: owns the system acceleration field and
/// the collision scratch. The frame driver holds one and passes it around.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    system_acceleration: Vec2,
    scratch: CollisionScratch,
}

impl ParticleSystem {
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            system_acceleration: config.gravity,
            scratch: CollisionScratch::new(config.proxy_radius, config.fallback_push_dir),
        }
    }

    /// Current acceleration field (copied out).
    pub fn system_acceleration(&self) -> Vec2 {
        self.system_acceleration
    }

    /// Replace the acceleration field.
    pub fn set_system_acceleration(&mut self, acceleration: Vec2) {
        self.system_acceleration = acceleration;
    }

    pub fn scratch(&self) -> &CollisionScratch {
        &self.scratch
    }

    pub fn resolve_circle_pos(&mut self, circle: &RigidCircle, particle: &mut Particle) -> bool {
        collision::resolve_circle_pos(circle, particle, &mut self.scratch)
    }

    pub fn resolve_rect_pos(&mut self, rect: &RigidRectangle, xf: &Transform) -> bool {
        collision::resolve_rect_pos(rect, xf, &mut self.scratch)
    }

    pub fn process_obj_set<C: ParticleCollider>(
        &mut self,
        obj: &C,
        particles: &mut ParticleObjectSet,
    ) -> usize {
        collision::process_obj_set(obj, particles, &mut self.scratch)
    }

    pub fn collide_with_rigid_set<C: ParticleCollider>(
        &mut self,
        objects: &ObjectSet<C>,
        particles: &mut ParticleObjectSet,
    ) -> usize {
        collision::collide_with_rigid_set(objects, particles, &mut self.scratch)
    }

    /// Advance every particle object by `dt` under the current field.
    pub fn update(&self, particles: &mut ParticleObjectSet, dt: f32) {
        let field = self.system_acceleration;
        for obj in particles.iter_mut() {
            obj.update(field, dt);
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(&ParticleConfig::default())
    }
}
