//! Particle-vs-rigid-shape penetration correction.
//!
//! Resolvers write through a caller-owned [`CollisionScratch`] so the pass never
//! allocates. One scratch serves one resolve call at a time; a parallel pass
//! would give every worker its own.

use glam::Vec2;

use crate::components::particle::Particle;
use crate::components::particle_object::ParticleObjectSet;
use crate::components::rigid::{ParticleCollider, RigidCircle, RigidRectangle};
use crate::components::transform::Transform;
use crate::core::object_set::ObjectSet;
use crate::core::physics::particle_process_collision;
use crate::core::vec2;

/// Scratch state reused across resolve calls.
#[derive(Debug, Clone)]
pub struct CollisionScratch {
    /// Shape center to particle, then the push-out direction.
    from_1_to_2: Vec2,
    /// Minimum translation written by the rectangle primitive.
    mtv: Vec2,
    /// Stand-in ball for rectangle contacts, re-seated on every call.
    proxy: RigidCircle,
    /// Push-out direction when a particle sits exactly on a circle's center.
    fallback_dir: Vec2,
}

impl CollisionScratch {
    pub const DEFAULT_PROXY_RADIUS: f32 = 0.3;

    pub fn new(proxy_radius: f32, fallback_dir: Vec2) -> Self {
        Self {
            from_1_to_2: Vec2::ZERO,
            mtv: Vec2::ZERO,
            proxy: RigidCircle::new(Vec2::ZERO, proxy_radius),
            fallback_dir: fallback_dir.try_normalize().unwrap_or(Vec2::Y),
        }
    }

    pub fn proxy(&self) -> &RigidCircle {
        &self.proxy
    }

    /// Translation applied by the last successful rectangle resolve.
    pub fn last_translation(&self) -> Vec2 {
        self.mtv
    }
}

impl Default for CollisionScratch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROXY_RADIUS, Vec2::Y)
    }
}

/// Push `particle` out to the boundary of `circle` when strictly inside it.
pub fn resolve_circle_pos(
    circle: &RigidCircle,
    particle: &mut Particle,
    scratch: &mut CollisionScratch,
) -> bool {
    let pos = particle.position();
    let c_pos = circle.center();
    vec2::subtract(&mut scratch.from_1_to_2, pos, c_pos);
    let dist = vec2::length(scratch.from_1_to_2);
    if dist >= circle.radius() {
        return false;
    }

    let from = scratch.from_1_to_2;
    if !vec2::normalize_or(&mut scratch.from_1_to_2, from, scratch.fallback_dir) {
        log::trace!("particle on circle center {:?}, using fallback direction", c_pos);
    }
    let mut out = pos;
    vec2::scale_and_add(&mut out, c_pos, scratch.from_1_to_2, circle.radius());
    particle.set_position(out);
    true
}

/// Resolve a particle at `xf` against `rect` through the proxy ball.
/// On success the corrected position is `scratch.proxy().center()`.
pub fn resolve_rect_pos(
    rect: &RigidRectangle,
    xf: &Transform,
    scratch: &mut CollisionScratch,
) -> bool {
    scratch.proxy.set_transform(xf);
    particle_process_collision(rect, &mut scratch.proxy, &mut scratch.mtv)
}

/// Resolve every particle in `particles` against one rigid object.
/// Returns how many particles were moved.
pub fn process_obj_set<C: ParticleCollider>(
    obj: &C,
    particles: &mut ParticleObjectSet,
    scratch: &mut CollisionScratch,
) -> usize {
    let mut corrected = 0;
    for p_obj in particles.iter_mut() {
        let (particle, xf) = p_obj.parts_mut();
        if obj.resolve_particle_collision(particle, &xf, scratch) {
            corrected += 1;
        }
    }
    corrected
}

/// Resolve every particle against every rigid object, in set order.
pub fn collide_with_rigid_set<C: ParticleCollider>(
    objects: &ObjectSet<C>,
    particles: &mut ParticleObjectSet,
    scratch: &mut CollisionScratch,
) -> usize {
    objects
        .iter()
        .map(|obj| process_obj_set(obj, particles, scratch))
        .sum()
}
