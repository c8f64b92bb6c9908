use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::particle::Particle;
use crate::components::transform::Transform;
use crate::core::object_set::ObjectSet;
use crate::systems::collision::{resolve_circle_pos, resolve_rect_pos, CollisionScratch};

/// Solid circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidCircle {
    center: Vec2,
    radius: f32,
}

impl RigidCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Re-seat the circle on a transform's position.
    pub fn set_transform(&mut self, xf: &Transform) {
        self.center = xf.position;
    }
}

/// Solid, possibly rotated, rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidRectangle {
    center: Vec2,
    width: f32,
    height: f32,
    /// Rotation in radians around `center`.
    rotation: f32,
}

impl RigidRectangle {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Half extents along the rectangle's local axes.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Bottom-left corner before rotation.
    pub fn corner(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    pub fn set_transform(&mut self, xf: &Transform) {
        self.center = xf.position;
        self.rotation = xf.rotation;
    }
}

/// Anything that can push a particle out of itself.
pub trait ParticleCollider {
    /// Resolve penetration between `self` and `particle`, whose render
    /// transform is `xf`. Returns true when the particle was moved.
    fn resolve_particle_collision(
        &self,
        particle: &mut Particle,
        xf: &Transform,
        scratch: &mut CollisionScratch,
    ) -> bool;
}

/// The solid shapes particles collide with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigidShape {
    Circle(RigidCircle),
    Rectangle(RigidRectangle),
}

impl ParticleCollider for RigidShape {
    fn resolve_particle_collision(
        &self,
        particle: &mut Particle,
        xf: &Transform,
        scratch: &mut CollisionScratch,
    ) -> bool {
        match self {
            RigidShape::Circle(circle) => resolve_circle_pos(circle, particle, scratch),
            RigidShape::Rectangle(rect) => {
                let collided = resolve_rect_pos(rect, xf, scratch);
                if collided {
                    particle.set_position(scratch.proxy().center());
                }
                collided
            }
        }
    }
}

/// A solid game object: an id, a tag and its shape.
#[derive(Debug, Clone)]
pub struct RigidObject {
    pub id: EntityId,
    pub tag: String,
    /// Objects with `active == false` are skipped by collision.
    pub active: bool,
    pub shape: RigidShape,
}

/// Ordered set of rigid game objects.
pub type GameObjectSet = ObjectSet<RigidObject>;

impl RigidObject {
    pub fn new(id: EntityId, shape: RigidShape) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            shape,
        }
    }

    pub fn circle(id: EntityId, center: Vec2, radius: f32) -> Self {
        Self::new(id, RigidShape::Circle(RigidCircle::new(center, radius)))
    }

    pub fn rectangle(id: EntityId, center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            id,
            RigidShape::Rectangle(RigidRectangle::new(center, width, height)),
        )
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

impl ParticleCollider for RigidObject {
    fn resolve_particle_collision(
        &self,
        particle: &mut Particle,
        xf: &Transform,
        scratch: &mut CollisionScratch,
    ) -> bool {
        if !self.active {
            return false;
        }
        self.shape.resolve_particle_collision(particle, xf, scratch)
    }
}
