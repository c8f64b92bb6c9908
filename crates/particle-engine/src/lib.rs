pub mod api;
pub mod core;
pub mod components;
pub mod systems;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::config::ParticleConfig;
pub use api::types::EntityId;
pub use api::world::{ParticleWorld, StepReport};
pub use crate::core::error::{ParticleError, Result};
pub use crate::core::object_set::{Expirable, ObjectSet};
pub use crate::core::rng::Rng;
pub use crate::core::time::FrameClock;
pub use crate::core::physics::particle_process_collision;
pub use components::dye_pack::{DyePack, DyePackSet, DyePackState, SpriteRegion};
pub use components::emitter::{EmitterSet, ParticleEmitter};
pub use components::particle::Particle;
pub use components::particle_object::{ParticleGameObject, ParticleObjectSet};
pub use components::rigid::{
    GameObjectSet, ParticleCollider, RigidCircle, RigidObject, RigidRectangle, RigidShape,
};
pub use components::transform::Transform;
pub use systems::collision::{
    collide_with_rigid_set, process_obj_set, resolve_circle_pos, resolve_rect_pos,
    CollisionScratch,
};
pub use systems::instances::{InstanceBuffer, ParticleInstance};
pub use systems::particle_system::ParticleSystem;
