use glam::Vec2;

use crate::api::config::ParticleConfig;
use crate::api::types::EntityId;
use crate::components::dye_pack::{DyePack, DyePackSet};
use crate::components::emitter::{EmitterSet, ParticleEmitter};
use crate::components::particle_object::{ParticleGameObject, ParticleObjectSet};
use crate::components::rigid::{GameObjectSet, RigidObject, RigidRectangle, RigidShape};
use crate::core::error::{ParticleError, Result};
use crate::core::object_set::Expirable;
use crate::core::rng::Rng;
use crate::systems::particle_system::ParticleSystem;

/// What happened during one world step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub emitted: usize,
    pub contacts: usize,
    pub expired_particles: usize,
    pub expired_dye_packs: usize,
}

/// Owns every set the particle pass touches and runs one update per `step`.
pub struct ParticleWorld {
    config: ParticleConfig,
    pub system: ParticleSystem,
    pub rigid: GameObjectSet,
    pub particles: ParticleObjectSet,
    pub emitters: EmitterSet,
    pub dye_packs: DyePackSet,
    rng: Rng,
    next_id: u32,
}

impl ParticleWorld {
    /// Build a world, rejecting configs the simulation cannot run with.
    pub fn new(config: ParticleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ParticleConfig) -> Self {
        Self {
            system: ParticleSystem::new(&config),
            rigid: GameObjectSet::new(),
            particles: ParticleObjectSet::with_capacity(config.max_instances),
            emitters: EmitterSet::new(),
            dye_packs: DyePackSet::new(),
            rng: Rng::new(config.seed),
            next_id: 1,
            config,
        }
    }

    /// Build a world from a JSON config string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(ParticleConfig::from_json(json)?)
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_circle(&mut self, center: Vec2, radius: f32) -> EntityId {
        let id = self.next_id();
        self.rigid.add(RigidObject::circle(id, center, radius));
        log::debug!("rigid circle {:?} at {:?} r={}", id, center, radius);
        id
    }

    pub fn add_rectangle(&mut self, center: Vec2, width: f32, height: f32, rotation: f32) -> EntityId {
        let id = self.next_id();
        let rect = RigidRectangle::new(center, width, height).with_rotation(rotation);
        self.rigid.add(RigidObject::new(id, RigidShape::Rectangle(rect)));
        log::debug!("rigid rectangle {:?} at {:?} {}x{}", id, center, width, height);
        id
    }

    /// Remove a rigid object by ID. Returns the removed object if found.
    pub fn remove_rigid(&mut self, id: EntityId) -> Option<RigidObject> {
        let index = self.rigid.iter().position(|o| o.id == id)?;
        self.rigid.remove_at(index).ok()
    }

    pub fn add_particle(&mut self, particle: ParticleGameObject) {
        self.particles.add(particle);
    }

    pub fn add_emitter(&mut self, emitter: ParticleEmitter) {
        self.emitters.add(emitter);
    }

    /// Spawn a dye pack. Returns its id, which stays valid across removals.
    pub fn spawn_dye_pack(&mut self, position: Vec2) -> EntityId {
        let id = self.next_id();
        let pack = DyePack::new(id, position, &mut self.rng);
        log::debug!(
            "dye pack {:?} at {:?} state={:?} target={:?}",
            id,
            position,
            pack.current_state(),
            pack.target_position()
        );
        self.dye_packs.add(pack);
        id
    }

    pub fn dye_pack(&self, id: EntityId) -> Option<&DyePack> {
        self.dye_packs.iter().find(|p| p.id() == id)
    }

    /// Register a hit on the dye pack `id`. Returns whether it expired.
    pub fn hit_dye_pack(&mut self, id: EntityId) -> Result<bool> {
        let pack = self
            .dye_packs
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(ParticleError::UnknownEntity(id.0))?;
        pack.set_expired();
        Ok(pack.has_expired())
    }

    /// Run one fixed update of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport::default();

        for emitter in self.emitters.iter_mut() {
            report.emitted += emitter.emit(&mut self.particles, &mut self.rng);
        }
        self.emitters.remove_expired();

        self.system.update(&mut self.particles, dt);
        report.contacts = self
            .system
            .collide_with_rigid_set(&self.rigid, &mut self.particles);

        for pack in self.dye_packs.iter_mut() {
            pack.update(dt);
        }

        report.expired_particles = self.particles.remove_expired();
        report.expired_dye_packs = self.dye_packs.remove_expired();
        if report.expired_dye_packs > 0 {
            log::debug!("removed {} expired dye packs", report.expired_dye_packs);
        }

        report
    }
}

impl Default for ParticleWorld {
    fn default() -> Self {
        Self::build(ParticleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_particle(pos: Vec2, life: i32) -> ParticleGameObject {
        ParticleGameObject::new(pos, 1.0, life)
    }

    #[test]
    fn particle_lands_on_circle_under_gravity() {
        let mut world = ParticleWorld::default();
        world.add_circle(Vec2::ZERO, 5.0);
        world.add_particle(still_particle(Vec2::new(0.0, 5.05), 1000));

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let p = world.particles.get_object_at(0).unwrap().particle().position();
        let d = p.length();
        assert!((d - 5.0).abs() < 1e-3, "particle should rest on the circle: d={}", d);
    }

    #[test]
    fn particle_rests_on_rectangle_floor() {
        let mut world = ParticleWorld::default();
        world.add_rectangle(Vec2::new(0.0, -1.0), 40.0, 2.0, 0.0);
        world.add_particle(still_particle(Vec2::new(3.0, 1.0), 1000));

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        let p = world.particles.get_object_at(0).unwrap().particle().position();
        assert!(p.y > -0.05, "particle fell through the floor: y={}", p.y);
        assert!(p.y < 1.0, "particle did not fall: y={}", p.y);
    }

    #[test]
    fn expired_particles_are_removed() {
        let mut world = ParticleWorld::default();
        world.add_particle(still_particle(Vec2::ZERO, 0));
        world.add_particle(still_particle(Vec2::ZERO, 5));
        let report = world.step(1.0 / 60.0);
        assert_eq!(report.expired_particles, 1);
        assert_eq!(world.particles.size(), 1);
    }

    #[test]
    fn emitter_feeds_particle_set_then_retires() {
        let mut world = ParticleWorld::default();
        world.add_emitter(ParticleEmitter::new(Vec2::new(0.0, 50.0), 4).with_cycles_to_live(100, 100));
        let report = world.step(1.0 / 60.0);
        assert_eq!(report.emitted, 4);
        assert_eq!(world.particles.size(), 4);
        assert!(world.emitters.is_empty());
    }

    #[test]
    fn contacts_counted_per_frame() {
        let mut world = ParticleWorld::default();
        world.system.set_system_acceleration(Vec2::ZERO);
        world.add_circle(Vec2::ZERO, 5.0);
        world.add_circle(Vec2::new(100.0, 0.0), 5.0);
        world.add_particle(still_particle(Vec2::new(1.0, 0.0), 10));
        world.add_particle(still_particle(Vec2::new(101.0, 0.0), 10));
        world.add_particle(still_particle(Vec2::new(50.0, 0.0), 10));
        let report = world.step(1.0 / 60.0);
        assert_eq!(report.contacts, 2);
    }

    #[test]
    fn dye_pack_hit_and_removed() {
        let mut world = ParticleWorld::default();
        let id = world.spawn_dye_pack(Vec2::new(50.0, 40.0));
        assert_eq!(world.dye_packs.size(), 1);

        world.step(1.0 / 60.0);
        let y = world.dye_pack(id).unwrap().xform().position.y;
        assert!(y < 40.0, "dye pack should drift down: y={}", y);

        assert!(world.hit_dye_pack(id).unwrap());
        let report = world.step(1.0 / 60.0);
        assert_eq!(report.expired_dye_packs, 1);
        assert!(world.dye_packs.is_empty());
        assert!(world.dye_pack(id).is_none());
    }

    #[test]
    fn dye_pack_ids_survive_earlier_removals() {
        let mut world = ParticleWorld::default();
        let a = world.spawn_dye_pack(Vec2::new(0.0, 0.0));
        let b = world.spawn_dye_pack(Vec2::new(10.0, 0.0));
        let c = world.spawn_dye_pack(Vec2::new(20.0, 0.0));

        assert!(world.hit_dye_pack(a).unwrap());
        world.step(1.0 / 60.0);
        assert_eq!(world.dye_packs.size(), 2);

        assert!(world.hit_dye_pack(b).unwrap());
        let hit = world.dye_pack(b).unwrap();
        assert_eq!(hit.lives_remaining(), 0);
        assert!((hit.xform().position.x - 10.0).abs() < 1e-6);

        let untouched = world.dye_pack(c).unwrap();
        assert_eq!(untouched.lives_remaining(), 1);
        assert!((untouched.xform().position.x - 20.0).abs() < 1e-6);
    }

    #[test]
    fn hit_unknown_dye_pack_is_an_error() {
        let mut world = ParticleWorld::default();
        assert!(matches!(
            world.hit_dye_pack(EntityId(3)),
            Err(ParticleError::UnknownEntity(3))
        ));
        let rock = world.add_circle(Vec2::ZERO, 1.0);
        assert!(world.hit_dye_pack(rock).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_by_new() {
        let config = ParticleConfig {
            fixed_dt: -1.0 / 60.0,
            ..ParticleConfig::default()
        };
        assert!(matches!(
            ParticleWorld::new(config),
            Err(ParticleError::InvalidConfig(_))
        ));
        assert!(ParticleWorld::new(ParticleConfig::default()).is_ok());
    }

    #[test]
    fn remove_rigid_by_id() {
        let mut world = ParticleWorld::default();
        let a = world.add_circle(Vec2::ZERO, 1.0);
        let b = world.add_rectangle(Vec2::ZERO, 1.0, 1.0, 0.0);
        assert_ne!(a, b);
        assert!(world.remove_rigid(a).is_some());
        assert!(world.remove_rigid(a).is_none());
        assert_eq!(world.rigid.size(), 1);
    }

    #[test]
    fn world_from_json_uses_gravity() {
        let world = ParticleWorld::from_json(r#"{ "gravity": [1.0, 2.0] }"#).unwrap();
        assert_eq!(world.system.system_acceleration(), Vec2::new(1.0, 2.0));
    }
}
