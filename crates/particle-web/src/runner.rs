use particle_engine::{
    EntityId, FrameClock, InstanceBuffer, ParticleConfig, ParticleEmitter, ParticleWorld, Result,
};
use particle_engine::glam::Vec2;

/// Drives a `ParticleWorld` from browser frame callbacks.
///
/// `lib.rs` keeps one of these in a `thread_local!` and exports free
/// functions through `#[wasm_bindgen]`.
pub struct ParticleRunner {
    world: ParticleWorld,
    clock: FrameClock,
    instances: InstanceBuffer,
}

impl ParticleRunner {
    /// Build a runner. Fails if `config` does not validate.
    pub fn new(config: ParticleConfig) -> Result<Self> {
        let clock = FrameClock::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame);
        let instances = InstanceBuffer::with_capacity(config.max_instances);
        Ok(Self {
            world: ParticleWorld::new(config)?,
            clock,
            instances,
        })
    }

    /// Build a runner from JSON; an empty string means defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Self::new(ParticleConfig::default());
        }
        Self::new(ParticleConfig::from_json(json)?)
    }

    /// Run as many fixed updates as `dt` seconds of wall time covers, then
    /// rebuild the instance buffer.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            let report = self.world.step(self.clock.dt());
            if report.contacts > 0 {
                log::trace!("frame {}: {:?}", self.clock.frames(), report);
            }
        }
        self.instances
            .rebuild(&self.world.particles, &self.world.dye_packs);
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.world.system.set_system_acceleration(Vec2::new(x, y));
    }

    pub fn add_circle(&mut self, x: f32, y: f32, radius: f32) -> u32 {
        self.world.add_circle(Vec2::new(x, y), radius).0
    }

    pub fn add_rect(&mut self, x: f32, y: f32, width: f32, height: f32, rotation: f32) -> u32 {
        self.world
            .add_rectangle(Vec2::new(x, y), width, height, rotation)
            .0
    }

    pub fn remove_rigid(&mut self, id: u32) -> bool {
        self.world
            .remove_rigid(EntityId(id))
            .is_some()
    }

    pub fn emit(&mut self, x: f32, y: f32, count: u32) {
        self.world.add_emitter(ParticleEmitter::new(Vec2::new(x, y), count));
    }

    /// Returns the pack's id. Ids start at 1.
    pub fn spawn_dye_pack(&mut self, x: f32, y: f32) -> u32 {
        self.world.spawn_dye_pack(Vec2::new(x, y)).0
    }

    /// Returns true when the hit expired the pack. Unknown ids are logged
    /// and ignored.
    pub fn hit_dye_pack(&mut self, id: u32) -> bool {
        match self.world.hit_dye_pack(EntityId(id)) {
            Ok(expired) => expired,
            Err(e) => {
                log::warn!("hit_dye_pack: {}", e);
                false
            }
        }
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn dye_pack_offset(&self) -> u32 {
        self.instances.dye_pack_offset()
    }

    pub fn max_instances(&self) -> u32 {
        self.instances.max_instances() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.world.particles.size() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let runner = ParticleRunner::from_json("").unwrap();
        assert_eq!(runner.max_instances(), ParticleConfig::default().max_instances as u32);
    }

    #[test]
    fn bad_json_is_rejected() {
        assert!(ParticleRunner::from_json("{ nope").is_err());
    }

    #[test]
    fn tick_emits_and_exports_instances() {
        let mut runner = ParticleRunner::new(ParticleConfig::default()).unwrap();
        runner.add_rect(0.0, -1.0, 100.0, 2.0, 0.0);
        runner.emit(0.0, 5.0, 4);
        runner.spawn_dye_pack(20.0, 20.0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.particle_count(), 4);
        assert_eq!(runner.instance_count(), 5);
        assert_eq!(runner.dye_pack_offset(), 4);
    }

    #[test]
    fn hit_unknown_dye_pack_is_ignored() {
        let mut runner = ParticleRunner::new(ParticleConfig::default()).unwrap();
        assert!(!runner.hit_dye_pack(9));
        assert!(!runner.hit_dye_pack(0));
        let id = runner.spawn_dye_pack(0.0, 0.0);
        assert_ne!(id, 0);
        assert!(runner.hit_dye_pack(id));
    }

    #[test]
    fn dye_pack_handle_outlives_earlier_removal() {
        let mut runner = ParticleRunner::new(ParticleConfig::default()).unwrap();
        let first = runner.spawn_dye_pack(0.0, 0.0);
        let second = runner.spawn_dye_pack(10.0, 0.0);
        let third = runner.spawn_dye_pack(20.0, 0.0);
        assert!(runner.hit_dye_pack(first));
        runner.tick(1.0 / 60.0);
        assert!(runner.hit_dye_pack(second));
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.instance_count(), 1);
        assert!(runner.hit_dye_pack(third));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ParticleConfig {
            fixed_dt: -1.0 / 60.0,
            ..ParticleConfig::default()
        };
        assert!(ParticleRunner::new(config).is_err());
    }
}
