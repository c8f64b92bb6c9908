use bytemuck::{Pod, Zeroable};

use crate::components::dye_pack::DyePackSet;
use crate::components::particle_object::ParticleObjectSet;
use crate::components::transform::Transform;

/// Per-instance draw data read by the browser renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn from_xform(xf: &Transform) -> Self {
        let [r, g, b, a] = xf.color;
        Self {
            x: xf.position.x,
            y: xf.position.y,
            width: xf.size.x,
            height: xf.size.y,
            r,
            g,
            b,
            a,
        }
    }
}

/// Particles first, then dye packs starting at `dye_pack_offset`.
pub struct InstanceBuffer {
    instances: Vec<ParticleInstance>,
    max_instances: usize,
    dye_pack_offset: u32,
}

impl InstanceBuffer {
    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            max_instances,
            dye_pack_offset: 0,
        }
    }

    /// Rebuild from the current sets. Objects beyond capacity are not drawn.
    pub fn rebuild(&mut self, particles: &ParticleObjectSet, dye_packs: &DyePackSet) {
        self.instances.clear();
        let cap = self.max_instances;

        let particle_xforms = particles.iter().map(|p| p.xform());
        self.instances.extend(
            particle_xforms
                .take(cap)
                .map(|xf| ParticleInstance::from_xform(&xf)),
        );
        self.dye_pack_offset = self.instances.len() as u32;

        let room = cap - self.instances.len();
        self.instances.extend(
            dye_packs
                .iter()
                .take(room)
                .map(|d| ParticleInstance::from_xform(d.xform())),
        );
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn dye_pack_offset(&self) -> u32 {
        self.dye_pack_offset
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<ParticleInstance, f32>(&self.instances).as_ptr()
    }
}
