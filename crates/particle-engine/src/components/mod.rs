pub mod dye_pack;
pub mod emitter;
pub mod particle;
pub mod particle_object;
pub mod rigid;
pub mod transform;
