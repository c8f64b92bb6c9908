pub mod collision;
pub mod instances;
pub mod particle_system;
