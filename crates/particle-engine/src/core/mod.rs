pub mod error;
pub mod object_set;
pub mod physics;
pub mod rng;
pub mod time;
pub mod vec2;
