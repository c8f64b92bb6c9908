//! Point-mass particle integrated with symplectic Euler.

use glam::Vec2;

use crate::core::vec2;

/// A single particle: position plus velocity state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    /// Extra acceleration on top of the system field.
    acceleration: Vec2,
    /// Velocity multiplier applied every update (1.0 = no drag).
    drag: f32,
}

impl Particle {
    pub const DEFAULT_DRAG: f32 = 0.95;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag: Self::DEFAULT_DRAG,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn drag(&self) -> f32 {
        self.drag
    }

    pub fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    /// Advance by `dt` seconds under `field` plus the particle's own acceleration.
    ///
    /// v += a * dt; v *= drag; x += v * dt
    pub fn update(&mut self, field: Vec2, dt: f32) {
        let accel = field + self.acceleration;
        let velocity = self.velocity;
        vec2::scale_and_add(&mut self.velocity, velocity, accel, dt);
        let velocity = self.velocity;
        vec2::scale(&mut self.velocity, velocity, self.drag);
        let position = self.position;
        vec2::scale_and_add(&mut self.position, position, self.velocity, dt);
    }
}
