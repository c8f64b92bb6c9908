//! Narrow-phase primitive the particle pass borrows from the rigid-body side.
//!
//! Rectangle-vs-particle contacts are not solved by hand: the particle is
//! stood in for by a small proxy ball and handed to parry's cuboid/ball
//! contact query (via rapier2d), the same solver rigid bodies use.

use glam::Vec2;
use rapier2d::na;
use rapier2d::parry::query;
use rapier2d::parry::shape::{Ball, Cuboid};

use crate::components::rigid::{RigidCircle, RigidRectangle};
use crate::core::vec2;

// ---------------------------------------------------------------------------
// Conversion helpers (private) — glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn pos_rot_to_na_iso(pos: Vec2, rotation: f32) -> na::Isometry2<f32> {
    na::Isometry2::new(vec2_to_na(pos), rotation)
}

// ---------------------------------------------------------------------------
// Particle contact
// ---------------------------------------------------------------------------

/// Push `proxy` out of `rect` if they overlap.
///
/// On contact the proxy is moved along the rectangle's outward normal by the
/// penetration depth, `mtv` receives that minimum translation vector and
/// `true` is returned. Touching or separated shapes leave both untouched.
pub fn particle_process_collision(
    rect: &RigidRectangle,
    proxy: &mut RigidCircle,
    mtv: &mut Vec2,
) -> bool {
    let half = rect.half_extents();
    let cuboid = Cuboid::new(vec2_to_na(half));
    let ball = Ball::new(proxy.radius());

    let contact = match query::contact(
        &pos_rot_to_na_iso(rect.center(), rect.rotation()),
        &cuboid,
        &pos_rot_to_na_iso(proxy.center(), 0.0),
        &ball,
        0.0,
    ) {
        Ok(Some(contact)) => contact,
        Ok(None) => return false,
        Err(_) => {
            log::warn!("cuboid/ball contact query unsupported");
            return false;
        }
    };

    if contact.dist >= 0.0 {
        return false;
    }

    let normal = na_to_vec2(&contact.normal1);
    vec2::scale(mtv, normal, -contact.dist);
    proxy.set_center(proxy.center() + *mtv);
    true
}
