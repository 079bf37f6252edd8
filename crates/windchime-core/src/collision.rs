use glam::Vec3;

use crate::math::{energy_transfer, reflect};

/// Result of one particle striking a surface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CollisionResponse {
    /// New travel direction.
    pub reflection: Vec3,
    /// `d . r`: -1 head-on, +1 grazing.
    pub incidence: f32,
    /// Fraction of momentum handed to the body, in `[0, 1]`.
    pub energy_transfer: f32,
    /// Impulse to apply at the hit point.
    pub force: Vec3,
    /// Particle speed after the hit.
    pub velocity: f32,
}

/// Reflect a particle moving along unit `direction` off a surface with unit
/// `normal`, splitting its momentum between the body and the rebound.
///
/// The reflection is returned even for a perfect graze where no energy moves.
pub fn respond(direction: Vec3, velocity: f32, mass: f32, normal: Vec3) -> CollisionResponse {
    let reflection = reflect(direction, normal);
    let incidence = direction.dot(reflection).clamp(-1.0, 1.0);
    let transfer = energy_transfer(incidence);

    CollisionResponse {
        reflection,
        incidence,
        energy_transfer: transfer,
        force: direction * velocity * mass * transfer,
        velocity: velocity * (1.0 - transfer),
    }
}
