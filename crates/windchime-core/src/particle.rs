use glam::Vec3;

/// Stable particle identifier, assigned at spawn and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct ParticleId(pub u64);

/// RGBA color used for path rendering.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// One wind particle, stored by value in the pool.
///
/// `direction` is expected to be unit length and `velocity`/`mass`
/// non-negative; spawners are responsible for that. Once `alive` is false the
/// remaining fields are meaningless and the slot may be reused.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WindParticle {
    pub id: ParticleId,
    pub position: Vec3,
    pub direction: Vec3,
    /// Scalar speed along `direction`.
    pub velocity: f32,
    pub mass: f32,
    pub alive: bool,
    pub color: Color,
    /// Set once the particle is first seen inside the pruning sphere.
    pub has_entered_target_bounds: bool,
}

impl WindParticle {
    pub fn new(id: ParticleId, position: Vec3, direction: Vec3, velocity: f32, mass: f32) -> Self {
        Self {
            id,
            position,
            direction,
            velocity,
            mass,
            alive: true,
            color: Color::BLACK,
            has_entered_target_bounds: false,
        }
    }

    /// Momentum vector (`direction * velocity * mass`).
    #[inline]
    pub fn momentum(&self) -> Vec3 {
        self.direction * self.velocity * self.mass
    }
}
