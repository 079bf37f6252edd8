use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Tolerance shared by the intersection routines.
pub const EPSILON: f32 = 1e-5;

/// Reflect `d` about the surface normal `n` (`n` must be unit length).
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Map an incidence in `[-1, 1]` to the fraction of momentum handed to the
/// struck body: 1 for a head-on hit, 0 for a perfect graze.
#[inline]
pub fn energy_transfer(incidence: f32) -> f32 {
    (1.0 - (incidence + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Infinite plane `normal . p + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Plane through `point` facing `normal`. The normal is normalized here.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }

    /// Orthogonal projection of `p` onto the plane.
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p - self.normal * self.signed_distance(p)
    }
}

/// Uniformly distributed point inside a disk of `radius` centred at the
/// origin, spanned by the plane perpendicular to `normal`.
pub fn random_in_disk<R: Rng + ?Sized>(rng: &mut R, normal: Vec3, radius: f32) -> Vec3 {
    let (u, v) = normal.normalize_or_zero().any_orthonormal_pair();
    let angle = rng.gen_range(0.0..TAU);
    // sqrt keeps the density uniform over the disk area
    let r = radius * rng.gen::<f32>().sqrt();
    (u * angle.cos() + v * angle.sin()) * r
}

/// HSV (all components in `[0, 1]`) to linear RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = (h.rem_euclid(1.0)) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}
