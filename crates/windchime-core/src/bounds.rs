use glam::Vec3;

use crate::geometry::Target;
use crate::math::Plane;

/// Direction used when the wind source sits exactly on the pruning center.
const FALLBACK_WIND_DIRECTION: Vec3 = Vec3::Z;

/// Sphere around all targets outside of which particles are retired.
///
/// Rebuilt from scratch every tick since targets move.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PruningBounds {
    pub center: Vec3,
    pub radius: f32,
}

impl PruningBounds {
    /// Union box of every target, scaled about its center by `inflation`,
    /// enclosed by a sphere. `None` when there are no targets.
    pub fn from_targets(targets: &[Target], inflation: f32) -> Option<Self> {
        if targets.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for target in targets {
            target.extend_bounds(&mut min, &mut max);
        }

        let center = (min + max) * 0.5;
        let size = (max - min) * inflation;
        Some(Self {
            center,
            radius: size.length() * 0.5,
        })
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Unit direction from `source` toward the center.
    pub fn wind_direction(&self, source: Vec3) -> Vec3 {
        (self.center - source)
            .try_normalize()
            .unwrap_or(FALLBACK_WIND_DIRECTION)
    }

    /// Plane tangent to the sphere on the `source` side, facing the center.
    pub fn emission_plane(&self, source: Vec3) -> Plane {
        let normal = self.wind_direction(source);
        Plane::from_point_normal(self.center - normal * self.radius, normal)
    }
}
