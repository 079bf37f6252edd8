use glam::Vec3;
use rand::Rng;

use crate::geometry::cylinder::{
    point_in_cylinder, ray_cylinder, ray_cylinder_backtracking, Cylinder, CylinderHit,
};
use crate::math::{random_in_disk, Plane};

/// Index of a target in the current tick's snapshot. Doubles as the handle
/// that impulses are routed by.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TargetId(pub usize);

/// Which ray/cylinder variant the built-in intersector uses.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionMode {
    /// Reject hits behind the ray origin.
    #[default]
    Strict,
    /// Allow hits behind the origin when the origin is inside the volume.
    Backtracking,
}

/// A collidable volume. New shapes are added as variants.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Cylinder(Cylinder),
}

impl From<Cylinder> for Target {
    fn from(c: Cylinder) -> Self {
        Target::Cylinder(c)
    }
}

impl Target {
    pub fn intersect(&self, origin: Vec3, dir: Vec3, mode: IntersectionMode) -> Option<CylinderHit> {
        match self {
            Target::Cylinder(c) => match mode {
                IntersectionMode::Strict => ray_cylinder(origin, dir, c.bottom, c.top, c.radius),
                IntersectionMode::Backtracking => {
                    ray_cylinder_backtracking(origin, dir, c.bottom, c.top, c.radius)
                }
            },
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        match self {
            Target::Cylinder(c) => point_in_cylinder(point, c.bottom, c.top, c.radius).is_some(),
        }
    }

    /// Grow the box `min..max` to enclose this target.
    pub fn extend_bounds(&self, min: &mut Vec3, max: &mut Vec3) {
        match self {
            Target::Cylinder(c) => {
                let r = Vec3::splat(c.radius.max(0.0));
                for end in [c.top, c.bottom] {
                    *min = min.min(end - r);
                    *max = max.max(end + r);
                }
            }
        }
    }

    /// A point on `plane` whose projection along the plane normal is likely
    /// to strike this target.
    pub fn emission_point<R: Rng + ?Sized>(&self, plane: &Plane, rng: &mut R) -> Vec3 {
        match self {
            Target::Cylinder(c) => {
                // shadow of the axis on the plane, widened by the radius
                let a = plane.closest_point(c.top);
                let b = plane.closest_point(c.bottom);
                let on_axis = a.lerp(b, rng.gen_range(0.0..=1.0));
                on_axis + random_in_disk(rng, plane.normal, c.radius)
            }
        }
    }

    pub fn as_cylinder(&self) -> Option<&Cylinder> {
        match self {
            Target::Cylinder(c) => Some(c),
        }
    }
}
