//! Ray and point queries against the lateral surface of a capped cylinder.
//!
//! End caps are never reported as hits. Degenerate inputs (zero radius, zero
//! axis length, a ray parallel to the axis) produce `None` instead of NaN.

use glam::Vec3;

use crate::math::EPSILON;

/// `|dir x axis|^2` below this fraction of `|axis|^2` counts as parallel.
const PARALLEL_EPSILON: f32 = 1e-10;

/// A bell volume: axis segment `bottom..top` with a world-space radius.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cylinder {
    pub top: Vec3,
    pub bottom: Vec3,
    pub radius: f32,
}

/// A ray/cylinder intersection.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CylinderHit {
    pub point: Vec3,
    /// Unit vector from the axis toward `point`.
    pub normal: Vec3,
    /// Signed distance along the ray. Negative only for backtracking casts
    /// that start inside the cylinder.
    pub distance: f32,
}

impl Cylinder {
    pub fn new(top: Vec3, bottom: Vec3, radius: f32) -> Self {
        Self { top, bottom, radius }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.top.distance(self.bottom)
    }

    /// Where along the bell an impact landed: 0 at `top`, 1 at `bottom`.
    pub fn impact_extent(&self, point: Vec3) -> f32 {
        let length = self.length();
        if length <= EPSILON {
            return 0.0;
        }
        ((point - self.top).length() / length).clamp(0.0, 1.0)
    }

    pub fn ray(&self, origin: Vec3, direction: Vec3) -> Option<CylinderHit> {
        ray_cylinder(origin, direction, self.bottom, self.top, self.radius)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point_in_cylinder(point, self.bottom, self.top, self.radius).is_some()
    }
}

/// Nearest root of the ray/infinite-cylinder quadratic, or `None` when there
/// is no real root or the configuration is degenerate.
fn nearest_root(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, r: f32) -> Option<f32> {
    if !(r > EPSILON) {
        return None;
    }
    let ab = b - a;
    let ab2 = ab.length_squared();
    if ab2 <= EPSILON * EPSILON {
        return None;
    }

    let ao = origin - a;
    let ao_x_ab = ao.cross(ab);
    let v_x_ab = dir.cross(ab);

    let qa = v_x_ab.length_squared();
    if qa <= PARALLEL_EPSILON * ab2 {
        return None;
    }
    let qb = 2.0 * v_x_ab.dot(ao_x_ab);
    let qc = ao_x_ab.length_squared() - r * r * ab2;

    let disc = qb * qb - 4.0 * qa * qc;
    if disc < -EPSILON {
        return None;
    }
    let t = (-qb - disc.max(0.0).sqrt()) / (2.0 * qa);
    t.is_finite().then_some(t)
}

/// Accept a candidate distance only if it projects between the endpoints.
fn finish_hit(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, t: f32) -> Option<CylinderHit> {
    let ab = b - a;
    let ab_len = ab.length();
    let point = origin + dir * t;
    let projection = a + ab * (ab.dot(point - a) / ab.length_squared());

    // The endpoint distances only sum to the axis length when the projection
    // lies on the segment.
    let span = (projection - a).length() + (b - projection).length();
    if span > ab_len + EPSILON * ab_len.max(1.0) {
        return None;
    }

    let normal = (point - projection).try_normalize()?;
    Some(CylinderHit {
        point,
        normal,
        distance: t,
    })
}

/// Intersect a ray (unit `dir`) with the lateral surface of the cylinder with
/// axis `a..b` and radius `r`. Hits behind the origin are rejected.
pub fn ray_cylinder(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, r: f32) -> Option<CylinderHit> {
    let t = nearest_root(origin, dir, a, b, r)?;
    if t < -EPSILON {
        return None;
    }
    finish_hit(origin, dir, a, b, t)
}

/// Like [`ray_cylinder`], but a ray starting inside the cylinder reports the
/// surface point behind it with a negative distance.
pub fn ray_cylinder_backtracking(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    r: f32,
) -> Option<CylinderHit> {
    let t = nearest_root(origin, dir, a, b, r)?;
    if t < -EPSILON && point_in_cylinder(origin, a, b, r).is_none() {
        return None;
    }
    finish_hit(origin, dir, a, b, t)
}

/// Intersect the segment `start..end` with the lateral surface.
pub fn segment_cylinder(start: Vec3, end: Vec3, a: Vec3, b: Vec3, r: f32) -> Option<CylinderHit> {
    let delta = end - start;
    let length = delta.length() + EPSILON;
    let dir = delta / length;
    ray_cylinder(start, dir, a, b, r).filter(|hit| hit.distance <= length)
}

/// Test whether `point` lies inside the capped cylinder `a..b`. Returns the
/// distance from the axis when it does.
pub fn point_in_cylinder(point: Vec3, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
    let axis = b - a;
    let length2 = axis.length_squared();
    if length2 <= 0.0 {
        return None;
    }

    let offset = point - a;
    let dot = offset.dot(axis);
    // behind the `a` cap or past the `b` cap
    if dot < 0.0 || dot > length2 {
        return None;
    }

    let dsq = offset.length_squared() - dot * dot / length2;
    (dsq < radius * radius).then(|| dsq.max(0.0).sqrt())
}
