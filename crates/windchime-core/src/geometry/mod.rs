//! Target geometry: closed-form cylinder queries and the target variants
//! built on them.
pub mod cylinder;
pub mod target;

pub use cylinder::{
    point_in_cylinder, ray_cylinder, ray_cylinder_backtracking, segment_cylinder, Cylinder,
    CylinderHit,
};
pub use target::{IntersectionMode, Target, TargetId};
