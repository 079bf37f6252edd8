use glam::Vec3;

use crate::geometry::{IntersectionMode, Target, TargetId};

/// Bit set of collision layers a cast may hit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    #[inline]
    pub fn contains(self, layer: u32) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// A hit reported by a raycaster.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RaycastHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    /// Body that should receive the impulse.
    pub target: TargetId,
}

/// Casts a bounded ray and appends every hit to `hits`, in any order.
pub trait BroadPhaseRaycaster {
    fn raycast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: LayerMask,
        hits: &mut Vec<RaycastHit>,
    );
}

/// Raycaster over a target snapshot, using the closed-form intersectors.
/// Every target is on layer 0.
pub struct CylinderRaycaster<'a> {
    targets: &'a [Target],
    mode: IntersectionMode,
}

impl<'a> CylinderRaycaster<'a> {
    pub fn new(targets: &'a [Target], mode: IntersectionMode) -> Self {
        Self { targets, mode }
    }
}

impl BroadPhaseRaycaster for CylinderRaycaster<'_> {
    fn raycast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: LayerMask,
        hits: &mut Vec<RaycastHit>,
    ) {
        if !layer_mask.contains(0) {
            return;
        }
        for (index, target) in self.targets.iter().enumerate() {
            if let Some(hit) = target.intersect(origin, direction, self.mode) {
                if hit.distance <= max_distance {
                    hits.push(RaycastHit {
                        point: hit.point,
                        normal: hit.normal,
                        distance: hit.distance,
                        target: TargetId(index),
                    });
                }
            }
        }
    }
}
