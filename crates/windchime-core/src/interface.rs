//! Collaborators the simulation reads from or writes to but does not own.

use glam::Vec3;

use crate::geometry::{Cylinder, Target, TargetId};
use crate::particle::Color;

/// Supplies the world-space targets for the current tick.
pub trait CylinderProvider {
    /// Append the current targets to `out`. Order defines [`TargetId`]s.
    fn snapshot(&self, out: &mut Vec<Target>);
}

impl CylinderProvider for [Target] {
    fn snapshot(&self, out: &mut Vec<Target>) {
        out.extend_from_slice(self);
    }
}

impl CylinderProvider for [Cylinder] {
    fn snapshot(&self, out: &mut Vec<Target>) {
        out.extend(self.iter().copied().map(Target::Cylinder));
    }
}

impl<T> CylinderProvider for Vec<T>
where
    [T]: CylinderProvider,
{
    fn snapshot(&self, out: &mut Vec<Target>) {
        self.as_slice().snapshot(out);
    }
}

/// An instantaneous push on the body owning `target`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Impulse {
    pub target: TargetId,
    pub force: Vec3,
    /// World-space application point.
    pub point: Vec3,
}

/// Applies impulses to rigid bodies. Fire-and-forget.
pub trait ImpulseReceiver {
    fn apply_impulse(&mut self, impulse: &Impulse);
}

impl ImpulseReceiver for Vec<Impulse> {
    fn apply_impulse(&mut self, impulse: &Impulse) {
        self.push(*impulse);
    }
}

impl<F: FnMut(&Impulse)> ImpulseReceiver for F {
    fn apply_impulse(&mut self, impulse: &Impulse) {
        self(impulse)
    }
}

/// Observation-only sink for particle paths.
pub trait DebugPathRenderer {
    fn draw_polyline(&mut self, points: &[Vec3], color: Color);
}
