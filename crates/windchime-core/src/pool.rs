//! Fixed-capacity particle arena.
//!
//! Slots `[0, active_count)` are simulated every tick. Dead particles stay in
//! place until the next [`ParticlePool::compact`], which moves survivors to
//! the front without allocating.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Error, Result};
use crate::particle::{Color, ParticleId, WindParticle};

/// Rough number of particles alive at once: a particle crossing the pruning
/// sphere at `wind_velocity` lives about `2 * prune_radius / wind_velocity`
/// seconds, during which `emission_rate` more are emitted.
pub fn estimate_capacity(
    wind_velocity: f32,
    prune_radius: f32,
    emission_rate: f32,
    minimum: usize,
) -> usize {
    if wind_velocity <= 0.0 || !prune_radius.is_finite() || emission_rate <= 0.0 {
        return minimum;
    }
    let lifetime = 2.0 * prune_radius / wind_velocity;
    let estimate = (lifetime * emission_rate).ceil();
    if estimate.is_finite() && estimate > 0.0 {
        minimum.max(estimate as usize)
    } else {
        minimum
    }
}

/// In-place two-pointer partition. Moves every element matching `pred` to the
/// front and returns how many matched. Order is not preserved.
pub fn partition<T, F>(items: &mut [T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut first = 0;
    let mut last = items.len();
    loop {
        while first < last && pred(&items[first]) {
            first += 1;
        }
        loop {
            if first == last {
                return first;
            }
            last -= 1;
            if pred(&items[last]) {
                break;
            }
        }
        items.swap(first, last);
        first += 1;
    }
}

pub struct ParticlePool {
    slots: Vec<WindParticle>,
    capacity: usize,
    active_count: usize,
    next_id: u64,
    velocity: f32,
    mass: f32,
    /// Visited points per particle, only populated when tracking is on.
    paths: HashMap<ParticleId, Vec<Vec3>>,
    track_paths: bool,
}

impl ParticlePool {
    /// Create a pool of `capacity` slots. Spawned particles start with the
    /// given speed and mass.
    pub fn new(capacity: usize, velocity: f32, mass: f32, track_paths: bool) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            active_count: 0,
            next_id: 0,
            velocity,
            mass,
            paths: HashMap::new(),
            track_paths,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    #[inline]
    pub fn tracks_paths(&self) -> bool {
        self.track_paths
    }

    /// Number of alive particles in the active range.
    pub fn alive_count(&self) -> usize {
        self.active().iter().filter(|p| p.alive).count()
    }

    /// Slots `[0, active_count)`, alive or not.
    #[inline]
    pub fn active(&self) -> &[WindParticle] {
        &self.slots[..self.active_count]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut [WindParticle] {
        &mut self.slots[..self.active_count]
    }

    /// Spawn a black particle.
    pub fn spawn(&mut self, position: Vec3, direction: Vec3) -> Result<ParticleId> {
        self.spawn_colored(position, direction, Color::BLACK)
    }

    /// Write a new particle at `active_count`. Fails with
    /// [`Error::PoolExhausted`] when every slot is in use; the pool is left
    /// untouched in that case.
    pub fn spawn_colored(
        &mut self,
        position: Vec3,
        direction: Vec3,
        color: Color,
    ) -> Result<ParticleId> {
        if self.active_count >= self.capacity {
            return Err(Error::PoolExhausted {
                capacity: self.capacity,
            });
        }

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let mut particle = WindParticle::new(id, position, direction, self.velocity, self.mass);
        particle.color = color;

        if self.active_count < self.slots.len() {
            self.slots[self.active_count] = particle;
        } else {
            self.slots.push(particle);
        }
        self.active_count += 1;

        if self.track_paths {
            self.paths.insert(id, vec![position]);
        }
        Ok(id)
    }

    /// Append a point to a particle's path. No-op when tracking is off.
    pub fn record_path_point(&mut self, id: ParticleId, point: Vec3) {
        if !self.track_paths {
            return;
        }
        if let Some(path) = self.paths.get_mut(&id) {
            path.push(point);
        }
    }

    pub fn path(&self, id: ParticleId) -> Option<&[Vec3]> {
        self.paths.get(&id).map(Vec::as_slice)
    }

    /// Number of path entries still held, including ones for dead particles
    /// awaiting compaction.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Move alive particles to the front of the arena, drop paths of the dead
    /// ones, and return the new active count.
    pub fn compact(&mut self) -> usize {
        let old_count = self.active_count;
        let split = partition(&mut self.slots[..old_count], |p| p.alive);

        if self.track_paths {
            for dead in &self.slots[split..old_count] {
                self.paths.remove(&dead.id);
            }
        }

        self.active_count = split;
        split
    }
}
