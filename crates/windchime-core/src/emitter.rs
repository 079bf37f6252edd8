//! Particle emission: where new wind particles appear and how often.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bounds::PruningBounds;
use crate::config::{EmissionSource, WindConfig};
use crate::error::{Error, Result};
use crate::geometry::Target;
use crate::math::{hsv_to_rgb, random_in_disk, Plane};
use crate::particle::{Color, ParticleId};
use crate::pool::ParticlePool;

/// Outcome of one emission burst.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct EmissionTally {
    pub emitted: usize,
    /// Spawns refused because the pool was full.
    pub dropped: usize,
}

pub struct Emitter {
    rng: StdRng,
    /// Seconds between bursts; `None` disables periodic emission.
    period: Option<f32>,
    countdown: f32,
    source: EmissionSource,
    source_position: Vec3,
    random_colors: bool,
}

impl Emitter {
    pub fn new(config: &WindConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let period = (config.particles_per_second > 0.0).then(|| 1.0 / config.particles_per_second);
        Self {
            rng,
            period,
            countdown: 0.0,
            source: config.emission,
            source_position: config.source_position,
            random_colors: config.random_path_colors,
        }
    }

    /// Advance the cadence clock by `dt` and return how many bursts fell
    /// due. The remainder carries over to the next tick.
    pub fn due(&mut self, dt: f32) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };
        self.countdown -= dt;
        if self.countdown >= 0.0 {
            return 0;
        }
        let bursts = (-self.countdown / period).floor() + 1.0;
        self.countdown += bursts * period;
        bursts as u32
    }

    /// Random point on `plane` inside the shadow `target` casts along the
    /// plane normal.
    pub fn emission_point(&mut self, target: &Target, plane: &Plane) -> Vec3 {
        target.emission_point(plane, &mut self.rng)
    }

    /// Run the cadence clock and emit every burst that fell due: one particle
    /// per target (targeted mode) or a single particle from the fan.
    pub fn emit_periodic(
        &mut self,
        dt: f32,
        targets: &[Target],
        bounds: &PruningBounds,
        pool: &mut ParticlePool,
    ) -> EmissionTally {
        let mut tally = EmissionTally::default();
        let bursts = self.due(dt);

        for burst in 0..bursts {
            if pool.active_count() >= pool.capacity() {
                let per_burst = match self.source {
                    EmissionSource::Targeted => targets.len(),
                    EmissionSource::Fan { .. } => 1,
                };
                tally.dropped += (bursts - burst) as usize * per_burst;
                break;
            }
            self.burst(targets, bounds, pool, &mut tally);
        }
        tally
    }

    fn burst(
        &mut self,
        targets: &[Target],
        bounds: &PruningBounds,
        pool: &mut ParticlePool,
        tally: &mut EmissionTally,
    ) {
        match self.source {
            EmissionSource::Targeted => {
                let plane = bounds.emission_plane(self.source_position);
                for target in targets {
                    let position = self.emission_point(target, &plane);
                    record(self.spawn(pool, position, plane.normal), tally);
                }
            }
            EmissionSource::Fan { radius } => {
                let (position, direction) = self.fan_point(bounds, radius);
                record(self.spawn(pool, position, direction), tally);
            }
        }
    }

    /// Emit a single particle on demand: toward the first target, or from the
    /// fan in fan mode.
    pub fn emit_one(
        &mut self,
        targets: &[Target],
        bounds: &PruningBounds,
        pool: &mut ParticlePool,
    ) -> Result<ParticleId> {
        match self.source {
            EmissionSource::Targeted => {
                let target = targets.first().ok_or(Error::NoTargets)?;
                let plane = bounds.emission_plane(self.source_position);
                let position = self.emission_point(target, &plane);
                self.spawn(pool, position, plane.normal)
            }
            EmissionSource::Fan { radius } => {
                let (position, direction) = self.fan_point(bounds, radius);
                self.spawn(pool, position, direction)
            }
        }
    }

    fn fan_point(&mut self, bounds: &PruningBounds, radius: f32) -> (Vec3, Vec3) {
        let direction = bounds.wind_direction(self.source_position);
        let offset = random_in_disk(&mut self.rng, direction, radius);
        (self.source_position + offset, direction)
    }

    fn spawn(&mut self, pool: &mut ParticlePool, position: Vec3, direction: Vec3) -> Result<ParticleId> {
        let color = if self.random_colors {
            let (r, g, b) = hsv_to_rgb(
                self.rng.gen_range(0.0..1.0),
                self.rng.gen_range(0.9..=1.0),
                1.0,
            );
            Color::rgb(r, g, b)
        } else {
            Color::BLACK
        };
        pool.spawn_colored(position, direction, color)
    }
}

fn record(result: Result<ParticleId>, tally: &mut EmissionTally) {
    match result {
        Ok(_) => tally.emitted += 1,
        Err(err) => {
            log::debug!("emission dropped: {err}");
            tally.dropped += 1;
        }
    }
}
