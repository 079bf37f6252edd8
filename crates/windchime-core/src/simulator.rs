use glam::Vec3;

use crate::bounds::PruningBounds;
use crate::collision::respond;
use crate::config::{EmissionSource, WindConfig};
use crate::emitter::Emitter;
use crate::error::{Error, Result};
use crate::geometry::Target;
use crate::interface::{CylinderProvider, DebugPathRenderer, Impulse, ImpulseReceiver};
use crate::particle::ParticleId;
use crate::pool::{estimate_capacity, ParticlePool};
use crate::raycast::{BroadPhaseRaycaster, CylinderRaycaster, RaycastHit};

/// Smallest distance a particle travels after a bounce, so it does not hit
/// the same surface again within the tick.
pub const MIN_STEP: f32 = 0.01;

/// What happened during one [`Simulator::step`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct StepReport {
    pub emitted: usize,
    /// Spawns refused because the pool was full.
    pub dropped: usize,
    pub collisions: usize,
    /// Particles that died this tick.
    pub retired: usize,
    /// New active count, if a compaction ran at the end of the tick.
    pub compacted: Option<usize>,
}

/// Drives the wind particles: emission, advancement, collision response and
/// periodic compaction.
pub struct Simulator {
    config: WindConfig,
    pool: ParticlePool,
    emitter: Emitter,
    /// Snapshot of the targets for the current tick.
    targets: Vec<Target>,
    bounds: Option<PruningBounds>,
    seconds_until_compaction: f32,
    /// Scratch buffer reused by every raycast.
    hits: Vec<RaycastHit>,
}

impl Simulator {
    /// Validate `config`, take the first target snapshot and size the pool
    /// from it. The pool never grows afterwards.
    pub fn new<P>(mut config: WindConfig, provider: &P) -> Result<Self>
    where
        P: CylinderProvider + ?Sized,
    {
        config.validate()?;

        if config.particles_per_second == 0.0 && !config.render_paths {
            log::info!("particles_per_second is 0, enabling particle path rendering");
            config.render_paths = true;
        }

        let mut targets = Vec::new();
        provider.snapshot(&mut targets);
        let bounds = PruningBounds::from_targets(&targets, config.bounds_inflation_factor);

        let per_burst = match config.emission {
            EmissionSource::Targeted => targets.len().max(1),
            EmissionSource::Fan { .. } => 1,
        };
        let capacity = estimate_capacity(
            config.wind_velocity,
            bounds.map_or(0.0, |b| b.radius),
            config.particles_per_second * per_burst as f32,
            config.pool_capacity_seed,
        );

        log::info!(
            "wind simulator created: {} targets, pool capacity {}, bounds {:?}",
            targets.len(),
            capacity,
            bounds
        );

        let pool = ParticlePool::new(
            capacity,
            config.wind_velocity,
            config.particle_mass,
            config.render_paths,
        );

        Ok(Self {
            emitter: Emitter::new(&config),
            seconds_until_compaction: config.pruning_period,
            pool,
            targets,
            bounds,
            hits: Vec::new(),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    #[inline]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    #[inline]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Pruning bounds of the current tick; `None` without targets.
    #[inline]
    pub fn bounds(&self) -> Option<&PruningBounds> {
        self.bounds.as_ref()
    }

    /// Advance the simulation by `dt` seconds using the built-in cylinder
    /// intersector.
    pub fn step<P, R>(&mut self, dt: f32, provider: &P, receiver: &mut R) -> StepReport
    where
        P: CylinderProvider + ?Sized,
        R: ImpulseReceiver + ?Sized,
    {
        let Some(mut report) = self.begin_tick(dt, provider) else {
            return StepReport::default();
        };

        let mut caster = CylinderRaycaster::new(&self.targets, self.config.intersection);
        advance_particles(
            &mut self.pool,
            self.bounds.as_ref(),
            &self.config,
            dt,
            &mut caster,
            receiver,
            &mut self.hits,
            &mut report,
        );

        self.end_tick(dt, report)
    }

    /// Advance the simulation by `dt` seconds, querying collisions through an
    /// external raycaster instead of the built-in intersector.
    pub fn step_with_raycaster<P, C, R>(
        &mut self,
        dt: f32,
        provider: &P,
        raycaster: &mut C,
        receiver: &mut R,
    ) -> StepReport
    where
        P: CylinderProvider + ?Sized,
        C: BroadPhaseRaycaster + ?Sized,
        R: ImpulseReceiver + ?Sized,
    {
        let Some(mut report) = self.begin_tick(dt, provider) else {
            return StepReport::default();
        };

        advance_particles(
            &mut self.pool,
            self.bounds.as_ref(),
            &self.config,
            dt,
            raycaster,
            receiver,
            &mut self.hits,
            &mut report,
        );

        self.end_tick(dt, report)
    }

    /// Emit one particle right now, toward the first target (or from the fan).
    pub fn trigger(&mut self) -> Result<ParticleId> {
        let bounds = self.bounds.ok_or(Error::NoTargets)?;
        self.emitter.emit_one(&self.targets, &bounds, &mut self.pool)
    }

    /// Spawn a particle directly. `direction` must be unit length.
    pub fn spawn(&mut self, position: Vec3, direction: Vec3) -> Result<ParticleId> {
        self.pool.spawn(position, direction)
    }

    /// Reclaim dead slots immediately and restart the compaction clock.
    pub fn compact(&mut self) -> usize {
        self.seconds_until_compaction = self.config.pruning_period;
        let active = self.pool.compact();
        log::debug!("compacted particle pool: {active} active");
        active
    }

    /// Draw the path of every alive particle. Does nothing unless path
    /// tracking is enabled.
    pub fn render_paths<D: DebugPathRenderer + ?Sized>(&self, renderer: &mut D) {
        for particle in self.pool.active().iter().filter(|p| p.alive) {
            if let Some(path) = self.pool.path(particle.id) {
                if path.len() >= 2 {
                    renderer.draw_polyline(path, particle.color);
                }
            }
        }
    }

    /// Refresh the target snapshot and bounds, then run emission. `None`
    /// when `dt` cannot advance the simulation.
    fn begin_tick<P>(&mut self, dt: f32, provider: &P) -> Option<StepReport>
    where
        P: CylinderProvider + ?Sized,
    {
        self.targets.clear();
        provider.snapshot(&mut self.targets);
        self.bounds = PruningBounds::from_targets(&self.targets, self.config.bounds_inflation_factor);

        if !(dt > 0.0) || !dt.is_finite() {
            return None;
        }

        let mut report = StepReport::default();
        if let Some(bounds) = self.bounds {
            let tally = self
                .emitter
                .emit_periodic(dt, &self.targets, &bounds, &mut self.pool);
            report.emitted = tally.emitted;
            report.dropped = tally.dropped;
        }
        if report.dropped > 0 {
            log::warn!(
                "particle pool full (capacity {}), dropped {} spawns",
                self.pool.capacity(),
                report.dropped
            );
        }
        Some(report)
    }

    fn end_tick(&mut self, dt: f32, mut report: StepReport) -> StepReport {
        self.seconds_until_compaction -= dt;
        if self.seconds_until_compaction <= 0.0 {
            report.compacted = Some(self.compact());
        }

        if report.collisions > 0 || report.retired > 0 {
            log::debug!(
                "step: {} emitted, {} collisions, {} retired, {} active",
                report.emitted,
                report.collisions,
                report.retired,
                self.pool.active_count()
            );
        }
        report
    }
}

/// Move every live particle one tick, in slot order, bouncing it off whatever
/// the raycaster reports along its path and updating its lifecycle.
#[allow(clippy::too_many_arguments)]
fn advance_particles<C, R>(
    pool: &mut ParticlePool,
    bounds: Option<&PruningBounds>,
    config: &WindConfig,
    dt: f32,
    caster: &mut C,
    receiver: &mut R,
    hits: &mut Vec<RaycastHit>,
    report: &mut StepReport,
) where
    C: BroadPhaseRaycaster + ?Sized,
    R: ImpulseReceiver + ?Sized,
{
    for i in 0..pool.active_count() {
        let mut p = pool.active()[i];
        if !p.alive {
            continue;
        }

        let mut next = p.position + p.direction * p.velocity * dt;
        let travel = next.distance(p.position);

        hits.clear();
        if travel > 0.0 {
            caster.raycast(p.position, p.direction, travel, config.layer_mask, hits);
            hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        for hit in hits.iter() {
            pool.record_path_point(p.id, hit.point);

            let response = respond(p.direction, p.velocity, p.mass, hit.normal);
            receiver.apply_impulse(&Impulse {
                target: hit.target,
                force: response.force,
                point: hit.point,
            });
            log::trace!(
                "particle {:?} hit {:?}: incidence {:.3}, transfer {:.3}",
                p.id,
                hit.target,
                response.incidence,
                response.energy_transfer
            );

            p.velocity = response.velocity;
            p.direction = response.reflection;
            next = hit.point + response.reflection * (travel - hit.distance).max(MIN_STEP);
            report.collisions += 1;
        }

        p.position = next;
        pool.record_path_point(p.id, next);

        match bounds {
            Some(bounds) => {
                let inside = bounds.contains(next);
                if !p.has_entered_target_bounds {
                    p.has_entered_target_bounds = inside;
                } else if !inside {
                    p.alive = false;
                }
            }
            // nothing left to blow at
            None => p.alive = false,
        }
        if p.velocity <= config.min_velocity {
            p.alive = false;
        }
        if !p.alive {
            report.retired += 1;
        }

        pool.active_mut()[i] = p;
    }
}
