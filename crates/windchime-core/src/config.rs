use glam::Vec3;

use crate::error::{Error, Result};
use crate::geometry::IntersectionMode;
use crate::raycast::LayerMask;

/// Where new wind particles come from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmissionSource {
    /// Emit from each target's shadow on a plane at the pruning-sphere
    /// boundary, facing the pruning center.
    Targeted,
    /// Emit from a disk of `radius` centred on the source position.
    Fan { radius: f32 },
}

/// Simulation parameters, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindConfig {
    /// Initial speed of every emitted particle.
    pub wind_velocity: f32,
    pub particle_mass: f32,
    /// Emission rate per target. Zero disables periodic emission.
    pub particles_per_second: f32,
    /// Particles at or below this speed are retired.
    pub min_velocity: f32,
    /// Lower bound for the pool capacity estimate.
    pub pool_capacity_seed: usize,
    /// Seconds between compactions.
    pub pruning_period: f32,
    /// Scale applied to the target bounding box before deriving the sphere.
    pub bounds_inflation_factor: f32,
    /// Location of the wind source. Particles travel from here toward the
    /// pruning center.
    pub source_position: Vec3,
    pub emission: EmissionSource,
    pub intersection: IntersectionMode,
    /// Keep a per-particle history of visited points.
    pub render_paths: bool,
    pub random_path_colors: bool,
    pub layer_mask: LayerMask,
    /// Seed for the emitter RNG; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            wind_velocity: 1.0,
            particle_mass: 0.001,
            particles_per_second: 20.0,
            min_velocity: 1e-5,
            pool_capacity_seed: 256,
            pruning_period: 1.0,
            bounds_inflation_factor: 2.0,
            source_position: Vec3::new(0.0, 0.0, -10.0),
            emission: EmissionSource::Targeted,
            intersection: IntersectionMode::Strict,
            render_paths: false,
            random_path_colors: false,
            layer_mask: LayerMask::ALL,
            rng_seed: None,
        }
    }
}

impl WindConfig {
    /// Check every scalar against its valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.wind_velocity > 0.0) {
            return Err(invalid("wind_velocity", self.wind_velocity, "> 0"));
        }
        if !(self.particle_mass > 0.0) {
            return Err(invalid("particle_mass", self.particle_mass, "> 0"));
        }
        if !(self.particles_per_second >= 0.0) || !self.particles_per_second.is_finite() {
            return Err(invalid("particles_per_second", self.particles_per_second, ">= 0"));
        }
        if !(self.min_velocity >= 0.0) {
            return Err(invalid("min_velocity", self.min_velocity, ">= 0"));
        }
        if !(self.pruning_period > 0.0) {
            return Err(invalid("pruning_period", self.pruning_period, "> 0"));
        }
        if !(self.bounds_inflation_factor > 0.0) {
            return Err(invalid("bounds_inflation_factor", self.bounds_inflation_factor, "> 0"));
        }
        if let EmissionSource::Fan { radius } = self.emission {
            if !(radius >= 0.0) {
                return Err(invalid("fan radius", radius, ">= 0"));
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f32, expected: &str) -> Error {
    Error::InvalidConfig(format!("{name} = {value}, expected {expected}"))
}
