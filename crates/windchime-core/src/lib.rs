//! Particle-based wind simulation for wind chimes.
//!
//! Small wind particles are emitted toward a set of cylindrical bells,
//! advanced every tick, bounced off the bells' side walls and retired once
//! they leave the region around the chime. Each bounce hands part of the
//! particle's momentum to the struck bell as an impulse.

pub mod bounds;
pub mod collision;
pub mod config;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod interface;
pub mod math;
pub mod particle;
pub mod pool;
pub mod raycast;
pub mod simulator;

pub use bounds::PruningBounds;
pub use config::{EmissionSource, WindConfig};
pub use error::{Error, Result};
pub use geometry::{Cylinder, CylinderHit, IntersectionMode, Target, TargetId};
pub use interface::{CylinderProvider, DebugPathRenderer, Impulse, ImpulseReceiver};
pub use particle::{Color, ParticleId, WindParticle};
pub use pool::ParticlePool;
pub use raycast::{BroadPhaseRaycaster, CylinderRaycaster, LayerMask, RaycastHit};
pub use simulator::{Simulator, StepReport};
