use glam::Vec3;
use wasm_bindgen::prelude::*;
use windchime_core::{Cylinder, Impulse, Simulator, WindConfig};

/// Floats per cylinder in [`WindWorld::set_cylinders`]: top xyz, bottom xyz, radius.
const CYLINDER_STRIDE: usize = 7;

/// GPU-compatible particle struct: 48 bytes
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 3],  // 12 bytes
    velocity: f32,       //  4 bytes
    direction: [f32; 3], // 12 bytes
    alive: f32,          //  4 bytes
    color: [f32; 4],     // 16 bytes
}

/// One bell strike for the host: 32 bytes
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuImpulse {
    force: [f32; 3], // 12 bytes
    target: u32,     //  4 bytes
    point: [f32; 3], // 12 bytes
    extent: f32,     //  4 bytes, 0 at the top of the bell, 1 at the bottom
}

#[wasm_bindgen]
pub struct WindWorld {
    sim: Simulator,
    cylinders: Vec<Cylinder>,
    impulses: Vec<Impulse>,
    gpu_particles: Vec<GpuParticle>,
    gpu_impulses: Vec<GpuImpulse>,
}

#[wasm_bindgen]
impl WindWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(
        wind_velocity: f32,
        particles_per_second: f32,
        source_x: f32,
        source_y: f32,
        source_z: f32,
        cylinders: &[f32],
    ) -> Result<WindWorld, JsValue> {
        let config = WindConfig {
            wind_velocity,
            particles_per_second,
            source_position: Vec3::new(source_x, source_y, source_z),
            ..WindConfig::default()
        };
        let cylinders = parse_cylinders(cylinders);
        let sim = Simulator::new(config, &cylinders).map_err(|e| JsValue::from_str(&e.to_string()))?;

        web_sys::console::log_1(
            &format!(
                "WASM WindWorld created: {} bells, pool capacity {}",
                cylinders.len(),
                sim.pool().capacity()
            )
            .into(),
        );

        let mut world = WindWorld {
            sim,
            cylinders,
            impulses: Vec::new(),
            gpu_particles: Vec::new(),
            gpu_impulses: Vec::new(),
        };
        world.write_gpu_output();
        Ok(world)
    }

    /// Replace the bell geometry used from the next step on.
    #[wasm_bindgen]
    pub fn set_cylinders(&mut self, data: &[f32]) {
        self.cylinders = parse_cylinders(data);
    }

    /// Advance by `dt` seconds. Returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.impulses.clear();
        let report = self.sim.step(dt, &self.cylinders, &mut self.impulses);
        if report.dropped > 0 {
            web_sys::console::warn_1(
                &format!("WindWorld: pool full, dropped {} spawns", report.dropped).into(),
            );
        }
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Emit one particle immediately. False when there is nothing to emit
    /// toward or the pool is full.
    #[wasm_bindgen]
    pub fn trigger(&mut self) -> bool {
        let emitted = self.sim.trigger().is_ok();
        self.write_gpu_output();
        emitted
    }

    #[wasm_bindgen]
    pub fn get_particle_buffer_ptr(&self) -> *const f32 {
        self.gpu_particles.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_particle_buffer_byte_length(&self) -> usize {
        self.gpu_particles.len() * std::mem::size_of::<GpuParticle>()
    }

    #[wasm_bindgen]
    pub fn get_impulse_buffer_ptr(&self) -> *const f32 {
        self.gpu_impulses.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_impulse_buffer_byte_length(&self) -> usize {
        self.gpu_impulses.len() * std::mem::size_of::<GpuImpulse>()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.sim.pool().active_count()
    }

    #[wasm_bindgen]
    pub fn impulse_count(&self) -> usize {
        self.impulses.len()
    }
}

impl WindWorld {
    fn write_gpu_output(&mut self) {
        self.gpu_particles.clear();
        self.gpu_particles
            .extend(self.sim.pool().active().iter().map(|p| GpuParticle {
                position: p.position.to_array(),
                velocity: p.velocity,
                direction: p.direction.to_array(),
                alive: if p.alive { 1.0 } else { 0.0 },
                color: [p.color.r, p.color.g, p.color.b, p.color.a],
            }));

        let cylinders = &self.cylinders;
        self.gpu_impulses.clear();
        self.gpu_impulses.extend(self.impulses.iter().map(|i| GpuImpulse {
            force: i.force.to_array(),
            target: i.target.0 as u32,
            point: i.point.to_array(),
            extent: cylinders
                .get(i.target.0)
                .map_or(0.0, |c| c.impact_extent(i.point)),
        }));
    }
}

/// Unpack `[top.xyz, bottom.xyz, radius]` records. A trailing partial record
/// is ignored.
fn parse_cylinders(data: &[f32]) -> Vec<Cylinder> {
    data.chunks_exact(CYLINDER_STRIDE)
        .map(|c| {
            Cylinder::new(
                Vec3::new(c[0], c[1], c[2]),
                Vec3::new(c[3], c[4], c[5]),
                c[6],
            )
        })
        .collect()
}
