// rs_gravity_wasm/src/lib.rs
// Browser-facing wrapper: the page drives `step` from its animation frame and draws
// from the flat arrays returned here.

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
use rs_gravity::interactions::CollisionMode;
use rs_gravity::particles::Simulation;
use rs_gravity::utils::{PhysicsError, SimulationConfig};

fn to_js(error: PhysicsError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub struct WasmSimulation {
    simulation: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Creates an empty simulation over a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, seed: u64) -> Result<WasmSimulation, JsValue> {
        let config = SimulationConfig::default().with_viewport(width, height);
        let simulation = Simulation::with_seed(config, seed).map_err(to_js)?;
        Ok(Self { simulation })
    }

    /// Creates a simulation preloaded with the binary star system.
    #[wasm_bindgen]
    pub fn binary_system(width: f64, height: f64, seed: u64) -> Result<WasmSimulation, JsValue> {
        let mut wrapper = Self::new(width, height, seed)?;
        wrapper.simulation = wrapper.simulation.with_binary_system();
        Ok(wrapper)
    }

    /// Advances one tick and returns the number of particles left.
    #[wasm_bindgen]
    pub fn step(&mut self) -> usize {
        self.simulation.step();
        self.simulation.particles().len()
    }

    /// Queues a particle at a canvas position, typically from a click.
    #[wasm_bindgen]
    pub fn add_particle_at(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.simulation.add_particle_at(x, y).map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Ignored click at ({}, {}): {}", x, y, e)));
            to_js(e)
        })
    }

    #[wasm_bindgen]
    pub fn toggle_collision_mode(&mut self) {
        self.simulation.toggle_collision_mode();
    }

    #[wasm_bindgen]
    pub fn toggle_show_tree(&mut self) {
        self.simulation.toggle_show_tree();
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.simulation.clear();
    }

    #[wasm_bindgen]
    pub fn regenerate_random(&mut self, count: usize) {
        self.simulation.regenerate_random(count);
    }

    #[wasm_bindgen(getter)]
    pub fn merge_mode(&self) -> bool {
        self.simulation.collision_mode() == CollisionMode::Merge
    }

    #[wasm_bindgen(getter)]
    pub fn show_tree(&self) -> bool {
        self.simulation.show_tree()
    }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 {
        self.simulation.tick()
    }

    /// Particle centres as `[x0, y0, x1, y1, ...]`.
    #[wasm_bindgen]
    pub fn positions(&self) -> Float64Array {
        let flat: Vec<f64> = self
            .simulation
            .particles()
            .iter()
            .flat_map(|p| [p.position.0, p.position.1])
            .collect();
        Float64Array::from(&flat[..])
    }

    #[wasm_bindgen]
    pub fn radii(&self) -> Float64Array {
        let radii: Vec<f64> = self.simulation.particles().iter().map(|p| p.radius).collect();
        Float64Array::from(&radii[..])
    }

    #[wasm_bindgen]
    pub fn masses(&self) -> Float64Array {
        let masses: Vec<f64> = self.simulation.particles().iter().map(|p| p.mass).collect();
        Float64Array::from(&masses[..])
    }

    /// Quadtree rectangles from the last tick as `[x, y, width, height, ...]`.
    ///
    /// Empty while tree display is off.
    #[wasm_bindgen]
    pub fn tree_rects(&self) -> Float64Array {
        let flat: Vec<f64> = match self.simulation.tree_boundaries() {
            Some(rects) if self.simulation.show_tree() => {
                rects.iter().flat_map(|r| [r.x, r.y, r.width, r.height]).collect()
            }
            _ => Vec::new(),
        };
        Float64Array::from(&flat[..])
    }
}
