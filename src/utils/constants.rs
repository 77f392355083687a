use std::time::Duration;
use crate::utils;

/// Cutoff distance: sources closer than this contribute no force.
pub const PROXIMITY_EPSILON: f64 = 0.1;

/// Leaves at this depth stop subdividing and hold any number of particles.
pub const MAX_TREE_DEPTH: u32 = 48;

pub const DEFAULT_SIMULATION_CONFIG: utils::SimulationConfig = utils::SimulationConfig {
    gravitational_constant: 6.674_30e-3,
    theta: 0.1,
    time_step: 0.1,
    tree_capacity: 4,
    bounds_margin: 100.0,
    restitution: 0.8,
    viewport: (800.0, 600.0),
    reference_mass: 2000.0,
    orbital_speed_factor: 0.7,
    min_spawn_distance: 20.0,
    tick_interval: Duration::from_millis(16),
};
