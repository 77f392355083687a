// src/utils/constants_config.rs
use std::time::Duration;
use crate::utils::{
    DEFAULT_SIMULATION_CONFIG,
    errors::PhysicsError
};

/// Tunable parameters of the simulation.
///
/// `tick_interval` is never read by the physics core; it is carried here so that
/// whatever drives [`crate::particles::Simulation::step`] can be configured in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub gravitational_constant: f64,
    /// Barnes-Hut opening angle. Smaller is slower and more accurate, 0 is exact.
    pub theta: f64,
    pub time_step: f64,
    /// Particles a quadtree leaf holds before it subdivides.
    pub tree_capacity: usize,
    /// Margin added on every side of the particles' bounding box before building the tree.
    pub bounds_margin: f64,
    pub restitution: f64,
    /// Width and height of the region particles bounce inside.
    pub viewport: (f64, f64),
    /// Central mass used to derive the orbital speed of particles added at a position.
    pub reference_mass: f64,
    pub orbital_speed_factor: f64,
    /// Add requests closer than this to the viewport centre are dropped.
    pub min_spawn_distance: f64,
    pub tick_interval: Duration,
}


impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    /// Creates a configuration, falling back to the defaults for every `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::utils::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(Some(1.0), Some(0.5), None, None);
    /// assert_eq!(config.gravitational_constant, 1.0);
    /// assert_eq!(config.theta, 0.5);
    /// assert_eq!(config.tree_capacity, 4);
    /// ```
    pub fn new(
        gravitational_constant: Option<f64>,
        theta: Option<f64>,
        time_step: Option<f64>,
        tree_capacity: Option<usize>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            gravitational_constant: gravitational_constant.unwrap_or(default.gravitational_constant),
            theta: theta.unwrap_or(default.theta),
            time_step: time_step.unwrap_or(default.time_step),
            tree_capacity: tree_capacity.unwrap_or(default.tree_capacity),
            ..default
        }
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_tree_capacity(mut self, tree_capacity: usize) -> Self {
        self.tree_capacity = tree_capacity;
        self
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Centre of the viewport; add requests derive their orbit around this point.
    pub fn center(&self) -> (f64, f64) {
        (self.viewport.0 / 2.0, self.viewport.1 / 2.0)
    }

    /// Checks that every value can be fed to the per-tick pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::utils::{PhysicsError, SimulationConfig};
    ///
    /// assert!(SimulationConfig::default().validate().is_ok());
    /// let config = SimulationConfig::default().with_theta(-1.0);
    /// assert_eq!(config.validate(), Err(PhysicsError::InvalidTheta));
    /// ```
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravitational_constant.is_finite() || self.gravitational_constant < 0.0 {
            return Err(PhysicsError::InvalidConfiguration(
                "Gravitational constant must be finite and non-negative".to_string(),
            ));
        }
        if !self.theta.is_finite() || self.theta < 0.0 { return Err(PhysicsError::InvalidTheta); }
        if !self.time_step.is_finite() || self.time_step <= 0.0 { return Err(PhysicsError::InvalidTimeStep); }
        if self.tree_capacity == 0 { return Err(PhysicsError::InvalidCapacity); }
        if !self.bounds_margin.is_finite() || self.bounds_margin <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration("Bounds margin must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidConfiguration("Restitution must be within [0, 1]".to_string()));
        }
        let (width, height) = self.viewport;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration("Viewport must have a positive size".to_string()));
        }
        if !self.reference_mass.is_finite() || self.reference_mass <= 0.0 { return Err(PhysicsError::InvalidMass); }
        if !self.orbital_speed_factor.is_finite() || !self.min_spawn_distance.is_finite() || self.min_spawn_distance < 0.0 {
            return Err(PhysicsError::InvalidConfiguration(
                "Spawn parameters must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
