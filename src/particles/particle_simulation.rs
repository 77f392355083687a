//! This module drives the gravity simulation one tick at a time.
//!
//! A tick drains the command queue, rebuilds the Barnes-Hut quadtree over the current
//! particles, accumulates gravitational accelerations, integrates every particle and
//! reflects it off the viewport walls, and finally reconciles overlapping particles
//! according to the active [`CollisionMode`].
//!
//! Commands (adding particles, toggling modes, clearing, regenerating) can be queued at
//! any time through [`Simulation::enqueue`]; they only take effect at the start of the
//! next [`Simulation::step`], so the particle list never changes in the middle of a tick.
//!
//! # Example
//!
//! ```
//! use rs_gravity::particles::Simulation;
//! use rs_gravity::utils::SimulationConfig;
//!
//! let mut sim = Simulation::with_seed(SimulationConfig::default(), 42)
//!     .expect("Failed to initialize simulation")
//!     .with_binary_system();
//!
//! sim.add_particle_at(600.0, 300.0).expect("Invalid position");
//! sim.simulate(100);
//!
//! assert_eq!(sim.tick(), 100);
//! assert!(sim.tree_boundaries().is_some());
//! ```
use std::collections::VecDeque;
use std::f64::consts::PI;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::interactions::{resolve_collisions, CollisionMode, CollisionReport};
use crate::particles::{accumulate_forces, bounding_rect, Particle, QuadTree, Rect};
use crate::utils::{PhysicsError, SimulationConfig};

const SPAWN_RADIUS: f64 = 5.0;
const SPAWN_MASS: f64 = 10.0;

const STAR_OFFSET: f64 = 100.0;
const STAR_RADIUS: f64 = 15.0;
const STAR_MASS: f64 = 1000.0;
const STAR_SPEED: f64 = 1.0;
const PLANET_COUNT: usize = 5;

const CENTRAL_RADIUS: f64 = 20.0;
const CENTRAL_MASS: f64 = 5000.0;

/// A request to change the simulation, applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    /// Adds a small particle at `(x, y)` on a roughly circular orbit around the viewport centre.
    AddParticleAt { x: f64, y: f64 },
    /// Adds a fully specified particle.
    AddParticle(Particle),
    SetCollisionMode(CollisionMode),
    ToggleCollisionMode,
    /// Display only; has no effect on the physics.
    SetShowTree(bool),
    ToggleShowTree,
    /// Removes every particle.
    Clear,
    /// Replaces the particles with a heavy central body and `count` orbiting bodies.
    RegenerateRandom(usize),
}

/// What a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: (f64, f64),
    pub radius: f64,
    pub mass: f64,
}

/// A 2D gravitational N-body simulation.
///
/// The simulation owns its particles exclusively. Outside code observes them through
/// [`Simulation::particles`] or [`Simulation::snapshot`] and changes them only by
/// queueing [`SimulationCommand`]s.
pub struct Simulation {
    particles: Vec<Particle>,
    config: SimulationConfig,
    collision_mode: CollisionMode,
    show_tree: bool,
    pending: VecDeque<SimulationCommand>,
    tree_boundaries: Option<Vec<Rect>>,
    tick: u64,
    last_report: CollisionReport,
    rng: StdRng,
}

impl Simulation {
    /// Creates an empty simulation seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_parts(config, StdRng::from_os_rng(), Vec::new()))
    }

    /// Creates an empty simulation whose random presets are reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::particles::Simulation;
    /// use rs_gravity::utils::SimulationConfig;
    ///
    /// let mut a = Simulation::with_seed(SimulationConfig::default(), 7).unwrap();
    /// let mut b = Simulation::with_seed(SimulationConfig::default(), 7).unwrap();
    /// a.regenerate_random(20);
    /// b.regenerate_random(20);
    /// a.step();
    /// b.step();
    ///
    /// assert_eq!(a.snapshot(), b.snapshot());
    /// ```
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_parts(config, StdRng::seed_from_u64(seed), Vec::new()))
    }

    /// Creates a simulation holding exactly `particles`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or any particle is invalid.
    pub fn with_particles(config: SimulationConfig, particles: Vec<Particle>) -> Result<Self, PhysicsError> {
        config.validate()?;
        for particle in &particles {
            particle.validate()?;
        }
        Ok(Self::from_parts(config, StdRng::from_os_rng(), particles))
    }

    fn from_parts(config: SimulationConfig, rng: StdRng, particles: Vec<Particle>) -> Self {
        Simulation {
            particles,
            config,
            collision_mode: CollisionMode::default(),
            show_tree: false,
            pending: VecDeque::new(),
            tree_boundaries: None,
            tick: 0,
            last_report: CollisionReport::default(),
            rng,
        }
    }

    /// Replaces the particles with a binary star and five planets.
    ///
    /// The stars sit 100 units either side of the viewport centre moving in opposite
    /// directions. The planets start 200 to 300 units from the centre at random angles,
    /// on orbits slower than circular around the configured reference mass.
    pub fn with_binary_system(mut self) -> Self {
        self.setup_binary_system();
        self
    }

    /// Replaces the particles with a heavy central body and `count` random orbiters.
    pub fn with_random_particles(mut self, count: usize) -> Self {
        self.setup_random_particles(count);
        self
    }

    fn setup_binary_system(&mut self) {
        let (cx, cy) = self.config.center();
        self.particles.clear();
        self.particles.push(body((cx - STAR_OFFSET, cy), (0.0, STAR_SPEED), STAR_MASS, STAR_RADIUS));
        self.particles.push(body((cx + STAR_OFFSET, cy), (0.0, -STAR_SPEED), STAR_MASS, STAR_RADIUS));

        for _ in 0..PLANET_COUNT {
            let angle = self.rng.random::<f64>() * 2.0 * PI;
            let distance = 200.0 + self.rng.random::<f64>() * 100.0;
            let speed = self.circular_speed(self.config.reference_mass, distance) * self.config.orbital_speed_factor;
            self.particles.push(body(
                (cx + angle.cos() * distance, cy + angle.sin() * distance),
                (angle.sin() * speed, -angle.cos() * speed),
                SPAWN_MASS,
                SPAWN_RADIUS,
            ));
        }
        info!("Binary system set up with {} particles", self.particles.len());
    }

    fn setup_random_particles(&mut self, count: usize) {
        let (cx, cy) = self.config.center();
        self.particles.clear();
        self.particles.push(body((cx, cy), (0.0, 0.0), CENTRAL_MASS, CENTRAL_RADIUS));

        for _ in 0..count {
            let angle = self.rng.random::<f64>() * 2.0 * PI;
            let distance = 50.0 + self.rng.random::<f64>() * 300.0;
            let speed = self.circular_speed(CENTRAL_MASS, distance) * (0.8 + self.rng.random::<f64>() * 0.4);
            let radius = self.rng.random_range(2..8) as f64;
            self.particles.push(body(
                (cx + angle.cos() * distance, cy + angle.sin() * distance),
                (angle.sin() * speed, -angle.cos() * speed),
                0.1 * radius * radius,
                radius,
            ));
        }
        info!("Generated {} random particles around a central body", count);
    }

    fn circular_speed(&self, central_mass: f64, distance: f64) -> f64 {
        (self.config.gravitational_constant * central_mass / distance).sqrt()
    }

    /// Builds the particle for an add request at `(x, y)`, or `None` if the point is too
    /// close to the viewport centre to derive an orbit from.
    fn orbiting_particle(&self, x: f64, y: f64) -> Option<Particle> {
        let (cx, cy) = self.config.center();
        let (dx, dy) = (x - cx, y - cy);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < self.config.min_spawn_distance {
            return None;
        }
        let speed = self.circular_speed(self.config.reference_mass, distance) * self.config.orbital_speed_factor;
        Some(body((x, y), (-dy / distance * speed, dx / distance * speed), SPAWN_MASS, SPAWN_RADIUS))
    }

    /// Queues `command` for the start of the next tick.
    ///
    /// # Errors
    ///
    /// Add requests are checked here: a non-finite position yields
    /// [`PhysicsError::InvalidPosition`], and a particle that fails
    /// [`Particle::validate`] yields the matching error. Nothing is queued on error.
    pub fn enqueue(&mut self, command: SimulationCommand) -> Result<(), PhysicsError> {
        match &command {
            SimulationCommand::AddParticleAt { x, y } if !x.is_finite() || !y.is_finite() => {
                warn!("Rejected add request at non-finite position ({}, {})", x, y);
                return Err(PhysicsError::InvalidPosition);
            }
            SimulationCommand::AddParticle(particle) => particle.validate()?,
            _ => {}
        }
        self.pending.push_back(command);
        Ok(())
    }

    pub fn add_particle_at(&mut self, x: f64, y: f64) -> Result<(), PhysicsError> {
        self.enqueue(SimulationCommand::AddParticleAt { x, y })
    }

    pub fn toggle_collision_mode(&mut self) {
        self.pending.push_back(SimulationCommand::ToggleCollisionMode);
    }

    pub fn toggle_show_tree(&mut self) {
        self.pending.push_back(SimulationCommand::ToggleShowTree);
    }

    pub fn clear(&mut self) {
        self.pending.push_back(SimulationCommand::Clear);
    }

    pub fn regenerate_random(&mut self, count: usize) {
        self.pending.push_back(SimulationCommand::RegenerateRandom(count));
    }

    /// Number of commands waiting for the next tick.
    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    fn apply(&mut self, command: SimulationCommand) {
        match command {
            SimulationCommand::AddParticleAt { x, y } => match self.orbiting_particle(x, y) {
                Some(particle) => self.particles.push(particle),
                None => debug!("Dropped add request at ({}, {}): too close to the centre", x, y),
            },
            SimulationCommand::AddParticle(particle) => self.particles.push(particle),
            SimulationCommand::SetCollisionMode(mode) => self.collision_mode = mode,
            SimulationCommand::ToggleCollisionMode => {
                self.collision_mode = self.collision_mode.toggled();
                debug!("Collision mode is now {:?}", self.collision_mode);
            }
            SimulationCommand::SetShowTree(show) => self.show_tree = show,
            SimulationCommand::ToggleShowTree => self.show_tree = !self.show_tree,
            SimulationCommand::Clear => self.particles.clear(),
            SimulationCommand::RegenerateRandom(count) => self.setup_random_particles(count),
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Pending commands are applied first, in the order they were queued. The quadtree is
    /// rebuilt from scratch over the bounding box of the particles (plus the configured
    /// margin), forces are accumulated against it, and every particle is integrated and
    /// kept inside the viewport before collisions are resolved.
    ///
    /// Returns what the collision pass did this tick.
    pub fn step(&mut self) -> CollisionReport {
        while let Some(command) = self.pending.pop_front() {
            self.apply(command);
        }
        self.tick += 1;

        let Some(boundary) = bounding_rect(&self.particles, self.config.bounds_margin) else {
            self.tree_boundaries = None;
            self.last_report = CollisionReport::default();
            return self.last_report;
        };

        let mut tree = QuadTree::build(boundary, self.config.tree_capacity, &self.particles);
        tree.aggregate();
        accumulate_forces(&tree, &mut self.particles, self.config.gravitational_constant, self.config.theta);

        for particle in &mut self.particles {
            particle.advance(self.config.time_step);
            particle.reflect_off_viewport(self.config.viewport, self.config.restitution);
        }

        let report = resolve_collisions(&mut self.particles, self.collision_mode, self.config.restitution);
        if report.merges > 0 {
            debug!("Tick {}: {} merges, {} particles left", self.tick, report.merges, self.particles.len());
        }

        self.tree_boundaries = Some(tree.boundaries());
        self.last_report = report;
        report
    }

    /// Runs the simulation for a number of ticks.
    pub fn simulate(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Position, radius and mass of every particle, in storage order.
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.particles
            .iter()
            .map(|p| ParticleView { position: p.position, radius: p.radius, mass: p.mass })
            .collect()
    }

    /// Rectangles of every quadtree node built during the last tick, root first.
    ///
    /// `None` before the first tick and after a tick without particles.
    pub fn tree_boundaries(&self) -> Option<&[Rect]> {
        self.tree_boundaries.as_deref()
    }

    pub fn show_tree(&self) -> bool {
        self.show_tree
    }

    pub fn collision_mode(&self) -> CollisionMode {
        self.collision_mode
    }

    /// Number of ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_report(&self) -> CollisionReport {
        self.last_report
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    pub fn total_momentum(&self) -> (f64, f64) {
        self.particles.iter().fold((0.0, 0.0), |(px, py), p| {
            let (mx, my) = p.momentum();
            (px + mx, py + my)
        })
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}

/// Preset bodies use constants that always pass validation.
fn body(position: (f64, f64), velocity: (f64, f64), mass: f64, radius: f64) -> Particle {
    Particle { position, velocity, acceleration: (0.0, 0.0), mass, radius }
}
