mod particle;
mod particle_simulation;
mod particle_interactions_barnes_hut;
mod particle_interactions_direct;

pub use particle::*;

pub use particle_simulation::*;

pub use particle_interactions_barnes_hut::*;

pub use particle_interactions_direct::*;

#[cfg(test)]
mod particle_tests;
#[cfg(test)]
mod particle_interactions_direct_tests;
