//! A 2D gravitational N-body simulator.
//!
//! Forces are approximated with a Barnes-Hut quadtree rebuilt every tick, particles are
//! integrated with semi-implicit Euler and bounce off the viewport walls, and overlapping
//! particles either collide elastically or merge.
pub mod utils;
pub mod particles;
pub mod interactions;
