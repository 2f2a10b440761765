//! # Particle Physics
//!
//! Particle storage and the physical constants shared by the simulation and
//! the renderer.

pub mod constants;
pub mod particle;

pub use constants::*;
pub use particle::*;
