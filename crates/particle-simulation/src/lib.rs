//! # Particle Simulation Engine
//!
//! CPU particle simulation with a uniform-grid broad phase for short-range
//! collisions inside a bounded 2D domain.

pub mod error;
pub mod grid;
pub mod params;
pub mod simulation;

pub use error::{Error, Result};
pub use grid::*;
pub use params::*;
pub use simulation::*;
