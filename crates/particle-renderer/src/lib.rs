//! # Particle Renderer
//!
//! Draws the simulation domain as one point per particle.

pub mod palette;
pub mod renderer;
pub mod view;

pub use renderer::*;
pub use view::*;
