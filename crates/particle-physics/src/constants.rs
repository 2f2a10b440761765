//! Physical constants for the particle simulation
//!
//! Units are domain units: the simulation domain is the square
//! `[0, DOMAIN_EXTENT]²` and time is measured in seconds.

use glam::Vec2;

/// Side length of the square simulation domain
pub const DOMAIN_EXTENT: f32 = 1.0;

/// Constant gravitational acceleration applied to every particle
pub const GRAVITY: Vec2 = Vec2::new(0.0, -1.0);

/// Per-axis distance below which two particles are considered touching
pub const COLLISION_EPSILON: f32 = 1.0e-4;

/// Multiplier applied to both velocities when two particles exchange momentum
pub const COLLISION_DAMPING: f32 = 0.99;

/// Fixed frame step used by the interactive demo (~60 Hz)
pub const FRAME_STEP: f32 = 16.6e-3;
