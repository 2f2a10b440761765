//! Simulation parameters, fixed at construction

use crate::error::{Error, Result};
use crate::grid::MAX_GRID_RESOLUTION;
use glam::Vec2;
use particle_physics::{COLLISION_DAMPING, COLLISION_EPSILON, DOMAIN_EXTENT, GRAVITY};

/// Which cells the broad phase compares a particle against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// Only particles sharing the same cell
    #[default]
    SameCell,
    /// The full 3×3 block of cells around the particle's cell. Finds every
    /// contact only while the collision epsilon is at most one cell wide.
    Moore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Number of particles (N)
    pub particle_count: usize,
    /// Side length of the square domain `[0, extent]²`
    pub domain_extent: f32,
    /// Grid cells per axis
    pub grid_resolution: usize,
    pub gravity: Vec2,
    /// Per-axis contact threshold
    pub collision_epsilon: f32,
    /// Velocity multiplier applied on exchange
    pub damping: f32,
    pub neighborhood: Neighborhood,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            particle_count: (800 * 600) / 3,
            domain_extent: DOMAIN_EXTENT,
            grid_resolution: 128,
            gravity: GRAVITY,
            collision_epsilon: COLLISION_EPSILON,
            damping: COLLISION_DAMPING,
            neighborhood: Neighborhood::SameCell,
        }
    }
}

impl SimulationParams {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_domain_extent(mut self, domain_extent: f32) -> Self {
        self.domain_extent = domain_extent;
        self
    }

    pub fn with_grid_resolution(mut self, grid_resolution: usize) -> Self {
        self.grid_resolution = grid_resolution;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_collision_epsilon(mut self, collision_epsilon: f32) -> Self {
        self.collision_epsilon = collision_epsilon;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Reject configurations that could not be stepped safely
    pub fn validate(&self) -> Result<()> {
        if u32::try_from(self.particle_count).is_err() {
            return Err(Error::ParticleCount(self.particle_count));
        }
        if !self.domain_extent.is_finite() || self.domain_extent <= 0.0 {
            return Err(Error::DomainExtent(self.domain_extent));
        }
        if self.grid_resolution == 0 || self.grid_resolution > MAX_GRID_RESOLUTION {
            return Err(Error::GridResolution {
                requested: self.grid_resolution,
                max: MAX_GRID_RESOLUTION,
            });
        }
        if !self.gravity.is_finite() {
            return Err(Error::InvalidParam(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !self.collision_epsilon.is_finite() || self.collision_epsilon < 0.0 {
            return Err(Error::InvalidParam(format!(
                "collision epsilon must be finite and >= 0, got {}",
                self.collision_epsilon
            )));
        }
        let cell_size = self.domain_extent / self.grid_resolution as f32;
        if self.neighborhood == Neighborhood::Moore && self.collision_epsilon > cell_size {
            return Err(Error::InvalidParam(format!(
                "collision epsilon {} exceeds cell size {cell_size} for Moore search",
                self.collision_epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidParam(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.particle_count, 160_000);
        assert_eq!(params.neighborhood, Neighborhood::SameCell);
    }

    #[test]
    fn test_builder_overrides() {
        let params = SimulationParams::default()
            .with_particle_count(2)
            .with_grid_resolution(4)
            .with_gravity(Vec2::ZERO)
            .with_neighborhood(Neighborhood::Moore);

        assert_eq!(params.particle_count, 2);
        assert_eq!(params.grid_resolution, 4);
        assert_eq!(params.gravity, Vec2::ZERO);
        assert_eq!(params.neighborhood, Neighborhood::Moore);
        assert_eq!(params.damping, COLLISION_DAMPING);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SimulationParams::default();

        assert!(matches!(
            base.with_grid_resolution(256).validate(),
            Err(Error::GridResolution { requested: 256, .. })
        ));
        assert!(matches!(
            base.with_domain_extent(0.0).validate(),
            Err(Error::DomainExtent(_))
        ));
        assert!(base.with_damping(1.5).validate().is_err());
        assert!(base.with_damping(f32::NAN).validate().is_err());
        assert!(base.with_collision_epsilon(-1.0).validate().is_err());
        assert!(base
            .with_gravity(Vec2::new(0.0, f32::INFINITY))
            .validate()
            .is_err());
    }

    #[test]
    fn test_moore_requires_epsilon_within_one_cell() {
        let moore = SimulationParams::default()
            .with_grid_resolution(10)
            .with_neighborhood(Neighborhood::Moore);

        assert!(moore.with_collision_epsilon(0.1).validate().is_ok());
        assert!(matches!(
            moore.with_collision_epsilon(0.2).validate(),
            Err(Error::InvalidParam(_))
        ));
        // Same-cell search has no such limit
        assert!(moore
            .with_neighborhood(Neighborhood::SameCell)
            .with_collision_epsilon(0.2)
            .validate()
            .is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_validate_rejects_unindexable_count() {
        let params = SimulationParams::default().with_particle_count(u32::MAX as usize + 1);
        assert_eq!(
            params.validate(),
            Err(Error::ParticleCount(u32::MAX as usize + 1))
        );
    }
}
