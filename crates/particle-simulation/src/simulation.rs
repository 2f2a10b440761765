//! CPU particle simulation: integration, wall bounces and grid broad phase
//!
//! One call to [`Simulation::step`] runs the whole frame pipeline to
//! completion: integrate → reflect → rebuild grid → resolve collisions →
//! reset grid. The grid carries no state from one frame to the next.

use crate::error::Result;
use crate::grid::UniformGrid;
use crate::params::{Neighborhood, SimulationParams};
use glam::Vec2;
use particle_physics::ParticleArray;

/// Lifecycle of the simulation. `Idle → Running` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    /// Particles are seeded but static
    #[default]
    Idle,
    /// Every `step` advances the particles
    Running,
}

/// Per-frame counters returned by [`Simulation::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    /// Particles integrated this frame
    pub particles: usize,
    /// Pairs that exchanged velocities this frame
    pub collisions: u32,
}

/// Owns the particle store and the broad-phase grid
#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimulationParams,
    particles: ParticleArray,
    grid: UniformGrid,
    state: SimulationState,
}

impl Simulation {
    /// Allocate `params.particle_count` particles at rest and an empty grid
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        let particles = ParticleArray::new(params.particle_count);
        Self::with_particles(params, particles)
    }

    /// Wrap an existing store; `params.particle_count` follows the store
    pub fn with_particles(params: SimulationParams, particles: ParticleArray) -> Result<Self> {
        let params = SimulationParams {
            particle_count: particles.len(),
            ..params
        };
        params.validate()?;
        let grid = UniformGrid::new(params.grid_resolution, params.domain_extent)?;

        log::info!(
            "✓ Simulation initialized: {} particles, {}x{} grid (cell size {:.4})",
            particles.len(),
            grid.num_cells(),
            grid.num_cells(),
            grid.cell_size()
        );

        Ok(Self {
            params,
            particles,
            grid,
            state: SimulationState::Idle,
        })
    }

    /// Fill every particle from caller-supplied samplers, called once per index
    pub fn seed<P, V>(&mut self, position: P, velocity: V)
    where
        P: FnMut(usize) -> Vec2,
        V: FnMut(usize) -> Vec2,
    {
        self.particles.fill_with(position, velocity);
    }

    /// Begin stepping. Has no effect once running.
    pub fn start(&mut self) {
        if self.state == SimulationState::Idle {
            log::info!("Simulation started");
            self.state = SimulationState::Running;
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn particles(&self) -> &ParticleArray {
        &self.particles
    }

    pub fn positions(&self) -> &[Vec2] {
        self.particles.positions()
    }

    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    /// Advance one frame. Returns `None` without touching anything while idle.
    pub fn step(&mut self, dt: f32) -> Option<StepStats> {
        if !self.is_running() {
            return None;
        }

        self.integrate(dt);
        self.reflect();
        self.rebuild_grid();
        let collisions = self.resolve_collisions();
        self.grid.reset();

        log::trace!("step dt={dt}: {collisions} collisions");

        Some(StepStats {
            particles: self.particles.len(),
            collisions,
        })
    }

    /// Semi-implicit Euler: move with the current velocity, then accelerate
    pub fn integrate(&mut self, dt: f32) {
        let gravity = self.params.gravity;
        let (positions, velocities) = self.particles.parts_mut();
        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            *position += dt * *velocity;
            *velocity += dt * gravity;
        }
    }

    /// Elastic wall bounce: flip the velocity component of any particle that
    /// is outside the domain on that axis. Positions are not corrected.
    pub fn reflect(&mut self) {
        let extent = self.params.domain_extent;
        let (positions, velocities) = self.particles.parts_mut();
        for (position, velocity) in positions.iter().zip(velocities.iter_mut()) {
            reflect_axis(position.x, &mut velocity.x, extent);
            reflect_axis(position.y, &mut velocity.y, extent);
        }
    }

    /// Clear the grid and insert every particle at its current position
    pub fn rebuild_grid(&mut self) {
        self.grid.reset();
        for (index, &position) in self.particles.positions().iter().enumerate() {
            self.grid.insert(index as u32, position);
        }
    }

    /// Broad-phase pass over the current grid contents. Returns the number of
    /// colliding pairs. Each candidate pair is tested at most once.
    pub fn resolve_collisions(&mut self) -> u32 {
        let Self {
            params,
            particles,
            grid,
            ..
        } = self;
        let (positions, velocities) = particles.parts_mut();
        let mut contact = Contact {
            positions,
            velocities,
            epsilon: params.collision_epsilon,
            damping: params.damping,
            collisions: 0,
        };

        for cell in grid.occupied() {
            let members = grid.members(cell);
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    contact.test(a, b);
                }
            }

            if params.neighborhood == Neighborhood::Moore {
                for neighbor in grid.forward_neighbors(cell) {
                    let others = grid.members(neighbor);
                    for &a in members {
                        for &b in others {
                            contact.test(a, b);
                        }
                    }
                }
            }
        }

        contact.collisions
    }
}

fn reflect_axis(position: f32, velocity: &mut f32, extent: f32) {
    if position < 0.0 || position > extent {
        *velocity = -*velocity;
    }
}

/// Narrow check and velocity exchange for one candidate pair
struct Contact<'a> {
    positions: &'a [Vec2],
    velocities: &'a mut [Vec2],
    epsilon: f32,
    damping: f32,
    collisions: u32,
}

impl Contact<'_> {
    fn test(&mut self, a: u32, b: u32) {
        let (a, b) = (a as usize, b as usize);
        let delta = (self.positions[a] - self.positions[b]).abs();
        if delta.x < self.epsilon && delta.y < self.epsilon {
            // Both velocities are read before either is written
            let (va, vb) = (self.velocities[a], self.velocities[b]);
            self.velocities[a] = vb * self.damping;
            self.velocities[b] = va * self.damping;
            self.collisions += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grid::CELL_CAPACITY;

    fn params() -> SimulationParams {
        SimulationParams::default()
            .with_grid_resolution(16)
            .with_gravity(Vec2::ZERO)
    }

    fn running(params: SimulationParams, particles: &[(Vec2, Vec2)]) -> Simulation {
        let store = ParticleArray::from_parts(
            particles.iter().map(|(p, _)| *p).collect(),
            particles.iter().map(|(_, v)| *v).collect(),
        )
        .unwrap();
        let mut sim = Simulation::with_particles(params, store).unwrap();
        sim.start();
        sim
    }

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_idle_step_is_noop() {
        let store = ParticleArray::from_parts(vec![Vec2::splat(0.5)], vec![Vec2::X]).unwrap();
        let mut sim = Simulation::with_particles(params(), store).unwrap();

        assert_eq!(sim.state(), SimulationState::Idle);
        assert_eq!(sim.step(0.1), None);
        assert_eq!(sim.positions()[0], Vec2::splat(0.5));
    }

    #[test]
    fn test_start_is_one_way() {
        let mut sim = Simulation::new(params().with_particle_count(4)).unwrap();
        sim.start();
        sim.start();
        assert!(sim.is_running());
        assert!(sim.step(0.01).is_some());
        assert_eq!(sim.state(), SimulationState::Running);
    }

    #[test]
    fn test_new_rejects_bad_params() {
        assert!(Simulation::new(params().with_grid_resolution(1000)).is_err());
        assert!(Simulation::new(params().with_domain_extent(-2.0)).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_new_rejects_unindexable_count_before_allocating() {
        let count = u32::MAX as usize + 1;
        assert!(matches!(
            Simulation::new(params().with_particle_count(count)),
            Err(Error::ParticleCount(c)) if c == count
        ));
        assert!(matches!(
            Simulation::new(params().with_particle_count(usize::MAX)),
            Err(Error::ParticleCount(_))
        ));
    }

    #[test]
    fn test_seed_fills_store() {
        let mut sim = Simulation::new(params().with_particle_count(3)).unwrap();
        sim.seed(|i| Vec2::new(0.1 * i as f32, 0.5), |_| Vec2::Y);

        assert_close(sim.positions()[2], Vec2::new(0.2, 0.5));
        assert_eq!(sim.particles().velocity(1), Vec2::Y);
    }

    #[test]
    fn test_integrate_moves_then_accelerates() {
        let mut sim = running(
            params().with_gravity(Vec2::new(0.0, -1.0)),
            &[(Vec2::new(0.5, 0.5), Vec2::new(0.2, 0.0))],
        );
        sim.integrate(0.5);

        assert_close(sim.positions()[0], Vec2::new(0.6, 0.5));
        assert_close(sim.particles().velocity(0), Vec2::new(0.2, -0.5));
    }

    #[test]
    fn test_gravity_fall_end_to_end() {
        let mut sim = running(
            params().with_gravity(Vec2::new(0.0, -1.0)),
            &[(Vec2::new(0.5, 0.95), Vec2::new(0.0, 0.6))],
        );
        let stats = sim.step(0.1).unwrap();

        assert_eq!(stats.particles, 1);
        assert_close(sim.positions()[0], Vec2::new(0.5, 1.01));
        assert_close(sim.particles().velocity(0), Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_reflection_flips_once() {
        let mut sim = running(params(), &[(Vec2::new(0.99, 0.5), Vec2::new(1.0, 0.0))]);

        sim.step(0.02);
        assert!(sim.positions()[0].x > 1.0);
        assert_eq!(sim.particles().velocity(0).x, -1.0);

        sim.step(0.02);
        assert!(sim.positions()[0].x < 1.0);
        assert_eq!(sim.particles().velocity(0).x, -1.0);
    }

    #[test]
    fn test_reflection_flips_whenever_outside() {
        // Still outside after moving inward, so the component flips again
        let mut sim = running(params(), &[(Vec2::new(1.05, 0.5), Vec2::new(-0.1, 0.0))]);
        sim.step(0.1);

        assert_close(sim.positions()[0], Vec2::new(1.04, 0.5));
        assert_eq!(sim.particles().velocity(0).x, 0.1);
    }

    #[test]
    fn test_reflection_on_lower_and_left_walls() {
        let mut sim = running(
            params(),
            &[(Vec2::new(0.01, 0.01), Vec2::new(-1.0, -2.0))],
        );
        sim.step(0.02);

        assert_eq!(sim.particles().velocity(0), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_collision_exchanges_damped_velocities() {
        let mut sim = running(
            params().with_collision_epsilon(0.0001),
            &[
                (Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0)),
                (Vec2::new(0.500003, 0.5), Vec2::new(-1.0, 0.0)),
            ],
        );
        let stats = sim.step(0.0).unwrap();

        assert_eq!(stats.collisions, 1);
        assert_close(sim.particles().velocity(0), Vec2::new(-0.99, 0.0));
        assert_close(sim.particles().velocity(1), Vec2::new(0.99, 0.0));
    }

    #[test]
    fn test_collision_requires_both_axes_close() {
        let mut sim = running(
            params().with_collision_epsilon(0.001),
            &[
                (Vec2::new(0.5, 0.5), Vec2::X),
                (Vec2::new(0.5, 0.502), Vec2::NEG_X),
            ],
        );
        let stats = sim.step(0.0).unwrap();

        assert_eq!(stats.collisions, 0);
        assert_eq!(sim.particles().velocity(0), Vec2::X);
    }

    #[test]
    fn test_each_pair_tested_once() {
        let p = Vec2::new(0.3, 0.3);
        let mut sim = running(
            params(),
            &[(p, Vec2::X), (p, Vec2::Y), (p, Vec2::NEG_X)],
        );
        // 3 members -> 3 unordered pairs
        assert_eq!(sim.step(0.0).unwrap().collisions, 3);
    }

    #[test]
    fn test_overflowed_members_are_skipped() {
        let p = Vec2::new(0.7, 0.2);
        let particles = vec![(p, Vec2::ZERO); CELL_CAPACITY + 2];
        let mut sim = running(params(), &particles);

        let expected = (CELL_CAPACITY * (CELL_CAPACITY - 1) / 2) as u32;
        assert_eq!(sim.step(0.0).unwrap().collisions, expected);
    }

    #[test]
    fn test_neighborhood_controls_cross_cell_pairs() {
        // Straddle the boundary between cells 7 and 8 of a 16-cell grid
        let edge = 0.5;
        let pair = [
            (Vec2::new(edge - 0.00001, 0.3), Vec2::X),
            (Vec2::new(edge + 0.00001, 0.3), Vec2::NEG_X),
        ];

        let mut same = running(params(), &pair);
        assert_eq!(same.step(0.0).unwrap().collisions, 0);

        let mut moore = running(params().with_neighborhood(Neighborhood::Moore), &pair);
        assert_eq!(moore.step(0.0).unwrap().collisions, 1);
        assert_close(moore.particles().velocity(0), Vec2::new(-0.99, 0.0));
    }

    #[test]
    fn test_grid_is_empty_between_frames() {
        let mut sim = running(
            params(),
            &[(Vec2::splat(0.2), Vec2::X), (Vec2::splat(0.8), Vec2::Y)],
        );
        sim.step(0.01);
        assert!(sim.grid().is_empty());

        sim.rebuild_grid();
        assert_eq!(sim.grid().member_count(), 2);
    }
}
