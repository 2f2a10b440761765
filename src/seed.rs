//! Random initial conditions for the interactive demo

use glam::Vec2;
use particle_simulation::Simulation;
use rand::Rng;

/// Positions uniform over the domain, velocities uniform in `[-1, 1)²`
pub fn uniform<R: Rng + ?Sized>(simulation: &mut Simulation, rng: &mut R) {
    let extent = simulation.params().domain_extent;
    let count = simulation.particles().len();

    let positions: Vec<Vec2> = (0..count)
        .map(|_| Vec2::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
        .collect();
    let velocities: Vec<Vec2> = (0..count)
        .map(|_| Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();

    simulation.seed(|i| positions[i], |i| velocities[i]);
    log::info!("✓ Seeded {} particles", count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_simulation::SimulationParams;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_uniform_seed_stays_in_range() {
        let params = SimulationParams::default()
            .with_particle_count(1_000)
            .with_domain_extent(2.0);
        let mut simulation = Simulation::new(params).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        uniform(&mut simulation, &mut rng);

        let particles = simulation.particles();
        assert!(particles
            .positions()
            .iter()
            .all(|p| (0.0..2.0).contains(&p.x) && (0.0..2.0).contains(&p.y)));
        assert!(particles
            .velocities()
            .iter()
            .all(|v| (-1.0..1.0).contains(&v.x) && (-1.0..1.0).contains(&v.y)));
        // Not everything collapsed onto one value
        assert_ne!(particles.position(0), particles.position(1));
    }

    #[test]
    fn test_seeding_does_not_start_simulation() {
        let mut simulation =
            Simulation::new(SimulationParams::default().with_particle_count(10)).unwrap();
        uniform(&mut simulation, &mut StdRng::seed_from_u64(1));
        assert!(!simulation.is_running());
    }
}
