//! Structure-of-arrays particle storage

use glam::Vec2;

/// Fixed-size particle store.
///
/// Particles have no identity beyond their index: position `i` and velocity
/// `i` always belong to the same particle. Both sequences are allocated once
/// at construction and never resized. Indexing past `len()` panics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleArray {
    positions: Box<[Vec2]>,
    velocities: Box<[Vec2]>,
}

impl ParticleArray {
    /// Create `count` particles at rest at the origin
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec2::ZERO; count].into_boxed_slice(),
            velocities: vec![Vec2::ZERO; count].into_boxed_slice(),
        }
    }

    /// Build a store from explicit positions and velocities.
    ///
    /// Returns `None` if the two sequences differ in length.
    pub fn from_parts(positions: Vec<Vec2>, velocities: Vec<Vec2>) -> Option<Self> {
        if positions.len() != velocities.len() {
            return None;
        }
        Some(Self {
            positions: positions.into_boxed_slice(),
            velocities: velocities.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec2 {
        self.positions[index]
    }

    pub fn velocity(&self, index: usize) -> Vec2 {
        self.velocities[index]
    }

    pub fn position_mut(&mut self, index: usize) -> &mut Vec2 {
        &mut self.positions[index]
    }

    pub fn velocity_mut(&mut self, index: usize) -> &mut Vec2 {
        &mut self.velocities[index]
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Mutable views of both sequences at once, for passes that touch both
    pub fn parts_mut(&mut self) -> (&mut [Vec2], &mut [Vec2]) {
        (&mut self.positions[..], &mut self.velocities[..])
    }

    /// Positions as raw bytes (`[f32; 2]` per particle) for vertex upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions[..])
    }

    /// Overwrite every particle from two samplers called once per index
    pub fn fill_with<P, V>(&mut self, mut position: P, mut velocity: V)
    where
        P: FnMut(usize) -> Vec2,
        V: FnMut(usize) -> Vec2,
    {
        for (i, p) in self.positions.iter_mut().enumerate() {
            *p = position(i);
        }
        for (i, v) in self.velocities.iter_mut().enumerate() {
            *v = velocity(i);
        }
    }
}
