//! Uniform broad-phase grid
//!
//! A static square lattice laid over the domain `[0, extent]²`. Each cell
//! holds up to [`CELL_CAPACITY`] particle indices in a flat arena sized
//! `num_cells² × CELL_CAPACITY`, so rebuilding the grid every frame never
//! allocates. Inserting into a full cell is a silent no-op: under very high
//! local density some pairs in that cell go untested for the frame.

use crate::error::{Error, Result};
use glam::Vec2;

/// Maximum particle indices stored per cell
pub const CELL_CAPACITY: usize = 32;

/// Largest supported cells-per-axis; keeps flattened indices within 16 bits
pub const MAX_GRID_RESOLUTION: usize = 255;

/// Forward half of the 3×3 neighbourhood. Visiting only these offsets from
/// every cell covers each unordered pair of adjacent cells exactly once.
static FORWARD_NEIGHBORS: [(i16, i16); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Lattice coordinate of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub x: i16,
    pub y: i16,
}

impl CellIndex {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct UniformGrid {
    num_cells: i16,
    extent: f32,
    members: Box<[u32]>,
    occupancy: Box<[u8]>,
}

impl UniformGrid {
    /// Allocate a `num_cells × num_cells` grid covering `[0, extent]²`
    pub fn new(num_cells: usize, extent: f32) -> Result<Self> {
        if num_cells == 0 || num_cells > MAX_GRID_RESOLUTION {
            return Err(Error::GridResolution {
                requested: num_cells,
                max: MAX_GRID_RESOLUTION,
            });
        }
        if !extent.is_finite() || extent <= 0.0 {
            return Err(Error::DomainExtent(extent));
        }

        let cell_count = num_cells * num_cells;
        Ok(Self {
            num_cells: num_cells as i16,
            extent,
            members: vec![0; cell_count * CELL_CAPACITY].into_boxed_slice(),
            occupancy: vec![0; cell_count].into_boxed_slice(),
        })
    }

    /// Cells per axis
    pub fn num_cells(&self) -> usize {
        self.num_cells as usize
    }

    /// Total number of cells (`num_cells²`)
    pub fn cell_count(&self) -> usize {
        self.occupancy.len()
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Side length of one cell in domain units
    pub fn cell_size(&self) -> f32 {
        self.extent / self.num_cells as f32
    }

    /// Empty every cell. O(num_cells²), idempotent.
    pub fn reset(&mut self) {
        self.occupancy.fill(0);
    }

    pub fn clamp(&self, id: CellIndex) -> CellIndex {
        let max = self.num_cells - 1;
        CellIndex {
            x: id.x.clamp(0, max),
            y: id.y.clamp(0, max),
        }
    }

    /// Cell containing `position`. Positions on or outside the domain edge
    /// land in the nearest boundary cell.
    pub fn cell_of(&self, position: Vec2) -> CellIndex {
        let scaled = position * (self.num_cells as f32 / self.extent);
        // `as` truncates toward zero, saturates, and maps NaN to 0
        self.clamp(CellIndex {
            x: scaled.x as i16,
            y: scaled.y as i16,
        })
    }

    /// Row-major flat offset of a (clamped) cell
    pub fn flatten(&self, id: CellIndex) -> usize {
        let id = self.clamp(id);
        id.x as usize + id.y as usize * self.num_cells as usize
    }

    /// Inverse of [`flatten`](Self::flatten)
    pub fn unflatten(&self, cell: usize) -> CellIndex {
        let n = self.num_cells as usize;
        CellIndex {
            x: (cell % n) as i16,
            y: (cell / n) as i16,
        }
    }

    /// Record `particle` in the cell under `position`, unless that cell is full
    pub fn insert(&mut self, particle: u32, position: Vec2) {
        let cell = self.flatten(self.cell_of(position));
        let size = &mut self.occupancy[cell];
        let len = *size as usize;
        if len < CELL_CAPACITY {
            self.members[cell * CELL_CAPACITY + len] = particle;
            *size += 1;
        }
    }

    /// Particle indices currently stored in `cell`, in insertion order
    pub fn members(&self, cell: usize) -> &[u32] {
        let start = cell * CELL_CAPACITY;
        &self.members[start..start + self.occupancy[cell] as usize]
    }

    pub fn occupancy(&self, cell: usize) -> usize {
        self.occupancy[cell] as usize
    }

    /// Total indices stored across all cells
    pub fn member_count(&self) -> usize {
        self.occupancy.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.iter().all(|&n| n == 0)
    }

    /// Flat indices of every non-empty cell, ascending
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.occupancy
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(cell, _)| cell)
    }

    /// In-bounds cells from the forward half-stencil around `cell`
    pub fn forward_neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let id = self.unflatten(cell);
        let n = self.num_cells;
        FORWARD_NEIGHBORS.iter().filter_map(move |&(dx, dy)| {
            let (x, y) = (id.x + dx, id.y + dy);
            if (0..n).contains(&x) && (0..n).contains(&y) {
                Some(x as usize + y as usize * n as usize)
            } else {
                None
            }
        })
    }
}
