use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time configuration errors.
///
/// Stepping never fails; everything here is rejected before the first frame.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Grid resolution outside `1..=MAX_GRID_RESOLUTION`.
    #[error("grid resolution {requested} is out of range (1..={max})")]
    GridResolution { requested: usize, max: usize },

    /// Domain extent must be finite and strictly positive.
    #[error("domain extent must be finite and > 0, got {0}")]
    DomainExtent(f32),

    /// Particle indices are stored as `u32` inside grid cells.
    #[error("particle count {0} exceeds the u32 index range")]
    ParticleCount(usize),

    /// Any other tuning parameter that cannot produce a valid simulation.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
