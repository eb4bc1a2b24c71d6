use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or running the Barnes-Hut solver.
///
/// Numerical degeneracies (an empty cell reaching P2M, two coincident particles in the
/// kernel) are preconditions of the solver and are not reported here: they surface as
/// NaN or infinite forces.
#[derive(Debug, Clone, PartialEq)]
pub enum BarnesHutError {
    /// The tree height must be at least 1 and small enough for the cell count to fit in memory.
    InvalidHeight(usize),
    /// A `(min, max)` range was given with `min > max` or non-finite bounds.
    InvalidRange(&'static str),
    /// Masses must be strictly positive.
    InvalidMass,
    /// The far-field limit of the acceptance criterion must be finite and positive.
    InvalidFarFieldLimit(f64),
    /// The distributed mode was asked to run with zero workers.
    NoWorkers,
    /// The number of leaf cells is not a multiple of the number of workers.
    IndivisibleCellCount { cells: usize, workers: usize },
    /// A worker rank outside `0..workers`.
    InvalidRank { rank: usize, workers: usize },
    /// Forces were requested while the multipoles do not reflect the current cells.
    StaleMultipoles,
}

impl fmt::Display for BarnesHutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BarnesHutError::InvalidHeight(h) => write!(f, "Invalid tree height: {}", h),
            BarnesHutError::InvalidRange(what) => write!(f, "Invalid {} range", what),
            BarnesHutError::InvalidMass => write!(f, "Invalid mass value"),
            BarnesHutError::InvalidFarFieldLimit(l) => write!(f, "Invalid far-field limit: {}", l),
            BarnesHutError::NoWorkers => write!(f, "The number of workers must be positive"),
            BarnesHutError::IndivisibleCellCount { cells, workers } => write!(
                f,
                "The number of cells ({}) must be a multiple of the number of workers ({})",
                cells, workers
            ),
            BarnesHutError::InvalidRank { rank, workers } => {
                write!(f, "Worker rank {} out of range for {} workers", rank, workers)
            }
            BarnesHutError::StaleMultipoles => {
                write!(f, "Multipoles are stale, call compute_multipoles first")
            }
        }
    }
}

impl Error for BarnesHutError {}
