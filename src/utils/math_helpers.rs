use crate::particles::Cell;

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2)).sqrt()
}

/// `|val - base| / |base|`
#[inline]
pub fn relative_error(val: f64, base: f64) -> f64 {
    (val - base).abs() / base.abs()
}

/// Distribution of per-component relative errors between two force computations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorStats {
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub max: f64,
    pub mean: f64,
}

impl ErrorStats {
    /// Summarises a set of relative errors. Returns all zeros for an empty set.
    pub fn from_errors(mut errors: Vec<f64>) -> Self {
        if errors.is_empty() {
            return Self::default();
        }
        errors.sort_unstable_by(|a, b| a.total_cmp(b));
        let n = errors.len();
        let mean = errors.iter().sum::<f64>() / n as f64;
        Self {
            min: errors[0],
            first_quartile: errors[n / 4],
            median: errors[n / 2],
            third_quartile: errors[3 * n / 4],
            max: errors[n - 1],
            mean,
        }
    }
}

/// Compares the forces of `cells`, taken in order and concatenated, against the forces of
/// `reference`, which holds the same particles in the same order (see [`Cell::merge`]).
///
/// Both components of every particle contribute one relative error `d(f)/f`.
///
/// # Panics
///
/// Panics if the cells hold more particles than the reference.
pub fn relative_error_stats(reference: &Cell, cells: &[Cell]) -> ErrorStats {
    let mut errors = Vec::with_capacity(2 * reference.len());
    let mut shift = 0;
    for cell in cells {
        for i in 0..cell.len() {
            errors.push(relative_error(cell.forces.fx[i], reference.forces.fx[shift + i]));
            errors.push(relative_error(cell.forces.fy[i], reference.forces.fy[shift + i]));
        }
        shift += cell.len();
    }
    ErrorStats::from_errors(errors)
}
