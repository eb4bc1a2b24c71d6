// src/utils/constants_config.rs
use crate::utils::{
    BarnesHutError, DEFAULT_SOLVER_CONFIG, GRAVITATIONAL_CONSTANT, DEFAULT_FAR_FIELD_LIMIT,
    INITIAL_POOL_SIZE, MAX_TREE_HEIGHT,
};

/// Tunable parameters of a force computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub gravitational_constant: f64,
    /// A multipole is accepted when `distance > width / far_field_limit`.
    pub far_field_limit: f64,
    /// Capacity each thread-private set of working vectors starts with.
    pub initial_pool_size: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            far_field_limit: DEFAULT_FAR_FIELD_LIMIT,
            initial_pool_size: INITIAL_POOL_SIZE,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration, falling back to the defaults for every `None`.
    ///
    /// # Example
    /// ```
    /// use rs_barnes_hut::utils::SolverConfig;
    ///
    /// let config = SolverConfig::new(None, Some(0.5), None);
    /// assert_eq!(config.far_field_limit, 0.5);
    /// assert_eq!(config.gravitational_constant, 6.67e-11);
    /// ```
    pub fn new(
        gravitational_constant: Option<f64>,
        far_field_limit: Option<f64>,
        initial_pool_size: Option<usize>,
    ) -> Self {
        let default = DEFAULT_SOLVER_CONFIG;
        Self {
            gravitational_constant: gravitational_constant.unwrap_or(default.gravitational_constant),
            far_field_limit: far_field_limit.unwrap_or(default.far_field_limit),
            initial_pool_size: initial_pool_size.unwrap_or(default.initial_pool_size),
        }
    }

    pub fn validate(&self) -> Result<(), BarnesHutError> {
        if !(self.far_field_limit.is_finite() && self.far_field_limit > 0.0) {
            return Err(BarnesHutError::InvalidFarFieldLimit(self.far_field_limit));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(BarnesHutError::InvalidRange("gravitational constant"));
        }
        Ok(())
    }
}

/// Description of a randomly populated quadtree.
///
/// The particle range is the total over the whole tree; each of the `4^(height-1)` cells
/// draws its own count in `[min / nb_cells, max / nb_cells]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpec {
    pub height: usize,
    pub particles: (usize, usize),
    pub mass: (f64, f64),
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl TreeSpec {
    pub fn new(
        height: usize,
        particles: (usize, usize),
        mass: (f64, f64),
        x: (f64, f64),
        y: (f64, f64),
    ) -> Self {
        Self { height, particles, mass, x, y }
    }

    /// Number of leaf cells, `4^(height-1)`.
    pub fn nb_cells(&self) -> usize {
        1usize << (2 * (self.height - 1))
    }

    pub fn validate(&self) -> Result<(), BarnesHutError> {
        if self.height == 0 || self.height > MAX_TREE_HEIGHT {
            return Err(BarnesHutError::InvalidHeight(self.height));
        }
        if self.particles.0 > self.particles.1 {
            return Err(BarnesHutError::InvalidRange("particle count"));
        }
        check_range(self.mass, "mass")?;
        if self.mass.0 <= 0.0 {
            return Err(BarnesHutError::InvalidMass);
        }
        check_range(self.x, "x")?;
        check_range(self.y, "y")?;
        Ok(())
    }
}

fn check_range(range: (f64, f64), what: &'static str) -> Result<(), BarnesHutError> {
    if range.0.is_finite() && range.1.is_finite() && range.0 <= range.1 {
        Ok(())
    } else {
        Err(BarnesHutError::InvalidRange(what))
    }
}
