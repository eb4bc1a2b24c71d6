/// Gravitational constant in m^3.kg^-1.s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// Default far-field limit of the multipole acceptance criterion (about 1/sqrt(2)).
pub const DEFAULT_FAR_FIELD_LIMIT: f64 = 0.707;

/// Capacity a fresh set of working vectors starts with.
pub const INITIAL_POOL_SIZE: usize = 100;

/// Side of the square domain used by the benchmark driver, in meters.
pub const DEFAULT_DOMAIN_SIZE: f64 = 1e17;

/// Mass range used by the benchmark driver, in kilograms.
pub const DEFAULT_MASS_RANGE: (f64, f64) = (1e30, 1e32);

/// Seed used whenever a reproducible particle set is needed.
pub const DEFAULT_SEED: u64 = 42;

pub const DEFAULT_SOLVER_CONFIG: crate::utils::SolverConfig = crate::utils::SolverConfig {
    gravitational_constant: GRAVITATIONAL_CONSTANT,
    far_field_limit: DEFAULT_FAR_FIELD_LIMIT,
    initial_pool_size: INITIAL_POOL_SIZE,
};

/// Tallest tree accepted by the solver: 4^15 leaf cells.
pub const MAX_TREE_HEIGHT: usize = 16;
