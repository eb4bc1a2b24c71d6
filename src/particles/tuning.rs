use rand::{rngs::StdRng, SeedableRng};

use crate::particles::{Cell, Multipole, WorkingVecs};
use crate::utils::{relative_error_stats, ErrorStats, DEFAULT_DOMAIN_SIZE};

const TUNING_MASS_RANGE: (f64, f64) = (1.0, 100.0);
const TUNING_STEPS: usize = 12;

/// Error of the multipole approximation for one source position of a tuning sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningSample {
    /// Width of the source cell over its distance to the target cell.
    pub width_over_distance: f64,
    pub stats: ErrorStats,
}

/// Measures how the M2P error evolves as a source cell moves away from a target cell.
///
/// The target cell covers `[0, L]^2` with `L = DEFAULT_DOMAIN_SIZE`. The source cell, also of
/// side `L`, is moved diagonally from `[L, 2L]^2` to `[3.75L, 4.75L]^2` in steps of `L / 4`.
/// At each step the exact particle-to-particle forces are compared with the forces of the
/// source multipole. The result is what the far-field limit of the acceptance criterion is
/// tuned against.
pub fn mac_tuning_sweep(particles_per_cell: usize, seed: u64, g: f64) -> Vec<TuningSample> {
    let side = DEFAULT_DOMAIN_SIZE;
    let count = (particles_per_cell, particles_per_cell);
    let domain = (0.0, side);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut exact = Cell::init(count, TUNING_MASS_RANGE, domain, domain, &mut rng);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut approx = Cell::init(count, TUNING_MASS_RANGE, domain, domain, &mut rng);

    let mut pool = WorkingVecs::new();
    let mut samples = Vec::with_capacity(TUNING_STEPS);
    for step in 0..TUNING_STEPS {
        let offset = side * (1.0 + 0.25 * step as f64);
        let range = (offset, offset + side);
        let source = Cell::init(count, TUNING_MASS_RANGE, range, range, &mut rng);
        let multipole = Multipole::p2m(&source);

        exact.p2p_ext_ref(&source, g);
        approx.m2p(&multipole, g, &mut pool);

        samples.push(TuningSample {
            width_over_distance: side / multipole.center_distance(&exact.bounds),
            stats: relative_error_stats(&exact, std::slice::from_ref(&approx)),
        });

        exact.clear_forces();
        approx.clear_forces();
    }
    samples
}
