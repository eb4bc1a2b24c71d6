use approx::assert_relative_eq;
use rand::{rngs::StdRng, SeedableRng};

use crate::particles::{
    apply_force, apply_force_ref, apply_force_symmetric, apply_force_symmetric_ref, Cell,
    PointMass, Targets, WorkingVecs,
};
use crate::utils::GRAVITATIONAL_CONSTANT as G;

fn random_cell(n: usize, seed: u64) -> Cell {
    let mut rng = StdRng::seed_from_u64(seed);
    Cell::init((n, n), (1e30, 1e32), (0.0, 1e17), (0.0, 1e17), &mut rng)
}

#[test]
fn test_pair_force_value() {
    let (mass, x, y) = ([2.5], [3.5], [4.5]);
    let (mut fx, mut fy) = ([0.0], [0.0]);
    let targets = Targets { mass: &mass, x: &x, y: &y, fx: &mut fx, fy: &mut fy };
    let mut wv = WorkingVecs::new();
    apply_force(G, PointMass::new(2.0, 3.0, 4.0), targets, &mut wv);

    assert_relative_eq!(fx[0], -4.7164e-10, max_relative = 1e-4);
    assert_relative_eq!(fy[0], -4.7164e-10, max_relative = 1e-4);
}

#[test]
fn test_empty_targets_are_noop() {
    let mut wv = WorkingVecs::new();
    let (mut fx, mut fy): ([f64; 0], [f64; 0]) = ([], []);
    let targets = Targets { mass: &[], x: &[], y: &[], fx: &mut fx, fy: &mut fy };
    let reaction = apply_force_symmetric(G, PointMass::new(1.0, 0.0, 0.0), targets, &mut wv);
    assert_eq!(reaction, (0.0, 0.0));
}

#[test]
fn test_batched_matches_scalar_bitwise() {
    // 103 targets exercise both the SIMD blocks and the scalar remainder.
    let cell = random_cell(103, 3);
    let source = PointMass::new(5e31, 2e17, -1e16);
    let mut wv = WorkingVecs::new();

    let mut batched = cell.clone();
    apply_force(G, source, Targets::new(&batched.particles, &mut batched.forces), &mut wv);
    let mut scalar = cell.clone();
    apply_force_ref(G, source, Targets::new(&scalar.particles, &mut scalar.forces));

    assert_eq!(batched.forces, scalar.forces);
}

#[test]
fn test_symmetric_reaction_matches_scalar() {
    let cell = random_cell(37, 4);
    let source = PointMass::new(1e31, 5e16, 5e16);
    let mut wv = WorkingVecs::with_capacity(4);

    let mut batched = cell.clone();
    let r1 = apply_force_symmetric(G, source, Targets::new(&batched.particles, &mut batched.forces), &mut wv);
    let mut scalar = cell.clone();
    let r2 = apply_force_symmetric_ref(G, source, Targets::new(&scalar.particles, &mut scalar.forces));

    assert_eq!(r1, r2);
    assert_eq!(batched.forces, scalar.forces);
    // The pool grew to the number of targets.
    assert_eq!(wv.size(), 37);
}

#[test]
fn test_symmetric_reaction_balances_targets() {
    let cell = random_cell(50, 5);
    let mut wv = WorkingVecs::new();
    let mut c = cell.clone();
    let (rx, ry) = apply_force_symmetric(
        G,
        PointMass::new(3e31, 5e16, 5e16),
        Targets::new(&c.particles, &mut c.forces),
        &mut wv,
    );
    let sx: f64 = c.forces.fx.iter().sum();
    let sy: f64 = c.forces.fy.iter().sum();
    assert_relative_eq!(rx, -sx, max_relative = 1e-12);
    assert_relative_eq!(ry, -sy, max_relative = 1e-12);
}

#[test]
fn test_targets_from_range() {
    let mut cell = random_cell(10, 6);
    let targets = Targets::from_range(&cell.particles, &mut cell.forces, 4);
    assert_eq!(targets.len(), 6);
    assert!(!targets.is_empty());
}
