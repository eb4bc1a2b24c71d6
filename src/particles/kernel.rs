//! Pairwise gravitational force kernel.
//!
//! For a source of mass `ms` at `s` and a target of mass `mt` at `t`, the force added to the
//! target is `-G * ms * mt / |t - s|^3 * (t - s)`. The batched functions compute it with
//! elementwise operations over the working vectors, the `_ref` functions with a scalar loop.
//! Both perform the same operations in the same order and therefore agree to the last bit.
//!
//! A target coincident with the source produces NaN or infinite forces. Callers never apply a
//! particle to itself.
use crate::particles::vector_ops::{add_product, axpy, copy, mul, pow_three_halves, scaled_div, sum};
use crate::particles::{Buffers, Forces, Particles, WorkingVecs};

/// A point source: one particle or a multipole seen from far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub mass: f64,
    pub x: f64,
    pub y: f64,
}

impl PointMass {
    pub fn new(mass: f64, x: f64, y: f64) -> Self {
        Self { mass, x, y }
    }
}

/// Struct-of-arrays view of the particles a force is applied to.
pub struct Targets<'a> {
    pub mass: &'a [f64],
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub fx: &'a mut [f64],
    pub fy: &'a mut [f64],
}

impl<'a> Targets<'a> {
    pub fn new(particles: &'a Particles, forces: &'a mut Forces) -> Self {
        Self::from_range(particles, forces, 0)
    }

    /// Targets made of the particles `start..` only.
    pub fn from_range(particles: &'a Particles, forces: &'a mut Forces, start: usize) -> Self {
        Self {
            mass: &particles.mass[start..],
            x: &particles.x[start..],
            y: &particles.y[start..],
            fx: &mut forces.fx[start..],
            fy: &mut forces.fy[start..],
        }
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
}

/// Fills `v1`, `v2` with the displacements `(dx, dy)` and `v5` with the per-target
/// coefficient `-G * ms * mt / d^3`. `v3` and `v4` are left holding `d^2` and `d^3`.
fn coefficients(g: f64, source: PointMass, targets: &Targets<'_>, b: &mut Buffers<'_>) {
    copy(targets.x, b.v1);
    axpy(-source.x, b.unit, b.v1);
    copy(targets.y, b.v2);
    axpy(-source.y, b.unit, b.v2);

    mul(b.v1, b.v1, b.v3);
    add_product(b.v2, b.v2, b.v3);
    pow_three_halves(b.v3, b.v4);

    scaled_div(-g * source.mass, targets.mass, b.v4, b.v5);
}

/// Adds the force exerted by `source` to every target, using the working vectors.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::particles::{apply_force, PointMass, Targets, WorkingVecs};
///
/// let (mass, x, y) = ([2.5], [3.5], [4.5]);
/// let (mut fx, mut fy) = ([0.0], [0.0]);
/// let targets = Targets { mass: &mass, x: &x, y: &y, fx: &mut fx, fy: &mut fy };
///
/// let mut wv = WorkingVecs::new();
/// apply_force(6.67e-11, PointMass::new(2.0, 3.0, 4.0), targets, &mut wv);
/// assert!((fx[0] + 4.7164e-10).abs() < 1e-14);
/// assert_eq!(fx[0], fy[0]);
/// ```
pub fn apply_force(g: f64, source: PointMass, targets: Targets<'_>, pool: &mut WorkingVecs) {
    if targets.is_empty() {
        return;
    }
    let mut b = pool.buffers(targets.len());
    coefficients(g, source, &targets, &mut b);
    add_product(b.v5, b.v1, targets.fx);
    add_product(b.v5, b.v2, targets.fy);
}

/// Same as [`apply_force`] and also returns the reaction on the source, the exact negation
/// of the sum of the forces added to the targets.
pub fn apply_force_symmetric(
    g: f64,
    source: PointMass,
    targets: Targets<'_>,
    pool: &mut WorkingVecs,
) -> (f64, f64) {
    if targets.is_empty() {
        return (0.0, 0.0);
    }
    let mut b = pool.buffers(targets.len());
    coefficients(g, source, &targets, &mut b);

    mul(b.v5, b.v1, b.v3);
    axpy(1.0, b.v3, targets.fx);
    let reaction_x = -sum(b.v3);

    mul(b.v5, b.v2, b.v3);
    axpy(1.0, b.v3, targets.fy);
    let reaction_y = -sum(b.v3);

    (reaction_x, reaction_y)
}

/// Scalar reference for [`apply_force`].
pub fn apply_force_ref(g: f64, source: PointMass, targets: Targets<'_>) {
    let alpha = -g * source.mass;
    for i in 0..targets.len() {
        let dx = targets.x[i] - source.x;
        let dy = targets.y[i] - source.y;
        let d2 = dx * dx + dy * dy;
        let r = alpha * targets.mass[i] / (d2 * d2.sqrt());
        targets.fx[i] += r * dx;
        targets.fy[i] += r * dy;
    }
}

/// Scalar reference for [`apply_force_symmetric`].
pub fn apply_force_symmetric_ref(g: f64, source: PointMass, targets: Targets<'_>) -> (f64, f64) {
    let alpha = -g * source.mass;
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    for i in 0..targets.len() {
        let dx = targets.x[i] - source.x;
        let dy = targets.y[i] - source.y;
        let d2 = dx * dx + dy * dy;
        let r = alpha * targets.mass[i] / (d2 * d2.sqrt());
        let (cx, cy) = (r * dx, r * dy);
        targets.fx[i] += cx;
        targets.fy[i] += cy;
        sum_x += cx;
        sum_y += cy;
    }
    (-sum_x, -sum_y)
}
