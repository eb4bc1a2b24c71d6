use crate::particles::kernel::{
    apply_force, apply_force_ref, apply_force_symmetric, apply_force_symmetric_ref, PointMass,
    Targets,
};
use crate::particles::{Multipole, WorkingVecs};
use crate::utils::UniformSource;

/// Axis-aligned rectangle `[x_min, x_max] x [y_min, y_max]`.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::particles::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
/// let b = BoundingBox::new(2.0, 3.0, -1.0, 0.5);
/// let u = a.union(&b);
/// assert_eq!(u, BoundingBox::new(0.0, 3.0, -1.0, 1.0));
/// assert_eq!(u.width(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Extent along x. Tree boxes are square, so this is also their side.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Closed-interval containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Masses and positions of the particles of a cell, stored as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Particles {
    pub mass: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Particles {
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// The `i`-th particle seen as a point source.
    #[inline]
    pub fn point(&self, i: usize) -> PointMass {
        PointMass::new(self.mass[i], self.x[i], self.y[i])
    }
}

/// Force accumulators, one entry per particle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forces {
    pub fx: Vec<f64>,
    pub fy: Vec<f64>,
}

impl Forces {
    pub fn zeros(n: usize) -> Self {
        Self { fx: vec![0.0; n], fy: vec![0.0; n] }
    }

    pub fn len(&self) -> usize {
        self.fx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fx.is_empty()
    }

    pub fn clear(&mut self) {
        self.fx.fill(0.0);
        self.fy.fill(0.0);
    }
}

/// A batch of particles with its bounding box and accumulated forces.
///
/// Positions lie inside `bounds` when the cell is built by [`Cell::init`]. The force arrays
/// always have the same length as the particle arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub bounds: BoundingBox,
    pub particles: Particles,
    pub forces: Forces,
}

impl Cell {
    /// Builds a cell from explicit particle data with zeroed forces.
    ///
    /// # Panics
    ///
    /// Panics if the three arrays do not have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::particles::{BoundingBox, Cell};
    ///
    /// let cell = Cell::new(
    ///     BoundingBox::new(0.0, 10.0, 0.0, 10.0),
    ///     vec![2.0, 2.5],
    ///     vec![3.0, 3.5],
    ///     vec![4.0, 4.5],
    /// );
    /// assert_eq!(cell.len(), 2);
    /// assert_eq!(cell.forces.fx, vec![0.0, 0.0]);
    /// ```
    pub fn new(bounds: BoundingBox, mass: Vec<f64>, x: Vec<f64>, y: Vec<f64>) -> Self {
        assert!(
            mass.len() == x.len() && x.len() == y.len(),
            "particle arrays must have the same length"
        );
        let n = mass.len();
        Self { bounds, particles: Particles { mass, x, y }, forces: Forces::zeros(n) }
    }

    /// Populates a cell over `[x.0, x.1] x [y.0, y.1]` with a particle count drawn in the
    /// inclusive range `count`, then mass, x and y drawn for each particle in turn.
    pub fn init<R: UniformSource>(
        count: (usize, usize),
        mass: (f64, f64),
        x: (f64, f64),
        y: (f64, f64),
        rng: &mut R,
    ) -> Self {
        let n = rng.draw_count(count.0, count.1);
        let mut particles = Particles {
            mass: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        };
        for _ in 0..n {
            particles.mass.push(rng.draw(mass.0, mass.1));
            particles.x.push(rng.draw(x.0, x.1));
            particles.y.push(rng.draw(y.0, y.1));
        }
        Self {
            bounds: BoundingBox::new(x.0, x.1, y.0, y.1),
            particles,
            forces: Forces::zeros(n),
        }
    }

    /// Concatenates `cells` in order into one cell whose box is the union of theirs.
    /// Forces are concatenated too.
    pub fn merge(cells: &[Cell]) -> Cell {
        let total: usize = cells.iter().map(Cell::len).sum();
        let mut merged = Cell {
            bounds: cells.first().map(|c| c.bounds).unwrap_or_default(),
            particles: Particles {
                mass: Vec::with_capacity(total),
                x: Vec::with_capacity(total),
                y: Vec::with_capacity(total),
            },
            forces: Forces { fx: Vec::with_capacity(total), fy: Vec::with_capacity(total) },
        };
        for cell in cells {
            merged.bounds = merged.bounds.union(&cell.bounds);
            merged.particles.mass.extend_from_slice(&cell.particles.mass);
            merged.particles.x.extend_from_slice(&cell.particles.x);
            merged.particles.y.extend_from_slice(&cell.particles.y);
            merged.forces.fx.extend_from_slice(&cell.forces.fx);
            merged.forces.fy.extend_from_slice(&cell.forces.fy);
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    /// Interactions between every unordered pair of particles of the cell.
    pub fn p2p_in(&mut self, g: f64, pool: &mut WorkingVecs) {
        p2p_in_into(&self.particles, &mut self.forces, g, pool);
    }

    /// Forces of every particle of `source` on every particle of `self`.
    pub fn p2p_ext(&mut self, source: &Cell, g: f64, pool: &mut WorkingVecs) {
        p2p_ext_into(&source.particles, &self.particles, &mut self.forces, g, pool);
    }

    /// Force of a multipole, taken as a single point mass, on every particle of `self`.
    pub fn m2p(&mut self, multipole: &Multipole, g: f64, pool: &mut WorkingVecs) {
        m2p_into(multipole, &self.particles, &mut self.forces, g, pool);
    }

    /// Scalar version of [`Cell::p2p_in`].
    pub fn p2p_in_ref(&mut self, g: f64) {
        p2p_in_ref_into(&self.particles, &mut self.forces, g);
    }

    /// Scalar version of [`Cell::p2p_ext`].
    pub fn p2p_ext_ref(&mut self, source: &Cell, g: f64) {
        p2p_ext_ref_into(&source.particles, &self.particles, &mut self.forces, g);
    }
}

/// Symmetric in-cell interactions on detached arrays.
///
/// Particle `i` acts on the particles after it; the reaction, the negated sum of what it
/// applied, is added back to `i`. Each unordered pair is therefore evaluated once.
pub fn p2p_in_into(particles: &Particles, forces: &mut Forces, g: f64, pool: &mut WorkingVecs) {
    debug_assert_eq!(particles.len(), forces.len());
    for i in 0..particles.len().saturating_sub(1) {
        let targets = Targets::from_range(particles, forces, i + 1);
        let (rx, ry) = apply_force_symmetric(g, particles.point(i), targets, pool);
        forces.fx[i] += rx;
        forces.fy[i] += ry;
    }
}

pub fn p2p_ext_into(
    source: &Particles,
    target: &Particles,
    forces: &mut Forces,
    g: f64,
    pool: &mut WorkingVecs,
) {
    debug_assert_eq!(target.len(), forces.len());
    for j in 0..source.len() {
        apply_force(g, source.point(j), Targets::new(target, forces), pool);
    }
}

pub fn m2p_into(
    multipole: &Multipole,
    target: &Particles,
    forces: &mut Forces,
    g: f64,
    pool: &mut WorkingVecs,
) {
    apply_force(g, multipole.as_point(), Targets::new(target, forces), pool);
}

fn p2p_in_ref_into(particles: &Particles, forces: &mut Forces, g: f64) {
    for i in 0..particles.len().saturating_sub(1) {
        let targets = Targets::from_range(particles, forces, i + 1);
        let (rx, ry) = apply_force_symmetric_ref(g, particles.point(i), targets);
        forces.fx[i] += rx;
        forces.fy[i] += ry;
    }
}

fn p2p_ext_ref_into(source: &Particles, target: &Particles, forces: &mut Forces, g: f64) {
    for j in 0..source.len() {
        apply_force_ref(g, source.point(j), Targets::new(target, forces));
    }
}
