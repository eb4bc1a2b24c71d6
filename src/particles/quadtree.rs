use std::collections::VecDeque;
use std::ops::Range;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::morton::{morton_decode, morton_index};
use crate::particles::cell::{m2p_into, p2p_ext_into, p2p_in_into};
use crate::particles::scheduler::{per_thread_scratch, with_thread_scratch};
use crate::particles::{
    BoundingBox, Cell, Forces, Multipole, TraversalStats, WorkerRange, WorkingVecs,
};
use crate::utils::{BarnesHutError, SolverConfig, TreeSpec, UniformSource};

/// Perfect complete 4-ary tree over a uniform `2^(H-1) x 2^(H-1)` grid of cells.
///
/// Leaf cells are stored at the Morton key of their grid position. Multipoles live in a flat
/// level-order array: node 0 is the root, the children of node `i` are `4i+1..=4i+4` and the
/// leaf multipole of cell `c` is node `first_outer_cm + c`.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rs_barnes_hut::particles::Quadtree;
/// use rs_barnes_hut::utils::{TreeSpec, DEFAULT_FAR_FIELD_LIMIT};
///
/// let spec = TreeSpec::new(3, (1600, 1600), (1e30, 1e32), (0.0, 1e17), (0.0, 1e17));
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut tree = Quadtree::init(&spec, &mut rng).unwrap();
///
/// tree.compute_multipoles();
/// let stats = tree.compute_forces(DEFAULT_FAR_FIELD_LIMIT).unwrap();
/// assert_eq!(stats.p2p_in, 16);
/// ```
#[derive(Debug, Clone)]
pub struct Quadtree {
    height: usize,
    bounds: BoundingBox,
    nb_cells: usize,
    nb_multipoles: usize,
    first_outer_cm: usize,
    cells: Vec<Cell>,
    multipoles: Vec<Multipole>,
    multipoles_valid: bool,
    config: SolverConfig,
}

impl Quadtree {
    /// Builds a randomly populated tree with the default solver configuration.
    pub fn init<R: UniformSource>(spec: &TreeSpec, rng: &mut R) -> Result<Self, BarnesHutError> {
        Self::init_with_config(spec, SolverConfig::default(), rng)
    }

    /// Builds a randomly populated tree.
    ///
    /// Cells are visited column by column (x outer, y inner) and each draws its particles
    /// from `rng` in that order, so a fixed seed always gives the same tree. Every cell gets
    /// a count in `[min / nb_cells, max / nb_cells]` of the total particle range.
    pub fn init_with_config<R: UniformSource>(
        spec: &TreeSpec,
        config: SolverConfig,
        rng: &mut R,
    ) -> Result<Self, BarnesHutError> {
        spec.validate()?;
        config.validate()?;

        let nb_cells = spec.nb_cells();
        let nb_multipoles = (4 * nb_cells - 1) / 3;
        let first_outer_cm = nb_multipoles - nb_cells;
        let dim = 1usize << (spec.height - 1);
        let dx = (spec.x.1 - spec.x.0) / dim as f64;
        let dy = (spec.y.1 - spec.y.0) / dim as f64;
        let count = (spec.particles.0 / nb_cells, spec.particles.1 / nb_cells);

        if count.0 == 0 {
            warn!(
                "Up to {} particles for {} cells: empty cells give undefined multipoles",
                spec.particles.0, nb_cells
            );
        }

        let mut cells = vec![Cell::default(); nb_cells];
        for x in 0..dim {
            for y in 0..dim {
                let cell_no = morton_index(x as u32, y as u32) as usize;
                cells[cell_no] = Cell::init(
                    count,
                    spec.mass,
                    (spec.x.0 + x as f64 * dx, spec.x.0 + (x + 1) as f64 * dx),
                    (spec.y.0 + y as f64 * dy, spec.y.0 + (y + 1) as f64 * dy),
                    rng,
                );
            }
        }

        debug!(
            "Built quadtree of height {} with {} cells and {} particles",
            spec.height,
            nb_cells,
            cells.iter().map(Cell::len).sum::<usize>()
        );

        Ok(Self {
            height: spec.height,
            bounds: BoundingBox::new(spec.x.0, spec.x.1, spec.y.0, spec.y.1),
            nb_cells,
            nb_multipoles,
            first_outer_cm,
            cells,
            multipoles: vec![Multipole::default(); nb_multipoles],
            multipoles_valid: false,
            config,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn nb_cells(&self) -> usize {
        self.nb_cells
    }

    pub fn nb_multipoles(&self) -> usize {
        self.nb_multipoles
    }

    /// Index of the leaf multipole of cell 0.
    pub fn first_outer_cm(&self) -> usize {
        self.first_outer_cm
    }

    /// Grid coordinates `(x, y)` of cell `cell_no`, the inverse of its Morton placement.
    ///
    /// # Panics
    ///
    /// Panics if `cell_no >= nb_cells`.
    pub fn cell_position(&self, cell_no: usize) -> (u32, u32) {
        assert!(cell_no < self.nb_cells, "cell {} out of range", cell_no);
        morton_decode(cell_no as u64)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cells. The multipoles are considered stale afterwards, until
    /// the next call to [`Quadtree::compute_multipoles`].
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        self.multipoles_valid = false;
        &mut self.cells
    }

    pub fn multipoles(&self) -> &[Multipole] {
        &self.multipoles
    }

    pub fn multipoles_valid(&self) -> bool {
        self.multipoles_valid
    }

    /// Computes every multipole, post-order from the root: P2M on the leaves, M2M above.
    pub fn compute_multipoles(&mut self) {
        self.compute_multipole_rec(0);
        self.multipoles_valid = true;
        debug!("Computed {} multipoles", self.nb_multipoles);
    }

    fn compute_multipole_rec(&mut self, node: usize) {
        if node < self.first_outer_cm {
            for child in 4 * node + 1..=4 * node + 4 {
                self.compute_multipole_rec(child);
            }
            self.multipoles[node] = Multipole::m2m(&self.multipoles[4 * node + 1..4 * node + 5]);
        } else {
            self.multipoles[node] = Multipole::p2m(&self.cells[node - self.first_outer_cm]);
        }
    }

    /// Same result as [`Quadtree::compute_multipoles`], computed one level at a time on the
    /// rayon thread pool.
    pub fn compute_multipoles_parallel(&mut self) {
        let first_outer = self.first_outer_cm;
        self.multipoles[first_outer..]
            .par_iter_mut()
            .zip(self.cells.par_iter())
            .for_each(|(m, cell)| *m = Multipole::p2m(cell));

        let mut level_size = self.nb_cells / 4;
        let mut children_start = first_outer;
        while level_size > 0 {
            let start = children_start - level_size;
            let (upper, lower) = self.multipoles.split_at_mut(children_start);
            let lower = &*lower;
            upper[start..]
                .par_iter_mut()
                .enumerate()
                .for_each(|(k, m)| *m = Multipole::m2m(&lower[4 * k..4 * k + 4]));
            children_start = start;
            level_size /= 4;
        }

        self.multipoles_valid = true;
        debug!("Computed {} multipoles level by level", self.nb_multipoles);
    }

    /// Runs the traversal for a single cell with the caller's working vectors.
    ///
    /// # Panics
    ///
    /// Panics if `cell_no >= nb_cells`.
    pub fn compute_forces_for_cell(
        &mut self,
        cell_no: usize,
        far_field_limit: f64,
        pool: &mut WorkingVecs,
    ) -> Result<TraversalStats, BarnesHutError> {
        self.check_ready(far_field_limit)?;
        let mut forces = std::mem::take(&mut self.cells[cell_no].forces);
        let mut queue = VecDeque::with_capacity(self.nb_multipoles);
        let stats = self.traversal(far_field_limit).run(cell_no, &mut forces, pool, &mut queue);
        self.cells[cell_no].forces = forces;
        Ok(stats)
    }

    /// Accumulates the forces on every particle of the tree, one cell per rayon task.
    pub fn compute_forces(&mut self, far_field_limit: f64) -> Result<TraversalStats, BarnesHutError> {
        self.check_ready(far_field_limit)?;
        Ok(self.run_parallel(0..self.nb_cells, far_field_limit))
    }

    /// Single-threaded version of [`Quadtree::compute_forces`].
    pub fn compute_forces_sequential(
        &mut self,
        far_field_limit: f64,
    ) -> Result<TraversalStats, BarnesHutError> {
        self.check_ready(far_field_limit)?;
        let mut pool = WorkingVecs::with_capacity(self.config.initial_pool_size);
        let mut queue = VecDeque::with_capacity(self.nb_multipoles);
        let mut forces = self.take_forces(0..self.nb_cells);
        let traversal = self.traversal(far_field_limit);
        let stats: TraversalStats = forces
            .iter_mut()
            .enumerate()
            .map(|(cell_no, f)| traversal.run(cell_no, f, &mut pool, &mut queue))
            .sum();
        self.restore_forces(0, forces);
        debug!("Sequential force pass: {:?}", stats);
        Ok(stats)
    }

    /// Accumulates the forces of the cells owned by worker `rank` of `workers` only.
    ///
    /// Every worker holds the full tree. The configuration is checked before any work.
    pub fn compute_forces_distributed(
        &mut self,
        far_field_limit: f64,
        rank: usize,
        workers: usize,
    ) -> Result<TraversalStats, BarnesHutError> {
        let range = WorkerRange::for_rank(self.nb_cells, rank, workers)?;
        self.check_ready(far_field_limit)?;
        info!(
            "Worker {}/{} computes cells {}..{}",
            rank, workers, range.start, range.end
        );
        Ok(self.run_parallel(range.range(), far_field_limit))
    }

    pub fn clear_forces(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_forces);
    }

    /// All particles of the tree in one cell, in Morton order.
    pub fn merged_cell(&self) -> Cell {
        Cell::merge(&self.cells)
    }

    fn check_ready(&self, far_field_limit: f64) -> Result<(), BarnesHutError> {
        if !self.multipoles_valid {
            return Err(BarnesHutError::StaleMultipoles);
        }
        if !(far_field_limit.is_finite() && far_field_limit > 0.0) {
            return Err(BarnesHutError::InvalidFarFieldLimit(far_field_limit));
        }
        Ok(())
    }

    fn traversal(&self, far_field_limit: f64) -> ForceTraversal<'_> {
        ForceTraversal {
            cells: &self.cells,
            multipoles: &self.multipoles,
            first_outer_cm: self.first_outer_cm,
            far_field_limit,
            g: self.config.gravitational_constant,
        }
    }

    fn take_forces(&mut self, range: Range<usize>) -> Vec<Forces> {
        self.cells[range].iter_mut().map(|c| std::mem::take(&mut c.forces)).collect()
    }

    fn restore_forces(&mut self, start: usize, forces: Vec<Forces>) {
        for (cell, f) in self.cells[start..].iter_mut().zip(forces) {
            cell.forces = f;
        }
    }

    /// Each task owns the force arrays of one cell and reads everything else. Working vectors
    /// and queues are allocated once per worker thread for the whole pass.
    fn run_parallel(&mut self, range: Range<usize>, far_field_limit: f64) -> TraversalStats {
        let start = range.start;
        let scratch = per_thread_scratch(self.config.initial_pool_size, self.nb_multipoles);
        let mut forces = self.take_forces(range);
        let traversal = self.traversal(far_field_limit);

        let stats = forces
            .par_iter_mut()
            .enumerate()
            .with_max_len(1)
            .map(|(k, f)| {
                with_thread_scratch(&scratch, |s| {
                    traversal.run(start + k, f, &mut s.pool, &mut s.queue)
                })
            })
            .reduce(TraversalStats::default, |a, b| a + b);

        self.restore_forces(start, forces);
        debug!(
            "Parallel force pass on {} worker scratch sets: {:?}",
            scratch.len(),
            stats
        );
        stats
    }
}

/// Read-only state shared by the per-cell traversals of one force pass.
struct ForceTraversal<'a> {
    cells: &'a [Cell],
    multipoles: &'a [Multipole],
    first_outer_cm: usize,
    far_field_limit: f64,
    g: f64,
}

impl ForceTraversal<'_> {
    /// Breadth-first walk from the root for the target cell `cell_no`, whose force arrays
    /// have been detached into `forces`.
    ///
    /// A node whose bounding box is far enough from the cell's box (`d > l / far_field_limit`)
    /// acts through its multipole.
    /// Otherwise an inner node is refined and a leaf acts particle by particle. The cell's own
    /// leaf is handled last by the in-cell operator.
    fn run(
        &self,
        cell_no: usize,
        forces: &mut Forces,
        pool: &mut WorkingVecs,
        queue: &mut VecDeque<usize>,
    ) -> TraversalStats {
        let target = &self.cells[cell_no];
        let mut stats = TraversalStats::default();

        queue.clear();
        queue.push_back(0);
        while let Some(node) = queue.pop_front() {
            let multipole = &self.multipoles[node];
            let d = multipole.distance(&target.bounds);
            if d > multipole.width() / self.far_field_limit {
                m2p_into(multipole, &target.particles, forces, self.g, pool);
                stats.m2p += 1;
            } else if node < self.first_outer_cm {
                queue.extend(4 * node + 1..=4 * node + 4);
            } else {
                let source = node - self.first_outer_cm;
                if source != cell_no {
                    p2p_ext_into(&self.cells[source].particles, &target.particles, forces, self.g, pool);
                    stats.p2p_ext += 1;
                }
            }
        }

        p2p_in_into(&target.particles, forces, self.g, pool);
        stats.p2p_in += 1;
        stats
    }
}
