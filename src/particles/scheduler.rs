use std::collections::VecDeque;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Range};
use std::sync::{Mutex, PoisonError};

use crate::particles::WorkingVecs;
use crate::utils::BarnesHutError;

/// Contiguous block of Morton-ordered cells handled by one worker of a distributed run.
///
/// Worker `rank` of `workers` gets `[rank * k, (rank + 1) * k)` with `k = nb_cells / workers`.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::particles::WorkerRange;
///
/// let r = WorkerRange::for_rank(16, 1, 4).unwrap();
/// assert_eq!(r.range(), 4..8);
/// assert!(WorkerRange::for_rank(16, 0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRange {
    pub rank: usize,
    pub workers: usize,
    pub start: usize,
    pub end: usize,
}

impl WorkerRange {
    pub fn for_rank(nb_cells: usize, rank: usize, workers: usize) -> Result<Self, BarnesHutError> {
        if workers == 0 {
            return Err(BarnesHutError::NoWorkers);
        }
        if nb_cells % workers != 0 {
            return Err(BarnesHutError::IndivisibleCellCount { cells: nb_cells, workers });
        }
        if rank >= workers {
            return Err(BarnesHutError::InvalidRank { rank, workers });
        }
        let k = nb_cells / workers;
        Ok(Self { rank, workers, start: rank * k, end: (rank + 1) * k })
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of operator applications performed by a force pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub m2p: usize,
    pub p2p_ext: usize,
    pub p2p_in: usize,
}

impl Add for TraversalStats {
    type Output = TraversalStats;

    fn add(self, other: TraversalStats) -> TraversalStats {
        TraversalStats {
            m2p: self.m2p + other.m2p,
            p2p_ext: self.p2p_ext + other.p2p_ext,
            p2p_in: self.p2p_in + other.p2p_in,
        }
    }
}

impl AddAssign for TraversalStats {
    fn add_assign(&mut self, other: TraversalStats) {
        *self = *self + other;
    }
}

impl Sum for TraversalStats {
    fn sum<I: Iterator<Item = TraversalStats>>(iter: I) -> Self {
        iter.fold(TraversalStats::default(), Add::add)
    }
}

/// Working vectors and traversal queue of one rayon worker thread, kept for a whole pass.
#[derive(Debug)]
pub(crate) struct Scratch {
    pub(crate) pool: WorkingVecs,
    pub(crate) queue: VecDeque<usize>,
}

/// One scratch set per thread of the current rayon pool.
pub(crate) fn per_thread_scratch(pool_size: usize, queue_size: usize) -> Vec<Mutex<Scratch>> {
    (0..rayon::current_num_threads().max(1))
        .map(|_| {
            Mutex::new(Scratch {
                pool: WorkingVecs::with_capacity(pool_size),
                queue: VecDeque::with_capacity(queue_size),
            })
        })
        .collect()
}

/// Runs `f` with the scratch set of the calling worker thread.
///
/// Each worker only ever locks its own slot, so the lock is uncontended. `f` must not spawn
/// rayon work, or a stolen task could try to take the same slot.
pub(crate) fn with_thread_scratch<R>(
    slots: &[Mutex<Scratch>],
    f: impl FnOnce(&mut Scratch) -> R,
) -> R {
    let slot = rayon::current_thread_index().unwrap_or(0) % slots.len();
    let mut scratch = slots[slot].lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut scratch)
}
