use crate::utils::INITIAL_POOL_SIZE;

const NB_VECS: usize = 6;

/// Working buffers allocated once and reused by every kernel call of one worker.
///
/// All six buffers live in a single allocation and share the same length, `size`:
/// a unit vector filled with ones followed by five scratch vectors. The size only ever grows.
///
/// A set of working vectors must not be used by two threads at once; a parallel force pass
/// keeps one per worker thread (see [`Quadtree::compute_forces`](crate::particles::Quadtree::compute_forces)).
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::particles::WorkingVecs;
///
/// let mut wv = WorkingVecs::new();
/// wv.ensure_capacity(1000);
/// assert_eq!(wv.size(), 1000);
/// assert!(wv.unit_vec().iter().all(|&v| v == 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct WorkingVecs {
    size: usize,
    data: Vec<f64>,
}

/// Borrowed view of the working vectors, truncated to the length a kernel call needs.
pub struct Buffers<'a> {
    pub unit: &'a [f64],
    pub v1: &'a mut [f64],
    pub v2: &'a mut [f64],
    pub v3: &'a mut [f64],
    pub v4: &'a mut [f64],
    pub v5: &'a mut [f64],
}

impl WorkingVecs {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_POOL_SIZE)
    }

    pub fn with_capacity(size: usize) -> Self {
        let mut data = vec![0.0; NB_VECS * size];
        data[..size].fill(1.0);
        Self { size, data }
    }

    /// Current length of each buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn unit_vec(&self) -> &[f64] {
        &self.data[..self.size]
    }

    /// Makes sure every buffer holds at least `new_size` values.
    ///
    /// Values below the old size are kept in all six buffers and the new slots of the
    /// unit vector are set to one. Growth is to the exact requested size.
    pub fn ensure_capacity(&mut self, new_size: usize) {
        if new_size <= self.size {
            return;
        }
        let old = self.size;
        let mut data = vec![0.0; NB_VECS * new_size];
        for k in 0..NB_VECS {
            data[k * new_size..k * new_size + old].copy_from_slice(&self.data[k * old..(k + 1) * old]);
        }
        data[old..new_size].fill(1.0);
        self.data = data;
        self.size = new_size;
    }

    /// Splits the storage into the six buffers, each truncated to `n` values, growing first
    /// if needed.
    pub fn buffers(&mut self, n: usize) -> Buffers<'_> {
        self.ensure_capacity(n);
        let size = self.size;
        let (unit, rest) = self.data.split_at_mut(size);
        let (v1, rest) = rest.split_at_mut(size);
        let (v2, rest) = rest.split_at_mut(size);
        let (v3, rest) = rest.split_at_mut(size);
        let (v4, v5) = rest.split_at_mut(size);
        Buffers {
            unit: &unit[..n],
            v1: &mut v1[..n],
            v2: &mut v2[..n],
            v3: &mut v3[..n],
            v4: &mut v4[..n],
            v5: &mut v5[..n],
        }
    }
}

impl Default for WorkingVecs {
    fn default() -> Self {
        Self::new()
    }
}
