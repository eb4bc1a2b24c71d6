use rand::Rng;

/// Pluggable source of uniformly distributed numbers used to populate cells.
///
/// Every [`rand::Rng`] is a source, so a seeded `StdRng` gives reproducible trees.
///
/// # Example
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rs_barnes_hut::utils::UniformSource;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let v = rng.draw(1.0, 2.0);
/// assert!((1.0..=2.0).contains(&v));
/// ```
pub trait UniformSource {
    /// Draws a value in `[min, max]`.
    fn draw(&mut self, min: f64, max: f64) -> f64;

    /// Draws an integer uniformly in the inclusive range `[min, max]`.
    fn draw_count(&mut self, min: usize, max: usize) -> usize {
        let span = max.saturating_sub(min) as f64 + 1.0;
        let offset = self.draw(0.0, 1.0) * span;
        min.saturating_add(offset as usize).min(max)
    }
}

impl<R: Rng> UniformSource for R {
    #[inline]
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        min + self.random::<f64>() * (max - min)
    }
}
