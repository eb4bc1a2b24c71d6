//! Barnes-Hut gravity solver for large 2D particle sets.
//!
//! Particles live in the leaf cells of a perfect quadtree laid out in Morton order. Every
//! node carries a multipole (mass and center of mass) computed bottom-up, and forces are
//! accumulated cell by cell: far nodes act through their multipole, near leaves particle by
//! particle.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use rs_barnes_hut::particles::Quadtree;
//! use rs_barnes_hut::utils::{TreeSpec, DEFAULT_FAR_FIELD_LIMIT};
//!
//! let spec = TreeSpec::new(2, (400, 400), (1e30, 1e32), (0.0, 1e17), (0.0, 1e17));
//! let mut tree = Quadtree::init(&spec, &mut StdRng::seed_from_u64(7)).unwrap();
//! tree.compute_multipoles();
//! tree.compute_forces(DEFAULT_FAR_FIELD_LIMIT).unwrap();
//! assert!(tree.cells().iter().all(|c| c.forces.fx.iter().all(|f| f.is_finite())));
//! ```
pub mod errors;
pub mod morton;
pub mod particles;
pub mod utils;
