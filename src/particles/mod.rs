mod cell;
mod kernel;
mod multipole;
mod quadtree;
mod scheduler;
mod tuning;
mod vector_ops;
mod working_vecs;

pub use cell::*;
pub use kernel::*;
pub use multipole::*;
pub use quadtree::*;
pub use scheduler::*;
pub use tuning::*;
pub use working_vecs::*;

#[cfg(test)]
mod kernel_tests;
#[cfg(test)]
mod scheduler_tests;
#[cfg(test)]
mod working_vecs_tests;
