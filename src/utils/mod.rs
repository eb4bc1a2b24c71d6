mod constants;
mod constants_config;
mod math_helpers;
mod random;

pub use constants::*;
pub use constants_config::*;
pub use math_helpers::*;
pub use random::*;
pub use crate::errors::BarnesHutError;
