//! Block-position randomness.
//!
//! The game picks the visible rotation of certain blocks from a hash of the
//! block position fed into a 48-bit LCG. This module reproduces that chain:
//!
//! - [`position`] - position hash producing the generator seed
//! - [`random`] - the 48-bit linear congruential generator
//! - [`orientation`] - weighted selection of the rotation (0..=3)

pub mod orientation;
pub mod position;
pub mod random;

pub use orientation::{orientation, random_item_index, NO_ORIENTATION, ORIENTATION_COUNT};
pub use position::position_seed;
pub use random::JavaRandom;
