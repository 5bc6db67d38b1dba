use super::position::position_seed;
use super::random::JavaRandom;

/// Number of distinct texture rotations.
pub const ORIENTATION_COUNT: i32 = 4;

/// Returned by [`random_item_index`] when the weight is never exhausted.
/// Never equal to a valid expected orientation.
pub const NO_ORIENTATION: i32 = -1;

/// Weighted pick over `total_weight` items of weight one each.
///
/// Kept as the step-by-step scan the game performs so out-of-range weights
/// behave identically: a negative weight selects index 0, a weight at or
/// beyond `total_weight` selects nothing.
#[inline]
pub fn random_item_index(total_weight: i32, mut weight: i32) -> i32 {
    for i in 0..total_weight {
        weight -= 1;
        if weight < 0 {
            return i;
        }
    }
    NO_ORIENTATION
}

/// Rotation (0..=3) of the block at the given position.
#[inline]
pub fn orientation(x: i32, y: i32, z: i32) -> i32 {
    let mut rng = JavaRandom::new(position_seed(x, y, z));
    let weight = (rng.next_long() as i32).wrapping_abs() % ORIENTATION_COUNT;
    random_item_index(ORIENTATION_COUNT, weight)
}
