use crate::utils::shift_right_arithmetic;

const X_MULTIPLIER: i32 = 3_129_871;
const Z_MULTIPLIER: i64 = 116_129_781;
const SQUARE_MULTIPLIER: i64 = 42_317_861;
const LINEAR_MULTIPLIER: i64 = 11;

/// Seed derived from a block position.
///
/// The x term is multiplied in 32-bit arithmetic before widening, matching the
/// game's own hash; every other step wraps in 64 bits.
#[inline]
pub fn position_seed(x: i32, y: i32, z: i32) -> i64 {
    let mut i = (x.wrapping_mul(X_MULTIPLIER) as i64)
        ^ (z as i64).wrapping_mul(Z_MULTIPLIER)
        ^ (y as i64);
    i = i
        .wrapping_mul(i)
        .wrapping_mul(SQUARE_MULTIPLIER)
        .wrapping_add(i.wrapping_mul(LINEAR_MULTIPLIER));
    shift_right_arithmetic(i, 16)
}
