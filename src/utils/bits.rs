//! Bit-level helpers shared by the position hash.

const SIGN_CLEAR: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Sign-extending right shift of a 64-bit signed value.
///
/// Built only from unsigned mask/shift/OR so the result never depends on how
/// the host shifts negative operands. Valid for `0 <= amount <= 63`.
#[inline]
pub fn shift_right_arithmetic(v: i64, amount: u32) -> i64 {
    debug_assert!(amount < 64, "shift amount out of range: {}", amount);

    let bits = v as u64;
    if v >= 0 {
        return (bits >> amount) as i64;
    }

    let magnitude = (bits & SIGN_CLEAR) >> amount;
    // Top `amount + 1` bits set: the original sign bit plus the fill.
    let fill = (u64::MAX >> (63 - amount)) << (63 - amount);
    (magnitude | fill) as i64
}
