//! Small value helpers shared by the table and the butterflies.

/// Clamps `x` into `[lo, hi]`.
#[inline]
pub fn clip<T: PartialOrd>(x: T, lo: T, hi: T) -> T {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Fixed-point multiply: `(a * w) >> shift`, formed at 64 bits and
/// saturated back into `i32`.
#[inline]
pub fn mul_shift(a: i32, w: i32, shift: u32) -> i32 {
    let wide = (i64::from(a) * i64::from(w)) >> shift;
    clip(wide, i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
