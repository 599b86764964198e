//! Fixed-point scale bookkeeping around the transform.
//!
//! `forward` followed by `inverse` multiplies a signal by `2^(n-1)`. The
//! split used throughout is a right shift by [`FORWARD_SHIFT`] after
//! `forward`, which keeps coefficients of 12-bit input comfortably inside
//! `i32` for every level of the inverse, and [`inverse_shift`] after
//! `inverse`. For a 1024-point transform these are the familiar `>> 3` and
//! `>> 6`.

/// Right shift applied to forward coefficients (divide by 8).
pub const FORWARD_SHIFT: u32 = 3;

/// Total shift separating input scale from `inverse(forward(x))`.
pub fn round_trip_shift(n: u32) -> u32 {
    n.saturating_sub(1)
}

/// Shift that brings `inverse` output back to input scale, given that the
/// coefficients were reduced by [`FORWARD_SHIFT`]. Negative below `n = 4`,
/// meaning a left shift.
pub fn inverse_shift(n: u32) -> i32 {
    round_trip_shift(n) as i32 - FORWARD_SHIFT as i32
}

/// Divides forward coefficients by `2^FORWARD_SHIFT` (arithmetic shift).
pub fn normalize_forward(coeffs: &mut [i32]) {
    for c in coeffs.iter_mut() {
        *c >>= FORWARD_SHIFT;
    }
}

/// Rescales inverse output of an `n`-exponent transform to input scale.
///
/// Right shifts round to nearest; left shifts are exact.
pub fn normalize_inverse(samples: &mut [i32], n: u32) {
    shift_round(samples, inverse_shift(n));
}

/// Shifts every value right by `shift` with rounding, or left by `-shift`.
pub fn shift_round(values: &mut [i32], shift: i32) {
    if shift > 0 {
        let half = 1 << (shift - 1);
        for v in values.iter_mut() {
            *v = v.wrapping_add(half) >> shift;
        }
    } else if shift < 0 {
        for v in values.iter_mut() {
            *v = v.wrapping_shl((-shift) as u32);
        }
    }
}
