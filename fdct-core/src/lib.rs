// fdct-core/src/lib.rs

//! Integer-only fast discrete cosine transform.
//! This crate holds the transform engine: forward and inverse DCT-II of
//! power-of-two length (4 to 4096 samples) computed with shifts, adds and
//! table lookups only, for targets without a floating-point unit. It does
//! no I/O and owns no threads.

pub mod config;
pub mod error;
pub mod scale;
pub mod table;
pub mod transform;
mod util;

pub use config::FdctConfig;
pub use error::{FdctError, Result};
pub use table::SinRecipTable;
pub use transform::Fdct;

/// Smallest supported transform exponent (4 samples).
pub const MIN_EXPONENT: u32 = 2;

/// Largest supported transform exponent (4096 samples).
pub const MAX_EXPONENT: u32 = 12;

/// Returns the exponent `n` with `2^n == len`, if `len` is a supported size.
pub fn exponent_for_len(len: usize) -> Option<u32> {
    if !len.is_power_of_two() {
        return None;
    }
    let n = len.trailing_zeros();
    (MIN_EXPONENT..=MAX_EXPONENT).contains(&n).then_some(n)
}
