//! # Fixed-Point Transform Engine
//!
//! Forward and inverse DCT-II of length `2^n` using Byeong Gi Lee's 1984
//! recursive decimation, in integer arithmetic only.
//!
//! ## Buffers
//! - Sample buffer: caller-visible input and output of every transform
//! - Scratch buffer: private ping-pong storage, swapped with the sample
//!   buffer at each recursion level
//! - Reciprocal table: the [`SinRecipTable`] every butterfly weight comes from
//!
//! ## Scaling
//! `forward` yields unnormalised DCT-II coefficients; `forward` followed by
//! `inverse` has a gain of `2^(n-1)`. See [`crate::scale`] for the shifts that
//! bring both ends back to input scale.

use crate::config::FdctConfig;
use crate::error::{FdctError, Result};
use crate::table::SinRecipTable;
use crate::util::mul_shift;
use crate::{MAX_EXPONENT, MIN_EXPONENT};

/// `π` scaled by `2^15`: phase advance per butterfly index.
const PHASE_STEP: i32 = 102943;
/// `π/2` scaled by `2^15`: phase of butterfly index zero.
const PHASE_OFFSET: i32 = 51471;
/// Fractional bits dropped after multiplying by a table weight.
const WEIGHT_SHIFT: u32 = 13;

/// The transform engine.
///
/// Owns a sample buffer of `2^max_exponent` integers, an equally sized scratch
/// buffer and the reciprocal table. Everything is allocated in
/// [`Fdct::new`]; transforms never allocate. Every transform takes
/// `&mut self`, so one engine serves one stream at a time.
#[derive(Debug)]
pub struct Fdct {
    buf: Box<[i32]>,
    scratch: Box<[i32]>,
    table: SinRecipTable,
    max_exponent: u32,
}

impl Fdct {
    /// Allocates the buffers and builds the table.
    ///
    /// # Arguments
    /// * `config` - Engine configuration; only `max_exponent` is recognised
    ///
    /// # Returns
    /// * `Ok(Fdct)` - Ready engine with a zeroed sample buffer
    /// * `Err(FdctError::MaxExponentOutOfRange)` - `max_exponent` not in `[2, 12]`
    /// * `Err(FdctError::Allocation)` - Storage could not be reserved
    pub fn new(config: FdctConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity();

        let buf = zeroed(capacity)?;
        let scratch = zeroed(capacity)?;
        let table = SinRecipTable::new()?;

        tracing::debug!(
            max_exponent = config.max_exponent,
            capacity,
            "fdct engine allocated"
        );

        Ok(Self {
            buf,
            scratch,
            table,
            max_exponent: config.max_exponent,
        })
    }

    /// Shorthand for `Fdct::new(FdctConfig::new(max_exponent))`.
    pub fn with_max_exponent(max_exponent: u32) -> Result<Self> {
        Self::new(FdctConfig::new(max_exponent))
    }

    pub fn max_exponent(&self) -> u32 {
        self.max_exponent
    }

    /// Number of samples the sample buffer holds.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Transform length for exponent `n`, or `None` outside `[2, 12]`.
    pub fn len_for(n: u32) -> Option<usize> {
        (MIN_EXPONENT..=MAX_EXPONENT).contains(&n).then(|| 1 << n)
    }

    pub fn table(&self) -> &SinRecipTable {
        &self.table
    }

    /// The full sample buffer. After a transform of size `2^n`, the first
    /// `2^n` entries hold the result.
    pub fn buffer(&self) -> &[i32] {
        &self.buf
    }

    /// Mutable access for filling the sample buffer before a transform.
    pub fn buffer_mut(&mut self) -> &mut [i32] {
        &mut self.buf
    }

    /// Copies `samples` into the front of the sample buffer.
    ///
    /// Entries past `samples.len()` keep their previous contents.
    pub fn load(&mut self, samples: &[i32]) -> Result<()> {
        if samples.len() > self.buf.len() {
            return Err(FdctError::BufferOverflow {
                len: samples.len(),
                capacity: self.buf.len(),
            });
        }
        self.buf[..samples.len()].copy_from_slice(samples);
        Ok(())
    }

    /// Forward DCT-II of the first `2^n` samples, in place.
    ///
    /// # Arguments
    /// * `n` - Transform exponent; `[2, max_exponent]` (4 to 4096 samples)
    ///
    /// # Returns
    /// * `Ok(())` - Coefficients are in `buffer()[..2^n]`
    /// * `Err(FdctError::ExponentOutOfRange)` - Nothing was touched
    pub fn forward(&mut self, n: u32) -> Result<()> {
        let len = self.checked_len(n)?;
        forward_step(&mut self.buf[..len], &mut self.scratch[..len], &self.table, n);
        Ok(())
    }

    /// Inverse transform of the first `2^n` coefficients, in place.
    ///
    /// Halves the DC coefficient first (the even-symmetry boundary condition
    /// of the DCT), so the output of [`Fdct::forward`] can be passed straight
    /// back in.
    ///
    /// # Arguments
    /// * `n` - Transform exponent; `[2, max_exponent]`
    ///
    /// # Returns
    /// * `Ok(())` - Reconstructed samples are in `buffer()[..2^n]`
    /// * `Err(FdctError::ExponentOutOfRange)` - Nothing was touched
    pub fn inverse(&mut self, n: u32) -> Result<()> {
        let len = self.checked_len(n)?;
        self.buf[0] >>= 1;
        inverse_step(&mut self.buf[..len], &mut self.scratch[..len], &self.table, n);
        Ok(())
    }

    /// Transform length for exponent `n` on this engine.
    ///
    /// # Returns
    /// * `Ok(len)` - `2^n`, which fits the engine buffers
    /// * `Err(FdctError::ExponentOutOfRange)` - `n` not in `[2, max_exponent]`
    pub fn checked_len(&self, n: u32) -> Result<usize> {
        if !(MIN_EXPONENT..=self.max_exponent).contains(&n) {
            tracing::warn!(n, max = self.max_exponent, "transform exponent rejected");
            return Err(FdctError::ExponentOutOfRange {
                n,
                min: MIN_EXPONENT,
                max: self.max_exponent,
            });
        }
        Ok(1 << n)
    }
}

impl Default for Fdct {
    /// An engine for transforms up to 4096 samples.
    ///
    /// # Panics
    /// * If the buffers cannot be allocated
    fn default() -> Self {
        Self::new(FdctConfig::new(MAX_EXPONENT)).expect("fdct buffers could not be allocated")
    }
}

fn zeroed(len: usize) -> Result<Box<[i32]>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, 0);
    Ok(v.into_boxed_slice())
}

/// Phase of butterfly `i` at level `n`: `(2i+1)π / 2^(n+1)`, scaled by `2^13`.
#[inline]
fn weight_phase(i: usize, n: u32) -> i32 {
    (i as i32 * PHASE_STEP + PHASE_OFFSET) >> (n + 2)
}

/// One level of the forward recursion over `vec[..2^n]`.
///
/// `tmp` must hold at least `2^n` entries. The two half-length children run
/// on `tmp` and borrow `vec` as their scratch.
fn forward_step(vec: &mut [i32], tmp: &mut [i32], table: &SinRecipTable, n: u32) {
    if n == 0 {
        return;
    }

    let len = 1usize << n;
    let half = len >> 1;

    for i in 0..half {
        let x = vec[i];
        let y = vec[len - 1 - i];
        tmp[i] = x.wrapping_add(y);

        let cos_m1 = table.cos_recip(weight_phase(i, n));
        tmp[i + half] = mul_shift(x.wrapping_sub(y), cos_m1, WEIGHT_SHIFT);
    }

    let (lo, hi) = tmp[..len].split_at_mut(half);
    forward_step(lo, vec, table, n - 1);
    forward_step(hi, vec, table, n - 1);

    for i in 0..half - 1 {
        vec[i << 1] = tmp[i];
        vec[(i << 1) + 1] = tmp[i + half].wrapping_add(tmp[i + half + 1]);
    }

    vec[len - 2] = tmp[half - 1];
    vec[len - 1] = tmp[len - 1];
}

/// One level of the inverse recursion; mirror image of [`forward_step`].
fn inverse_step(vec: &mut [i32], tmp: &mut [i32], table: &SinRecipTable, n: u32) {
    if n == 0 {
        return;
    }

    let len = 1usize << n;
    let half = len >> 1;

    tmp[0] = vec[0];
    tmp[half] = vec[1];

    for i in 1..half {
        tmp[i] = vec[i << 1];
        tmp[i + half] = vec[(i << 1) - 1].wrapping_add(vec[(i << 1) + 1]);
    }

    let (lo, hi) = tmp[..len].split_at_mut(half);
    inverse_step(lo, vec, table, n - 1);
    inverse_step(hi, vec, table, n - 1);

    for i in 0..half {
        let x = tmp[i];
        let cos_m1 = table.cos_recip(weight_phase(i, n));
        let y = mul_shift(tmp[i + half], cos_m1, WEIGHT_SHIFT);

        vec[i] = x.wrapping_add(y);
        vec[len - 1 - i] = x.wrapping_sub(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(max_exponent: u32) -> Fdct {
        Fdct::with_max_exponent(max_exponent).unwrap()
    }

    #[test]
    fn weight_phases_of_length_four_stage() {
        // (2i+1)π/8 scaled by 2^13.
        assert_eq!(weight_phase(0, 2), 3216);
        assert_eq!(weight_phase(1, 2), 9650);
        // Single butterfly at the bottom of the recursion: π/4.
        assert_eq!(weight_phase(0, 1), 6433);
    }

    #[test]
    fn forward_length_four_by_hand() {
        let mut dct = engine(2);
        dct.load(&[100, -50, 25, 0]).unwrap();
        // Level 2: sums [100, -25], weighted diffs
        //   100 * 4432 >> 13 = 54, -75 * 10701 >> 13 = -98.
        // Level 1 on [100, -25]: sum 75, 125 * 5791 >> 13 = 88.
        // Level 1 on [54, -98]: sum -44, 152 * 5791 >> 13 = 107.
        // Interleave: [75, -44 + 107, 88, 107].
        dct.forward(2).unwrap();
        assert_eq!(dct.buffer(), &[75, 63, 88, 107]);
    }

    #[test]
    fn forward_then_inverse_length_four_has_gain_two() {
        let mut dct = engine(2);
        dct.load(&[100, -50, 25, 0]).unwrap();
        dct.forward(2).unwrap();
        dct.inverse(2).unwrap();
        assert_eq!(dct.buffer(), &[198, -100, 50, 0]);
    }

    #[test]
    fn constant_input_lands_in_dc_bin() {
        let mut dct = engine(4);
        dct.load(&[1000; 16]).unwrap();
        dct.forward(4).unwrap();
        assert_eq!(dct.buffer()[0], 16000);
        assert!(dct.buffer()[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn impulse_spreads_like_a_cosine() {
        let mut dct = engine(4);
        let mut impulse = [0; 16];
        impulse[0] = 1000;
        dct.load(&impulse).unwrap();
        dct.forward(4).unwrap();
        for (k, &c) in dct.buffer().iter().enumerate() {
            let expected = 1000.0 * (std::f64::consts::PI * k as f64 / 32.0).cos();
            assert!((c as f64 - expected).abs() < 20.0, "bin {k}: {c} vs {expected:.1}");
        }
    }

    #[test]
    fn out_of_range_exponent_leaves_buffers_untouched() {
        let mut dct = engine(4);
        let samples: Vec<i32> = (0..16).map(|i| i * 3 - 20).collect();
        dct.load(&samples).unwrap();
        let scratch_before = dct.scratch.clone();

        for n in [0, 1, 5, 12, 40, 64] {
            assert!(matches!(
                dct.forward(n),
                Err(FdctError::ExponentOutOfRange { n: got, min: 2, max: 4 }) if got == n
            ));
            assert!(matches!(dct.inverse(n), Err(FdctError::ExponentOutOfRange { .. })));
        }

        assert_eq!(dct.buffer(), samples.as_slice());
        assert_eq!(dct.scratch, scratch_before);
    }

    #[test]
    fn lengths_exist_only_for_supported_exponents() {
        assert_eq!(Fdct::len_for(2), Some(4));
        assert_eq!(Fdct::len_for(12), Some(4096));
        for n in [0, 1, 13, 40, 64, u32::MAX] {
            assert_eq!(Fdct::len_for(n), None, "n={n}");
        }

        let dct = engine(4);
        assert_eq!(dct.checked_len(4).unwrap(), 16);
        for n in [1, 5, 40, 64] {
            assert!(matches!(
                dct.checked_len(n),
                Err(FdctError::ExponentOutOfRange { n: got, min: 2, max: 4 }) if got == n
            ));
        }
    }

    #[test]
    fn transform_only_touches_its_prefix() {
        let mut dct = engine(4);
        dct.load(&[7; 16]).unwrap();
        dct.forward(2).unwrap();
        assert_eq!(dct.buffer()[0], 28);
        assert_eq!(&dct.buffer()[4..], &[7; 12]);
    }

    #[test]
    fn load_rejects_oversized_input() {
        let mut dct = engine(2);
        assert!(matches!(
            dct.load(&[1; 5]),
            Err(FdctError::BufferOverflow { len: 5, capacity: 4 })
        ));
    }

    #[test]
    fn rejects_bad_maximum_exponent() {
        assert!(matches!(
            Fdct::with_max_exponent(13),
            Err(FdctError::MaxExponentOutOfRange(13))
        ));
        assert!(matches!(
            Fdct::with_max_exponent(1),
            Err(FdctError::MaxExponentOutOfRange(1))
        ));
    }

    #[test]
    fn default_engine_holds_4096_samples() {
        let dct = Fdct::default();
        assert_eq!(dct.capacity(), 4096);
        assert_eq!(dct.max_exponent(), 12);
        assert!(dct.buffer().iter().all(|&s| s == 0));
    }

    #[test]
    fn repeated_construction_builds_identical_tables() {
        let first = engine(12).table().clone();
        for _ in 0..8 {
            let dct = engine(12);
            assert_eq!(dct.table(), &first);
        }
    }

    #[test]
    fn engine_moves_across_threads() {
        let mut dct = engine(3);
        dct.load(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let dct = std::thread::spawn(move || {
            dct.forward(3).unwrap();
            dct
        })
        .join()
        .unwrap();
        assert_eq!(dct.buffer()[0], 36);
    }
}
