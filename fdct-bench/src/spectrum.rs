//! Reading the integer spectrum: dominant bin and its frequency.

/// Index and magnitude of the largest coefficient, ignoring the DC bin.
pub fn dominant_bin(coeffs: &[i32]) -> Option<(usize, u32)> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| (k, c.unsigned_abs()))
        .max_by_key(|&(_, magnitude)| magnitude)
}

/// Centre frequency in Hz of DCT-II bin `k` for a frame of `len` samples.
///
/// Bin `k` completes `k/2` cycles over the frame, so the bin spacing is
/// `sample_rate / (2·len)`.
pub fn bin_frequency(k: usize, len: usize, sample_rate: u32) -> f32 {
    k as f32 * sample_rate as f32 / (2 * len) as f32
}
