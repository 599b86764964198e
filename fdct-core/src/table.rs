//! # Reciprocal Trigonometric Table
//!
//! A 1025-entry lookup of `4095 / sin(θ)` over the first quadrant, and the
//! division-free `1/cos` lookup every butterfly weight is taken from.
//!
//! Phases handed to [`SinRecipTable::cos_recip`] are radians scaled by `2^13`,
//! so `π/2 ≈ 12868`, `π ≈ 25735` and `2π ≈ 51471`.

use crate::error::Result;
use crate::util::clip;

/// Number of table entries: 1024 quadrant steps plus the `π/2` endpoint.
pub const TABLE_LEN: usize = 1025;

/// Entry used where `sin(θ)` is zero and the reciprocal is unbounded.
pub const SENTINEL: i32 = 1 << 20;

/// Numerator of every entry, `2^12 - 1`.
const NUMERATOR: f64 = ((1 << 12) - 1) as f64;

/// `π/2` scaled by `2^13`.
pub const QUARTER_TURN: i32 = 12868;
/// `π` scaled by `2^13`.
pub const HALF_TURN: i32 = 25735;
/// `2π` scaled by `2^13`.
pub const FULL_TURN: i32 = 51471;

/// Lookup of `round(4095 / sin(θ))` for `θ = (π/2)·i/1024`, `i` in `0..=1024`.
///
/// Built once when an engine is constructed and read-only afterwards. The
/// contents are a pure function of nothing at all, so two tables always
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinRecipTable {
    values: Box<[i32]>,
}

impl SinRecipTable {
    /// Computes the table.
    ///
    /// # Returns
    /// * `Ok(table)` - the filled table
    /// * `Err(FdctError::Allocation)` - the 1025 entries could not be reserved
    pub fn new() -> Result<Self> {
        let mut values = Vec::new();
        values.try_reserve_exact(TABLE_LEN)?;

        for i in 0..TABLE_LEN {
            let angle = 0.5 * std::f64::consts::PI * i as f64 / (TABLE_LEN - 1) as f64;
            let denom = angle.sin();
            let entry = if denom.abs() > 1e-12 {
                (NUMERATOR / denom).round() as i32
            } else {
                SENTINEL
            };
            values.push(entry);
        }

        Ok(Self {
            values: values.into_boxed_slice(),
        })
    }

    /// Number of entries, always [`TABLE_LEN`].
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// `1/cos(phase)` on the table's `4095` scale.
    ///
    /// Read against the transform's `2^13` weight scale (multiply, then
    /// `>> 13`), the same value is the butterfly weight `1/(2·cos(phase))`.
    ///
    /// `phase` is an angle in `[-π, π]` scaled by `2^13`. The angle is moved
    /// into the sine domain (`cos(φ) = sin(π/2 - φ)`), folded into `[-π, π]`,
    /// then into `[0, π/2]` by symmetry, and finally indexed linearly into the
    /// table. The sign of the result follows the sign of the cosine.
    #[inline]
    pub fn cos_recip(&self, phase: i32) -> i32 {
        let mut x = QUARTER_TURN - phase;

        if x < -HALF_TURN {
            x += FULL_TURN;
        } else if x > HALF_TURN {
            x -= FULL_TURN;
        }

        let sign = if x >= 0 { 1 } else { -1 };
        x = x.abs();

        if x >= QUARTER_TURN - 1 {
            x = HALF_TURN - x;
        }

        let index = x * TABLE_LEN as i32 / QUARTER_TURN;
        let index = clip(index, 0, TABLE_LEN as i32 - 1) as usize;

        sign * self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::mul_shift;

    fn table() -> SinRecipTable {
        SinRecipTable::new().unwrap()
    }

    #[test]
    fn has_expected_length_and_endpoints() {
        let t = table();
        assert_eq!(t.len(), TABLE_LEN);
        assert_eq!(t.get(0), Some(SENTINEL));
        assert_eq!(t.get(1024), Some(4095));
        assert_eq!(t.get(TABLE_LEN), None);
        // 4095 / sin(π/4) = 5791.2
        assert_eq!(t.get(512), Some(5791));
    }

    #[test]
    fn entries_positive_and_non_increasing_past_the_edge() {
        let t = table();
        let v = t.as_slice();
        assert!(v.iter().all(|&e| e > 0));
        for i in 1..TABLE_LEN - 1 {
            assert!(v[i] >= v[i + 1], "table rises at {i}: {} -> {}", v[i], v[i + 1]);
        }
    }

    #[test]
    fn sentinel_only_at_domain_edge() {
        let t = table();
        let hits: Vec<usize> = t
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e == SENTINEL)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(table(), table());
    }

    #[test]
    fn cos_recip_at_zero_is_unity() {
        // 1/cos(0) = 1, which the table spells as 4095.
        assert_eq!(table().cos_recip(0), 4095);
    }

    #[test]
    fn cos_recip_is_even_up_to_one_table_step() {
        let t = table();
        for phase in [1000, 3000, 6433, 9650, 12000] {
            let (pos, neg) = (t.cos_recip(phase), t.cos_recip(-phase));
            assert!((pos - neg).abs() * 200 < pos, "phase {phase}: {pos} vs {neg}");
        }
    }

    #[test]
    fn cos_recip_negative_past_quarter_turn() {
        let t = table();
        assert!(t.cos_recip(15000) < 0);
        assert!(t.cos_recip(-25000) < 0);
        assert!(t.cos_recip(25000) < 0);
    }

    #[test]
    fn cos_recip_saturates_at_quarter_turn() {
        assert_eq!(table().cos_recip(QUARTER_TURN).abs(), SENTINEL);
    }

    #[test]
    fn cos_recip_tracks_float_reference() {
        let t = table();
        // Butterfly phases for a length-8 stage: (2i+1)π/16.
        for phase in [1608, 4825, 8042, 11259] {
            let angle = phase as f64 / 8192.0;
            let expected = 4095.0 / angle.cos();
            let got = t.cos_recip(phase) as f64;
            let rel = (got - expected).abs() / expected;
            assert!(rel < 0.01, "phase {phase}: got {got}, expected {expected:.1}");
        }
    }

    #[test]
    fn cos_recip_with_weight_shift_halves_the_reciprocal() {
        let t = table();
        // Length-4 stage phases (π/8, 3π/8): 4432 and 10701 from the table.
        for (phase, weighted) in [(3216, 541), (9650, 1306)] {
            let got = mul_shift(1000, t.cos_recip(phase), 13);
            assert_eq!(got, weighted);
            let expected = 1000.0 / (2.0 * (phase as f64 / 8192.0).cos());
            assert!((got as f64 - expected).abs() < 1.0, "phase {phase}: {got} vs {expected:.1}");
        }
    }

    #[test]
    fn cos_recip_never_indexes_out_of_bounds() {
        let t = table();
        for phase in (-HALF_TURN..=HALF_TURN).step_by(7) {
            let _ = t.cos_recip(phase);
        }
        let _ = t.cos_recip(1);
        let _ = t.cos_recip(-1);
    }
}
