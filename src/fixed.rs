//! Fixed-Point Codec
//!
//! Float to fixed-point conversion with the exact rounding, width, and
//! sign-extension semantics of the hardware datapath. A value in Q(W-F).F
//! format is a signed integer of `W` total bits with `F` fractional bits;
//! the default is Q8.8 (16 bits, 8 fractional).

use ndarray::{Array1, Array2, Array3};
use serde::{Deserialize, Serialize};

/// Fixed-point format descriptor
///
/// Threaded explicitly into every encode/decode and comparison call, so
/// that multiple formats (e.g. Q4.12 and Q8.8) can coexist within one run.
/// Serialized as the `fixed_point_config` field of every golden record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPointFormat {
    /// Total width in bits, sign included
    pub total_bits: u32,
    /// Fractional bits
    pub frac_bits: u32,
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::Q8_8
    }
}

impl FixedPointFormat {
    /// 16-bit format with 8 fractional bits, the hardware default
    pub const Q8_8: Self = Self {
        total_bits: 16,
        frac_bits: 8,
    };

    /// Create a format descriptor
    ///
    /// # Panics
    /// Panics if `total_bits` is outside `2..=62` or `frac_bits` does not
    /// leave at least one integer bit.
    pub fn new(total_bits: u32, frac_bits: u32) -> Self {
        assert!(
            (2..=62).contains(&total_bits),
            "unsupported fixed-point width: {total_bits}"
        );
        assert!(
            frac_bits < total_bits,
            "frac_bits {frac_bits} must be less than total_bits {total_bits}"
        );
        Self {
            total_bits,
            frac_bits,
        }
    }

    /// Scale factor `2^frac_bits`
    pub fn scale(&self) -> f64 {
        (1i64 << self.frac_bits) as f64
    }

    /// Value of one least significant bit, `2^-frac_bits`
    pub fn lsb(&self) -> f64 {
        1.0 / self.scale()
    }

    /// Smallest representable value, `-2^(W-1)` in raw units
    pub fn min_raw(&self) -> i64 {
        -(1i64 << (self.total_bits - 1))
    }

    /// Largest representable value, `2^(W-1) - 1` in raw units
    pub fn max_raw(&self) -> i64 {
        (1i64 << (self.total_bits - 1)) - 1
    }

    /// Encode a float as a fixed-point integer
    ///
    /// Computes `round(x * 2^frac_bits)` with round-half-away-from-zero,
    /// then truncates to `total_bits` by two's-complement wraparound. There
    /// is no saturation: values outside the representable range wrap
    /// modulo `2^W`, exactly as the hardware datapath stores them. Callers
    /// that need saturation must range-check against [`Self::min_raw`] and
    /// [`Self::max_raw`] before encoding. If the real datapath saturates
    /// instead of wrapping, comparisons near the range boundary will fail
    /// loudly rather than mask the divergence.
    pub fn encode(&self, x: f64) -> i64 {
        let modulus = 1i128 << self.total_bits;
        let half = modulus >> 1;
        let raw = (x * self.scale()).round() as i128;
        ((raw + half).rem_euclid(modulus) - half) as i64
    }

    /// Decode a fixed-point integer back to a float
    ///
    /// The raw value is masked to `total_bits`; if the sign bit (bit
    /// `W-1`) is set, it is sign-extended by subtracting `2^W`. Both the
    /// signed form (-256) and the raw bit pattern form (0xFF00) of the
    /// same stored value decode identically.
    pub fn decode(&self, raw: i64) -> f64 {
        let modulus = 1i128 << self.total_bits;
        let masked = (raw as i128).rem_euclid(modulus);
        let signed = if masked & (modulus >> 1) != 0 {
            masked - modulus
        } else {
            masked
        };
        signed as f64 * self.lsb()
    }

    /// Raw `W`-bit pattern of a stored value, for hex dumps and include files
    pub fn to_bits(&self, raw: i64) -> u64 {
        let modulus = 1i128 << self.total_bits;
        (raw as i128).rem_euclid(modulus) as u64
    }

    /// Encode a vector, e.g. a bias `[Cout]`
    pub fn encode_array1(&self, a: &Array1<f64>) -> Vec<i64> {
        a.iter().map(|&x| self.encode(x)).collect()
    }

    /// Encode a matrix, e.g. an input or output sequence `[T, C]`
    pub fn encode_array2(&self, a: &Array2<f64>) -> Vec<Vec<i64>> {
        a.outer_iter()
            .map(|row| row.iter().map(|&x| self.encode(x)).collect())
            .collect()
    }

    /// Encode a rank-3 tensor, e.g. a kernel `[K, Cin, Cout]`
    pub fn encode_array3(&self, a: &Array3<f64>) -> Vec<Vec<Vec<i64>>> {
        a.outer_iter()
            .map(|plane| {
                plane
                    .outer_iter()
                    .map(|row| row.iter().map(|&x| self.encode(x)).collect())
                    .collect()
            })
            .collect()
    }
}
