//! Dilated causal 1-D convolution reference operator
//!
//! Floating-point reference semantics for the hardware convolution
//! datapath. Quantization is never applied inside the operator; fixed-point
//! encoding is an explicit, separate step taken when golden vectors are
//! serialized.

mod dilated;

pub use dilated::{DilatedConv1d, Padding};

use ndarray::Array2;

/// ELU activation applied elementwise
///
/// `f(x) = x` for `x > 0`, else `exp(x) - 1`.
pub fn elu(x: &Array2<f64>) -> Array2<f64> {
    x.mapv(|v| if v > 0.0 { v } else { v.exp() - 1.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_elu() {
        let x = array![[1.0, 0.0], [-1.0, 2.5]];
        let y = elu(&x);
        assert_eq!(y[[0, 0]], 1.0);
        assert_eq!(y[[0, 1]], 0.0);
        assert_eq!(y[[1, 1]], 2.5);
        assert!((y[[1, 0]] - ((-1.0f64).exp() - 1.0)).abs() < 1e-12);
    }
}
