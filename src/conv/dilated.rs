//! Dilated Causal Convolution Implementation

use ndarray::{s, Array1, Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Padding mode of a convolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Zero-pad on the left (past) side only; output length equals input
    /// length and output at time `t` depends only on inputs at or before `t`
    Causal,
    /// No padding; output shrinks by the effective kernel size minus one
    Valid,
}

/// Dilated 1-D convolution over a `[T, Cin]` sequence
///
/// The kernel has shape `[K, Cin, Cout]`. Tap `k` reads the input
/// `k * dilation` steps in the past, so tap 0 is the current sample and
/// tap `K-1` the oldest. All arithmetic is host floating point; the
/// accumulation order is not part of the contract, which is why hardware
/// results are compared with an LSB tolerance rather than exact equality.
#[derive(Debug, Clone)]
pub struct DilatedConv1d {
    kernel: Array3<f64>,
    bias: Option<Array1<f64>>,
    dilation: usize,
    padding: Padding,
}

impl DilatedConv1d {
    /// Create a convolution operator
    ///
    /// Fails if `dilation` is zero, the kernel has no taps, or the bias
    /// length does not match the kernel's output channels.
    pub fn new(
        kernel: Array3<f64>,
        bias: Option<Array1<f64>>,
        dilation: usize,
        padding: Padding,
    ) -> Result<Self> {
        if dilation == 0 {
            return Err(Error::InvalidConfig("dilation must be at least 1".into()));
        }
        let (kernel_size, _, out_channels) = kernel.dim();
        if kernel_size == 0 {
            return Err(Error::InvalidConfig("kernel must have at least one tap".into()));
        }
        if let Some(b) = &bias {
            if b.len() != out_channels {
                return Err(Error::ShapeMismatch(format!(
                    "bias length {} does not match output channels {}",
                    b.len(),
                    out_channels
                )));
            }
        }
        Ok(Self {
            kernel,
            bias,
            dilation,
            padding,
        })
    }

    /// Kernel size `K`
    pub fn kernel_size(&self) -> usize {
        self.kernel.dim().0
    }

    /// Input channel count
    pub fn in_channels(&self) -> usize {
        self.kernel.dim().1
    }

    /// Output channel count
    pub fn out_channels(&self) -> usize {
        self.kernel.dim().2
    }

    /// Dilation factor
    pub fn dilation(&self) -> usize {
        self.dilation
    }

    /// Padding mode
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Span of the kernel in input samples, `(K - 1) * dilation + 1`
    pub fn effective_kernel_size(&self) -> usize {
        (self.kernel_size() - 1) * self.dilation + 1
    }

    /// Receptive field of one output sample
    pub fn receptive_field(&self) -> usize {
        self.effective_kernel_size()
    }

    /// Output length for an input of length `seq_len`
    ///
    /// Causal output always has the input length; valid output is
    /// `max(T - effective_kernel_size + 1, 0)` and a zero-length result is
    /// not an error.
    pub fn output_len(&self, seq_len: usize) -> usize {
        match self.padding {
            Padding::Causal => seq_len,
            Padding::Valid => seq_len.saturating_sub(self.effective_kernel_size() - 1),
        }
    }

    /// Apply the convolution to an input of shape `[T, Cin]`
    ///
    /// Returns `[T', Cout]` with `T'` per [`Self::output_len`]. For causal
    /// padding the input is conceptually left-padded with
    /// `effective_kernel_size - 1` zero rows, which keeps every dilated tap
    /// in range for every output position.
    pub fn forward(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        let (seq_len, in_channels) = input.dim();
        if in_channels != self.in_channels() {
            return Err(Error::ShapeMismatch(format!(
                "input has {} channels, kernel expects {}",
                in_channels,
                self.in_channels()
            )));
        }

        let eff = self.effective_kernel_size();
        let (out_len, padded) = match self.padding {
            Padding::Causal => {
                let mut padded = Array2::zeros((seq_len + eff - 1, in_channels));
                padded.slice_mut(s![eff - 1.., ..]).assign(input);
                (seq_len, padded)
            }
            Padding::Valid => (self.output_len(seq_len), input.to_owned()),
        };

        let out_channels = self.out_channels();
        let mut output = Array2::zeros((out_len, out_channels));

        for t in 0..out_len {
            // Position of the current sample in padded coordinates; tap k
            // reaches back k * dilation rows from here.
            let now = t + eff - 1;
            for o in 0..out_channels {
                let mut acc = match &self.bias {
                    Some(b) => b[o],
                    None => 0.0,
                };
                for k in 0..self.kernel_size() {
                    let row = now - k * self.dilation;
                    for i in 0..in_channels {
                        acc += padded[[row, i]] * self.kernel[[k, i, o]];
                    }
                }
                output[[t, o]] = acc;
            }
        }

        Ok(output)
    }
}
